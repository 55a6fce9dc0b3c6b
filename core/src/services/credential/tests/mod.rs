mod policy_tests;
mod vault_tests;
