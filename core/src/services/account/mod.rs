//! Account service module
//!
//! Signup with email OTP verification, login, password reset and change,
//! bearer authentication and chat-turn gating.

mod config;
mod mailer;
mod service;


pub use config::AccountServiceConfig;
pub use mailer::Mailer;
pub use service::AccountService;
