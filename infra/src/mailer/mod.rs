//! Mailer implementations

pub mod log_mailer;

pub use log_mailer::LogMailer;
