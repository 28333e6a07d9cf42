// --- File: crates/shield_mailer/src/lib.rs ---
//! Email notification collaborator for the Shield Support backend.
//!
//! Delivers templated HTML mail, optionally with binary attachments, through
//! the Gmail REST API using the same service-account identity the calendar
//! integration runs under.

pub mod message;
pub mod service;

pub use service::{GmailNotificationService, MailerError};
