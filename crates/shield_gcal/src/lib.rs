// --- File: crates/shield_gcal/src/lib.rs ---
//! Google Calendar collaborator for the Shield Support backend.
//!
//! The backend only needs one calendar operation: creating an event with a
//! video-conferencing link attached. Authentication uses a service account
//! key with domain-wide delegation so the event lands on the operator's
//! calendar.

pub mod auth;
pub mod service;

pub use auth::{create_calendar_hub, HubType};
pub use service::{GcalServiceError, GoogleCalendarService};
