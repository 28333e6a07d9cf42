// --- File: crates/shield_meetings/src/lib.rs ---
//! Meeting scheduling: the booking endpoint and its fire-and-forget
//! post-booking workflow (calendar event, record patch, confirmation
//! emails).
//!
//! The synchronous part of a booking ends when the record is stored; from
//! there the continuation in [`workflow`] runs detached. The requester sees
//! success as soon as the record exists, regardless of downstream
//! collaborator health.

pub mod doc;
pub mod handlers;
pub mod routes;
pub mod workflow;

pub use routes::routes;
pub use workflow::{run_post_booking, spawn_post_booking, BookingContext, FALLBACK_MEET_LINK};
