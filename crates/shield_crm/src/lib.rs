// --- File: crates/shield_crm/src/lib.rs ---
//! Customer-facing plumbing: contact messages, newsletter subscribers and
//! support tickets.

pub mod message_handlers;
pub mod routes;
pub mod state;
pub mod subscriber_handlers;
pub mod ticket_handlers;

pub use routes::routes;
pub use state::CrmState;
