// --- File: crates/shield_payments/src/lib.rs ---
//! Mock payment ledger. Entries are simulated, owner-scoped for users and
//! fully visible to admins.

pub mod handlers;
pub mod routes;

pub use routes::routes;
