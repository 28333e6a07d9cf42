// --- File: crates/shield_content/src/lib.rs ---
//! Marketing content endpoints: blog posts and job postings.
//!
//! Reads are public (active jobs, published blogs); mutation is admin-only.
//! The job application flow emails the operator and the applicant through
//! the notification collaborator.

pub mod blog_handlers;
pub mod career_handlers;
pub mod doc;
pub mod routes;
pub mod state;

pub use routes::routes;
pub use state::ContentState;
