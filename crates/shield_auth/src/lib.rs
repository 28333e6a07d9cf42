// --- File: crates/shield_auth/src/lib.rs ---
//! Authentication and user management for the Shield Support backend.
//!
//! Login is admin-only and self-service registration is disabled; regular
//! accounts are provisioned by an administrator. Tokens are JWTs signed with
//! the env-sourced secret, and the extractors in [`extract`] gate routes in
//! any crate whose state exposes the shared [`token::AuthTokens`].

pub mod extract;
pub mod handlers;
pub mod password;
pub mod routes;
pub mod token;

pub use extract::{AdminUser, AuthUser, MaybeAuthUser};
pub use routes::routes;
pub use token::{AuthTokens, Claims, TokenError};
