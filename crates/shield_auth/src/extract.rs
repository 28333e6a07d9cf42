// --- File: crates/shield_auth/src/extract.rs ---
//! Axum extractors for role-gated routes.
//!
//! Any state that exposes `Arc<AuthTokens>` via `FromRef` can use these:
//! `AuthUser` rejects unauthenticated requests, `AdminUser` additionally
//! requires the admin role, and `MaybeAuthUser` never rejects.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use crate::token::AuthTokens;

/// The authenticated caller, decoded from the Bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// The authenticated caller, verified to hold the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

/// The caller when a valid token is present; `None` otherwise. Never
/// rejects, for routes that are public but behave differently for admins.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authenticate(parts: &Parts, tokens: &AuthTokens) -> Result<AuthUser, (StatusCode, String)> {
    let token = bearer_token(parts).ok_or((
        StatusCode::UNAUTHORIZED,
        "No token, authorization denied".to_string(),
    ))?;

    let claims = tokens
        .verify(token)
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Token is not valid".to_string()))?;

    Ok(AuthUser {
        id: claims.sub,
        role: claims.role,
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AuthTokens>: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<AuthTokens>::from_ref(state);
        authenticate(parts, &tokens)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AuthTokens>: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<AuthTokens>::from_ref(state);
        let user = authenticate(parts, &tokens)?;
        if !user.is_admin() {
            return Err((StatusCode::FORBIDDEN, "Admin access required".to_string()));
        }
        Ok(AdminUser(user))
    }
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AuthTokens>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<AuthTokens>::from_ref(state);
        Ok(MaybeAuthUser(authenticate(parts, &tokens).ok()))
    }
}
