// File: crates/shield_auth/src/handlers.rs
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shield_config::AppConfig;
use shield_db::{SqlUserRepository, User};
use std::sync::Arc;
use tracing::{error, info};

use crate::extract::{AdminUser, AuthUser};
use crate::password::{hash_password, verify_password};
use crate::token::AuthTokens;

// Define shared state needed by auth handlers
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<AuthTokens>,
    pub users: SqlUserRepository,
}

impl FromRef<AuthState> for Arc<AuthTokens> {
    fn from_ref(state: &AuthState) -> Self {
        state.tokens.clone()
    }
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub role: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Self-service registration is disabled; accounts are created by an admin.
#[axum::debug_handler]
pub async fn signup_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "message": "Registration is disabled. Please contact an administrator." })),
    )
}

/// Handler for admin login. Non-admin accounts are rejected even with
/// correct credentials.
#[axum::debug_handler]
pub async fn login_handler(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    let user = state
        .users
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Login lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err((StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()));
    }

    if !user.is_admin() {
        return Err((
            StatusCode::FORBIDDEN,
            "Access denied. Admin only.".to_string(),
        ));
    }

    let token = state.tokens.issue(&user.id, &user.role).map_err(|e| {
        error!("Failed to issue token: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;

    info!("Admin login: {}", user.email);
    Ok(Json(LoginResponse {
        token,
        role: user.role,
        name: user.name,
    }))
}

/// Handler returning the authenticated caller's profile.
#[axum::debug_handler]
pub async fn me_handler(
    State(state): State<AuthState>,
    user: AuthUser,
) -> Result<Json<User>, (StatusCode, String)> {
    let profile = state
        .users
        .find_by_id(&user.id)
        .await
        .map_err(|e| {
            error!("Profile lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(profile))
}

/// Handler listing all users (admin only).
#[axum::debug_handler]
pub async fn list_users_handler(
    State(state): State<AuthState>,
    _admin: AdminUser,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    state.users.find_all().await.map(Json).map_err(|e| {
        error!("User listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })
}

/// Handler for user statistics (admin only).
#[axum::debug_handler]
pub async fn user_stats_handler(
    State(state): State<AuthState>,
    _admin: AdminUser,
) -> Result<Json<Value>, (StatusCode, String)> {
    let cutoff = (Utc::now() - Duration::days(7)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let stats = state.users.stats(&cutoff).await.map_err(|e| {
        error!("User stats failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;

    Ok(Json(json!(stats)))
}

/// Handler fetching a single user. Non-admins may only read themselves.
#[axum::debug_handler]
pub async fn get_user_handler(
    State(state): State<AuthState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<User>, (StatusCode, String)> {
    if !caller.is_admin() && caller.id != id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    let user = state
        .users
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("User lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(user))
}

/// Handler creating a user (admin only). Duplicate emails are rejected.
#[axum::debug_handler]
pub async fn create_user_handler(
    State(state): State<AuthState>,
    _admin: AdminUser,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let existing = state.users.find_by_email(&payload.email).await.map_err(|e| {
        error!("User lookup failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;
    if existing.is_some() {
        return Err((StatusCode::BAD_REQUEST, "User already exists".to_string()));
    }

    let password_hash =
        hash_password(&payload.password).map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let role = payload.role.unwrap_or_else(|| "user".to_string());

    let user = state
        .users
        .create(User::new(payload.name, payload.email, password_hash, role))
        .await
        .map_err(|e| {
            error!("User creation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?;

    Ok(Json(json!({
        "success": true,
        "user": { "id": user.id, "name": user.name, "email": user.email, "role": user.role },
        "message": "User created successfully"
    })))
}

/// Handler updating a user. Non-admins may only update themselves, and only
/// admins can change roles or active status.
#[axum::debug_handler]
pub async fn update_user_handler(
    State(state): State<AuthState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if !caller.is_admin() && caller.id != id {
        return Err((StatusCode::FORBIDDEN, "Access denied".to_string()));
    }

    let mut user = state
        .users
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("User lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = name;
    }
    if let Some(email) = payload.email {
        user.email = email;
    }
    if caller.is_admin() {
        if let Some(role) = payload.role {
            user.role = role;
        }
        if let Some(is_active) = payload.is_active {
            user.is_active = is_active;
        }
    }

    let updated = state
        .users
        .update(&user)
        .await
        .map_err(|e| {
            error!("User update failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "user": updated,
        "message": "User updated successfully"
    })))
}

/// Handler deleting a user (admin only).
#[axum::debug_handler]
pub async fn delete_user_handler(
    State(state): State<AuthState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.users.delete(&id).await.map_err(|e| {
        error!("User deletion failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
