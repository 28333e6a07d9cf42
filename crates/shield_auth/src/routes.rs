// --- File: crates/shield_auth/src/routes.rs ---

use crate::handlers::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler, login_handler,
    me_handler, signup_handler, update_user_handler, user_stats_handler, AuthState,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use shield_config::AppConfig;
use shield_db::SqlUserRepository;
use std::sync::Arc;

use crate::token::AuthTokens;

/// Creates a router containing the auth and user-management routes.
pub fn routes(
    config: Arc<AppConfig>,
    tokens: Arc<AuthTokens>,
    users: SqlUserRepository,
) -> Router {
    let auth_state = AuthState {
        config,
        tokens,
        users,
    };

    Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        .route("/users", get(list_users_handler))
        .route("/users", post(create_user_handler))
        .route("/users/stats", get(user_stats_handler))
        .route("/users/{id}", get(get_user_handler))
        .route("/users/{id}", put(update_user_handler))
        .route("/users/{id}", delete(delete_user_handler))
        .with_state(auth_state)
}
