// File: crates/shield_crm/src/subscriber_handlers.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shield_db::Subscriber;
use tracing::error;

use crate::state::CrmState;

#[derive(Deserialize, Debug)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

/// Handler for newsletter signup. Duplicate emails are rejected.
#[axum::debug_handler]
pub async fn create_subscriber_handler(
    State(state): State<CrmState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, String)> {
    if payload.email.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter an email address".to_string(),
        ));
    }

    let existing = state
        .subscribers
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Subscriber lookup failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
        })?;
    if existing.is_some() {
        return Err((
            StatusCode::BAD_REQUEST,
            "This email is already subscribed".to_string(),
        ));
    }

    state
        .subscribers
        .create(Subscriber::new(payload.email))
        .await
        .map_err(|e| {
            error!("Subscriber creation failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "msg": "Subscribed successfully" })),
    ))
}

/// Handler listing all subscribers.
#[axum::debug_handler]
pub async fn list_subscribers_handler(
    State(state): State<CrmState>,
) -> Result<Json<Vec<Subscriber>>, (StatusCode, String)> {
    state.subscribers.find_all().await.map(Json).map_err(|e| {
        error!("Subscriber listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })
}

/// Handler deleting a subscriber.
#[axum::debug_handler]
pub async fn delete_subscriber_handler(
    State(state): State<CrmState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.subscribers.delete(&id).await.map_err(|e| {
        error!("Subscriber deletion failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Subscriber not found".to_string()));
    }

    Ok(Json(json!({ "msg": "Subscriber removed" })))
}
