// File: crates/shield_crm/src/ticket_handlers.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use shield_auth::{AdminUser, AuthUser};
use shield_db::{Ticket, TicketWithUser};
use tracing::error;

use crate::state::CrmState;

#[derive(Deserialize, Debug)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub message: String,
    pub priority: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateTicketRequest {
    pub status: String,
}

/// Handler creating a support ticket for the authenticated caller.
#[axum::debug_handler]
pub async fn create_ticket_handler(
    State(state): State<CrmState>,
    caller: AuthUser,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Json<Ticket>, (StatusCode, String)> {
    let ticket = Ticket::new(
        caller.id,
        payload.subject,
        payload.message,
        payload.priority.unwrap_or_else(|| "Medium".to_string()),
    );

    state.tickets.create(ticket).await.map(Json).map_err(|e| {
        error!("Ticket creation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
    })
}

/// Handler listing the caller's own tickets.
#[axum::debug_handler]
pub async fn list_tickets_handler(
    State(state): State<CrmState>,
    caller: AuthUser,
) -> Result<Json<Vec<Ticket>>, (StatusCode, String)> {
    state
        .tickets
        .find_by_user(&caller.id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Ticket listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })
}

/// Handler listing all tickets with their owners (admin only).
#[axum::debug_handler]
pub async fn list_all_tickets_handler(
    State(state): State<CrmState>,
    _admin: AdminUser,
) -> Result<Json<Vec<TicketWithUser>>, (StatusCode, String)> {
    state
        .tickets
        .find_all_with_users()
        .await
        .map(Json)
        .map_err(|e| {
            error!("Ticket listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })
}

/// Handler updating a ticket's status (admin only).
#[axum::debug_handler]
pub async fn update_ticket_handler(
    State(state): State<CrmState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>, (StatusCode, String)> {
    let ticket = state
        .tickets
        .update_status(&id, &payload.status)
        .await
        .map_err(|e| {
            error!("Ticket update failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
        })?
        .ok_or((StatusCode::NOT_FOUND, "Ticket not found".to_string()))?;

    Ok(Json(ticket))
}
