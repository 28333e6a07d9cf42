// File: crates/shield_meetings/src/handlers.rs
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shield_auth::{AdminUser, AuthTokens};
use shield_config::AppConfig;
use shield_db::{Meeting, MeetingRepository, NewMeeting};
use std::sync::Arc;
use tracing::{error, info};

use crate::workflow::{spawn_post_booking, BookingContext};

// Define shared state needed by meeting handlers
#[derive(Clone)]
pub struct MeetingsState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<AuthTokens>,
    pub repo: Arc<dyn MeetingRepository>,
    /// Collaborator bundle handed to each booking's detached continuation.
    pub booking: Arc<BookingContext>,
}

impl FromRef<MeetingsState> for Arc<AuthTokens> {
    fn from_ref(state: &MeetingsState) -> Self {
        state.tokens.clone()
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookMeetingRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Canonical ISO start instant.
    #[serde(default)]
    pub iso_date: String,
    /// Duration in minutes, as entered ("30").
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub time_zone: String,
}

impl From<BookMeetingRequest> for NewMeeting {
    fn from(request: BookMeetingRequest) -> Self {
        NewMeeting {
            name: request.name,
            email: request.email,
            phone: request.phone,
            website: request.website,
            subject: request.subject,
            date: request.date,
            time: request.time,
            iso_date: request.iso_date,
            duration: request.duration,
            time_zone: request.time_zone,
        }
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMeetingRequest {
    pub admin_update: Option<String>,
}

/// Handler for the public booking request.
///
/// Step 1 is synchronous: the record is stored and returned in the response
/// with no link or event id. Steps 2 and 3 (calendar event, patch, emails)
/// are handed to a detached task and cannot affect this response. A
/// persistence failure aborts the whole workflow; nothing is scheduled.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/meetings", // Path relative to /api
    request_body = BookMeetingRequest,
    responses(
        (status = 200, description = "Stored meeting request; link fields are absent until the background step patches them", body = Meeting),
        (status = 400, description = "Missing required booking field"),
        (status = 500, description = "Persistence failure; no background work scheduled")
    ),
    tag = "Meetings"
))]
pub async fn book_meeting_handler(
    State(state): State<MeetingsState>,
    Json(payload): Json<BookMeetingRequest>,
) -> Result<Json<Meeting>, (StatusCode, String)> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.subject.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter all required fields".to_string(),
        ));
    }

    let meeting = Meeting::from_new(payload.into());

    let stored = state.repo.create(meeting).await.map_err(|e| {
        error!("Failed to store meeting request: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?;

    info!("Meeting request {} stored for {}", stored.id, stored.email);
    spawn_post_booking(state.booking.clone(), stored.clone());

    Ok(Json(stored))
}

/// Handler listing all meeting requests, newest first.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/meetings", // Path relative to /api
    responses(
        (status = 200, description = "All meeting requests, newest first", body = [Meeting]),
        (status = 500, description = "Internal error")
    ),
    tag = "Meetings"
))]
pub async fn list_meetings_handler(
    State(state): State<MeetingsState>,
) -> Result<Json<Vec<Meeting>>, (StatusCode, String)> {
    state.repo.find_all().await.map(Json).map_err(|e| {
        error!("Meeting listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })
}

/// Handler updating the admin note on a meeting (admin only). Only the note
/// is writable here; link fields belong to the background continuation.
#[axum::debug_handler]
pub async fn update_meeting_handler(
    State(state): State<MeetingsState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMeetingRequest>,
) -> Result<Json<Meeting>, (StatusCode, String)> {
    let meeting = match payload.admin_update {
        Some(note) => state.repo.update_admin_note(&id, &note).await,
        None => state.repo.find_by_id(&id).await,
    }
    .map_err(|e| {
        error!("Meeting update failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?
    .ok_or((StatusCode::NOT_FOUND, "Meeting not found".to_string()))?;

    Ok(Json(meeting))
}

/// Handler deleting a meeting request (admin only).
#[axum::debug_handler]
pub async fn delete_meeting_handler(
    State(state): State<MeetingsState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.repo.delete(&id).await.map_err(|e| {
        error!("Meeting deletion failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Meeting not found".to_string()));
    }

    Ok(Json(json!({ "msg": "Meeting removed" })))
}
