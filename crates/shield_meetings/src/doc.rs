// --- File: crates/shield_meetings/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{BookMeetingRequest, UpdateMeetingRequest};
use shield_db::Meeting;

#[utoipa::path(
    put,
    path = "/meetings/{id}", // Path relative to /api
    params(("id" = String, Path, description = "Meeting id")),
    request_body = UpdateMeetingRequest,
    responses(
        (status = 200, description = "Updated meeting", body = Meeting),
        (status = 404, description = "Meeting not found")
    ),
    tag = "Meetings"
)]
fn doc_update_meeting_handler() {}

#[utoipa::path(
    delete,
    path = "/meetings/{id}", // Path relative to /api
    params(("id" = String, Path, description = "Meeting id")),
    responses(
        (status = 200, description = "Meeting removed"),
        (status = 404, description = "Meeting not found")
    ),
    tag = "Meetings"
)]
fn doc_delete_meeting_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::book_meeting_handler,
        crate::handlers::list_meetings_handler,
        doc_update_meeting_handler,
        doc_delete_meeting_handler
    ),
    components(schemas(Meeting, BookMeetingRequest, UpdateMeetingRequest)),
    tags((name = "Meetings", description = "Meeting scheduling API"))
)]
pub struct MeetingsApiDoc;
