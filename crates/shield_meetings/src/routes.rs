// --- File: crates/shield_meetings/src/routes.rs ---

use crate::handlers::{
    book_meeting_handler, delete_meeting_handler, list_meetings_handler, update_meeting_handler,
    MeetingsState,
};
use crate::workflow::BookingContext;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use shield_auth::AuthTokens;
use shield_common::services::{BoxedError, CalendarService, NotificationService};
use shield_config::AppConfig;
use shield_db::MeetingRepository;
use std::sync::Arc;

/// Creates a router containing the meeting scheduling routes.
pub fn routes(
    config: Arc<AppConfig>,
    tokens: Arc<AuthTokens>,
    repo: Arc<dyn MeetingRepository>,
    calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let booking = Arc::new(BookingContext {
        repo: repo.clone(),
        calendar,
        notifier,
        calendar_id: config.gcal.as_ref().and_then(|gcal| gcal.calendar_id.clone()),
        operator_email: config.mailer.as_ref().map(|mailer| mailer.operator_email.clone()),
    });

    let meetings_state = MeetingsState {
        config,
        tokens,
        repo,
        booking,
    };

    Router::new()
        .route("/meetings", post(book_meeting_handler))
        .route("/meetings", get(list_meetings_handler))
        .route("/meetings/{id}", put(update_meeting_handler))
        .route("/meetings/{id}", delete(delete_meeting_handler))
        .with_state(meetings_state)
}
