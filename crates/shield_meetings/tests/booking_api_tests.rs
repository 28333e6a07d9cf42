//! Handler-level tests for the meetings API: the synchronous booking
//! contract, validation, and the not-found paths.

mod fixtures;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use fixtures::{FailingMeetingStore, InMemoryMeetingStore, MockCalendarService, RecordingNotifier};
use shield_auth::{AdminUser, AuthTokens, AuthUser};
use shield_common::services::{BoxedError, CalendarService, NotificationService};
use shield_config::{AppConfig, ServerConfig};
use shield_db::{Meeting, MeetingRepository};
use shield_meetings::handlers::{
    book_meeting_handler, delete_meeting_handler, list_meetings_handler, update_meeting_handler,
    BookMeetingRequest, MeetingsState, UpdateMeetingRequest,
};
use shield_meetings::BookingContext;
use std::sync::Arc;
use std::time::Duration;

const OPERATOR: &str = "ops@shieldsupport.example";

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        },
        use_gcal: false,
        use_mailer: false,
        database: None,
        gcal: None,
        mailer: None,
        auth: None,
    })
}

struct TestHarness {
    state: MeetingsState,
    repo: Arc<InMemoryMeetingStore>,
    notifier: Arc<RecordingNotifier>,
}

fn harness_with(
    repo: Arc<dyn MeetingRepository>,
    store: Arc<InMemoryMeetingStore>,
    calendar: Option<Arc<MockCalendarService>>,
    notifier: Arc<RecordingNotifier>,
) -> TestHarness {
    let calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>> = match calendar {
        Some(service) => Some(service),
        None => None,
    };
    let notifier_dyn: Arc<dyn NotificationService<Error = BoxedError>> = notifier.clone();

    let booking = Arc::new(BookingContext {
        repo: repo.clone(),
        calendar,
        notifier: Some(notifier_dyn),
        calendar_id: Some(OPERATOR.to_string()),
        operator_email: Some(OPERATOR.to_string()),
    });

    let state = MeetingsState {
        config: test_config(),
        tokens: Arc::new(AuthTokens::new("test-secret", 1)),
        repo,
        booking,
    };

    TestHarness {
        state,
        repo: store,
        notifier,
    }
}

fn harness(calendar: Option<Arc<MockCalendarService>>) -> TestHarness {
    let store = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    harness_with(store.clone(), store, calendar, notifier)
}

fn booking_request() -> BookMeetingRequest {
    BookMeetingRequest {
        name: "A".to_string(),
        email: "a@x.com".to_string(),
        subject: "Intro".to_string(),
        phone: "123".to_string(),
        website: "https://example.com".to_string(),
        date: "2025-01-01".to_string(),
        time: "10:00".to_string(),
        iso_date: "2025-01-01T10:00:00Z".to_string(),
        duration: "30".to_string(),
        time_zone: "UTC".to_string(),
    }
}

fn admin() -> AdminUser {
    AdminUser(AuthUser {
        id: "admin-1".to_string(),
        role: "admin".to_string(),
    })
}

async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}

/// Poll the store until the background continuation has patched the record.
async fn wait_for_link(repo: &Arc<InMemoryMeetingStore>, id: &str) -> Meeting {
    for _ in 0..200 {
        if let Some(meeting) = repo.find_by_id(id).await.unwrap() {
            if meeting.meet_link.is_some() {
                return meeting;
            }
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("record was never patched with a meeting link");
}

#[tokio::test]
async fn booking_responds_with_stored_record_before_any_patch() {
    let harness = harness(Some(Arc::new(MockCalendarService::succeeding(
        "https://meet.example/abc",
    ))));

    let Json(stored): Json<Meeting> =
        book_meeting_handler(State(harness.state.clone()), Json(booking_request()))
            .await
            .expect("booking should succeed");

    // Synchronous response: link fields are absent at response time.
    assert!(stored.meet_link.is_none());
    assert!(stored.calendar_event_id.is_none());
    assert_eq!(stored.name, "A");

    // The detached continuation eventually patches the record and sends
    // both emails.
    let patched = wait_for_link(&harness.repo, &stored.id).await;
    assert_eq!(patched.meet_link.as_deref(), Some("https://meet.example/abc"));
    wait_until(|| harness.notifier.attempts().len() == 2).await;
}

#[tokio::test]
async fn missing_required_field_is_rejected_before_persistence() {
    let harness = harness(None);

    let mut request = booking_request();
    request.subject = String::new();

    let err = book_meeting_handler(State(harness.state.clone()), Json(request))
        .await
        .expect_err("missing subject must be rejected");
    assert_eq!(err.0, StatusCode::BAD_REQUEST);

    // Nothing was stored and nothing was scheduled.
    let all = harness.repo.find_all().await.unwrap();
    assert!(all.is_empty());
    assert!(harness.notifier.attempts().is_empty());
}

#[tokio::test]
async fn persistence_failure_schedules_no_background_work() {
    let store = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let calendar = Arc::new(MockCalendarService::succeeding("https://meet.example/abc"));
    let harness = harness_with(
        Arc::new(FailingMeetingStore),
        store,
        Some(calendar.clone()),
        notifier,
    );

    let err = book_meeting_handler(State(harness.state.clone()), Json(booking_request()))
        .await
        .expect_err("persistence failure must surface as an error");
    assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);

    // Give any (incorrectly) spawned work a chance to run, then verify the
    // collaborators were never touched.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calendar.call_count(), 0);
    assert!(harness.notifier.attempts().is_empty());
}

#[tokio::test]
async fn email_failures_do_not_change_the_booking_response() {
    let store = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::failing_for(OPERATOR));
    let harness = harness_with(store.clone(), store, None, notifier);

    let result = book_meeting_handler(State(harness.state.clone()), Json(booking_request())).await;
    assert!(result.is_ok(), "email health must not affect the response");

    wait_until(|| harness.notifier.attempts().len() == 2).await;
}

#[tokio::test]
async fn listing_returns_bookings() {
    let harness = harness(None);

    book_meeting_handler(State(harness.state.clone()), Json(booking_request()))
        .await
        .unwrap();

    let Json(meetings) = list_meetings_handler(State(harness.state.clone())).await.unwrap();
    assert_eq!(meetings.len(), 1);
    assert_eq!(meetings[0].email, "a@x.com");
}

#[tokio::test]
async fn admin_note_update_on_missing_meeting_is_not_found() {
    let harness = harness(None);

    let err = update_meeting_handler(
        State(harness.state.clone()),
        admin(),
        Path("missing-id".to_string()),
        Json(UpdateMeetingRequest {
            admin_update: Some("call them back".to_string()),
        }),
    )
    .await
    .expect_err("unknown id must be a 404");
    assert_eq!(err.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_note_update_touches_only_the_note() {
    let harness = harness(None);

    let Json(stored) =
        book_meeting_handler(State(harness.state.clone()), Json(booking_request()))
            .await
            .unwrap();

    let Json(updated) = update_meeting_handler(
        State(harness.state.clone()),
        admin(),
        Path(stored.id.clone()),
        Json(UpdateMeetingRequest {
            admin_update: Some("confirmed by phone".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.admin_update.as_deref(), Some("confirmed by phone"));
    assert_eq!(updated.email, stored.email);
    assert!(updated.meet_link.is_none());
}

#[tokio::test]
async fn deleting_a_missing_meeting_is_not_found_not_server_error() {
    let harness = harness(None);

    let err = delete_meeting_handler(
        State(harness.state.clone()),
        admin(),
        Path("does-not-exist".to_string()),
    )
    .await
    .expect_err("unknown id must be a 404");
    assert_eq!(err.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_existing_meeting_removes_it() {
    let harness = harness(None);

    let Json(stored) =
        book_meeting_handler(State(harness.state.clone()), Json(booking_request()))
            .await
            .unwrap();

    delete_meeting_handler(State(harness.state.clone()), admin(), Path(stored.id.clone()))
        .await
        .expect("delete should succeed");

    assert!(harness.repo.find_by_id(&stored.id).await.unwrap().is_none());
}
