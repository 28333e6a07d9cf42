//! Tests for the post-booking continuation: calendar outcome handling, the
//! both-or-neither link invariant, and email independence.

mod fixtures;

use fixtures::{
    sample_meeting, CalendarBehavior, InMemoryMeetingStore, MockCalendarService, RecordingNotifier,
};
use shield_common::services::{BoxedError, CalendarService, NotificationService};
use shield_db::MeetingRepository;
use shield_meetings::{run_post_booking, BookingContext, FALLBACK_MEET_LINK};
use std::sync::Arc;

const OPERATOR: &str = "ops@shieldsupport.example";

fn context(
    repo: Arc<InMemoryMeetingStore>,
    calendar: Option<Arc<MockCalendarService>>,
    notifier: Arc<RecordingNotifier>,
) -> Arc<BookingContext> {
    let calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>> = match calendar {
        Some(service) => Some(service),
        None => None,
    };
    let notifier: Arc<dyn NotificationService<Error = BoxedError>> = notifier;
    Arc::new(BookingContext {
        repo,
        calendar,
        notifier: Some(notifier),
        calendar_id: Some(OPERATOR.to_string()),
        operator_email: Some(OPERATOR.to_string()),
    })
}

#[tokio::test]
async fn failing_calendar_leaves_link_absent_and_falls_back() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let calendar = Arc::new(MockCalendarService::new(CalendarBehavior::Fail));

    let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    run_post_booking(context(repo.clone(), Some(calendar), notifier.clone()), meeting.clone()).await;

    let stored = repo.find_by_id(&meeting.id).await.unwrap().unwrap();
    assert!(stored.meet_link.is_none());
    assert!(stored.calendar_event_id.is_none());

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 2, "both emails must still be attempted");
    for email in &attempts {
        assert!(
            email.html.contains(FALLBACK_MEET_LINK),
            "fallback link text missing from {:?}",
            email.subject
        );
    }
}

#[tokio::test]
async fn successful_calendar_patches_record_and_links_emails() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let calendar = Arc::new(MockCalendarService::succeeding("https://meet.example/abc"));

    let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    run_post_booking(context(repo.clone(), Some(calendar), notifier.clone()), meeting.clone()).await;

    let stored = repo.find_by_id(&meeting.id).await.unwrap().unwrap();
    assert_eq!(stored.meet_link.as_deref(), Some("https://meet.example/abc"));
    assert!(stored.calendar_event_id.is_some());

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 2);
    for email in &attempts {
        assert!(email.html.contains("https://meet.example/abc"));
        assert!(!email.html.contains(FALLBACK_MEET_LINK));
    }
}

#[tokio::test]
async fn link_and_event_id_are_both_present_or_both_absent() {
    for behavior in [
        CalendarBehavior::Fail,
        CalendarBehavior::NoLink,
        CalendarBehavior::Succeed {
            event_id: "evt-1".to_string(),
            meet_link: "https://meet.example/xyz".to_string(),
        },
    ] {
        let repo = Arc::new(InMemoryMeetingStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let calendar = Arc::new(MockCalendarService::new(behavior));

        let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
        run_post_booking(context(repo.clone(), Some(calendar), notifier), meeting.clone()).await;

        let stored = repo.find_by_id(&meeting.id).await.unwrap().unwrap();
        assert_eq!(
            stored.meet_link.is_some(),
            stored.calendar_event_id.is_some(),
            "link fields must be set together"
        );
    }
}

#[tokio::test]
async fn event_without_usable_link_counts_as_failure() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let calendar = Arc::new(MockCalendarService::new(CalendarBehavior::NoLink));

    let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    run_post_booking(context(repo.clone(), Some(calendar), notifier.clone()), meeting.clone()).await;

    let stored = repo.find_by_id(&meeting.id).await.unwrap().unwrap();
    assert!(stored.meet_link.is_none());
    assert!(notifier.attempts().iter().all(|e| e.html.contains(FALLBACK_MEET_LINK)));
}

#[tokio::test]
async fn missing_calendar_collaborator_degrades_to_fallback() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    run_post_booking(context(repo.clone(), None, notifier.clone()), meeting.clone()).await;

    let stored = repo.find_by_id(&meeting.id).await.unwrap().unwrap();
    assert!(stored.meet_link.is_none());
    assert_eq!(notifier.attempts().len(), 2);
}

#[tokio::test]
async fn one_failed_email_never_prevents_the_other() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    // Admin inbox rejects; the requester confirmation must still go out.
    let notifier = Arc::new(RecordingNotifier::failing_for(OPERATOR));
    let calendar = Arc::new(MockCalendarService::succeeding("https://meet.example/abc"));

    let meeting = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    run_post_booking(context(repo.clone(), Some(calendar), notifier.clone()), meeting.clone()).await;

    let attempts = notifier.attempts();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().any(|e| e.to == vec![OPERATOR.to_string()]));
    assert!(attempts.iter().any(|e| e.to == vec!["a@x.com".to_string()]));
}

#[tokio::test]
async fn concurrent_bookings_do_not_interfere() {
    let repo = Arc::new(InMemoryMeetingStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let calendar_a = Arc::new(MockCalendarService::succeeding("https://meet.example/aa"));
    let calendar_b = Arc::new(MockCalendarService::succeeding("https://meet.example/bbb"));

    let meeting_a = repo.create(sample_meeting("A", "a@x.com", "Intro")).await.unwrap();
    let meeting_b = repo.create(sample_meeting("B", "b@y.com", "Demo")).await.unwrap();

    tokio::join!(
        run_post_booking(
            context(repo.clone(), Some(calendar_a), notifier.clone()),
            meeting_a.clone()
        ),
        run_post_booking(
            context(repo.clone(), Some(calendar_b), notifier.clone()),
            meeting_b.clone()
        ),
    );

    let stored_a = repo.find_by_id(&meeting_a.id).await.unwrap().unwrap();
    let stored_b = repo.find_by_id(&meeting_b.id).await.unwrap().unwrap();
    assert_eq!(stored_a.meet_link.as_deref(), Some("https://meet.example/aa"));
    assert_eq!(stored_b.meet_link.as_deref(), Some("https://meet.example/bbb"));

    // Two bookings, two email pairs.
    assert_eq!(notifier.attempts().len(), 4);
}
