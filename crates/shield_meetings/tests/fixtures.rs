//! Test fixtures for the booking workflow tests
//!
//! Hand-rolled collaborator doubles: an in-memory meeting store, a
//! scriptable calendar service and a recording notifier.
#![allow(dead_code)] // not every test target uses every fixture

use shield_common::services::{
    BoxFuture, BoxedError, CalendarEvent, CalendarService, CreatedEvent, EmailMessage,
    NotificationResult, NotificationService,
};
use shield_db::{DbError, Meeting, MeetingRepository, NewMeeting};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Builds a booking request like the ones the public form submits.
pub fn sample_meeting(name: &str, email: &str, subject: &str) -> Meeting {
    Meeting::from_new(NewMeeting {
        name: name.to_string(),
        email: email.to_string(),
        subject: subject.to_string(),
        phone: "123456".to_string(),
        website: "https://example.com".to_string(),
        date: "2025-01-01".to_string(),
        time: "10:00".to_string(),
        iso_date: "2025-01-01T10:00:00Z".to_string(),
        duration: "30".to_string(),
        time_zone: "UTC".to_string(),
    })
}

/// In-memory meeting store, newest first like the SQL repository.
#[derive(Default)]
pub struct InMemoryMeetingStore {
    records: Mutex<Vec<Meeting>>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeetingRepository for InMemoryMeetingStore {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async { Ok(()) })
    }

    fn create(&self, meeting: Meeting) -> BoxFuture<'_, Meeting, DbError> {
        self.records.lock().unwrap().push(meeting.clone());
        Box::pin(async move { Ok(meeting) })
    }

    fn find_all(&self) -> BoxFuture<'_, Vec<Meeting>, DbError> {
        let mut all = self.records.lock().unwrap().clone();
        all.reverse();
        Box::pin(async move { Ok(all) })
    }

    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        let found = self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|meeting| meeting.id == id)
            .cloned();
        Box::pin(async move { Ok(found) })
    }

    fn update_admin_note(&self, id: &str, note: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        let mut records = self.records.lock().unwrap();
        let updated = records.iter_mut().find(|meeting| meeting.id == id).map(|meeting| {
            meeting.admin_update = Some(note.to_string());
            meeting.clone()
        });
        Box::pin(async move { Ok(updated) })
    }

    fn set_conference_link(
        &self,
        id: &str,
        meet_link: &str,
        event_id: &str,
    ) -> BoxFuture<'_, bool, DbError> {
        let mut records = self.records.lock().unwrap();
        let patched = match records.iter_mut().find(|meeting| meeting.id == id) {
            Some(meeting) => {
                meeting.meet_link = Some(meet_link.to_string());
                meeting.calendar_event_id = Some(event_id.to_string());
                true
            }
            None => false,
        };
        Box::pin(async move { Ok(patched) })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, bool, DbError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|meeting| meeting.id != id);
        let deleted = records.len() < before;
        Box::pin(async move { Ok(deleted) })
    }
}

/// Meeting store whose writes always fail, for persistence-failure tests.
#[derive(Default)]
pub struct FailingMeetingStore;

impl MeetingRepository for FailingMeetingStore {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async { Ok(()) })
    }

    fn create(&self, _meeting: Meeting) -> BoxFuture<'_, Meeting, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }

    fn find_all(&self) -> BoxFuture<'_, Vec<Meeting>, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }

    fn find_by_id(&self, _id: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }

    fn update_admin_note(&self, _id: &str, _note: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }

    fn set_conference_link(
        &self,
        _id: &str,
        _meet_link: &str,
        _event_id: &str,
    ) -> BoxFuture<'_, bool, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }

    fn delete(&self, _id: &str) -> BoxFuture<'_, bool, DbError> {
        Box::pin(async { Err(DbError::QueryError("disk full".to_string())) })
    }
}

/// How the scripted calendar collaborator behaves.
#[derive(Clone)]
pub enum CalendarBehavior {
    /// Returns an event with the given id and link.
    Succeed { event_id: String, meet_link: String },
    /// Event is created but comes back without a usable link.
    NoLink,
    /// The API call errors.
    Fail,
}

pub struct MockCalendarService {
    behavior: CalendarBehavior,
    calls: AtomicUsize,
}

impl MockCalendarService {
    pub fn new(behavior: CalendarBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn succeeding(meet_link: &str) -> Self {
        Self::new(CalendarBehavior::Succeed {
            event_id: format!("evt-{}", meet_link.len()),
            meet_link: meet_link.to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CalendarService for MockCalendarService {
    type Error = BoxedError;

    fn create_event(
        &self,
        _calendar_id: &str,
        _event: CalendarEvent,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let behavior = self.behavior.clone();
        Box::pin(async move {
            match behavior {
                CalendarBehavior::Succeed { event_id, meet_link } => Ok(CreatedEvent {
                    event_id: Some(event_id),
                    meet_link: Some(meet_link.clone()),
                    html_link: Some(format!("https://calendar.example/view/{}", meet_link.len())),
                }),
                CalendarBehavior::NoLink => Ok(CreatedEvent {
                    event_id: Some("evt-nolink".to_string()),
                    meet_link: None,
                    html_link: None,
                }),
                CalendarBehavior::Fail => Err(BoxedError(Box::new(std::io::Error::other(
                    "calendar API unavailable",
                )))),
            }
        })
    }
}

/// Notifier that records every attempted send. A recipient listed in
/// `fail_for` still counts as attempted but the send resolves to an error.
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    fail_for: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_for: None,
        }
    }

    /// Sends to this recipient will be attempted and then fail.
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_for: Some(recipient.to_string()),
        }
    }

    pub fn attempts(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService for RecordingNotifier {
    type Error = BoxedError;

    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, NotificationResult, Self::Error> {
        self.sent.lock().unwrap().push(message.clone());
        let should_fail = self
            .fail_for
            .as_ref()
            .map(|recipient| message.to.iter().any(|to| to == recipient))
            .unwrap_or(false);
        Box::pin(async move {
            if should_fail {
                Err(BoxedError(Box::new(std::io::Error::other("SMTP down"))))
            } else {
                Ok(NotificationResult {
                    id: "msg-1".to_string(),
                    status: "sent".to_string(),
                })
            }
        })
    }
}
