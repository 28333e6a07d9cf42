//! Meeting request model and repository trait
//!
//! The booking workflow holds the repository as a trait object so tests can
//! substitute an in-memory store, which is why this trait uses boxed futures
//! instead of native async fns.

use crate::error::DbError;
use serde::{Deserialize, Serialize};
use shield_common::services::BoxFuture;
use uuid::Uuid;

/// A scheduled meeting request.
///
/// `meet_link` and `calendar_event_id` are absent on creation and set
/// together, at most once, by the post-booking continuation.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub subject: String,
    /// Human-readable date as entered by the requester.
    pub date: String,
    /// Human-readable time as entered by the requester.
    pub time: String,
    /// Canonical ISO start instant.
    pub iso_date: String,
    /// Requested duration in minutes, as supplied by the caller.
    pub duration: String,
    pub time_zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meet_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_event_id: Option<String>,
    pub created_at: String,
}

/// Caller-supplied fields of a new meeting request.
#[derive(Debug, Clone, Default)]
pub struct NewMeeting {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub subject: String,
    pub date: String,
    pub time: String,
    pub iso_date: String,
    pub duration: String,
    pub time_zone: String,
}

impl Meeting {
    /// Build a fresh record from the caller-supplied fields, with no link or
    /// event id.
    pub fn from_new(new: NewMeeting) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            website: new.website,
            subject: new.subject,
            date: new.date,
            time: new.time,
            iso_date: new.iso_date,
            duration: new.duration,
            time_zone: new.time_zone,
            admin_update: None,
            meet_link: None,
            calendar_event_id: None,
            created_at: super::now_rfc3339(),
        }
    }

    /// Requested duration in minutes, parsed from the caller's free-text
    /// value ("30", "30 Minutes", ...). Falls back to 30.
    pub fn duration_minutes(&self) -> i64 {
        let digits: String = self
            .duration
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(30)
    }
}

/// Repository for meeting requests.
pub trait MeetingRepository: Send + Sync {
    /// Create the backing table if it does not exist.
    fn init_schema(&self) -> BoxFuture<'_, (), DbError>;

    /// Persist a new meeting request.
    fn create(&self, meeting: Meeting) -> BoxFuture<'_, Meeting, DbError>;

    /// All meeting requests, newest first.
    fn find_all(&self) -> BoxFuture<'_, Vec<Meeting>, DbError>;

    /// Look up a meeting request by id.
    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Meeting>, DbError>;

    /// Replace the admin note, returning the updated record when it exists.
    fn update_admin_note(&self, id: &str, note: &str) -> BoxFuture<'_, Option<Meeting>, DbError>;

    /// Set the conferencing link and external event id together, keyed by
    /// identity. Returns false when no record matched.
    fn set_conference_link(
        &self,
        id: &str,
        meet_link: &str,
        event_id: &str,
    ) -> BoxFuture<'_, bool, DbError>;

    /// Delete by id, returning false when no record matched.
    fn delete(&self, id: &str) -> BoxFuture<'_, bool, DbError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting_with_duration(duration: &str) -> Meeting {
        Meeting::from_new(NewMeeting {
            name: "A".into(),
            email: "a@x.com".into(),
            subject: "Intro".into(),
            duration: duration.into(),
            ..Default::default()
        })
    }

    #[test]
    fn fresh_meeting_has_no_link_or_event_id() {
        let meeting = meeting_with_duration("30");
        assert!(meeting.meet_link.is_none());
        assert!(meeting.calendar_event_id.is_none());
        assert!(!meeting.id.is_empty());
    }

    #[test]
    fn duration_parses_leading_integer() {
        assert_eq!(meeting_with_duration("30").duration_minutes(), 30);
        assert_eq!(meeting_with_duration("45 Minutes").duration_minutes(), 45);
        assert_eq!(meeting_with_duration("about 60 min").duration_minutes(), 60);
    }

    #[test]
    fn unparseable_duration_falls_back_to_thirty() {
        assert_eq!(meeting_with_duration("").duration_minutes(), 30);
        assert_eq!(meeting_with_duration("an hour").duration_minutes(), 30);
    }

    #[test]
    fn link_fields_are_omitted_from_json_when_absent() {
        let meeting = meeting_with_duration("30");
        let json = serde_json::to_value(&meeting).unwrap();
        assert!(json.get("meetLink").is_none());
        assert!(json.get("calendarEventId").is_none());
        assert!(json.get("isoDate").is_some());
    }
}
