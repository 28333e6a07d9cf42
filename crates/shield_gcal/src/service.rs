// --- File: crates/shield_gcal/src/service.rs ---
//! Google Calendar service implementation.
//!
//! This module provides an implementation of the CalendarService trait for
//! Google Calendar. Events are created with a `hangoutsMeet` conference
//! request so the API generates a Meet link alongside the event.

use chrono::{DateTime, Utc};
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime,
};
use shield_common::services::{BoxFuture, CalendarEvent, CalendarService, CreatedEvent};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::auth::HubType;

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to parse time: {0}")]
    TimeParseError(String),
}

/// Google Calendar service implementation.
pub struct GoogleCalendarService {
    calendar_hub: Arc<HubType>,
    time_zone: String,
}

impl GoogleCalendarService {
    /// Create a new Google Calendar service.
    pub fn new(calendar_hub: Arc<HubType>, time_zone: Option<String>) -> Self {
        Self {
            calendar_hub,
            time_zone: time_zone.unwrap_or_else(|| "UTC".to_string()),
        }
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Creates a calendar event with a generated Meet link.
    ///
    /// `conference_data_version(1)` is required for the API to actually
    /// create the conference; without it the request is accepted but the
    /// Meet link stays empty. `send_updates("all")` lets the provider
    /// notify any attendees directly.
    fn create_event(
        &self,
        calendar_id: &str,
        event: CalendarEvent,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let calendar_id = calendar_id.to_string();
        let calendar_hub = self.calendar_hub.clone();
        let time_zone = self.time_zone.clone();

        Box::pin(async move {
            let start_dt = DateTime::parse_from_rfc3339(&event.start_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e)))?
                .with_timezone(&Utc);
            let end_dt = DateTime::parse_from_rfc3339(&event.end_time)
                .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid end_time: {}", e)))?
                .with_timezone(&Utc);

            let attendees: Vec<EventAttendee> = event
                .attendees
                .iter()
                .map(|email| EventAttendee {
                    email: Some(email.clone()),
                    ..Default::default()
                })
                .collect();

            let new_event = Event {
                summary: Some(event.summary),
                description: event.description,
                start: Some(EventDateTime {
                    date_time: Some(start_dt),
                    time_zone: Some(time_zone.clone()),
                    ..Default::default()
                }),
                end: Some(EventDateTime {
                    date_time: Some(end_dt),
                    time_zone: Some(time_zone),
                    ..Default::default()
                }),
                attendees: if attendees.is_empty() {
                    None
                } else {
                    Some(attendees)
                },
                conference_data: Some(ConferenceData {
                    create_request: Some(CreateConferenceRequest {
                        // Unique per request; reusing an id would return the
                        // previously created conference.
                        request_id: Some(format!("req-{}", Uuid::new_v4().simple())),
                        conference_solution_key: Some(ConferenceSolutionKey {
                            type_: Some("hangoutsMeet".to_string()),
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            };

            let (_response, created_event) = calendar_hub
                .events()
                .insert(new_event, &calendar_id)
                .conference_data_version(1)
                .send_updates("all")
                .doit()
                .await?;

            info!(
                "Calendar event created: {:?} ({:?})",
                created_event.id, created_event.html_link
            );

            Ok(CreatedEvent {
                event_id: created_event.id,
                meet_link: created_event.hangout_link,
                html_link: created_event.html_link,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_parse_errors_are_reported_not_panicked() {
        let err = DateTime::parse_from_rfc3339("next tuesday")
            .map_err(|e| GcalServiceError::TimeParseError(format!("Invalid start_time: {}", e)))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid start_time"));
    }
}
