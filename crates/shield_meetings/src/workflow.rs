// --- File: crates/shield_meetings/src/workflow.rs ---
//! The post-booking continuation.
//!
//! Once the meeting record is stored and the HTTP response has been handed
//! back, the rest of the booking is fire-and-forget: create the calendar
//! event, patch the record with the resulting link, and send the two
//! confirmation emails. Nothing in here can fail the original request, and
//! every failure is caught and logged inside the continuation.

use chrono::{DateTime, Duration};
use shield_common::services::{
    BoxedError, CalendarEvent, CalendarService, EmailMessage, NotificationService,
};
use shield_db::{Meeting, MeetingRepository};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Placeholder used in the confirmation emails when no conferencing link
/// could be created. The stored record keeps no link in that case.
pub const FALLBACK_MEET_LINK: &str = "A meeting link will be shared with you separately.";

/// Collaborator handles the detached continuation runs against.
pub struct BookingContext {
    pub repo: Arc<dyn MeetingRepository>,
    pub calendar: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
    /// Calendar to create events on; usually the operator's address.
    pub calendar_id: Option<String>,
    /// Inbox that receives the admin-facing notification.
    pub operator_email: Option<String>,
}

/// Detach the continuation from the caller's request-response cycle.
///
/// The spawned task owns everything it needs; the caller cannot await or
/// cancel it.
pub fn spawn_post_booking(ctx: Arc<BookingContext>, meeting: Meeting) {
    tokio::spawn(async move {
        run_post_booking(ctx, meeting).await;
    });
}

/// The continuation body. Public so tests can run it to completion instead
/// of racing a detached task.
pub async fn run_post_booking(ctx: Arc<BookingContext>, meeting: Meeting) {
    let resolved_link = match create_conference(&ctx, &meeting).await {
        Some((event_id, meet_link)) => {
            patch_record(&ctx, &meeting, &event_id, &meet_link).await;
            meet_link
        }
        None => FALLBACK_MEET_LINK.to_string(),
    };

    send_confirmations(&ctx, &meeting, &resolved_link).await;
}

/// Step 2: create the calendar event. Any failure, including an event
/// without a usable link, resolves to None and the booking proceeds with
/// the fallback text.
async fn create_conference(ctx: &BookingContext, meeting: &Meeting) -> Option<(String, String)> {
    let calendar = ctx.calendar.as_ref()?;
    let calendar_id = ctx.calendar_id.as_deref()?;

    let start = match DateTime::parse_from_rfc3339(&meeting.iso_date) {
        Ok(start) => start,
        Err(e) => {
            warn!(
                "Meeting {} has unparseable start instant {:?}: {}",
                meeting.id, meeting.iso_date, e
            );
            return None;
        }
    };
    let end = start + Duration::minutes(meeting.duration_minutes());

    let event = CalendarEvent {
        start_time: start.to_rfc3339(),
        end_time: end.to_rfc3339(),
        summary: format!("{} - {}", meeting.subject, meeting.name),
        description: Some(format!(
            "Name: {}\nEmail: {}\nPhone: {}\nWebsite: {}\nSubject: {}\nRequested: {} at {} ({})\nDuration: {} minutes",
            meeting.name,
            meeting.email,
            meeting.phone,
            meeting.website,
            meeting.subject,
            meeting.date,
            meeting.time,
            meeting.time_zone,
            meeting.duration_minutes(),
        )),
        attendees: Vec::new(),
    };

    match calendar.create_event(calendar_id, event).await {
        Ok(created) => match (created.event_id, created.meet_link) {
            (Some(event_id), Some(meet_link)) => Some((event_id, meet_link)),
            _ => {
                warn!(
                    "Calendar event for meeting {} came back without a usable link",
                    meeting.id
                );
                None
            }
        },
        Err(e) => {
            warn!("Calendar API error for meeting {}: {}", meeting.id, e);
            None
        }
    }
}

/// Best-effort patch of the stored record, keyed by identity. There is no
/// transaction spanning the original write and this update; a failure here
/// leaves the calendar event orphaned, so log enough to reconcile by hand.
async fn patch_record(ctx: &BookingContext, meeting: &Meeting, event_id: &str, meet_link: &str) {
    match ctx
        .repo
        .set_conference_link(&meeting.id, meet_link, event_id)
        .await
    {
        Ok(true) => {
            info!("Meeting {} patched with calendar event {}", meeting.id, event_id);
        }
        Ok(false) => {
            error!(
                "Meeting {} no longer exists; calendar event {} is orphaned",
                meeting.id, event_id
            );
        }
        Err(e) => {
            error!(
                "Failed to patch meeting {} with calendar event {}: {}",
                meeting.id, event_id, e
            );
        }
    }
}

/// Step 3: the two confirmation emails. Each send runs in its own task and
/// logs its own failure, so neither blocks, retries, nor affects the other.
async fn send_confirmations(ctx: &BookingContext, meeting: &Meeting, link: &str) {
    let Some(notifier) = ctx.notifier.clone() else {
        return;
    };

    let mut handles = Vec::new();

    if let Some(operator_email) = ctx.operator_email.clone() {
        let admin_html = format!(
            r#"<h3>New Meeting Scheduled</h3>
<p><strong>Name:</strong> {}</p>
<p><strong>Email:</strong> {}</p>
<p><strong>Phone:</strong> {}</p>
<p><strong>Subject:</strong> {}</p>
<p><strong>Date &amp; Time:</strong> {} at {} ({})</p>
<p><strong>Duration:</strong> {}</p>
<p><strong>Website:</strong> {}</p>
<p><strong>Meeting Link:</strong> {}</p>"#,
            meeting.name,
            meeting.email,
            meeting.phone,
            meeting.subject,
            meeting.date,
            meeting.time,
            meeting.time_zone,
            meeting.duration,
            meeting.website,
            link,
        );
        let admin_message = EmailMessage::new(
            operator_email,
            format!("New Meeting Request from {}", meeting.name),
            admin_html,
        );
        let admin_notifier = notifier.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = admin_notifier.send_email(admin_message).await {
                error!("Email send failed: {}", e);
            }
        }));
    }

    let user_html = format!(
        r#"<h3>Meeting Confirmation</h3>
<p>Dear {},</p>
<p>Thank you for scheduling a meeting with Shield Support.</p>
<p><strong>Your Meeting Details:</strong></p>
<ul>
    <li><strong>Subject:</strong> {}</li>
    <li><strong>Date:</strong> {}</li>
    <li><strong>Time:</strong> {} ({})</li>
    <li><strong>Duration:</strong> {}</li>
    <li><strong>Phone Provided:</strong> {}</li>
    <li><strong>Meeting Link:</strong> {}</li>
</ul>
<p>We look forward to speaking with you.</p>
<p>Best regards,<br>Shield Support Team</p>"#,
        meeting.name,
        meeting.subject,
        meeting.date,
        meeting.time,
        meeting.time_zone,
        meeting.duration,
        meeting.phone,
        link,
    );
    let user_message = EmailMessage::new(
        meeting.email.clone(),
        format!("Meeting Confirmation: {}", meeting.subject),
        user_html,
    );
    handles.push(tokio::spawn(async move {
        if let Err(e) = notifier.send_email(user_message).await {
            error!("Email send failed: {}", e);
        }
    }));

    // Both tasks are already running independently; awaiting the handles
    // only keeps the continuation alive until they finish.
    for handle in handles {
        let _ = handle.await;
    }
}
