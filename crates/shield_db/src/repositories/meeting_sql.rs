//! SQL implementation of the meeting repository

use crate::error::DbError;
use crate::repositories::meeting::{Meeting, MeetingRepository};
use crate::DbClient;
use shield_common::services::BoxFuture;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};

/// SQL implementation of the meeting repository
#[derive(Debug, Clone)]
pub struct SqlMeetingRepository {
    db_client: DbClient,
}

impl SqlMeetingRepository {
    /// Create a new SQL meeting repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_meeting(row: &AnyRow) -> Meeting {
    Meeting {
        id: row.try_get("id").unwrap_or_default(),
        name: row.try_get("name").unwrap_or_default(),
        email: row.try_get("email").unwrap_or_default(),
        phone: row.try_get("phone").unwrap_or_default(),
        website: row.try_get("website").unwrap_or_default(),
        subject: row.try_get("subject").unwrap_or_default(),
        date: row.try_get("date").unwrap_or_default(),
        time: row.try_get("time").unwrap_or_default(),
        iso_date: row.try_get("iso_date").unwrap_or_default(),
        duration: row.try_get("duration").unwrap_or_default(),
        time_zone: row.try_get("time_zone").unwrap_or_default(),
        admin_update: row.try_get::<Option<String>, _>("admin_update").ok().flatten(),
        meet_link: row.try_get::<Option<String>, _>("meet_link").ok().flatten(),
        calendar_event_id: row
            .try_get::<Option<String>, _>("calendar_event_id")
            .ok()
            .flatten(),
        created_at: row.try_get("created_at").unwrap_or_default(),
    }
}

impl MeetingRepository for SqlMeetingRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Initializing meetings schema");
            let query = r#"
                CREATE TABLE IF NOT EXISTS meetings (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL DEFAULT '',
                    website TEXT NOT NULL DEFAULT '',
                    subject TEXT NOT NULL,
                    date TEXT NOT NULL DEFAULT '',
                    time TEXT NOT NULL DEFAULT '',
                    iso_date TEXT NOT NULL DEFAULT '',
                    duration TEXT NOT NULL DEFAULT '',
                    time_zone TEXT NOT NULL DEFAULT '',
                    admin_update TEXT,
                    meet_link TEXT,
                    calendar_event_id TEXT,
                    created_at TEXT NOT NULL
                )
            "#;
            self.db_client.execute(query).await?;
            Ok(())
        })
    }

    fn create(&self, meeting: Meeting) -> BoxFuture<'_, Meeting, DbError> {
        Box::pin(async move {
            debug!("Creating meeting request for {}", meeting.email);
            let query = r#"
                INSERT INTO meetings (
                    id, name, email, phone, website, subject, date, time,
                    iso_date, duration, time_zone, admin_update, meet_link,
                    calendar_event_id, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#;

            sqlx::query(query)
                .bind(&meeting.id)
                .bind(&meeting.name)
                .bind(&meeting.email)
                .bind(&meeting.phone)
                .bind(&meeting.website)
                .bind(&meeting.subject)
                .bind(&meeting.date)
                .bind(&meeting.time)
                .bind(&meeting.iso_date)
                .bind(&meeting.duration)
                .bind(&meeting.time_zone)
                .bind(&meeting.admin_update)
                .bind(&meeting.meet_link)
                .bind(&meeting.calendar_event_id)
                .bind(&meeting.created_at)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert meeting: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(meeting)
        })
    }

    fn find_all(&self) -> BoxFuture<'_, Vec<Meeting>, DbError> {
        Box::pin(async move {
            let rows = sqlx::query("SELECT * FROM meetings ORDER BY created_at DESC")
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

            Ok(rows.iter().map(row_to_meeting).collect())
        })
    }

    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        let id = id.to_string();
        Box::pin(async move {
            let row = sqlx::query("SELECT * FROM meetings WHERE id = $1")
                .bind(&id)
                .fetch_optional(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

            Ok(row.as_ref().map(row_to_meeting))
        })
    }

    fn update_admin_note(&self, id: &str, note: &str) -> BoxFuture<'_, Option<Meeting>, DbError> {
        let id = id.to_string();
        let note = note.to_string();
        Box::pin(async move {
            let result = sqlx::query("UPDATE meetings SET admin_update = $1 WHERE id = $2")
                .bind(&note)
                .bind(&id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

            if result.rows_affected() == 0 {
                return Ok(None);
            }
            self.find_by_id(&id).await
        })
    }

    fn set_conference_link(
        &self,
        id: &str,
        meet_link: &str,
        event_id: &str,
    ) -> BoxFuture<'_, bool, DbError> {
        let id = id.to_string();
        let meet_link = meet_link.to_string();
        let event_id = event_id.to_string();
        Box::pin(async move {
            debug!("Patching conference link for meeting {}", id);
            let result = sqlx::query(
                "UPDATE meetings SET meet_link = $1, calendar_event_id = $2 WHERE id = $3",
            )
            .bind(&meet_link)
            .bind(&event_id)
            .bind(&id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!(
                    "Failed to patch meeting {} with calendar event {}: {}",
                    id, event_id, e
                );
                DbError::QueryError(e.to_string())
            })?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, bool, DbError> {
        let id = id.to_string();
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM meetings WHERE id = $1")
                .bind(&id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

            Ok(result.rows_affected() > 0)
        })
    }
}
