//! Support ticket model and SQL repository

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

/// A support ticket raised by an authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    pub message: String,
    pub priority: String,
    pub status: String,
    pub created_at: String,
}

impl Ticket {
    pub fn new(user_id: String, subject: String, message: String, priority: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            subject,
            message,
            priority,
            status: "Open".to_string(),
            created_at: super::now_rfc3339(),
        }
    }
}

/// A ticket joined with its owner's name and email, for the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketWithUser {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// SQL repository for support tickets
#[derive(Debug, Clone)]
pub struct SqlTicketRepository {
    db_client: DbClient,
}

fn row_to_ticket(row: &AnyRow) -> Ticket {
    Ticket {
        id: row.try_get("id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        subject: row.try_get("subject").unwrap_or_default(),
        message: row.try_get("message").unwrap_or_default(),
        priority: row.try_get("priority").unwrap_or_default(),
        status: row.try_get("status").unwrap_or_default(),
        created_at: row.try_get("created_at").unwrap_or_default(),
    }
}

impl SqlTicketRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing tickets schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                subject TEXT NOT NULL,
                message TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'Medium',
                status TEXT NOT NULL DEFAULT 'Open',
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, ticket: Ticket) -> Result<Ticket, DbError> {
        sqlx::query(
            "INSERT INTO tickets (id, user_id, subject, message, priority, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&ticket.id)
        .bind(&ticket.user_id)
        .bind(&ticket.subject)
        .bind(&ticket.message)
        .bind(&ticket.priority)
        .bind(&ticket.status)
        .bind(&ticket.created_at)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(ticket)
    }

    /// Tickets belonging to one user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Ticket>, DbError> {
        let rows =
            sqlx::query("SELECT * FROM tickets WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows.iter().map(row_to_ticket).collect())
    }

    /// All tickets joined with owner name/email, newest first.
    pub async fn find_all_with_users(&self) -> Result<Vec<TicketWithUser>, DbError> {
        let query = r#"
            SELECT t.*, u.name AS user_name, u.email AS user_email
            FROM tickets t
            LEFT JOIN users u ON u.id = t.user_id
            ORDER BY t.created_at DESC
        "#;
        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| TicketWithUser {
                ticket: row_to_ticket(row),
                user_name: row.try_get::<Option<String>, _>("user_name").ok().flatten(),
                user_email: row.try_get::<Option<String>, _>("user_email").ok().flatten(),
            })
            .collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Ticket>, DbError> {
        let row = sqlx::query("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_ticket))
    }

    /// Set the ticket status, returning the updated record when it exists.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Option<Ticket>, DbError> {
        let result = sqlx::query("UPDATE tickets SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}
