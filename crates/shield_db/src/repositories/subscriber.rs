//! Newsletter subscriber model and SQL repository

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

/// A newsletter subscriber. Emails are unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub created_at: String,
}

impl Subscriber {
    pub fn new(email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            created_at: super::now_rfc3339(),
        }
    }
}

/// SQL repository for newsletter subscribers
#[derive(Debug, Clone)]
pub struct SqlSubscriberRepository {
    db_client: DbClient,
}

fn row_to_subscriber(row: &AnyRow) -> Subscriber {
    Subscriber {
        id: row.try_get("id").unwrap_or_default(),
        email: row.try_get("email").unwrap_or_default(),
        created_at: row.try_get("created_at").unwrap_or_default(),
    }
}

impl SqlSubscriberRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing subscribers schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, subscriber: Subscriber) -> Result<Subscriber, DbError> {
        sqlx::query("INSERT INTO subscribers (id, email, created_at) VALUES ($1, $2, $3)")
            .bind(&subscriber.id)
            .bind(&subscriber.email)
            .bind(&subscriber.created_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(subscriber)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, DbError> {
        let row = sqlx::query("SELECT * FROM subscribers WHERE email = $1")
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_subscriber))
    }

    pub async fn find_all(&self) -> Result<Vec<Subscriber>, DbError> {
        let rows = sqlx::query("SELECT * FROM subscribers ORDER BY created_at DESC")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows.iter().map(row_to_subscriber).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
