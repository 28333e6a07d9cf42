//! User account model and SQL repository

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};
use uuid::Uuid;

/// A user account. The password hash never leaves the server: it is skipped
/// on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: String) -> Self {
        let now = super::now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            role,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Aggregate counts for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: i64,
    pub admin_count: i64,
    pub user_count: i64,
    /// Accounts created within the last seven days.
    pub recent_users: i64,
}

/// SQL repository for user accounts
#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db_client: DbClient,
}

fn row_to_user(row: &AnyRow) -> User {
    User {
        id: row.try_get("id").unwrap_or_default(),
        name: row.try_get("name").unwrap_or_default(),
        email: row.try_get("email").unwrap_or_default(),
        password_hash: row.try_get("password_hash").unwrap_or_default(),
        role: row.try_get("role").unwrap_or_default(),
        is_active: row.try_get::<i64, _>("is_active").unwrap_or(1) != 0,
        created_at: row.try_get("created_at").unwrap_or_default(),
        updated_at: row.try_get("updated_at").unwrap_or_default(),
    }
}

impl SqlUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing users schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, user: User) -> Result<User, DbError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password_hash, role, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(if user.is_active { 1i64 } else { 0i64 })
        .bind(&user.created_at)
        .bind(&user.updated_at)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert user: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_user))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_user))
    }

    pub async fn find_all(&self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    /// Overwrite the mutable profile fields. Returns the updated record, or
    /// None when the id is unknown.
    pub async fn update(&self, user: &User) -> Result<Option<User>, DbError> {
        let result = sqlx::query(
            "UPDATE users SET name = $1, email = $2, role = $3, is_active = $4, updated_at = $5 \
             WHERE id = $6",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.role)
        .bind(if user.is_active { 1i64 } else { 0i64 })
        .bind(super::now_rfc3339())
        .bind(&user.id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(&user.id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Aggregate counts for the admin dashboard. `recent_cutoff` is an
    /// RFC 3339 instant; accounts created after it count as recent.
    pub async fn stats(&self, recent_cutoff: &str) -> Result<UserStats, DbError> {
        let count = |query: &'static str, bind: Option<String>| {
            let pool = self.db_client.pool().clone();
            async move {
                let mut q = sqlx::query(query);
                if let Some(value) = bind {
                    q = q.bind(value);
                }
                let row = q
                    .fetch_one(&pool)
                    .await
                    .map_err(|e| DbError::QueryError(e.to_string()))?;
                Ok::<i64, DbError>(row.try_get::<i64, _>("total").unwrap_or(0))
            }
        };

        let total_users = count("SELECT COUNT(*) AS total FROM users", None).await?;
        let admin_count = count(
            "SELECT COUNT(*) AS total FROM users WHERE role = $1",
            Some("admin".to_string()),
        )
        .await?;
        let user_count = count(
            "SELECT COUNT(*) AS total FROM users WHERE role = $1",
            Some("user".to_string()),
        )
        .await?;
        let recent_users = count(
            "SELECT COUNT(*) AS total FROM users WHERE created_at >= $1",
            Some(recent_cutoff.to_string()),
        )
        .await?;

        Ok(UserStats {
            total_users,
            admin_count,
            user_count,
            recent_users,
        })
    }
}
