//! Payment ledger model and SQL repository
//!
//! The ledger is mock-only: entries are written by the simulated processing
//! handler, never by a real gateway.

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

/// A ledger entry for a (simulated) payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub plan: String,
    pub status: String,
    pub transaction_id: String,
    pub created_at: String,
}

impl Payment {
    pub fn new(user_id: String, amount: i64, plan: String, status: String, transaction_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            amount,
            plan,
            status,
            transaction_id,
            created_at: super::now_rfc3339(),
        }
    }
}

/// A payment joined with its owner's name and email, for the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWithUser {
    #[serde(flatten)]
    pub payment: Payment,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// SQL repository for the payment ledger
#[derive(Debug, Clone)]
pub struct SqlPaymentRepository {
    db_client: DbClient,
}

fn row_to_payment(row: &AnyRow) -> Payment {
    Payment {
        id: row.try_get("id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        amount: row.try_get("amount").unwrap_or_default(),
        plan: row.try_get("plan").unwrap_or_default(),
        status: row.try_get("status").unwrap_or_default(),
        transaction_id: row.try_get("transaction_id").unwrap_or_default(),
        created_at: row.try_get("created_at").unwrap_or_default(),
    }
}

impl SqlPaymentRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing payments schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS payments (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                amount INTEGER NOT NULL,
                plan TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Pending',
                transaction_id TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, payment: Payment) -> Result<Payment, DbError> {
        sqlx::query(
            "INSERT INTO payments (id, user_id, amount, plan, status, transaction_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&payment.id)
        .bind(&payment.user_id)
        .bind(payment.amount)
        .bind(&payment.plan)
        .bind(&payment.status)
        .bind(&payment.transaction_id)
        .bind(&payment.created_at)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(payment)
    }

    /// Ledger entries belonging to one user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Payment>, DbError> {
        let rows =
            sqlx::query("SELECT * FROM payments WHERE user_id = $1 ORDER BY created_at DESC")
                .bind(user_id)
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows.iter().map(row_to_payment).collect())
    }

    /// All ledger entries joined with owner name/email, newest first.
    pub async fn find_all_with_users(&self) -> Result<Vec<PaymentWithUser>, DbError> {
        let query = r#"
            SELECT p.*, u.name AS user_name, u.email AS user_email
            FROM payments p
            LEFT JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
        "#;
        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| PaymentWithUser {
                payment: row_to_payment(row),
                user_name: row.try_get::<Option<String>, _>("user_name").ok().flatten(),
                user_email: row.try_get::<Option<String>, _>("user_email").ok().flatten(),
            })
            .collect())
    }
}
