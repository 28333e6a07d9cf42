// File: crates/shield_payments/src/handlers.rs
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde::Deserialize;
use shield_auth::{AdminUser, AuthTokens, AuthUser};
use shield_config::AppConfig;
use shield_db::{Payment, PaymentWithUser, SqlPaymentRepository};
use std::sync::Arc;
use tracing::{error, info};

// Define shared state needed by payment handlers
#[derive(Clone)]
pub struct PaymentsState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<AuthTokens>,
    pub payments: SqlPaymentRepository,
}

impl FromRef<PaymentsState> for Arc<AuthTokens> {
    fn from_ref(state: &PaymentsState) -> Self {
        state.tokens.clone()
    }
}

#[derive(Deserialize, Debug)]
pub struct CreatePaymentRequest {
    pub amount: i64,
    pub plan: String,
}

/// Handler for (mock) payment processing. There is no gateway behind this:
/// the entry is written straight to the ledger as completed.
#[axum::debug_handler]
pub async fn create_payment_handler(
    State(state): State<PaymentsState>,
    caller: AuthUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<Json<Payment>, (StatusCode, String)> {
    let transaction_id = format!("TXN_{}", Utc::now().timestamp_millis());

    let payment = Payment::new(
        caller.id,
        payload.amount,
        payload.plan,
        "Completed".to_string(),
        transaction_id,
    );

    let stored = state.payments.create(payment).await.map_err(|e| {
        error!("Payment creation failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?;

    info!("Recorded payment {} for plan {}", stored.transaction_id, stored.plan);
    Ok(Json(stored))
}

/// Handler listing the caller's own ledger entries.
#[axum::debug_handler]
pub async fn list_payments_handler(
    State(state): State<PaymentsState>,
    caller: AuthUser,
) -> Result<Json<Vec<Payment>>, (StatusCode, String)> {
    state
        .payments
        .find_by_user(&caller.id)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Payment listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
        })
}

/// Handler listing all ledger entries with their owners (admin only).
#[axum::debug_handler]
pub async fn list_all_payments_handler(
    State(state): State<PaymentsState>,
    _admin: AdminUser,
) -> Result<Json<Vec<PaymentWithUser>>, (StatusCode, String)> {
    state
        .payments
        .find_all_with_users()
        .await
        .map(Json)
        .map_err(|e| {
            error!("Payment listing failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
        })
}
