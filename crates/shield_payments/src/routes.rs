// --- File: crates/shield_payments/src/routes.rs ---

use crate::handlers::{
    create_payment_handler, list_all_payments_handler, list_payments_handler, PaymentsState,
};
use axum::{
    routing::{get, post},
    Router,
};
use shield_auth::AuthTokens;
use shield_config::AppConfig;
use shield_db::SqlPaymentRepository;
use std::sync::Arc;

/// Creates a router containing the payment ledger routes.
pub fn routes(
    config: Arc<AppConfig>,
    tokens: Arc<AuthTokens>,
    payments: SqlPaymentRepository,
) -> Router {
    let payments_state = PaymentsState {
        config,
        tokens,
        payments,
    };

    Router::new()
        .route("/payments", post(create_payment_handler))
        .route("/payments", get(list_payments_handler))
        .route("/payments/all", get(list_all_payments_handler))
        .with_state(payments_state)
}
