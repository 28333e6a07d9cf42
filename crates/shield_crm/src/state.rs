// --- File: crates/shield_crm/src/state.rs ---
use axum::extract::FromRef;
use shield_auth::AuthTokens;
use shield_common::services::{BoxedError, NotificationService};
use shield_config::AppConfig;
use shield_db::{SqlMessageRepository, SqlSubscriberRepository, SqlTicketRepository};
use std::sync::Arc;

// Define shared state needed by CRM handlers
#[derive(Clone)]
pub struct CrmState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<AuthTokens>,
    pub messages: SqlMessageRepository,
    pub subscribers: SqlSubscriberRepository,
    pub tickets: SqlTicketRepository,
    /// Absent when the mailer collaborator is disabled; contact
    /// acknowledgements are simply skipped.
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl FromRef<CrmState> for Arc<AuthTokens> {
    fn from_ref(state: &CrmState) -> Self {
        state.tokens.clone()
    }
}
