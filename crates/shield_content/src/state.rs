// --- File: crates/shield_content/src/state.rs ---
use axum::extract::FromRef;
use shield_auth::AuthTokens;
use shield_common::services::{BoxedError, NotificationService};
use shield_config::AppConfig;
use shield_db::{SqlBlogRepository, SqlCareerRepository};
use std::sync::Arc;

// Define shared state needed by content handlers
#[derive(Clone)]
pub struct ContentState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<AuthTokens>,
    pub blogs: SqlBlogRepository,
    pub careers: SqlCareerRepository,
    /// Absent when the mailer collaborator is disabled; the application
    /// flow degrades to a service-unavailable response.
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl FromRef<ContentState> for Arc<AuthTokens> {
    fn from_ref(state: &ContentState) -> Self {
        state.tokens.clone()
    }
}
