// --- File: crates/services/shield_backend/src/app_state.rs ---
use shield_auth::AuthTokens;
use shield_common::services::ServiceFactory;
use shield_config::AppConfig;
use shield_db::{
    DbClient, MeetingRepository, SqlBlogRepository, SqlCareerRepository, SqlMeetingRepository,
    SqlMessageRepository, SqlPaymentRepository, SqlSubscriberRepository, SqlTicketRepository,
    SqlUserRepository,
};
use std::error::Error;
use std::sync::Arc;
use tracing::info;

use crate::service_factory::ShieldServiceFactory;

/// Application state assembled once at startup and shared by every router.
///
/// Configuration is loaded once and passed by reference; collaborators are
/// resolved through the service factory so routes stay decoupled from the
/// concrete integrations.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub service_factory: Arc<dyn ServiceFactory>,
    pub tokens: Arc<AuthTokens>,
    pub db: DbClient,
}

impl AppState {
    /// Create a new AppState: connect the database, create missing tables,
    /// load the token secret and initialize the collaborator services.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let db = DbClient::new(&config).await?;
        init_schemas(&db).await?;

        let tokens = Arc::new(AuthTokens::from_env(&config)?);
        let service_factory = Arc::new(ShieldServiceFactory::new(config.clone()).await);

        Ok(Self {
            config,
            service_factory,
            tokens,
            db,
        })
    }
}

/// Create every collection's backing table if it does not exist yet.
async fn init_schemas(db: &DbClient) -> Result<(), shield_db::DbError> {
    SqlUserRepository::new(db.clone()).init_schema().await?;
    SqlBlogRepository::new(db.clone()).init_schema().await?;
    SqlCareerRepository::new(db.clone()).init_schema().await?;
    SqlMessageRepository::new(db.clone()).init_schema().await?;
    SqlSubscriberRepository::new(db.clone()).init_schema().await?;
    SqlTicketRepository::new(db.clone()).init_schema().await?;
    SqlPaymentRepository::new(db.clone()).init_schema().await?;
    SqlMeetingRepository::new(db.clone()).init_schema().await?;

    info!("Database schema ready");
    Ok(())
}
