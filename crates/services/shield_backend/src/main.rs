// File: services/shield_backend/src/main.rs
use axum::{routing::get, Router};
use shield_config::load_config;
use shield_db::{
    SqlBlogRepository, SqlCareerRepository, SqlMeetingRepository, SqlMessageRepository,
    SqlPaymentRepository, SqlSubscriberRepository, SqlTicketRepository, SqlUserRepository,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::info;

mod app_state;
mod service_factory;

use app_state::AppState;
use shield_common::services::ServiceFactory;
use shield_db::MeetingRepository;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    shield_common::logging::init();

    let state = AppState::new(config.clone())
        .await
        .expect("Failed to initialize application state");

    let calendar = state.service_factory.calendar_service();
    let notifier = state.service_factory.notification_service();

    let meeting_repo: Arc<dyn MeetingRepository> =
        Arc::new(SqlMeetingRepository::new(state.db.clone()));

    let auth_router = shield_auth::routes(
        config.clone(),
        state.tokens.clone(),
        SqlUserRepository::new(state.db.clone()),
    );
    let content_router = shield_content::routes(
        config.clone(),
        state.tokens.clone(),
        SqlBlogRepository::new(state.db.clone()),
        SqlCareerRepository::new(state.db.clone()),
        notifier.clone(),
    );
    let crm_router = shield_crm::routes(
        config.clone(),
        state.tokens.clone(),
        SqlMessageRepository::new(state.db.clone()),
        SqlSubscriberRepository::new(state.db.clone()),
        SqlTicketRepository::new(state.db.clone()),
        notifier.clone(),
    );
    let payments_router = shield_payments::routes(
        config.clone(),
        state.tokens.clone(),
        SqlPaymentRepository::new(state.db.clone()),
    );
    let meetings_router = shield_meetings::routes(
        config.clone(),
        state.tokens.clone(),
        meeting_repo,
        calendar,
        notifier,
    );

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Shield Support API!" }))
        .merge(auth_router)
        .merge(content_router)
        .merge(crm_router)
        .merge(payments_router)
        .merge(meetings_router);

    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use shield_content::doc::ContentApiDoc;
        use shield_meetings::doc::MeetingsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Shield Support API",
                version = "0.1.0",
                description = "Shield Support backend API docs",
            ),
            components(),
            tags((name = "Shield Support", description = "Core service endpoints")),
            servers((url = "/api", description = "Main API prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(MeetingsApiDoc::openapi());
        openapi_doc.merge(ContentApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Serve the static marketing site in dev mode
    if cfg!(debug_assertions) {
        info!("Running in development mode, serving static files from ./frontend");
        app = app.fallback_service(ServeDir::new("frontend"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
