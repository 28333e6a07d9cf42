// --- File: crates/shield_content/src/routes.rs ---

use crate::blog_handlers::{
    create_blog_handler, delete_blog_handler, get_blog_handler, list_blogs_handler,
    update_blog_handler,
};
use crate::career_handlers::{
    apply_career_handler, create_career_handler, delete_career_handler, get_career_handler,
    list_careers_handler, update_career_handler,
};
use crate::state::ContentState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use shield_auth::AuthTokens;
use shield_common::services::{BoxedError, NotificationService};
use shield_config::AppConfig;
use shield_db::{SqlBlogRepository, SqlCareerRepository};
use std::sync::Arc;

/// Creates a router containing the blog and careers routes.
pub fn routes(
    config: Arc<AppConfig>,
    tokens: Arc<AuthTokens>,
    blogs: SqlBlogRepository,
    careers: SqlCareerRepository,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let content_state = ContentState {
        config,
        tokens,
        blogs,
        careers,
        notifier,
    };

    Router::new()
        .route("/blogs", get(list_blogs_handler))
        .route("/blogs", post(create_blog_handler))
        .route("/blogs/{id}", get(get_blog_handler))
        .route("/blogs/{id}", put(update_blog_handler))
        .route("/blogs/{id}", delete(delete_blog_handler))
        .route("/careers", get(list_careers_handler))
        .route("/careers", post(create_career_handler))
        .route("/careers/apply", post(apply_career_handler))
        .route("/careers/{id}", get(get_career_handler))
        .route("/careers/{id}", put(update_career_handler))
        .route("/careers/{id}", delete(delete_career_handler))
        .with_state(content_state)
}
