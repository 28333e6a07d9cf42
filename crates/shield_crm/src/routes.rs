// --- File: crates/shield_crm/src/routes.rs ---

use crate::message_handlers::{
    create_message_handler, delete_message_handler, list_messages_handler,
};
use crate::state::CrmState;
use crate::subscriber_handlers::{
    create_subscriber_handler, delete_subscriber_handler, list_subscribers_handler,
};
use crate::ticket_handlers::{
    create_ticket_handler, list_all_tickets_handler, list_tickets_handler, update_ticket_handler,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use shield_auth::AuthTokens;
use shield_common::services::{BoxedError, NotificationService};
use shield_config::AppConfig;
use shield_db::{SqlMessageRepository, SqlSubscriberRepository, SqlTicketRepository};
use std::sync::Arc;

/// Creates a router containing the contact message, subscriber and ticket
/// routes.
pub fn routes(
    config: Arc<AppConfig>,
    tokens: Arc<AuthTokens>,
    messages: SqlMessageRepository,
    subscribers: SqlSubscriberRepository,
    tickets: SqlTicketRepository,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let crm_state = CrmState {
        config,
        tokens,
        messages,
        subscribers,
        tickets,
        notifier,
    };

    Router::new()
        .route("/messages", post(create_message_handler))
        .route("/messages", get(list_messages_handler))
        .route("/messages/{id}", delete(delete_message_handler))
        .route("/subscribers", post(create_subscriber_handler))
        .route("/subscribers", get(list_subscribers_handler))
        .route("/subscribers/{id}", delete(delete_subscriber_handler))
        .route("/tickets", post(create_ticket_handler))
        .route("/tickets", get(list_tickets_handler))
        .route("/tickets/all", get(list_all_tickets_handler))
        .route("/tickets/{id}", put(update_ticket_handler))
        .with_state(crm_state)
}
