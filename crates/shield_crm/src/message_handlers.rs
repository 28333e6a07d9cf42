// File: crates/shield_crm/src/message_handlers.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shield_common::services::{EmailMessage, NotificationService};
use shield_db::ContactMessage;
use tracing::error;

use crate::state::CrmState;

#[derive(Deserialize, Debug)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Handler for the public contact form. The acknowledgement emails are
/// fire-and-forget: a failed send is logged and never fails the request.
#[axum::debug_handler]
pub async fn create_message_handler(
    State(state): State<CrmState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), (StatusCode, String)> {
    if payload.name.is_empty()
        || payload.email.is_empty()
        || payload.subject.is_empty()
        || payload.message.is_empty()
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter all fields".to_string(),
        ));
    }

    let saved = state
        .messages
        .create(ContactMessage::new(
            payload.name.clone(),
            payload.email.clone(),
            payload.subject.clone(),
            payload.message.clone(),
        ))
        .await
        .map_err(|e| {
            error!("Failed to store contact message: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
        })?;

    if let Some(notifier) = state.notifier.clone() {
        if let Some(mailer_config) = state.config.mailer.as_ref() {
            let admin_html = format!(
                r#"<h3>New Contact Message</h3>
<p><strong>Name:</strong> {}</p>
<p><strong>Email:</strong> {}</p>
<p><strong>Subject:</strong> {}</p>
<p><strong>Message:</strong></p>
<p>{}</p>"#,
                payload.name, payload.email, payload.subject, payload.message
            );
            let admin_message = EmailMessage::new(
                mailer_config.operator_email.clone(),
                format!("New Message from {}: {}", payload.name, payload.subject),
                admin_html,
            );

            let user_html = format!(
                r#"<h3>Thank you for contacting Shield Support!</h3>
<p>Dear {},</p>
<p>We have received your message regarding "<strong>{}</strong>". Our team will get back to you shortly.</p>
<br>
<p>Best Regards,</p>
<p>Shield Support Team</p>"#,
                payload.name, payload.subject
            );
            let user_message = EmailMessage::new(
                payload.email.clone(),
                "Message Received - Shield Support",
                user_html,
            );

            let admin_notifier = notifier.clone();
            tokio::spawn(async move {
                if let Err(e) = admin_notifier.send_email(admin_message).await {
                    error!("Failed to send admin email: {}", e);
                }
            });
            tokio::spawn(async move {
                if let Err(e) = notifier.send_email(user_message).await {
                    error!("Failed to send user email: {}", e);
                }
            });
        }
    }

    Ok((StatusCode::CREATED, Json(saved)))
}

/// Handler listing all contact messages.
#[axum::debug_handler]
pub async fn list_messages_handler(
    State(state): State<CrmState>,
) -> Result<Json<Vec<ContactMessage>>, (StatusCode, String)> {
    state.messages.find_all().await.map(Json).map_err(|e| {
        error!("Message listing failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })
}

/// Handler deleting a contact message.
#[axum::debug_handler]
pub async fn delete_message_handler(
    State(state): State<CrmState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.messages.delete(&id).await.map_err(|e| {
        error!("Message deletion failed: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Message not found".to_string()));
    }

    Ok(Json(json!({ "msg": "Message removed" })))
}
