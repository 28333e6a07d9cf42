//! Gmail-backed notification service.
//!
//! Sends through the Gmail REST API with a service-account token that
//! impersonates the operator mailbox. Transport failures surface as errors
//! to the caller; callers that fire-and-forget are expected to log them.

use serde::Deserialize;
use shield_common::services::{BoxFuture, EmailMessage, NotificationResult, NotificationService};
use shield_config::MailerConfig;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::message::{build_mime, encode_raw};

const GMAIL_SEND_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";
const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";

/// Mailer-specific error types.
#[derive(Error, Debug)]
pub enum MailerError {
    /// Error occurred during the API request
    #[error("Gmail API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Gmail API
    #[error("Gmail API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete mailer configuration
    #[error("Mailer configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// Token acquisition failed
    #[error("Failed to obtain access token: {0}")]
    AuthError(String),
}

#[derive(Debug, Deserialize)]
struct GmailSendResponse {
    #[serde(default)]
    id: String,
}

/// Gmail notification service implementation
pub struct GmailNotificationService {
    client: reqwest::Client,
    authenticator: DefaultAuthenticator,
    sender_email: String,
    sender_name: String,
}

impl GmailNotificationService {
    /// Create a new Gmail notification service from the mailer config.
    ///
    /// Reads the service account key and builds an authenticator that
    /// impersonates the operator mailbox.
    pub async fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let key_path = config
            .key_path
            .as_deref()
            .ok_or_else(|| MailerError::ConfigError("Missing key_path in MailerConfig".into()))?;

        let sa_key = read_service_account_key(Path::new(key_path))
            .await
            .map_err(|e| MailerError::ConfigError(format!("Failed to read key file: {}", e)))?;

        let authenticator = ServiceAccountAuthenticator::builder(sa_key)
            .subject(config.operator_email.clone())
            .build()
            .await
            .map_err(|e| MailerError::AuthError(e.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            authenticator,
            sender_email: config.operator_email.clone(),
            sender_name: config
                .sender_name
                .clone()
                .unwrap_or_else(|| "Shield Support".to_string()),
        })
    }

    async fn access_token(&self) -> Result<String, MailerError> {
        let token = self
            .authenticator
            .token(&[GMAIL_SEND_SCOPE])
            .await
            .map_err(|e| MailerError::AuthError(e.to_string()))?;
        token
            .token()
            .map(|t| t.to_string())
            .ok_or_else(|| MailerError::AuthError("Token response carried no token".into()))
    }
}

impl NotificationService for GmailNotificationService {
    type Error = MailerError;

    fn send_email(&self, message: EmailMessage) -> BoxFuture<'_, NotificationResult, Self::Error> {
        Box::pin(async move {
            let raw = encode_raw(&build_mime(&self.sender_name, &self.sender_email, &message));
            let token = self.access_token().await?;

            debug!(
                "Sending email to {} ({} attachment(s))",
                message.to.join(", "),
                message.attachments.len()
            );

            let response = self
                .client
                .post(GMAIL_SEND_URL)
                .bearer_auth(token)
                .json(&serde_json::json!({ "raw": raw }))
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(MailerError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                });
            }

            let sent: GmailSendResponse = response.json().await?;
            info!("Email sent to {}: {}", message.to.join(", "), sent.id);

            Ok(NotificationResult {
                id: sent.id,
                status: "sent".to_string(),
            })
        })
    }
}
