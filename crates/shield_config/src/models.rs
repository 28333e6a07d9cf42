// --- File: crates/shield_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. DATABASE_URL loaded via SHIELD_DATABASE__URL or DATABASE_URL
}

// --- Google Calendar Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GcalConfig {
    /// Path to the service account key file.
    pub key_path: Option<String>,
    /// Calendar to act as, usually the operator's address.
    pub calendar_id: Option<String>,
    pub time_zone: Option<String>,
}

// --- Mailer Config ---
// Holds non-secret mail settings. The service account key referenced by
// `key_path` is the only credential; there is no SMTP password.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailerConfig {
    /// Path to the service account key file used for sending.
    pub key_path: Option<String>,
    /// Mailbox the service account impersonates; also the operator inbox
    /// that receives admin notifications.
    pub operator_email: String,
    /// Display name used in the From header.
    pub sender_name: Option<String>,
}

// --- Auth Config ---
// The JWT signing secret is loaded directly from the JWT_SECRET env var.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// Token lifetime in hours. Defaults to one day.
    pub token_ttl_hours: Option<i64>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_gcal: bool,
    #[serde(default)]
    pub use_mailer: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub mailer: Option<MailerConfig>,
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}
