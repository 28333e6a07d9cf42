// --- File: crates/shield_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Shield Support errors.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// From<SpecificError> for ShieldError.
#[derive(Error, Debug)]
pub enum ShieldError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ShieldError {
    fn status_code(&self) -> u16 {
        match self {
            ShieldError::HttpError(_) => 500,
            ShieldError::ParseError(_) => 400,
            ShieldError::ConfigError(_) => 500,
            ShieldError::AuthError(_) => 401,
            ShieldError::ValidationError(_) => 400,
            ShieldError::DatabaseError(_) => 500,
            ShieldError::ExternalServiceError { .. } => 502,
            ShieldError::ConflictError(_) => 409,
            ShieldError::NotFoundError(_) => 404,
            ShieldError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for ShieldError {
    fn from(err: reqwest::Error) -> Self {
        ShieldError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ShieldError {
    fn from(err: serde_json::Error) -> Self {
        ShieldError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ShieldError {
    fn from(err: std::io::Error) -> Self {
        ShieldError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> ShieldError {
    ShieldError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> ShieldError {
    ShieldError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ShieldError {
    ShieldError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ShieldError {
    ShieldError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> ShieldError {
    ShieldError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(validation_error("missing field").status_code(), 400);
        assert_eq!(not_found("meeting").status_code(), 404);
        assert_eq!(conflict("email already subscribed").status_code(), 409);
        assert_eq!(
            external_service_error("gcal", "insert failed").status_code(),
            502
        );
        assert_eq!(internal_error("boom").status_code(), 500);
    }
}
