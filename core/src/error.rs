//! Error types for the API client.
//!
//! # Design
//! Failures fall into three families that callers handle differently:
//! the request never completed (`Transport`, `Cancelled`), the server
//! answered but not with a usable envelope (`HttpError`,
//! `DeserializationError`), or the API itself refused the call (`Api`).
//! Nothing here is retried; every error is surfaced as-is.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `MailerClient` parse methods and by `Session` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete the round-trip (connect, timeout, I/O).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The caller's cancellation token fired before the response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The server returned a status other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The envelope status was not `"success"`. `data` is the raw payload.
    #[error("API error: {message}")]
    Api { message: String, data: Value },

    /// The response body was not valid JSON or did not have the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// True when the API itself rejected the call.
    pub fn is_api_failure(&self) -> bool {
        matches!(self, ApiError::Api { .. })
    }
}

/// Errors raised while assembling a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
