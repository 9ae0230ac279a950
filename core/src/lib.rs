//! Typed client for the email-marketing REST API (campaigns, lists,
//! mailings, suppression lists).
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Callers either execute the
//! round-trip themselves or hand it to a [`Session`], which drives an async
//! [`Transport`] and honours a `CancellationToken`.
//!
//! # Design
//! - `MailerClient` is stateless; it holds only the base URL and API key.
//! - Each operation is split into `build_*` (produces the request) and
//!   `parse_*` (consumes the response), so the I/O boundary is explicit.
//! - Requests are form-encoded POSTs with the API key in the `apikey` header
//!   and the acting user's `user_key` as the first body parameter.
//! - Responses arrive in a `{"status", "data"}` envelope; anything but
//!   `"success"` becomes [`ApiError::Api`].

pub mod client;
pub mod config;
mod envelope;
pub mod error;
pub mod format;
pub mod http;
mod params;
pub mod session;
pub mod transport;
pub mod types;

pub use client::{MailerClient, API_KEY_HEADER};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use tokio_util::sync::CancellationToken;
pub use transport::{ReqwestTransport, Transport};
pub use types::*;
