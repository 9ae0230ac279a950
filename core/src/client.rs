//! Stateless HTTP request builder and response parser for the API.
//!
//! # Design
//! `MailerClient` holds only the base URL and the API key and carries no
//! mutable state between calls. Every operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`. The caller executes the HTTP round-trip, keeping this
//! layer deterministic and free of I/O.
//!
//! Every `build_*` method takes the acting user's `user_key` first and an
//! optional `client_id` last. Operations are grouped per resource in the
//! submodules of this file.

mod campaign;
mod list;
mod mailing;
mod suppression;

use crate::config::ClientConfig;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::FormParams;

/// Header carrying the account-wide API key.
pub const API_KEY_HEADER: &str = "apikey";

/// Synchronous, stateless client for the API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct MailerClient {
    base_url: String,
    api_key: String,
}

impl MailerClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST to `path` (e.g. `/Campaign/Create/`) with the API key header.
    pub(crate) fn post(&self, path: &str, params: FormParams) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.base_url),
            headers: vec![(API_KEY_HEADER.to_string(), self.api_key.clone())],
            params: params.into_pairs(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = MailerClient::new("http://localhost:3000/", "k");
        assert_eq!(client.base_url(), "http://localhost:3000");
        let req = client.post("/Campaign/Create/", FormParams::with_user_key("u"));
        assert_eq!(req.path, "http://localhost:3000/Campaign/Create/");
    }

    #[test]
    fn from_config_uses_key_and_url() {
        let config = ClientConfig::new("abc").with_base_url("http://api.test/");
        let client = MailerClient::from_config(&config);
        let req = client.post("/List/Get/", FormParams::default());
        assert_eq!(req.path, "http://api.test/List/Get/");
        assert_eq!(req.header(API_KEY_HEADER), Some("abc"));
    }

    #[test]
    fn support_helpers_wrap_envelopes() {
        assert_eq!(success("true").body, r#"{"status":"success","data":true}"#);
        assert_eq!(failure("nope").body, r#"{"status":"failed","data":"nope"}"#);
        let req = client().post("/X/", FormParams::with_user_key("u"));
        assert_eq!(params(&req), vec![("user_key", "u")]);
    }
}
