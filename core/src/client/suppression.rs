//! `/SuppressionList/*` operations.
//!
//! The three suppression kinds share one request shape, so each operation is
//! written once and parameterized by [`SuppressionKind`]: `ImportEmails`
//! sends `email[0]`, `ImportDomains` sends `domain[0]`, and so on.

use serde_json::Value;

use crate::envelope::{decode_bool, decode_count, decode_data};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::FormParams;
use crate::types::{SuppressionEntry, SuppressionKind, SuppressionQuery};

use super::MailerClient;

fn path(action: &str, kind: SuppressionKind) -> String {
    format!("/SuppressionList/{action}{}/", kind.segment())
}

/// Accepts a bare array or an object wrapping the array under the plural key.
fn decode_entries(
    response: &HttpResponse,
    kind: SuppressionKind,
) -> Result<Vec<SuppressionEntry>, ApiError> {
    let items = match decode_data(response)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(kind.plural()) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(ApiError::DeserializationError(format!(
                    "expected an array under `{}`, found {other}",
                    kind.plural()
                )))
            }
        },
        Value::Null => Vec::new(),
        other => {
            return Err(ApiError::DeserializationError(format!(
                "expected suppression entries, found {other}"
            )))
        }
    };
    items
        .into_iter()
        .map(|item| SuppressionEntry::from_value(kind, item))
        .collect()
}

impl MailerClient {
    pub fn build_import_suppressed<S: AsRef<str>>(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        values: &[S],
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push_indexed(kind.field(), values)
            .client_id(client_id);
        self.post(&path("Import", kind), params)
    }

    /// Entries the API accepted, in the order it reports them.
    pub fn parse_import_suppressed(
        &self,
        kind: SuppressionKind,
        response: HttpResponse,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        decode_entries(&response, kind)
    }

    /// `query.source_type` is only sent for emails.
    pub fn build_export_suppressed(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        query: &SuppressionQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = export_params(user_key, kind, query, true).client_id(client_id);
        self.post(&path("Export", kind), params)
    }

    pub fn parse_export_suppressed(
        &self,
        kind: SuppressionKind,
        response: HttpResponse,
    ) -> Result<Vec<SuppressionEntry>, ApiError> {
        decode_entries(&response, kind)
    }

    pub fn build_count_suppressed(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        query: &SuppressionQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = export_params(user_key, kind, query, false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post(&path("Export", kind), params)
    }

    pub fn parse_count_suppressed(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    pub fn build_delete_suppressed<S: AsRef<str>>(
        &self,
        user_key: &str,
        kind: SuppressionKind,
        values: &[S],
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push_indexed(kind.field(), values)
            .client_id(client_id);
        self.post(&path("Delete", kind), params)
    }

    pub fn parse_delete_suppressed(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }
}

fn export_params(
    user_key: &str,
    kind: SuppressionKind,
    query: &SuppressionQuery,
    paging: bool,
) -> FormParams {
    let params = FormParams::with_user_key(user_key);
    if kind == SuppressionKind::Email {
        query.apply(params, paging)
    } else {
        let query = SuppressionQuery {
            source_type: None,
            ..query.clone()
        };
        query.apply(params, paging)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::*;
    use crate::error::ApiError;
    use crate::types::{SuppressionKind, SuppressionQuery};

    #[test]
    fn import_emails() {
        let req = client().build_import_suppressed(
            "u",
            SuppressionKind::Email,
            &["a@acme.test", "b@acme.test"],
            None,
        );
        assert_post(&req, "/SuppressionList/ImportEmails/");
        assert_eq!(
            params(&req),
            vec![("user_key", "u"), ("email[0]", "a@acme.test"), ("email[1]", "b@acme.test")]
        );

        let entries = client()
            .parse_import_suppressed(
                SuppressionKind::Email,
                success(r#"[{"email":"a@acme.test"},{"email":"b@acme.test"}]"#),
            )
            .unwrap();
        let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["a@acme.test", "b@acme.test"]);
    }

    #[test]
    fn import_domains_with_client_id() {
        let domains = vec!["spam.test".to_string()];
        let req = client().build_import_suppressed("u", SuppressionKind::Domain, &domains, Some(77));
        assert_post(&req, "/SuppressionList/ImportDomains/");
        assert_eq!(
            params(&req),
            vec![("user_key", "u"), ("domain[0]", "spam.test"), ("client_id", "77")]
        );
    }

    #[test]
    fn import_accepts_wrapped_result() {
        let entries = client()
            .parse_import_suppressed(
                SuppressionKind::Localpart,
                success(r#"{"localparts":[{"localpart":"abuse"},{"localpart":"postmaster"}]}"#),
            )
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].value, "postmaster");
    }

    #[test]
    fn export_emails_with_source_type() {
        let query = SuppressionQuery {
            source_type: Some("manual".to_string()),
            offset: Some(0),
            limit: Some(100),
        };
        let req = client().build_export_suppressed("u", SuppressionKind::Email, &query, None);
        assert_post(&req, "/SuppressionList/ExportEmails/");
        assert_eq!(
            params(&req),
            vec![
                ("user_key", "u"),
                ("source_type", "manual"),
                ("offset", "0"),
                ("limit", "100"),
            ]
        );

        let entries = client()
            .parse_export_suppressed(
                SuppressionKind::Email,
                success(
                    r#"{"emails":[{"email":"z@acme.test","source_type":"manual","timestamp":"2024-02-02 02:02:02"},
                                  {"email":"y@acme.test","source_type":"bounce"}]}"#,
                ),
            )
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, "z@acme.test");
        assert_eq!(entries[1].source_type.as_deref(), Some("bounce"));
    }

    #[test]
    fn export_domains_drops_source_type() {
        let query = SuppressionQuery {
            source_type: Some("manual".to_string()),
            ..SuppressionQuery::default()
        };
        let req = client().build_export_suppressed("u", SuppressionKind::Domain, &query, None);
        assert_post(&req, "/SuppressionList/ExportDomains/");
        assert_eq!(params(&req), vec![("user_key", "u")]);
    }

    #[test]
    fn export_null_list_is_empty() {
        let entries = client()
            .parse_export_suppressed(SuppressionKind::Domain, success(r#"{"domains":null}"#))
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn count_localparts() {
        let query = SuppressionQuery {
            limit: Some(10),
            ..SuppressionQuery::default()
        };
        let req = client().build_count_suppressed("u", SuppressionKind::Localpart, &query, None);
        assert_post(&req, "/SuppressionList/ExportLocalparts/");
        assert_eq!(params(&req), vec![("user_key", "u"), ("count", "true")]);
        assert_eq!(client().parse_count_suppressed(success(r#"{"count":"3"}"#)).unwrap(), 3);
    }

    #[test]
    fn delete_localparts() {
        let req = client().build_delete_suppressed("u", SuppressionKind::Localpart, &["abuse"], None);
        assert_post(&req, "/SuppressionList/DeleteLocalparts/");
        assert_eq!(params(&req), vec![("user_key", "u"), ("localpart[0]", "abuse")]);
        assert!(client().parse_delete_suppressed(success("true")).unwrap());
    }

    #[test]
    fn wrong_shape_is_deserialization_error() {
        let err = client()
            .parse_export_suppressed(SuppressionKind::Email, success(r#""nope""#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
