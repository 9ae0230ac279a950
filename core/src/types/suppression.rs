use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::format::opt_datetime;
use crate::params::FormParams;

api_enum! {
    /// What a suppression entry matches: a full address, a whole domain, or
    /// the part before the `@`.
    SuppressionKind {
        Email => "email",
        Domain => "domain",
        Localpart => "localpart",
    }
}

impl SuppressionKind {
    /// Form and JSON field holding one value, e.g. `email`.
    pub fn field(self) -> &'static str {
        self.as_str()
    }

    /// Key wrapping exported arrays, e.g. `emails`.
    pub fn plural(self) -> &'static str {
        match self {
            SuppressionKind::Email => "emails",
            SuppressionKind::Domain => "domains",
            SuppressionKind::Localpart => "localparts",
        }
    }

    /// Operation-name suffix, e.g. `ImportEmails`.
    pub(crate) fn segment(self) -> &'static str {
        match self {
            SuppressionKind::Email => "Emails",
            SuppressionKind::Domain => "Domains",
            SuppressionKind::Localpart => "Localparts",
        }
    }
}

/// One suppressed email, domain or localpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionEntry {
    pub kind: SuppressionKind,
    pub value: String,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default, with = "opt_datetime")]
    pub timestamp: Option<NaiveDateTime>,
}

impl SuppressionEntry {
    /// Build an entry from one element of an import/export array. Elements
    /// are either bare strings or objects keyed by `kind.field()`.
    pub(crate) fn from_value(kind: SuppressionKind, value: Value) -> Result<Self, ApiError> {
        match value {
            Value::String(text) => Ok(Self {
                kind,
                value: text,
                source_type: None,
                timestamp: None,
            }),
            Value::Object(map) => {
                let raw: RawEntry = serde_json::from_value(Value::Object(map))
                    .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
                let value = match raw.rest.get(kind.field()) {
                    Some(Value::String(text)) => text.clone(),
                    _ => {
                        return Err(ApiError::DeserializationError(format!(
                            "suppression entry without `{}`",
                            kind.field()
                        )))
                    }
                };
                Ok(Self {
                    kind,
                    value,
                    source_type: raw.source_type,
                    timestamp: raw.timestamp,
                })
            }
            other => Err(ApiError::DeserializationError(format!(
                "unexpected suppression entry {other}"
            ))),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    source_type: Option<String>,
    #[serde(default, with = "opt_datetime")]
    timestamp: Option<NaiveDateTime>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

/// Filters for the `Export*` operations. `source_type` only applies to emails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionQuery {
    pub source_type: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl SuppressionQuery {
    pub(crate) fn apply(&self, params: FormParams, paging: bool) -> FormParams {
        let params = params.push_opt("source_type", self.source_type.as_deref());
        if paging {
            params
                .push_opt("offset", self.offset)
                .push_opt("limit", self.limit)
        } else {
            params
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn entry_from_object() {
        let entry = SuppressionEntry::from_value(
            SuppressionKind::Domain,
            json!({"domain": "spam.example", "source_type": "manual", "timestamp": "2024-06-01 12:00:00"}),
        )
        .unwrap();
        assert_eq!(entry.value, "spam.example");
        assert_eq!(entry.source_type.as_deref(), Some("manual"));
        assert!(entry.timestamp.is_some());
    }

    #[test]
    fn entry_from_bare_string() {
        let entry =
            SuppressionEntry::from_value(SuppressionKind::Localpart, json!("postmaster")).unwrap();
        assert_eq!(entry.kind, SuppressionKind::Localpart);
        assert_eq!(entry.value, "postmaster");
    }

    #[test]
    fn entry_missing_field_is_error() {
        let err = SuppressionEntry::from_value(SuppressionKind::Email, json!({"domain": "x"}))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn kind_names() {
        assert_eq!(SuppressionKind::Localpart.field(), "localpart");
        assert_eq!(SuppressionKind::Localpart.plural(), "localparts");
        assert_eq!(SuppressionKind::Email.segment(), "Emails");
    }
}
