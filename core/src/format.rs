//! Wire formats shared by the request builder and the models.
//!
//! The API writes timestamps as `yyyy-MM-dd HH:mm:ss` and uses the all-zero
//! timestamp for "never". Both directions go through this module so the
//! format lives in one place. Numbers arrive as JSON numbers or numeric
//! strings, with `""` standing in for "no value".

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::{DeserializeAs, SerializeAs};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ZERO_DATETIME: &str = "0000-00-00 00:00:00";

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDateTime>` fields.
///
/// `null`, `""` and the zero timestamp all decode to `None`.
pub mod opt_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_datetime, DATETIME_FORMAT, ZERO_DATETIME};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&format_datetime(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") | Some(ZERO_DATETIME) => Ok(None),
            Some(text) => NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

fn number_or_empty<T, E>(value: Value) -> Result<Option<T>, E>
where
    T: FromStr,
    T::Err: Display,
    E: de::Error,
{
    let text = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(E::custom(format!("expected a number, found {other}"))),
    };
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(E::custom)
}

/// `serde_with` adapter for optional numbers: `null` and `""` decode to
/// `None`, numeric strings to their value.
pub struct OptNumber;

impl<'de, T> DeserializeAs<'de, Option<T>> for OptNumber
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize_as<D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        number_or_empty(Value::deserialize(deserializer)?)
    }
}

impl<T: Serialize> SerializeAs<Option<T>> for OptNumber {
    fn serialize_as<S>(source: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}

/// `serde_with` adapter for counters: `null` and `""` decode to zero.
pub struct Count;

impl<'de, T> DeserializeAs<'de, T> for Count
where
    T: FromStr + Default,
    T::Err: Display,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        number_or_empty(Value::deserialize(deserializer)?).map(Option::unwrap_or_default)
    }
}

impl<T: Serialize> SerializeAs<T> for Count {
    fn serialize_as<S>(source: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        source.serialize(serializer)
    }
}
