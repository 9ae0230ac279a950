//! Form-parameter builder that applies the API's naming conventions.
//!
//! Arrays become `name[0]`, `name[1]`, maps become `name[key]`, arrays of
//! records become `name[0][key]`. Booleans are written as `"true"` /
//! `"false"` and dates as `yyyy-MM-dd HH:mm:ss`. Optional values that are
//! `None` produce no parameter at all.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::format::format_datetime;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    /// Start a parameter list with the per-call `user_key`.
    pub(crate) fn with_user_key(user_key: &str) -> Self {
        Self::default().push("user_key", user_key)
    }

    pub(crate) fn push(mut self, name: &str, value: impl Display) -> Self {
        self.pairs.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn push_opt<T: Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.push(name, value),
            None => self,
        }
    }

    pub(crate) fn push_bool(self, name: &str, value: bool) -> Self {
        self.push(name, if value { "true" } else { "false" })
    }

    pub(crate) fn push_opt_bool(self, name: &str, value: Option<bool>) -> Self {
        match value {
            Some(value) => self.push_bool(name, value),
            None => self,
        }
    }

    pub(crate) fn push_opt_datetime(self, name: &str, value: Option<NaiveDateTime>) -> Self {
        match value {
            Some(value) => self.push(name, format_datetime(&value)),
            None => self,
        }
    }

    /// `name[0]=a&name[1]=b`
    pub(crate) fn push_indexed<S: AsRef<str>>(mut self, name: &str, values: &[S]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.pairs
                .push((format!("{name}[{index}]"), value.as_ref().to_string()));
        }
        self
    }

    /// `name[key]=value` for every entry, in key order.
    pub(crate) fn push_map(mut self, name: &str, map: &BTreeMap<String, String>) -> Self {
        for (key, value) in map {
            self.pairs.push((format!("{name}[{key}]"), value.clone()));
        }
        self
    }

    /// `name[0][key]=value` for every record.
    pub(crate) fn push_records(mut self, name: &str, records: &[BTreeMap<String, String>]) -> Self {
        for (index, record) in records.iter().enumerate() {
            for (key, value) in record {
                self.pairs
                    .push((format!("{name}[{index}][{key}]"), value.clone()));
            }
        }
        self
    }

    /// Appends `client_id` when the call is scoped to a sub-account.
    pub(crate) fn client_id(self, client_id: Option<i64>) -> Self {
        self.push_opt("client_id", client_id)
    }

    pub(crate) fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}
