use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull};

use crate::format::{opt_datetime, OptNumber};
use crate::params::FormParams;

api_enum! {
    /// Event recorded in list and mailing logs.
    LogAction {
        Subscribe => "subscribe",
        Unsubscribe => "unsubscribe",
        InQueue => "in_queue",
        Opened => "opened",
        ImpliedOpen => "implied_open",
        Clickthru => "clickthru",
        Forward => "forward",
        View => "view",
        Spam => "spam",
        Skipped => "skipped",
        SoftBounce => "soft_bounce",
        HardBounce => "hard_bounce",
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde_as(as = "OptNumber")]
    #[serde(default, alias = "log_id")]
    pub id: Option<i64>,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub record_id: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub action: String,
    #[serde(default, with = "opt_datetime")]
    pub time: Option<NaiveDateTime>,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub uniques: Option<u64>,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub totals: Option<u64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters shared by `List/GetLog` and `Mailing/GetLogs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogQuery {
    pub log_type: Option<LogAction>,
    pub totals: Option<bool>,
    pub uniques: Option<bool>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl LogQuery {
    pub(crate) fn apply(&self, params: FormParams, paging: bool) -> FormParams {
        let params = params
            .push_opt("log_type", self.log_type)
            .push_opt_bool("totals", self.totals)
            .push_opt_bool("uniques", self.uniques)
            .push_opt_datetime("start_time", self.start_time)
            .push_opt_datetime("end_time", self.end_time);
        if paging {
            params
                .push_opt("offset", self.offset)
                .push_opt("limit", self.limit)
        } else {
            params
        }
    }
}
