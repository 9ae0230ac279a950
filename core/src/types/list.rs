use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::format::{opt_datetime, Count};
use crate::params::FormParams;
use crate::types::SortDirection;

/// One subscriber row keyed by field name, as sent to `List/Import`.
pub type Record = BTreeMap<String, String>;

api_enum! {
    ListStatus {
        Active => "active",
        Deleted => "deleted",
    }
}

api_enum! {
    ListPolicy {
        Accepted => "accepted",
        Pending => "pending",
        Declined => "declined",
    }
}

api_enum! {
    ListSortField {
        Name => "name",
        CreatedOn => "created_on",
        ActiveMembers => "active_members_count",
    }
}

api_enum! {
    MemberStatus {
        Active => "active",
        Unsubscribed => "unsubscribed",
        Deleted => "deleted",
        Bounced => "inactive_bounced",
        Spam => "spam",
    }
}

api_enum! {
    /// Storage type of a custom list field.
    FieldType {
        Text => "text",
        Integer => "integer",
        Datetime => "datetime",
        Mediumtext => "mediumtext",
    }
}

/// A contact list.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingList {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default, with = "opt_datetime")]
    pub created_on: Option<NaiveDateTime>,
    #[serde_as(as = "Count")]
    #[serde(default, alias = "active_members_count")]
    pub subscribers: u64,
    #[serde_as(as = "Count")]
    #[serde(default, alias = "unsubscribed_members_count")]
    pub unsubscribed: u64,
    #[serde_as(as = "Count")]
    #[serde(default, alias = "bounced_members_count")]
    pub bounced: u64,
    #[serde_as(as = "Count")]
    #[serde(default, alias = "deleted_members_count")]
    pub deleted: u64,
}

/// Required and optional values for `List/Create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCreate {
    pub name: String,
    pub sender_name: String,
    pub sender_email: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Filters for `List/GetList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub status: Option<ListStatus>,
    pub name: Option<String>,
    pub sort_by: Option<ListSortField>,
    pub direction: Option<SortDirection>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub(crate) fn apply(&self, params: FormParams, paging: bool) -> FormParams {
        let params = params
            .push_opt("status", self.status)
            .push_opt("name", self.name.as_deref())
            .push_opt("sort_by", self.sort_by)
            .push_opt("direction", self.direction);
        if paging {
            params
                .push_opt("offset", self.offset)
                .push_opt("limit", self.limit)
        } else {
            params
        }
    }
}

/// Changes for `List/Update`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub language: Option<String>,
    pub status: Option<ListStatus>,
    pub policy: Option<ListPolicy>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub forward_page: Option<String>,
    /// Redirect after opt-in.
    pub goto_oi: Option<String>,
    /// Redirect after double opt-in.
    pub goto_di: Option<String>,
    /// Redirect after opt-out.
    pub goto_oo: Option<String>,
    pub webhook: Option<String>,
}

impl ListUpdate {
    pub(crate) fn apply(&self, params: FormParams) -> FormParams {
        params
            .push_opt("name", self.name.as_deref())
            .push_opt("language", self.language.as_deref())
            .push_opt("status", self.status)
            .push_opt("policy", self.policy)
            .push_opt("sender_name", self.sender_name.as_deref())
            .push_opt("sender_email", self.sender_email.as_deref())
            .push_opt("forward_page", self.forward_page.as_deref())
            .push_opt("goto_oi", self.goto_oi.as_deref())
            .push_opt("goto_di", self.goto_di.as_deref())
            .push_opt("goto_oo", self.goto_oo.as_deref())
            .push_opt("webhook", self.webhook.as_deref())
    }
}

/// A subscriber on a list. Custom fields land in `fields`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMember {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: String,
    #[serde(default, with = "opt_datetime")]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default, with = "opt_datetime")]
    pub last_activity: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Filters for `List/Show`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberQuery {
    pub status: Option<MemberStatus>,
    /// Server-side filter expression, e.g. `` `firstname` = "Ada" ``.
    pub query: Option<String>,
    pub sort_by: Option<String>,
    pub direction: Option<SortDirection>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl MemberQuery {
    pub(crate) fn apply(&self, params: FormParams, paging: bool) -> FormParams {
        let params = params
            .push_opt("status", self.status)
            .push_opt("query", self.query.as_deref())
            .push_opt("sort_by", self.sort_by.as_deref())
            .push_opt("direction", self.direction);
        if paging {
            params
                .push_opt("offset", self.offset)
                .push_opt("limit", self.limit)
        } else {
            params
        }
    }
}

/// Options for `List/SubscribeEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    /// Custom field values, sent as `data[field]`.
    pub data: Record,
    pub double_optin: Option<bool>,
    pub autoresponders: Option<bool>,
    pub triggers: Option<bool>,
}

/// One row of the `List/Import` result.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRecord {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
}

/// A saved segment of a list.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sublist {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "sublist_name")]
    pub name: String,
    #[serde(default)]
    pub query: Option<String>,
}
