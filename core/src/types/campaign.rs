use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::format::{opt_datetime, OptNumber};
use crate::params::FormParams;
use crate::types::SortDirection;

api_enum! {
    CampaignStatus {
        Ongoing => "ongoing",
        Closed => "closed",
    }
}

api_enum! {
    CampaignSortField {
        Name => "name",
        CreatedOn => "created_on",
    }
}

/// A campaign groups mailings under one name.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: String,
    #[serde(default, with = "opt_datetime")]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default, with = "opt_datetime")]
    pub closed_on: Option<NaiveDateTime>,
}

/// Filters for `Campaign/GetList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignQuery {
    pub status: Option<CampaignStatus>,
    pub name: Option<String>,
    pub sort_by: Option<CampaignSortField>,
    pub direction: Option<SortDirection>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl CampaignQuery {
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

/// Changes for `Campaign/Update`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub status: Option<CampaignStatus>,
}
