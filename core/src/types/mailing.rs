use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

use crate::format::{opt_datetime, Count, OptNumber};
use crate::params::FormParams;
use crate::types::SortDirection;

api_enum! {
    MailingType {
        Standard => "standard",
        Recurring => "recurring",
        AbSplit => "absplit",
    }
}

api_enum! {
    MailingStatus {
        Incomplete => "incomplete",
        Scheduled => "scheduled",
        Sending => "sending",
        Paused => "paused",
        Delivered => "delivered",
    }
}

api_enum! {
    MailingSortField {
        Name => "name",
        CreatedOn => "created_on",
        ScheduledFor => "scheduled_for",
        SentOn => "sent_on",
    }
}

api_enum! {
    TransferEncoding {
        QuotedPrintable => "quoted-printable",
        Base64 => "base64",
    }
}

api_enum! {
    /// Which rendition `Mailing/SendTestEmail` delivers.
    TestEmailType {
        Merged => "merged",
        Text => "text",
        Html => "html",
        Multipart => "multipart",
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailing {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub campaign_id: Option<i64>,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub list_id: Option<i64>,
    #[serde_as(as = "OptNumber")]
    #[serde(default)]
    pub sublist_id: Option<i64>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, rename = "type")]
    pub mailing_type: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub sender_email: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub transfer_encoding: Option<String>,
    #[serde(default, with = "opt_datetime")]
    pub created_on: Option<NaiveDateTime>,
    #[serde(default, with = "opt_datetime")]
    pub scheduled_for: Option<NaiveDateTime>,
    #[serde(default, with = "opt_datetime")]
    pub sent_on: Option<NaiveDateTime>,
    #[serde_as(as = "Count")]
    #[serde(default)]
    pub recipients: u64,
}

/// Optional values for `Mailing/Create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailingCreate {
    pub campaign_id: Option<i64>,
    pub mailing_type: Option<MailingType>,
    pub encoding: Option<String>,
    pub transfer_encoding: Option<TransferEncoding>,
}

impl MailingCreate {
    pub(crate) fn apply(&self, params: FormParams) -> FormParams {
        params
            .push_opt("campaign_id", self.campaign_id)
            .push_opt("type", self.mailing_type)
            .push_opt("encoding", self.encoding.as_deref())
            .push_opt("transfer_encoding", self.transfer_encoding)
    }
}

/// Filters for `Mailing/GetList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailingQuery {
    pub status: Option<MailingStatus>,
    pub mailing_type: Option<MailingType>,
    pub name: Option<String>,
    pub sort_by: Option<MailingSortField>,
    pub direction: Option<SortDirection>,
    pub campaign_id: Option<i64>,
    pub list_id: Option<i64>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl MailingQuery {
    pub(crate) fn apply(&self, params: FormParams, paging: bool) -> FormParams {
        let params = params
            .push_opt("status", self.status)
            .push_opt("type", self.mailing_type)
            .push_opt("name", self.name.as_deref())
            .push_opt("sort_by", self.sort_by)
            .push_opt("direction", self.direction)
            .push_opt("campaign_id", self.campaign_id)
            .push_opt("list_id", self.list_id)
            .push_opt_datetime("start_date", self.start_date)
            .push_opt_datetime("end_date", self.end_date);
        if paging {
            params
                .push_opt("offset", self.offset)
                .push_opt("limit", self.limit)
        } else {
            params
        }
    }
}

/// Changes for `Mailing/Update`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailingUpdate {
    pub name: Option<String>,
    pub campaign_id: Option<i64>,
    pub list_id: Option<i64>,
    pub sublist_id: Option<i64>,
    pub subject: Option<String>,
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub reply_to: Option<String>,
    pub html_message: Option<String>,
    pub text_message: Option<String>,
    pub encoding: Option<String>,
    pub transfer_encoding: Option<TransferEncoding>,
    pub clickthru_html: Option<bool>,
    pub clickthru_text: Option<bool>,
    pub opening_stats: Option<bool>,
    pub unsub_bottom_link: Option<bool>,
    pub tracking_params: Option<String>,
}

impl MailingUpdate {
    pub(crate) fn apply(&self, params: FormParams) -> FormParams {
        params
            .push_opt("name", self.name.as_deref())
            .push_opt("campaign_id", self.campaign_id)
            .push_opt("list_id", self.list_id)
            .push_opt("sublist_id", self.sublist_id)
            .push_opt("subject", self.subject.as_deref())
            .push_opt("sender_name", self.sender_name.as_deref())
            .push_opt("sender_email", self.sender_email.as_deref())
            .push_opt("reply_to", self.reply_to.as_deref())
            .push_opt("html_message", self.html_message.as_deref())
            .push_opt("text_message", self.text_message.as_deref())
            .push_opt("encoding", self.encoding.as_deref())
            .push_opt("transfer_encoding", self.transfer_encoding)
            .push_opt_bool("clickthru_html", self.clickthru_html)
            .push_opt_bool("clickthru_text", self.clickthru_text)
            .push_opt_bool("opening_stats", self.opening_stats)
            .push_opt_bool("unsub_bottom_link", self.unsub_bottom_link)
            .push_opt("tracking_params", self.tracking_params.as_deref())
    }
}

/// Rendered subject and MIME body from `Mailing/GetEmailMessage`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub subject: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
}

/// A tracked link inside a mailing.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingLink {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub id: i64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,
    #[serde_as(as = "Count")]
    #[serde(default)]
    pub clicks: u64,
    #[serde_as(as = "Count")]
    #[serde(default)]
    pub unique_clicks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mailing() {
        let mailing: Mailing = serde_json::from_str(
            r#"{"id":"88","campaign_id":"12","list_id":null,"name":"March issue",
                "type":"standard","status":"scheduled","subject":"Hello",
                "scheduled_for":"2024-03-01 09:30:00","recipients":"1500"}"#,
        )
        .unwrap();
        assert_eq!(mailing.id, 88);
        assert_eq!(mailing.campaign_id, Some(12));
        assert_eq!(mailing.list_id, None);
        assert_eq!(mailing.mailing_type, "standard");
        assert_eq!(mailing.recipients, 1500);
        assert!(mailing.sent_on.is_none());
    }

    #[test]
    fn empty_string_numbers_are_unset() {
        let mailing: Mailing =
            serde_json::from_str(r#"{"id":"1","list_id":"","sublist_id":"","recipients":""}"#)
                .unwrap();
        assert_eq!(mailing.id, 1);
        assert_eq!(mailing.list_id, None);
        assert_eq!(mailing.sublist_id, None);
        assert_eq!(mailing.recipients, 0);

        let link: MailingLink =
            serde_json::from_str(r#"{"id":"3","url":"https://acme.test","clicks":"","unique_clicks":"2"}"#)
                .unwrap();
        assert_eq!((link.clicks, link.unique_clicks), (0, 2));
    }

    #[test]
    fn update_serializes_flags_as_strings() {
        let update = MailingUpdate {
            subject: Some("Hi".to_string()),
            opening_stats: Some(false),
            transfer_encoding: Some(TransferEncoding::QuotedPrintable),
            ..MailingUpdate::default()
        };
        let pairs = update.apply(FormParams::default()).into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("subject".to_string(), "Hi".to_string()),
                ("transfer_encoding".to_string(), "quoted-printable".to_string()),
                ("opening_stats".to_string(), "false".to_string()),
            ]
        );
    }
}
