//! Data-transfer types for the API.
//!
//! # Design
//! Response records are decoded leniently: numbers may arrive as JSON
//! strings, timestamps use the API's `yyyy-MM-dd HH:mm:ss` layout, and
//! missing or null fields fall back to empty defaults. Request-side types
//! (queries, updates) are plain structs whose `None` fields are left out of
//! the request entirely.

/// Declares a closed set of API string values with `as_str`, `Display` and
/// serde impls that use the wire spelling.
macro_rules! api_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                match raw.as_str() {
                    $($value => Ok($name::$variant),)+
                    other => Err(serde::de::Error::unknown_variant(other, &[$($value),+])),
                }
            }
        }
    };
}

pub mod campaign;
pub mod common;
pub mod list;
pub mod log;
pub mod mailing;
pub mod suppression;

pub use campaign::{Campaign, CampaignQuery, CampaignSortField, CampaignStatus, CampaignUpdate};
pub use common::SortDirection;
pub use list::{
    FieldType, ImportedRecord, ListCreate, ListMember, ListPolicy, ListQuery, ListSortField,
    ListStatus, ListUpdate, MailingList, MemberQuery, MemberStatus, Record, Sublist,
    Subscription,
};
pub use log::{LogAction, LogEntry, LogQuery};
pub use mailing::{
    EmailMessage, Mailing, MailingCreate, MailingLink, MailingQuery, MailingSortField,
    MailingStatus, MailingType, MailingUpdate, TestEmailType, TransferEncoding,
};
pub use suppression::{SuppressionEntry, SuppressionKind, SuppressionQuery};
