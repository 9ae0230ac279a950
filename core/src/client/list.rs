//! `/List/*` operations: lists, their fields, members, logs and sublists.

use std::collections::BTreeMap;

use crate::envelope::{
    decode, decode_bool, decode_count, decode_id, decode_map, decode_vec, decode_wrapped,
};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::FormParams;
use crate::types::{
    FieldType, ImportedRecord, ListCreate, ListMember, ListQuery, ListUpdate, LogEntry, LogQuery,
    MailingList, MemberQuery, Record, Sublist, Subscription,
};

use super::MailerClient;

impl MailerClient {
    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    pub fn build_create_list(
        &self,
        user_key: &str,
        list: &ListCreate,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("name", &list.name)
            .push("sender_name", &list.sender_name)
            .push("sender_email", &list.sender_email)
            .push_opt("language", list.language.as_deref())
            .client_id(client_id);
        self.post("/List/Create/", params)
    }

    pub fn parse_create_list(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode_id(&response)
    }

    pub fn build_delete_list(&self, user_key: &str, list_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .client_id(client_id);
        self.post("/List/Delete/", params)
    }

    pub fn parse_delete_list(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_list(&self, user_key: &str, list_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .client_id(client_id);
        self.post("/List/Get/", params)
    }

    pub fn parse_get_list(&self, response: HttpResponse) -> Result<MailingList, ApiError> {
        decode(&response)
    }

    pub fn build_list_lists(&self, user_key: &str, query: &ListQuery, client_id: Option<i64>) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), true)
            .client_id(client_id);
        self.post("/List/GetList/", params)
    }

    pub fn parse_list_lists(&self, response: HttpResponse) -> Result<Vec<MailingList>, ApiError> {
        decode_wrapped(&response, "lists")
    }

    pub fn build_count_lists(&self, user_key: &str, query: &ListQuery, client_id: Option<i64>) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/List/GetList/", params)
    }

    pub fn parse_count_lists(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    pub fn build_update_list(
        &self,
        user_key: &str,
        list_id: i64,
        update: &ListUpdate,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = update
            .apply(FormParams::with_user_key(user_key).push("list_id", list_id))
            .client_id(client_id);
        self.post("/List/Update/", params)
    }

    pub fn parse_update_list(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    // -----------------------------------------------------------------------
    // Custom fields
    // -----------------------------------------------------------------------

    pub fn build_add_list_field(
        &self,
        user_key: &str,
        list_id: i64,
        field: &str,
        field_type: FieldType,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("field", field)
            .push("type", field_type)
            .client_id(client_id);
        self.post("/List/AddField/", params)
    }

    pub fn parse_add_list_field(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_delete_list_field(
        &self,
        user_key: &str,
        list_id: i64,
        field: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("field", field)
            .client_id(client_id);
        self.post("/List/DeleteField/", params)
    }

    pub fn parse_delete_list_field(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_list_fields(&self, user_key: &str, list_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .client_id(client_id);
        self.post("/List/GetFields/", params)
    }

    /// Field name to storage type. A list without custom fields answers
    /// with `null`, which decodes to an empty map.
    pub fn parse_get_list_fields(
        &self,
        response: HttpResponse,
    ) -> Result<BTreeMap<String, FieldType>, ApiError> {
        decode_map(&response)
    }

    // -----------------------------------------------------------------------
    // Test addresses
    // -----------------------------------------------------------------------

    pub fn build_add_test_email(
        &self,
        user_key: &str,
        list_id: i64,
        email: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("email", email)
            .client_id(client_id);
        self.post("/List/AddTestEmail/", params)
    }

    pub fn parse_add_test_email(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_delete_test_email(
        &self,
        user_key: &str,
        list_id: i64,
        email: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("email", email)
            .client_id(client_id);
        self.post("/List/DeleteTestEmail/", params)
    }

    pub fn parse_delete_test_email(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_test_emails(&self, user_key: &str, list_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .client_id(client_id);
        self.post("/List/GetTestEmails/", params)
    }

    pub fn parse_get_test_emails(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        decode_wrapped(&response, "testemails")
    }

    // -----------------------------------------------------------------------
    // Members
    // -----------------------------------------------------------------------

    /// Bulk import. Each record is sent as `record[i][field]`.
    pub fn build_import_records(
        &self,
        user_key: &str,
        list_id: i64,
        records: &[Record],
        autoresponders: Option<bool>,
        triggers: Option<bool>,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push_records("record", records)
            .push_opt_bool("autoresponders", autoresponders)
            .push_opt_bool("triggers", triggers)
            .client_id(client_id);
        self.post("/List/Import/", params)
    }

    pub fn parse_import_records(&self, response: HttpResponse) -> Result<Vec<ImportedRecord>, ApiError> {
        decode_vec(&response)
    }

    pub fn build_subscribe_email(
        &self,
        user_key: &str,
        list_id: i64,
        email: &str,
        subscription: &Subscription,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("email", email)
            .push_map("data", &subscription.data)
            .push_opt_bool("double_optin", subscription.double_optin)
            .push_opt_bool("autoresponders", subscription.autoresponders)
            .push_opt_bool("triggers", subscription.triggers)
            .client_id(client_id);
        self.post("/List/SubscribeEmail/", params)
    }

    /// Returns the subscriber's record id.
    pub fn parse_subscribe_email(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode_id(&response)
    }

    pub fn build_unsubscribe_email(
        &self,
        user_key: &str,
        list_id: i64,
        email: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("email", email)
            .client_id(client_id);
        self.post("/List/UnsubscribeEmail/", params)
    }

    pub fn parse_unsubscribe_email(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_delete_record(
        &self,
        user_key: &str,
        list_id: i64,
        record_id: i64,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("record_id", record_id)
            .client_id(client_id);
        self.post("/List/DeleteRecord/", params)
    }

    pub fn parse_delete_record(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_record(
        &self,
        user_key: &str,
        list_id: i64,
        record_id: i64,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("record_id", record_id)
            .client_id(client_id);
        self.post("/List/GetRecord/", params)
    }

    pub fn parse_get_record(&self, response: HttpResponse) -> Result<ListMember, ApiError> {
        decode(&response)
    }

    pub fn build_update_record(
        &self,
        user_key: &str,
        list_id: i64,
        record_id: i64,
        data: &Record,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("record_id", record_id)
            .push_map("data", data)
            .client_id(client_id);
        self.post("/List/UpdateRecord/", params)
    }

    pub fn parse_update_record(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_list_members(
        &self,
        user_key: &str,
        list_id: i64,
        query: &MemberQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("list_id", list_id), true)
            .client_id(client_id);
        self.post("/List/Show/", params)
    }

    pub fn parse_list_members(&self, response: HttpResponse) -> Result<Vec<ListMember>, ApiError> {
        decode_wrapped(&response, "records")
    }

    pub fn build_count_members(
        &self,
        user_key: &str,
        list_id: i64,
        query: &MemberQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("list_id", list_id), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/List/Show/", params)
    }

    pub fn parse_count_members(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    // -----------------------------------------------------------------------
    // Logs
    // -----------------------------------------------------------------------

    pub fn build_list_log(
        &self,
        user_key: &str,
        list_id: i64,
        query: &LogQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("list_id", list_id), true)
            .client_id(client_id);
        self.post("/List/GetLog/", params)
    }

    pub fn parse_list_log(&self, response: HttpResponse) -> Result<Vec<LogEntry>, ApiError> {
        decode_wrapped(&response, "logs")
    }

    pub fn build_count_list_log(
        &self,
        user_key: &str,
        list_id: i64,
        query: &LogQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("list_id", list_id), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/List/GetLog/", params)
    }

    pub fn parse_count_list_log(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    // -----------------------------------------------------------------------
    // Sublists
    // -----------------------------------------------------------------------

    pub fn build_create_sublist(
        &self,
        user_key: &str,
        list_id: i64,
        name: &str,
        query: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push("sublist_name", name)
            .push("query", query)
            .client_id(client_id);
        self.post("/List/CreateSublist/", params)
    }

    pub fn parse_create_sublist(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode_id(&response)
    }

    pub fn build_delete_sublist(&self, user_key: &str, sublist_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("sublist_id", sublist_id)
            .client_id(client_id);
        self.post("/List/DeleteSublist/", params)
    }

    pub fn parse_delete_sublist(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_list_sublists(
        &self,
        user_key: &str,
        list_id: i64,
        offset: Option<u32>,
        limit: Option<u32>,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("list_id", list_id)
            .push_opt("offset", offset)
            .push_opt("limit", limit)
            .client_id(client_id);
        self.post("/List/GetSublists/", params)
    }

    pub fn parse_list_sublists(&self, response: HttpResponse) -> Result<Vec<Sublist>, ApiError> {
        decode_wrapped(&response, "sublists")
    }
}
