//! `/Mailing/*` operations.

use chrono::NaiveDateTime;

use crate::envelope::{decode, decode_bool, decode_count, decode_id, decode_string, decode_wrapped};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::FormParams;
use crate::types::{
    EmailMessage, LogEntry, LogQuery, Mailing, MailingCreate, MailingLink, MailingQuery,
    MailingUpdate, TestEmailType,
};

use super::MailerClient;

impl MailerClient {
    /// Request carrying only `mailing_id`, shared by the state-change and
    /// message-fetch operations.
    fn mailing_request(
        &self,
        path: &str,
        user_key: &str,
        mailing_id: i64,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("mailing_id", mailing_id)
            .client_id(client_id);
        self.post(path, params)
    }

    pub fn build_create_mailing(
        &self,
        user_key: &str,
        name: &str,
        options: &MailingCreate,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = options
            .apply(FormParams::with_user_key(user_key).push("name", name))
            .client_id(client_id);
        self.post("/Mailing/Create/", params)
    }

    pub fn parse_create_mailing(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode_id(&response)
    }

    pub fn build_delete_mailing(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/Delete/", user_key, mailing_id, client_id)
    }

    pub fn parse_delete_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_mailing(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/Get/", user_key, mailing_id, client_id)
    }

    pub fn parse_get_mailing(&self, response: HttpResponse) -> Result<Mailing, ApiError> {
        decode(&response)
    }

    pub fn build_list_mailings(
        &self,
        user_key: &str,
        query: &MailingQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), true)
            .client_id(client_id);
        self.post("/Mailing/GetList/", params)
    }

    pub fn parse_list_mailings(&self, response: HttpResponse) -> Result<Vec<Mailing>, ApiError> {
        decode_wrapped(&response, "mailings")
    }

    pub fn build_count_mailings(
        &self,
        user_key: &str,
        query: &MailingQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/Mailing/GetList/", params)
    }

    pub fn parse_count_mailings(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    pub fn build_update_mailing(
        &self,
        user_key: &str,
        mailing_id: i64,
        update: &MailingUpdate,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = update
            .apply(FormParams::with_user_key(user_key).push("mailing_id", mailing_id))
            .client_id(client_id);
        self.post("/Mailing/Update/", params)
    }

    pub fn parse_update_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    // -----------------------------------------------------------------------
    // Delivery
    // -----------------------------------------------------------------------

    /// Without `date` the mailing is queued for immediate delivery.
    pub fn build_schedule_mailing(
        &self,
        user_key: &str,
        mailing_id: i64,
        date: Option<NaiveDateTime>,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("mailing_id", mailing_id)
            .push_opt_datetime("date", date)
            .client_id(client_id);
        self.post("/Mailing/Schedule/", params)
    }

    pub fn parse_schedule_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_unschedule_mailing(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/Unschedule/", user_key, mailing_id, client_id)
    }

    pub fn parse_unschedule_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_suspend_mailing(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/Suspend/", user_key, mailing_id, client_id)
    }

    pub fn parse_suspend_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_resume_mailing(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/Resume/", user_key, mailing_id, client_id)
    }

    pub fn parse_resume_mailing(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_send_test_email(
        &self,
        user_key: &str,
        mailing_id: i64,
        test_email: &str,
        test_type: Option<TestEmailType>,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("mailing_id", mailing_id)
            .push("test_email", test_email)
            .push_opt("test_type", test_type)
            .client_id(client_id);
        self.post("/Mailing/SendTestEmail/", params)
    }

    pub fn parse_send_test_email(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    // -----------------------------------------------------------------------
    // Content
    // -----------------------------------------------------------------------

    pub fn build_get_email_message(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/GetEmailMessage/", user_key, mailing_id, client_id)
    }

    pub fn parse_get_email_message(&self, response: HttpResponse) -> Result<EmailMessage, ApiError> {
        decode(&response)
    }

    pub fn build_get_html_message(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/GetHtmlMessage/", user_key, mailing_id, client_id)
    }

    pub fn parse_get_html_message(&self, response: HttpResponse) -> Result<String, ApiError> {
        decode_string(&response)
    }

    pub fn build_get_text_message(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        self.mailing_request("/Mailing/GetTextMessage/", user_key, mailing_id, client_id)
    }

    pub fn parse_get_text_message(&self, response: HttpResponse) -> Result<String, ApiError> {
        decode_string(&response)
    }

    // -----------------------------------------------------------------------
    // Links and logs
    // -----------------------------------------------------------------------

    pub fn build_list_links(
        &self,
        user_key: &str,
        mailing_id: i64,
        offset: Option<u32>,
        limit: Option<u32>,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("mailing_id", mailing_id)
            .push_opt("offset", offset)
            .push_opt("limit", limit)
            .client_id(client_id);
        self.post("/Mailing/GetLinks/", params)
    }

    pub fn parse_list_links(&self, response: HttpResponse) -> Result<Vec<MailingLink>, ApiError> {
        decode_wrapped(&response, "links")
    }

    pub fn build_count_links(&self, user_key: &str, mailing_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("mailing_id", mailing_id)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/Mailing/GetLinks/", params)
    }

    pub fn parse_count_links(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    pub fn build_get_link(&self, user_key: &str, link_id: i64, client_id: Option<i64>) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("link_id", link_id)
            .client_id(client_id);
        self.post("/Mailing/GetLink/", params)
    }

    pub fn parse_get_link(&self, response: HttpResponse) -> Result<MailingLink, ApiError> {
        decode(&response)
    }

    pub fn build_mailing_logs(
        &self,
        user_key: &str,
        mailing_id: i64,
        query: &LogQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("mailing_id", mailing_id), true)
            .client_id(client_id);
        self.post("/Mailing/GetLogs/", params)
    }

    pub fn parse_mailing_logs(&self, response: HttpResponse) -> Result<Vec<LogEntry>, ApiError> {
        decode_wrapped(&response, "logs")
    }

    pub fn build_count_mailing_logs(
        &self,
        user_key: &str,
        mailing_id: i64,
        query: &LogQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key).push("mailing_id", mailing_id), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/Mailing/GetLogs/", params)
    }

    pub fn parse_count_mailing_logs(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }
}
