//! `/Campaign/*` operations.

use crate::envelope::{decode, decode_bool, decode_count, decode_id, decode_wrapped};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::FormParams;
use crate::types::{Campaign, CampaignQuery, CampaignUpdate};

use super::MailerClient;

impl MailerClient {
    pub fn build_create_campaign(
        &self,
        user_key: &str,
        name: &str,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("name", name)
            .client_id(client_id);
        self.post("/Campaign/Create/", params)
    }

    /// Returns the new campaign id.
    pub fn parse_create_campaign(&self, response: HttpResponse) -> Result<i64, ApiError> {
        decode_id(&response)
    }

    pub fn build_delete_campaign(
        &self,
        user_key: &str,
        campaign_id: i64,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("campaign_id", campaign_id)
            .client_id(client_id);
        self.post("/Campaign/Delete/", params)
    }

    pub fn parse_delete_campaign(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }

    pub fn build_get_campaign(
        &self,
        user_key: &str,
        campaign_id: i64,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("campaign_id", campaign_id)
            .client_id(client_id);
        self.post("/Campaign/Get/", params)
    }

    pub fn parse_get_campaign(&self, response: HttpResponse) -> Result<Campaign, ApiError> {
        decode(&response)
    }

    pub fn build_list_campaigns(
        &self,
        user_key: &str,
        query: &CampaignQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), true)
            .client_id(client_id);
        self.post("/Campaign/GetList/", params)
    }

    pub fn parse_list_campaigns(&self, response: HttpResponse) -> Result<Vec<Campaign>, ApiError> {
        decode_wrapped(&response, "campaigns")
    }

    /// `Campaign/GetList` with `count=true`. Paging fields of `query` are ignored.
    pub fn build_count_campaigns(
        &self,
        user_key: &str,
        query: &CampaignQuery,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = query
            .apply(FormParams::with_user_key(user_key), false)
            .push_bool("count", true)
            .client_id(client_id);
        self.post("/Campaign/GetList/", params)
    }

    pub fn parse_count_campaigns(&self, response: HttpResponse) -> Result<u64, ApiError> {
        decode_count(&response)
    }

    pub fn build_update_campaign(
        &self,
        user_key: &str,
        campaign_id: i64,
        update: &CampaignUpdate,
        client_id: Option<i64>,
    ) -> HttpRequest {
        let params = FormParams::with_user_key(user_key)
            .push("campaign_id", campaign_id)
            .push_opt("name", update.name.as_deref())
            .push_opt("status", update.status)
            .client_id(client_id);
        self.post("/Campaign/Update/", params)
    }

    pub fn parse_update_campaign(&self, response: HttpResponse) -> Result<bool, ApiError> {
        decode_bool(&response)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::*;
    use crate::error::ApiError;
    use crate::types::{CampaignQuery, CampaignSortField, CampaignStatus, CampaignUpdate, SortDirection};

    #[test]
    fn create_campaign_without_client_id() {
        let req = client().build_create_campaign("user-1", "My Campaign", None);
        assert_post(&req, "/Campaign/Create/");
        assert_eq!(params(&req), vec![("user_key", "user-1"), ("name", "My Campaign")]);

        let id = client()
            .parse_create_campaign(success(r#""12345""#))
            .unwrap();
        assert_eq!(id, 12345);
    }

    #[test]
    fn create_campaign_with_client_id() {
        let req = client().build_create_campaign("user-1", "My Campaign", Some(987));
        assert_eq!(
            params(&req),
            vec![("user_key", "user-1"), ("name", "My Campaign"), ("client_id", "987")]
        );
    }

    #[test]
    fn create_campaign_failure() {
        let err = client()
            .parse_create_campaign(failure("Campaign name already used"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { ref message, .. } if message == "Campaign name already used"));
    }

    #[test]
    fn delete_campaign() {
        let req = client().build_delete_campaign("u", 55, None);
        assert_post(&req, "/Campaign/Delete/");
        assert_eq!(params(&req), vec![("user_key", "u"), ("campaign_id", "55")]);
        assert!(client().parse_delete_campaign(success("true")).unwrap());
    }

    #[test]
    fn get_campaign() {
        let req = client().build_get_campaign("u", 55, Some(3));
        assert_post(&req, "/Campaign/Get/");
        assert_eq!(
            params(&req),
            vec![("user_key", "u"), ("campaign_id", "55"), ("client_id", "3")]
        );

        let campaign = client()
            .parse_get_campaign(success(
                r#"{"id":"55","client_id":"3","name":"Autumn","status":"ongoing","created_on":"2024-09-01 10:00:00","closed_on":null}"#,
            ))
            .unwrap();
        assert_eq!(campaign.id, 55);
        assert_eq!(campaign.client_id, Some(3));
        assert_eq!(campaign.name, "Autumn");
        assert!(campaign.closed_on.is_none());
    }

    #[test]
    fn list_campaigns_with_all_filters() {
        let query = CampaignQuery {
            status: Some(CampaignStatus::Ongoing),
            name: Some("Spring".to_string()),
            sort_by: Some(CampaignSortField::CreatedOn),
            direction: Some(SortDirection::Desc),
            offset: Some(20),
            limit: Some(10),
        };
        let req = client().build_list_campaigns("u", &query, None);
        assert_post(&req, "/Campaign/GetList/");
        assert_eq!(
            params(&req),
            vec![
                ("user_key", "u"),
                ("status", "ongoing"),
                ("name", "Spring"),
                ("sort_by", "created_on"),
                ("direction", "desc"),
                ("offset", "20"),
                ("limit", "10"),
            ]
        );
    }

    #[test]
    fn list_campaigns_without_filters_sends_only_user_key() {
        let req = client().build_list_campaigns("u", &CampaignQuery::default(), None);
        assert_eq!(params(&req), vec![("user_key", "u")]);
        assert!(req.param("count").is_none());
    }

    #[test]
    fn parse_list_campaigns_keeps_order() {
        let campaigns = client()
            .parse_list_campaigns(success(
                r#"{"campaigns":[{"id":"3","name":"c"},{"id":"1","name":"a"},{"id":"2","name":"b"}]}"#,
            ))
            .unwrap();
        let ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn count_campaigns_drops_paging() {
        let query = CampaignQuery {
            status: Some(CampaignStatus::Closed),
            offset: Some(5),
            limit: Some(5),
            ..CampaignQuery::default()
        };
        let req = client().build_count_campaigns("u", &query, Some(8));
        assert_post(&req, "/Campaign/GetList/");
        assert_eq!(
            params(&req),
            vec![("user_key", "u"), ("status", "closed"), ("count", "true"), ("client_id", "8")]
        );
        assert_eq!(
            client()
                .parse_count_campaigns(success(r#"{"count":"17"}"#))
                .unwrap(),
            17
        );
    }

    #[test]
    fn update_campaign_partial() {
        let update = CampaignUpdate {
            status: Some(CampaignStatus::Closed),
            ..CampaignUpdate::default()
        };
        let req = client().build_update_campaign("u", 9, &update, None);
        assert_post(&req, "/Campaign/Update/");
        assert_eq!(
            params(&req),
            vec![("user_key", "u"), ("campaign_id", "9"), ("status", "closed")]
        );
        assert!(client().parse_update_campaign(success(r#""true""#)).unwrap());
    }
}
