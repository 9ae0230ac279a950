//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or the expected error variant. Results
//! are compared as typed values (decoded from the vector) so field ordering
//! and string-vs-number spellings in the vectors don't matter.

use std::fmt::Debug;

use chrono::NaiveDateTime;
use mailer_core::format::DATETIME_FORMAT;
use mailer_core::{
    ApiError, CampaignQuery, CampaignUpdate, HttpMethod, HttpRequest, HttpResponse, ListCreate,
    MailerClient, MailingCreate, Record, Subscription, SuppressionKind, SuppressionQuery,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> MailerClient {
    MailerClient::new(BASE_URL, "test-api-key")
}

/// Decodes the response and, when given, checks it against `expected_result`.
type Check = Box<dyn Fn(&MailerClient, HttpResponse, Option<&Value>) -> Result<(), ApiError>>;

fn expect<T, F>(parse: F) -> Check
where
    T: DeserializeOwned + PartialEq + Debug,
    F: Fn(&MailerClient, HttpResponse) -> Result<T, ApiError> + 'static,
{
    Box::new(move |c, response, expected| {
        let got = parse(c, response)?;
        if let Some(expected) = expected {
            let want: T = serde_json::from_value(expected.clone()).unwrap();
            assert_eq!(got, want);
        }
        Ok(())
    })
}

fn str_of<'a>(input: &'a Value, key: &str) -> &'a str {
    input[key].as_str().unwrap_or_else(|| panic!("missing string `{key}`"))
}

fn id_of(input: &Value, key: &str) -> i64 {
    input[key].as_i64().unwrap_or_else(|| panic!("missing id `{key}`"))
}

/// Optional object input; absent means `T::default()`.
fn obj_of<T: DeserializeOwned + Default>(input: &Value, key: &str) -> T {
    match &input[key] {
        Value::Null => T::default(),
        value => serde_json::from_value(value.clone()).unwrap(),
    }
}

fn kind_of(input: &Value) -> SuppressionKind {
    serde_json::from_value(input["kind"].clone()).unwrap()
}

fn values_of(input: &Value) -> Vec<String> {
    serde_json::from_value(input["values"].clone()).unwrap()
}

/// Map an `operation` name to the request it builds and the check for its response.
fn dispatch(c: &MailerClient, operation: &str, input: &Value) -> (HttpRequest, Check) {
    let user_key = str_of(input, "user_key");
    let client_id = input["client_id"].as_i64();
    match operation {
        "create_campaign" => (
            c.build_create_campaign(user_key, str_of(input, "name"), client_id),
            expect(MailerClient::parse_create_campaign),
        ),
        "get_campaign" => (
            c.build_get_campaign(user_key, id_of(input, "campaign_id"), client_id),
            expect(MailerClient::parse_get_campaign),
        ),
        "list_campaigns" => (
            c.build_list_campaigns(user_key, &obj_of::<CampaignQuery>(input, "query"), client_id),
            expect(MailerClient::parse_list_campaigns),
        ),
        "count_campaigns" => (
            c.build_count_campaigns(user_key, &obj_of::<CampaignQuery>(input, "query"), client_id),
            expect(MailerClient::parse_count_campaigns),
        ),
        "update_campaign" => (
            c.build_update_campaign(
                user_key,
                id_of(input, "campaign_id"),
                &obj_of::<CampaignUpdate>(input, "update"),
                client_id,
            ),
            expect(MailerClient::parse_update_campaign),
        ),
        "delete_campaign" => (
            c.build_delete_campaign(user_key, id_of(input, "campaign_id"), client_id),
            expect(MailerClient::parse_delete_campaign),
        ),
        "create_list" => {
            let list: ListCreate = serde_json::from_value(input["list"].clone()).unwrap();
            (
                c.build_create_list(user_key, &list, client_id),
                expect(MailerClient::parse_create_list),
            )
        }
        "get_list_fields" => (
            c.build_get_list_fields(user_key, id_of(input, "list_id"), client_id),
            expect(MailerClient::parse_get_list_fields),
        ),
        "subscribe_email" => (
            c.build_subscribe_email(
                user_key,
                id_of(input, "list_id"),
                str_of(input, "email"),
                &obj_of::<Subscription>(input, "subscription"),
                client_id,
            ),
            expect(MailerClient::parse_subscribe_email),
        ),
        "import_records" => {
            let records: Vec<Record> = serde_json::from_value(input["records"].clone()).unwrap();
            (
                c.build_import_records(
                    user_key,
                    id_of(input, "list_id"),
                    &records,
                    input["autoresponders"].as_bool(),
                    input["triggers"].as_bool(),
                    client_id,
                ),
                expect(MailerClient::parse_import_records),
            )
        }
        "create_mailing" => (
            c.build_create_mailing(
                user_key,
                str_of(input, "name"),
                &obj_of::<MailingCreate>(input, "options"),
                client_id,
            ),
            expect(MailerClient::parse_create_mailing),
        ),
        "schedule_mailing" => {
            let date = input["date"]
                .as_str()
                .map(|raw| NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT).unwrap());
            (
                c.build_schedule_mailing(user_key, id_of(input, "mailing_id"), date, client_id),
                expect(MailerClient::parse_schedule_mailing),
            )
        }
        "get_email_message" => (
            c.build_get_email_message(user_key, id_of(input, "mailing_id"), client_id),
            expect(MailerClient::parse_get_email_message),
        ),
        "count_links" => (
            c.build_count_links(user_key, id_of(input, "mailing_id"), client_id),
            expect(MailerClient::parse_count_links),
        ),
        "import_suppressed" => {
            let kind = kind_of(input);
            (
                c.build_import_suppressed(user_key, kind, &values_of(input), client_id),
                expect(move |c: &MailerClient, r| c.parse_import_suppressed(kind, r)),
            )
        }
        "export_suppressed" => {
            let kind = kind_of(input);
            (
                c.build_export_suppressed(
                    user_key,
                    kind,
                    &obj_of::<SuppressionQuery>(input, "query"),
                    client_id,
                ),
                expect(move |c: &MailerClient, r| c.parse_export_suppressed(kind, r)),
            )
        }
        "count_suppressed" => (
            c.build_count_suppressed(
                user_key,
                kind_of(input),
                &obj_of::<SuppressionQuery>(input, "query"),
                client_id,
            ),
            expect(MailerClient::parse_count_suppressed),
        ),
        "delete_suppressed" => (
            c.build_delete_suppressed(user_key, kind_of(input), &values_of(input), client_id),
            expect(MailerClient::parse_delete_suppressed),
        ),
        other => panic!("unknown operation: {other}"),
    }
}

fn error_name(err: &ApiError) -> &'static str {
    match err {
        ApiError::Transport(_) => "Transport",
        ApiError::Cancelled => "Cancelled",
        ApiError::HttpError { .. } => "HttpError",
        ApiError::Api { .. } => "Api",
        ApiError::DeserializationError(_) => "DeserializationError",
    }
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let (req, check) = dispatch(&c, operation, &case["input"]);

        // Verify build
        let expected_req = &case["expected_request"];
        assert_eq!(req.method, HttpMethod::Post, "{name}: method");
        assert_eq!(
            req.path,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
        let expected_headers: Vec<(String, String)> =
            serde_json::from_value(expected_req["headers"].clone()).unwrap();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
        let expected_params: Vec<(String, String)> =
            serde_json::from_value(expected_req["params"].clone()).unwrap();
        assert_eq!(req.params, expected_params, "{name}: params");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        match case["expected_error"].as_str() {
            Some(variant) => match check(&c, response, None) {
                Ok(()) => panic!("{name}: expected {variant} error but parse succeeded"),
                Err(err) => {
                    assert_eq!(error_name(&err), variant, "{name}: error variant ({err})")
                }
            },
            None => check(&c, response, Some(&case["expected_result"]))
                .unwrap_or_else(|e| panic!("{name}: unexpected error {e}")),
        }
    }
}

#[test]
fn campaign_test_vectors() {
    run_vectors(include_str!("../../test-vectors/campaign.json"));
}

#[test]
fn list_test_vectors() {
    run_vectors(include_str!("../../test-vectors/list.json"));
}

#[test]
fn mailing_test_vectors() {
    run_vectors(include_str!("../../test-vectors/mailing.json"));
}

#[test]
fn suppression_test_vectors() {
    run_vectors(include_str!("../../test-vectors/suppression.json"));
}
