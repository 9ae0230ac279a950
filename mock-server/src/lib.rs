//! In-memory stand-in for the email-marketing API.
//!
//! Covers campaigns, a subset of list operations and every suppression-list
//! operation. Requests are form-encoded POSTs authenticated by the `apikey`
//! header plus a non-empty `user_key`; responses use the
//! `{"status", "data"}` envelope with string-typed numbers, the way the real
//! service answers.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::post,
    Form, Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_API_KEY: &str = "test-api-key";

/// Timestamp stamped on every record the mock creates.
pub const CREATED_ON: &str = "2024-01-01 00:00:00";

type Params = HashMap<String, String>;
type Reply = Result<Json<Value>, Json<Value>>;
type Shared = Arc<MockState>;

pub struct MockState {
    api_key: String,
    store: RwLock<Store>,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    campaigns: BTreeMap<i64, Map<String, Value>>,
    lists: BTreeMap<i64, MockList>,
    suppressed: BTreeMap<&'static str, Vec<String>>,
}

impl Store {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
struct MockList {
    info: Map<String, Value>,
    fields: BTreeMap<String, String>,
    records: Vec<Map<String, Value>>,
}

pub fn app() -> Router {
    app_with_key(DEFAULT_API_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let state: Shared = Arc::new(MockState {
        api_key: api_key.to_string(),
        store: RwLock::new(Store::default()),
    });
    Router::new()
        .route("/Campaign/Create/", post(campaign_create))
        .route("/Campaign/Get/", post(campaign_get))
        .route("/Campaign/GetList/", post(campaign_get_list))
        .route("/Campaign/Update/", post(campaign_update))
        .route("/Campaign/Delete/", post(campaign_delete))
        .route("/List/Create/", post(list_create))
        .route("/List/Get/", post(list_get))
        .route("/List/AddField/", post(list_add_field))
        .route("/List/GetFields/", post(list_get_fields))
        .route("/List/SubscribeEmail/", post(list_subscribe_email))
        .route("/List/Show/", post(list_show))
        .route("/SuppressionList/{action}/", post(suppression))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_key(listener, DEFAULT_API_KEY).await
}

pub async fn run_with_key(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_key(api_key)).await
}

// ---------------------------------------------------------------------------
// Envelope and parameter helpers
// ---------------------------------------------------------------------------

fn success(data: Value) -> Reply {
    Ok(Json(json!({ "status": "success", "data": data })))
}

fn failure(message: &str) -> Json<Value> {
    Json(json!({ "status": "failed", "data": message }))
}

fn authorize(state: &MockState, headers: &HeaderMap, params: &Params) -> Result<(), Json<Value>> {
    let api_key = headers.get("apikey").and_then(|v| v.to_str().ok());
    if api_key != Some(state.api_key.as_str()) {
        return Err(failure("Invalid API key"));
    }
    match params.get("user_key") {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err(failure("Missing parameter user_key")),
    }
}

fn required<'a>(params: &'a Params, name: &str) -> Result<&'a str, Json<Value>> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| failure(&format!("Missing parameter {name}")))
}

fn required_id(params: &Params, name: &str) -> Result<i64, Json<Value>> {
    required(params, name)?
        .parse()
        .map_err(|_| failure(&format!("Invalid parameter {name}")))
}

fn optional_usize(params: &Params, name: &str) -> Result<Option<usize>, Json<Value>> {
    params
        .get(name)
        .map(|raw| {
            raw.parse()
                .map_err(|_| failure(&format!("Invalid parameter {name}")))
        })
        .transpose()
}

fn is_count(params: &Params) -> bool {
    params.get("count").map(String::as_str) == Some("true")
}

/// Apply `offset` / `limit` to an already filtered list.
fn page<T>(items: Vec<T>, params: &Params) -> Result<Vec<T>, Json<Value>> {
    let offset = optional_usize(params, "offset")?.unwrap_or(0);
    let limit = optional_usize(params, "limit")?.unwrap_or(usize::MAX);
    Ok(items.into_iter().skip(offset).take(limit).collect())
}

/// Values of `name[0]`, `name[1]`, ... in index order.
fn indexed(params: &Params, name: &str) -> Vec<String> {
    let prefix = format!("{name}[");
    let mut values: Vec<(usize, String)> = params
        .iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix(&prefix)?.strip_suffix(']')?.parse().ok()?;
            Some((index, value.clone()))
        })
        .collect();
    values.sort_by_key(|(index, _)| *index);
    values.into_iter().map(|(_, value)| value).collect()
}

/// Entries of `name[key]` keyed by `key`.
fn keyed(params: &Params, name: &str) -> BTreeMap<String, String> {
    let prefix = format!("{name}[");
    params
        .iter()
        .filter_map(|(key, value)| {
            let field = key.strip_prefix(&prefix)?.strip_suffix(']')?;
            Some((field.to_string(), value.clone()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

async fn campaign_create(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let name = required(&params, "name")?;
    let mut store = state.store.write().await;
    if store.campaigns.values().any(|c| c["name"] == name) {
        return Err(failure("Campaign name already used"));
    }
    let id = store.allocate_id();
    let campaign = json!({
        "id": id.to_string(),
        "client_id": params.get("client_id"),
        "name": name,
        "status": "ongoing",
        "created_on": CREATED_ON,
        "closed_on": null,
    });
    if let Value::Object(map) = campaign {
        store.campaigns.insert(id, map);
    }
    tracing::info!(id, name, "campaign created");
    success(json!(id.to_string()))
}

async fn campaign_get(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "campaign_id")?;
    let store = state.store.read().await;
    match store.campaigns.get(&id) {
        Some(campaign) => success(Value::Object(campaign.clone())),
        None => Err(failure("Campaign not found")),
    }
}

async fn campaign_get_list(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let store = state.store.read().await;
    let matching: Vec<Value> = store
        .campaigns
        .values()
        .filter(|c| params.get("status").map_or(true, |s| c["status"] == s.as_str()))
        .filter(|c| params.get("name").map_or(true, |n| c["name"] == n.as_str()))
        .map(|c| Value::Object(c.clone()))
        .collect();
    if is_count(&params) {
        return success(json!({ "count": matching.len().to_string() }));
    }
    success(json!({ "campaigns": page(matching, &params)? }))
}

async fn campaign_update(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "campaign_id")?;
    let mut store = state.store.write().await;
    let campaign = store
        .campaigns
        .get_mut(&id)
        .ok_or_else(|| failure("Campaign not found"))?;
    for field in ["name", "status"] {
        if let Some(value) = params.get(field) {
            campaign.insert(field.to_string(), json!(value));
        }
    }
    success(json!(true))
}

async fn campaign_delete(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "campaign_id")?;
    let mut store = state.store.write().await;
    match store.campaigns.remove(&id) {
        Some(_) => success(json!(true)),
        None => Err(failure("Campaign not found")),
    }
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

async fn list_create(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let name = required(&params, "name")?;
    let sender_name = required(&params, "sender_name")?;
    let sender_email = required(&params, "sender_email")?;
    let mut store = state.store.write().await;
    let id = store.allocate_id();
    let info = json!({
        "id": id.to_string(),
        "name": name,
        "status": "active",
        "sender_name": sender_name,
        "sender_email": sender_email,
        "language": params.get("language").map_or("en_US", String::as_str),
        "created_on": CREATED_ON,
    });
    if let Value::Object(info) = info {
        store.lists.insert(
            id,
            MockList {
                info,
                ..MockList::default()
            },
        );
    }
    success(json!(id.to_string()))
}

async fn list_get(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "list_id")?;
    let store = state.store.read().await;
    let list = store.lists.get(&id).ok_or_else(|| failure("List not found"))?;
    let mut info = list.info.clone();
    info.insert(
        "active_members_count".to_string(),
        json!(list.records.len().to_string()),
    );
    success(Value::Object(info))
}

async fn list_add_field(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "list_id")?;
    let field = required(&params, "field")?;
    let field_type = required(&params, "type")?;
    let mut store = state.store.write().await;
    let list = store.lists.get_mut(&id).ok_or_else(|| failure("List not found"))?;
    list.fields.insert(field.to_string(), field_type.to_string());
    success(json!(true))
}

async fn list_get_fields(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let id = required_id(&params, "list_id")?;
    let store = state.store.read().await;
    let list = store.lists.get(&id).ok_or_else(|| failure("List not found"))?;
    if list.fields.is_empty() {
        return success(Value::Null);
    }
    success(json!(list.fields))
}

async fn list_subscribe_email(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let list_id = required_id(&params, "list_id")?;
    let email = required(&params, "email")?;
    let data = keyed(&params, "data");
    let mut store = state.store.write().await;
    let record_id = store.allocate_id();
    let list = store
        .lists
        .get_mut(&list_id)
        .ok_or_else(|| failure("List not found"))?;
    if let Some(unknown) = data.keys().find(|key| !list.fields.contains_key(*key)) {
        return Err(failure(&format!("Unknown field {unknown}")));
    }
    let mut record = Map::new();
    record.insert("id".to_string(), json!(record_id.to_string()));
    record.insert("email".to_string(), json!(email));
    record.insert("status".to_string(), json!("active"));
    record.insert("created_on".to_string(), json!(CREATED_ON));
    for (key, value) in data {
        record.insert(key, json!(value));
    }
    list.records.push(record);
    success(json!(record_id.to_string()))
}

async fn list_show(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let list_id = required_id(&params, "list_id")?;
    let store = state.store.read().await;
    let list = store.lists.get(&list_id).ok_or_else(|| failure("List not found"))?;
    let matching: Vec<Value> = list
        .records
        .iter()
        .filter(|r| params.get("status").map_or(true, |s| r["status"] == s.as_str()))
        .map(|r| Value::Object(r.clone()))
        .collect();
    if is_count(&params) {
        return success(json!({ "count": matching.len().to_string() }));
    }
    success(json!({ "records": page(matching, &params)? }))
}

// ---------------------------------------------------------------------------
// Suppression lists
// ---------------------------------------------------------------------------

/// Split `ImportEmails` into (`Import`, `email`, `emails`).
fn suppression_action(action: &str) -> Option<(&str, &'static str, &'static str)> {
    for (suffix, field, plural) in [
        ("Emails", "email", "emails"),
        ("Domains", "domain", "domains"),
        ("Localparts", "localpart", "localparts"),
    ] {
        if let Some(verb) = action.strip_suffix(suffix) {
            return Some((verb, field, plural));
        }
    }
    None
}

async fn suppression(
    State(state): State<Shared>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Form(params): Form<Params>,
) -> Reply {
    authorize(&state, &headers, &params)?;
    let (verb, field, plural) =
        suppression_action(&action).ok_or_else(|| failure("Unknown method"))?;
    let mut store = state.store.write().await;
    let entries = store.suppressed.entry(field).or_default();
    tracing::info!(verb, field, "suppression list call");
    match verb {
        "Import" => {
            let values = indexed(&params, field);
            if values.is_empty() {
                return Err(failure(&format!("Missing parameter {field}")));
            }
            let mut imported = Vec::new();
            for value in values {
                if !entries.contains(&value) {
                    entries.push(value.clone());
                }
                imported.push(json!({ field: value }));
            }
            success(Value::Array(imported))
        }
        "Export" => {
            if is_count(&params) {
                return success(json!({ "count": entries.len().to_string() }));
            }
            let items: Vec<Value> = entries
                .iter()
                .map(|value| json!({ field: value, "source_type": "manual", "timestamp": CREATED_ON }))
                .collect();
            success(json!({ plural: page(items, &params)? }))
        }
        "Delete" => {
            let values = indexed(&params, field);
            let before = entries.len();
            entries.retain(|value| !values.contains(value));
            success(json!(entries.len() < before))
        }
        _ => Err(failure("Unknown method")),
    }
}
