use crate::core::clock::Clock;
use crate::core::errors::ProxyError;
use crate::core::models::entity::Entity;
use crate::core::models::method::{Kwargs, Method};
use crate::infrastructure::store::in_memory::InMemoryDocumentStore;
use crate::infrastructure::store::{Document, DocumentStore, StoredDocument, UpdateOutcome};
use crate::infrastructure::upstream::UpstreamClient;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Scripted upstream. Unscripted methods answer `{"seq": n}` with an
/// increasing counter so successive fetches are distinguishable.
/// Responses are wrapped as `{"result": ...}` and unwrapped by `convert`.
#[derive(Clone, Default)]
pub struct FakeUpstream {
    responses: Arc<Mutex<HashMap<Method, Value>>>,
    calls: Arc<Mutex<Vec<(Method, Kwargs)>>>,
    failing: Arc<AtomicBool>,
    seq: Arc<AtomicU64>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, data: Value) {
        self.responses.lock().unwrap().insert(method, data);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self, method: Method) -> usize {
        self.calls.lock().unwrap().iter().filter(|(m, _)| *m == method).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_kwargs(&self, method: Method) -> Option<Kwargs> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(m, _)| *m == method)
            .map(|(_, k)| k.clone())
    }
}

#[async_trait]
impl UpstreamClient for FakeUpstream {
    async fn invoke(&self, method: Method, kwargs: &Kwargs) -> Result<Value, ProxyError> {
        self.calls.lock().unwrap().push((method, kwargs.clone()));
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProxyError::UpstreamRequest("connection refused".to_string()));
        }
        let n = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let data = self
            .responses
            .lock()
            .unwrap()
            .get(&method)
            .cloned()
            .unwrap_or_else(|| json!({ "seq": n }));
        Ok(json!({ "result": data }))
    }

    fn convert(&self, _method: Method, raw: Value) -> Value {
        match raw {
            Value::Object(mut body) if body.contains_key("result") => body.remove("result").unwrap_or(Value::Null),
            other => other,
        }
    }
}

/// In-memory store that counts every operation and can be switched to fail.
#[derive(Clone, Default)]
pub struct RecordingStore {
    pub inner: InMemoryDocumentStore,
    ops: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn docs(&self, partition: Entity) -> Vec<StoredDocument> {
        self.inner.find_many(partition, &Document::new()).await.unwrap()
    }

    fn enter(&self) -> Result<(), ProxyError> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProxyError::StorageError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn find_one(&self, partition: Entity, query: &Document) -> Result<Option<StoredDocument>, ProxyError> {
        self.enter()?;
        self.inner.find_one(partition, query).await
    }

    async fn find_many(&self, partition: Entity, query: &Document) -> Result<Vec<StoredDocument>, ProxyError> {
        self.enter()?;
        self.inner.find_many(partition, query).await
    }

    async fn delete_one(&self, partition: Entity, id: Uuid) -> Result<bool, ProxyError> {
        self.enter()?;
        self.inner.delete_one(partition, id).await
    }

    async fn delete_many(&self, partition: Entity, query: &Document) -> Result<u64, ProxyError> {
        self.enter()?;
        self.inner.delete_many(partition, query).await
    }

    async fn update_one(
        &self,
        partition: Entity,
        query: &Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, ProxyError> {
        self.enter()?;
        self.inner.update_one(partition, query, fields, upsert).await
    }

    async fn ping(&self) -> Result<(), ProxyError> {
        self.enter()
    }
}

#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn kwargs(value: Value) -> Kwargs {
    match value {
        Value::Object(map) => map,
        _ => Kwargs::new(),
    }
}

pub const TEST_API_KEY: &str = "test-key";

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Local stand-in for the Splitwise REST API.
pub async fn spawn_fake_splitwise() -> String {
    use axum::extract::{Json, Path, Query};
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::{get, post};

    async fn current_user(headers: HeaderMap) -> (StatusCode, Json<Value>) {
        let expected = format!("Bearer {}", TEST_API_KEY);
        if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid API Request: you are not logged in" })),
            );
        }
        (
            StatusCode::OK,
            Json(json!({ "user": { "id": 10, "first_name": "Ann", "last_name": "Lee" } })),
        )
    }

    async fn groups() -> Json<Value> {
        Json(json!({ "groups": [
            { "id": 1, "name": "Flat", "members": [] },
            { "id": 2, "name": "Trip", "members": [
                { "id": 10, "first_name": "Ann", "last_name": "Lee" },
                { "id": 11, "first_name": "Bo", "last_name": "Kim" }
            ]}
        ]}))
    }

    async fn group(Path(id): Path<i64>) -> Json<Value> {
        Json(json!({ "group": { "id": id } }))
    }

    async fn expenses() -> Json<Value> {
        Json(json!({ "expenses": [
            { "id": 1, "group_id": 2, "cost": "30.00", "date": "2025-10-03T10:00:00Z",
              "category": { "id": 12, "name": "Groceries" } },
            { "id": 2, "group_id": 2, "cost": "10.00", "date": "2025-10-20T00:00:00Z",
              "category": { "id": 31, "name": "Taxi" } },
            { "id": 3, "group_id": 2, "cost": "99.00", "date": "2025-11-01T00:00:00Z",
              "category": { "id": 12, "name": "Groceries" } },
            { "id": 4, "group_id": 3, "cost": "5.00", "date": "2025-10-05T00:00:00Z" }
        ]}))
    }

    async fn notifications(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({ "notifications": params }))
    }

    async fn create_expense(Json(body): Json<Value>) -> Json<Value> {
        if body.get("cost").is_none() {
            return Json(json!({ "expenses": [], "errors": { "base": ["Cost is required"] } }));
        }
        Json(json!({ "expenses": [body] }))
    }

    async fn delete_expense(Path(_id): Path<i64>) -> Json<Value> {
        Json(json!({ "success": true }))
    }

    async fn friends() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    async fn categories() -> &'static str {
        "not json"
    }

    let app = axum::Router::new()
        .route("/get_current_user", get(current_user))
        .route("/get_groups", get(groups))
        .route("/get_group/{id}", get(group))
        .route("/get_expenses", get(expenses))
        .route("/get_notifications", get(notifications))
        .route("/get_friends", get(friends))
        .route("/get_categories", get(categories))
        .route("/create_expense", post(create_expense))
        .route("/delete_expense/{id}", post(delete_expense));
    serve(app).await
}
