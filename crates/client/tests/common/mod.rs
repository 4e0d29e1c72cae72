//! In-process fake of the museum REST API for integration tests.
//!
//! Binds an axum server to an ephemeral port and serves every collection
//! from an in-memory JSON store. The routing is deliberately loose (one
//! fallback handler dispatching on method and path segments) so that any
//! collection path works without registering it first.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Map, Value};

use museum_client::{ClientConfig, MemoryStorage, PortalContext, SessionStorage};

pub const ADMIN_EMAIL: &str = "admin@museum.test";
pub const STAFF_EMAIL: &str = "staff@museum.test";
pub const PASSWORD: &str = "secret123";
pub const STAFF_MUSEUM_ID: &str = "m-1";
pub const VISITOR_TOKEN: &str = "visitor-token";

/// Collections answered with a bare JSON array instead of a page object.
const BARE_COLLECTIONS: &[&str] = &["interaction"];

/// Collections answered with `data` and page counts side by side, unwrapped.
const FLAT_PAGE_COLLECTIONS: &[&str] = &["exhibitions"];

/// Collections whose status is a string rather than `isActive`/`isDeleted`.
const STRING_STATUS_COLLECTIONS: &[&str] = &["accounts"];

/// Query parameters that are not field filters.
const RESERVED_PARAMS: &[&str] = &["pageIndex", "pageSize", "includeDeleted", "search", "delayMs"];

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Store {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    tokens: Mutex<Vec<String>>,
    requests: Mutex<Vec<String>>,
    next_id: AtomicU64,
    list_failure: AtomicU16,
    ignore_include_deleted: AtomicBool,
}

impl Store {
    fn next_id(&self, collection: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{n}", collection.trim_end_matches('s'))
    }

    fn with_collection<R>(&self, name: &str, f: impl FnOnce(&mut Vec<Value>) -> R) -> R {
        let mut collections = self.collections.lock().unwrap();
        f(collections.entry(name.to_string()).or_default())
    }

    fn with_item<R>(
        &self,
        collection: &str,
        id: &str,
        f: impl FnOnce(&mut Map<String, Value>) -> R,
    ) -> Option<R> {
        self.with_collection(collection, |items| {
            items
                .iter_mut()
                .find(|item| id_of(item) == id)
                .and_then(Value::as_object_mut)
                .map(f)
        })
    }
}

fn id_of(item: &Value) -> String {
    match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn now() -> Value {
    Value::String(chrono::Utc::now().to_rfc3339())
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// A running fake API. The server lives as long as the test's runtime.
pub struct FakeApi {
    pub base_url: String,
    store: Arc<Store>,
}

impl FakeApi {
    pub async fn start() -> Self {
        let store = Arc::new(Store::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api server");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            store,
        }
    }

    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.base_url.clone());
        config.public_visitor_token = Some(VISITOR_TOKEN.to_string());
        config
    }

    /// A fresh, logged-out portal context over in-memory storage.
    pub fn context(&self) -> PortalContext {
        self.context_with(Arc::new(MemoryStorage::new()))
    }

    pub fn context_with(&self, storage: Arc<dyn SessionStorage>) -> PortalContext {
        PortalContext::new(&self.config(), storage).expect("portal context")
    }

    /// A portal context logged in as the admin user.
    pub async fn admin_context(&self) -> PortalContext {
        let context = self.context();
        context
            .session()
            .login(ADMIN_EMAIL, PASSWORD)
            .await
            .expect("admin login");
        context
    }

    /// Insert records into a collection, assigning ids where missing.
    pub fn seed(&self, collection: &str, records: Vec<Value>) {
        let records: Vec<Value> = records
            .into_iter()
            .map(|mut record| {
                if record.get("id").is_none() {
                    record["id"] = Value::String(self.store.next_id(collection));
                }
                record
            })
            .collect();
        self.store
            .with_collection(collection, |items| items.extend(records));
    }

    /// Current server-side copy of a record.
    pub fn record(&self, collection: &str, id: &str) -> Option<Value> {
        self.store
            .with_item(collection, id, |item| Value::Object(item.clone()))
    }

    /// `"METHOD /path"` for every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.store.requests.lock().unwrap().clone()
    }

    pub fn count_requests(&self, method: &str, path: &str) -> usize {
        let needle = format!("{method} {path}");
        self.requests().iter().filter(|r| **r == needle).count()
    }

    /// Make every list request fail with `status` (0 restores normal lists).
    pub fn fail_lists_with(&self, status: u16) {
        self.store.list_failure.store(status, Ordering::SeqCst);
    }

    /// Return deleted records regardless of `includeDeleted`.
    pub fn ignore_include_deleted(&self) {
        self.store.ignore_include_deleted.store(true, Ordering::SeqCst);
    }

    /// Forget every issued token, as if the server rotated its signing key.
    pub fn revoke_tokens(&self) {
        self.store.tokens.lock().unwrap().clear();
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

enum Caller {
    User,
    Visitor,
}

async fn handle(
    State(store): State<Arc<Store>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    store
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", method, path));

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    if let ("POST", ["auth", "login"]) = (method.as_str(), segments.as_slice()) {
        return login(&store, &body);
    }

    let caller = match authorize(&store, &headers) {
        Some(caller) => caller,
        None => return error(StatusCode::UNAUTHORIZED, "Unauthorized"),
    };
    if let Caller::Visitor = caller {
        let public_artifact = method == Method::GET
            && matches!(segments.as_slice(), ["artifacts", _]);
        if !public_artifact {
            return error(StatusCode::FORBIDDEN, "Forbidden");
        }
    }

    match (method.as_str(), segments.as_slice()) {
        ("GET", [collection]) => list(&store, collection, &params).await,
        ("POST", [collection]) => create(&store, collection, body),
        ("GET", [collection, id]) => match store.with_item(collection, id, |item| item.clone()) {
            Some(item) => ok(Value::Object(item), None),
            None => not_found(),
        },
        ("PUT", [collection, id]) => update(&store, collection, id, body),
        ("DELETE", [collection, id]) => {
            let string_status = STRING_STATUS_COLLECTIONS.contains(collection);
            transition(&store, collection, id, "Deleted", |item| {
                if string_status {
                    item.insert("status".into(), json!("Inactive"));
                } else {
                    item.insert("isDeleted".into(), json!(true));
                    item.insert("isActive".into(), json!(false));
                }
            })
        }
        ("PATCH", ["accounts", "active", id]) => transition(&store, "accounts", id, "Activated", |item| {
            item.insert("status".into(), json!("Active"));
        }),
        ("PATCH", ["accounts", id, "assign-museum", museum_id]) => {
            let museum_id = museum_id.to_string();
            transition(&store, "accounts", id, "Museum assigned", move |item| {
                item.insert("museumId".into(), Value::String(museum_id));
            })
        }
        ("PATCH", [collection, id, "activate"]) => transition(&store, collection, id, "Activated", |item| {
            item.remove("status");
            item.insert("isActive".into(), json!(true));
            item.insert("isDeleted".into(), json!(false));
        }),
        ("PATCH", [collection @ ("artifacts" | "display-positions"), id, "maintain"]) => {
            transition(&store, collection, id, "Under maintenance", |item| {
                item.insert("status".into(), json!("Maintenance"));
            })
        }
        _ => not_found(),
    }
}

fn authorize(store: &Store, headers: &HeaderMap) -> Option<Caller> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    if token == VISITOR_TOKEN {
        return Some(Caller::Visitor);
    }
    let known = store.tokens.lock().unwrap().iter().any(|t| t == token);
    known.then_some(Caller::User)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn login(store: &Store, body: &Value) -> Response {
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();

    let (id, role, museum_id) = match (email, password) {
        (ADMIN_EMAIL, PASSWORD) => ("u-admin", "Admin", Value::Null),
        (STAFF_EMAIL, PASSWORD) => ("u-staff", "Staff", json!(STAFF_MUSEUM_ID)),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"success": false, "message": "Invalid email or password"})),
            )
                .into_response()
        }
    };

    let exp = chrono::Utc::now().timestamp() + 3600;
    let claims = json!({
        "Id": id,
        "email": email,
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role": role,
        "MuseumId": museum_id,
        "exp": exp,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"fake-signing-key"),
    )
    .expect("sign token");
    store.tokens.lock().unwrap().push(token.clone());

    ok(json!({ "token": token }), Some("Login successful"))
}

async fn list(store: &Store, collection: &str, params: &HashMap<String, String>) -> Response {
    if let Some(ms) = params.get("delayMs").and_then(|v| v.parse::<u64>().ok()) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    let failure = store.list_failure.load(Ordering::SeqCst);
    if failure != 0 {
        let status = StatusCode::from_u16(failure).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error(status, "List unavailable");
    }

    let include_deleted = store.ignore_include_deleted.load(Ordering::SeqCst)
        || params.get("includeDeleted").is_some_and(|v| v == "true");
    let search = params.get("search").map(|s| s.to_lowercase());

    let matching: Vec<Value> = store.with_collection(collection, |items| {
        items
            .iter()
            .filter(|item| include_deleted || item.get("isDeleted") != Some(&json!(true)))
            .filter(|item| match &search {
                Some(term) => item
                    .as_object()
                    .into_iter()
                    .flat_map(|obj| obj.values())
                    .filter_map(Value::as_str)
                    .any(|v| v.to_lowercase().contains(term)),
                None => true,
            })
            .filter(|item| {
                params
                    .iter()
                    .filter(|(key, _)| !RESERVED_PARAMS.contains(&key.as_str()))
                    .all(|(key, value)| match item.get(key) {
                        Some(Value::String(s)) => s == value,
                        Some(other) => other.to_string() == *value,
                        None => false,
                    })
            })
            .cloned()
            .collect()
    });

    if BARE_COLLECTIONS.contains(&collection) {
        return ok(Value::Array(matching), None);
    }

    let page_index: usize = params
        .get("pageIndex")
        .and_then(|v| v.parse().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);
    let page_size: usize = params
        .get("pageSize")
        .and_then(|v| v.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(10);
    let total_items = matching.len();
    let items: Vec<Value> = matching
        .into_iter()
        .skip((page_index - 1) * page_size)
        .take(page_size)
        .collect();

    if FLAT_PAGE_COLLECTIONS.contains(&collection) {
        return Json(json!({
            "data": items,
            "pageIndex": page_index,
            "pageSize": page_size,
            "totalItems": total_items,
        }))
        .into_response();
    }

    ok(
        json!({
            "items": items,
            "pageIndex": page_index,
            "pageSize": page_size,
            "totalItems": total_items,
            "totalPages": total_items.div_ceil(page_size),
        }),
        None,
    )
}

fn create(store: &Store, collection: &str, body: Value) -> Response {
    let Value::Object(mut record) = body else {
        return error(StatusCode::BAD_REQUEST, "Body must be a JSON object");
    };

    if let Some(name) = record.get("name").and_then(Value::as_str) {
        let taken = store.with_collection(collection, |items| {
            items
                .iter()
                .any(|item| item.get("name").and_then(Value::as_str) == Some(name))
        });
        if taken {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "message": "Validation failed",
                    "errors": { "name": ["Name already exists"] },
                })),
            )
                .into_response();
        }
    }

    record.remove("password");
    record.insert("id".into(), Value::String(store.next_id(collection)));
    record.insert("createdAt".into(), now());
    if STRING_STATUS_COLLECTIONS.contains(&collection) {
        record.insert("status".into(), json!("Active"));
    } else {
        record.insert("isActive".into(), json!(true));
        record.insert("isDeleted".into(), json!(false));
    }

    let record = Value::Object(record);
    store.with_collection(collection, |items| items.push(record.clone()));
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Created", "data": record})),
    )
        .into_response()
}

fn update(store: &Store, collection: &str, id: &str, body: Value) -> Response {
    let Value::Object(changes) = body else {
        return error(StatusCode::BAD_REQUEST, "Body must be a JSON object");
    };
    let updated = store.with_item(collection, id, |item| {
        for (key, value) in changes {
            item.insert(key, value);
        }
        item.insert("updatedAt".into(), now());
        Value::Object(item.clone())
    });
    match updated {
        Some(item) => ok(item, Some("Updated")),
        None => not_found(),
    }
}

fn transition(
    store: &Store,
    collection: &str,
    id: &str,
    message: &str,
    apply: impl FnOnce(&mut Map<String, Value>),
) -> Response {
    let applied = store.with_item(collection, id, |item| {
        apply(item);
        item.insert("updatedAt".into(), now());
    });
    match applied {
        Some(()) => ok(Value::Null, Some(message)),
        None => not_found(),
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

fn ok(data: Value, message: Option<&str>) -> Response {
    Json(json!({ "success": true, "message": message, "data": data })).into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "message": message, "statusCode": status.as_u16() })),
    )
        .into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}
