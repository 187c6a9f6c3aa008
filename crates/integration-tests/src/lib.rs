//! Integration test support for the Shopfront storefront client.
//!
//! [`FakeApi`] serves the storefront REST API from memory on a random local
//! port. It records every request (method, path, bearer token) so tests can
//! assert on call order, and it can be told to fail a specific call.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use shopfront_storefront::AppContext;
use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::pages::Notifier;
use shopfront_storefront::storage::{KeyValueStore, MemoryStore};

pub use axum::http::StatusCode;

/// Build an unsigned token whose payload segment is `claims`.
#[must_use]
pub fn token_for(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// One request as seen by the fake API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: String,
    /// Path below `/api`, e.g. `/orders`.
    pub path: String,
    pub bearer: Option<String>,
    pub content_type: Option<String>,
}

impl Call {
    /// `"METHOD /path"`.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone)]
struct User {
    id: String,
    name: String,
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Default)]
struct FakeState {
    users: Vec<User>,
    sessions: HashMap<String, String>,
    products: Vec<Value>,
    carts: HashMap<String, Vec<(String, u32)>>,
    orders: HashMap<String, Vec<Value>>,
    calls: Vec<Call>,
    failures: HashMap<String, (StatusCode, Option<String>)>,
    login_token_override: Option<String>,
}

type Shared = Arc<Mutex<FakeState>>;

/// In-memory storefront REST API.
pub struct FakeApi {
    state: Shared,
    base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl FakeApi {
    /// Bind to a random local port and start serving.
    pub async fn start() -> Self {
        let state = Shared::default();
        let api = Router::new()
            .route("/auth/signup", post(signup))
            .route("/auth/login", post(login))
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", put(update_product).delete(delete_product))
            .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
            .route("/orders", get(list_orders).post(place_order))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());
        let app = Router::new().nest("/api", api);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{addr}/api"),
            handle,
        }
    }

    /// API base URL, ending in `/api`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Register an account directly. Returns the user ID.
    pub fn add_user(&self, name: &str, email: &str, password: &str, role: &str) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.state.lock().unwrap().users.push(User {
            id: id.clone(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        });
        id
    }

    /// Add a product to the catalog. Returns the product ID.
    pub fn add_product(&self, name: &str, description: &str, price: f64, stock: u32) -> String {
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.state.lock().unwrap().products.push(json!({
            "_id": id,
            "name": name,
            "description": description,
            "price": price,
            "stockQuantity": stock,
        }));
        id
    }

    #[must_use]
    pub fn products(&self) -> Vec<Value> {
        self.state.lock().unwrap().products.clone()
    }

    /// Every request received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// `"METHOD /path"` of every request received so far.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.calls().iter().map(Call::route).collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Fail the next `method path` request with `status` and an optional
    /// `{ "msg": ... }` body.
    pub fn fail_next(&self, method: &str, path: &str, status: StatusCode, msg: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(format!("{method} {path}"), (status, msg.map(String::from)));
    }

    /// Make `POST /auth/login` return `token` for valid credentials.
    pub fn override_login_token(&self, token: &str) {
        self.state.lock().unwrap().login_token_override = Some(token.to_string());
    }

    /// Number of lines in a user's server cart.
    #[must_use]
    pub fn cart_len(&self, user_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .carts
            .get(user_id)
            .map_or(0, Vec::len)
    }

    /// Orders placed by a user.
    #[must_use]
    pub fn orders(&self, user_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .orders
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// A context talking to this API, with in-memory storage.
    #[must_use]
    pub fn context(&self) -> (AppContext, Arc<MemoryStore>) {
        let storage = Arc::new(MemoryStore::new());
        (self.context_with(storage.clone()), storage)
    }

    /// A context talking to this API over the given storage.
    #[must_use]
    pub fn context_with(&self, storage: Arc<dyn KeyValueStore>) -> AppContext {
        let config = StorefrontConfig::with_api_base(&self.base_url, "/unused").unwrap();
        AppContext::new(config, storage).unwrap()
    }
}

/// Notifier that records notices and answers confirmations with a fixed reply.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<String>>,
    confirm_reply: bool,
    prompts: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier that answers yes to every confirmation.
    #[must_use]
    pub fn confirming() -> Self {
        Self {
            confirm_reply: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.notices.borrow().last().cloned()
    }

    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.confirm_reply
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "msg": msg }))).into_response()
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let call = Call {
        method: request.method().to_string(),
        path: request.uri().path().trim_start_matches("/api").to_string(),
        bearer: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    };

    let injected = {
        let mut state = state.lock().unwrap();
        let injected = state.failures.remove(&call.route());
        state.calls.push(call);
        injected
    };

    match injected {
        Some((status, Some(msg))) => message(status, &msg),
        Some((status, None)) => (status, Json(json!({}))).into_response(),
        None => next.run(request).await,
    }
}

/// Resolve the bearer token to a user, as the real API's auth middleware does.
fn authenticate(state: &FakeState, headers: &HeaderMap) -> Result<User, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "No token, authorization denied"))?;
    let email = state
        .sessions
        .get(token)
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Token is not valid"))?;
    state
        .users
        .iter()
        .find(|u| &u.email == email)
        .cloned()
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Token is not valid"))
}

fn authenticate_admin(state: &FakeState, headers: &HeaderMap) -> Result<User, Response> {
    let user = authenticate(state, headers)?;
    if user.role == "admin" {
        Ok(user)
    } else {
        Err(message(StatusCode::FORBIDDEN, "Access denied. Admins only."))
    }
}

async fn signup(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.users.iter().any(|u| u.email == email) {
        return message(StatusCode::BAD_REQUEST, "User already exists");
    }
    state.users.push(User {
        id: uuid::Uuid::new_v4().simple().to_string(),
        name: body["name"].as_str().unwrap_or_default().to_string(),
        email,
        password: body["password"].as_str().unwrap_or_default().to_string(),
        role: "customer".to_string(),
    });
    message(StatusCode::CREATED, "User registered successfully")
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .cloned()
    else {
        return message(StatusCode::BAD_REQUEST, "Invalid credentials");
    };

    let token = state.login_token_override.clone().unwrap_or_else(|| {
        token_for(&json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "role": user.role,
            "iat": unix_now(),
            "exp": unix_now() + 3600,
        }))
    });
    state.sessions.insert(token.clone(), user.email);
    Json(json!({ "token": token })).into_response()
}

async fn list_products(State(state): State<Shared>) -> Response {
    Json(Value::Array(state.lock().unwrap().products.clone())).into_response()
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(response) = authenticate_admin(&state, &headers) {
        return response;
    }
    body["_id"] = json!(uuid::Uuid::new_v4().simple().to_string());
    state.products.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(response) = authenticate_admin(&state, &headers) {
        return response;
    }
    let Some(product) = state.products.iter_mut().find(|p| p["_id"] == id) else {
        return message(StatusCode::NOT_FOUND, "Product not found");
    };
    for field in ["name", "description", "price", "stockQuantity"] {
        if let Some(value) = body.get(field) {
            product[field] = value.clone();
        }
    }
    Json(product.clone()).into_response()
}

async fn delete_product(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Err(response) = authenticate_admin(&state, &headers) {
        return response;
    }
    let before = state.products.len();
    state.products.retain(|p| p["_id"] != id);
    if state.products.len() == before {
        return message(StatusCode::NOT_FOUND, "Product not found");
    }
    message(StatusCode::OK, "Product removed")
}

fn populated_cart(state: &FakeState, user_id: &str) -> Value {
    let items: Vec<Value> = state
        .carts
        .get(user_id)
        .into_iter()
        .flatten()
        .filter_map(|(product_id, quantity)| {
            let product = state.products.iter().find(|p| p["_id"] == *product_id)?;
            Some(json!({ "productId": product, "quantity": quantity }))
        })
        .collect();
    json!({ "items": items })
}

async fn get_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    match authenticate(&state, &headers) {
        Ok(user) => Json(populated_cart(&state, &user.id)).into_response(),
        Err(response) => response,
    }
}

async fn add_to_cart(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let product_id = body["productId"].as_str().unwrap_or_default().to_string();
    let quantity = u32::try_from(body["quantity"].as_u64().unwrap_or(1)).unwrap_or(1);
    if !state.products.iter().any(|p| p["_id"] == product_id) {
        return message(StatusCode::NOT_FOUND, "Product not found");
    }

    let cart = state.carts.entry(user.id.clone()).or_default();
    match cart.iter_mut().find(|(id, _)| *id == product_id) {
        Some((_, existing)) => *existing += quantity,
        None => cart.push((product_id, quantity)),
    }
    Json(populated_cart(&state, &user.id)).into_response()
}

async fn clear_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    match authenticate(&state, &headers) {
        Ok(user) => {
            state.carts.remove(&user.id);
            message(StatusCode::OK, "Cart cleared")
        }
        Err(response) => response,
    }
}

async fn place_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let user = match authenticate(&state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let lines: Vec<Value> = body["products"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|line| {
            let product = state
                .products
                .iter()
                .find(|p| p["_id"] == line["product"])
                .map_or_else(|| line["product"].clone(), |p| json!({
                    "_id": p["_id"],
                    "name": p["name"],
                    "price": p["price"],
                }));
            json!({ "product": product, "quantity": line["quantity"] })
        })
        .collect();

    let order = json!({
        "_id": uuid::Uuid::new_v4().simple().to_string(),
        "user": user.id,
        "products": lines,
        "deliveryAddress": body["deliveryAddress"],
        "status": "pending",
        "createdAt": "2024-03-01T10:00:00.000Z",
    });
    state.orders.entry(user.id).or_default().push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    match authenticate(&state, &headers) {
        Ok(user) => Json(Value::Array(
            state.orders.get(&user.id).cloned().unwrap_or_default(),
        ))
        .into_response(),
        Err(response) => response,
    }
}
