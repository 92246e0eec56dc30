//! Integration tests for the sign-shop admin.
//!
//! Tests run the real [`signshop_admin`] client against [`MockBackend`], an
//! in-process axum server on `127.0.0.1:0` that serves canned responses and
//! records every request it receives.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p signshop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use signshop_admin::{ApiClient, Credentials};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Token the mock backend accepts.
pub const TEST_TOKEN: &str = "t3st-T0ken.9xQ";

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Canned data and failure switches for [`MockBackend`].
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Products by id, in the backend's record shape.
    pub products: HashMap<i32, Value>,
    pub categories: Value,
    /// Coupon responses by code.
    pub coupons: HashMap<String, Value>,
    pub customers: Value,
    /// When set, `PUT /api/product/{id}` fails with this status and message.
    pub update_failure: Option<(StatusCode, String)>,
    /// When set, `POST /api/quick-add` fails with this status and message.
    pub quick_add_failure: Option<(StatusCode, String)>,
    /// When set, `POST /api/order/create` fails with this status and message.
    pub order_failure: Option<(StatusCode, String)>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            products: HashMap::from([(7, sample_product())]),
            categories: sample_categories(),
            coupons: HashMap::from([(
                "EID10".to_string(),
                json!({
                    "totalPrice": 1000,
                    "discountedPrice": 900,
                    "coupon": {"couponId": 4, "code": "EID10"}
                }),
            )]),
            customers: sample_customers(),
            update_failure: None,
            quick_add_failure: None,
            order_failure: None,
        }
    }
}

#[derive(Debug)]
struct MockState {
    config: MockConfig,
    requests: Mutex<Vec<RecordedRequest>>,
    next_customer_id: Mutex<i32>,
    next_order_id: Mutex<i32>,
}

impl MockState {
    fn record(
        &self,
        method: Method,
        path: String,
        query: HashMap<String, String>,
        headers: &HeaderMap,
        body: &Bytes,
    ) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = serde_json::from_slice(body).ok();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                path,
                query,
                authorization,
                body,
            });
    }
}

/// An in-process backend listening on an ephemeral local port.
pub struct MockBackend {
    pub base_url: Url,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockBackend {
    /// Start with the default sample data.
    pub async fn start() -> Self {
        Self::with_config(MockConfig::default()).await
    }

    /// Start with custom data.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind; this is test support code.
    #[allow(clippy::expect_used)]
    pub async fn with_config(config: MockConfig) -> Self {
        let state = Arc::new(MockState {
            config,
            requests: Mutex::new(Vec::new()),
            next_customer_id: Mutex::new(100),
            next_order_id: Mutex::new(500),
        });

        let app = Router::new()
            .route("/api/product/{id}", get(get_product).put(update_product))
            .route("/api/product-category", get(list_categories))
            .route("/api/coupon", get(lookup_coupon))
            .route("/api/quick-add", post(quick_add))
            .route("/api/customer", get(list_customers))
            .route("/api/order/create", post(create_order))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}")).expect("mock backend URL");
        Self {
            base_url,
            state,
            task,
        }
    }

    /// A client pointed at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built; this is test support code.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn client(&self) -> ApiClient {
        ApiClient::with_base_url(self.base_url.clone(), Duration::from_secs(5))
            .expect("build API client")
    }

    /// Credentials the backend accepts.
    #[must_use]
    pub fn credentials() -> Credentials {
        Credentials::bearer(TEST_TOKEN)
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests matching `method` and `path`.
    #[must_use]
    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == *method && r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// =============================================================================
// Handlers
// =============================================================================

type Shared = State<Arc<MockState>>;

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TEST_TOKEN}"))
}

async fn get_product(State(state): Shared, Path(id): Path<i32>, headers: HeaderMap) -> Response {
    state.record(
        Method::GET,
        format!("/api/product/{id}"),
        HashMap::new(),
        &headers,
        &Bytes::new(),
    );
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    match state.config.products.get(&id) {
        Some(product) => Json(json!({ "data": { "product": product } })).into_response(),
        None => message(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn update_product(
    State(state): Shared,
    Path(id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.record(
        Method::PUT,
        format!("/api/product/{id}"),
        HashMap::new(),
        &headers,
        &body,
    );
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if let Some((status, text)) = &state.config.update_failure {
        return message(*status, text);
    }
    if !state.config.products.contains_key(&id) {
        return message(StatusCode::NOT_FOUND, "Product not found");
    }
    message(StatusCode::OK, "Product updated successfully.")
}

async fn list_categories(State(state): Shared, headers: HeaderMap) -> Response {
    state.record(
        Method::GET,
        "/api/product-category".to_string(),
        HashMap::new(),
        &headers,
        &Bytes::new(),
    );
    Json(json!({ "data": { "categories": state.config.categories } })).into_response()
}

async fn lookup_coupon(
    State(state): Shared,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let code = query.get("code").cloned().unwrap_or_default();
    state.record(
        Method::GET,
        "/api/coupon".to_string(),
        query,
        &headers,
        &Bytes::new(),
    );
    match state.config.coupons.get(&code) {
        Some(quote) => Json(json!({ "data": quote })).into_response(),
        None => message(StatusCode::NOT_FOUND, "Coupon not found"),
    }
}

async fn quick_add(State(state): Shared, headers: HeaderMap, body: Bytes) -> Response {
    state.record(
        Method::POST,
        "/api/quick-add".to_string(),
        HashMap::new(),
        &headers,
        &body,
    );
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if let Some((status, text)) = &state.config.quick_add_failure {
        return message(*status, text);
    }

    let request: Value = serde_json::from_slice(&body).unwrap_or_default();
    let customer_id = {
        let mut next = state
            .next_customer_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *next += 1;
        *next
    };
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Customer created",
            "data": {
                "customer": {
                    "customerId": customer_id,
                    "name": request.get("name"),
                    "phone": request.get("phone"),
                }
            }
        })),
    )
        .into_response()
}

async fn list_customers(State(state): Shared, headers: HeaderMap) -> Response {
    state.record(
        Method::GET,
        "/api/customer".to_string(),
        HashMap::new(),
        &headers,
        &Bytes::new(),
    );
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(json!({ "data": { "customers": state.config.customers } })).into_response()
}

async fn create_order(State(state): Shared, headers: HeaderMap, body: Bytes) -> Response {
    state.record(
        Method::POST,
        "/api/order/create".to_string(),
        HashMap::new(),
        &headers,
        &body,
    );
    if !authorized(&headers) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    if let Some((status, text)) = &state.config.order_failure {
        return message(*status, text);
    }

    let order_id = {
        let mut next = state
            .next_order_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *next += 1;
        *next
    };
    (
        StatusCode::CREATED,
        Json(json!({
            "status": 201,
            "message": "Order created",
            "data": { "order": { "orderId": order_id } }
        })),
    )
        .into_response()
}

// =============================================================================
// Sample data
// =============================================================================

/// Customers 12 (Rahim Uddin, with email and address) and 13 (Karim Ahmed).
#[must_use]
pub fn sample_customers() -> Value {
    json!([
        {
            "customerId": 12,
            "name": "Rahim Uddin",
            "phone": "01711 223344",
            "email": "rahim@example.com",
            "billingAddress": "House 4, Road 2, Dhaka"
        },
        {"customerId": 13, "name": "Karim Ahmed", "phone": "+880-1811-000000", "email": null}
    ])
}

/// Categories: "Banners" (1) with sub-category "PVC Banners" (10), and
/// "Stickers" (2).
#[must_use]
pub fn sample_categories() -> Value {
    json!([
        {"categoryId": 1, "name": "Banners", "parentCategoryId": null},
        {"categoryId": 2, "name": "Stickers", "parentCategoryId": null},
        {"categoryId": 10, "name": "PVC Banners", "parentCategoryId": 1}
    ])
}

/// Product 7: a square-feet PVC banner with one "Finish" variation and one
/// priced variant.
#[must_use]
pub fn sample_product() -> Value {
    json!({
        "productId": 7,
        "name": "PVC Banner",
        "description": "Outdoor PVC banner",
        "sku": "BN-007",
        "basePrice": "35.00",
        "minOrderQuantity": 1,
        "pricingType": "square-feet",
        "isActive": true,
        "categoryId": 10,
        "discountStart": null,
        "discountEnd": null,
        "maxDiscountPercentage": null,
        "tags": [{"tag": "banner"}],
        "attributes": [
            {"attributeId": 3, "property": "Material", "description": "PVC"}
        ],
        "variations": [{
            "variationId": 5,
            "name": "Finish",
            "unit": "",
            "variationItems": [
                {"variationItemId": 50, "value": "Matte"},
                {"variationItemId": 51, "value": "Gloss"}
            ]
        }],
        "variants": [{
            "productVariantId": 70,
            "additionalPrice": 5,
            "variantDetails": [{
                "productVariantDetailId": 700,
                "variationItem": {"value": "Gloss", "variation": {"name": "Finish"}}
            }]
        }],
        "images": [
            {"imageId": 9, "imageName": "pvc-front.jpg"},
            {"imageId": 11, "imageName": "pvc-back.jpg"}
        ]
    })
}
