//! Integration tests for Delicious Bites.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p delicious-bites-integration-tests
//! ```
//!
//! Every test drives the storefront router in-process with
//! `tower::ServiceExt::oneshot`: no listener, no simulated delays, and
//! identity storage held in memory.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart and quote endpoints
//! - `storefront_checkout` - Checkout workflow, payment outcomes, tracking
//! - `storefront_access` - Sign-in, route guards and the admin dashboard

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use delicious_bites_storefront::config::LatencyConfig;
use delicious_bites_storefront::routes;
use delicious_bites_storefront::services::SimulatedGateway;
use delicious_bites_storefront::state::AppState;
use delicious_bites_storefront::storage::MemoryStorage;

/// Largest response body the helpers will read.
const BODY_LIMIT: usize = 1024 * 1024;

/// A response reduced to what the tests look at.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` when the body is empty or not JSON.
    pub body: Value,
}

impl TestResponse {
    /// `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// An initialized storefront with zero latency.
pub struct TestContext {
    pub state: AppState,
    pub app: Router,
}

impl TestContext {
    /// Storefront whose payments always succeed.
    pub async fn new() -> Self {
        Self::with_approval_rate(1.0).await
    }

    /// Storefront whose payments always fail.
    pub async fn declining() -> Self {
        Self::with_approval_rate(0.0).await
    }

    async fn with_approval_rate(rate: f64) -> Self {
        let latency = LatencyConfig::NONE;
        let gateway = SimulatedGateway::new(latency.payment).with_approval_rate(rate);
        let state = AppState::new(
            latency,
            Arc::new(MemoryStorage::new()),
            Arc::new(gateway),
        );
        state.initialize().await;
        let app = routes::app(state.clone());
        Self { state, app }
    }

    /// Send a request, with an optional JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the router fails.
    pub async fn send(&self, method: Method, uri: &str, json: Option<&Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match json {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|e| panic!("invalid request {uri}: {e}"));

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .unwrap_or_else(|e| panic!("unreadable body from {uri}: {e}"));
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// `POST uri` with a JSON body.
    pub async fn post(&self, uri: &str, json: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(json)).await
    }

    /// Sign in through `POST /login`.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    /// Add `quantity` of a menu item through `POST /cart/add`.
    pub async fn add_to_cart(&self, item_id: i64, quantity: u32) {
        for _ in 0..quantity {
            let response = self
                .post("/cart/add", &serde_json::json!({ "item_id": item_id }))
                .await;
            assert_eq!(response.status, StatusCode::OK, "add {item_id}: {:?}", response.body);
        }
    }
}
