//! HTTP route handlers for the storefront.
//!
//! All handlers speak JSON.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Popular dishes and latest posts
//! GET  /health                 - Health check
//!
//! # Menu
//! GET  /menu                   - Menu items (search, category, dietary, cuisine, sort)
//! GET  /menu/categories        - Category and cuisine filter values
//! GET  /menu/{id}              - Single menu item
//!
//! # Cart
//! GET  /cart                   - Cart lines and subtotal
//! POST /cart/add               - Add one of an item
//! POST /cart/update            - Set a line quantity (<= 0 removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Checkout page data (redirects to /cart when empty)
//! GET  /checkout/quote         - Price breakdown for a delivery type
//! POST /checkout               - Pay and place the order
//!
//! # Auth
//! GET  /login                  - Current sign-in state
//! POST /login                  - Sign in
//! POST /register               - Register and sign in
//! POST /logout                 - Sign out
//!
//! # Content
//! GET  /blog                   - Posts (search, category)
//! GET  /blog/{id}              - Single post with related posts
//! POST /contact                - Contact form
//!
//! # Account (requires identity)
//! GET  /profile                - Identity and own orders
//! GET  /order-tracking         - Tracking for ?orderId= or the latest order
//!
//! # Admin (requires admin)
//! GET    /admin                     - Dashboard: stats, orders, menu
//! POST   /admin/menu                - Add a menu item
//! PUT    /admin/menu/{id}           - Replace a menu item
//! DELETE /admin/menu/{id}           - Delete a menu item
//! POST   /admin/orders/{id}/status  - Move an order forward
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod menu;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/categories", get(menu::categories))
        .route("/{id}", get(menu::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::place_order))
        .route("/quote", get(checkout::quote))
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::index))
        .route("/{id}", get(blog::show))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/menu", post(admin::create_item))
        .route(
            "/menu/{id}",
            put(admin::update_item).delete(admin::delete_item),
        )
        .route("/orders/{id}/status", post(admin::update_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/menu", menu_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/login", get(auth::login_state).post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .nest("/blog", blog_routes())
        .route("/contact", post(contact::submit))
        .route("/profile", get(account::profile))
        .route("/order-tracking", get(account::order_tracking))
        .nest("/admin", admin_routes())
}

/// Build the application router with tracing, ready to serve.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::config::LatencyConfig;
    use crate::services::SimulatedGateway;
    use crate::storage::{MemoryStorage, UndeletableStorage};

    async fn test_app() -> Router {
        let state = AppState::new(
            LatencyConfig::NONE,
            Arc::new(MemoryStorage::new()),
            Arc::new(SimulatedGateway::new(LatencyConfig::NONE.payment)),
        );
        state.initialize().await;
        app(state)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(test_app().await, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guarded_routes_redirect_to_login() {
        let app = test_app().await;
        for uri in ["/profile", "/order-tracking", "/admin"] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.headers()[header::LOCATION], "/login", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_menu_categories() {
        let response = get(test_app().await, "/menu/categories").await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["categories"][0], "All");
        assert_eq!(body["cuisines"][0], "All");
    }

    #[tokio::test]
    async fn test_logout_reports_storage_failure() {
        let state = AppState::new(
            LatencyConfig::NONE,
            Arc::new(UndeletableStorage::default()),
            Arc::new(SimulatedGateway::new(LatencyConfig::NONE.payment)),
        );
        state.initialize().await;
        state
            .auth()
            .login("user@example.com", &secrecy::SecretString::from("user123"))
            .await
            .unwrap();

        let response = app(state.clone())
            .oneshot(Request::post("/logout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(state.identity().current().await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = get(test_app().await, "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
