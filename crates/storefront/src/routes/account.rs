//! Account route handlers (require a signed-in identity).

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use delicious_bites_core::OrderId;

use crate::error::{AppError, Result};
use crate::middleware::RequireIdentity;
use crate::models::{Identity, Order};
use crate::state::AppState;
use crate::tracking::{TrackingView, select_order};

/// Profile page data.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user: Identity,
    /// Orders placed with the identity's email, most recent first.
    pub orders: Vec<Order>,
}

/// Tracking page query.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TrackingQuery {
    #[serde(rename = "orderId")]
    pub order_id: Option<OrderId>,
}

/// Identity and own order history.
#[instrument(skip(state, identity), fields(user_id = %identity.id))]
pub async fn profile(
    State(state): State<AppState>,
    RequireIdentity(identity): RequireIdentity,
) -> Json<ProfileView> {
    let orders = state.orders().orders_for(&identity.email).await;
    Json(ProfileView {
        user: identity,
        orders,
    })
}

/// Tracking for the requested order, or the most recent one.
#[instrument(skip(state, _identity))]
pub async fn order_tracking(
    State(state): State<AppState>,
    RequireIdentity(_identity): RequireIdentity,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<TrackingView>> {
    let ledger = state.orders().snapshot().await;
    let order = select_order(ledger.orders(), query.order_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("order".to_string()))?;
    Ok(Json(TrackingView::new(order)))
}
