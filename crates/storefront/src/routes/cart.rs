//! Cart route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use delicious_bites_core::{MenuItemId, Money};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::stores::{Cart, CartLine};

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: Money,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
        }
    }
}

/// Add or remove request body.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub item_id: MenuItemId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub item_id: MenuItemId,
    pub quantity: i64,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&state.cart().snapshot().await))
}

/// Add one of a menu item.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<CartView>> {
    let item = state
        .catalog()
        .get(request.item_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", request.item_id)))?;

    let cart = state.cart().add_item(&item).await;
    let item_id = item.id.to_string();
    add_breadcrumb(
        "cart",
        "Added item",
        Some(&[("item_id", item_id.as_str()), ("name", item.name.as_str())]),
    );
    Ok(Json(CartView::from(&cart)))
}

/// Set a line quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Json<CartView> {
    let cart = state
        .cart()
        .update_quantity(request.item_id, request.quantity)
        .await;
    Json(CartView::from(&cart))
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Json<CartView> {
    let cart = state.cart().remove_item(request.item_id).await;
    let item_id = request.item_id.to_string();
    add_breadcrumb("cart", "Removed item", Some(&[("item_id", item_id.as_str())]));
    Json(CartView::from(&cart))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    Json(CartView::from(&state.cart().clear().await))
}
