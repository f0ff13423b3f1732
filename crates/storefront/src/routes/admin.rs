//! Admin dashboard route handlers (require an admin identity).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use delicious_bites_core::{MenuItemId, Money, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{MenuItem, MenuItemDraft, Order};
use crate::state::AppState;
use crate::stores::LedgerStats;

/// Dashboard data.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub stats: LedgerStats,
    pub orders: Vec<Order>,
    pub menu: Vec<MenuItem>,
}

/// Status change request body.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

fn validate_draft(draft: &MenuItemDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if draft.price.is_negative() {
        return Err(AppError::BadRequest("price must not be negative".to_string()));
    }
    if draft.price > Money::MAX_PRICE {
        return Err(AppError::BadRequest(format!(
            "price must not exceed {}",
            Money::MAX_PRICE
        )));
    }
    Ok(())
}

/// Stats, every order, and the full menu.
#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Json<DashboardView> {
    let ledger = state.orders().snapshot().await;
    let catalog = state.catalog().snapshot().await;
    Json(DashboardView {
        stats: ledger.stats(),
        orders: ledger.orders().to_vec(),
        menu: catalog.items().to_vec(),
    })
}

/// Add a menu item.
#[instrument(skip(state, _admin, draft), fields(name = %draft.name))]
pub async fn create_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(draft): Json<MenuItemDraft>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    validate_draft(&draft)?;
    let item = state.catalog().add_item(draft).await;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace a menu item.
#[instrument(skip(state, _admin, draft))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<MenuItemId>,
    Json(draft): Json<MenuItemDraft>,
) -> Result<Json<MenuItem>> {
    validate_draft(&draft)?;
    let item = draft.into_item(id);
    if state.catalog().update_item(item.clone()).await {
        Ok(Json(item))
    } else {
        Err(AppError::NotFound(format!("menu item {id}")))
    }
}

/// Delete a menu item.
#[instrument(skip(state, _admin))]
pub async fn delete_item(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<MenuItemId>,
) -> Result<StatusCode> {
    if state.catalog().delete_item(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("menu item {id}")))
    }
}

/// Move an order forward.
#[instrument(skip(state, _admin))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Order>> {
    state
        .orders()
        .update_status(id, request.status)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
