//! Menu route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use delicious_bites_core::MenuItemId;

use crate::error::{AppError, Result};
use crate::models::MenuItem;
use crate::seed::CUISINES;
use crate::state::AppState;
use crate::stores::MenuQuery;

/// Menu listing response.
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub items: Vec<MenuItem>,
    pub count: usize,
    /// Still waiting on the initial load.
    pub loading: bool,
}

/// Filter values for the menu page.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub cuisines: Vec<&'static str>,
}

/// List menu items.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<MenuView> {
    let catalog = state.catalog().snapshot().await;
    let items: Vec<MenuItem> = catalog.query(&query).into_iter().cloned().collect();
    Json(MenuView {
        count: items.len(),
        items,
        loading: catalog.is_loading(),
    })
}

/// List category and cuisine filters.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<FilterOptions> {
    let catalog = state.catalog().snapshot().await;
    Json(FilterOptions {
        categories: catalog.categories().to_vec(),
        cuisines: CUISINES.to_vec(),
    })
}

/// Show one menu item.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItem>> {
    state
        .catalog()
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))
}
