//! Home page handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::content::{BlogQuery, Post};
use crate::models::MenuItem;
use crate::state::AppState;

const LATEST_POSTS: usize = 3;

/// Home page data.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub popular: Vec<MenuItem>,
    pub latest_posts: Vec<Post>,
}

/// Popular dishes and the newest blog posts.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let popular = state
        .catalog()
        .snapshot()
        .await
        .items()
        .iter()
        .filter(|item| item.is_popular)
        .cloned()
        .collect();
    let latest_posts = state
        .content()
        .posts(&BlogQuery::default())
        .into_iter()
        .take(LATEST_POSTS)
        .cloned()
        .collect();

    Json(HomeView {
        popular,
        latest_posts,
    })
}
