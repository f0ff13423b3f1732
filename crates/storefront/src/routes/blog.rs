//! Blog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::instrument;

use delicious_bites_core::BlogPostId;

use crate::content::{BLOG_CATEGORIES, BlogQuery, Post};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Blog index data.
#[derive(Debug, Serialize)]
pub struct BlogIndexView {
    pub posts: Vec<Post>,
    pub categories: &'static [&'static str],
}

/// Single post data.
#[derive(Debug, Serialize)]
pub struct BlogPostView {
    pub post: Post,
    pub related: Vec<Post>,
}

/// Blog index.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Json<BlogIndexView> {
    let posts = state.content().posts(&query).into_iter().cloned().collect();
    Json(BlogIndexView {
        posts,
        categories: BLOG_CATEGORIES,
    })
}

/// Single post.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<BlogPostId>,
) -> Result<Json<BlogPostView>> {
    let content = state.content();
    let post = content
        .post(id)
        .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;
    Ok(Json(BlogPostView {
        related: content.related(post).into_iter().cloned().collect(),
        post: post.clone(),
    }))
}
