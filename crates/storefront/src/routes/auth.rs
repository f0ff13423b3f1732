//! Authentication route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::models::Identity;
use crate::state::AppState;

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in state for the login page.
#[derive(Debug, Serialize)]
pub struct LoginState {
    pub user: Option<Identity>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Current sign-in state, including the last failure message.
#[instrument(skip(state))]
pub async fn login_state(State(state): State<AppState>) -> Json<LoginState> {
    let auth = state.identity().snapshot().await;
    Json(LoginState {
        user: auth.user,
        loading: auth.loading,
        error: auth.error,
    })
}

/// Handle login form submission.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<Identity>> {
    let password = SecretString::from(form.password);
    let identity = state.auth().login(&form.email, &password).await?;
    set_sentry_user(&identity.id, Some(identity.email.as_str()));
    Ok(Json(identity))
}

/// Handle registration form submission.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password);
    let identity = state
        .auth()
        .register(&form.name, &form.email, &password)
        .await?;
    set_sentry_user(&identity.id, Some(identity.email.as_str()));
    Ok((StatusCode::CREATED, Json(identity)).into_response())
}

/// Handle logout.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Response> {
    state.auth().logout().await?;
    clear_sentry_user();
    Ok(Redirect::to("/").into_response())
}
