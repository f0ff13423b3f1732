//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::services::auth::{AuthError, INVALID_CREDENTIALS_MESSAGE};
use crate::services::checkout::CheckoutError;
use crate::services::contact::ContactError;
use crate::services::payment::PaymentError;
use crate::storage::StorageError;
use crate::stores::LedgerError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout attempt rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order status change rejected.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Contact form rejected.
    #[error("Contact error: {0}")]
    Contact(#[from] ContactError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) | Self::Internal(_) | Self::Auth(AuthError::Storage(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Auth(AuthError::MissingName | AuthError::InvalidEmail(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Checkout(CheckoutError::EmptyCart | CheckoutError::InProgress)
            | Self::Ledger(_) => StatusCode::CONFLICT,
            Self::Checkout(CheckoutError::Payment(PaymentError::Declined)) => {
                StatusCode::PAYMENT_REQUIRED
            }
            Self::Checkout(CheckoutError::InvalidForm { .. } | CheckoutError::Payment(_))
            | Self::Contact(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Internal(_) | Self::Auth(AuthError::Storage(_)) => {
                "Internal server error".to_string()
            }
            Self::Auth(AuthError::InvalidCredentials) => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::Auth(AuthError::InvalidEmail(_)) => "Invalid email address".to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Checkout(err) => err.to_string(),
            Self::Ledger(err) => err.to_string(),
            Self::Contact(err) => err.to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Offending form fields, for validation errors.
    fn fields(&self) -> Option<Value> {
        match self {
            Self::Checkout(CheckoutError::InvalidForm { fields }) => serde_json::to_value(fields).ok(),
            Self::Checkout(CheckoutError::Payment(PaymentError::Card(err))) => {
                serde_json::to_value(&err.fields).ok()
            }
            Self::Contact(err) => serde_json::to_value(&err.fields).ok(),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let mut body = json!({ "error": self.public_message() });
        if let Some(fields) = self.fields() {
            body["fields"] = fields;
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a shopper action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("item_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
