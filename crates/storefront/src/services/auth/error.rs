//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Message shown inline when a sign-in is rejected.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] delicious_bites_core::EmailError),

    /// Email/credential pair not in the directory.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration without a display name.
    #[error("name is required")]
    MissingName,

    /// The signed-in identity could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
