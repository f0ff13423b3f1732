//! Identity commands.
//!
//! # Environment Variables
//!
//! - `BITES_PASSWORD` - Password for `login`/`register`; read from stdin if unset

use std::io::BufRead;

use secrecy::SecretString;
use thiserror::Error;

use delicious_bites_storefront::state::AppState;

/// Errors reading the password.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Stdin could not be read.
    #[error("Failed to read password from stdin: {0}")]
    Io(#[from] std::io::Error),

    /// Neither the environment nor stdin supplied a password.
    #[error("No password given (set BITES_PASSWORD or pipe it on stdin)")]
    Missing,
}

fn read_password() -> Result<SecretString, PasswordError> {
    if let Ok(password) = std::env::var("BITES_PASSWORD") {
        return Ok(SecretString::from(password));
    }

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(PasswordError::Missing);
    }
    Ok(SecretString::from(password.to_owned()))
}

/// Sign in with the demo credentials.
///
/// # Errors
///
/// Returns an error if the password cannot be read, the credentials are
/// rejected, or the identity cannot be persisted.
pub async fn login(state: &AppState, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let password = read_password()?;
    let identity = state.auth().login(email, &password).await?;
    tracing::info!("Signed in as {} <{}> ({})", identity.name, identity.email, identity.role);
    Ok(())
}

/// Create an account.
///
/// # Errors
///
/// Returns an error if the name or email is invalid, or the identity cannot be persisted.
pub async fn register(
    state: &AppState,
    name: &str,
    email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = read_password()?;
    let identity = state.auth().register(name, email, &password).await?;
    tracing::info!("Registered {} <{}> (id {})", identity.name, identity.email, identity.id);
    Ok(())
}

/// Forget the persisted identity.
///
/// # Errors
///
/// Returns an error if the persisted identity cannot be removed.
pub async fn logout(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    state.auth().logout().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Log the persisted identity.
pub async fn whoami(state: &AppState) {
    match state.identity().current().await {
        Some(identity) => tracing::info!(
            "{} <{}> ({}, id {})",
            identity.name,
            identity.email,
            identity.role,
            identity.id
        ),
        None => tracing::info!("Not signed in"),
    }
}
