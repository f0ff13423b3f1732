//! Subcommand implementations.

pub mod account;
pub mod menu;
pub mod quote;

use std::sync::Arc;

use delicious_bites_storefront::config::{LatencyConfig, StorefrontConfig};
use delicious_bites_storefront::services::SimulatedGateway;
use delicious_bites_storefront::state::AppState;
use delicious_bites_storefront::storage::FileStorage;

/// Build loaded stores over the configured storage directory.
///
/// Nothing is simulated remotely here, so every delay is zero.
///
/// # Errors
///
/// Returns an error if the environment configuration is invalid.
pub async fn open_state() -> Result<AppState, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    tracing::debug!(storage_dir = %config.storage_dir.display(), "Opening storage");

    let storage = Arc::new(FileStorage::new(config.storage_dir));
    let gateway = Arc::new(SimulatedGateway::new(LatencyConfig::NONE.payment));
    let state = AppState::new(LatencyConfig::NONE, storage, gateway);
    state.initialize().await;
    Ok(state)
}
