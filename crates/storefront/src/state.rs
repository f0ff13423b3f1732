//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{LatencyConfig, StorefrontConfig};
use crate::content::ContentStore;
use crate::services::{AuthService, CheckoutService, CredentialDirectory, PaymentGateway, SimulatedGateway};
use crate::storage::{FileStorage, LocalStorage};
use crate::stores::{CartStore, CatalogStore, IdentityStore, OrderLedger};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns every store for the
/// single shopper session this process serves.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    latency: LatencyConfig,
    identity: IdentityStore,
    directory: CredentialDirectory,
    catalog: CatalogStore,
    cart: CartStore,
    orders: OrderLedger,
    gateway: Arc<dyn PaymentGateway>,
    content: ContentStore,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("latency", &self.inner.latency)
            .field("gateway", &self.inner.gateway)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state from explicit collaborators.
    ///
    /// Stores start empty; call [`initialize`](Self::initialize) before
    /// serving.
    #[must_use]
    pub fn new(
        latency: LatencyConfig,
        storage: Arc<dyn LocalStorage>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                latency,
                identity: IdentityStore::new(storage),
                directory: CredentialDirectory::demo(),
                catalog: CatalogStore::new(latency.remote),
                cart: CartStore::new(),
                orders: OrderLedger::new(latency.remote),
                gateway,
                content: ContentStore::load(),
            }),
        }
    }

    /// Create application state backed by file storage and the simulated
    /// gateway, as configured.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let gateway = SimulatedGateway::new(config.latency.payment)
            .with_approval_rate(config.payment_approval_rate);
        Self::new(config.latency, storage, Arc::new(gateway))
    }

    /// Restore the persisted identity and load the menu and orders.
    ///
    /// The two loads run concurrently.
    pub async fn initialize(&self) {
        self.inner.identity.restore().await;
        tokio::join!(self.inner.catalog.load(), self.inner.orders.load());
    }

    #[must_use]
    pub fn identity(&self) -> &IdentityStore {
        &self.inner.identity
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn orders(&self) -> &OrderLedger {
        &self.inner.orders
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    #[must_use]
    pub fn latency(&self) -> &LatencyConfig {
        &self.inner.latency
    }

    /// Authentication service over this session's identity store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(
            &self.inner.identity,
            &self.inner.directory,
            self.inner.latency.remote,
        )
    }

    /// Checkout service over this session's cart and ledger.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(
            &self.inner.cart,
            &self.inner.orders,
            self.inner.gateway.as_ref(),
            self.inner.latency.redirect,
        )
    }
}
