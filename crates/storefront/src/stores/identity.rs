//! Identity store: who is signed in.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Identity;
use crate::storage::{self, LocalStorage, StorageError};

/// Identity state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// The signed-in identity, if any.
    pub user: Option<Identity>,
    /// A simulated remote call is in flight (or startup restore has not run).
    pub loading: bool,
    /// Message from the last failed sign-in, for inline display.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

/// Mutations of [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCommand {
    SignedIn(Identity),
    SignedOut,
    SetLoading(bool),
    Failed(String),
}

impl AuthState {
    /// Apply a command.
    pub fn apply(&mut self, command: AuthCommand) {
        match command {
            AuthCommand::SignedIn(identity) => {
                self.user = Some(identity);
                self.loading = false;
                self.error = None;
            }
            AuthCommand::SignedOut => {
                self.user = None;
                self.loading = false;
                self.error = None;
            }
            AuthCommand::SetLoading(loading) => self.loading = loading,
            AuthCommand::Failed(message) => {
                self.error = Some(message);
                self.loading = false;
            }
        }
    }
}

/// Handle to the identity state and its persisted copy.
///
/// Holds at most one identity. Signing in persists the identity before the
/// in-memory state changes, so a storage failure leaves both untouched.
#[derive(Debug)]
pub struct IdentityStore {
    state: RwLock<AuthState>,
    storage: Arc<dyn LocalStorage>,
}

impl IdentityStore {
    /// Create a store backed by `storage`. Call [`restore`](Self::restore)
    /// once at startup.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            state: RwLock::new(AuthState::default()),
            storage,
        }
    }

    /// Load the persisted identity, if any. Resolves immediately.
    ///
    /// A corrupt record is logged and treated as signed out.
    pub async fn restore(&self) -> Option<Identity> {
        let restored = match storage::load_identity(self.storage.as_ref()) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable persisted identity");
                None
            }
        };

        match &restored {
            Some(identity) => {
                tracing::info!(user_id = %identity.id, role = %identity.role, "Restored identity");
                self.dispatch(AuthCommand::SignedIn(identity.clone())).await;
            }
            None => self.dispatch(AuthCommand::SetLoading(false)).await,
        }

        restored
    }

    /// Apply a command under the write lock.
    pub async fn dispatch(&self, command: AuthCommand) {
        self.state.write().await.apply(command);
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// The signed-in identity, if any.
    pub async fn current(&self) -> Option<Identity> {
        self.state.read().await.user.clone()
    }

    /// Persist `identity` and make it current.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the identity cannot be persisted; the
    /// current identity is left unchanged.
    pub async fn sign_in(&self, identity: Identity) -> Result<(), StorageError> {
        if let Err(e) = storage::save_identity(self.storage.as_ref(), &identity) {
            self.dispatch(AuthCommand::SetLoading(false)).await;
            return Err(e);
        }
        self.dispatch(AuthCommand::SignedIn(identity)).await;
        Ok(())
    }

    /// Forget the current identity and its persisted copy.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the persisted copy cannot be removed; the
    /// current identity is left signed in so memory and storage agree.
    pub async fn sign_out(&self) -> Result<(), StorageError> {
        if let Err(e) = storage::clear_identity(self.storage.as_ref()) {
            tracing::error!(error = %e, "Failed to remove persisted identity");
            return Err(e);
        }
        self.dispatch(AuthCommand::SignedOut).await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{IDENTITY_KEY, MemoryStorage, UndeletableStorage};
    use delicious_bites_core::{Email, Role, UserId};

    fn admin() -> Identity {
        Identity {
            id: UserId::new(1),
            name: "Admin User".to_owned(),
            email: Email::parse("admin@deliciousbites.com").unwrap(),
            role: Role::Admin,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_failed_keeps_user_and_stops_loading() {
        let mut state = AuthState::default();
        state.apply(AuthCommand::SignedIn(admin()));
        state.apply(AuthCommand::SetLoading(true));
        state.apply(AuthCommand::Failed("Invalid email or password".to_owned()));
        assert_eq!(state.user, Some(admin()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Invalid email or password"));
    }

    #[test]
    fn test_signed_in_clears_error() {
        let mut state = AuthState::default();
        state.apply(AuthCommand::Failed("nope".to_owned()));
        state.apply(AuthCommand::SignedIn(admin()));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_restore_without_record_stops_loading() {
        let store = IdentityStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.restore().await.is_none());
        let state = store.snapshot().await;
        assert!(!state.loading);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_restore_reads_persisted_identity() {
        let storage = Arc::new(MemoryStorage::new());
        storage::save_identity(storage.as_ref(), &admin()).unwrap();

        let store = IdentityStore::new(storage);
        assert_eq!(store.restore().await, Some(admin()));
        assert_eq!(store.current().await, Some(admin()));
    }

    #[tokio::test]
    async fn test_restore_ignores_corrupt_record() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(IDENTITY_KEY, "[1, 2").unwrap();

        let store = IdentityStore::new(storage);
        assert!(store.restore().await.is_none());
        assert!(!store.snapshot().await.loading);
    }

    #[tokio::test]
    async fn test_sign_in_then_out_clears_persisted_copy() {
        let storage = Arc::new(MemoryStorage::new());
        let store = IdentityStore::new(storage.clone());

        store.sign_in(admin()).await.unwrap();
        assert!(storage.get_item(IDENTITY_KEY).unwrap().is_some());

        store.sign_out().await.unwrap();
        assert!(storage.get_item(IDENTITY_KEY).unwrap().is_none());
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_failure_keeps_identity() {
        let storage = Arc::new(UndeletableStorage::default());
        let store = IdentityStore::new(storage.clone());
        store.sign_in(admin()).await.unwrap();

        assert!(matches!(store.sign_out().await, Err(StorageError::Io(_))));
        assert_eq!(store.current().await, Some(admin()));
        assert!(storage::load_identity(storage.as_ref()).unwrap().is_some());

        let restarted = IdentityStore::new(storage);
        assert_eq!(restarted.restore().await, Some(admin()));
    }
}
