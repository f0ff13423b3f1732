//! Authentication service.
//!
//! Mock sign-in against a fixed credential directory. Each call waits out the
//! simulated remote latency before resolving, then updates the identity store.

mod error;

pub use error::{AuthError, INVALID_CREDENTIALS_MESSAGE};

use secrecy::{ExposeSecret, SecretString};

use delicious_bites_core::{Email, Role, UserId};

use crate::latency::Latency;
use crate::models::Identity;
use crate::stores::{AuthCommand, IdentityStore};

struct Account {
    id: i64,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: &[Account] = &[
    Account {
        id: 1,
        name: "Admin User",
        email: "admin@deliciousbites.com",
        password: "admin123",
        role: Role::Admin,
    },
    Account {
        id: 2,
        name: "John Doe",
        email: "user@example.com",
        password: "user123",
        role: Role::User,
    },
];

/// Known sign-in credentials.
///
/// Credentials are compared in plaintext; this directory exists to drive the
/// demo accounts, not to secure anything.
pub struct CredentialDirectory {
    accounts: Vec<(Identity, SecretString)>,
}

impl std::fmt::Debug for CredentialDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialDirectory")
            .field("accounts", &self.accounts.len())
            .finish_non_exhaustive()
    }
}

impl CredentialDirectory {
    /// The two demo accounts: one admin, one shopper.
    #[must_use]
    pub fn demo() -> Self {
        let accounts = DEMO_ACCOUNTS
            .iter()
            .filter_map(|account| {
                let email = Email::parse(account.email).ok()?;
                Some((
                    Identity {
                        id: UserId::new(account.id),
                        name: account.name.to_owned(),
                        email,
                        role: account.role,
                    },
                    SecretString::from(account.password),
                ))
            })
            .collect();
        Self { accounts }
    }

    /// Look up the identity for an email/credential pair.
    #[must_use]
    pub fn verify(&self, email: &Email, credential: &SecretString) -> Option<Identity> {
        self.accounts
            .iter()
            .find(|(identity, secret)| {
                identity.email == *email && secret.expose_secret() == credential.expose_secret()
            })
            .map(|(identity, _)| identity.clone())
    }
}

/// Authentication service.
///
/// Handles login, registration, and logout against the identity store.
pub struct AuthService<'a> {
    identity: &'a IdentityStore,
    directory: &'a CredentialDirectory,
    latency: Latency,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        identity: &'a IdentityStore,
        directory: &'a CredentialDirectory,
        latency: Latency,
    ) -> Self {
        Self {
            identity,
            directory,
            latency,
        }
    }

    /// Sign in with email and credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair is unknown. The
    /// identity store records the failure message and keeps any existing
    /// identity.
    /// Returns `AuthError::Storage` if the identity cannot be persisted.
    #[tracing::instrument(skip(self, credential))]
    pub async fn login(&self, email: &str, credential: &SecretString) -> Result<Identity, AuthError> {
        self.identity.dispatch(AuthCommand::SetLoading(true)).await;
        self.latency.wait().await;

        let Some(identity) = Email::parse(email)
            .ok()
            .and_then(|email| self.directory.verify(&email, credential))
        else {
            tracing::info!("Login rejected");
            self.identity
                .dispatch(AuthCommand::Failed(INVALID_CREDENTIALS_MESSAGE.to_owned()))
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        self.identity.sign_in(identity.clone()).await?;
        tracing::info!(user_id = %identity.id, role = %identity.role, "Login succeeded");
        Ok(identity)
    }

    /// Register a new shopper and sign them in.
    ///
    /// Any well-formed email is accepted; there is no duplicate check and the
    /// credential is not retained.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` or `AuthError::InvalidEmail` for bad
    /// input, before any delay.
    /// Returns `AuthError::Storage` if the identity cannot be persisted.
    #[tracing::instrument(skip(self, _credential))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        _credential: &SecretString,
    ) -> Result<Identity, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingName);
        }
        let email = Email::parse(email)?;

        self.identity.dispatch(AuthCommand::SetLoading(true)).await;
        self.latency.wait().await;

        let identity = Identity {
            id: UserId::new(chrono::Utc::now().timestamp_millis()),
            name: name.to_owned(),
            email,
            role: Role::User,
        };
        self.identity.sign_in(identity.clone()).await?;

        tracing::info!(user_id = %identity.id, "Registered new shopper");
        Ok(identity)
    }

    /// Sign out immediately.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the persisted identity cannot be
    /// removed; the shopper stays signed in.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.identity.sign_out().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{self, MemoryStorage};

    fn secret(s: &str) -> SecretString {
        SecretString::from(s)
    }

    fn fixture() -> (IdentityStore, CredentialDirectory, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (
            IdentityStore::new(storage.clone()),
            CredentialDirectory::demo(),
            storage,
        )
    }

    #[test]
    fn test_directory_verify() {
        let directory = CredentialDirectory::demo();
        let admin = Email::parse("admin@deliciousbites.com").unwrap();
        assert_eq!(
            directory.verify(&admin, &secret("admin123")).unwrap().role,
            Role::Admin
        );
        assert!(directory.verify(&admin, &secret("user123")).is_none());
    }

    #[test]
    fn test_directory_debug_hides_credentials() {
        let rendered = format!("{:?}", CredentialDirectory::demo());
        assert!(!rendered.contains("admin123"));
    }

    #[tokio::test]
    async fn test_login_admin() {
        let (store, directory, storage) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);

        let identity = auth
            .login("admin@deliciousbites.com", &secret("admin123"))
            .await
            .unwrap();

        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.name, "Admin User");
        assert_eq!(store.current().await, Some(identity.clone()));
        assert_eq!(
            storage::load_identity(storage.as_ref()).unwrap(),
            Some(identity)
        );
    }

    #[tokio::test]
    async fn test_login_wrong_credential_sets_error() {
        let (store, directory, storage) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);

        let result = auth
            .login("admin@deliciousbites.com", &secret("wrong"))
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        let state = store.snapshot().await;
        assert!(state.user.is_none());
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
        assert!(storage::load_identity(storage.as_ref()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_malformed_email_is_invalid_credentials() {
        let (store, directory, _) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);
        let result = auth.login("not-an-email", &secret("admin123")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let (store, directory, _) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::from_millis(1000));

        let start = tokio::time::Instant::now();
        auth.login("user@example.com", &secret("user123"))
            .await
            .unwrap();
        assert_eq!(start.elapsed(), std::time::Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_register_creates_shopper() {
        let (store, directory, _) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);

        let identity = auth
            .register("  Ada  ", "ada@example.com", &secret("anything"))
            .await
            .unwrap();

        assert_eq!(identity.name, "Ada");
        assert_eq!(identity.role, Role::User);
        assert!(identity.id.as_i64() > 2);
        assert_eq!(store.current().await, Some(identity));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (store, directory, _) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);

        assert!(matches!(
            auth.register(" ", "ada@example.com", &secret("x")).await,
            Err(AuthError::MissingName)
        ));
        assert!(matches!(
            auth.register("Ada", "ada", &secret("x")).await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_identity() {
        let (store, directory, storage) = fixture();
        let auth = AuthService::new(&store, &directory, Latency::NONE);
        auth.login("user@example.com", &secret("user123"))
            .await
            .unwrap();

        auth.logout().await.unwrap();

        assert!(store.current().await.is_none());
        assert!(storage::load_identity(storage.as_ref()).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_reports_storage_failure() {
        let store = IdentityStore::new(Arc::new(storage::UndeletableStorage::default()));
        let directory = CredentialDirectory::demo();
        let auth = AuthService::new(&store, &directory, Latency::NONE);
        auth.login("user@example.com", &secret("user123"))
            .await
            .unwrap();

        assert!(matches!(auth.logout().await, Err(AuthError::Storage(_))));
        assert!(store.current().await.is_some());
    }
}
