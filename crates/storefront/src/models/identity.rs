//! Signed-in identity.

use serde::{Deserialize, Serialize};

use delicious_bites_core::{Email, Role, UserId};

/// The identity of the signed-in shopper or staff member.
///
/// This is the record persisted under the well-known `user` storage key. It
/// never carries the credential used to sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl Identity {
    /// Returns `true` if this identity may use the admin dashboard.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
