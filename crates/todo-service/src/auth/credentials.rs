//! Store-backed credential verification

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use todo_common::{verify_password, AuthFailure, DecoyHash};
use todo_core::traits::{UserRepository, UserRoleRepository};
use todo_core::User;
use tracing::{error, instrument};

use super::{bounded, BasicAuthVerifier, Identity};

/// Verifies usernames and passwords against the user store
///
/// Source of truth for role membership: the returned identity carries the
/// user's roles as of this call. A known and an unknown username both cost
/// one store read and one Argon2 verification.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn UserRoleRepository>,
    timeout: Duration,
    decoy: DecoyHash,
}

impl CredentialStore {
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn UserRoleRepository>,
        timeout: Duration,
        decoy: DecoyHash,
    ) -> Self {
        Self {
            users,
            roles,
            timeout,
            decoy,
        }
    }

    /// Check the password and return the matching user without loading roles
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthFailure> {
        let found = bounded(
            self.timeout,
            "find_credentials",
            self.users.find_credentials(username),
        )
        .await?;

        let Some((user, hash)) = found else {
            self.decoy.burn(password);
            return Err(AuthFailure::NotFound);
        };

        match verify_password(password, &hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AuthFailure::BadCredential),
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Stored password hash is unreadable");
                Err(AuthFailure::BadCredential)
            }
        }
    }
}

#[async_trait]
impl BasicAuthVerifier for CredentialStore {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, AuthFailure> {
        let user = self.authenticate(username, password).await?;
        let roles = bounded(self.timeout, "roles_for", self.roles.roles_for(user.id)).await?;
        Ok(Identity::user(user.id, user.username, roles))
    }
}
