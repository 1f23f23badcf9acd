//! Basic-auth verifiers

use std::collections::HashMap;

use async_trait::async_trait;
use todo_common::{hash_password, verify_password, AppResult, AuthFailure, DecoyHash};
use tracing::error;

use super::Identity;

/// Checks a username/password pair
///
/// Implementations must take about the same time for an unknown username
/// as for a wrong password.
#[async_trait]
pub trait BasicAuthVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, AuthFailure>;
}

/// Verifier over a fixed account table taken from configuration
///
/// Passwords are hashed once at construction so that every comparison goes
/// through the same constant-time Argon2 verifier as stored accounts.
pub struct StaticAccountVerifier {
    accounts: HashMap<String, String>,
    decoy: DecoyHash,
}

impl StaticAccountVerifier {
    /// Build the verifier, hashing every password
    ///
    /// # Errors
    /// Returns an internal error if hashing fails
    pub fn new(accounts: &[(String, String)]) -> AppResult<Self> {
        let accounts = accounts
            .iter()
            .map(|(username, password)| Ok((username.clone(), hash_password(password)?)))
            .collect::<AppResult<HashMap<_, _>>>()?;

        Ok(Self {
            accounts,
            decoy: DecoyHash::new()?,
        })
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl BasicAuthVerifier for StaticAccountVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<Identity, AuthFailure> {
        let Some(hash) = self.accounts.get(username) else {
            self.decoy.burn(password);
            return Err(AuthFailure::NotFound);
        };

        match verify_password(password, hash) {
            Ok(true) => Ok(Identity::static_account(username)),
            Ok(false) => Err(AuthFailure::BadCredential),
            Err(e) => {
                error!(error = %e, "Static account hash is unreadable");
                Err(AuthFailure::BadCredential)
            }
        }
    }
}

impl std::fmt::Debug for StaticAccountVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccountVerifier")
            .field("accounts", &self.accounts.len())
            .finish()
    }
}
