//! Authentication and authorization core
//!
//! Everything here is independent of the web framework. The API layer decodes
//! the `Authorization` header into [`Credentials`], runs an [`AuthPipeline`]
//! over them and turns the outcome into a response.
//!
//! - [`CredentialStore`] / [`StaticAccountVerifier`]: username + password checks
//! - [`TokenIssuer`] / [`TokenValidator`]: session-backed JWTs
//! - [`RoleGate`]: role set intersection
//! - [`AuthPipeline`]: ordered stages in front of a handler

mod basic;
mod credentials;
mod pipeline;
mod role_gate;
mod tokens;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use todo_common::AuthFailure;
use todo_core::{RepoResult, RoleSet, Snowflake};
use tracing::error;
use uuid::Uuid;

pub use basic::{BasicAuthVerifier, StaticAccountVerifier};
pub use credentials::CredentialStore;
pub use pipeline::{
    AuthContext, AuthPipeline, AuthStage, BasicAuth, CheckRoles, Credentials, VerifyToken,
    BASIC_CHALLENGE,
};
pub use role_gate::RoleGate;
pub use tokens::{IssuedToken, TokenIssuer, TokenValidator, ValidatedToken};

/// Who a request was authenticated as
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// `None` for accounts from the static table
    pub user_id: Option<Snowflake>,
    pub username: String,
    pub roles: RoleSet,
}

impl Identity {
    pub fn user(user_id: Snowflake, username: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            user_id: Some(user_id),
            username: username.into(),
            roles,
        }
    }

    /// Identity for a static basic-auth account, which carries no roles
    pub fn static_account(username: impl Into<String>) -> Self {
        Self {
            user_id: None,
            username: username.into(),
            roles: RoleSet::empty(),
        }
    }
}

/// Result of a successful pipeline run, handed to the handler
#[derive(Debug, Clone)]
pub struct Principal {
    pub identity: Identity,
    /// Present when the request carried a validated session token
    pub token: Option<ValidatedToken>,
}

impl Principal {
    pub fn session_id(&self) -> Option<Uuid> {
        self.token.as_ref().map(|t| t.session_id)
    }

    pub fn roles(&self) -> RoleSet {
        self.identity.roles
    }
}

/// Run a store call with an upper time bound
///
/// Timeouts and repository errors both become `StoreUnavailable`; the
/// underlying cause is logged here and not passed on.
pub(crate) async fn bounded<T, F>(
    limit: Duration,
    operation: &'static str,
    fut: F,
) -> Result<T, AuthFailure>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!(operation, error = %e, "Auth store call failed");
            Err(AuthFailure::StoreUnavailable)
        }
        Err(_) => {
            let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            error!(operation, timeout_ms, "Auth store call timed out");
            Err(AuthFailure::StoreUnavailable)
        }
    }
}
