//! Authentication service
//!
//! Handles login, logout and token refresh on top of the session store.

use chrono::Utc;
use todo_common::AuthFailure;
use tracing::{info, instrument, warn};

use crate::auth::{bounded, BasicAuthVerifier, Principal};
use crate::dto::{LoginRequest, LogoutResponse, TokenResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Verify credentials and start a new session
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let identity = self
            .ctx
            .credential_store()
            .verify(&request.username, &request.password)
            .await
            .inspect_err(|failure| warn!(reason = %failure, "Login failed"))?;

        let user_id = identity.user_id.ok_or(AuthFailure::Unauthenticated)?;
        let issued = self
            .ctx
            .token_issuer()
            .issue(user_id, &identity.username, identity.roles)
            .await?;

        info!(user_id = %user_id, session_id = %issued.session_id, "User logged in");
        Ok(TokenResponse::new(issued.token, issued.expires_at))
    }

    /// Revoke the session behind the presented token
    #[instrument(skip(self, principal))]
    pub async fn logout(&self, principal: &Principal) -> ServiceResult<LogoutResponse> {
        let session_id = principal.session_id().ok_or(AuthFailure::Unauthenticated)?;
        let timeout = self.ctx.auth_settings().store_timeout;

        // false means someone else revoked it first, which is still a logout
        let changed = bounded(
            timeout,
            "revoke_session",
            self.ctx.session_repo().revoke(session_id),
        )
        .await?;

        info!(%session_id, changed, "User logged out");
        Ok(LogoutResponse::ok())
    }

    /// Exchange a valid token for a new one, retiring the old session
    ///
    /// Roles are re-read from the user store, so grants made since the last
    /// issuance show up in the new token.
    #[instrument(skip(self, principal))]
    pub async fn refresh(&self, principal: &Principal) -> ServiceResult<TokenResponse> {
        let current = principal.token.as_ref().ok_or(AuthFailure::Unauthenticated)?;
        let settings = self.ctx.auth_settings();

        let chain_age = Utc::now() - current.claims.orig_issued_at();
        if chain_age > settings.max_refresh {
            warn!(session_id = %current.session_id, "Refresh window exceeded");
            return Err(AuthFailure::Expired.into());
        }

        let user_id = current.claims.user_id()?;
        let user = bounded(
            settings.store_timeout,
            "find_user_by_id",
            self.ctx.user_repo().find_by_id(user_id),
        )
        .await?
        .ok_or(AuthFailure::Unauthenticated)?;
        let roles = bounded(
            settings.store_timeout,
            "roles_for",
            self.ctx.role_repo().roles_for(user.id),
        )
        .await?;

        let issued = self
            .ctx
            .token_issuer()
            .rotate(current, user.id, &user.username, roles)
            .await?;

        info!(
            user_id = %user.id,
            old_session_id = %current.session_id,
            new_session_id = %issued.session_id,
            "Token refreshed"
        );
        Ok(TokenResponse::new(issued.token, issued.expires_at))
    }
}
