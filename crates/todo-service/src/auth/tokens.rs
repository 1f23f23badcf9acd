//! Session-backed token issuance and validation

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use todo_common::{AppResult, AuthFailure, Claims, JwtService};
use todo_core::traits::SessionRepository;
use todo_core::{RoleSet, Session, SessionState, Snowflake};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{bounded, Identity};

/// A freshly signed token and the session row it is bound to
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub session_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub claims: Claims,
}

/// A token that passed signature, expiry and session checks
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub identity: Identity,
    pub session_id: Uuid,
    pub claims: Claims,
}

/// Creates sessions and signs the tokens that reference them
#[derive(Clone)]
pub struct TokenIssuer {
    jwt: Arc<JwtService>,
    sessions: Arc<dyn SessionRepository>,
    timeout: Duration,
}

impl TokenIssuer {
    pub fn new(jwt: Arc<JwtService>, sessions: Arc<dyn SessionRepository>, timeout: Duration) -> Self {
        Self {
            jwt,
            sessions,
            timeout,
        }
    }

    fn prepare(
        &self,
        user_id: Snowflake,
        username: &str,
        roles: RoleSet,
        now: DateTime<Utc>,
        orig_iat: Option<i64>,
    ) -> AppResult<(Session, IssuedToken)> {
        let session_id = Uuid::new_v4();
        let expires_at = now + self.jwt.access_token_ttl();
        let session = Session::new(session_id, user_id, now, expires_at);

        let claims = self
            .jwt
            .claims_for(user_id, session_id, username, roles, now, orig_iat);
        let token = self.jwt.encode(&claims)?;

        Ok((
            session,
            IssuedToken {
                token,
                session_id,
                expires_at,
                claims,
            },
        ))
    }

    /// Start a new login chain
    #[instrument(skip(self))]
    pub async fn issue(
        &self,
        user_id: Snowflake,
        username: &str,
        roles: RoleSet,
    ) -> AppResult<IssuedToken> {
        let (session, issued) = self.prepare(user_id, username, roles, Utc::now(), None)?;
        bounded(self.timeout, "create_session", self.sessions.create(&session)).await?;

        debug!(session_id = %issued.session_id, "Session issued");
        Ok(issued)
    }

    /// Replace `current` with a new session in one atomic step
    ///
    /// Fails with `Unauthenticated` when `current` is no longer active, in
    /// which case nothing was written.
    #[instrument(skip(self, current), fields(session_id = %current.session_id))]
    pub async fn rotate(
        &self,
        current: &ValidatedToken,
        user_id: Snowflake,
        username: &str,
        roles: RoleSet,
    ) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let (session, issued) = self.prepare(
            user_id,
            username,
            roles,
            now,
            Some(current.claims.orig_iat),
        )?;

        let rotated = bounded(
            self.timeout,
            "rotate_session",
            self.sessions.rotate(current.session_id, &session, now),
        )
        .await?;
        if !rotated {
            return Err(AuthFailure::Unauthenticated.into());
        }

        debug!(new_session_id = %issued.session_id, "Session rotated");
        Ok(issued)
    }
}

/// Checks bearer tokens against their signature, expiry and session row
#[derive(Clone)]
pub struct TokenValidator {
    jwt: Arc<JwtService>,
    sessions: Arc<dyn SessionRepository>,
    timeout: Duration,
}

impl TokenValidator {
    pub fn new(jwt: Arc<JwtService>, sessions: Arc<dyn SessionRepository>, timeout: Duration) -> Self {
        Self {
            jwt,
            sessions,
            timeout,
        }
    }

    #[instrument(skip_all)]
    pub async fn validate(&self, token: &str) -> Result<ValidatedToken, AuthFailure> {
        let claims = self.jwt.decode(token)?;
        let user_id = claims.user_id()?;
        let session_id = claims.session_id()?;

        let session = bounded(
            self.timeout,
            "find_session",
            self.sessions.find_by_id(session_id),
        )
        .await?
        .ok_or(AuthFailure::Unauthenticated)?;

        if session.user_id != user_id {
            return Err(AuthFailure::Unauthenticated);
        }
        match session.state_at(Utc::now()) {
            SessionState::Active => {}
            SessionState::Revoked => return Err(AuthFailure::Unauthenticated),
            SessionState::Expired => return Err(AuthFailure::Expired),
        }

        Ok(ValidatedToken {
            identity: Identity::user(user_id, claims.username.clone(), claims.roles),
            session_id,
            claims,
        })
    }
}
