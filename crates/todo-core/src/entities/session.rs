//! Session entity - server-side record backing an issued token

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Lifecycle state of a session at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Revoked,
    Expired,
}

/// One issued token's session row
///
/// `revoked` only ever moves from `false` to `true`. Rows are never removed
/// except by pruning of long-expired sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Snowflake,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub revoked_at: Option<DateTime<Utc>>,
    /// Session that superseded this one on refresh
    pub replaced_by: Option<Uuid>,
}

impl Session {
    /// Create a fresh, active session
    pub fn new(
        session_id: Uuid,
        user_id: Snowflake,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            user_id,
            issued_at,
            expires_at,
            revoked: false,
            revoked_at: None,
            replaced_by: None,
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Revocation wins over expiry: a revoked session reports `Revoked`
    /// even after its expiry time.
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if self.revoked {
            SessionState::Revoked
        } else if self.is_expired_at(now) {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }

    #[inline]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == SessionState::Active
    }

    /// Mark revoked; returns `false` if it already was
    pub fn revoke(&mut self, at: DateTime<Utc>) -> bool {
        if self.revoked {
            return false;
        }
        self.revoked = true;
        self.revoked_at = Some(at);
        true
    }
}
