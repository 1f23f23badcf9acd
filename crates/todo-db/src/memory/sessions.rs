//! In-memory session store
//!
//! Every mutation happens under one write lock, which gives rotate the same
//! all-or-nothing behaviour as the Postgres transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use todo_core::entities::Session;
use todo_core::error::DomainError;
use todo_core::traits::{RepoResult, SessionRepository};
use todo_core::value_objects::Snowflake;

#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows, in any state
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Revoke every active session of a user
    ///
    /// Called by [`crate::MemoryUserStore`] while it holds its own write lock,
    /// so the account change and the revocation form one critical section.
    pub(crate) fn revoke_all_for_user(&self, user_id: Snowflake, now: DateTime<Utc>) -> u64 {
        let count = self
            .sessions
            .write()
            .values_mut()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.revoke(now))
            .filter(|changed| *changed)
            .count();
        count as u64
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create(&self, session: &Session) -> RepoResult<()> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&session.session_id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate session id {}",
                session.session_id
            )));
        }
        sessions.insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> RepoResult<Option<Session>> {
        Ok(self.sessions.read().get(&session_id).cloned())
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Session>> {
        let mut found: Vec<Session> = self
            .sessions
            .read()
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|s| (s.issued_at, s.session_id));
        Ok(found)
    }

    async fn revoke(&self, session_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .sessions
            .write()
            .get_mut(&session_id)
            .is_some_and(|s| s.revoke(Utc::now())))
    }

    async fn rotate(&self, old: Uuid, new: &Session, now: DateTime<Utc>) -> RepoResult<bool> {
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&new.session_id) {
            return Err(DomainError::DatabaseError(format!(
                "duplicate session id {}",
                new.session_id
            )));
        }

        let Some(current) = sessions.get_mut(&old) else {
            return Ok(false);
        };
        if !current.is_active_at(now) {
            return Ok(false);
        }

        current.revoke(now);
        current.replaced_by = Some(new.session_id);
        sessions.insert(new.session_id, new.clone());
        Ok(true)
    }

    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at >= cutoff);
        Ok((before - sessions.len()) as u64)
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}
