//! PostgreSQL implementation of SessionRepository
//!
//! Revocation is a conditional UPDATE, so concurrent revokes and rotations of
//! the same row serialize on the row lock and only one of them observes
//! `revoked = FALSE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use todo_core::entities::Session;
use todo_core::traits::{RepoResult, SessionRepository};
use todo_core::value_objects::Snowflake;

use crate::models::SessionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(tx: &mut Transaction<'_, Postgres>, session: &Session) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO sessions (session_id, user_id, issued_at, expires_at, revoked, revoked_at, replaced_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(session.session_id)
        .bind(session.user_id.into_inner())
        .bind(session.issued_at)
        .bind(session.expires_at)
        .bind(session.revoked)
        .bind(session.revoked_at)
        .bind(session.replaced_by)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.session_id))]
    async fn create(&self, session: &Session) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        Self::insert(&mut tx, session).await?;
        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, session_id: Uuid) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT session_id, user_id, issued_at, expires_at, revoked, revoked_at, replaced_by
            FROM sessions
            WHERE session_id = $1
            ",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Session::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Session>> {
        let rows = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT session_id, user_id, issued_at, expires_at, revoked, revoked_at, replaced_by
            FROM sessions
            WHERE user_id = $1
            ORDER BY issued_at, session_id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Session::from).collect())
    }

    #[instrument(skip(self))]
    async fn revoke(&self, session_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE sessions
            SET revoked = TRUE, revoked_at = NOW()
            WHERE session_id = $1 AND revoked = FALSE
            ",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self, new), fields(new_session_id = %new.session_id))]
    async fn rotate(&self, old: Uuid, new: &Session, now: DateTime<Utc>) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let revoked = sqlx::query(
            r"
            UPDATE sessions
            SET revoked = TRUE, revoked_at = $3, replaced_by = $2
            WHERE session_id = $1 AND revoked = FALSE AND expires_at >= $3
            ",
        )
        .bind(old)
        .bind(new.session_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if revoked.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            debug!("Old session no longer active, rotation aborted");
            return Ok(false);
        }

        Self::insert(&mut tx, new).await?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions WHERE expires_at < $1
            ",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
