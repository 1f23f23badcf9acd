//! PostgreSQL implementation of UserRoleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use todo_core::traits::{RepoResult, UserRoleRepository};
use todo_core::value_objects::{Role, RoleSet, Snowflake};

use crate::mappers::role_set_from_names;

use super::error::map_db_error;

/// PostgreSQL implementation of UserRoleRepository
#[derive(Clone)]
pub struct PgUserRoleRepository {
    pool: PgPool,
}

impl PgUserRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRoleRepository for PgUserRoleRepository {
    #[instrument(skip(self))]
    async fn roles_for(&self, user_id: Snowflake) -> RepoResult<RoleSet> {
        let names = sqlx::query_scalar::<_, String>(
            r"
            SELECT role_name FROM user_roles WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(role_set_from_names(names))
    }

    #[instrument(skip(self))]
    async fn grant(&self, user_id: Snowflake, role: Role) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO user_roles (user_id, role_name)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role_name) DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn revoke(&self, user_id: Snowflake, role: Role) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_roles WHERE user_id = $1 AND role_name = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
