//! Repository traits (ports) - define the interface for data access
//!
//! The auth core and the todo handlers both reach storage only through these
//! traits. PostgreSQL and in-memory implementations live in `todo-db`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Session, Todo, User};
use crate::error::DomainError;
use crate::value_objects::{Role, RoleSet, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository (credential store)
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a live user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find a live user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// List all live users, oldest first
    async fn list(&self) -> RepoResult<Vec<User>>;

    /// Check if a username is taken by a live user
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Live user and its password hash, read together
    async fn find_credentials(&self, username: &str) -> RepoResult<Option<(User, String)>>;

    /// Create a user and its initial role grants in one write
    async fn create(&self, user: &User, password_hash: &str, roles: RoleSet) -> RepoResult<()>;

    /// Save profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Soft delete a user and revoke all of its sessions in one write
    ///
    /// Returns the number of sessions revoked.
    async fn delete(&self, id: Snowflake) -> RepoResult<u64>;

    /// Replace the password hash and revoke all of the user's sessions in one write
    ///
    /// Returns the number of sessions revoked.
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<u64>;
}

// ============================================================================
// User Role Repository
// ============================================================================

#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// Current role set of a user (union of all grants)
    async fn roles_for(&self, user_id: Snowflake) -> RepoResult<RoleSet>;

    /// Grant a role; returns `false` if it was already granted
    async fn grant(&self, user_id: Snowflake, role: Role) -> RepoResult<bool>;

    /// Remove a grant; returns `false` if there was nothing to remove
    async fn revoke(&self, user_id: Snowflake, role: Role) -> RepoResult<bool>;
}

// ============================================================================
// Session Repository (session store)
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new session row
    async fn create(&self, session: &Session) -> RepoResult<()>;

    /// Look up a session by ID
    async fn find_by_id(&self, session_id: Uuid) -> RepoResult<Option<Session>>;

    /// All sessions (any state) of a user, oldest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Session>>;

    /// Mark a session revoked
    ///
    /// Returns `true` if this call changed the row, `false` if it was already
    /// revoked or does not exist.
    async fn revoke(&self, session_id: Uuid) -> RepoResult<bool>;

    /// Atomically revoke `old` and insert `new`
    ///
    /// The revoke only applies while `old` is still active at `now`. If it is
    /// not, nothing is written and `false` is returned.
    async fn rotate(&self, old: Uuid, new: &Session, now: DateTime<Utc>) -> RepoResult<bool>;

    /// Delete sessions that expired before `cutoff`
    async fn prune_expired(&self, cutoff: DateTime<Utc>) -> RepoResult<u64>;

    /// Connectivity check used by readiness
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Todo Repository
// ============================================================================

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List all todos, oldest first
    async fn find_all(&self) -> RepoResult<Vec<Todo>>;

    /// Find a todo by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Todo>>;

    /// Create a new todo
    async fn create(&self, todo: &Todo) -> RepoResult<()>;

    /// Save an existing todo
    async fn save(&self, todo: &Todo) -> RepoResult<()>;

    /// Delete a todo; returns `false` if it did not exist
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;
}
