//! In-memory credential store (users + role grants)

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use todo_core::entities::User;
use todo_core::error::DomainError;
use todo_core::traits::{RepoResult, UserRepository, UserRoleRepository};
use todo_core::value_objects::{Role, RoleSet, Snowflake};

use super::MemorySessionRepository;

#[derive(Debug, Clone)]
struct UserRow {
    user: User,
    password_hash: String,
    deleted: bool,
}

/// Users and role grants held in process memory
///
/// Implements both [`UserRepository`] and [`UserRoleRepository`] so one
/// `Arc` can back both seams. It is bound to the session store that backs
/// the token seam, so deleting a user or changing a password revokes
/// sessions inside the same critical section.
pub struct MemoryUserStore {
    // Ordered by ID, which is creation order for Snowflakes
    users: RwLock<BTreeMap<Snowflake, UserRow>>,
    roles: RwLock<HashMap<Snowflake, BTreeSet<Role>>>,
    sessions: Arc<MemorySessionRepository>,
}

impl MemoryUserStore {
    pub fn new(sessions: Arc<MemorySessionRepository>) -> Self {
        Self {
            users: RwLock::default(),
            roles: RwLock::default(),
            sessions,
        }
    }

    fn live_mut(
        users: &mut BTreeMap<Snowflake, UserRow>,
        id: Snowflake,
    ) -> RepoResult<&mut UserRow> {
        users
            .get_mut(&id)
            .filter(|row| !row.deleted)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }

    fn find_live<'a>(
        users: &'a BTreeMap<Snowflake, UserRow>,
        username: &str,
    ) -> Option<&'a UserRow> {
        users
            .values()
            .find(|row| !row.deleted && row.user.username == username)
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .read()
            .get(&id)
            .filter(|row| !row.deleted)
            .map(|row| row.user.clone()))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(Self::find_live(&self.users.read(), username).map(|row| row.user.clone()))
    }

    async fn list(&self) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .values()
            .filter(|row| !row.deleted)
            .map(|row| row.user.clone())
            .collect())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(Self::find_live(&self.users.read(), username).is_some())
    }

    async fn find_credentials(&self, username: &str) -> RepoResult<Option<(User, String)>> {
        Ok(Self::find_live(&self.users.read(), username)
            .map(|row| (row.user.clone(), row.password_hash.clone())))
    }

    async fn create(&self, user: &User, password_hash: &str, roles: RoleSet) -> RepoResult<()> {
        let mut users = self.users.write();
        if Self::find_live(&users, &user.username).is_some() || users.contains_key(&user.id) {
            return Err(DomainError::UsernameAlreadyExists);
        }

        users.insert(
            user.id,
            UserRow {
                user: user.clone(),
                password_hash: password_hash.to_string(),
                deleted: false,
            },
        );
        self.roles
            .write()
            .insert(user.id, roles.roles().into_iter().collect());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write();
        let row = Self::live_mut(&mut users, user.id)?;
        row.user.display_name.clone_from(&user.display_name);
        row.user.email.clone_from(&user.email);
        row.user.updated_at = user.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<u64> {
        let mut users = self.users.write();
        let row = Self::live_mut(&mut users, id)?;
        row.deleted = true;
        Ok(self.sessions.revoke_all_for_user(id, Utc::now()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<u64> {
        let mut users = self.users.write();
        let row = Self::live_mut(&mut users, id)?;
        let now = Utc::now();
        row.password_hash = password_hash.to_string();
        row.user.updated_at = now;
        Ok(self.sessions.revoke_all_for_user(id, now))
    }
}

#[async_trait]
impl UserRoleRepository for MemoryUserStore {
    async fn roles_for(&self, user_id: Snowflake) -> RepoResult<RoleSet> {
        Ok(self
            .roles
            .read()
            .get(&user_id)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn grant(&self, user_id: Snowflake, role: Role) -> RepoResult<bool> {
        Ok(self.roles.write().entry(user_id).or_default().insert(role))
    }

    async fn revoke(&self, user_id: Snowflake, role: Role) -> RepoResult<bool> {
        Ok(self
            .roles
            .write()
            .get_mut(&user_id)
            .is_some_and(|roles| roles.remove(&role)))
    }
}
