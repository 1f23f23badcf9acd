//! User service
//!
//! Registration, lookup and self-service account changes. Password and
//! profile changes are authenticated by the account's current password.

use todo_common::{hash_password, validate_password_strength};
use todo_core::entities::User;
use todo_core::{DomainError, Role};
use tracing::{info, instrument};

use crate::dto::{
    ChangePasswordRequest, ChangeProfileRequest, MessageResponse, RegisterRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user with the `USER` role
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut user = User::new(self.ctx.generate_id(), request.username);
        user.display_name = request.display_name;
        user.email = request.email;

        // The unique index still decides a race between two registrations
        self.ctx
            .user_repo()
            .create(&user, &password_hash, Role::User.into())
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(UserResponse::from(&user).with_roles(Role::User.into()))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().list().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Look up a user and its current role set
    #[instrument(skip(self))]
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<UserResponse> {
        let user = self.find_user(username).await?;
        let roles = self.ctx.role_repo().roles_for(user.id).await?;
        Ok(UserResponse::from(&user).with_roles(roles))
    }

    /// Replace the password and end every session of the account
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        let user = self
            .ctx
            .credential_store()
            .authenticate(&request.username, &request.old_password)
            .await?;

        validate_password_strength(&request.new_password)?;
        let password_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let revoked = self
            .ctx
            .user_repo()
            .update_password(user.id, &password_hash)
            .await?;

        info!(user_id = %user.id, revoked, "Password changed");
        Ok(MessageResponse::new("Password was changed successfully"))
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn change_profile(&self, request: ChangeProfileRequest) -> ServiceResult<UserResponse> {
        let mut user = self
            .ctx
            .credential_store()
            .authenticate(&request.username, &request.password)
            .await?;

        user.update_profile(request.display_name, request.email);
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(UserResponse::from(&user))
    }

    /// Soft delete a user and revoke all of its sessions
    #[instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> ServiceResult<MessageResponse> {
        let user = self.find_user(username).await?;

        let revoked = self.ctx.user_repo().delete(user.id).await?;

        info!(user_id = %user.id, revoked, "User deleted");
        Ok(MessageResponse::new("User was deleted successfully"))
    }

    pub(crate) async fn find_user(&self, username: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()).into())
    }
}
