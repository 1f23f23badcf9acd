//! Role grant service
//!
//! Changes here reach a user's tokens only at the next login or refresh.

use todo_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{MessageResponse, RoleChangeRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant a role; granting an existing role is a no-op success
    #[instrument(skip(self))]
    pub async fn add_role(&self, request: RoleChangeRequest) -> ServiceResult<MessageResponse> {
        let user = UserService::new(self.ctx).find_user(&request.username).await?;
        let added = self.ctx.role_repo().grant(user.id, request.role).await?;

        info!(user_id = %user.id, role = %request.role, added, "Role granted");
        Ok(MessageResponse::new(format!(
            "Role {} was added to {}",
            request.role, user.username
        )))
    }

    #[instrument(skip(self))]
    pub async fn remove_role(&self, request: RoleChangeRequest) -> ServiceResult<MessageResponse> {
        let user = UserService::new(self.ctx).find_user(&request.username).await?;

        if !self.ctx.role_repo().revoke(user.id, request.role).await? {
            return Err(DomainError::RoleNotGranted {
                username: user.username,
                role: request.role,
            }
            .into());
        }

        info!(user_id = %user.id, role = %request.role, "Role removed");
        Ok(MessageResponse::new(format!(
            "Role {} was removed from {}",
            request.role, user.username
        )))
    }
}
