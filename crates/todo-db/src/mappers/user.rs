//! User entity <-> model mapper

use todo_core::entities::User;
use todo_core::value_objects::Snowflake;

use crate::models::{CredentialsModel, UserModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            display_name: model.display_name,
            email: model.email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl CredentialsModel {
    /// Split into the entity and the hash it is stored with
    pub fn into_parts(self) -> (User, String) {
        (User::from(self.user), self.password_hash)
    }
}
