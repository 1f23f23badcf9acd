//! User entity - an account that can log in

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User account
///
/// The password hash is not part of the entity; it is only reachable
/// through [`crate::traits::UserRepository::find_credentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.into(),
            display_name: None,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name to show in responses, falling back to the username
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }

    /// Replace profile fields; `None` leaves a field unchanged
    pub fn update_profile(&mut self, display_name: Option<String>, email: Option<String>) {
        if display_name.is_some() {
            self.display_name = display_name;
        }
        if email.is_some() {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }
}
