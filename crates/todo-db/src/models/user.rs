//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A live user row together with its password hash
#[derive(Debug, Clone, FromRow)]
pub struct CredentialsModel {
    #[sqlx(flatten)]
    pub user: UserModel,
    pub password_hash: String,
}
