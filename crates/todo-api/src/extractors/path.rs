//! Path parameter extractors

use serde::Deserialize;
use todo_core::Snowflake;

use crate::response::ApiError;

/// `/api/todo/:id`
#[derive(Debug, Deserialize)]
pub struct TodoIdPath {
    pub id: String,
}

impl TodoIdPath {
    /// Parse id as Snowflake
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        self.id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid todo id format"))
    }
}

/// `/api/user/:username`
#[derive(Debug, Deserialize)]
pub struct UsernamePath {
    pub username: String,
}
