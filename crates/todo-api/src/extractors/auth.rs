//! Authentication extractor
//!
//! Reads the [`Principal`] that the auth gate stored in the request
//! extensions. Routes without a gate have no principal and reject with 401.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use todo_common::AuthFailure;
use todo_service::auth::Principal;

use crate::response::ApiError;

/// Caller authenticated by the route group's pipeline
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.identity.username
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!(uri = %parts.uri, "No principal on an authenticated route");
                ApiError::from(AuthFailure::Unauthenticated)
            })
    }
}
