//! JWT utilities for session tokens
//!
//! Tokens are HS256 and carry the session id, the subject, and a snapshot of
//! the roles granted at issuance. Decoding checks the signature first and the
//! expiry second; neither step touches storage.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use todo_core::{RoleSet, Snowflake};
use uuid::Uuid;

use super::AuthFailure;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Session ID this token is bound to
    pub sid: String,
    pub username: String,
    /// Roles granted at issuance
    pub roles: RoleSet,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issue time of the first token of this login chain
    pub orig_iat: i64,
}

impl Claims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns `AuthFailure::Malformed` if the subject is not a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AuthFailure> {
        self.sub.parse().map_err(|_| AuthFailure::Malformed)
    }

    /// Get the session ID
    ///
    /// # Errors
    /// Returns `AuthFailure::Malformed` if `sid` is not a UUID
    pub fn session_id(&self) -> Result<Uuid, AuthFailure> {
        Uuid::parse_str(&self.sid).map_err(|_| AuthFailure::Malformed)
    }

    #[must_use]
    pub fn orig_issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.orig_iat, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// JWT service for encoding and decoding session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime (seconds)
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_expiry,
        }
    }

    /// Lifetime of a token and its session
    #[must_use]
    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_expiry)
    }

    /// Build claims for a new token issued at `now`
    ///
    /// `orig_iat` is `None` for a fresh login and carried over on refresh.
    #[must_use]
    pub fn claims_for(
        &self,
        user_id: Snowflake,
        session_id: Uuid,
        username: &str,
        roles: RoleSet,
        now: DateTime<Utc>,
        orig_iat: Option<i64>,
    ) -> Claims {
        let iat = now.timestamp();
        Claims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            username: username.to_string(),
            roles,
            iat,
            exp: (now + self.access_token_ttl()).timestamp(),
            orig_iat: orig_iat.unwrap_or(iat),
        }
    }

    /// Sign claims into a compact JWT
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn encode(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))
    }

    /// Verify signature and expiry, returning the claims
    ///
    /// # Errors
    /// `Expired` when only the expiry check failed, `Malformed` for anything else
    pub fn decode(&self, token: &str) -> Result<Claims, AuthFailure> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthFailure::Expired,
                _ => AuthFailure::Malformed,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
