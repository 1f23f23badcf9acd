//! Authentication and authorization failure kinds
//!
//! Every stage of the auth pipeline reports one of these. Each kind has a
//! single HTTP mapping; credential failures share one public message so
//! callers cannot tell an unknown user from a wrong password.

/// Why an auth stage rejected a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthFailure {
    #[error("unknown username")]
    NotFound,

    #[error("password mismatch")]
    BadCredential,

    #[error("missing or unsupported authorization header")]
    MissingCredentials,

    #[error("token could not be decoded or verified")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("session is not active")]
    Unauthenticated,

    #[error("role requirement not met")]
    Forbidden,

    #[error("auth store unavailable")]
    StoreUnavailable,
}

impl AuthFailure {
    /// HTTP status code for this failure
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden => 403,
            Self::StoreUnavailable => 500,
            Self::NotFound
            | Self::BadCredential
            | Self::MissingCredentials
            | Self::Malformed
            | Self::Expired
            | Self::Unauthenticated => 401,
        }
    }

    /// Error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound | Self::BadCredential => "INVALID_CREDENTIALS",
            Self::MissingCredentials => "MISSING_AUTH",
            Self::Malformed => "INVALID_TOKEN",
            Self::Expired => "TOKEN_EXPIRED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "INSUFFICIENT_PERMISSIONS",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }

    /// Message shown to clients
    ///
    /// The `Display` text is the internal reason and is only logged.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound | Self::BadCredential => "Invalid credentials",
            Self::MissingCredentials => "Missing authentication",
            Self::Malformed => "Invalid token",
            Self::Expired => "Token expired",
            Self::Unauthenticated => "Session is no longer valid",
            Self::Forbidden => "Insufficient permissions",
            Self::StoreUnavailable => "Authentication service unavailable",
        }
    }
}
