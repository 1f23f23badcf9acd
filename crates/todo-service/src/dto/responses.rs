//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use todo_core::RoleSet;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain message body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Login and refresh response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub code: u16,
    pub token: String,
    /// Token expiry, RFC 3339
    pub expire: DateTime<Utc>,
}

impl TokenResponse {
    pub fn new(token: String, expire: DateTime<Utc>) -> Self {
        Self {
            code: 200,
            token,
            expire,
        }
    }
}

/// Logout response
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub code: u16,
}

impl LogoutResponse {
    pub fn ok() -> Self {
        Self { code: 200 }
    }
}

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Present on single-user lookups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleSet>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn with_roles(mut self, roles: RoleSet) -> Self {
        self.roles = Some(roles);
        self
    }
}

// ============================================================================
// Todo Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: String,
    pub task: String,
    pub completed: bool,
    #[serde(rename = "startdate")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "enddate")]
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing store
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub session_store: String,
}

impl ReadinessResponse {
    pub fn ready(session_store_healthy: bool) -> Self {
        Self {
            status: if session_store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                session_store: if session_store_healthy {
                    "healthy"
                } else {
                    "unhealthy"
                }
                .to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
