//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub basic_auth: BasicAuthConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// Token and session lifetime in seconds
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
    /// How long after the original login a token chain may still be refreshed
    #[serde(default = "default_max_refresh")]
    pub max_refresh: i64,
}

impl JwtConfig {
    /// Check that tokens live a positive time that fits in the refresh window
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` naming `JWT_ACCESS_TOKEN_EXPIRY`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::InvalidValue(
                "JWT_ACCESS_TOKEN_EXPIRY",
                format!("must be positive, got {}", self.access_token_expiry),
            ));
        }
        if self.access_token_expiry >= self.max_refresh {
            return Err(ConfigError::InvalidValue(
                "JWT_ACCESS_TOKEN_EXPIRY",
                format!(
                    "must be shorter than JWT_MAX_REFRESH ({}), got {}",
                    self.max_refresh, self.access_token_expiry
                ),
            ));
        }
        Ok(())
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Upper bound on each auth store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// Seconds between pruning runs; 0 disables the pruner
    #[serde(default = "default_prune_interval")]
    pub prune_interval: u64,
    /// Seconds an expired session is kept before pruning
    #[serde(default = "default_retention")]
    pub retention: i64,
}

impl SessionConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    #[must_use]
    pub fn prune_interval(&self) -> Option<Duration> {
        (self.prune_interval > 0).then(|| Duration::from_secs(self.prune_interval))
    }
}

/// Fixed account table for static basic auth
#[derive(Clone, Deserialize)]
pub struct BasicAuthConfig {
    pub accounts: Vec<(String, String)>,
}

impl BasicAuthConfig {
    /// Parse `user:pass,user2:pass2`
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for an entry without a `:` or with an empty username
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let accounts = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((user, pass)) if !user.is_empty() => Ok((user.to_string(), pass.to_string())),
                _ => Err(ConfigError::InvalidValue(
                    "BASIC_AUTH_ACCOUNTS",
                    format!("malformed entry '{entry}'"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { accounts })
    }
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let users: Vec<&str> = self.accounts.iter().map(|(u, _)| u.as_str()).collect();
        f.debug_struct("BasicAuthConfig")
            .field("users", &users)
            .finish_non_exhaustive()
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "todo-auth".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_access_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_max_refresh() -> i64 {
    86400 // 1 day
}

fn default_store_timeout_ms() -> u64 {
    3000
}

fn default_prune_interval() -> u64 {
    3600
}

fn default_retention() -> i64 {
    604_800 // 7 days
}

fn default_basic_auth_accounts() -> &'static str {
    "admin:pass123,user1:pass123"
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8088".to_string(),
        "http://localhost:9090".to_string(),
    ]
}

/// Minimum HMAC key length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Read an optional variable, failing if it is set but unparsable
fn parse_var<T: FromStr>(key: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        Err(_) => Ok(default()),
    }
}

fn required_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingVar(key))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let secret = required_var("JWT_SECRET")?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "JWT_SECRET",
                format!("must be at least {MIN_JWT_SECRET_LEN} bytes"),
            ));
        }

        let jwt = JwtConfig {
            secret,
            access_token_expiry: parse_var("JWT_ACCESS_TOKEN_EXPIRY", default_access_token_expiry)?,
            max_refresh: parse_var("JWT_MAX_REFRESH", default_max_refresh)?,
        };
        jwt.validate()?;

        let accounts = env::var("BASIC_AUTH_ACCOUNTS")
            .unwrap_or_else(|_| default_basic_auth_accounts().to_string());

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| default_host()),
                port: required_var("API_PORT")?
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("API_PORT", "not a port".to_string()))?,
            },
            database: DatabaseConfig {
                url: required_var("DATABASE_URL")?,
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            jwt,
            session: SessionConfig {
                store_timeout_ms: parse_var("STORE_TIMEOUT_MS", default_store_timeout_ms)?,
                prune_interval: parse_var("SESSION_PRUNE_INTERVAL", default_prune_interval)?,
                retention: parse_var("SESSION_RETENTION", default_retention)?,
            },
            basic_auth: BasicAuthConfig::parse(&accounts)?,
            rate_limit: RateLimitConfig {
                requests_per_second: parse_var(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    default_requests_per_second,
                )?,
                burst: parse_var("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(default_allowed_origins),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
