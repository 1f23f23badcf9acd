//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, BasicAuthConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, RateLimitConfig, ServerConfig, SessionConfig, MIN_JWT_SECRET_LEN,
};
