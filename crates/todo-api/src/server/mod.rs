//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use todo_common::{AppConfig, AppError, JwtService};
use todo_core::SnowflakeGenerator;
use todo_db::{
    create_pool, run_migrations, MemoryTodoRepository, PgSessionRepository, PgUserRepository,
    PgUserRoleRepository, PoolConfig,
};
use todo_service::auth::StaticAccountVerifier;
use todo_service::{AuthSettings, ServiceContext, ServiceContextBuilder, SessionPruner};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are merged after the middleware stack so they are never
/// rate limited.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let router = apply_middleware_with_config(
        create_router(&state),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(router.merge(health_routes()).with_state(state))
}

/// Assemble [`AppState`] around an already built service context
///
/// # Errors
/// Fails when the static account table cannot be hashed.
pub fn build_app_state(context: ServiceContext, config: AppConfig) -> Result<AppState, AppError> {
    let static_accounts = StaticAccountVerifier::new(&config.basic_auth.accounts)?;
    info!(accounts = static_accounts.len(), "Static basic auth accounts loaded");
    Ok(AppState::new(context, static_accounts, config))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    // Single node, so a fixed worker id
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(1));

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let roles = Arc::new(PgUserRoleRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool));
    let todos = Arc::new(MemoryTodoRepository::new());

    let service_context = ServiceContextBuilder::new()
        .user_repo(users)
        .role_repo(roles)
        .session_repo(sessions)
        .todo_repo(todos)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .auth_settings(AuthSettings::from_config(&config.session, config.jwt.max_refresh))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    build_app_state(service_context, config)
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {}", e)))?;
    let prune_interval = config.session.prune_interval();
    let retention = config.session.retention;

    let state = create_app_state(config).await?;

    let pruner = match prune_interval {
        Some(period) => {
            info!(period_secs = period.as_secs(), retention, "Session pruner started");
            Some(SessionPruner::new(state.service_context().session_repo_arc(), retention).spawn(period))
        }
        None => {
            warn!("Session pruning disabled");
            None
        }
    };

    let app = create_app(state)?;
    let result = run_server(app, addr).await;

    if let Some(handle) = pruner {
        handle.abort();
    }
    result
}
