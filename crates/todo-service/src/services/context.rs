//! Service context - dependency container for services
//!
//! Holds all repositories, the token signer, and the auth settings needed by
//! services and by the auth pipelines built from it.

use std::sync::Arc;
use std::time::Duration;

use todo_common::{DecoyHash, JwtService, SessionConfig};
use todo_core::traits::{SessionRepository, TodoRepository, UserRepository, UserRoleRepository};
use todo_core::{Snowflake, SnowflakeGenerator};

use crate::auth::{CredentialStore, TokenIssuer, TokenValidator};

use super::error::{ServiceError, ServiceResult};

/// Tunables of the auth core
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// Upper bound on each store call made while authenticating
    pub store_timeout: Duration,
    /// How long after the first login a chain may still be refreshed
    pub max_refresh: chrono::Duration,
}

impl AuthSettings {
    pub fn new(store_timeout: Duration, max_refresh_secs: i64) -> Self {
        Self {
            store_timeout,
            max_refresh: chrono::Duration::seconds(max_refresh_secs),
        }
    }

    pub fn from_config(session: &SessionConfig, max_refresh_secs: i64) -> Self {
        Self::new(session.store_timeout(), max_refresh_secs)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000), 86_400)
    }
}

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - User, role grant, session and todo repositories
/// - JWT service for signing session tokens
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    role_repo: Arc<dyn UserRoleRepository>,
    session_repo: Arc<dyn SessionRepository>,
    todo_repo: Arc<dyn TodoRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    auth_settings: AuthSettings,
    decoy_hash: DecoyHash,
}

impl ServiceContext {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        role_repo: Arc<dyn UserRoleRepository>,
        session_repo: Arc<dyn SessionRepository>,
        todo_repo: Arc<dyn TodoRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        auth_settings: AuthSettings,
        decoy_hash: DecoyHash,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            session_repo,
            todo_repo,
            jwt_service,
            snowflake_generator,
            auth_settings,
            decoy_hash,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn role_repo(&self) -> &dyn UserRoleRepository {
        self.role_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Shared handle to the session store, for background tasks
    pub fn session_repo_arc(&self) -> Arc<dyn SessionRepository> {
        Arc::clone(&self.session_repo)
    }

    pub fn todo_repo(&self) -> &dyn TodoRepository {
        self.todo_repo.as_ref()
    }

    // === Auth core ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn auth_settings(&self) -> AuthSettings {
        self.auth_settings
    }

    /// Username/password verifier over the user store
    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(
            Arc::clone(&self.user_repo),
            Arc::clone(&self.role_repo),
            self.auth_settings.store_timeout,
            self.decoy_hash.clone(),
        )
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(
            Arc::clone(&self.jwt_service),
            Arc::clone(&self.session_repo),
            self.auth_settings.store_timeout,
        )
    }

    pub fn token_validator(&self) -> TokenValidator {
        TokenValidator::new(
            Arc::clone(&self.jwt_service),
            Arc::clone(&self.session_repo),
            self.auth_settings.store_timeout,
        )
    }

    // === IDs ===

    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("auth_settings", &self.auth_settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    role_repo: Option<Arc<dyn UserRoleRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    todo_repo: Option<Arc<dyn TodoRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    auth_settings: Option<AuthSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn role_repo(mut self, repo: Arc<dyn UserRoleRepository>) -> Self {
        self.role_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn todo_repo(mut self, repo: Arc<dyn TodoRepository>) -> Self {
        self.todo_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn auth_settings(mut self, settings: AuthSettings) -> Self {
        self.auth_settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing,
    /// or an internal error if the decoy hash cannot be computed
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.role_repo
                .ok_or_else(|| ServiceError::validation("role_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.todo_repo
                .ok_or_else(|| ServiceError::validation("todo_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.auth_settings.unwrap_or_default(),
            DecoyHash::new()?,
        ))
    }
}
