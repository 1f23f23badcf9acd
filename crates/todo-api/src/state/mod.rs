//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, the static account table and configuration.

use std::sync::Arc;

use todo_common::AppConfig;
use todo_service::auth::{AuthPipeline, BasicAuthVerifier, StaticAccountVerifier};
use todo_service::ServiceContext;
use todo_core::RoleSet;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Accounts accepted on `/admin`
    static_accounts: Arc<StaticAccountVerifier>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        static_accounts: StaticAccountVerifier,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            static_accounts: Arc::new(static_accounts),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // === Auth pipelines for the route groups ===

    /// Any valid session token
    pub fn token_pipeline(&self) -> AuthPipeline {
        AuthPipeline::token(self.service_context.token_validator())
    }

    /// Valid session token holding at least one of `required`
    pub fn role_pipeline(&self, required: RoleSet) -> AuthPipeline {
        AuthPipeline::token_with_roles(self.service_context.token_validator(), required)
    }

    /// Basic auth against the configured account table
    pub fn static_basic_pipeline(&self) -> AuthPipeline {
        let verifier: Arc<dyn BasicAuthVerifier> = self.static_accounts.clone();
        AuthPipeline::basic(verifier)
    }

    /// Basic auth against the user store
    pub fn store_basic_pipeline(&self) -> AuthPipeline {
        AuthPipeline::basic(Arc::new(self.service_context.credential_store()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("static_accounts", &self.static_accounts.len())
            .field("config", &"AppConfig")
            .finish()
    }
}
