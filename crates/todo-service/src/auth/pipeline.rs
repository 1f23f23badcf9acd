//! Ordered authentication stages
//!
//! A pipeline is a list of stages run front to back against the credentials
//! one request carried. The first failing stage ends the run, so a handler
//! behind the pipeline only ever sees a fully checked [`Principal`].

use std::sync::Arc;

use async_trait::async_trait;
use todo_common::AuthFailure;
use todo_core::RoleSet;
use tracing::warn;

use super::{BasicAuthVerifier, Principal, RoleGate, TokenValidator};

/// `WWW-Authenticate` value sent when basic auth fails
pub const BASIC_CHALLENGE: &str = r#"Basic realm="Authorization Required""#;

/// Credentials carried by an `Authorization` header, already decoded
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(..)"),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

/// State threaded through the stages of one run
#[derive(Debug, Default)]
pub struct AuthContext {
    credentials: Option<Credentials>,
    pub principal: Option<Principal>,
}

impl AuthContext {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials,
            principal: None,
        }
    }

    /// A missing or undecodable header is `MissingCredentials`
    pub fn credentials(&self) -> Result<&Credentials, AuthFailure> {
        self.credentials
            .as_ref()
            .ok_or(AuthFailure::MissingCredentials)
    }
}

/// One step of an [`AuthPipeline`]
#[async_trait]
pub trait AuthStage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn apply(&self, ctx: &mut AuthContext) -> Result<(), AuthFailure>;

    /// `WWW-Authenticate` value to send when this stage rejects a request
    fn challenge(&self) -> Option<&'static str> {
        None
    }
}

/// Bearer token check against the session store
pub struct VerifyToken {
    validator: TokenValidator,
}

impl VerifyToken {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl AuthStage for VerifyToken {
    fn name(&self) -> &'static str {
        "verify_token"
    }

    async fn apply(&self, ctx: &mut AuthContext) -> Result<(), AuthFailure> {
        let Credentials::Bearer(token) = ctx.credentials()? else {
            return Err(AuthFailure::MissingCredentials);
        };

        let validated = self.validator.validate(token).await?;
        ctx.principal = Some(Principal {
            identity: validated.identity.clone(),
            token: Some(validated),
        });
        Ok(())
    }
}

/// Role requirement on the principal set by an earlier stage
pub struct CheckRoles {
    required: RoleSet,
}

impl CheckRoles {
    pub fn new(required: RoleSet) -> Self {
        Self { required }
    }
}

#[async_trait]
impl AuthStage for CheckRoles {
    fn name(&self) -> &'static str {
        "check_roles"
    }

    async fn apply(&self, ctx: &mut AuthContext) -> Result<(), AuthFailure> {
        let principal = ctx.principal.as_ref().ok_or(AuthFailure::Unauthenticated)?;
        RoleGate::authorize(principal.roles(), self.required)
    }
}

/// Username/password check through a [`BasicAuthVerifier`]
pub struct BasicAuth {
    verifier: Arc<dyn BasicAuthVerifier>,
}

impl BasicAuth {
    pub fn new(verifier: Arc<dyn BasicAuthVerifier>) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl AuthStage for BasicAuth {
    fn name(&self) -> &'static str {
        "basic_auth"
    }

    async fn apply(&self, ctx: &mut AuthContext) -> Result<(), AuthFailure> {
        let Credentials::Basic { username, password } = ctx.credentials()? else {
            return Err(AuthFailure::MissingCredentials);
        };

        let identity = self.verifier.verify(username, password).await?;
        ctx.principal = Some(Principal {
            identity,
            token: None,
        });
        Ok(())
    }

    fn challenge(&self) -> Option<&'static str> {
        Some(BASIC_CHALLENGE)
    }
}

/// Ordered list of stages guarding a route group
#[derive(Clone, Default)]
pub struct AuthPipeline {
    stages: Vec<Arc<dyn AuthStage>>,
}

impl AuthPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage
    pub fn stage(mut self, stage: impl AuthStage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Valid session token, no role requirement
    pub fn token(validator: TokenValidator) -> Self {
        Self::new().stage(VerifyToken::new(validator))
    }

    /// Valid session token holding at least one of `required`
    pub fn token_with_roles(validator: TokenValidator, required: RoleSet) -> Self {
        Self::token(validator).stage(CheckRoles::new(required))
    }

    pub fn basic(verifier: Arc<dyn BasicAuthVerifier>) -> Self {
        Self::new().stage(BasicAuth::new(verifier))
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Challenge header for failures of this pipeline, if any stage sets one
    pub fn challenge(&self) -> Option<&'static str> {
        self.stages.iter().find_map(|s| s.challenge())
    }

    /// Run every stage in order and return the authenticated principal
    pub async fn run(&self, credentials: Option<Credentials>) -> Result<Principal, AuthFailure> {
        let mut ctx = AuthContext::new(credentials);

        for stage in &self.stages {
            if let Err(failure) = stage.apply(&mut ctx).await {
                warn!(stage = stage.name(), reason = %failure, "Request rejected");
                return Err(failure);
            }
        }

        ctx.principal.ok_or(AuthFailure::Unauthenticated)
    }
}

impl std::fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}
