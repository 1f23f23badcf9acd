//! Test helpers for integration tests
//!
//! Builds the full application router over in-memory stores and drives it
//! with `tower::ServiceExt::oneshot`, so no listener or database is needed.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use todo_api::{build_app_state, create_app};
use todo_common::{
    AppConfig, AppSettings, BasicAuthConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    JwtService, RateLimitConfig, ServerConfig, SessionConfig,
};
use todo_core::traits::{SessionRepository, UserRepository, UserRoleRepository};
use todo_core::{Role, SnowflakeGenerator};
use todo_db::{MemorySessionRepository, MemoryTodoRepository, MemoryUserStore};
use todo_service::{AuthSettings, ServiceContextBuilder};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-secret-key-at-least-32-bytes";

/// Test server instance wrapping the router and its stores
pub struct TestServer {
    app: Router,
    pub users: Arc<MemoryUserStore>,
    pub sessions: Arc<MemorySessionRepository>,
    pub todos: Arc<MemoryTodoRepository>,
}

/// Buffered response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Error code of a `{"error":{...}}` body
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"]["code"].as_str()
    }
}

/// How a request authenticates
enum Auth<'a> {
    None,
    Bearer(&'a str),
    Basic(&'a str, &'a str),
    Raw(&'a str),
}

impl TestServer {
    /// Start a new test server with the default test config
    pub fn start() -> Result<Self> {
        Self::start_with_config(test_config())
    }

    /// Start a test server with custom config
    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        let sessions = Arc::new(MemorySessionRepository::new());
        Self::assemble(config, sessions.clone(), sessions)
    }

    /// Start a test server whose auth layer reaches sessions through
    /// `session_repo` instead of the in-memory store
    pub fn start_with_session_repo(session_repo: Arc<dyn SessionRepository>) -> Result<Self> {
        Self::assemble(
            test_config(),
            Arc::new(MemorySessionRepository::new()),
            session_repo,
        )
    }

    fn assemble(
        config: AppConfig,
        sessions: Arc<MemorySessionRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Result<Self> {
        let users = Arc::new(MemoryUserStore::new(sessions.clone()));
        let todos = Arc::new(MemoryTodoRepository::new());

        let context = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .role_repo(users.clone())
            .session_repo(session_repo)
            .todo_repo(todos.clone())
            .jwt_service(Arc::new(JwtService::new(
                &config.jwt.secret,
                config.jwt.access_token_expiry,
            )))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .auth_settings(AuthSettings::from_config(&config.session, config.jwt.max_refresh))
            .build()?;

        let state = build_app_state(context, config)?;
        let app = create_app(state)?;

        Ok(Self {
            app,
            users,
            sessions,
            todos,
        })
    }

    /// Grant a role straight through the store
    pub async fn grant_role(&self, username: &str, role: Role) -> Result<()> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no user {username}"))?;
        self.users.grant(user.id, role).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);

        match auth {
            Auth::None => {}
            Auth::Bearer(token) => {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            Auth::Basic(username, password) => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                builder = builder.header(header::AUTHORIZATION, format!("Basic {encoded}"));
            }
            Auth::Raw(value) => {
                builder = builder.header(header::AUTHORIZATION, value);
            }
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<TestResponse> {
        self.send(Method::GET, path, Auth::None, None).await
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<TestResponse> {
        self.send(Method::GET, path, Auth::Bearer(token), None).await
    }

    /// Make a GET request with basic credentials
    pub async fn get_basic(&self, path: &str, username: &str, password: &str) -> Result<TestResponse> {
        self.send(Method::GET, path, Auth::Basic(username, password), None)
            .await
    }

    /// Make a GET request with a raw `Authorization` value
    pub async fn get_raw_auth(&self, path: &str, authorization: &str) -> Result<TestResponse> {
        self.send(Method::GET, path, Auth::Raw(authorization), None)
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<TestResponse> {
        self.send(Method::POST, path, Auth::None, Some(serde_json::to_value(body)?))
            .await
    }

    /// Make a POST request with a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<TestResponse> {
        self.send(
            Method::POST,
            path,
            Auth::Bearer(token),
            Some(serde_json::to_value(body)?),
        )
        .await
    }

    /// Make a POST request with basic credentials
    pub async fn post_basic<T: Serialize>(
        &self,
        path: &str,
        username: &str,
        password: &str,
        body: &T,
    ) -> Result<TestResponse> {
        self.send(
            Method::POST,
            path,
            Auth::Basic(username, password),
            Some(serde_json::to_value(body)?),
        )
        .await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<TestResponse> {
        self.send(Method::PUT, path, Auth::None, Some(serde_json::to_value(body)?))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<TestResponse> {
        self.send(Method::DELETE, path, Auth::None, None).await
    }

    /// Make a DELETE request with a bearer token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<TestResponse> {
        self.send(Method::DELETE, path, Auth::Bearer(token), None)
            .await
    }
}

/// Create a test configuration
///
/// The rate limit is generous enough that no test trips it.
pub fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "todo-auth-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 0,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry: 3600,
            max_refresh: 86_400,
        },
        session: SessionConfig {
            store_timeout_ms: 3000,
            prune_interval: 0,
            retention: 604_800,
        },
        basic_auth: BasicAuthConfig {
            accounts: vec![
                ("admin".to_string(), "pass123".to_string()),
                ("user1".to_string(), "pass123".to_string()),
            ],
        },
        rate_limit: RateLimitConfig {
            requests_per_second: 1,
            burst: 100_000,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
    }
}

/// Whether the opt-in Postgres tests can run
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub fn assert_json<T: DeserializeOwned>(response: TestResponse, expected_status: StatusCode) -> Result<T> {
    assert_status(&response, expected_status)?;
    Ok(serde_json::from_value(response.body)?)
}

/// Assert response status without parsing body
pub fn assert_status(response: &TestResponse, expected_status: StatusCode) -> Result<()> {
    if response.status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            response.status,
            response.body
        );
    }
    Ok(())
}
