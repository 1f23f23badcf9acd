//! API Integration Tests
//!
//! Drive the full router, middleware included, over in-memory stores.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, StatusCode};
use chrono::{DateTime, Utc};
use integration_tests::{
    assert_json, assert_status, fixtures::*, test_config, TestResponse, TestServer,
    TEST_JWT_SECRET,
};
use serde_json::json;
use todo_common::JwtService;
use todo_core::traits::{SessionRepository, TodoRepository};
use todo_core::{DomainError, RepoResult, Role, RoleSet, Session, Snowflake};
use uuid::Uuid;

const CHALLENGE: &str = r#"Basic realm="Authorization Required""#;

fn server() -> TestServer {
    TestServer::start().expect("Failed to start server")
}

async fn register(server: &TestServer) -> RegisterRequest {
    let request = RegisterRequest::unique();
    let response = server.post("/api/register", &request).await.unwrap();
    assert_status(&response, StatusCode::CREATED).unwrap();
    request
}

async fn login(server: &TestServer, user: &RegisterRequest) -> TokenResponse {
    let response = server
        .post("/login", &LoginRequest::from_register(user))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).unwrap()
}

fn assert_auth_error(response: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.error_code(), Some(code), "body: {}", response.body);
}

// ============================================================================
// Health and Root
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = server();
    let response = server.get("/health").await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = server();
    let response = server.get("/health/ready").await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
    assert_eq!(response.body["checks"]["session_store"], "healthy");
}

#[tokio::test]
async fn test_root_welcome() {
    let server = server();
    let response = server.get("/").await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body.message, "welcome todo app");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = server();
    let response = server.get("/").await.unwrap();
    assert!(response.headers.contains_key("x-request-id"));
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = server();
    let request = RegisterRequest::unique();

    let response = server.post("/api/register", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).unwrap();

    assert_eq!(user.username, request.username);
    assert_eq!(user.email, request.email);
    assert_eq!(user.roles, Some(vec!["USER".to_string()]));
    assert!(!user.id.is_empty());
    assert!(!user.created_at.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = server();
    let request = register(&server).await;

    let response = server.post("/api/register", &request).await.unwrap();
    assert_status(&response, StatusCode::CONFLICT).unwrap();
}

#[tokio::test]
async fn test_register_weak_password() {
    let server = server();
    let mut request = RegisterRequest::unique();
    request.password = "onlyletters".to_string();

    let response = server.post("/api/register", &request).await.unwrap();
    assert_status(&response, StatusCode::BAD_REQUEST).unwrap();
}

#[tokio::test]
async fn test_register_malformed_body() {
    let server = server();
    let response = server
        .post("/api/register", &json!({ "username": "x" }))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_BODY"));
}

#[tokio::test]
async fn test_get_user_with_roles() {
    let server = server();
    let user = register(&server).await;
    server.grant_role(&user.username, Role::Manager).await.unwrap();

    let response = server
        .get(&format!("/api/user/{}", user.username))
        .await
        .unwrap();
    let body: UserResponse = assert_json(response, StatusCode::OK).unwrap();

    let roles = body.roles.unwrap();
    assert_eq!(roles.len(), 2);
    assert!(roles.contains(&"USER".to_string()));
    assert!(roles.contains(&"MANAGER".to_string()));
}

#[tokio::test]
async fn test_get_unknown_user() {
    let server = server();
    let response = server.get("/api/user/nobody").await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();
}

#[tokio::test]
async fn test_list_users() {
    let server = server();
    let first = register(&server).await;
    let second = register(&server).await;

    let response = server.get("/api/users").await.unwrap();
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).unwrap();

    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert!(names.contains(&first.username.as_str()));
    assert!(names.contains(&second.username.as_str()));
}

#[tokio::test]
async fn test_change_password_ends_sessions() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server
        .put(
            "/api/changepassword",
            &json!({
                "username": user.username,
                "old_password": user.password,
                "new_password": "BrandNew456",
            }),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");

    let response = server
        .post("/login", &LoginRequest::from_register(&user))
        .await
        .unwrap();
    assert_status(&response, StatusCode::UNAUTHORIZED).unwrap();

    let response = server
        .post(
            "/login",
            &json!({ "username": user.username, "password": "BrandNew456" }),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let server = server();
    let user = register(&server).await;

    let response = server
        .put(
            "/api/changepassword",
            &json!({
                "username": user.username,
                "old_password": "NotMyPassword1",
                "new_password": "BrandNew456",
            }),
        )
        .await
        .unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_change_profile() {
    let server = server();
    let user = register(&server).await;

    let response = server
        .put(
            "/api/changeprofile",
            &json!({
                "username": user.username,
                "password": user.password,
                "display_name": "Tester",
                "email": "changed@example.com",
            }),
        )
        .await
        .unwrap();
    let body: UserResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body.email.as_deref(), Some("changed@example.com"));
}

#[tokio::test]
async fn test_delete_user_requires_admin() {
    let server = server();
    let admin = register(&server).await;
    server.grant_role(&admin.username, Role::Admin).await.unwrap();
    let admin_token = login(&server, &admin).await.token;

    let victim = register(&server).await;
    let victim_token = login(&server, &victim).await.token;
    let path = format!("/api/user/{}", victim.username);

    // No token, then a token without ADMIN
    let response = server.delete(&path).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "MISSING_AUTH");
    let response = server.delete_auth(&path, &victim_token).await.unwrap();
    assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");

    let response = server.delete_auth(&path, &admin_token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    // The public lookup on the same path still works without a token
    let response = server.get(&path).await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();

    // Deleting the user revoked its sessions
    let response = server.get_auth("/member/todo", &victim_token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");
}

// ============================================================================
// Login / Logout / Refresh
// ============================================================================

#[tokio::test]
async fn test_login() {
    let server = server();
    let user = register(&server).await;

    let token = login(&server, &user).await;
    assert_eq!(token.code, 200);
    assert!(!token.token.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(&token.expire).is_ok());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = server();
    let user = register(&server).await;

    let unknown = server
        .post(
            "/login",
            &json!({ "username": "nobody", "password": user.password }),
        )
        .await
        .unwrap();
    let wrong = server
        .post(
            "/login",
            &json!({ "username": user.username, "password": "WrongPass999" }),
        )
        .await
        .unwrap();

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, wrong.status);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_logout_then_token_is_dead() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server.get_auth("/logout", &token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
    assert_eq!(response.body, json!({ "code": 200 }));

    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");

    // A second logout never reaches the handler
    let response = server.get_auth("/logout", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_logout_only_ends_its_own_session() {
    let server = server();
    let user = register(&server).await;
    let first = login(&server, &user).await.token;
    let second = login(&server, &user).await.token;

    server.get_auth("/logout", &first).await.unwrap();

    let response = server.get_auth("/member/todo", &second).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

#[tokio::test]
async fn test_concurrent_requests_racing_logout() {
    let server = std::sync::Arc::new(server());
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let racing: Vec<_> = (0..16)
        .map(|_| {
            let server = server.clone();
            let token = token.clone();
            tokio::spawn(async move { server.get_auth("/member/todo", &token).await })
        })
        .collect();
    let response = server.get_auth("/logout", &token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    for handle in futures::future::join_all(racing).await {
        let response = handle.unwrap().unwrap();
        assert!(
            response.status == StatusCode::OK || response.status == StatusCode::UNAUTHORIZED,
            "unexpected status {}",
            response.status
        );
    }

    for _ in 0..8 {
        let response = server.get_auth("/member/todo", &token).await.unwrap();
        assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn test_refresh_chain() {
    let server = server();
    let user = register(&server).await;
    let first = login(&server, &user).await.token;

    let response = server.get_auth("/refresh_token", &first).await.unwrap();
    let second: TokenResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(second.code, 200);

    let response = server.get_auth("/refresh_token", &second.token).await.unwrap();
    let third: TokenResponse = assert_json(response, StatusCode::OK).unwrap();

    for stale in [&first, &second.token] {
        let response = server.get_auth("/member/todo", stale).await.unwrap();
        assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");
    }
    let response = server.get_auth("/member/todo", &third.token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    assert_eq!(server.sessions.len(), 3);
}

#[tokio::test]
async fn test_refresh_after_logout_fails() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    server.get_auth("/logout", &token).await.unwrap();

    let response = server.get_auth("/refresh_token", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED");
    assert_eq!(server.sessions.len(), 1);
}

#[tokio::test]
async fn test_refresh_window_exceeded() {
    let mut config = test_config();
    config.jwt.max_refresh = -1;
    let server = TestServer::start_with_config(config).unwrap();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server.get_auth("/refresh_token", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED");

    // The token itself is still good
    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

// ============================================================================
// Token failures
// ============================================================================

#[tokio::test]
async fn test_missing_token() {
    let server = server();
    let response = server.get("/member/todo").await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "MISSING_AUTH");
    assert!(response.headers.get(header::WWW_AUTHENTICATE).is_none());
}

#[tokio::test]
async fn test_malformed_token() {
    let server = server();
    let response = server.get_auth("/member/todo", "not-a-jwt").await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_unknown_scheme() {
    let server = server();
    let response = server
        .get_raw_auth("/member/todo", "Digest username=\"x\"")
        .await
        .unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "MISSING_AUTH");
}

#[tokio::test]
async fn test_expired_token() {
    let mut config = test_config();
    config.jwt.access_token_expiry = -60;
    let server = TestServer::start_with_config(config).unwrap();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED");
}

/// Session store that refuses every call
struct DownSessions;

impl DownSessions {
    fn refused<T>() -> RepoResult<T> {
        Err(DomainError::DatabaseError("connection refused".to_string()))
    }
}

#[async_trait]
impl SessionRepository for DownSessions {
    async fn create(&self, _session: &Session) -> RepoResult<()> {
        Self::refused()
    }
    async fn find_by_id(&self, _session_id: Uuid) -> RepoResult<Option<Session>> {
        Self::refused()
    }
    async fn find_by_user(&self, _user_id: Snowflake) -> RepoResult<Vec<Session>> {
        Self::refused()
    }
    async fn revoke(&self, _session_id: Uuid) -> RepoResult<bool> {
        Self::refused()
    }
    async fn rotate(&self, _old: Uuid, _new: &Session, _now: DateTime<Utc>) -> RepoResult<bool> {
        Self::refused()
    }
    async fn prune_expired(&self, _cutoff: DateTime<Utc>) -> RepoResult<u64> {
        Self::refused()
    }
    async fn ping(&self) -> RepoResult<()> {
        Self::refused()
    }
}

#[tokio::test]
async fn test_session_store_outage_is_500_and_skips_handler() {
    let server = TestServer::start_with_session_repo(Arc::new(DownSessions)).unwrap();

    let jwt = JwtService::new(TEST_JWT_SECRET, 3600);
    let claims = jwt.claims_for(
        Snowflake::new(1),
        Uuid::new_v4(),
        "alice",
        RoleSet::USER,
        Utc::now(),
        None,
    );
    let token = jwt.encode(&claims).unwrap();

    let response = server
        .post_auth("/member/todo", &token, &TodoRequest::unique())
        .await
        .unwrap();
    assert_auth_error(
        &response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORE_UNAVAILABLE",
    );
    assert!(server.todos.find_all().await.unwrap().is_empty());

    let response = server.get_auth("/member/todo", &token).await.unwrap();
    assert_auth_error(
        &response,
        StatusCode::INTERNAL_SERVER_ERROR,
        "STORE_UNAVAILABLE",
    );
}

#[tokio::test]
async fn test_token_from_other_secret() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let mut config = test_config();
    config.jwt.secret = "a-completely-different-secret-of-32-bytes".to_string();
    let other = TestServer::start_with_config(config).unwrap();

    let response = other.get_auth("/member/todo", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN");
}

// ============================================================================
// Roles
// ============================================================================

#[tokio::test]
async fn test_role_gates_for_plain_user() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server.get_auth("/member/todo2", &token).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server
        .post_auth("/member/todo", &token, &TodoRequest::unique())
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    for path in ["/member/admin", "/member/manager", "/member/adminmanager"] {
        let response = server.get_auth(path, &token).await.unwrap();
        assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");
    }
}

#[tokio::test]
async fn test_role_gates_unauthenticated() {
    let server = server();
    for path in ["/member/todo2", "/member/admin", "/member/adminmanager"] {
        let response = server.get(path).await.unwrap();
        assert_auth_error(&response, StatusCode::UNAUTHORIZED, "MISSING_AUTH");
    }
}

#[tokio::test]
async fn test_admin_routes() {
    let server = server();
    let admin = register(&server).await;
    server.grant_role(&admin.username, Role::Admin).await.unwrap();
    let token = login(&server, &admin).await.token;

    let response = server.get_auth("/member/admin", &token).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body.message, "this api for admin member");

    let response = server.get_auth("/member/adminmanager", &token).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body.message, "this api for admin and manager member");

    let response = server.get_auth("/member/manager", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_manager_routes() {
    let server = server();
    let manager = register(&server).await;
    server
        .grant_role(&manager.username, Role::Manager)
        .await
        .unwrap();
    let token = login(&server, &manager).await.token;

    let response = server.get_auth("/member/manager", &token).await.unwrap();
    let body: MessageResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(body.message, "this api for manager member");

    let response = server.get_auth("/member/admin", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_addrole_reaches_token_on_refresh() {
    let server = server();
    let admin = register(&server).await;
    server.grant_role(&admin.username, Role::Admin).await.unwrap();
    let admin_token = login(&server, &admin).await.token;

    let user = register(&server).await;
    let user_token = login(&server, &user).await.token;

    let response = server
        .post_auth(
            "/member/addrole",
            &admin_token,
            &RoleChangeRequest::new(&user.username, "MANAGER"),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    // Granting again is not an error
    let response = server
        .post_auth(
            "/member/addrole",
            &admin_token,
            &RoleChangeRequest::new(&user.username, "MANAGER"),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    // The existing token keeps its snapshot until refreshed
    let response = server.get_auth("/member/manager", &user_token).await.unwrap();
    assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");

    let response = server.get_auth("/refresh_token", &user_token).await.unwrap();
    let refreshed: TokenResponse = assert_json(response, StatusCode::OK).unwrap();
    let response = server
        .get_auth("/member/manager", &refreshed.token)
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();
}

#[tokio::test]
async fn test_removerole() {
    let server = server();
    let admin = register(&server).await;
    server.grant_role(&admin.username, Role::Admin).await.unwrap();
    let token = login(&server, &admin).await.token;
    let user = register(&server).await;

    let response = server
        .post_auth(
            "/member/removerole",
            &token,
            &RoleChangeRequest::new(&user.username, "MANAGER"),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();

    let response = server
        .post_auth(
            "/member/removerole",
            &token,
            &RoleChangeRequest::new(&user.username, "USER"),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server
        .post_auth(
            "/member/addrole",
            &token,
            &RoleChangeRequest::new("nobody", "ADMIN"),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();
}

#[tokio::test]
async fn test_addrole_requires_admin() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server
        .post_auth(
            "/member/addrole",
            &token,
            &RoleChangeRequest::new(&user.username, "ADMIN"),
        )
        .await
        .unwrap();
    assert_auth_error(&response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS");
}

// ============================================================================
// Basic auth
// ============================================================================

#[tokio::test]
async fn test_static_basic_auth() {
    let server = server();

    let response = server
        .get_basic("/admin/todo", "admin", "pass123")
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server
        .post_basic("/admin/todo", "user1", "pass123", &TodoRequest::unique())
        .await
        .unwrap();
    let created: TodoResponse = assert_json(response, StatusCode::OK).unwrap();

    let response = server.get("/api/todo").await.unwrap();
    let todos: Vec<TodoResponse> = assert_json(response, StatusCode::OK).unwrap();
    assert!(todos.iter().any(|t| t.id == created.id));
}

#[tokio::test]
async fn test_static_basic_auth_failures_challenge() {
    let server = server();

    let wrong = server
        .get_basic("/admin/todo", "admin", "wrong")
        .await
        .unwrap();
    let unknown = server
        .get_basic("/admin/todo", "ghost", "pass123")
        .await
        .unwrap();
    let missing = server.get("/admin/todo").await.unwrap();

    for response in [&wrong, &unknown, &missing] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers.get(header::WWW_AUTHENTICATE).unwrap(), CHALLENGE);
    }
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn test_bearer_token_on_basic_route() {
    let server = server();
    let user = register(&server).await;
    let token = login(&server, &user).await.token;

    let response = server.get_auth("/admin/todo", &token).await.unwrap();
    assert_auth_error(&response, StatusCode::UNAUTHORIZED, "MISSING_AUTH");
    assert_eq!(response.headers.get(header::WWW_AUTHENTICATE).unwrap(), CHALLENGE);
}

#[tokio::test]
async fn test_store_basic_auth() {
    let server = server();
    let user = register(&server).await;

    let response = server
        .get_basic("/admin2/todo", &user.username, &user.password)
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server
        .post_basic(
            "/admin2/todo",
            &user.username,
            &user.password,
            &TodoRequest::unique(),
        )
        .await
        .unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    // Static accounts are not in the user store
    let response = server
        .get_basic("/admin2/todo", "admin", "pass123")
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers.get(header::WWW_AUTHENTICATE).unwrap(), CHALLENGE);
}

// ============================================================================
// Todos
// ============================================================================

#[tokio::test]
async fn test_todo_crud() {
    let server = server();

    let response = server
        .post(
            "/api/todo",
            &json!({ "task": "write tests", "startdate": "2026-01-01T00:00:00Z" }),
        )
        .await
        .unwrap();
    let created: TodoResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(created.task, "write tests");
    assert!(!created.completed);
    assert!(created.startdate.is_some());
    assert!(created.enddate.is_none());

    let path = format!("/api/todo/{}", created.id);
    let response = server.get(&path).await.unwrap();
    let fetched: TodoResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(fetched.id, created.id);

    let response = server
        .put(&path, &json!({ "task": "write more tests", "completed": true }))
        .await
        .unwrap();
    let updated: TodoResponse = assert_json(response, StatusCode::OK).unwrap();
    assert_eq!(updated.task, "write more tests");
    assert!(updated.completed);
    assert!(updated.startdate.is_none());

    let response = server.delete(&path).await.unwrap();
    assert_status(&response, StatusCode::OK).unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();
    let response = server.delete(&path).await.unwrap();
    assert_status(&response, StatusCode::NOT_FOUND).unwrap();
}

#[tokio::test]
async fn test_todo_invalid_id() {
    let server = server();
    let response = server.get("/api/todo/not-a-number").await.unwrap();
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_PATH_PARAMETER"));
}

#[tokio::test]
async fn test_todo_empty_task_rejected() {
    let server = server();
    let response = server
        .post("/api/todo", &json!({ "task": "" }))
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}
