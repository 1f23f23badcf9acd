//! Auth gate for route groups
//!
//! Adapts an [`AuthPipeline`] to axum: decodes the `Authorization` header,
//! runs the stages, and either stores the [`Principal`] in the request
//! extensions or answers with the mapped error.
//!
//! [`Principal`]: todo_service::auth::Principal

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use axum_extra::headers::{
    authorization::{Basic, Bearer},
    Authorization, HeaderMapExt,
};
use todo_service::auth::{AuthPipeline, Credentials};

use crate::response::ApiError;
use crate::state::AppState;

/// Run `pipeline` in front of every route of `router`
///
/// Uses `route_layer`, so unmatched paths still produce 404 rather than 401.
pub fn guarded(router: Router<AppState>, pipeline: AuthPipeline) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(pipeline, require_auth))
}

/// Decode a `Bearer` or `Basic` authorization header
///
/// Anything else, including an empty bearer token or a basic payload that is
/// not base64 `user:password`, counts as no credentials at all.
pub fn credentials(headers: &HeaderMap) -> Option<Credentials> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        let token = bearer.token();
        return (!token.is_empty()).then(|| Credentials::Bearer(token.to_string()));
    }

    headers
        .typed_get::<Authorization<Basic>>()
        .map(|Authorization(basic)| Credentials::Basic {
            username: basic.username().to_string(),
            password: basic.password().to_string(),
        })
}

pub async fn require_auth(
    State(pipeline): State<AuthPipeline>,
    mut request: Request,
    next: Next,
) -> Response {
    let credentials = credentials(request.headers());

    match pipeline.run(credentials).await {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(failure) => match pipeline.challenge() {
            Some(challenge) => ApiError::challenge(failure, challenge).into_response(),
            None => ApiError::from(failure).into_response(),
        },
    }
}
