//! Bearer-token authentication middleware.
//!
//! Every request must carry `Authorization: <scheme> <token>` where
//! `<token>` equals the configured API token. The scheme itself is not
//! checked. Paths listed in `auth.exempt_paths` skip the check.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::http::response::ApiError;
use crate::observability::metrics;

/// State required for bearer authentication.
#[derive(Clone)]
pub struct AuthState {
    api_token: Arc<str>,
    exempt_paths: Arc<[String]>,
}

impl AuthState {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            api_token: Arc::from(config.api_token.as_str()),
            exempt_paths: config.exempt_paths.clone().into(),
        }
    }

    fn is_exempt(&self, path: &str) -> bool {
        self.exempt_paths.iter().any(|p| p == path)
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        matches!(extract_token(headers), Some(token) if token == &*self.api_token)
    }
}

/// The second space-separated segment of the `Authorization` header.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split(' ')
        .nth(1)
}

pub async fn bearer_auth_middleware(
    State(state): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.is_exempt(request.uri().path()) || state.accepts(request.headers()) {
        return next.run(request).await;
    }

    tracing::error!("Unauthorized request to path: {}", request.uri().path());
    metrics::record_auth_failure();
    ApiError::Unauthorized.into_response()
}
