//! Error responses and the terminal error handler.
//!
//! # Responsibilities
//! - Map request failures to status codes and bodies
//! - Catch handler panics and store failures as internal errors
//! - Hide internal error detail from clients in production
//!
//! Expected failures (bad payload, unknown id, missing token) are rendered
//! directly by [`ApiError`]. Internal errors are rendered in two steps: the
//! error leaves a [`InternalFailure`] marker on an empty 500 response, and
//! [`error_handler_middleware`] writes the body in the shape the configured
//! environment asks for.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use std::any::Any;
use thiserror::Error;

use crate::config::Environment;
use crate::store::{StoreError, ValidationError};

/// Failure of a single request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized request")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("request body exceeds the configured limit")]
    PayloadTooLarge,

    #[error("card with id {0} not found")]
    CardNotFound(String),

    #[error("list with id {0} not found")]
    ListNotFound(String),

    #[error("no route for {0}")]
    RouteNotFound(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CardNotFound(id) => ApiError::CardNotFound(id),
            StoreError::ListNotFound(id) => ApiError::ListNotFound(id),
            StoreError::Validation(e) => ApiError::Validation(e),
            StoreError::Poisoned => ApiError::Internal(StoreError::Poisoned.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized request" })),
            )
                .into_response(),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "Invalid data").into_response(),
            ApiError::PayloadTooLarge => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large").into_response()
            }
            ApiError::CardNotFound(_) => (StatusCode::NOT_FOUND, "Card Not Found").into_response(),
            ApiError::ListNotFound(_) => (StatusCode::NOT_FOUND, "List Not Found").into_response(),
            ApiError::RouteNotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            ApiError::MethodNotAllowed(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
            }
            ApiError::Internal(message) => {
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response.extensions_mut().insert(InternalFailure {
                    kind: "internal",
                    message,
                });
                response
            }
        }
    }
}

/// Marker left on a 500 response for the terminal error handler.
#[derive(Debug, Clone)]
pub struct InternalFailure {
    pub kind: &'static str,
    pub message: String,
}

/// Body of an internal-error response.
pub fn internal_error_body(environment: Environment, failure: &InternalFailure) -> Value {
    if environment.is_production() {
        json!({ "error": { "message": "server error" } })
    } else {
        json!({
            "message": failure.message,
            "error": { "kind": failure.kind, "message": failure.message },
        })
    }
}

/// Terminal error handler: renders every [`InternalFailure`] that reaches
/// it and passes other responses through untouched.
pub async fn error_handler_middleware(
    State(environment): State<Environment>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(failure) = response.extensions().get::<InternalFailure>().cloned() else {
        return response;
    };

    tracing::error!(kind = failure.kind, error = %failure.message, "Internal server error");

    let body = internal_error_body(environment, &failure);
    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::INTERNAL_SERVER_ERROR;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(body.to_string()))
}

/// Panic handler for `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    let mut response = ApiError::Internal(message).into_response();
    if let Some(failure) = response.extensions_mut().get_mut::<InternalFailure>() {
        failure.kind = "panic";
    }
    response
}
