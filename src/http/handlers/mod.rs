//! Route handlers.
//!
//! Each resource module has two layers:
//! - plain functions over `&Store` (`cards::create`, `lists::delete`, ...)
//!   holding validation, logging and metrics, testable without a server
//! - thin axum handlers that extract path/body, call them, and shape the
//!   HTTP response (status, `Location`, JSON)

pub mod cards;
pub mod lists;

use axum::{
    extract::rejection::JsonRejection,
    http::{Method, Uri},
    Json,
};
use std::sync::Arc;

use crate::http::response::ApiError;
use crate::observability::metrics;
use crate::store::{Identifier, Store};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    /// Base of `Location` headers, without trailing slash.
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<Store>, public_url: &str) -> Self {
        Self {
            store,
            public_url: Arc::from(public_url),
        }
    }

    /// Canonical URL of a resource, e.g. `http://localhost:8000/card/<id>`.
    pub fn location(&self, resource: &str, id: &Identifier) -> String {
        format!("{}/{}/{}", self.public_url, resource, id)
    }
}

pub async fn root() -> &'static str {
    "Hello, world!"
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::error!(path = %uri.path(), "No route matched");
    ApiError::RouteNotFound(uri.path().to_string())
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    tracing::error!(%method, path = %uri.path(), "Method not allowed");
    ApiError::MethodNotAllowed(method.to_string())
}

/// Unwrap a JSON body, turning decoder rejections into `Invalid data`.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(ApiError::from)
        .inspect_err(log_rejection)
}

/// Log an expected request failure at `error` level.
fn log_rejection(err: &ApiError) {
    match err {
        ApiError::Validation(reason) => tracing::error!(%reason, "Invalid data"),
        ApiError::CardNotFound(id) => tracing::error!("Card with id {} not found.", id),
        ApiError::ListNotFound(id) => tracing::error!("List with id {} not found.", id),
        ApiError::PayloadTooLarge => tracing::error!("Request body too large"),
        _ => {}
    }
}

fn record_sizes(store: &Store) {
    if let (Ok(cards), Ok(lists)) = (store.card_count(), store.list_count()) {
        metrics::record_collection_sizes(cards, lists);
    }
}
