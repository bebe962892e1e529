//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware in a fixed order
//! - Bind server to listener and shut down gracefully
//!
//! # Middleware order (outermost first)
//! ```text
//! request id → access log (TraceLayer) → request id propagation → metrics
//!     → security headers → CORS → terminal error handler → panic catcher
//!     → timeout → bearer auth → body limit → routes / fallbacks
//! ```

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::AppConfig;
use crate::http::handlers::{self, cards, lists, AppState};
use crate::http::request::{request_id, RequestIdGenerator};
use crate::http::response::{error_handler_middleware, panic_response};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::security::auth::{bearer_auth_middleware, AuthState};
use crate::security::cors::cors_layer;
use crate::security::headers::with_security_headers;
use crate::store::Store;

/// HTTP server for the cards API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and a fresh
    /// store (seeded when `store.seed` is set).
    pub fn new(config: AppConfig) -> Self {
        let store = if config.store.seed {
            Store::seeded()
        } else {
            Store::new()
        };
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server around an existing store.
    pub fn with_store(config: AppConfig, store: Arc<Store>) -> Self {
        Self {
            router: Self::build_router(&config, store),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &AppConfig, store: Arc<Store>) -> Router {
        let state = AppState::new(store, &config.server.public_url);
        let auth = AuthState::new(&config.auth);
        let verbose = !config.observability.environment.is_production();

        let router = Router::new()
            .route("/", get(handlers::root))
            .route("/card", get(cards::get_cards).post(cards::post_card))
            .route("/card/{id}", get(cards::get_card).delete(cards::delete_card))
            .route("/list", get(lists::get_lists).post(lists::post_list))
            .route("/list/{id}", get(lists::get_list).delete(lists::delete_list))
            .fallback(handlers::not_found)
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn_with_state(auth, bearer_auth_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(middleware::from_fn_with_state(
                config.observability.environment,
                error_handler_middleware,
            ));

        let router = if config.security.cors_enabled {
            router.layer(cors_layer())
        } else {
            router
        };

        let router = if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        };

        router
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id(request),
                        )
                    })
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .include_headers(verbose),
                    ),
            )
            .layer(SetRequestIdLayer::x_request_id(RequestIdGenerator))
    }

    /// Serve on `listener` until `shutdown` fires, then drain in-flight
    /// requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
