//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cards_api_requests_total` (counter): requests by method, status
//! - `cards_api_request_duration_seconds` (histogram): latency distribution
//! - `cards_api_store_mutations_total` (counter): creates/deletes by entity
//! - `cards_api_auth_failures_total` (counter): rejected bearer tokens
//! - `cards_api_cards`, `cards_api_lists` (gauges): collection sizes
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! deployments without the Prometheus endpoint pay almost nothing.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "cards_api_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("cards_api_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_mutation(entity: &'static str, op: &'static str) {
    counter!("cards_api_store_mutations_total", "entity" => entity, "op" => op).increment(1);
}

pub fn record_auth_failure() {
    counter!("cards_api_auth_failures_total").increment(1);
}

pub fn record_collection_sizes(cards: usize, lists: usize) {
    gauge!("cards_api_cards").set(cards as f64);
    gauge!("cards_api_lists").set(lists as f64);
}

/// Middleware counting every response by method and status.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
