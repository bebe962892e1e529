//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, store and middleware produce:
//!     → logging.rs (structured log events, file + console)
//!     → metrics.rs (counters, gauges, histograms)
//!     → TraceLayer in http/server.rs (access log spans with request id)
//!
//! Consumers:
//!     → info.log (JSON lines)
//!     → stdout (development only)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
