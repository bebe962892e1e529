//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (hardening headers on the way out)
//!     → cors.rs (answer preflights, add CORS headers)
//!     → auth.rs (bearer token check)
//!     → body size limit (tower-http, configured in http/server.rs)
//!     → Pass to routing
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing or malformed Authorization header is a 401,
//!   whatever the body size
//! - CORS sits outside authentication so browsers can preflight

pub mod auth;
pub mod cors;
pub mod headers;
