//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware pipeline)
//!     → request.rs (request id)
//!     → security (headers, CORS, bearer auth)
//!     → handlers (cards / lists → store)
//!     → response.rs (error mapping, terminal error handler)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::AppState;
pub use request::{RequestIdGenerator, X_REQUEST_ID};
pub use response::ApiError;
pub use server::HttpServer;
