//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → handlers.rs (/health, /toggle, home page)
//!     → websocket.rs (/liveness-probe-demo-ws upgrade + read loop)
//!     → Send to client
//! ```

pub mod handlers;
pub mod server;
pub mod websocket;

pub use server::{AppState, HttpServer};

/// Route paths served by the HTTP layer.
pub mod routes {
    pub const HEALTH: &str = "/health";
    pub const TOGGLE: &str = "/toggle";
    pub const STREAM: &str = "/liveness-probe-demo-ws";
    pub const HOME: &str = "/";
}
