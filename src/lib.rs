//! Liveness Probe Demo Library
//!
//! A togglable health flag served over HTTP, with every change pushed to
//! WebSocket subscribers.

pub mod broadcast;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use health::FlagStore;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
