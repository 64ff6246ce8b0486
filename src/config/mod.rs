//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, TEMPLATE_PATH, METRICS_ADDR)
//!     → loader.rs (lookup & parse)
//!     → ServiceConfig (immutable)
//!     → handed to HttpServer at startup
//! ```
//!
//! # Design Decisions
//! - Environment only; there is no config file
//! - All fields have defaults so an empty environment is valid
//! - Unparsable values fail startup instead of silently falling back

pub mod loader;
pub mod schema;

pub use loader::{load_from_env, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, PageConfig, ServiceConfig};
