//! Service health subsystem.
//!
//! # Data Flow
//! ```text
//! PUT /toggle
//!     → state.rs toggle() under exclusive lock
//!     → notifier fans the new value out to subscribers
//!
//! GET /health, stream upgrade
//!     → state.rs get() under shared lock
//! ```
//!
//! # Design Decisions
//! - One flag per process, owned by AppState rather than a global
//! - Every change is logged and mirrored in the `probe_service_enabled` gauge

pub mod state;

pub use state::FlagStore;
