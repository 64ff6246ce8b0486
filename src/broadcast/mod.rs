//! Real-time status broadcast subsystem.
//!
//! # Data Flow
//! ```text
//! Stream upgrade (http/websocket.rs):
//!     → subscribers.rs insert(sink) → SubscriberId
//!     → initial value pushed on the same sink
//!
//! Toggle (http/handlers.rs):
//!     → notifier.rs notify_clients()
//!     → snapshot of subscribers.rs
//!     → one JSON boolean per sink, sequentially
//!
//! Disconnect:
//!     read loop error/close → subscribers.rs remove(id)
//! ```
//!
//! # Design Decisions
//! - The set has its own locking (DashMap), independent of the flag lock
//! - Fan-out never holds a map shard lock across an await
//! - Failed pushes are logged only; the owning read loop does the removal

pub mod notifier;
pub mod subscribers;

pub use notifier::{notify_clients, status_message, NotifyReport};
pub use subscribers::{SharedSink, SubscriberId, SubscriberSet, WsSink};
