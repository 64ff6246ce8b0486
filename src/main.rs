//! Liveness Probe Demo
//!
//! Serves a togglable health flag for exercising liveness probes.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /health ─────────────▶ handlers ──read──▶ ┌───────────┐
//!                                                   │ FlagStore │
//!     PUT /toggle ─────────────▶ handlers ──flip──▶ │ RwLock    │
//!                                   │               └───────────┘
//!                                   ▼                     ▲
//!                               notifier ──snapshot──┐    │ read
//!                                   │                ▼    │
//!                                   │          ┌───────────────┐
//!     GET /liveness-probe-demo-ws ──┼─upgrade─▶│ SubscriberSet │
//!                                   │          │ (DashMap)     │
//!                                   ▼          └───────────────┘
//!                          JSON bool per subscriber
//! ```

use tokio::net::TcpListener;

use liveness_probe_demo::config;
use liveness_probe_demo::http::HttpServer;
use liveness_probe_demo::lifecycle::{signals, Shutdown};
use liveness_probe_demo::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("liveness-probe-demo v{} starting", env!("CARGO_PKG_VERSION"));

    let config = config::load_from_env()?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        template_path = %config.page.template_path.display(),
        "Configuration loaded"
    );
    tracing::debug!(config = %serde_json::to_string(&config)?, "Effective configuration");

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Listening for connections");

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::wait_for_signal(shutdown));

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
