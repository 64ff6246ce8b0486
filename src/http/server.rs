//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing)
//! - Own the shared state injected into handlers
//! - Serve until the shutdown signal, then close open streams

use axum::{
    body::Body,
    http::Request,
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::broadcast::SubscriberSet;
use crate::config::{PageConfig, ServiceConfig};
use crate::health::FlagStore;
use crate::http::{handlers, routes, websocket};
use crate::lifecycle::Shutdown;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub flag: Arc<FlagStore>,
    pub subscribers: Arc<SubscriberSet>,
    pub page: Arc<PageConfig>,
    /// Fires when the server stops; open streams close on it.
    pub shutdown: Shutdown,
}

impl AppState {
    /// Fresh state: flag enabled, no subscribers.
    pub fn new(page: PageConfig) -> Self {
        Self {
            flag: Arc::new(FlagStore::default()),
            subscribers: Arc::new(SubscriberSet::new()),
            page: Arc::new(page),
            shutdown: Shutdown::new(),
        }
    }
}

/// HTTP server for the probe demo.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config.page);
        state.flag.set_enabled(true);

        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Run the server until `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let streams = self.state.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
                streams.trigger();
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared state, for inspection by embedders and tests.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, any(handlers::health))
        .route(routes::TOGGLE, any(handlers::toggle))
        .route(routes::STREAM, get(websocket::stream_handler))
        .route(routes::HOME, any(handlers::home))
        .fallback(handlers::home)
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
