//! Streaming status endpoint.
//!
//! # Connection States
//! ```text
//! Connecting → Upgraded → Subscribed → Closed
//! ```
//!
//! - Upgrade failure is logged and the request abandoned
//! - Once subscribed, the current flag is sent as the first frame
//! - Incoming frames are read only to notice close or error
//! - Read failure, close frame or server shutdown removes the subscriber

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};

use crate::broadcast::{status_message, SubscriberSet};
use crate::http::routes;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /liveness-probe-demo-ws`: upgrade and subscribe.
pub async fn stream_handler(
    State(state): State<AppState>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match upgrade {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::error!(error = %rejection, "Error upgrading to WebSocket");
            metrics::record_request(routes::STREAM, rejection.status().as_u16());
            return rejection.into_response();
        }
    };

    ws.on_failed_upgrade(|e| {
        tracing::error!(error = %e, "Error upgrading to WebSocket");
        metrics::record_upgrade_failure();
    })
    .on_upgrade(move |socket| serve_subscriber(socket, state))
}

async fn serve_subscriber(socket: WebSocket, state: AppState) {
    metrics::record_request(routes::STREAM, 101);

    // Subscribe first so a shutdown racing the upgrade is not missed.
    let mut shutdown = state.shutdown.subscribe();

    let (sink, mut stream) = socket.split();
    let sink = SubscriberSet::share(sink);

    // Hold the sink while registering so no fan-out overtakes the initial value.
    let mut guard = sink.lock().await;
    let id = state.subscribers.insert(sink.clone());
    let enabled = state.flag.get();
    tracing::info!(subscriber = %id, enabled, "Subscriber connected");
    if let Err(e) = guard.send(status_message(enabled)).await {
        tracing::warn!(subscriber = %id, error = %e, "Error writing to client");
    }
    drop(guard);

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::debug!(subscriber = %id, error = %e, "Read failed");
                    break;
                }
            },
            _ = shutdown.recv() => {
                tracing::debug!(subscriber = %id, "Closing stream for shutdown");
                break;
            }
        }
    }

    state.subscribers.remove(&id);
    let _ = sink.lock().await.close().await;
    tracing::info!(subscriber = %id, "Subscriber disconnected");
}
