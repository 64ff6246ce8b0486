//! Plain HTTP handlers: status, toggle and the home page.

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::broadcast::notify_clients;
use crate::http::routes;
use crate::http::server::AppState;
use crate::observability::metrics;

/// `GET /health`: 200 "healthy" or 503 "unhealthy".
pub async fn health(State(state): State<AppState>) -> Response {
    let (status, body) = if state.flag.get() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    tracing::info!(
        status = status.as_u16(),
        "Health endpoint reported {} ({})",
        status.as_u16(),
        body
    );
    metrics::record_request(routes::HEALTH, status.as_u16());
    (status, body).into_response()
}

/// `PUT /toggle`: flip the flag, push it to subscribers, redirect home.
///
/// Any other method is answered with 405 and leaves the flag alone.
pub async fn toggle(State(state): State<AppState>, method: Method) -> Response {
    if method != Method::PUT {
        tracing::warn!(method = %method, "Rejected toggle request");
        metrics::record_request(routes::TOGGLE, StatusCode::METHOD_NOT_ALLOWED.as_u16());
        return (StatusCode::METHOD_NOT_ALLOWED, "Invalid request method").into_response();
    }

    state.flag.toggle();
    let report = notify_clients(&state.flag, &state.subscribers).await;
    if report.failed > 0 {
        tracing::warn!(
            delivered = report.delivered,
            failed = report.failed,
            "Some subscribers missed the status change"
        );
    }

    metrics::record_request(routes::TOGGLE, StatusCode::SEE_OTHER.as_u16());
    Redirect::to(routes::HOME).into_response()
}

/// Home page, read from disk on every request.
///
/// A missing or unreadable file is logged and yields an empty response.
pub async fn home(State(state): State<AppState>) -> Response {
    let path = &state.page.template_path;
    match tokio::fs::read(path).await {
        Ok(page) => {
            metrics::record_request(routes::HOME, StatusCode::OK.as_u16());
            Html(page).into_response()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Error loading home page template");
            metrics::record_request(routes::HOME, StatusCode::OK.as_u16());
            StatusCode::OK.into_response()
        }
    }
}
