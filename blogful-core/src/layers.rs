use std::sync::Once;

use axum::extract::Request;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::error::{error_response, ErrorDetail};
use crate::mode::DeployMode;

static TRACING_INIT: Once = Once::new();

/// Message sent to clients in place of internal error details in production.
pub const PRODUCTION_ERROR_MESSAGE: &str = "server error";

/// Initialise the global `tracing` subscriber.
///
/// Respects the `RUST_LOG` environment variable. Falls back to
/// `info,tower_http=debug` when `RUST_LOG` is not set. Development mode
/// writes human-readable lines, production mode writes JSON lines.
///
/// Only the first call has an effect.
pub fn init_tracing(mode: DeployMode) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        // Another subscriber (e.g. a test harness) may already be installed.
        let _ = match mode {
            DeployMode::Production => builder.json().try_init(),
            DeployMode::Development => builder.try_init(),
        };
    });
}

/// Returns a permissive CORS layer that allows any origin, method, and headers.
pub fn default_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Returns a `TraceLayer` configured for HTTP request/response tracing.
pub fn default_trace() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Returns a `CatchPanicLayer` that converts panics into 500 responses
/// carrying an [`ErrorDetail`], so they flow through [`respond_to_errors`].
pub fn catch_panic_layer() -> CatchPanicLayer<fn(Box<dyn std::any::Any + Send>) -> Response> {
    CatchPanicLayer::custom(panic_handler as fn(_) -> _)
}

fn panic_handler(err: Box<dyn std::any::Any + Send>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "handler panicked".to_string()
    };
    let mut response = (StatusCode::INTERNAL_SERVER_ERROR, ()).into_response();
    response.extensions_mut().insert(ErrorDetail(detail));
    response
}

/// Terminal error responder.
///
/// Every response carrying an [`ErrorDetail`] is logged and its body replaced
/// by the error envelope: the detail itself in development, a fixed generic
/// message in production. Other responses pass through untouched.
pub async fn respond_to_errors(mode: DeployMode, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let status = response.status();
    tracing::error!(%method, %uri, %status, error = %detail, "request failed");

    let message = match mode {
        DeployMode::Production => PRODUCTION_ERROR_MESSAGE.to_string(),
        DeployMode::Development => detail,
    };
    let mut rewritten = error_response(status, message);
    for (name, value) in response.headers() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }
    rewritten
}
