//! Built-in plugins for cross-cutting concerns.
//!
//! Each plugin implements [`Plugin`](crate::plugin::Plugin) and is installed
//! via [`AppBuilder::with()`](crate::builder::AppBuilder::with).

use axum::extract::Request;
use axum::middleware::Next;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::builder::AppBuilder;
use crate::mode::DeployMode;
use crate::plugin::Plugin;

/// CORS plugin.
pub struct Cors {
    layer: CorsLayer,
}

impl Cors {
    /// Any origin, method, and header.
    pub fn permissive() -> Self {
        Self {
            layer: crate::layers::default_cors(),
        }
    }
}

impl Plugin for Cors {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        app.with_layer_fn(move |router| router.layer(self.layer))
    }
}

/// HTTP request/response tracing plugin.
///
/// Adds a tower-http `TraceLayer`. The global subscriber is expected to be
/// installed by [`init_tracing`](crate::layers::init_tracing) at the start of
/// `main`.
pub struct Tracing;

impl Plugin for Tracing {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        app.with_layer_fn(|router| router.layer(crate::layers::default_trace()))
    }
}

/// Health-check endpoint plugin: `GET /health` → `OK`.
pub struct Health;

impl Plugin for Health {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        app.register_routes(Router::new().route("/health", get(health_handler)))
    }
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Error-handling plugin.
///
/// Converts panics into 500 responses and installs the terminal error
/// responder ([`respond_to_errors`](crate::layers::respond_to_errors)), which
/// renders every internal error according to the deployment mode.
pub struct ErrorHandling {
    mode: DeployMode,
}

impl ErrorHandling {
    pub fn new(mode: DeployMode) -> Self {
        Self { mode }
    }

    pub fn production() -> Self {
        Self::new(DeployMode::Production)
    }
}

impl Default for ErrorHandling {
    fn default() -> Self {
        Self::new(DeployMode::Development)
    }
}

impl Plugin for ErrorHandling {
    fn should_be_last() -> bool {
        true
    }

    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        let mode = self.mode;
        app.with_layer_fn(move |router| {
            router
                .layer(crate::layers::catch_panic_layer())
                .layer(axum::middleware::from_fn(move |req: Request, next: Next| {
                    crate::layers::respond_to_errors(mode, req, next)
                }))
        })
    }
}

/// Trailing-slash normalization plugin.
///
/// Requests to `/articles/` that match no route are re-dispatched as
/// `/articles`.
pub struct NormalizePath;

impl Plugin for NormalizePath {
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
        app.enable_normalize_path()
    }
}
