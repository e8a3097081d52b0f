//! Articles CRUD service.
//!
//! [`app`] assembles the full HTTP application around an [`AppState`];
//! the `blogful` binary wires it to configuration and a SQLite pool.

pub mod controllers;
pub mod error;
pub mod models;
pub mod sanitize;
pub mod services;
pub mod settings;
pub mod state;
pub mod validation;

use axum::routing::get;
use axum::Router;
use blogful_core::{AppBuilder, Cors, ErrorHandling, Health, NormalizePath, SecureHeaders, Tracing};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::settings::Settings;
pub use crate::state::AppState;

/// Open the SQLite pool described by `settings`.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(settings.database_connections)
        .connect(&settings.database_url)
        .await
}

/// Build the application: `GET /`, the health check, and the articles routes
/// under `settings.api_prefix`, wrapped in the standard plugins.
pub fn app(state: AppState, settings: &Settings) -> AppBuilder<AppState> {
    let articles = controllers::article_controller::routes(state.clone());
    let prefix = settings.api_prefix.trim_end_matches('/');
    let api = if prefix.is_empty() {
        articles
    } else {
        Router::new().nest(prefix, articles)
    };

    AppBuilder::new()
        .with_state(state)
        .register_routes(Router::new().route("/", get(hello)))
        .register_routes(api)
        .with(Health)
        .with(NormalizePath)
        .with(SecureHeaders::default())
        .with(Cors::permissive())
        .with(Tracing)
        .with(ErrorHandling::new(settings.mode))
}

async fn hello() -> &'static str {
    "Hello, world!"
}
