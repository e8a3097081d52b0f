use std::future::Future;
use std::pin::Pin;

use axum::extract::Request;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tower::ServiceExt;

use crate::plugin::Plugin;

/// State placeholder until [`AppBuilder::with_state`] is called.
#[derive(Clone)]
pub struct NoState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type BoxFuture<O> = Pin<Box<dyn Future<Output = O> + Send>>;
type RouterFn = Box<dyn FnOnce(Router) -> Router + Send>;
type StartHook<T> = Box<dyn FnOnce(T) -> BoxFuture<Result<(), BoxError>> + Send>;
type StopHook = Box<dyn FnOnce() -> BoxFuture<()> + Send>;

/// Collects route fragments, plugins and lifecycle hooks, then produces an
/// `axum::Router` ([`build`](Self::build)) or runs it ([`serve`](Self::serve)).
///
/// ```ignore
/// AppBuilder::new()
///     .with_state(state)
///     .register_routes(routes)
///     .with(Tracing)
///     .with(ErrorHandling::new(mode))
///     .serve("127.0.0.1:8000")
///     .await?;
/// ```
pub struct AppBuilder<T: Clone + Send + Sync + 'static = NoState> {
    state: Option<T>,
    routes: Vec<Router<T>>,
    wrappers: Vec<RouterFn>,
    on_start: Vec<StartHook<T>>,
    on_stop: Vec<StopHook>,
    normalize_path: bool,
    outermost: Option<&'static str>,
}

impl AppBuilder<NoState> {
    pub fn new() -> Self {
        Self {
            state: None,
            routes: Vec::new(),
            wrappers: Vec::new(),
            on_start: Vec::new(),
            on_stop: Vec::new(),
            normalize_path: false,
            outermost: None,
        }
    }

    /// Fix the application state. Routes and start hooks are typed by it, so
    /// they must be registered afterwards.
    pub fn with_state<S: Clone + Send + Sync + 'static>(self, state: S) -> AppBuilder<S> {
        AppBuilder {
            state: Some(state),
            routes: Vec::new(),
            wrappers: self.wrappers,
            on_start: Vec::new(),
            on_stop: self.on_stop,
            normalize_path: self.normalize_path,
            outermost: self.outermost,
        }
    }
}

impl Default for AppBuilder<NoState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> AppBuilder<T> {
    /// Install a [`Plugin`].
    pub fn with<P: Plugin>(mut self, plugin: P) -> Self {
        if let Some(outermost) = self.outermost {
            tracing::warn!(
                outermost,
                plugin = P::name(),
                "plugin installed after one that expects to be the outermost layer"
            );
        }
        if P::should_be_last() {
            self.outermost = Some(P::name());
        }
        plugin.install(self)
    }

    pub(crate) fn enable_normalize_path(mut self) -> Self {
        self.normalize_path = true;
        self
    }

    /// Transform the finished router, typically to add a layer. Applied in
    /// registration order, so the last one ends up outermost.
    pub fn with_layer_fn<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.wrappers.push(Box::new(f));
        self
    }

    pub fn register_routes(mut self, router: Router<T>) -> Self {
        self.routes.push(router);
        self
    }

    /// Run `hook` with the state before the listener is bound. An error
    /// aborts [`serve`](Self::serve).
    pub fn on_start<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.on_start.push(Box::new(move |state| Box::pin(hook(state))));
        self
    }

    /// Run `hook` after graceful shutdown completes.
    pub fn on_stop<F, Fut>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.on_stop.push(Box::new(move || Box::pin(hook())));
        self
    }

    /// # Panics
    ///
    /// If no state was set.
    pub fn build(self) -> Router {
        self.assemble().0
    }

    fn assemble(self) -> (Router, T, Vec<StartHook<T>>, Vec<StopHook>) {
        let state = self
            .state
            .expect("AppBuilder: state must be set before build");

        let merged = self
            .routes
            .into_iter()
            .fold(Router::new(), |acc, fragment| acc.merge(fragment));
        let mut app = merged.with_state(state.clone());

        if self.normalize_path {
            let inner = app.clone();
            app = app.fallback(move |req: Request| redispatch_without_trailing_slash(inner.clone(), req));
        }

        let app = self.wrappers.into_iter().fold(app, |router, wrap| wrap(router));
        (app, state, self.on_start, self.on_stop)
    }

    /// Build, run start hooks, and serve on `addr` until Ctrl-C or SIGTERM.
    pub async fn serve(self, addr: &str) -> Result<(), BoxError> {
        let (app, state, on_start, on_stop) = self.assemble();

        for hook in on_start {
            hook(state.clone()).await?;
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, "blogful listening");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        for hook in on_stop {
            hook().await;
        }
        tracing::info!("blogful stopped");
        Ok(())
    }
}

/// Fallback for unmatched requests: `/articles/` is retried as `/articles`,
/// anything else is a plain 404.
async fn redispatch_without_trailing_slash(inner: Router, req: Request) -> Response {
    let path = req.uri().path();
    if path.len() <= 1 || !path.ends_with('/') {
        return StatusCode::NOT_FOUND.into_response();
    }

    let trimmed = path.trim_end_matches('/');
    let target = match req.uri().query() {
        Some(query) => format!("{trimmed}?{query}"),
        None => trimmed.to_string(),
    };
    let (mut parts, body) = req.into_parts();
    if let Ok(uri) = target.parse::<Uri>() {
        parts.uri = uri;
    }

    match inner.oneshot(Request::from_parts(parts, body)).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
