//! Plugin system.
//!
//! Plugins are composable units of functionality that can be installed into an
//! [`AppBuilder`] using the `.with(plugin)` method.

use crate::builder::AppBuilder;

/// A composable unit of functionality that can be installed into an [`AppBuilder`].
///
/// Plugins are installed once the application state is known. They can:
/// - Add layers to the router
/// - Register routes
/// - Register startup/shutdown hooks
///
/// # Example
///
/// ```ignore
/// use blogful_core::Plugin;
///
/// pub struct Ping;
///
/// impl Plugin for Ping {
///     fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T> {
///         app.register_routes(Router::new().route("/ping", get(|| async { "pong" })))
///     }
/// }
/// ```
pub trait Plugin: Send + 'static {
    /// Install this plugin into the given `AppBuilder`, returning the modified builder.
    fn install<T: Clone + Send + Sync + 'static>(self, app: AppBuilder<T>) -> AppBuilder<T>;

    /// Whether this plugin should be the outermost layer (installed last).
    /// The builder warns when another plugin is installed after it.
    fn should_be_last() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Name used in builder diagnostics.
    fn name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}
