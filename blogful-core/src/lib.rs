pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod layers;
pub mod mode;
pub mod plugin;
pub mod plugins;
pub mod secure_headers;

pub use builder::{AppBuilder, NoState};
pub use config::{BlogfulConfig, ConfigError, ConfigValue, FromConfigValue};
pub use error::{error_response, ErrorDetail, HttpError};
pub use extract::JsonBody;
pub use layers::{default_cors, default_trace, init_tracing};
pub use mode::DeployMode;
pub use plugin::Plugin;
pub use plugins::{Cors, ErrorHandling, Health, NormalizePath, Tracing};
pub use secure_headers::SecureHeaders;
