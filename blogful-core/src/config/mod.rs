mod loader;
pub mod value;

use std::collections::HashMap;
use std::path::Path;

pub use value::{ConfigValue, FromConfigValue};

/// Environment variable naming the active profile. Takes precedence over the
/// profile passed to [`BlogfulConfig::load`].
pub const PROFILE_ENV: &str = "BLOGFUL_PROFILE";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(String),
    TypeMismatch { key: String, expected: &'static str },
    /// Unreadable file or invalid YAML.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Flat, dot-keyed view of the service configuration.
///
/// Sources, later ones winning:
///
/// | Source | Example |
/// |--------|---------|
/// | `application.yaml` | `server: { port: 8000 }` |
/// | `application-{profile}.yaml` | `server: { port: 9000 }` |
/// | `.env`, `.env.{profile}` | `SERVER_PORT=9100` (never overwrites set variables) |
/// | process environment | `SERVER_PORT=9200` → `server.port` |
#[derive(Debug, Clone)]
pub struct BlogfulConfig {
    values: HashMap<String, ConfigValue>,
    profile: String,
}

impl BlogfulConfig {
    /// Load from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());
        let mut values = HashMap::new();

        for file in ["application.yaml".to_string(), format!("application-{profile}.yaml")] {
            loader::load_yaml_file(&dir.join(file), &mut values)?;
        }

        for file in [".env".to_string(), format!(".env.{profile}")] {
            if let Err(e) = dotenvy::from_path(dir.join(&file)) {
                if !e.not_found() {
                    tracing::warn!(file = %file, error = %e, "ignoring unreadable env file");
                }
            }
        }

        values.extend(
            std::env::vars()
                .map(|(key, val)| (loader::env_key_to_config_key(&key), ConfigValue::String(val))),
        );

        tracing::debug!(%profile, keys = values.len(), "configuration loaded");
        Ok(BlogfulConfig { values, profile })
    }

    /// Build a config from YAML text alone, without files or environment.
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(BlogfulConfig {
            values,
            profile: profile.to_string(),
        })
    }

    /// An empty config under the `test` profile.
    pub fn empty() -> Self {
        BlogfulConfig {
            values: HashMap::new(),
            profile: "test".to_string(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        match self.values.get(key) {
            Some(value) => V::from_config_value(value, key),
            None => Err(ConfigError::NotFound(key.to_string())),
        }
    }

    /// Like [`get`](Self::get), but an absent key yields `default`. A present
    /// value of the wrong type is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}
