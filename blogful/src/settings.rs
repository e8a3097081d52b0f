use blogful_core::{BlogfulConfig, ConfigError, DeployMode};

/// Typed view of the service configuration keys.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_connections: u32,
    pub api_prefix: String,
    pub mode: DeployMode,
}

impl Settings {
    /// Read the service keys, falling back to defaults for absent ones.
    /// `app.mode` defaults to the mode implied by the config profile.
    pub fn from_config(config: &BlogfulConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            host: config.get_or("server.host", "127.0.0.1".to_string())?,
            port: config.get_or("server.port", 8000)?,
            database_url: config.get_or("database.url", "sqlite:blogful.db?mode=rwc".to_string())?,
            database_connections: config.get_or("database.connections", 5)?,
            api_prefix: config.get_or("api.prefix", "/api".to_string())?,
            mode: config.get_or("app.mode", DeployMode::from_profile(config.profile()))?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_url: "sqlite:blogful.db?mode=rwc".to_string(),
            database_connections: 5,
            api_prefix: "/api".to_string(),
            mode: DeployMode::Development,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_config() {
        let settings = Settings::from_config(&BlogfulConfig::empty()).unwrap();
        assert_eq!(settings.addr(), "127.0.0.1:8000");
        assert_eq!(settings.database_connections, 5);
        assert_eq!(settings.api_prefix, "/api");
        assert_eq!(settings.mode, DeployMode::Development);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = "server:\n  port: 9000\napi:\n  prefix: /v1\napp:\n  mode: production\n";
        let config = BlogfulConfig::from_yaml_str(yaml, "dev").unwrap();
        let settings = Settings::from_config(&config).unwrap();
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.api_prefix, "/v1");
        assert_eq!(settings.mode, DeployMode::Production);
    }

    #[test]
    fn production_profile_implies_production_mode() {
        let config = BlogfulConfig::from_yaml_str("{}", "production").unwrap();
        assert!(Settings::from_config(&config).unwrap().mode.is_production());
    }
}
