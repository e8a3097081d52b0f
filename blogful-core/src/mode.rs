use std::str::FromStr;

use crate::config::{ConfigError, ConfigValue, FromConfigValue};

/// Deployment mode of the running service.
///
/// Drives two things: how much of an internal error reaches the client, and
/// the log output format chosen by [`init_tracing`](crate::layers::init_tracing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeployMode {
    #[default]
    Development,
    Production,
}

impl DeployMode {
    /// Derive the mode from a config profile name. Only `production` (or
    /// `prod`) selects production; every other profile is development.
    pub fn from_profile(profile: &str) -> Self {
        profile.parse().unwrap_or(DeployMode::Development)
    }

    pub fn is_production(self) -> bool {
        self == DeployMode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeployMode::Development => "development",
            DeployMode::Production => "production",
        }
    }
}

impl std::fmt::Display for DeployMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeployMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(DeployMode::Production),
            "development" | "dev" | "test" => Ok(DeployMode::Development),
            other => Err(format!("unknown deploy mode '{other}'")),
        }
    }
}

impl FromConfigValue for DeployMode {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        let raw = String::from_config_value(value, key)?;
        raw.parse().map_err(|_| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: "DeployMode",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_production_profiles_select_production() {
        assert_eq!(DeployMode::from_profile("production"), DeployMode::Production);
        assert_eq!(DeployMode::from_profile("PROD"), DeployMode::Production);
        assert_eq!(DeployMode::from_profile("dev"), DeployMode::Development);
        assert_eq!(DeployMode::from_profile("staging"), DeployMode::Development);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!("staging".parse::<DeployMode>().is_err());
        assert_eq!("test".parse::<DeployMode>(), Ok(DeployMode::Development));
    }
}
