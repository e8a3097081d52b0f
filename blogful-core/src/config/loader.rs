use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load and parse a YAML file, flattening it into the values map.
/// A missing file is not an error.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    load_yaml_str(&content, values)
}

/// Parse a YAML string and flatten it into the values map.
pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Flatten a YAML tree into dot-separated keys. Sequences are kept whole
/// under their parent key.
fn flatten_yaml(prefix: &str, value: &serde_yaml::Value, out: &mut HashMap<String, ConfigValue>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key_str = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from(leaf));
            }
        }
    }
}

/// `SERVER_PORT` -> `server.port`
pub(crate) fn env_key_to_config_key(env_key: &str) -> String {
    env_key.to_lowercase().replace('_', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_dotted_keys() {
        assert_eq!(env_key_to_config_key("DATABASE_URL"), "database.url");
        assert_eq!(env_key_to_config_key("APP_MODE"), "app.mode");
    }

    #[test]
    fn nested_mappings_flatten() {
        let mut values = HashMap::new();
        load_yaml_str("server:\n  port: 8000\n  host: \"0.0.0.0\"\n", &mut values).unwrap();
        assert!(matches!(values.get("server.port"), Some(ConfigValue::Integer(8000))));
        assert!(matches!(values.get("server.host"), Some(ConfigValue::String(h)) if h == "0.0.0.0"));
    }

    #[test]
    fn missing_file_is_ignored() {
        let mut values = HashMap::new();
        load_yaml_file(Path::new("/definitely/not/here.yaml"), &mut values).unwrap();
        assert!(values.is_empty());
    }
}
