use std::fs;
use std::path::Path;
use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;
use crate::utils::encoding::decode_text;

/// Read a configuration file with environment variable substitution.
///
/// `.json` / `.jsonld` files are parsed as JSON, anything else as YAML.
pub fn read_config_value(config_path: &str) -> Result<Value> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let bytes = fs::read(config_path)?;
    let content = substitute_env_vars(&decode_text(&bytes));

    let path_lower = config_path.to_lowercase();
    let value = if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
        serde_json::from_str(&content)?
    } else if content.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_yaml::from_str(&content)?
    };

    debug!("Read configuration document from {}", config_path);
    Ok(value)
}

/// Replace `${VAR_NAME}` with the variable's value; unset variables are left as-is
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static pattern");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: &Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data.clone())?;
    Ok(config)
}

/// Try each candidate path in order and return the first config that loads
pub fn load_first(paths: &[String]) -> Option<(Config, String)> {
    for path in paths {
        match Config::load(path) {
            Ok(config) => return Some((config, path.clone())),
            Err(e) => {
                debug!("Failed to load config from {}: {}", path, e);
            }
        }
    }
    None
}
