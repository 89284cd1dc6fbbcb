use std::fs;
use std::path::Path;

use anyhow::Result;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::config_manager::main::Config;

/// Read JSON-LD configuration file with environment variable substitution
pub fn read_jsonld(config_path: &str) -> Result<Value> {
    let content = read_config_text(config_path)?;

    // The @context block is kept as an opaque value; nothing resolves it.
    let json_value: Value = serde_json::from_str(&content)?;
    Ok(json_value)
}

/// Read a YAML configuration file with environment variable substitution
pub fn read_yaml(config_path: &str) -> Result<Config> {
    let content = read_config_text(config_path)?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Validate configuration data against the Config model
pub fn validate_config(config_data: &Value) -> Result<Config> {
    let config: Config = serde_json::from_value(config_data.clone())?;
    Ok(config)
}

fn read_config_text(config_path: &str) -> Result<String> {
    if !Path::new(config_path).exists() {
        anyhow::bail!("Configuration file not found: {}", config_path);
    }

    let content = load_text_file_with_guess_encoding(config_path)?;
    if content.trim().is_empty() {
        anyhow::bail!("Configuration file is empty: {}", config_path);
    }

    substitute_env_vars(&content)
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables stay as written
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

/// Load text file, stripping a UTF-8 BOM and falling back to Windows-1252
pub fn load_text_file_with_guess_encoding(file_path: &str) -> Result<String> {
    let mut bytes = fs::read(file_path)?;
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes.drain(0..3);
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            debug!("{} is not UTF-8, decoding as windows-1252", file_path);
            let (cow, _, _) = encoding_rs::WINDOWS_1252.decode(err.as_bytes());
            Ok(cow.into_owned())
        }
    }
}
