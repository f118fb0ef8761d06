//! Handler functions for `litnet config {path,get,init,export}`.

use crate::cli::ConfigAction;
use crate::config::LitnetConfig;
use litnet_core::{Error, Result};
use std::path::PathBuf;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path rather than a loaded config, since
/// `path` and `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            let config = LitnetConfig::load(config_path)?;
            println!("{}", config_value(&config, &key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
        ConfigAction::Export { docker_env } => {
            let config = LitnetConfig::load(config_path)?;
            for line in export_lines(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = LitnetConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `litnet config init` to create it)");
    }
    Ok(())
}

/// Look up a dotted key (e.g. `cache.ttl_secs`) in the resolved config.
fn config_value(config: &LitnetConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a default config file, returning where it went.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => LitnetConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = LitnetConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

fn export_lines(config: &LitnetConfig, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
