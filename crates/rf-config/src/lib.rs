//! rf-config: engine configuration file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_config};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_yaml(content: &str) -> ConfigResult<EngineConfig> {
    let config: EngineConfig = serde_yaml::from_str(content)?;
    finish(config)
}

pub fn parse_json(content: &str) -> ConfigResult<EngineConfig> {
    let config: EngineConfig = serde_json::from_str(content)?;
    finish(config)
}

pub fn load_yaml(path: &std::path::Path) -> ConfigResult<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

pub fn load_json(path: &std::path::Path) -> ConfigResult<EngineConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_json(&content)
}

/// Load a configuration, choosing the format from the file extension.
pub fn load(path: &std::path::Path) -> ConfigResult<EngineConfig> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

fn finish(config: EngineConfig) -> ConfigResult<EngineConfig> {
    let config = migrate_to_latest(config)?;
    validate_config(&config)?;
    Ok(config)
}
