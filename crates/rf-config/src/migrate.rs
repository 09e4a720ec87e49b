//! Configuration format migration.

use crate::ConfigError;
use crate::schema::EngineConfig;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut config: EngineConfig) -> Result<EngineConfig, ConfigError> {
    while config.version < LATEST_VERSION {
        config = migrate_one_version(config)?;
    }
    Ok(config)
}

fn migrate_one_version(config: EngineConfig) -> Result<EngineConfig, ConfigError> {
    match config.version {
        0 => migrate_v0_to_v1(config),
        v => Err(ConfigError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

// Unversioned files share the v1 layout.
fn migrate_v0_to_v1(mut config: EngineConfig) -> Result<EngineConfig, ConfigError> {
    tracing::debug!(name = %config.name, "promoting unversioned engine config to v1");
    config.version = 1;
    Ok(config)
}
