use anyhow::Result;
use config::Config;
use serde::Deserialize;

/// Snapshot source configuration (from TOML, `[snapshot]` table).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SnapshotConfig {
    pub node_url: String,
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
    #[serde(default = "defaults::connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl SnapshotConfig {
    pub fn try_load(config: &Config) -> Result<Self> {
        let full = Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config.default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config.clone())
            .build()?;
        Ok(full.get("snapshot")?)
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        300
    }
    pub fn connect_timeout() -> u64 {
        30
    }
}
