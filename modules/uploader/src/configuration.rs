use anyhow::Result;
use config::Config;
use serde::Deserialize;

/// Upload pipeline configuration (from TOML, `[uploader]` table).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UploaderConfig {
    /// Symbol of the synthesized base coin (coin id 0).
    #[serde(default = "defaults::base_coin")]
    pub base_coin: String,
    #[serde(default)]
    pub chunk_sizes: ChunkSizes,
}

/// Per-entity batch insert sizes. One configuration surface for every
/// kind; unbonds reuse the stake size.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChunkSizes {
    #[serde(default = "defaults::chunk")]
    pub address: usize,
    #[serde(default = "defaults::chunk")]
    pub coin: usize,
    #[serde(default = "defaults::chunk")]
    pub balance: usize,
    #[serde(default = "defaults::chunk")]
    pub stake: usize,
    #[serde(default = "defaults::chunk")]
    pub validator: usize,
    #[serde(default = "defaults::chunk")]
    pub order: usize,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            base_coin: defaults::base_coin(),
            chunk_sizes: ChunkSizes::default(),
        }
    }
}

impl Default for ChunkSizes {
    fn default() -> Self {
        Self {
            address: defaults::chunk(),
            coin: defaults::chunk(),
            balance: defaults::chunk(),
            stake: defaults::chunk(),
            validator: defaults::chunk(),
            order: defaults::chunk(),
        }
    }
}

impl UploaderConfig {
    pub fn try_load(config: &Config) -> Result<Self> {
        let full = Config::builder()
            .add_source(config::File::from_str(
                include_str!("../config.default.toml"),
                config::FileFormat::Toml,
            ))
            .add_source(config.clone())
            .build()?;
        Ok(full.get("uploader")?)
    }
}

mod defaults {
    pub fn base_coin() -> String {
        "BIP".to_string()
    }
    pub fn chunk() -> usize {
        1000
    }
}
