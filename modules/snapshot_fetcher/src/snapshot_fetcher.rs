//! Concrete snapshot sources: the node's genesis endpoint over HTTP and
//! a local genesis JSON file.

pub mod configuration;

use std::time::Duration;

use async_trait::async_trait;
use explorer_genesis_common::source::{SnapshotSource, SourceError};
use explorer_genesis_common::wire::RawGenesis;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::configuration::SnapshotConfig;

/// Fetches the genesis snapshot from the node's HTTP API.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(config: &SnapshotConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| SourceError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: config.node_url.clone(),
        })
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch(&self) -> Result<RawGenesis, SourceError> {
        info!("Fetching genesis snapshot from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        Ok(parse_genesis(&body)?)
    }
}

/// Reads the genesis snapshot from a local JSON file.
pub struct FileSource {
    path: String,
}

impl FileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch(&self) -> Result<RawGenesis, SourceError> {
        info!("Reading genesis snapshot from {}", self.path);

        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|e| SourceError::File(self.path.clone(), e))?;

        Ok(parse_genesis(&body)?)
    }
}

/// Some node deployments serve the genesis bare, others wrapped in a
/// Tendermint RPC envelope under `result.genesis`. Accept both.
#[derive(Deserialize)]
struct RpcEnvelope {
    result: RpcResult,
}

#[derive(Deserialize)]
struct RpcResult {
    genesis: RawGenesis,
}

fn parse_genesis(body: &[u8]) -> Result<RawGenesis, serde_json::Error> {
    match serde_json::from_slice::<RawGenesis>(body) {
        Ok(genesis) => Ok(genesis),
        Err(bare_error) => serde_json::from_slice::<RpcEnvelope>(body)
            .map(|envelope| envelope.result.genesis)
            .map_err(|_| bare_error),
    }
}
