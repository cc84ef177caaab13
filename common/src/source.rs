//! Snapshot source boundary: a single atomic read of the full genesis
//! snapshot, no pagination or streaming.

use async_trait::async_trait;
use thiserror::Error;

use crate::wire::RawGenesis;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("snapshot request failed: {0}")]
    Request(String),

    #[error("snapshot endpoint returned HTTP status {0}")]
    Status(u16),

    #[error("cannot read snapshot file {0}: {1}")]
    File(String, std::io::Error),

    #[error("malformed snapshot payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self) -> Result<RawGenesis, SourceError>;
}
