//! Genesis upload pipeline: idempotency guard, snapshot conversion,
//! per-kind extraction with id resolution, and chunked parallel loading
//! into the relational store.

pub mod configuration;
pub mod convert;
pub mod extract;
pub mod guard;
pub mod loader;
pub mod pipeline;
pub mod resolver;

#[cfg(test)]
mod test_store;

pub use configuration::UploaderConfig;
pub use pipeline::{GenesisUploader, UploadError, UploadReport};
