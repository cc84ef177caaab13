//! Chunked parallel loader: split a record set into contiguous chunks of
//! at most `chunk_size`, insert every chunk on its own task and join them
//! all before returning. No retry, no cancellation; a failed chunk's
//! records are lost for this run and sibling chunks are unaffected.

use std::future::Future;

use explorer_genesis_common::store::StoreError;
use futures::future::join_all;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("chunk {chunk} failed: {message}")]
pub struct LoadError {
    pub chunk: usize,
    pub message: String,
}

/// Per-call result: payloads of the chunks that completed, in chunk
/// order, plus the errors of the chunks that did not.
pub struct LoadOutcome<R> {
    pub completed: Vec<R>,
    pub errors: Vec<LoadError>,
}

impl<R> LoadOutcome<R> {
    /// First error, for kinds where any chunk failure is fatal.
    pub fn into_result(mut self) -> Result<Vec<R>, LoadError> {
        if self.errors.is_empty() {
            Ok(self.completed)
        } else {
            Err(self.errors.remove(0))
        }
    }
}

pub async fn load_chunked<T, R, F, Fut>(
    records: Vec<T>,
    chunk_size: usize,
    insert: F,
) -> LoadOutcome<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(Vec<T>) -> Fut,
    Fut: Future<Output = Result<R, StoreError>> + Send + 'static,
{
    let mut handles = Vec::new();
    let chunk_size = chunk_size.max(1);

    let mut rest = records;
    while !rest.is_empty() {
        let tail = rest.split_off(chunk_size.min(rest.len()));
        let chunk = std::mem::replace(&mut rest, tail);
        handles.push(tokio::spawn(insert(chunk)));
    }

    let mut outcome = LoadOutcome {
        completed: Vec::new(),
        errors: Vec::new(),
    };
    for (chunk, joined) in join_all(handles).await.into_iter().enumerate() {
        match joined {
            Ok(Ok(payload)) => outcome.completed.push(payload),
            Ok(Err(e)) => outcome.errors.push(LoadError {
                chunk,
                message: e.to_string(),
            }),
            Err(e) => outcome.errors.push(LoadError {
                chunk,
                message: format!("task failed: {e}"),
            }),
        }
    }
    outcome
}
