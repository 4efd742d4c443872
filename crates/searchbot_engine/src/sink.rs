use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use searchbot_core::{format_block, Query, TIMESTAMP_FORMAT};
use searchbot_logging::bot_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot open results log {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("cannot write results log {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Produces the timestamp written into each block.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Destination for per-query result blocks.
pub trait ResultSink: Send + Sync {
    /// Records `urls` for `query`. Empty `urls` must not touch storage.
    fn append(&self, query: &Query, urls: &[String]) -> Result<(), PersistError>;

    /// Where results end up, for the session summary.
    fn location(&self) -> &Path;
}

/// Appends blocks to a text file that is never truncated.
#[derive(Clone)]
pub struct FileResultSink {
    path: PathBuf,
    timestamp: TimestampFn,
}

impl FileResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_timestamp(
            path,
            Arc::new(|| Local::now().format(TIMESTAMP_FORMAT).to_string()),
        )
    }

    pub fn with_timestamp(path: impl Into<PathBuf>, timestamp: TimestampFn) -> Self {
        Self {
            path: path.into(),
            timestamp,
        }
    }
}

impl ResultSink for FileResultSink {
    fn append(&self, query: &Query, urls: &[String]) -> Result<(), PersistError> {
        if urls.is_empty() {
            return Ok(());
        }

        let block = format_block(query, &(self.timestamp)(), urls);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| PersistError::Open {
                path: self.path.clone(),
                source,
            })?;
        // One write_all so the block lands contiguously.
        file.write_all(block.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| PersistError::Write {
                path: self.path.clone(),
                source,
            })?;

        bot_debug!("appended {} urls for '{}' to {:?}", urls.len(), query, self.path);
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
