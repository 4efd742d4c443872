use std::fs;
use std::io;
use std::path::PathBuf;

use searchbot_core::{parse_queries, Query, DEFAULT_QUERIES_TEMPLATE};
use searchbot_logging::{bot_info, bot_warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot create query template {path:?}: {source}")]
    Template { path: PathBuf, source: io::Error },
    #[error("cannot read queries from {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Line-oriented query file.
#[derive(Debug, Clone)]
pub struct QuerySource {
    path: PathBuf,
}

impl QuerySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the queries in file order, writing the commented template first
    /// when the file is missing.
    pub fn load(&self) -> Result<Vec<Query>, SourceError> {
        self.ensure_template()?;

        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let queries = parse_queries(&text);
        bot_info!("Loaded {} queries from {:?}", queries.len(), self.path);
        Ok(queries)
    }

    fn ensure_template(&self) -> Result<(), SourceError> {
        if self.path.exists() {
            return Ok(());
        }
        bot_warn!("{:?} not found, creating a sample query file", self.path);
        fs::write(&self.path, DEFAULT_QUERIES_TEMPLATE).map_err(|source| SourceError::Template {
            path: self.path.clone(),
            source,
        })
    }
}
