//! Output storage.
//!
//! Writes the derived tables as JSONL files into a single output directory:
//! - `match.jsonl`
//! - `team.jsonl`
//! - `player.jsonl`
//! - `statistic.jsonl`

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Path of one table's output file.
    pub fn table_path(&self, table: OutputTable) -> PathBuf {
        self.output_dir.join(table.filename())
    }

    /// Path a table is written to before being moved into place.
    pub fn staging_path(&self, table: OutputTable) -> PathBuf {
        self.output_dir.join(format!("{}.tmp", table.filename()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./output"))
    }
}
