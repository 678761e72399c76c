//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one table row.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{Match, Player, Statistic, Team};
use crate::normalize::{Normalized, RunSummary};

/// The four derived output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTable {
    Match,
    Team,
    Player,
    Statistic,
}

impl OutputTable {
    /// All tables, in write order.
    pub const ALL: [OutputTable; 4] = [
        OutputTable::Match,
        OutputTable::Team,
        OutputTable::Player,
        OutputTable::Statistic,
    ];

    /// Get the filename for this table.
    pub fn filename(&self) -> &'static str {
        match self {
            OutputTable::Match => "match.jsonl",
            OutputTable::Team => "team.jsonl",
            OutputTable::Player => "player.jsonl",
            OutputTable::Statistic => "statistic.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write rows, replacing the entire file.
    pub fn write_all(&self, rows: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for row in rows {
            let json = serde_json::to_string(row)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} rows to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for one output table.
    pub fn for_table(config: &StorageConfig, table: OutputTable) -> Self {
        Self::new(config.table_path(table))
    }

    /// Read all rows from the file. Blank lines are skipped, malformed lines fail.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }

        debug!("Read {} rows from {:?}", rows.len(), self.path);
        Ok(rows)
    }
}

/// Row count of a table file read back through [`JsonlReader`], `None` if absent.
pub fn table_row_count(
    config: &StorageConfig,
    table: OutputTable,
) -> Result<Option<usize>, StorageError> {
    if !config.table_path(table).exists() {
        return Ok(None);
    }

    let count = match table {
        OutputTable::Match => JsonlReader::<Match>::for_table(config, table).read_all()?.len(),
        OutputTable::Team => JsonlReader::<Team>::for_table(config, table).read_all()?.len(),
        OutputTable::Player => JsonlReader::<Player>::for_table(config, table).read_all()?.len(),
        OutputTable::Statistic => {
            JsonlReader::<Statistic>::for_table(config, table).read_all()?.len()
        }
    };
    Ok(Some(count))
}

/// Write all four derived tables into the configured output directory.
///
/// Tables are first written to staging files and only moved into place once
/// every table has been written, so a failed run leaves no new table behind.
pub fn write_tables(
    config: &StorageConfig,
    normalized: &Normalized,
) -> Result<RunSummary, StorageError> {
    let summary = match stage_tables(config, normalized).and_then(|summary| {
        check_targets(config)?;
        Ok(summary)
    }) {
        Ok(summary) => summary,
        Err(e) => {
            discard_staged(config);
            return Err(e);
        }
    };

    for table in OutputTable::ALL {
        fs::rename(config.staging_path(table), config.table_path(table))?;
    }
    info!(
        "Published {} tables to {:?}",
        OutputTable::ALL.len(),
        config.output_dir
    );

    Ok(summary)
}

fn stage_tables(config: &StorageConfig, normalized: &Normalized) -> Result<RunSummary, StorageError> {
    let matches = JsonlWriter::<Match>::new(config.staging_path(OutputTable::Match))
        .write_all(&normalized.matches)?;
    let teams = JsonlWriter::<Team>::new(config.staging_path(OutputTable::Team))
        .write_all(&normalized.teams)?;
    let players = JsonlWriter::<Player>::new(config.staging_path(OutputTable::Player))
        .write_all(&normalized.players)?;
    let statistics = JsonlWriter::<Statistic>::new(config.staging_path(OutputTable::Statistic))
        .write_all(&normalized.statistics)?;

    Ok(RunSummary {
        teams,
        matches,
        players,
        statistics,
    })
}

/// Every final path must be absent or a regular file before any rename.
fn check_targets(config: &StorageConfig) -> Result<(), StorageError> {
    for table in OutputTable::ALL {
        let target = config.table_path(table);
        if target.exists() && !target.is_file() {
            return Err(StorageError::InvalidPath(format!(
                "{} exists and is not a file",
                target.display()
            )));
        }
    }
    Ok(())
}

fn discard_staged(config: &StorageConfig) {
    for table in OutputTable::ALL {
        let staged = config.staging_path(table);
        if staged.is_file() {
            if let Err(e) = fs::remove_file(&staged) {
                warn!("Failed to remove staging file {:?}: {}", staged, e);
            }
        }
    }
}
