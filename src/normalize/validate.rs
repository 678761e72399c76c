//! Input validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. file extension
//! 2. file existence
//! 3. mandatory columns present
//! 4. no nulls in mandatory columns
//!
//! Only then are rows converted to [`InputRecord`]s. No value is coerced.

use std::path::Path;

use tracing::debug;

use super::NormalizeError;
use crate::models::InputRecord;

/// Columns every input file must carry.
pub const MANDATORY_COLUMNS: [&str; 9] = [
    "goals_scored",
    "is_home",
    "match_id",
    "match_name",
    "minutes_played",
    "player_id",
    "player_name",
    "team_id",
    "team_name",
];

/// Cell values read as missing, compared verbatim. An empty cell is also missing.
const NULL_LITERALS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header and string cells of a delimited file, before any typing.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a column in the header row.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Mandatory columns absent from the header, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        MANDATORY_COLUMNS
            .iter()
            .filter(|c| self.column_index(c).is_none())
            .map(|c| c.to_string())
            .collect()
    }

    /// Mandatory columns holding at least one null cell, in canonical order.
    pub fn null_columns(&self) -> Vec<String> {
        MANDATORY_COLUMNS
            .iter()
            .filter(|c| {
                self.column_index(c).is_some_and(|idx| {
                    self.rows
                        .iter()
                        .any(|row| row.get(idx).map_or(true, |cell| is_null(cell)))
                })
            })
            .map(|c| c.to_string())
            .collect()
    }
}

fn is_null(cell: &str) -> bool {
    cell.is_empty() || NULL_LITERALS.contains(&cell)
}

/// Read a delimited file with a header row into a [`RawTable`].
///
/// Short rows are kept as they are; their absent trailing cells count as null.
pub fn read_raw_table(path: &Path) -> Result<RawTable, NormalizeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Validate `input_dir/filename` and return its rows as typed records.
pub fn load_input(input_dir: &Path, filename: &str) -> Result<Vec<InputRecord>, NormalizeError> {
    let has_csv_extension = Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !has_csv_extension {
        return Err(NormalizeError::Format(filename.to_string()));
    }

    let path = input_dir.join(filename);
    if !path.is_file() {
        return Err(NormalizeError::NotFound(path));
    }

    let table = read_raw_table(&path)?;
    debug!(
        "Read {} rows with {} columns from {:?}",
        table.rows.len(),
        table.headers.len(),
        path
    );

    validate_table(&table)?;
    to_records(&table)
}

/// Check the column set and completeness of a raw table.
pub fn validate_table(table: &RawTable) -> Result<(), NormalizeError> {
    let missing = table.missing_columns();
    if !missing.is_empty() {
        return Err(NormalizeError::Schema { missing });
    }

    let columns = table.null_columns();
    if !columns.is_empty() {
        return Err(NormalizeError::DataQuality { columns });
    }

    Ok(())
}

/// Convert a validated raw table into typed records, in row order.
pub fn to_records(table: &RawTable) -> Result<Vec<InputRecord>, NormalizeError> {
    let mut indices = [0usize; MANDATORY_COLUMNS.len()];
    for (slot, column) in indices.iter_mut().zip(MANDATORY_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or_else(|| NormalizeError::Schema {
                missing: vec![column.to_string()],
            })?;
    }
    let [
        goals_scored,
        is_home,
        match_id,
        match_name,
        minutes_played,
        player_id,
        player_name,
        team_id,
        team_name,
    ] = indices;

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| -> Result<InputRecord, NormalizeError> {
            let cells = RowCells { row, number: i + 1 };
            Ok(InputRecord {
                match_id: cells.int(match_id, "match_id")?,
                match_name: cells.text(match_name),
                team_id: cells.int(team_id, "team_id")?,
                team_name: cells.text(team_name),
                player_id: cells.int(player_id, "player_id")?,
                player_name: cells.text(player_name),
                goals_scored: cells.int(goals_scored, "goals_scored")?,
                minutes_played: cells.int(minutes_played, "minutes_played")?,
                is_home: cells.flag(is_home, "is_home")?,
            })
        })
        .collect()
}

/// Typed access to one row's cells.
struct RowCells<'a> {
    row: &'a [String],
    number: usize,
}

impl RowCells<'_> {
    fn raw(&self, idx: usize) -> &str {
        self.row.get(idx).map(String::as_str).unwrap_or_default()
    }

    fn text(&self, idx: usize) -> String {
        self.raw(idx).to_string()
    }

    fn int<T: std::str::FromStr>(&self, idx: usize, column: &str) -> Result<T, NormalizeError> {
        let value = self.raw(idx);
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid(column, value, "a non-negative integer"))
    }

    fn flag(&self, idx: usize, column: &str) -> Result<bool, NormalizeError> {
        let value = self.raw(idx);
        match value.trim() {
            v if v.eq_ignore_ascii_case("true") => Ok(true),
            v if v.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.invalid(column, value, "true or false")),
        }
    }

    fn invalid(&self, column: &str, value: &str, expected: &'static str) -> NormalizeError {
        NormalizeError::InvalidValue {
            row: self.number,
            column: column.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}
