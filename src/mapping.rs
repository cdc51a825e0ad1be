//! Mark mapping table.
//!
//! Maps each national mark name to the rule for publishing it in the
//! jurisdiction report. A mark absent from the table is excluded from the
//! report entirely. The tabular source is read through polars.

use crate::error::{NadjError, Result};
use crate::models::{MappingCell, MarkRename};
use polars::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{debug, warn};

/// A national name that appeared more than once in the mapping source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMapping {
    pub national_name: String,
    /// Zero-based source row of the ignored entry
    pub row: usize,
}

/// Lookup from national mark name to rename rule; first entry wins
#[derive(Debug, Clone, Default)]
pub struct MarkMappingTable {
    entries: HashMap<String, MarkRename>,
    duplicates: Vec<DuplicateMapping>,
}

impl MarkMappingTable {
    /// Build from (national, jurisdiction) cell pairs in source order
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (MappingCell, MappingCell)>,
    {
        let mut table = Self::default();

        for (row, (national, jurisdiction)) in rows.into_iter().enumerate() {
            let Some(national_name) = national.as_name() else {
                debug!("Skipping mapping row {} with blank national name", row);
                continue;
            };

            match table.entries.entry(national_name) {
                Entry::Occupied(existing) => {
                    warn!(
                        "Ambiguous mapping: '{}' appears again at row {}; keeping the first entry",
                        existing.key(),
                        row
                    );
                    table.duplicates.push(DuplicateMapping {
                        national_name: existing.key().clone(),
                        row,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(jurisdiction.to_rename());
                }
            }
        }

        debug!(
            "Built mark mapping table: {} entries, {} duplicates",
            table.entries.len(),
            table.duplicates.len()
        );
        table
    }

    /// Rename rule for a national mark, `None` when the mark is not mapped
    pub fn lookup(&self, national_name: &str) -> Option<&MarkRename> {
        self.entries.get(national_name.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Duplicate national names that were ignored, in source order
    pub fn duplicates(&self) -> &[DuplicateMapping] {
        &self.duplicates
    }
}

/// Read cell pairs from the given zero-based columns of a CSV mapping source.
///
/// The first row is the header. Every column is read as text, so numeric
/// mark names keep their leading zeros and mixed columns never fail to parse.
pub fn load_mapping_rows(
    path: &Path,
    national_column: usize,
    jurisdiction_column: usize,
) -> Result<Vec<(MappingCell, MappingCell)>> {
    let columns = load_cell_columns(path, &[national_column, jurisdiction_column])?;
    let mut columns = columns.into_iter();
    let (Some(national), Some(jurisdiction)) = (columns.next(), columns.next()) else {
        return Err(NadjError::MappingSource {
            path: path.to_path_buf(),
            reason: "expected two columns".to_string(),
        });
    };

    Ok(national.into_iter().zip(jurisdiction).collect())
}

/// Read whole columns of a CSV source as cells, in the order requested
pub fn load_cell_columns(path: &Path, indices: &[usize]) -> Result<Vec<Vec<MappingCell>>> {
    if !path.exists() {
        return Err(NadjError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| NadjError::MappingSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .finish()
        .map_err(|e| NadjError::MappingSource {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    let mut cells = Vec::with_capacity(indices.len());
    for &index in indices {
        let column = df
            .get_columns()
            .get(index)
            .ok_or_else(|| NadjError::MappingSource {
                path: path.to_path_buf(),
                reason: format!(
                    "column {} requested but the source has {} columns",
                    index + 1,
                    df.width()
                ),
            })?;

        let values: Vec<MappingCell> = column
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(MappingCell::from_text)
            .collect();
        cells.push(values);
    }

    Ok(cells)
}
