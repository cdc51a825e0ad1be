//! Configuration management and validation.
//!
//! Holds the layout-specific line positions of the national adjustment
//! files and the report labels, so that a change in the national output
//! format is a one-place edit.

use crate::error::{NadjError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range of zero-based line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, line: usize) -> bool {
        self.as_range().contains(&line)
    }
}

/// Global configuration for jurisdiction extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NadjConfig {
    /// Descriptive lines of the `.apu` file copied into the report preamble
    pub preamble_lines: LineRange,

    /// Column-header block of the `.xyz` file copied into the report
    pub column_header_lines: LineRange,

    /// Line of the `.xyz` file carrying the column labels
    pub column_label_line: usize,

    /// First data row of the `.xyz` file
    pub data_start_line: usize,

    /// First data row of a jurisdiction report
    pub report_data_start_line: usize,

    /// Generic label replaced by the jurisdiction station-name label
    pub description_label: String,

    /// Label printed after the processing timestamp
    pub timezone_label: String,
}

impl Default for NadjConfig {
    fn default() -> Self {
        Self {
            preamble_lines: LineRange::new(0, 12),
            column_header_lines: LineRange::new(15, 20),
            column_label_line: 18,
            data_start_line: 20,
            report_data_start_line: 26,
            description_label: "Description".to_string(),
            timezone_label: "AEST".to_string(),
        }
    }
}

impl NadjConfig {
    /// Override the `.apu` preamble block
    pub fn with_preamble_lines(mut self, start: usize, end: usize) -> Self {
        self.preamble_lines = LineRange::new(start, end);
        self
    }

    /// Override the `.xyz` column-header block and its label line
    pub fn with_column_header(mut self, start: usize, end: usize, label_line: usize) -> Self {
        self.column_header_lines = LineRange::new(start, end);
        self.column_label_line = label_line;
        self
    }

    /// Override the first `.xyz` data row
    pub fn with_data_start_line(mut self, line: usize) -> Self {
        self.data_start_line = line;
        self
    }

    /// Override the first data row of a jurisdiction report
    pub fn with_report_data_start_line(mut self, line: usize) -> Self {
        self.report_data_start_line = line;
        self
    }

    /// Override the timezone label
    pub fn with_timezone_label(mut self, label: impl Into<String>) -> Self {
        self.timezone_label = label.into();
        self
    }

    /// Check the line positions are consistent with each other
    pub fn validate(&self) -> Result<()> {
        if self.preamble_lines.start > self.preamble_lines.end {
            return Err(NadjError::configuration(format!(
                "Preamble range {}..{} is reversed",
                self.preamble_lines.start, self.preamble_lines.end
            )));
        }

        if !self.column_header_lines.contains(self.column_label_line) {
            return Err(NadjError::configuration(format!(
                "Column label line {} is outside the column header block {}..{}",
                self.column_label_line, self.column_header_lines.start, self.column_header_lines.end
            )));
        }

        if self.data_start_line < self.column_header_lines.end {
            return Err(NadjError::configuration(format!(
                "Data start line {} overlaps the column header block ending at {}",
                self.data_start_line, self.column_header_lines.end
            )));
        }

        if self.description_label.is_empty() {
            return Err(NadjError::configuration(
                "Description label cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
