//! Core data structures for jurisdiction extraction.
//!
//! Defines the decoded position and uncertainty records, the rename rule
//! carried by each mapping entry, the assembled output document and the
//! processing statistics reported by the CLI.

use crate::layout::{DecodedRecord, RecordTooShort, REPORT_LAYOUT, XYZ_LAYOUT, field};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What happens to a national mark's name in the jurisdiction report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkRename {
    /// Publish the mark under the jurisdiction's own name
    Replace(String),
    /// Keep the national name unchanged
    KeepOriginal,
}

impl MarkRename {
    /// Name to publish for a mark whose national name is `national_name`
    pub fn resolve<'a>(&'a self, national_name: &'a str) -> &'a str {
        match self {
            MarkRename::Replace(name) => name,
            MarkRename::KeepOriginal => national_name,
        }
    }
}

/// A single cell read from a tabular source, before normalization.
///
/// Cells are always read as text so that identifiers such as `0123`
/// survive unchanged; a missing or empty cell is `Blank`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingCell {
    Blank,
    Text(String),
}

impl MappingCell {
    pub fn from_text(value: Option<&str>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => MappingCell::Text(text.to_string()),
            _ => MappingCell::Blank,
        }
    }

    /// Trimmed name, or `None` when the cell carries no name
    pub fn as_name(&self) -> Option<String> {
        match self {
            MappingCell::Blank => None,
            MappingCell::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }

    /// Normalize a jurisdiction-name cell into a rename rule
    pub fn to_rename(&self) -> MarkRename {
        match self.as_name() {
            Some(name) => MarkRename::Replace(name),
            None => MarkRename::KeepOriginal,
        }
    }
}

/// One data row of the national adjustment position file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub station: String,
    pub constraint: String,
    pub easting: String,
    pub northing: String,
    pub zone: String,
    pub latitude: String,
    pub longitude: String,
    pub h_ortho: String,
    pub h_ellipse: String,
    pub x: String,
    pub y: String,
    pub z: String,
    pub sd_e: String,
    pub sd_n: String,
    pub sd_up: String,
    pub description: String,
    pub hz_pos_u: Option<String>,
    pub vt_pos_u: Option<String>,
}

impl PositionRecord {
    /// Decode a national `.xyz` data row
    pub fn decode(line: &str) -> Result<Self, RecordTooShort> {
        let record = XYZ_LAYOUT.decode(line)?;
        Ok(Self::from_decoded(&record))
    }

    /// Build from decoded fields; uncertainty columns are kept when present
    pub fn from_decoded(record: &DecodedRecord) -> Self {
        let optional = |name: &str| record.get(name).map(str::to_string);
        Self {
            station: record.value(field::STATION).to_string(),
            constraint: record.value(field::CONSTRAINT).to_string(),
            easting: record.value(field::EASTING).to_string(),
            northing: record.value(field::NORTHING).to_string(),
            zone: record.value(field::ZONE).to_string(),
            latitude: record.value(field::LATITUDE).to_string(),
            longitude: record.value(field::LONGITUDE).to_string(),
            h_ortho: record.value(field::H_ORTHO).to_string(),
            h_ellipse: record.value(field::H_ELLIPSE).to_string(),
            x: record.value(field::X).to_string(),
            y: record.value(field::Y).to_string(),
            z: record.value(field::Z).to_string(),
            sd_e: record.value(field::SD_E).to_string(),
            sd_n: record.value(field::SD_N).to_string(),
            sd_up: record.value(field::SD_UP).to_string(),
            description: record.value(field::DESCRIPTION).to_string(),
            hz_pos_u: optional(field::HZ_POS_U),
            vt_pos_u: optional(field::VT_POS_U),
        }
    }

    fn field_value(&self, name: &str) -> Option<&str> {
        let value = match name {
            field::STATION => &self.station,
            field::CONSTRAINT => &self.constraint,
            field::EASTING => &self.easting,
            field::NORTHING => &self.northing,
            field::ZONE => &self.zone,
            field::LATITUDE => &self.latitude,
            field::LONGITUDE => &self.longitude,
            field::H_ORTHO => &self.h_ortho,
            field::H_ELLIPSE => &self.h_ellipse,
            field::X => &self.x,
            field::Y => &self.y,
            field::Z => &self.z,
            field::SD_E => &self.sd_e,
            field::SD_N => &self.sd_n,
            field::SD_UP => &self.sd_up,
            field::DESCRIPTION => &self.description,
            field::HZ_POS_U => return self.hz_pos_u.as_deref(),
            field::VT_POS_U => return self.vt_pos_u.as_deref(),
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Encode as a jurisdiction report row (`REPORT_LAYOUT`, 232 characters)
    pub fn to_report_line(&self) -> String {
        REPORT_LAYOUT.encode(|name| self.field_value(name))
    }
}

/// One data row of the national positional uncertainty file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UncertaintyRecord {
    pub station: String,
    pub hz_pos_u: String,
    pub vt_pos_u: String,
}

/// Source identifiers echoed into the report preamble, as supplied by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceIdentifiers {
    pub xyz: String,
    pub apu: String,
    pub mapping: String,
}

/// Fully materialized jurisdiction report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    pub preamble: Vec<String>,
    pub column_header: Vec<String>,
    pub records: Vec<String>,
    pub trailer: String,
}

impl OutputDocument {
    /// All lines in output order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.preamble
            .iter()
            .chain(self.column_header.iter())
            .chain(self.records.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.trailer.as_str()))
    }

    /// Render as newline-terminated text
    pub fn render(&self) -> String {
        let mut text = String::new();
        for line in self.lines() {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Counters gathered while merging
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub records_scanned: usize,
    pub records_emitted: usize,
    pub renamed: usize,
    pub adopted: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub mapping_entries: usize,
    pub duplicate_mappings: usize,
    pub uncertainty_entries: usize,
    pub merge: MergeStats,
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub processing_time_ms: u128,
}
