//! Subset/merge engine.
//!
//! Walks the national `.xyz` data rows in file order, keeps the marks that
//! have a mapping entry, applies the rename rule, appends the positional
//! uncertainty figures and wraps the result in the report preamble, column
//! header and trailer. Pure: no file access, no clock.

use crate::config::NadjConfig;
use crate::constants::END_OF_REPORT;
use crate::error::{NadjError, Result};
use crate::header::{build_column_header, build_preamble};
use crate::layout::{XYZ_LAYOUT, slice_field};
use crate::mapping::MarkMappingTable;
use crate::models::{MarkRename, MergeStats, OutputDocument, PositionRecord, SourceIdentifiers};
use crate::uncertainty::UncertaintyIndex;
use tracing::{debug, trace};

/// Inputs describing one extraction run
#[derive(Debug, Clone)]
pub struct MergeContext<'a> {
    pub jurisdiction: &'a str,
    pub sources: &'a SourceIdentifiers,
    /// Formatted processing timestamp, computed once per run
    pub timestamp: &'a str,
    pub config: &'a NadjConfig,
}

/// Assemble the jurisdiction report from the national files.
///
/// `xyz_lines` and `apu_lines` are the full file contents without line
/// terminators.
pub fn run(
    xyz_lines: &[&str],
    apu_lines: &[&str],
    uncertainty: &UncertaintyIndex,
    mapping: &MarkMappingTable,
    context: &MergeContext<'_>,
) -> Result<(OutputDocument, MergeStats)> {
    let config = context.config;
    let preamble = build_preamble(
        apu_lines,
        context.jurisdiction,
        context.sources,
        context.timestamp,
        config,
    );
    let column_header =
        build_column_header(xyz_lines, context.jurisdiction, &context.sources.xyz, config)?;

    let mut stats = MergeStats::default();
    let mut records = Vec::new();
    let station_spec = XYZ_LAYOUT.fields[0];

    for (index, line) in xyz_lines.iter().enumerate().skip(config.data_start_line) {
        if line.trim().is_empty() {
            continue;
        }
        stats.records_scanned += 1;

        let national_name = slice_field(line, station_spec.start, station_spec.end).trim();
        let Some(rename) = mapping.lookup(national_name) else {
            trace!("Dropping unmapped station '{}'", national_name);
            continue;
        };

        let mut record = PositionRecord::decode(line).map_err(|short| NadjError::MalformedRecord {
            source_name: context.sources.xyz.clone(),
            line_number: index + 1,
            line: line.to_string(),
            required: short.required,
            found: short.found,
        })?;

        let figures = uncertainty.lookup(&record.station).ok_or_else(|| {
            NadjError::UnmappedUncertainty {
                station: record.station.clone(),
            }
        })?;

        match rename {
            MarkRename::Replace(_) => stats.renamed += 1,
            MarkRename::KeepOriginal => stats.adopted += 1,
        }

        record.description = rename.resolve(&record.station).to_string();
        record.hz_pos_u = Some(figures.hz_pos_u.clone());
        record.vt_pos_u = Some(figures.vt_pos_u.clone());
        records.push(record.to_report_line());
    }

    stats.records_emitted = records.len();
    debug!(
        "Merged {} of {} position records ({} renamed, {} adopted)",
        stats.records_emitted, stats.records_scanned, stats.renamed, stats.adopted
    );

    let document = OutputDocument {
        preamble,
        column_header,
        records,
        trailer: END_OF_REPORT.to_string(),
    };
    Ok((document, stats))
}
