//! Report preamble and column-header assembly.
//!
//! The preamble is the descriptive block of the `.apu` file followed by the
//! extraction metadata. The column header is the `.xyz` header block with the
//! generic description label replaced by the jurisdiction's station-name
//! label and the two uncertainty labels appended.

use crate::config::NadjConfig;
use crate::constants::{
    HZ_POS_U_LABEL, REPORT_NOTES, STATION_NAME_LABEL_SUFFIX, STATION_NAME_WIDTH,
    UNCERTAINTY_FIELD_WIDTH, VT_POS_U_LABEL,
};
use crate::error::{NadjError, Result};
use crate::layout::pad_to_width;
use crate::models::SourceIdentifiers;
use chrono::{DateTime, TimeZone};
use tracing::{debug, warn};

/// Processing timestamp in the report's unpadded `Y-M-D H:M:S` form
pub fn format_timestamp<Tz: TimeZone>(processed_at: &DateTime<Tz>, timezone_label: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} {}",
        processed_at.format("%Y-%-m-%-d %-H:%-M:%-S"),
        timezone_label
    )
}

/// Build the preamble: `.apu` descriptive lines, then extraction metadata
pub fn build_preamble(
    apu_lines: &[&str],
    jurisdiction: &str,
    sources: &SourceIdentifiers,
    timestamp: &str,
    config: &NadjConfig,
) -> Vec<String> {
    let range = config.preamble_lines;
    if apu_lines.len() < range.end {
        warn!(
            "Uncertainty file has {} lines; preamble block expects {}",
            apu_lines.len(),
            range.end
        );
    }

    let mut preamble: Vec<String> = apu_lines
        .iter()
        .skip(range.start)
        .take(range.len())
        .map(|line| line.to_string())
        .collect();

    preamble.push(format!(
        "EXTRACTION OF {} SURVEY CONTROL MARKS FROM NATIONAL GDA2020 ADJUSTMENT:",
        jurisdiction
    ));
    preamble.push(format!("Input NADJ xyz file: {}", sources.xyz));
    preamble.push(format!("Input NADJ apu file: {}", sources.apu));
    preamble.push(format!("Input {} mark list: {}", jurisdiction, sources.mapping));
    preamble.push(format!("Date-time Processed: {}", timestamp));
    preamble.extend(REPORT_NOTES.iter().map(|note| note.to_string()));

    preamble
}

/// Jurisdiction station-name label, padded or truncated to the name width
pub fn station_name_label(jurisdiction: &str) -> String {
    pad_to_width(
        &format!("{}{}", jurisdiction, STATION_NAME_LABEL_SUFFIX),
        STATION_NAME_WIDTH,
    )
}

/// Copy the `.xyz` column-header block and rewrite its label line
pub fn build_column_header(
    xyz_lines: &[&str],
    jurisdiction: &str,
    source_name: &str,
    config: &NadjConfig,
) -> Result<Vec<String>> {
    let range = config.column_header_lines;
    if xyz_lines.len() < range.end {
        return Err(NadjError::TruncatedHeader {
            source_name: source_name.to_string(),
            required: range.end,
            found: xyz_lines.len(),
        });
    }

    let label = station_name_label(jurisdiction);
    let header = xyz_lines[range.as_range()]
        .iter()
        .enumerate()
        .map(|(offset, line)| {
            if range.start + offset == config.column_label_line {
                rewrite_label_line(line, &config.description_label, &label)
            } else {
                line.to_string()
            }
        })
        .collect();

    debug!("Rewrote column label line {}", config.column_label_line);
    Ok(header)
}

fn rewrite_label_line(line: &str, description_label: &str, station_label: &str) -> String {
    if !line.contains(description_label) {
        warn!(
            "Column label line has no '{}' label to replace",
            description_label
        );
    }

    let mut rewritten = line.replace(description_label, station_label);
    rewritten.push_str(&pad_to_width(HZ_POS_U_LABEL, UNCERTAINTY_FIELD_WIDTH));
    rewritten.push_str(&pad_to_width(VT_POS_U_LABEL, UNCERTAINTY_FIELD_WIDTH));
    rewritten
}
