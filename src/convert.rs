//! Jurisdiction report to CSV conversion.
//!
//! Decodes the data rows of a jurisdiction report with `REPORT_LAYOUT` and
//! writes them through polars as a CSV table for GIS loaders.

use crate::config::NadjConfig;
use crate::constants::END_OF_REPORT;
use crate::error::{NadjError, Result};
use crate::layout::{REPORT_LAYOUT, field};
use crate::processor::read_text;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::debug;

/// Report fields and the CSV column each one becomes; `None` is the
/// jurisdiction station-name column, named after the jurisdiction
const CSV_COLUMNS: [(&str, Option<&str>); 18] = [
    (field::STATION, Some("station")),
    (field::CONSTRAINT, Some("const")),
    (field::EASTING, Some("easting")),
    (field::NORTHING, Some("northing")),
    (field::ZONE, Some("zone")),
    (field::LATITUDE, Some("latitude")),
    (field::LONGITUDE, Some("longitude")),
    (field::H_ORTHO, Some("h(ortho)")),
    (field::H_ELLIPSE, Some("h(ellipse)")),
    (field::X, Some("x")),
    (field::Y, Some("y")),
    (field::Z, Some("z")),
    (field::SD_E, Some("sd(e)")),
    (field::SD_N, Some("sd(n)")),
    (field::SD_UP, Some("sd(up)")),
    (field::DESCRIPTION, None),
    (field::HZ_POS_U, Some("hzposu")),
    (field::VT_POS_U, Some("vzposu")),
];

/// Convert a jurisdiction report into CSV, returning the number of rows written
pub fn convert_report_to_csv(
    input: &Path,
    output: &Path,
    jurisdiction: &str,
    config: &NadjConfig,
) -> Result<usize> {
    let text = read_text(input)?;
    let source_name = input.display().to_string();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); CSV_COLUMNS.len()];
    for (index, line) in text
        .lines()
        .enumerate()
        .skip(config.report_data_start_line)
    {
        if line.trim() == END_OF_REPORT {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let record = REPORT_LAYOUT
            .decode(line)
            .map_err(|short| NadjError::MalformedRecord {
                source_name: source_name.clone(),
                line_number: index + 1,
                line: line.to_string(),
                required: short.required,
                found: short.found,
            })?;

        for (values, (name, _)) in columns.iter_mut().zip(CSV_COLUMNS.iter()) {
            // Heights are right-aligned and lose their leading blanks too
            let value = match *name {
                field::H_ORTHO | field::H_ELLIPSE => record.value(name).trim(),
                _ => record.value(name),
            };
            values.push(value.to_string());
        }
    }

    let rows = columns.first().map_or(0, Vec::len);
    let station_column = format!("{}_station_name", jurisdiction.to_lowercase());
    let series: Vec<Column> = columns
        .into_iter()
        .zip(CSV_COLUMNS.iter())
        .map(|(values, (_, header))| {
            let name = header.unwrap_or(station_column.as_str());
            Column::new(name.into(), values)
        })
        .collect();
    let mut df = DataFrame::new(series)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(output)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    debug!("Wrote {} CSV rows to {}", rows, output.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PositionRecord;
    use tempfile::TempDir;

    fn report_row(station: &str, name: &str) -> String {
        let line = format!(
            "{:<20}{:<8}{:>14}{:<51}{:>11}{:>11}{:<97}",
            station, "FFF", "691234.567", "", "581.234", "600.123", ""
        );
        let mut record = PositionRecord::decode(&line).unwrap();
        record.description = name.to_string();
        record.hz_pos_u = Some("0.005".to_string());
        record.vt_pos_u = Some("0.011".to_string());
        record.to_report_line()
    }

    fn report(rows: &[String]) -> String {
        let mut lines: Vec<String> = (0..26).map(|i| format!("preamble {}", i)).collect();
        lines.extend(rows.iter().cloned());
        lines.push(END_OF_REPORT.to_string());
        lines.push("trailing".to_string());
        lines.join("\n") + "\n"
    }

    #[test]
    fn test_convert_report_to_csv() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("report.xyz");
        let output = temp_dir.path().join("csv").join("report.csv");
        fs::write(
            &input,
            report(&[report_row("AAAA", "Smith Peak"), report_row("BBBB", "BBBB")]),
        )
        .unwrap();

        let rows =
            convert_report_to_csv(&input, &output, "ACT", &NadjConfig::default()).unwrap();
        assert_eq!(rows, 2);

        let csv = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("station,const,easting"));
        assert!(lines[0].contains("act_station_name,hzposu,vzposu"));
        assert!(lines[1].starts_with("AAAA,FFF,"));
        assert!(lines[1].contains(",581.234,600.123,"));
        assert!(lines[1].ends_with("Smith Peak,0.005,0.011"));
    }

    #[test]
    fn test_short_report_row_is_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("report.xyz");
        fs::write(&input, report(&["AAAA  short".to_string()])).unwrap();

        let result = convert_report_to_csv(
            &input,
            &temp_dir.path().join("out.csv"),
            "ACT",
            &NadjConfig::default(),
        );
        assert!(matches!(
            result,
            Err(NadjError::MalformedRecord { line_number: 27, .. })
        ));
    }
}
