//! Integration tests for the processor module
//!
//! Tests the complete extraction pipeline against synthesized national
//! adjustment files laid out with the fixed-width codec.

pub mod error_handling;

use crate::layout::{XYZ_LAYOUT, field};
use crate::processor::{ExtractionRequest, JurisdictionProcessor};
use chrono::{DateTime, Local, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

/// A national `.xyz` data row for `station`
pub fn xyz_row(station: &str, easting: &str) -> String {
    XYZ_LAYOUT.encode(|name| match name {
        field::STATION => Some(station),
        field::CONSTRAINT => Some("FFF"),
        field::EASTING => Some(easting),
        field::NORTHING => Some("      6092345.6789"),
        field::ZONE => Some(" 55"),
        field::LATITUDE => Some(" -35 16 12.3456"),
        field::LONGITUDE => Some("  149 6 45.6789"),
        field::H_ORTHO => Some("    581.234"),
        field::H_ELLIPSE => Some("    600.123"),
        field::X => Some("  -4472345.6789"),
        field::Y => Some("  2676543.210"),
        field::Z => Some("  -3666789.0123"),
        field::SD_E => Some("    0.0021"),
        field::SD_N => Some("    0.0023"),
        field::SD_UP => Some("  0.0054"),
        field::DESCRIPTION => Some(station),
        _ => None,
    })
}

/// A complete `.xyz` file: 15 descriptive lines, the column header block, then `rows`
pub fn xyz_file(rows: &[String]) -> String {
    let mut lines: Vec<String> = (0..15)
        .map(|i| format!("DYNADJUST COORDINATE OUTPUT FILE LINE {}", i))
        .collect();
    lines.push(String::new());
    lines.push("Adjusted Coordinates".to_string());
    lines.push("-".repeat(40));
    lines.push(format!("{:<192}Description", "Station"));
    lines.push("-".repeat(212));
    lines.extend(rows.iter().cloned());
    lines.join("\n") + "\n"
}

/// A `.apu` data row with uncertainty columns at 56..62 and 67..73
pub fn apu_row(station: &str, hz: &str, vt: &str) -> String {
    format!(
        "{:<20}{:>15}{:>15}{:<6}{:<6}     {:<6}{:>30}",
        station, "-35 16 12.34", "149 6 45.67", "", hz, vt, "0.0031"
    )
}

/// A complete `.apu` file: descriptive block, a statistics row with a blank
/// station field, the column header, then station rows
pub fn apu_file(rows: &[(&str, &str, &str)]) -> String {
    let mut lines: Vec<String> = (0..12)
        .map(|i| format!("DYNADJUST POSITIONAL UNCERTAINTY OUTPUT FILE LINE {}", i))
        .collect();
    lines.push(String::new());
    lines.push(apu_row("", "9.999", "9.999"));
    lines.push(format!("{:<56}Hz PosU    Vt PosU", "Station"));
    for (station, hz, vt) in rows {
        lines.push(apu_row(station, hz, vt));
    }
    lines.join("\n") + "\n"
}

/// Write a two-column mapping source
pub fn mapping_csv(rows: &[(&str, &str)]) -> String {
    let mut text = String::from("NADJ Name,Jurisdiction Name\n");
    for (national, jurisdiction) in rows {
        text.push_str(&format!("{},{}\n", national, jurisdiction));
    }
    text
}

/// Pinned processing time used by every scenario
pub fn processed_at() -> DateTime<Local> {
    Local.with_ymd_and_hms(2018, 1, 31, 9, 5, 7).unwrap()
}

/// Lay out the three inputs in `dir` and return the request for them
pub fn write_inputs(
    dir: &Path,
    xyz_rows: &[String],
    apu_rows: &[(&str, &str, &str)],
    mapping: &[(&str, &str)],
) -> ExtractionRequest {
    fs::write(dir.join("gda2020.xyz"), xyz_file(xyz_rows)).unwrap();
    fs::write(dir.join("gda2020.apu"), apu_file(apu_rows)).unwrap();
    fs::write(dir.join("marks.csv"), mapping_csv(mapping)).unwrap();

    ExtractionRequest {
        jurisdiction: "ACT".to_string(),
        mapping: PathBuf::from("marks.csv"),
        xyz: PathBuf::from("gda2020.xyz"),
        apu: PathBuf::from("gda2020.apu"),
        output: dir.join("output").join("stn_gda2020.xyz"),
        input_dir: dir.to_path_buf(),
    }
}

/// Run an extraction with the pinned timestamp and return the report lines
pub fn run_extraction(request: ExtractionRequest) -> crate::error::Result<Vec<String>> {
    let output = request.output.clone();
    JurisdictionProcessor::new(request)?
        .with_processed_at(processed_at())
        .quiet(true)
        .process()?;
    Ok(fs::read_to_string(output)?
        .lines()
        .map(str::to_string)
        .collect())
}

/// Report rows carrying mark data (after the 26-line preamble and header)
pub fn data_rows(report: &[String]) -> Vec<&String> {
    report
        .iter()
        .skip(26)
        .take_while(|line| !line.contains("END    OF    REPORT"))
        .collect()
}
