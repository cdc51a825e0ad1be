//! Error handling integration tests

use super::{run_extraction, write_inputs, xyz_file, xyz_row};
use crate::error::NadjError;
use crate::processor::{ExtractionRequest, JurisdictionProcessor};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_position_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = write_inputs(temp_dir.path(), &[], &[], &[("AAAA", "")]);
    request.xyz = PathBuf::from("nonexistent.xyz");

    match JurisdictionProcessor::new(request).unwrap_err() {
        NadjError::InputNotFound { path } => {
            assert_eq!(path, temp_dir.path().join("nonexistent.xyz"));
        }
        other => panic!("Expected InputNotFound error, got {:?}", other),
    }
}

#[test]
fn test_empty_jurisdiction_name() {
    let temp_dir = TempDir::new().unwrap();
    let mut request = write_inputs(temp_dir.path(), &[], &[], &[("AAAA", "")]);
    request.jurisdiction = "   ".to_string();

    assert!(matches!(
        JurisdictionProcessor::new(request),
        Err(NadjError::Configuration { .. })
    ));
}

#[test]
fn test_short_mapped_row_reports_line() {
    let temp_dir = TempDir::new().unwrap();
    let request = write_inputs(
        temp_dir.path(),
        &[
            xyz_row("BBBB", "           1.0"),
            "AAAA                truncated".to_string(),
        ],
        &[("AAAA", "0.005", "0.011"), ("BBBB", "0.005", "0.011")],
        &[("AAAA", "Smith Peak"), ("BBBB", "")],
    );

    match run_extraction(request).unwrap_err() {
        NadjError::MalformedRecord {
            source_name,
            line_number,
            line,
            required,
            found,
        } => {
            assert_eq!(source_name, "gda2020.xyz");
            assert_eq!(line_number, 22);
            assert!(line.starts_with("AAAA"));
            assert_eq!(required, 192);
            assert_eq!(found, 29);
        }
        other => panic!("Expected MalformedRecord error, got {:?}", other),
    }
}

#[test]
fn test_short_unmapped_row_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let request = write_inputs(
        temp_dir.path(),
        &[
            "ZZZZ                truncated".to_string(),
            xyz_row("AAAA", "           1.0"),
        ],
        &[("AAAA", "0.005", "0.011")],
        &[("AAAA", "")],
    );

    assert!(run_extraction(request).is_ok());
}

#[test]
fn test_mapped_mark_without_uncertainty() {
    let temp_dir = TempDir::new().unwrap();
    let request = write_inputs(
        temp_dir.path(),
        &[xyz_row("AAAA", "           1.0")],
        &[("BBBB", "0.005", "0.011")],
        &[("AAAA", "Smith Peak")],
    );

    match run_extraction(request).unwrap_err() {
        NadjError::UnmappedUncertainty { station } => assert_eq!(station, "AAAA"),
        other => panic!("Expected UnmappedUncertainty error, got {:?}", other),
    }
}

#[test]
fn test_failed_run_leaves_previous_report_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let request = write_inputs(
        temp_dir.path(),
        &[xyz_row("AAAA", "           1.0")],
        &[],
        &[("AAAA", "")],
    );
    fs::create_dir_all(request.output.parent().unwrap()).unwrap();
    fs::write(&request.output, "previous report\n").unwrap();
    let output = request.output.clone();

    assert!(run_extraction(request).is_err());
    assert_eq!(fs::read_to_string(output).unwrap(), "previous report\n");
}

#[test]
fn test_truncated_position_header() {
    let temp_dir = TempDir::new().unwrap();
    let request: ExtractionRequest = write_inputs(temp_dir.path(), &[], &[], &[("AAAA", "")]);
    let xyz = xyz_file(&[]);
    let short: Vec<&str> = xyz.lines().take(10).collect();
    fs::write(temp_dir.path().join("gda2020.xyz"), short.join("\n")).unwrap();

    assert!(matches!(
        run_extraction(request),
        Err(NadjError::TruncatedHeader {
            required: 20,
            found: 10,
            ..
        })
    ));
}
