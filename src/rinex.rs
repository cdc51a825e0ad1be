//! RINEX observation header patcher.
//!
//! Rewrites the marker name at the start of header line 5 of each RINEX
//! observation file listed in an NGCA observation sheet, so the published
//! files carry the jurisdiction's mark name instead of the NGCA identifier.

use crate::constants::{NGCA_ID_LENGTH, RINEX_MARKER_LINE, RINEX_MARKER_WIDTH, RINEX_SHEET_COLUMNS};
use crate::error::{NadjError, Result};
use crate::layout::{pad_to_width, slice_field};
use crate::mapping::load_cell_columns;
use crate::processor::read_text;
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Arguments of one RINEX patch run
#[derive(Debug, Clone)]
pub struct RinexPatchRequest {
    /// NGCA observation sheet (CSV)
    pub sheet: PathBuf,
    pub rinex_dir: PathBuf,
    /// Directory that receives the dated output directory
    pub output_location: PathBuf,
    pub jurisdiction: String,
    /// Date stamped into the output directory name
    pub date: NaiveDate,
}

impl RinexPatchRequest {
    /// `<YYYYMMDD>_<JUR>_NGCA_Modified` under the output location
    pub fn output_dir(&self) -> PathBuf {
        self.output_location.join(format!(
            "{}_{}_NGCA_Modified",
            self.date.format("%Y%m%d"),
            self.jurisdiction
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RinexPatchStats {
    pub rows_considered: usize,
    pub files_patched: usize,
    pub files_missing: usize,
    pub output_dir: PathBuf,
}

/// Replace the marker name at the start of a RINEX header line.
///
/// Names shorter than the four-character marker field are space padded;
/// longer names overwrite as many characters as they need.
pub fn patch_marker_line(line: &str, mark_name: &str) -> String {
    let width = mark_name.chars().count().max(RINEX_MARKER_WIDTH);
    format!(
        "{}{}",
        pad_to_width(mark_name, width),
        slice_field(line, width, line.len())
    )
}

/// Patch every RINEX file referenced by the observation sheet
pub fn fix_rinex_headers(request: &RinexPatchRequest, show_progress: bool) -> Result<RinexPatchStats> {
    if !request.rinex_dir.is_dir() {
        return Err(NadjError::InputNotFound {
            path: request.rinex_dir.clone(),
        });
    }

    let columns = load_cell_columns(&request.sheet, &RINEX_SHEET_COLUMNS)?;
    let [ids, marks, files] = <[Vec<_>; 3]>::try_from(columns).map_err(|_| {
        NadjError::MappingSource {
            path: request.sheet.clone(),
            reason: "expected NGCA id, mark name and RINEX file columns".to_string(),
        }
    })?;

    let available = inventory(&request.rinex_dir)?;
    debug!(
        "Found {} files in {}",
        available.len(),
        request.rinex_dir.display()
    );

    let output_dir = prepare_output_dir(&request.output_dir())?;
    let mut stats = RinexPatchStats {
        output_dir: output_dir.clone(),
        ..Default::default()
    };
    let mut log: Vec<String> = Vec::new();

    let progress = if show_progress {
        let pb = ProgressBar::new(ids.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    for ((id, mark), file) in ids.iter().zip(&marks).zip(&files) {
        progress.inc(1);

        let Some(ngca_id) = id.as_name().filter(|id| id.chars().count() == NGCA_ID_LENGTH) else {
            continue;
        };
        stats.rows_considered += 1;

        let (Some(mark_name), Some(file_name)) = (mark.as_name(), file.as_name()) else {
            log.push(format!("NGCA: {}, skipped: no mark name or RINEX file", ngca_id));
            warn!("Skipping NGCA {}: no mark name or RINEX file", ngca_id);
            continue;
        };

        log.push(format!(
            "NGCA: {}, {} Mark: {}, RINEX: {}",
            ngca_id, request.jurisdiction, mark_name, file_name
        ));
        progress.set_message(file_name.clone());

        let source = request.rinex_dir.join(&file_name);
        if !available.contains(&file_name) {
            log.push(format!("No such file: {}", source.display()));
            stats.files_missing += 1;
            continue;
        }

        let text = read_text(&source)?;
        let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
        let Some(marker_line) = lines.get_mut(RINEX_MARKER_LINE) else {
            log.push(format!("Header too short: {}", source.display()));
            warn!("RINEX header of {} is too short to patch", source.display());
            continue;
        };
        let patched = patch_marker_line(marker_line.as_str(), &mark_name);
        *marker_line = patched;

        fs::write(output_dir.join(&file_name), lines.concat())?;
        stats.files_patched += 1;
    }

    progress.finish_and_clear();
    let mut log_text = log.join("\n");
    if !log_text.is_empty() {
        log_text.push('\n');
    }
    fs::write(output_dir.join("log").join("log.txt"), log_text)?;

    info!(
        "Patched {} RINEX files ({} missing) into {}",
        stats.files_patched,
        stats.files_missing,
        output_dir.display()
    );
    Ok(stats)
}

/// File names directly inside the RINEX directory
fn inventory(dir: &Path) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() {
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}

/// Recreate the output directory and its `log` subdirectory
fn prepare_output_dir(output_dir: &Path) -> Result<PathBuf> {
    if output_dir.is_dir() {
        debug!("Removing previous output {}", output_dir.display());
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir.join("log"))?;
    Ok(output_dir.to_path_buf())
}
