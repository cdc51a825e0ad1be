//! Jurisdiction extraction pipeline.
//!
//! Orchestrates one extraction run: input resolution, mapping table and
//! uncertainty index construction, the subset/merge engine and the report
//! writer, with a coloured summary of what was produced.

pub mod discovery;
pub mod merge;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::InputPaths, merge::MergeContext, writer::ReportWriter};

use crate::config::NadjConfig;
use crate::error::{NadjError, Result};
use crate::header::format_timestamp;
use crate::mapping::{MarkMappingTable, load_mapping_rows};
use crate::models::ProcessingStats;
use crate::uncertainty::UncertaintyIndex;

use chrono::{DateTime, Local};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Arguments of one extraction run
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub jurisdiction: String,
    pub mapping: PathBuf,
    pub xyz: PathBuf,
    pub apu: PathBuf,
    pub output: PathBuf,
    pub input_dir: PathBuf,
}

/// Main processor for jurisdiction extraction
#[derive(Debug)]
pub struct JurisdictionProcessor {
    jurisdiction: String,
    inputs: InputPaths,
    writer: ReportWriter,
    config: NadjConfig,
    processed_at: Option<DateTime<Local>>,
    quiet: bool,
}

impl JurisdictionProcessor {
    /// Create a processor, resolving and checking every input
    pub fn new(request: ExtractionRequest) -> Result<Self> {
        if request.jurisdiction.trim().is_empty() {
            return Err(NadjError::configuration(
                "Jurisdiction name cannot be empty".to_string(),
            ));
        }

        let inputs = InputPaths::resolve(
            &request.input_dir,
            &request.mapping,
            &request.xyz,
            &request.apu,
        )?;

        Ok(Self {
            jurisdiction: request.jurisdiction.trim().to_string(),
            inputs,
            writer: ReportWriter::new(request.output),
            config: NadjConfig::default(),
            processed_at: None,
            quiet: false,
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: NadjConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the processing timestamp instead of reading the clock
    pub fn with_processed_at(mut self, processed_at: DateTime<Local>) -> Self {
        self.processed_at = Some(processed_at);
        self
    }

    /// Suppress the coloured summary
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn output_path(&self) -> &Path {
        self.writer.output_path()
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        if !self.quiet {
            println!(
                "{}",
                format!("Extracting {} survey control marks", self.jurisdiction)
                    .bright_green()
                    .bold()
            );
            println!(
                "  {} {}",
                "Position file:".bright_cyan(),
                self.inputs.xyz.display()
            );
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                self.writer.output_path().display()
            );
        }

        let rows = load_mapping_rows(&self.inputs.mapping, 0, 1)?;
        let mapping = MarkMappingTable::build(rows);
        info!(
            "Loaded {} mapped marks from {}",
            mapping.len(),
            self.inputs.mapping.display()
        );

        let xyz_text = read_text(&self.inputs.xyz)?;
        let apu_text = read_text(&self.inputs.apu)?;
        let xyz_lines: Vec<&str> = xyz_text.lines().collect();
        let apu_lines: Vec<&str> = apu_text.lines().collect();

        let uncertainty = UncertaintyIndex::build(apu_lines.iter().copied());
        info!("Indexed uncertainty for {} stations", uncertainty.len());

        let processed_at = self.processed_at.unwrap_or_else(Local::now);
        let timestamp = format_timestamp(&processed_at, &self.config.timezone_label);
        let context = MergeContext {
            jurisdiction: &self.jurisdiction,
            sources: &self.inputs.identifiers,
            timestamp: &timestamp,
            config: &self.config,
        };

        let (document, merge_stats) =
            merge::run(&xyz_lines, &apu_lines, &uncertainty, &mapping, &context)?;
        let bytes_written = self.writer.write(&document)?;

        let stats = ProcessingStats {
            mapping_entries: mapping.len(),
            duplicate_mappings: mapping.duplicates().len(),
            uncertainty_entries: uncertainty.len(),
            merge: merge_stats,
            output_path: self.writer.output_path().to_path_buf(),
            bytes_written,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        if !self.quiet {
            print_summary(&stats);
        }

        Ok(stats)
    }
}

/// Convenience wrapper running a full extraction with default configuration
pub fn extract_and_process_jurisdiction(request: ExtractionRequest) -> Result<ProcessingStats> {
    JurisdictionProcessor::new(request)?.quiet(true).process()
}

/// Read a national file as text; stray non-UTF-8 bytes are replaced
pub(crate) fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NadjError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            NadjError::Io(e)
        }
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Extraction Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Mapped marks:".bright_cyan(),
        stats.mapping_entries.to_string().bright_white()
    );
    if stats.duplicate_mappings > 0 {
        println!(
            "  {} {}",
            "Duplicate mappings ignored:".bright_yellow(),
            stats.duplicate_mappings.to_string().bright_yellow().bold()
        );
    }
    println!(
        "  {} {} of {} ({} renamed, {} national names)",
        "Marks written:".bright_cyan(),
        stats.merge.records_emitted.to_string().bright_white().bold(),
        stats.merge.records_scanned,
        stats.merge.renamed,
        stats.merge.adopted
    );
    println!(
        "  {} {}",
        "Report:".bright_cyan(),
        stats.output_path.display()
    );
}
