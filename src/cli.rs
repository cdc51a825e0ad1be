//! Command-line interface components.

use crate::config::NadjConfig;
use crate::constants::DEFAULT_LOG_LEVEL;
use crate::convert::convert_report_to_csv;
use crate::processor::{ExtractionRequest, JurisdictionProcessor};
use crate::rinex::{RinexPatchRequest, fix_rinex_headers};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "nadj-processor")]
#[command(about = "Extract jurisdiction survey control marks from the national GDA2020 adjustment")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract and rename a jurisdiction's marks from the national adjustment
    Extract(ExtractArgs),
    /// Replace NGCA identifiers with mark names in RINEX observation headers
    FixRinex(FixRinexArgs),
    /// Convert a jurisdiction report to CSV
    ToCsv(ToCsvArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Name of the jurisdiction, e.g. ACT
    #[arg(short, long)]
    pub jurisdiction: String,

    /// Jurisdiction mark list (CSV: national name, jurisdiction name)
    #[arg(short, long, value_name = "FILE")]
    pub mapping: PathBuf,

    /// National adjustment position file (.xyz)
    #[arg(long, value_name = "FILE")]
    pub xyz: PathBuf,

    /// National adjustment positional uncertainty file (.apu)
    #[arg(long, value_name = "FILE")]
    pub apu: PathBuf,

    /// Path of the jurisdiction subset report to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Directory that relative input paths are resolved against
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Pin the processing timestamp ("YYYY-MM-DD HH:MM:SS", local time)
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_local_timestamp)]
    pub processed_at: Option<DateTime<Local>>,

    /// Label printed after the processing timestamp
    #[arg(long, default_value = "AEST")]
    pub timezone_label: String,
}

#[derive(Parser, Debug)]
pub struct FixRinexArgs {
    /// NGCA observation sheet (CSV)
    #[arg(short, long, value_name = "FILE")]
    pub sheet: PathBuf,

    /// Directory holding the RINEX observation files
    #[arg(short, long, value_name = "DIR")]
    pub rinex_dir: PathBuf,

    /// Location that receives the dated output directory
    #[arg(short, long, value_name = "DIR")]
    pub output_location: PathBuf,

    /// Jurisdiction prefix of the output directory and log
    #[arg(short, long, default_value = "ACT")]
    pub jurisdiction: String,
}

#[derive(Parser, Debug)]
pub struct ToCsvArgs {
    /// Jurisdiction report produced by `extract`
    #[arg(value_name = "REPORT")]
    pub input: PathBuf,

    /// CSV file to write
    #[arg(value_name = "CSV")]
    pub output: PathBuf,

    /// Jurisdiction naming the station-name column
    #[arg(short, long, default_value = "ACT")]
    pub jurisdiction: String,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn parse_local_timestamp(value: &str) -> std::result::Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DD HH:MM:SS: {}", e))?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| format!("{} does not exist in the local timezone", value))
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nadj_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Run the selected subcommand
pub fn run(args: Args) -> Result<()> {
    let quiet = args.quiet;
    match args.command {
        Commands::Extract(extract) => run_extract(extract, quiet),
        Commands::FixRinex(fix) => run_fix_rinex(fix, quiet),
        Commands::ToCsv(to_csv) => run_to_csv(to_csv, quiet),
    }
}

fn run_extract(args: ExtractArgs, quiet: bool) -> Result<()> {
    let config = NadjConfig::default().with_timezone_label(args.timezone_label);
    let request = ExtractionRequest {
        jurisdiction: args.jurisdiction,
        mapping: args.mapping,
        xyz: args.xyz,
        apu: args.apu,
        output: args.output,
        input_dir: args.input_dir,
    };

    let mut processor = JurisdictionProcessor::new(request)
        .context("Failed to prepare extraction inputs")?
        .with_config(config)
        .quiet(quiet);
    if let Some(processed_at) = args.processed_at {
        processor = processor.with_processed_at(processed_at);
    }

    processor
        .process()
        .with_context(|| format!("Extraction to {} failed", processor.output_path().display()))?;
    Ok(())
}

fn run_fix_rinex(args: FixRinexArgs, quiet: bool) -> Result<()> {
    let request = RinexPatchRequest {
        sheet: args.sheet,
        rinex_dir: args.rinex_dir,
        output_location: args.output_location,
        jurisdiction: args.jurisdiction,
        date: Local::now().date_naive(),
    };

    let stats = fix_rinex_headers(&request, !quiet).context("RINEX header patching failed")?;

    if !quiet {
        println!("{}", "RINEX headers patched".bright_green().bold());
        println!(
            "  {} {}",
            "Files patched:".bright_cyan(),
            stats.files_patched.to_string().bright_white()
        );
        if stats.files_missing > 0 {
            println!(
                "  {} {}",
                "Files missing:".bright_red(),
                stats.files_missing.to_string().bright_red().bold()
            );
        }
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            stats.output_dir.display()
        );
    }
    Ok(())
}

fn run_to_csv(args: ToCsvArgs, quiet: bool) -> Result<()> {
    let rows = convert_report_to_csv(
        &args.input,
        &args.output,
        &args.jurisdiction,
        &NadjConfig::default(),
    )
    .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    if !quiet {
        println!(
            "  {} {} rows to {}",
            "Wrote".bright_green(),
            rows.to_string().bright_white().bold(),
            args.output.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_arguments() {
        let args = Args::try_parse_from([
            "nadj-processor",
            "extract",
            "--jurisdiction",
            "ACT",
            "--mapping",
            "marks.csv",
            "--xyz",
            "gda2020.xyz",
            "--apu",
            "gda2020.apu",
            "--output",
            "out/stn.xyz",
            "--processed-at",
            "2018-01-31 09:05:07",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.get_log_level(), "debug");
        match args.command {
            Commands::Extract(extract) => {
                assert_eq!(extract.jurisdiction, "ACT");
                assert_eq!(extract.input_dir, PathBuf::from("."));
                assert_eq!(
                    extract.processed_at.unwrap().naive_local().to_string(),
                    "2018-01-31 09:05:07"
                );
            }
            other => panic!("Expected extract command, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        assert!(parse_local_timestamp("31/01/2018").is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from([
            "nadj-processor",
            "-q",
            "-v",
            "to-csv",
            "report.xyz",
            "report.csv",
        ]);
        assert!(result.is_err());
    }
}
