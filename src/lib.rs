//! NADJ Processor Library
//!
//! A Rust library for extracting a jurisdiction's survey control marks from
//! the national GDA2020 adjustment output (DynAdjust `.xyz` positions and
//! `.apu` positional uncertainties).
//!
//! This library provides tools for:
//! - Decoding and re-encoding the fixed-width adjustment records
//! - Loading jurisdiction mark lists and indexing positional uncertainties
//! - Renaming, filtering and widening position records into a subset report
//! - Patching RINEX observation headers with jurisdiction mark names
//! - Converting subset reports to CSV

pub mod cli;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod header;
pub mod layout;
pub mod mapping;
pub mod models;
pub mod processor;
pub mod rinex;
pub mod uncertainty;

// Re-export commonly used types
pub use config::NadjConfig;
pub use error::{NadjError, Result};
pub use models::{MarkRename, OutputDocument, PositionRecord, ProcessingStats};
pub use processor::{ExtractionRequest, JurisdictionProcessor, extract_and_process_jurisdiction};
