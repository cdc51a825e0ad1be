//! Application constants for the NADJ processor
//!
//! Fixed report text and column labels shared by the extraction engine,
//! the CSV converter and the RINEX header patcher.

// =============================================================================
// Report Text
// =============================================================================

/// Trailer line closing every jurisdiction report
pub const END_OF_REPORT: &str =
    "------------------------    END    OF    REPORT   ------------------------";

/// Explanatory notes written after the processing timestamp
pub const REPORT_NOTES: &[&str] = &[
    "NOTES:",
    "(1) h(Ellipse) = Height above the GRS80 ellipsoid.",
    "(2) H(Ortho)   = Orthometric height (derived AHD)",
    "",
];

/// Suffix of the rewritten description column label
pub const STATION_NAME_LABEL_SUFFIX: &str = " Station Name";

/// Column labels appended to the rewritten column header
pub const HZ_POS_U_LABEL: &str = "HzPosU";
pub const VT_POS_U_LABEL: &str = "VzPosU";

// =============================================================================
// Field Widths
// =============================================================================

/// Width of each appended uncertainty column in the report
pub const UNCERTAINTY_FIELD_WIDTH: usize = 10;

/// Width of the station name and description columns
pub const STATION_NAME_WIDTH: usize = 20;

// =============================================================================
// RINEX
// =============================================================================

/// Zero-based index of the RINEX header line carrying the marker name
pub const RINEX_MARKER_LINE: usize = 4;

/// Width of the marker name at the start of the marker line
pub const RINEX_MARKER_WIDTH: usize = 4;

/// Length of a valid NGCA identifier
pub const NGCA_ID_LENGTH: usize = 4;

/// Observation sheet columns: NGCA id, jurisdiction mark name, RINEX file name
pub const RINEX_SHEET_COLUMNS: [usize; 3] = [0, 2, 9];

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "warn";
