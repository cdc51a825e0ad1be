//! Input path resolution for extraction runs
//!
//! Relative input paths are joined onto the input directory explicitly;
//! the process working directory is never changed.

use crate::error::{NadjError, Result};
use crate::models::SourceIdentifiers;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved locations of the three extraction inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub mapping: PathBuf,
    pub xyz: PathBuf,
    pub apu: PathBuf,
    /// Identifiers as supplied, echoed into the report
    pub identifiers: SourceIdentifiers,
}

impl InputPaths {
    /// Resolve each input against `input_dir` and check that it exists
    pub fn resolve(input_dir: &Path, mapping: &Path, xyz: &Path, apu: &Path) -> Result<Self> {
        let paths = Self {
            mapping: resolve_against(input_dir, mapping),
            xyz: resolve_against(input_dir, xyz),
            apu: resolve_against(input_dir, apu),
            identifiers: SourceIdentifiers {
                xyz: xyz.display().to_string(),
                apu: apu.display().to_string(),
                mapping: mapping.display().to_string(),
            },
        };

        for path in [&paths.mapping, &paths.xyz, &paths.apu] {
            if !path.is_file() {
                return Err(NadjError::InputNotFound { path: path.clone() });
            }
            debug!("Resolved input: {}", path.display());
        }

        Ok(paths)
    }
}

/// Join a relative path onto `base`; absolute paths are returned unchanged
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
