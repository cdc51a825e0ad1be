//! Report writer.
//!
//! Rewrites the destination in place: the handle is opened for read/update
//! (creating an empty file when absent), the document is written from the
//! start and the file is truncated to exactly the new content length.

use crate::error::Result;
use crate::models::OutputDocument;
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writer for jurisdiction reports
#[derive(Debug)]
pub struct ReportWriter {
    output_path: PathBuf,
}

impl ReportWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Write the document, returning the final file length in bytes
    pub fn write(&self, document: &OutputDocument) -> Result<u64> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.output_path)?;
        file.seek(SeekFrom::Start(0))?;

        let text = document.render();
        file.write_all(text.as_bytes())?;
        let written = text.len() as u64;

        file.set_len(written)?;
        file.sync_all()?;

        debug!(
            "Wrote {} bytes to {}",
            written,
            self.output_path.display()
        );
        Ok(written)
    }
}
