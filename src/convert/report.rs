//! Batch conversion reporting.

use std::fmt;
use std::path::PathBuf;

use crate::error::ConvertError;

/// Outcome of a [`convert_directory`](crate::convert::convert_directory)
/// run, one entry per discovered manifest.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Manifests converted successfully, with their output files.
    pub converted: Vec<(PathBuf, Vec<PathBuf>)>,
    /// Files skipped because they are not DZI manifests.
    pub skipped: Vec<PathBuf>,
    /// Manifests that failed, with the first error encountered.
    pub failed: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    /// Record a successful conversion.
    pub fn record_converted(&mut self, manifest: PathBuf, outputs: Vec<PathBuf>) {
        self.converted.push((manifest, outputs));
    }

    /// Record a skipped non-DZI file.
    pub fn record_skipped(&mut self, manifest: PathBuf) {
        self.skipped.push(manifest);
    }

    /// Record a failed manifest.
    pub fn record_failed(&mut self, manifest: PathBuf, error: ConvertError) {
        self.failed.push((manifest, error));
    }

    /// True when no manifest failed. Skips do not count as failures.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of output files written.
    pub fn output_count(&self) -> usize {
        self.converted.iter().map(|(_, outputs)| outputs.len()).sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} manifest(s) converted, {} file(s) written",
            self.converted.len(),
            self.output_count()
        )?;

        if !self.skipped.is_empty() {
            writeln!(f, "{} file(s) skipped (not DZI):", self.skipped.len())?;
            for path in &self.skipped {
                writeln!(f, "  - {}", path.display())?;
            }
        }

        if !self.failed.is_empty() {
            writeln!(f, "{} manifest(s) failed:", self.failed.len())?;
            for (path, error) in &self.failed {
                writeln!(f, "  - {}: {}", path.display(), error)?;
            }
        }

        Ok(())
    }
}
