//! Pyramid conversion orchestration.
//!
//! [`PyramidConverter`] drives the full pipeline for one manifest: parse,
//! assemble each level through the tile decoder, write one PNG per level.
//! [`convert_directory`] runs the converter over every `*.dzi` file in a
//! base directory with per-manifest fault isolation: the first error
//! aborts a manifest's remaining levels, but never the rest of the batch.
//!
//! ```text
//! convert_directory
//!     └─ PyramidConverter::convert      (per manifest)
//!          ├─ manifest::parse           (once)
//!          └─ assemble::assemble        (per level)
//!               └─ TileDecoder::decode  (per tile, row-major)
//! ```

pub mod report;

pub use report::BatchReport;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::assemble;
use crate::error::ConvertError;
use crate::manifest::{self, MANIFEST_EXTENSION};
use crate::tile::TileDecoder;

/// File extension of assembled output images.
pub const OUTPUT_EXTENSION: &str = "png";

// =============================================================================
// Pyramid Converter
// =============================================================================

/// Converts one manifest at a time into per-level PNG files.
///
/// The converter owns a [`TileDecoder`] rooted at the base directory and
/// no other state; manifests are pure inputs and every call is
/// independent.
#[derive(Debug, Clone)]
pub struct PyramidConverter {
    decoder: TileDecoder,
}

impl PyramidConverter {
    /// Create a converter for manifests under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            decoder: TileDecoder::new(base_dir),
        }
    }

    /// Convert a single manifest, writing one PNG per level.
    ///
    /// Output files are named `<manifest stem>_<level>.png` next to the
    /// manifest. Returns the written paths in level order.
    ///
    /// The first error aborts the remaining levels of this manifest.
    /// Levels already written stay on disk; a level that fails is never
    /// partially written because the PNG is encoded in memory first.
    pub fn convert(&self, manifest_path: &Path) -> Result<Vec<PathBuf>, ConvertError> {
        let content = fs::read_to_string(manifest_path).map_err(|e| {
            ConvertError::ManifestUnreadable {
                path: manifest_path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let manifest = manifest::parse(&content)?;
        info!(
            manifest = %manifest_path.display(),
            width = manifest.width,
            height = manifest.height,
            levels = manifest.level_count(),
            "parsed manifest"
        );

        let mut outputs = Vec::with_capacity(manifest.level_count());
        for (level_no, level) in manifest.levels.iter().enumerate() {
            debug!(
                level = level_no,
                columns = level.columns,
                rows = level.rows,
                "assembling level"
            );

            let raster = assemble::assemble(level, |tile_ref| self.decoder.decode(tile_ref))?;
            let output_path = output_path(manifest_path, level_no);

            let png = raster.to_png_bytes().map_err(|e| ConvertError::OutputWrite {
                path: output_path.display().to_string(),
                level: level_no,
                message: e.to_string(),
            })?;
            fs::write(&output_path, png).map_err(|e| ConvertError::OutputWrite {
                path: output_path.display().to_string(),
                level: level_no,
                message: e.to_string(),
            })?;

            debug!(
                level = level_no,
                output = %output_path.display(),
                width = raster.width(),
                height = raster.height(),
                "wrote level"
            );
            outputs.push(output_path);
        }

        Ok(outputs)
    }
}

/// Output path for a level: the manifest path minus its extension, with
/// `_<level>.png` appended.
fn output_path(manifest_path: &Path, level_no: usize) -> PathBuf {
    let stem = manifest_path.with_extension("");
    PathBuf::from(format!(
        "{}_{}.{}",
        stem.display(),
        level_no,
        OUTPUT_EXTENSION
    ))
}

// =============================================================================
// Batch Driver
// =============================================================================

/// Convert every `*.dzi` manifest directly under `base_dir`.
///
/// Manifests are processed in file-name order so runs are deterministic.
/// Each manifest is converted independently: a non-DZI file (bad
/// signature) is skipped with a warning, any other failure is logged with
/// the manifest path and recorded in the report, and the batch moves on.
///
/// # Errors
///
/// Only an unreadable base directory fails the call itself.
pub fn convert_directory(base_dir: &Path) -> Result<BatchReport, ConvertError> {
    let manifests = find_manifests(base_dir)?;
    info!(
        dir = %base_dir.display(),
        count = manifests.len(),
        "found manifests"
    );

    let converter = PyramidConverter::new(base_dir);
    let mut report = BatchReport::default();

    for manifest_path in manifests {
        match converter.convert(&manifest_path) {
            Ok(outputs) => {
                info!(
                    manifest = %manifest_path.display(),
                    outputs = outputs.len(),
                    "converted"
                );
                report.record_converted(manifest_path, outputs);
            }
            Err(e) if e.is_bad_signature() => {
                warn!(manifest = %manifest_path.display(), "not a DZI file, skipping");
                report.record_skipped(manifest_path);
            }
            Err(e) => {
                error!(manifest = %manifest_path.display(), error = %e, "conversion failed");
                report.record_failed(manifest_path, e);
            }
        }
    }

    Ok(report)
}

/// Enumerate `*.dzi` files directly under `base_dir`, sorted by name.
fn find_manifests(base_dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(base_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| ConvertError::DirectoryUnreadable {
            path: base_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
        {
            manifests.push(path.to_path_buf());
        }
    }

    Ok(manifests)
}

// =============================================================================
// Tests
// =============================================================================
