//! End-to-end conversion tests on real files.

use std::fs;
use std::path::Path;

use dzi_flatten::convert::{convert_directory, PyramidConverter};
use dzi_flatten::error::{ConvertError, ManifestError, TileError};

use super::test_utils::{
    png_files, read_png, write_manifest, write_tile, BLUE, GREEN, RED, YELLOW,
};

// =============================================================================
// Single Manifest
// =============================================================================

#[test]
fn test_quadrant_scenario() {
    // 512x512 declared, one level, 2x2 grid of 256x256 solid tiles.
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        "slide.dzi",
        "DZI v1\n512,512\n1\n2,2\na,b\nc,d\n",
    );
    write_tile(dir.path(), "a", 256, 256, RED);
    write_tile(dir.path(), "b", 256, 256, GREEN);
    write_tile(dir.path(), "c", 256, 256, BLUE);
    write_tile(dir.path(), "d", 256, 256, YELLOW);

    let converter = PyramidConverter::new(dir.path());
    let outputs = converter.convert(&manifest).unwrap();
    assert_eq!(outputs, vec![dir.path().join("slide_0.png")]);

    let image = read_png(&outputs[0]);
    assert_eq!(image.dimensions(), (512, 512));
    assert_eq!(image.get_pixel(0, 0).0, RED);
    assert_eq!(image.get_pixel(511, 0).0, GREEN);
    assert_eq!(image.get_pixel(0, 511).0, BLUE);
    assert_eq!(image.get_pixel(511, 511).0, YELLOW);
    // Center seam
    assert_eq!(image.get_pixel(255, 255).0, RED);
    assert_eq!(image.get_pixel(256, 256).0, YELLOW);
}

#[test]
fn test_one_output_per_level() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        "multi.dzi",
        "DZI\n64,64\n3\n2,1\na,b\n1,1\nc\n1,1\nd\n",
    );
    write_tile(dir.path(), "a", 32, 32, RED);
    write_tile(dir.path(), "b", 32, 32, GREEN);
    write_tile(dir.path(), "c", 32, 32, BLUE);
    write_tile(dir.path(), "d", 16, 16, YELLOW);

    let outputs = PyramidConverter::new(dir.path()).convert(&manifest).unwrap();
    assert_eq!(
        outputs,
        vec![
            dir.path().join("multi_0.png"),
            dir.path().join("multi_1.png"),
            dir.path().join("multi_2.png"),
        ]
    );

    assert_eq!(read_png(&outputs[0]).dimensions(), (64, 32));
    assert_eq!(read_png(&outputs[1]).dimensions(), (32, 32));
    assert_eq!(read_png(&outputs[2]).dimensions(), (16, 16));
}

#[test]
fn test_zero_levels_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "empty.dzi", "DZI\n512,512\n0\n");

    let outputs = PyramidConverter::new(dir.path()).convert(&manifest).unwrap();
    assert!(outputs.is_empty());
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn test_declared_size_not_enforced() {
    // Declared 512x512 but the single tile is 8x8; the output is 8x8.
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "tiny.dzi", "DZI\n512,512\n1\n1,1\nonly\n");
    write_tile(dir.path(), "only", 8, 8, RED);

    let outputs = PyramidConverter::new(dir.path()).convert(&manifest).unwrap();
    assert_eq!(read_png(&outputs[0]).dimensions(), (8, 8));
}

#[test]
fn test_truncated_row_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "trunc.dzi", "DZI\n512,512\n1\n3,1\na,b\n");
    write_tile(dir.path(), "a", 8, 8, RED);
    write_tile(dir.path(), "b", 8, 8, GREEN);

    let result = PyramidConverter::new(dir.path()).convert(&manifest);
    assert!(matches!(
        result,
        Err(ConvertError::Manifest(ManifestError::TruncatedRow {
            level: 0,
            row: 0,
            expected: 3,
            actual: 2,
        }))
    ));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn test_missing_tile_keeps_earlier_levels() {
    // Level 0 is complete, level 1 references a tile that does not exist.
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        "partial.dzi",
        "DZI\n16,16\n2\n1,1\nok\n1,1\ngone\n",
    );
    write_tile(dir.path(), "ok", 16, 16, RED);

    let result = PyramidConverter::new(dir.path()).convert(&manifest);
    assert!(matches!(
        result,
        Err(ConvertError::Tile(TileError::Unreadable { .. }))
    ));

    // The level written before the failure stays; nothing beyond it exists.
    assert!(dir.path().join("partial_0.png").exists());
    assert!(!dir.path().join("partial_1.png").exists());
}

#[test]
fn test_corrupt_tile_aborts_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "bad.dzi", "DZI\n16,16\n1\n1,1\nbroken\n");
    let tile_dir = dir.path().join("tiles");
    fs::create_dir_all(&tile_dir).unwrap();
    fs::write(tile_dir.join("broken.webp"), b"this is not webp data").unwrap();

    let result = PyramidConverter::new(dir.path()).convert(&manifest);
    assert!(matches!(
        result,
        Err(ConvertError::Tile(TileError::Corrupt { .. }))
    ));
    assert!(png_files(dir.path()).is_empty());
}

#[test]
fn test_mismatched_tile_heights_abort() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(dir.path(), "jagged.dzi", "DZI\n16,8\n1\n2,1\na,b\n");
    write_tile(dir.path(), "a", 8, 8, RED);
    write_tile(dir.path(), "b", 8, 12, GREEN);

    let result = PyramidConverter::new(dir.path()).convert(&manifest);
    assert!(matches!(
        result,
        Err(ConvertError::Tile(TileError::SizeMismatch { .. }))
    ));
    assert!(png_files(dir.path()).is_empty());
}

// =============================================================================
// Batch Behavior
// =============================================================================

#[test]
fn test_bad_signature_skipped_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "alpha.dzi", "XYZ not a manifest\n");
    write_manifest(dir.path(), "beta.dzi", "DZI\n8,8\n1\n1,1\nt\n");
    write_tile(dir.path(), "t", 8, 8, BLUE);

    let report = convert_directory(dir.path()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.skipped, vec![dir.path().join("alpha.dzi")]);
    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.output_count(), 1);

    // The skipped manifest produced no output; the good one did.
    assert!(!dir.path().join("alpha_0.png").exists());
    assert!(dir.path().join("beta_0.png").exists());
}

#[test]
fn test_failed_manifest_isolated() {
    // "broken" sorts before "working": the failure must not stop the batch.
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "broken.dzi", "DZI\n8,8\n1\n1,1\nmissing\n");
    write_manifest(dir.path(), "working.dzi", "DZI\n8,8\n1\n1,1\nt\n");
    write_tile(dir.path(), "t", 8, 8, GREEN);

    let report = convert_directory(dir.path()).unwrap();
    assert!(!report.is_clean());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, dir.path().join("broken.dzi"));
    assert!(matches!(
        report.failed[0].1,
        ConvertError::Tile(TileError::Unreadable { .. })
    ));

    assert!(dir.path().join("working_0.png").exists());
    assert!(!dir.path().join("broken_0.png").exists());
}

#[test]
fn test_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let report = convert_directory(dir.path()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.converted.len(), 0);
    assert_eq!(report.output_count(), 0);
}

#[test]
fn test_missing_directory_fails() {
    let result = convert_directory(Path::new("/definitely/not/here"));
    assert!(matches!(
        result,
        Err(ConvertError::DirectoryUnreadable { .. })
    ));
}

#[test]
fn test_non_dzi_files_not_discovered() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "notes.txt", "DZI\n8,8\n0\n");

    let report = convert_directory(dir.path()).unwrap();
    assert_eq!(report.converted.len(), 0);
    assert_eq!(report.skipped.len(), 0);
}
