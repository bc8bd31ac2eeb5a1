//! DZI pyramid manifest model and parser.
//!
//! A manifest is a small line-oriented text file describing a tiled image
//! pyramid:
//!
//! ```text
//! DZI v1                  <- signature, must start with "DZI"
//! 512,512                 <- declared full-resolution width,height
//! 2                       <- level count
//! 2,2                     <- level 0: columns,rows
//! a,b                     <- level 0, row 0 tile names
//! c,d                     <- level 0, row 1 tile names
//! 1,1                     <- level 1: columns,rows
//! e                       <- level 1, row 0 tile name
//! ```
//!
//! Tile names are opaque tokens resolved to files by
//! [`TileDecoder`](crate::tile::TileDecoder). The declared width/height are
//! descriptive metadata carried along for reporting; the assembled output
//! size is determined solely by the tiles themselves.

pub mod parser;

pub use parser::parse;

use std::fmt;

/// File extension of pyramid manifest files.
pub const MANIFEST_EXTENSION: &str = "dzi";

/// Signature token the first manifest line must start with.
pub const SIGNATURE: &str = "DZI";

// =============================================================================
// Manifest Types
// =============================================================================

/// An opaque tile identifier from a manifest grid row.
///
/// Does not own pixel data; it is turned into a file path by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileRef(pub String);

impl TileRef {
    /// The raw token as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One resolution tier of the pyramid: a rows x columns grid of tile names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    /// Number of tile columns in this level.
    pub columns: u32,
    /// Number of tile rows in this level.
    pub rows: u32,
    /// Tile names in row-major order: `grid.len() == rows`, every inner
    /// vector has exactly `columns` entries. Enforced by the parser.
    pub grid: Vec<Vec<TileRef>>,
}

impl LevelSpec {
    /// Total number of tiles in this level.
    pub fn tile_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }
}

/// A parsed pyramid manifest, immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PyramidManifest {
    /// Declared full-resolution width. Metadata only, never enforced.
    pub width: u32,
    /// Declared full-resolution height. Metadata only, never enforced.
    pub height: u32,
    /// Levels in manifest order. `levels.len()` always equals the declared
    /// level count; the parser fails otherwise.
    pub levels: Vec<LevelSpec>,
}

impl PyramidManifest {
    /// Number of levels in the pyramid.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
