//! # dzi-flatten
//!
//! Flattens tiled DZI image pyramids back into whole images.
//!
//! A DZI manifest is a small line-oriented text file describing a
//! multi-resolution pyramid: declared dimensions, a level count, and per
//! level a grid of tile names. Each tile name points at a WebP file in the
//! `tiles/` subdirectory next to the manifest. This crate parses the
//! manifest, decodes every tile, stitches each level's grid into one
//! contiguous RGBA raster in row-major order, and writes one PNG per
//! level next to the manifest.
//!
//! ## Architecture
//!
//! - [`manifest`] - manifest model and the sequential text parser
//! - [`tile`] - tile path resolution and WebP decoding
//! - [`assemble`] - row-major grid compositing into a single raster
//! - [`convert`] - per-manifest pipeline and the batch directory driver
//! - [`config`] - CLI configuration
//! - [`error`] - typed errors for each stage
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use dzi_flatten::convert::convert_directory;
//!
//! let report = convert_directory(Path::new("slides/sample"))?;
//! println!("{report}");
//! assert!(report.is_clean());
//! # Ok::<(), dzi_flatten::error::ConvertError>(())
//! ```
//!
//! Failure handling is scoped to the manifest: the first error aborts a
//! manifest's remaining levels (a missing tile cannot be substituted
//! without corrupting geometry), while the rest of the batch continues.

pub mod assemble;
pub mod config;
pub mod convert;
pub mod error;
pub mod manifest;
pub mod tile;

// Re-export commonly used types
pub use assemble::{assemble, AssembledRaster};
pub use config::Config;
pub use convert::{convert_directory, BatchReport, PyramidConverter, OUTPUT_EXTENSION};
pub use error::{ConvertError, ManifestError, TileError};
pub use manifest::{parse, LevelSpec, PyramidManifest, TileRef, MANIFEST_EXTENSION, SIGNATURE};
pub use tile::{TileDecoder, TileImage, TILE_CHANNELS};
