//! WebP tile file decoder.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use image::ImageReader;

use crate::error::TileError;
use crate::manifest::TileRef;
use crate::tile::TileImage;

/// Name of the subdirectory holding tile files, under the base directory.
pub const TILE_SUBDIR: &str = "tiles";

/// File extension of tile files.
pub const TILE_EXTENSION: &str = "webp";

/// Resolves tile names to files and decodes them into RGBA buffers.
///
/// A decoder is tied to one base directory (the directory holding the
/// manifests). Tile `t` resolves to `<base>/tiles/t.webp`.
///
/// # Example
///
/// ```no_run
/// use dzi_flatten::manifest::TileRef;
/// use dzi_flatten::tile::TileDecoder;
///
/// let decoder = TileDecoder::new("slides/sample");
/// let tile = decoder.decode(&TileRef("l0_r0_c0".to_string()))?;
/// assert_eq!(tile.pixels().len() % 4, 0);
/// # Ok::<(), dzi_flatten::error::TileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TileDecoder {
    tile_dir: PathBuf,
}

impl TileDecoder {
    /// Create a decoder rooted at `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            tile_dir: base_dir.as_ref().join(TILE_SUBDIR),
        }
    }

    /// Resolve a tile name to its file path.
    ///
    /// Backslashes in the token are normalized to forward slashes first;
    /// manifests written by Windows tooling encode nested tile names with
    /// `\` and must resolve identically everywhere.
    pub fn resolve(&self, tile: &TileRef) -> PathBuf {
        let token = tile.as_str().replace('\\', "/");
        self.tile_dir.join(format!("{token}.{TILE_EXTENSION}"))
    }

    /// Read and decode one tile file into an RGBA buffer.
    ///
    /// The file handle is scoped to the read; nothing stays open after
    /// this returns, on success or failure.
    ///
    /// # Errors
    ///
    /// - [`TileError::Unreadable`] if the file is missing or unreadable
    /// - [`TileError::Corrupt`] if the bytes do not decode as WebP
    pub fn decode(&self, tile: &TileRef) -> Result<TileImage, TileError> {
        let path = self.resolve(tile);
        let display = path.display().to_string();

        let data = fs::read(&path).map(Bytes::from).map_err(|e| {
            TileError::Unreadable {
                path: display.clone(),
                message: e.to_string(),
            }
        })?;

        decode_webp(&data, &display)
    }
}

/// Decode WebP bytes into a [`TileImage`], converting to RGBA.
pub fn decode_webp(data: &[u8], path: &str) -> Result<TileImage, TileError> {
    let reader = ImageReader::with_format(Cursor::new(data), image::ImageFormat::WebP);

    let image = reader.decode().map_err(|e| TileError::Corrupt {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    TileImage::from_image(image.into_rgba8(), path)
}

// =============================================================================
// Tests
// =============================================================================
