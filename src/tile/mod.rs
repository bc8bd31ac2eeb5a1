//! Tile decoding layer.
//!
//! A [`TileRef`](crate::manifest::TileRef) from the manifest grid is
//! resolved to a WebP file under the base directory's `tiles/`
//! subdirectory and decoded into a [`TileImage`], an RGBA pixel buffer
//! with validated dimensions. The assembler consumes these buffers one at
//! a time and never resamples them.

pub mod decoder;

pub use decoder::TileDecoder;

use image::RgbaImage;

use crate::error::TileError;

/// Number of channels in a decoded tile (RGBA).
pub const TILE_CHANNELS: u32 = 4;

/// A decoded tile: an owned RGBA pixel buffer with explicit dimensions.
///
/// `pixels` is row-major, `width * height * 4` bytes. The length is
/// validated at construction, so downstream strided copies can index by
/// `(row * width + column) * 4` without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TileImage {
    /// Build a tile from raw RGBA bytes, validating the buffer length.
    pub fn from_rgba_bytes(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        path: &str,
    ) -> Result<Self, TileError> {
        let expected = width as usize * height as usize * TILE_CHANNELS as usize;
        if pixels.len() != expected {
            return Err(TileError::Corrupt {
                path: path.to_string(),
                message: format!(
                    "decoded to {} bytes, expected {} for {}x{} RGBA",
                    pixels.len(),
                    expected,
                    width,
                    height
                ),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a decoded image into a tile buffer.
    pub fn from_image(image: RgbaImage, path: &str) -> Result<Self, TileError> {
        let (width, height) = image.dimensions();
        Self::from_rgba_bytes(width, height, image.into_raw(), path)
    }

    /// Tile width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Tile height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length in bytes of one pixel row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * TILE_CHANNELS as usize
    }

    /// One row of pixels, `row_stride()` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    pub fn row(&self, row: u32) -> &[u8] {
        assert!(row < self.height, "row {row} out of {}", self.height);
        let stride = self.row_stride();
        let start = row as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// The whole pixel buffer, row-major RGBA.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

// =============================================================================
// Tests
// =============================================================================
