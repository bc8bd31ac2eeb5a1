//! Level assembly: compositing a grid of decoded tiles into one raster.
//!
//! The geometric contract of the manifest format is entirely about order:
//! tiles are laid out row-major, left-to-right within a row, rows stacked
//! top-to-bottom. The assembler walks the grid in exactly that order,
//! copying each tile's rows into a pre-sized row buffer and appending
//! finished row buffers to the output. No resampling, cropping, or
//! scaling happens anywhere; the assembled raster's size is the sum of
//! the tile extents, independent of the manifest's declared dimensions.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use crate::error::TileError;
use crate::manifest::{LevelSpec, TileRef};
use crate::tile::{TileImage, TILE_CHANNELS};

// =============================================================================
// Assembled Raster
// =============================================================================

/// The flattened pixel buffer for one pyramid level.
///
/// Row-major RGBA, `width * height * 4` bytes, owned until written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl AssembledRaster {
    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel buffer, row-major RGBA.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`. Intended for tests and spot checks.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height);
        let offset = (y as usize * self.width as usize + x as usize) * TILE_CHANNELS as usize;
        self.pixels[offset..offset + 4].try_into().unwrap()
    }

    /// Encode the raster as PNG into an in-memory buffer.
    ///
    /// Encoding in memory first means a failure here never leaves a
    /// truncated file on disk; the caller writes the returned bytes with a
    /// single filesystem call.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }
}

// =============================================================================
// Level Assembler
// =============================================================================

/// Assemble one level's tile grid into a contiguous raster.
///
/// Tiles are obtained through the `decode` closure so the assembler can be
/// exercised without touching the filesystem. Decoding happens lazily in
/// grid order and each tile buffer is released as soon as its rows are
/// merged.
///
/// # Errors
///
/// Any error from `decode` aborts assembly and propagates unchanged.
/// [`TileError::SizeMismatch`] is raised when a tile's height differs from
/// its row's, or a row's total width differs from the first row's.
pub fn assemble<F>(level: &LevelSpec, mut decode: F) -> Result<AssembledRaster, TileError>
where
    F: FnMut(&TileRef) -> Result<TileImage, TileError>,
{
    let mut pixels: Vec<u8> = Vec::new();
    let mut raster_width: Option<u32> = None;
    let mut raster_height: u32 = 0;

    for row_refs in &level.grid {
        let row = assemble_row(row_refs, &mut decode)?;

        match raster_width {
            None => raster_width = Some(row.width),
            Some(expected) if expected != row.width => {
                return Err(TileError::SizeMismatch {
                    path: row_refs[0].as_str().to_string(),
                    axis: "wide",
                    expected,
                    actual: row.width,
                });
            }
            Some(_) => {}
        }

        raster_height += row.height;
        pixels.extend_from_slice(&row.pixels);
    }

    Ok(AssembledRaster {
        width: raster_width.unwrap_or(0),
        height: raster_height,
        pixels,
    })
}

/// One fully concatenated row of tiles.
struct RowBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Decode a row's tiles and concatenate them left-to-right.
///
/// The first tile fixes the row height; later tiles must match it. Pixels
/// are interleaved by strided copies: output row `y` is tile0's row `y`,
/// then tile1's row `y`, and so on.
fn assemble_row<F>(row_refs: &[TileRef], decode: &mut F) -> Result<RowBuffer, TileError>
where
    F: FnMut(&TileRef) -> Result<TileImage, TileError>,
{
    let mut tiles = Vec::with_capacity(row_refs.len());
    let mut row_width: u32 = 0;
    let mut row_height: Option<u32> = None;

    for tile_ref in row_refs {
        let tile = decode(tile_ref)?;

        match row_height {
            None => row_height = Some(tile.height()),
            Some(expected) if expected != tile.height() => {
                return Err(TileError::SizeMismatch {
                    path: tile_ref.as_str().to_string(),
                    axis: "tall",
                    expected,
                    actual: tile.height(),
                });
            }
            Some(_) => {}
        }

        row_width += tile.width();
        tiles.push(tile);
    }

    let row_height = row_height.unwrap_or(0);
    let stride = row_width as usize * TILE_CHANNELS as usize;
    let mut pixels = vec![0u8; stride * row_height as usize];

    let mut x_offset: usize = 0;
    for tile in &tiles {
        let tile_stride = tile.row_stride();
        for y in 0..row_height {
            let start = y as usize * stride + x_offset;
            pixels[start..start + tile_stride].copy_from_slice(tile.row(y));
        }
        x_offset += tile_stride;
    }

    Ok(RowBuffer {
        width: row_width,
        height: row_height,
        pixels,
    })
}

// =============================================================================
// Tests
// =============================================================================
