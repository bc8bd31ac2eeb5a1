use thiserror::Error;

/// Render an optional level index as a message suffix.
fn level_suffix(level: &Option<usize>) -> String {
    match level {
        Some(l) => format!(" (level {l})"),
        None => String::new(),
    }
}

/// Errors that can occur when parsing a DZI pyramid manifest.
///
/// Most variants carry enough context (level index, row index) to point at
/// the offending line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    /// The first line does not start with the `DZI` signature token.
    ///
    /// This is the one non-fatal parse failure: the batch driver logs a
    /// warning and skips the file instead of counting it as a hard failure.
    #[error("not a DZI manifest: first line does not start with \"DZI\"")]
    BadSignature,

    /// Line 2 is not a `width,height` pair of positive integers.
    ///
    /// Also raised for a malformed `columns,rows` line, in which case
    /// `level` is set to the level being parsed.
    #[error("invalid dimensions line {line:?}{}", level_suffix(.level))]
    BadDimensions {
        line: String,
        level: Option<usize>,
    },

    /// Line 3 is not a non-negative integer level count.
    #[error("invalid level count {line:?}")]
    BadLevelCount { line: String },

    /// A grid row declares fewer tile tokens than the level's column count.
    #[error("level {level} row {row}: expected {expected} tile names, got {actual}")]
    TruncatedRow {
        level: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// The manifest ended before all declared levels and rows were read.
    #[error("unexpected end of manifest while reading {expected}")]
    UnexpectedEof { expected: &'static str },
}

/// Errors that can occur when decoding or assembling tiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// The tile file is missing or could not be read.
    #[error("cannot read tile {path}: {message}")]
    Unreadable { path: String, message: String },

    /// The tile file's bytes are not a decodable WebP image.
    #[error("cannot decode tile {path}: {message}")]
    Corrupt { path: String, message: String },

    /// A decoded tile does not line up with its neighbors in the grid.
    ///
    /// Tiles within a row must share a height; rows must share a width.
    /// Emitting a raster with misplaced pixels is worse than failing, so
    /// this aborts the level.
    #[error("tile {path} is {actual}px {axis}, expected {expected}px to fit the grid")]
    SizeMismatch {
        path: String,
        axis: &'static str,
        expected: u32,
        actual: u32,
    },
}

/// Errors that abort the conversion of a single manifest.
///
/// The batch driver recovers from these at the manifest boundary: one bad
/// manifest never stops its siblings from converting.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// The base directory could not be enumerated for manifests.
    #[error("cannot scan directory {path}: {message}")]
    DirectoryUnreadable { path: String, message: String },

    /// The manifest file itself could not be read.
    #[error("cannot read manifest {path}: {message}")]
    ManifestUnreadable { path: String, message: String },

    /// The manifest text failed to parse.
    #[error("manifest parse error: {0}")]
    Manifest(#[from] ManifestError),

    /// A tile failed to decode or fit the grid.
    #[error("tile error: {0}")]
    Tile(#[from] TileError),

    /// An assembled level could not be encoded or written to disk.
    #[error("cannot write level {level} output {path}: {message}")]
    OutputWrite {
        path: String,
        level: usize,
        message: String,
    },
}

impl ConvertError {
    /// Whether this error means "not a DZI file" rather than a broken one.
    pub fn is_bad_signature(&self) -> bool {
        matches!(self, ConvertError::Manifest(ManifestError::BadSignature))
    }
}
