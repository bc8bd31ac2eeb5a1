//! Sequential parser for the DZI manifest text format.
//!
//! The format is self-describing: each section declares how many lines
//! follow it, so parsing is a single forward pass over the lines with no
//! lookahead or backtracking. A `Lines` iterator is the entire parser
//! state.

use crate::error::ManifestError;
use crate::manifest::{LevelSpec, PyramidManifest, TileRef, SIGNATURE};

/// Parse manifest text into a [`PyramidManifest`].
///
/// Trailing whitespace is stripped from every line and tile names are
/// trimmed, so CRLF manifests parse identically to LF ones. Content after
/// the last declared grid row is ignored.
///
/// # Errors
///
/// - [`ManifestError::BadSignature`] if line 1 does not start with `DZI`
/// - [`ManifestError::BadDimensions`] for a malformed `width,height` or
///   `columns,rows` line
/// - [`ManifestError::BadLevelCount`] for a malformed level count line
/// - [`ManifestError::TruncatedRow`] if a grid row has too few tile names
/// - [`ManifestError::UnexpectedEof`] if the input ends early
pub fn parse(content: &str) -> Result<PyramidManifest, ManifestError> {
    let mut lines = content.lines();

    let signature = next_line(&mut lines, "the signature line")?;
    if !signature.starts_with(SIGNATURE) {
        return Err(ManifestError::BadSignature);
    }

    let size_line = next_line(&mut lines, "the width,height line")?;
    let (width, height) = parse_pair(size_line, None)?;

    let count_line = next_line(&mut lines, "the level count line")?;
    let level_count: usize = count_line
        .parse()
        .map_err(|_| ManifestError::BadLevelCount {
            line: count_line.to_string(),
        })?;

    let mut levels = Vec::with_capacity(level_count);
    for level_no in 0..level_count {
        levels.push(parse_level(&mut lines, level_no)?);
    }

    Ok(PyramidManifest {
        width,
        height,
        levels,
    })
}

/// Parse one `columns,rows` header and its `rows` grid lines.
fn parse_level<'a, I>(lines: &mut I, level_no: usize) -> Result<LevelSpec, ManifestError>
where
    I: Iterator<Item = &'a str>,
{
    let header = next_line(lines, "a columns,rows line")?;
    let (columns, rows) = parse_pair(header, Some(level_no))?;

    let mut grid = Vec::with_capacity(rows as usize);
    for row_no in 0..rows as usize {
        let row_line = next_line(lines, "a grid row")?;
        grid.push(parse_row(row_line, columns as usize, level_no, row_no)?);
    }

    Ok(LevelSpec {
        columns,
        rows,
        grid,
    })
}

/// Split a comma-separated row line into exactly `columns` tile names.
///
/// Surplus tokens are ignored; too few is a hard error. The original tool
/// only ever indexed `0..columns`, so extra tokens were never meaningful.
fn parse_row(
    line: &str,
    columns: usize,
    level_no: usize,
    row_no: usize,
) -> Result<Vec<TileRef>, ManifestError> {
    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    if tokens.len() < columns {
        return Err(ManifestError::TruncatedRow {
            level: level_no,
            row: row_no,
            expected: columns,
            actual: tokens.len(),
        });
    }

    Ok(tokens[..columns]
        .iter()
        .map(|t| TileRef(t.to_string()))
        .collect())
}

/// Parse a `a,b` line of two positive integers.
fn parse_pair(line: &str, level: Option<usize>) -> Result<(u32, u32), ManifestError> {
    let bad = || ManifestError::BadDimensions {
        line: line.to_string(),
        level,
    };

    let (a, b) = line.split_once(',').ok_or_else(bad)?;
    let a: u32 = a.trim().parse().map_err(|_| bad())?;
    let b: u32 = b.trim().parse().map_err(|_| bad())?;
    if a == 0 || b == 0 {
        return Err(bad());
    }
    Ok((a, b))
}

/// Advance the line cursor, or fail with EOF context.
///
/// Only trailing whitespace is stripped: a CR left by `lines()` on CRLF
/// input must go, but a leading-whitespace signature line is still invalid.
fn next_line<'a, I>(lines: &mut I, expected: &'static str) -> Result<&'a str, ManifestError>
where
    I: Iterator<Item = &'a str>,
{
    lines
        .next()
        .map(str::trim_end)
        .ok_or(ManifestError::UnexpectedEof { expected })
}

// =============================================================================
// Tests
// =============================================================================
