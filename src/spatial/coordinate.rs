//! Grid coordinates embedded in tile filenames
//!
//! A tile named `<prefix>_<x>_<y>.<ext>` sits at column `x`, row `y`. The
//! prefix is optional and may itself contain delimiters; only the last two
//! segments of the stem are inspected. Names without that shape simply carry
//! no coordinate, which is an expected outcome rather than an error.

use crate::io::configuration::COORDINATE_DELIMITER;
use std::path::Path;

/// Grid position of a tile (column `x`, row `y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Coordinate {
    /// Create a coordinate from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

// Returns the raw x and y segments when both are non-empty ASCII digit runs
fn coordinate_segments(name: &str) -> Option<(&str, &str)> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    let mut segments = stem.rsplit(COORDINATE_DELIMITER);
    let y_part = segments.next()?;
    let x_part = segments.next()?;

    let is_digits =
        |segment: &str| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit());
    (is_digits(x_part) && is_digits(y_part)).then_some((x_part, y_part))
}

/// Parse the `(x, y)` coordinate from a tile filename
///
/// Leading zeros are accepted and discarded; `tile_007_012.png` yields
/// `(7, 12)`. Values too large for `usize` are treated as unparseable.
pub fn parse_coordinate(name: &str) -> Option<Coordinate> {
    let (x_part, y_part) = coordinate_segments(name)?;
    let x = x_part.parse().ok()?;
    let y = y_part.parse().ok()?;
    Some(Coordinate { x, y })
}

/// Character widths of the x and y segments of a coordinate-named tile
///
/// Used to reproduce the input zero-padding convention on output names.
pub fn segment_widths(name: &str) -> Option<(usize, usize)> {
    let (x_part, y_part) = coordinate_segments(name)?;
    // Both segments are ASCII, so byte length equals character count
    Some((x_part.len(), y_part.len()))
}
