//! Grid reconstruction and compositing for directories of image tiles
//!
//! Tile filenames may carry `_<x>_<y>` grid coordinates. The crate infers a
//! rectangular layout from whatever names are present (falling back to
//! sequential layouts when no coordinates exist), then either aggregates
//! SxS neighbourhoods into a coarser multi-channel tile set or stitches the
//! whole grid into a single full-resolution mosaic.

#![forbid(unsafe_code)]

/// Canvas composition: channel table, block aggregation, stitching and tiling
pub mod compose;
/// Input/output operations, configuration and error handling
pub mod io;
/// Integer helpers shared by layout and naming
pub mod math;
/// Coordinate parsing, grid inference and block enumeration
pub mod spatial;

pub use io::error::{Result, TileError};
