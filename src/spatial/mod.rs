//! Spatial data structures for tile layouts
//!
//! This module contains layout-related functionality including:
//! - Coordinate parsing from tile filenames
//! - Grid inference with fallback strategies
//! - SxS block enumeration over a grid

/// SxS block windows and member enumeration
pub mod block;
/// Filename coordinate parsing
pub mod coordinate;
/// Grid construction and lookup
pub mod grid;

pub use block::Block;
pub use coordinate::Coordinate;
pub use grid::{FallbackOrder, Grid, GridBuilder, LayoutStrategy};
