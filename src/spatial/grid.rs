//! Grid inference from tile filename listings
//!
//! A [`Grid`] maps every `(x, y)` cell of a `width x height` rectangle to a
//! tile name or to a hole. [`GridBuilder`] picks the layout strategy once per
//! run, in priority order:
//!
//! 1. coordinates parsed from the names themselves,
//! 2. an explicit tiles-per-row count, filled row-major,
//! 3. an approximately square layout, padded by repeating the last tile.
//!
//! The chosen [`LayoutStrategy`] travels with the grid so output naming can
//! tell coordinate-derived layouts from sequential ones.

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, TileError, require_positive};
use crate::math::integer::{ceil_div, floor_sqrt};
use crate::spatial::block::Block;
use crate::spatial::coordinate::{Coordinate, parse_coordinate};
use log::{info, warn};
use ndarray::Array2;

/// Cell ordering used by the square-approximation fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FallbackOrder {
    /// Fill each row left to right before moving down
    #[default]
    #[value(name = "row")]
    RowMajor,
    /// Fill each column top to bottom before moving right
    #[value(name = "col", alias = "column")]
    ColumnMajor,
}

/// How the grid layout was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStrategy {
    /// Layout read from `_<x>_<y>` filename coordinates
    CoordinateInferred,
    /// Row-major layout with a caller-supplied width
    ExplicitWidth {
        /// Tiles per row
        tiles_per_row: usize,
    },
    /// Approximately square layout chosen when nothing better is known
    SquareApproximated {
        /// Fill order of the padded name list
        order: FallbackOrder,
    },
}

impl LayoutStrategy {
    /// Whether cell positions came from filename coordinates
    pub const fn is_coordinate_inferred(&self) -> bool {
        matches!(self, Self::CoordinateInferred)
    }
}

/// Rectangular tile layout with holes
///
/// Cells are stored densely as indices into the sorted name list, so lookup
/// is O(1) and a hole is simply `None`. The grid is immutable once built.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Tile index per cell, indexed by `(row, col)`
    cells: Array2<Option<usize>>,
    /// Input names in lexicographic order
    names: Vec<String>,
    strategy: LayoutStrategy,
}

impl Grid {
    fn empty(width: usize, height: usize, names: Vec<String>, strategy: LayoutStrategy) -> Self {
        Self {
            cells: Array2::from_elem((height, width), None),
            names,
            strategy,
        }
    }

    fn place(&mut self, x: usize, y: usize, index: usize) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = Some(index);
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Strategy that produced this layout
    pub const fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    /// All input names in lexicographic order, including any left out of the layout
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index into [`Grid::names`] of the tile at `(x, y)`
    ///
    /// Returns `None` for holes and for positions outside the grid.
    pub fn tile_index(&self, x: usize, y: usize) -> Option<usize> {
        self.cells.get((y, x)).copied().flatten()
    }

    /// Name of the tile at `(x, y)`, or `None` for holes and out-of-range positions
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&str> {
        self.tile_index(x, y)
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Number of cells that hold a tile
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Number of in-grid cells without a tile
    pub fn hole_count(&self) -> usize {
        self.cells.len() - self.occupied_count()
    }

    /// Occupied cells in row-major order as `(coordinate, name)`
    pub fn occupied(&self) -> impl Iterator<Item = (Coordinate, &str)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(move |((y, x), &cell)| {
                cell.and_then(|index| self.names.get(index))
                    .map(|name| (Coordinate::new(x, y), name.as_str()))
            })
    }

    /// First occupied cell in row-major order
    pub fn first_occupied(&self) -> Option<(Coordinate, &str)> {
        self.occupied().next()
    }

    /// Lexicographically smallest name placed anywhere in the grid
    pub fn first_placed_name(&self) -> Option<&str> {
        self.cells
            .iter()
            .filter_map(|cell| *cell)
            .min()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Grid-aligned SxS blocks in row-major block order
    ///
    /// Trailing partial blocks are included; their out-of-range members are
    /// reported as holes. Yields nothing when `factor` is 0.
    pub fn blocks(&self, factor: usize) -> impl Iterator<Item = Block> + '_ {
        let columns = ceil_div(self.width(), factor);
        let rows = ceil_div(self.height(), factor);
        (0..rows * columns).map(move |ordinal| {
            let origin =
                Coordinate::new((ordinal % columns) * factor, (ordinal / columns) * factor);
            Block::from_grid(self, ordinal, origin, factor)
        })
    }

    /// Number of blocks [`Grid::blocks`] yields for `factor`
    pub fn block_count(&self, factor: usize) -> usize {
        ceil_div(self.width(), factor) * ceil_div(self.height(), factor)
    }
}

/// Builds a [`Grid`] from a filename listing
#[derive(Debug, Clone)]
pub struct GridBuilder {
    tiles_per_row: Option<usize>,
    order: FallbackOrder,
    min_fallback_width: usize,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridBuilder {
    /// Builder with no explicit width, row-major fallback and minimum width 1
    pub const fn new() -> Self {
        Self {
            tiles_per_row: None,
            order: FallbackOrder::RowMajor,
            min_fallback_width: 1,
        }
    }

    /// Use a fixed row width when names carry no coordinates
    #[must_use]
    pub const fn with_tiles_per_row(mut self, tiles_per_row: Option<usize>) -> Self {
        self.tiles_per_row = tiles_per_row;
        self
    }

    /// Fill order for the square-approximation fallback
    #[must_use]
    pub const fn with_order(mut self, order: FallbackOrder) -> Self {
        self.order = order;
        self
    }

    /// Lower bound on the square-approximation width (the block factor in aggregation)
    #[must_use]
    pub const fn with_min_fallback_width(mut self, width: usize) -> Self {
        self.min_fallback_width = width;
        self
    }

    /// Infer the layout of `names`
    ///
    /// Names are sorted and deduplicated first, so the result does not depend
    /// on listing order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `names` is empty
    /// - The explicit tiles-per-row or the minimum fallback width is 0
    /// - The inferred grid exceeds `MAX_GRID_DIMENSION` along either axis
    pub fn build(&self, names: Vec<String>) -> Result<Grid> {
        let mut names = names;
        names.sort();
        names.dedup();

        if names.is_empty() {
            return Err(TileError::NoTiles {
                directories: Vec::new(),
            });
        }

        let parsed: Vec<(usize, Coordinate)> = names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| parse_coordinate(name).map(|coord| (index, coord)))
            .collect();

        let grid = if !parsed.is_empty() {
            Self::from_coordinates(names, &parsed)?
        } else if let Some(tiles_per_row) = self.tiles_per_row {
            Self::from_explicit_width(names, tiles_per_row)?
        } else {
            self.from_square_approximation(names)?
        };

        info!(
            "Grid layout {:?}: width={}, height={}, tiles={}, holes={}",
            grid.strategy(),
            grid.width(),
            grid.height(),
            grid.occupied_count(),
            grid.hole_count()
        );

        Ok(grid)
    }

    fn from_coordinates(names: Vec<String>, parsed: &[(usize, Coordinate)]) -> Result<Grid> {
        let width = parsed.iter().map(|(_, c)| c.x).max().unwrap_or(0).saturating_add(1);
        let height = parsed.iter().map(|(_, c)| c.y).max().unwrap_or(0).saturating_add(1);
        check_dimensions(width, height)?;

        let skipped = names.len() - parsed.len();
        if skipped > 0 {
            info!("{skipped} tile names carry no coordinate and are left out of the layout");
        }

        let mut grid = Grid::empty(width, height, names, LayoutStrategy::CoordinateInferred);
        // Parsed entries are in lexicographic order, so later names overwrite earlier ones
        for &(index, coord) in parsed {
            if let Some(previous) = grid.tile_at(coord.x, coord.y) {
                warn!(
                    "Duplicate coordinate ({}, {}): '{}' replaces '{}'",
                    coord.x,
                    coord.y,
                    grid.names.get(index).map_or("", String::as_str),
                    previous
                );
            }
            grid.place(coord.x, coord.y, index);
        }

        Ok(grid)
    }

    fn from_explicit_width(names: Vec<String>, tiles_per_row: usize) -> Result<Grid> {
        let width = require_positive("tiles_per_row", tiles_per_row)?;
        let count = names.len();
        let height = ceil_div(count, width);
        check_dimensions(width, height)?;

        info!("No coordinates in tile names; using tiles_per_row={width}, height={height}");

        let mut grid = Grid::empty(
            width,
            height,
            names,
            LayoutStrategy::ExplicitWidth {
                tiles_per_row: width,
            },
        );
        for index in 0..count {
            grid.place(index % width, index / width, index);
        }

        Ok(grid)
    }

    fn from_square_approximation(&self, names: Vec<String>) -> Result<Grid> {
        let min_width = require_positive("min_fallback_width", self.min_fallback_width)?;
        let count = names.len();
        let width = min_width.max(floor_sqrt(count));
        let height = ceil_div(count, width);
        check_dimensions(width, height)?;

        warn!(
            "Could not detect coordinates. Approximated width={width}, height={height}. \
             Provide tiles_per_row for an exact layout."
        );

        let last = count - 1;
        let mut grid = Grid::empty(
            width,
            height,
            names,
            LayoutStrategy::SquareApproximated { order: self.order },
        );
        // The sequence is padded to width*height by repeating the last tile
        for position in 0..width * height {
            let index = position.min(last);
            let (x, y) = match self.order {
                FallbackOrder::RowMajor => (position % width, position / width),
                FallbackOrder::ColumnMajor => (position / height, position % height),
            };
            grid.place(x, y, index);
        }

        Ok(grid)
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        Err(TileError::GridTooLarge {
            width,
            height,
            limit: MAX_GRID_DIMENSION,
        })
    } else {
        Ok(())
    }
}
