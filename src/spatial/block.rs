//! SxS windows of grid cells used by block aggregation

use crate::spatial::coordinate::Coordinate;
use crate::spatial::grid::Grid;
use bitvec::prelude::*;

/// One cell of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMember {
    /// Column within the block (0..S)
    pub column: usize,
    /// Row within the block (0..S)
    pub row: usize,
    /// Absolute grid position of the cell
    pub cell: Coordinate,
    /// Index into the grid's name list, `None` for holes
    pub tile: Option<usize>,
}

/// An SxS window of grid cells anchored at a grid-aligned origin
///
/// Members are stored row-major. Cells beyond the grid edge are holes, the
/// same as missing tiles inside the grid.
#[derive(Debug, Clone)]
pub struct Block {
    ordinal: usize,
    origin: Coordinate,
    factor: usize,
    tiles: Vec<Option<usize>>,
    holes: BitVec,
}

impl Block {
    /// Capture the members of the block at `origin` from `grid`
    pub fn from_grid(grid: &Grid, ordinal: usize, origin: Coordinate, factor: usize) -> Self {
        let mut tiles = Vec::with_capacity(factor * factor);
        let mut holes = bitvec![0; factor * factor];

        for row in 0..factor {
            for column in 0..factor {
                let tile = grid.tile_index(origin.x + column, origin.y + row);
                if tile.is_none() {
                    holes.set(row * factor + column, true);
                }
                tiles.push(tile);
            }
        }

        Self {
            ordinal,
            origin,
            factor,
            tiles,
            holes,
        }
    }

    /// Position of this block in row-major block order, starting at 0
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Top-left grid cell of the block
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Grouping factor S
    pub const fn factor(&self) -> usize {
        self.factor
    }

    /// Block position in block space, `(origin.x / S, origin.y / S)`
    pub const fn block_coordinate(&self) -> Coordinate {
        if self.factor == 0 {
            return Coordinate::new(0, 0);
        }
        Coordinate::new(self.origin.x / self.factor, self.origin.y / self.factor)
    }

    /// Whether the member at `(column, row)` is a hole
    ///
    /// Positions outside the block count as holes.
    pub fn is_hole(&self, column: usize, row: usize) -> bool {
        if column >= self.factor || row >= self.factor {
            return true;
        }
        self.holes
            .get(row * self.factor + column)
            .as_deref()
            .copied()
            .unwrap_or(true)
    }

    /// Number of hole members
    pub fn hole_count(&self) -> usize {
        self.holes.count_ones()
    }

    /// Whether every member is a hole
    pub fn is_empty(&self) -> bool {
        self.holes.all()
    }

    /// Members in row-major order
    pub fn members(&self) -> impl Iterator<Item = BlockMember> + '_ {
        self.tiles.iter().enumerate().map(move |(index, &tile)| {
            let column = index % self.factor;
            let row = index / self.factor;
            BlockMember {
                column,
                row,
                cell: Coordinate::new(self.origin.x + column, self.origin.y + row),
                tile,
            }
        })
    }
}
