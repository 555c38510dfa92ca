//! Output naming and persistence for aggregated tiles
//!
//! Every channel of one block shares a single file stem; channels are kept
//! apart by writing into per-channel subdirectories of the output root.
//! Existing files are overwritten.

use crate::compose::canvas::Canvas;
use crate::io::configuration::{OUTPUT_EXTENSION, SEQUENTIAL_DIGITS};
use crate::io::error::{Result, WithPath};
use crate::math::integer::decimal_digits;
use crate::spatial::block::Block;
use crate::spatial::coordinate::segment_widths;
use crate::spatial::grid::Grid;
use std::path::{Path, PathBuf};

/// Output naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NamingMode {
    /// Zero-padded block ordinal, `00000.png`, `00001.png`, ...
    #[value(name = "seq", alias = "sequential")]
    Sequential,
    /// Block-space coordinates, `<x>_<y>.png`
    #[default]
    #[value(name = "coord", alias = "coordinate")]
    Coordinate,
}

/// Zero-padding widths for the x and y parts of coordinate names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddingWidths {
    /// Digits for the x part
    pub x: usize,
    /// Digits for the y part
    pub y: usize,
}

impl PaddingWidths {
    /// Derive padding from the input naming convention
    ///
    /// An explicit `override_digits` applies to both axes. Otherwise the
    /// first occupied cell (row-major) whose name carries a coordinate
    /// supplies its segment widths. Failing that, widths follow the digit
    /// count of the grid extent divided by the block factor.
    pub fn derive(grid: &Grid, factor: usize, override_digits: Option<usize>) -> Self {
        if let Some(digits) = override_digits {
            return Self {
                x: digits,
                y: digits,
            };
        }

        if let Some((x, y)) = grid
            .first_occupied()
            .and_then(|(_, name)| segment_widths(name))
        {
            return Self { x, y };
        }

        let factor = factor.max(1);
        Self {
            x: decimal_digits((grid.width() / factor).max(1)),
            y: decimal_digits((grid.height() / factor).max(1)),
        }
    }
}

/// Decides output names and writes channel canvases below an output root
#[derive(Debug, Clone)]
pub struct TileWriter {
    root: PathBuf,
    mode: NamingMode,
    padding: PaddingWidths,
}

impl TileWriter {
    /// Writer rooted at `root` using `mode` and coordinate `padding`
    pub fn new(root: impl Into<PathBuf>, mode: NamingMode, padding: PaddingWidths) -> Self {
        Self {
            root: root.into(),
            mode,
            padding,
        }
    }

    /// Output root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Naming scheme in use
    pub const fn mode(&self) -> NamingMode {
        self.mode
    }

    /// Coordinate padding in use
    pub const fn padding(&self) -> PaddingWidths {
        self.padding
    }

    /// File name shared by all channels of `block`
    pub fn file_name(&self, block: &Block) -> String {
        match self.mode {
            NamingMode::Sequential => {
                format!(
                    "{:0width$}.{OUTPUT_EXTENSION}",
                    block.ordinal(),
                    width = SEQUENTIAL_DIGITS
                )
            }
            NamingMode::Coordinate => {
                let coord = block.block_coordinate();
                format!(
                    "{:0wx$}_{:0wy$}.{OUTPUT_EXTENSION}",
                    coord.x,
                    coord.y,
                    wx = self.padding.x,
                    wy = self.padding.y
                )
            }
        }
    }

    /// Full path for `block` inside the channel subdirectory `dir`
    pub fn path_for(&self, dir: &str, block: &Block) -> PathBuf {
        self.root.join(dir).join(self.file_name(block))
    }

    /// Create every channel subdirectory
    ///
    /// Called once before any worker starts; creating an existing directory
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created
    pub fn prepare<'a>(&self, dirs: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for dir in dirs {
            let path = self.root.join(dir);
            std::fs::create_dir_all(&path).with_path(&path, "create directory")?;
        }
        Ok(())
    }

    /// Save `canvas` as the `dir` channel of `block`
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written
    pub fn write(&self, dir: &str, block: &Block, canvas: &Canvas) -> Result<PathBuf> {
        let path = self.path_for(dir, block);
        canvas.save(&path)?;
        Ok(path)
    }
}
