//! Mosaic stitching: every tile of a grid pasted into one full-size canvas
//!
//! The reference tile fixes the cell size and pixel format, bit depth
//! included. Tiles of any other size are resized bilinearly to fit their
//! cell. Holes and unreadable
//! tiles leave the zero background untouched.

use crate::compose::canvas::Canvas;
use crate::compose::channel::{PixelFormat, Resample};
use crate::compose::workers::worker_pool;
use crate::io::configuration::AUTO_WORKERS;
use crate::io::error::{Result, TileError};
use crate::io::image::load_image;
use crate::io::listing::list_tiles;
use crate::io::progress::ProgressReporter;
use crate::math::integer::scaled_extent;
use crate::spatial::grid::{Grid, GridBuilder};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Cell size and pixel format taken from the reference tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileReference {
    /// Name of the reference tile
    pub name: String,
    /// Cell width in pixels
    pub width: u32,
    /// Cell height in pixels
    pub height: u32,
    /// Mosaic pixel format
    pub format: PixelFormat,
}

/// Totals reported by [`MosaicStitcher::stitch`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StitchSummary {
    /// Mosaic width in pixels
    pub width: u32,
    /// Mosaic height in pixels
    pub height: u32,
    /// Tiles pasted
    pub tiles_pasted: usize,
    /// Tiles resized to the reference size before pasting
    pub resized: usize,
    /// Tiles that could not be read
    pub read_failures: usize,
    /// Grid cells without a tile
    pub holes: usize,
}

impl StitchSummary {
    const fn absorb(&mut self, row: &Self) {
        self.tiles_pasted += row.tiles_pasted;
        self.resized += row.resized;
        self.read_failures += row.read_failures;
        self.holes += row.holes;
    }
}

/// Pastes every tile of a grid into a single canvas
#[derive(Debug)]
pub struct MosaicStitcher {
    tiles_dir: PathBuf,
    grid: Grid,
    workers: usize,
}

impl MosaicStitcher {
    /// Stitcher over an already built grid of tiles in `tiles_dir`
    pub fn new(tiles_dir: impl Into<PathBuf>, grid: Grid) -> Self {
        Self {
            tiles_dir: tiles_dir.into(),
            grid,
            workers: AUTO_WORKERS,
        }
    }

    /// List `tiles_dir` and lay its tiles out with `builder`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tiles_dir` is missing or unreadable
    /// - The directory contains no tiles
    /// - The grid cannot be built
    pub fn from_directory(tiles_dir: impl Into<PathBuf>, builder: &GridBuilder) -> Result<Self> {
        let tiles_dir = tiles_dir.into();
        let names: Vec<String> = list_tiles(&tiles_dir)?.into_iter().collect();
        if names.is_empty() {
            return Err(TileError::NoTiles {
                directories: vec![tiles_dir],
            });
        }

        let grid = builder.build(names)?;
        Ok(Self::new(tiles_dir, grid))
    }

    /// Use `workers` threads for decoding (0 = one per CPU)
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Grid being stitched
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Source directory
    pub fn tiles_dir(&self) -> &Path {
        &self.tiles_dir
    }

    /// Decode the lexicographically first placed tile for size and format
    ///
    /// # Errors
    ///
    /// Returns an error if the grid holds no tile or the reference tile
    /// cannot be decoded
    pub fn reference(&self) -> Result<TileReference> {
        let name = self
            .grid
            .first_placed_name()
            .ok_or_else(|| TileError::NoTiles {
                directories: vec![self.tiles_dir.clone()],
            })?;
        let tile = load_image(&self.tiles_dir.join(name))?;

        Ok(TileReference {
            name: name.to_string(),
            width: tile.width(),
            height: tile.height(),
            format: PixelFormat::from_color_type(tile.color()),
        })
    }

    // One grid row rendered into a strip of the final mosaic, with its counts
    fn compose_row(
        &self,
        y: usize,
        reference: &TileReference,
        strip_width: u32,
    ) -> Result<(Canvas, StitchSummary)> {
        let mut strip = Canvas::new(reference.format, strip_width, reference.height);
        let mut counts = StitchSummary::default();

        for x in 0..self.grid.width() {
            let Some(name) = self.grid.tile_at(x, y) else {
                counts.holes += 1;
                continue;
            };

            let path = self.tiles_dir.join(name);
            match load_image(&path) {
                Ok(tile) => {
                    let tile = if tile.width() == reference.width
                        && tile.height() == reference.height
                    {
                        tile
                    } else {
                        counts.resized += 1;
                        tile.resize_exact(
                            reference.width,
                            reference.height,
                            Resample::Bilinear.filter_type(),
                        )
                    };
                    let left = scaled_extent("tiles_per_row", x, reference.width)?;
                    strip.paste_image(&tile, left, 0);
                    counts.tiles_pasted += 1;
                }
                Err(err) => {
                    warn!("Could not read {}: {err}", path.display());
                    counts.read_failures += 1;
                }
            }
        }

        Ok((strip, counts))
    }

    /// Build the full mosaic in memory
    ///
    /// Rows are decoded in parallel, and each strip is copied into the
    /// mosaic as soon as it is complete. At most one strip per worker is
    /// alive next to the mosaic.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The reference tile cannot be decoded
    /// - The mosaic size overflows `u32`
    /// - The worker pool cannot be started
    pub fn stitch(&self, progress: &ProgressReporter) -> Result<(Canvas, StitchSummary)> {
        let reference = self.reference()?;
        let width = scaled_extent("tiles_per_row", self.grid.width(), reference.width)?;
        let height = scaled_extent("rows", self.grid.height(), reference.height)?;
        info!(
            "Creating {}-bit mosaic of size {width} x {height} (W x H in pixels)",
            reference.format.sample_bits()
        );

        let mosaic = Mutex::new(Canvas::new(reference.format, width, height));
        let pool = worker_pool(self.workers)?;
        let rows = pool.install(|| {
            (0..self.grid.height())
                .into_par_iter()
                .map(|y| -> Result<StitchSummary> {
                    let (strip, counts) = self.compose_row(y, &reference, width)?;
                    let top = scaled_extent("rows", y, reference.height)?;
                    mosaic
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .paste(&strip, 0, top);
                    progress.advance();
                    Ok(counts)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut summary = StitchSummary {
            width,
            height,
            ..StitchSummary::default()
        };
        for counts in &rows {
            summary.absorb(counts);
        }

        let mosaic = mosaic.into_inner().unwrap_or_else(PoisonError::into_inner);
        Ok((mosaic, summary))
    }

    /// Build the mosaic and save it to `out_path`
    ///
    /// # Errors
    ///
    /// Returns an error if stitching fails or the mosaic cannot be saved
    pub fn stitch_to(&self, out_path: &Path, progress: &ProgressReporter) -> Result<StitchSummary> {
        let (mosaic, summary) = self.stitch(progress)?;
        mosaic.save_creating_parent(out_path)?;
        info!(
            "Saved full mosaic to {} ({} tiles, {} resized, {} unreadable, {} holes)",
            out_path.display(),
            summary.tiles_pasted,
            summary.resized,
            summary.read_failures,
            summary.holes
        );
        Ok(summary)
    }
}
