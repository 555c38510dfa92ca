//! Block aggregation: SxS tile neighbourhoods into one coarser tile per channel
//!
//! For every grid-aligned block and every channel, a canvas of
//! `S * tile_size` pixels is composed from the member tiles and then
//! downsampled to `tile_size` with the channel's filter. Holes, cells past
//! the grid edge and unreadable tiles all leave the channel's blank value in
//! place, so a block is always written in full. An optional guidance channel
//! is downsampled from one composed canvas to a smaller size.
//!
//! Blocks share nothing but the read-only grid and are processed on a
//! bounded worker pool.

use crate::compose::canvas::Canvas;
use crate::compose::channel::{ChannelKind, ChannelSpec, GuidanceSpec};
use crate::compose::workers::worker_pool;
use crate::io::configuration::{AUTO_WORKERS, DEFAULT_BLOCK_FACTOR, DEFAULT_TILE_SIZE};
use crate::io::error::{Result, invalid_parameter, require_positive};
use crate::io::image::load_image;
use crate::io::progress::ProgressReporter;
use crate::io::writer::TileWriter;
use crate::math::integer::scaled_extent;
use crate::spatial::block::Block;
use crate::spatial::grid::Grid;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Where a channel's member tiles come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileSource {
    /// Tiles named as in the grid, read from this directory
    Directory(PathBuf),
    /// No tiles; every member is the blank value
    Blank,
}

/// A channel together with its tile source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSource {
    /// Static channel description
    pub spec: ChannelSpec,
    /// Tile origin
    pub source: TileSource,
}

impl ChannelSource {
    /// Channel `kind` read from `dir`
    pub fn directory(kind: ChannelKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            spec: kind.spec(),
            source: TileSource::Directory(dir.into()),
        }
    }

    /// Channel `kind` filled with its blank value
    pub const fn blank(kind: ChannelKind) -> Self {
        Self {
            spec: kind.spec(),
            source: TileSource::Blank,
        }
    }

    /// Source directory, if the channel reads tiles
    pub fn directory_path(&self) -> Option<&Path> {
        match &self.source {
            TileSource::Directory(dir) => Some(dir.as_path()),
            TileSource::Blank => None,
        }
    }
}

/// Aggregation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Grouping factor S
    pub block: usize,
    /// Input and output tile edge length in pixels
    pub tile_size: u32,
    /// Optional derived guidance channel
    pub guidance: Option<GuidanceSpec>,
    /// Worker threads (0 = one per CPU)
    pub workers: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            block: DEFAULT_BLOCK_FACTOR,
            tile_size: DEFAULT_TILE_SIZE,
            guidance: None,
            workers: AUTO_WORKERS,
        }
    }
}

impl AggregationConfig {
    /// Edge length of a composed block canvas, `S * tile_size`
    ///
    /// # Errors
    ///
    /// Returns an error if the extent overflows `u32`
    pub fn composed_size(&self) -> Result<u32> {
        scaled_extent("block", self.block, self.tile_size)
    }

    /// Check that every size is positive and the composed canvas fits
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` describing the first offending value
    pub fn validate(&self) -> Result<()> {
        require_positive("block", self.block)?;
        require_positive("tile_size", self.tile_size as usize)?;
        if let Some(guidance) = self.guidance {
            require_positive("guidance_size", guidance.size as usize)?;
        }
        self.composed_size().map(|_| ())
    }
}

/// One channel of a composed block at full `S * tile_size` resolution
#[derive(Debug, Clone)]
pub struct ComposedChannel {
    /// Channel description
    pub spec: ChannelSpec,
    /// Composed canvas
    pub canvas: Canvas,
}

/// All composed channels of one block
#[derive(Debug, Clone)]
pub struct BlockComposition {
    /// Channels in source order
    pub channels: Vec<ComposedChannel>,
    /// Member reads that failed and were blanked
    pub read_failures: usize,
}

impl BlockComposition {
    /// Composed canvas of channel `kind`
    pub fn canvas(&self, kind: ChannelKind) -> Option<&Canvas> {
        self.channels
            .iter()
            .find(|channel| channel.spec.kind == kind)
            .map(|channel| &channel.canvas)
    }
}

/// A downsampled canvas ready to be written
#[derive(Debug, Clone)]
pub struct RenderedChannel {
    /// Output subdirectory
    pub dir: &'static str,
    /// Downsampled canvas
    pub canvas: Canvas,
}

/// Totals reported by [`BlockAggregator::run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Blocks processed
    pub blocks: usize,
    /// Files written across all channels
    pub files_written: usize,
    /// Hole members, including cells past the grid edge
    pub holes: usize,
    /// Channel reads that failed and were blanked
    pub read_failures: usize,
}

impl AggregationSummary {
    fn combine(self, other: Self) -> Self {
        Self {
            blocks: self.blocks + other.blocks,
            files_written: self.files_written + other.files_written,
            holes: self.holes + other.holes,
            read_failures: self.read_failures + other.read_failures,
        }
    }
}

/// Composes, downsamples and writes every block of a grid
#[derive(Debug)]
pub struct BlockAggregator {
    grid: Grid,
    sources: Vec<ChannelSource>,
    config: AggregationConfig,
    writer: TileWriter,
}

impl BlockAggregator {
    /// Aggregator over `grid` for the given channels
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration is invalid or the
    /// guidance source channel is not among `sources`
    pub fn new(
        grid: Grid,
        sources: Vec<ChannelSource>,
        config: AggregationConfig,
        writer: TileWriter,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(guidance) = config.guidance {
            if !sources.iter().any(|s| s.spec.kind == guidance.source) {
                return Err(invalid_parameter(
                    "guidance",
                    &guidance.source.name(),
                    &"guidance source channel is not configured",
                ));
            }
        }

        Ok(Self {
            grid,
            sources,
            config,
            writer,
        })
    }

    /// Grid being aggregated
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Writer deciding output names
    pub const fn writer(&self) -> &TileWriter {
        &self.writer
    }

    /// Output subdirectories, primary channels first, guidance last
    pub fn output_dirs(&self) -> Vec<&'static str> {
        self.sources
            .iter()
            .filter_map(|source| source.spec.output_dir)
            .chain(self.config.guidance.map(|guidance| guidance.output_dir))
            .collect()
    }

    /// Compose every channel of `block` at full resolution
    ///
    /// Read failures are logged and counted, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error only if the block geometry overflows `u32`
    pub fn compose_block(&self, block: &Block) -> Result<BlockComposition> {
        let size = self.config.composed_size()?;
        let tile_size = self.config.tile_size;
        let mut read_failures = 0;
        let mut channels = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let spec = source.spec;
            let mut canvas = Canvas::filled(spec.format, size, size, spec.blank);

            if let TileSource::Directory(dir) = &source.source {
                for member in block.members() {
                    let Some(name) = member
                        .tile
                        .and_then(|index| self.grid.names().get(index))
                    else {
                        continue;
                    };

                    let path = dir.join(name);
                    match load_image(&path) {
                        Ok(tile) => {
                            let tile = if tile.width() == tile_size && tile.height() == tile_size {
                                tile
                            } else {
                                debug!(
                                    "Resizing {} ({}) from {}x{} to {tile_size}x{tile_size}",
                                    path.display(),
                                    spec.kind.name(),
                                    tile.width(),
                                    tile.height()
                                );
                                tile.resize_exact(
                                    tile_size,
                                    tile_size,
                                    spec.read_filter.filter_type(),
                                )
                            };
                            canvas.paste_image(
                                &tile,
                                scaled_extent("block", member.column, tile_size)?,
                                scaled_extent("block", member.row, tile_size)?,
                            );
                        }
                        Err(err) => {
                            let origin = block.origin();
                            warn!(
                                "Read error {name} ({}) in block ({},{}): {err}; inserting blank",
                                spec.kind.name(),
                                origin.x,
                                origin.y
                            );
                            read_failures += 1;
                        }
                    }
                }
            }

            channels.push(ComposedChannel { spec, canvas });
        }

        Ok(BlockComposition {
            channels,
            read_failures,
        })
    }

    /// Downsample a composition to the output sizes
    ///
    /// Primary channels with an output directory come first, in source
    /// order, followed by the guidance channel when configured.
    pub fn render(&self, composition: &BlockComposition) -> Vec<RenderedChannel> {
        let tile_size = self.config.tile_size;
        let mut rendered: Vec<RenderedChannel> = composition
            .channels
            .iter()
            .filter_map(|channel| {
                channel.spec.output_dir.map(|dir| RenderedChannel {
                    dir,
                    canvas: channel.canvas.resized(
                        tile_size,
                        tile_size,
                        channel.spec.downsample_filter,
                    ),
                })
            })
            .collect();

        if let Some(guidance) = self.config.guidance {
            if let Some(source) = composition.canvas(guidance.source) {
                rendered.push(RenderedChannel {
                    dir: guidance.output_dir,
                    canvas: source.resized(guidance.size, guidance.size, guidance.filter),
                });
            }
        }

        rendered
    }

    /// Compose, downsample and write one block
    ///
    /// # Errors
    ///
    /// Returns an error if an output file cannot be written
    pub fn process_block(&self, block: &Block) -> Result<AggregationSummary> {
        let composition = self.compose_block(block)?;
        let rendered = self.render(&composition);

        for channel in &rendered {
            self.writer.write(channel.dir, block, &channel.canvas)?;
        }

        Ok(AggregationSummary {
            blocks: 1,
            files_written: rendered.len(),
            holes: block.hole_count(),
            read_failures: composition.read_failures,
        })
    }

    /// Aggregate every block of the grid on the worker pool
    ///
    /// Output directories are created once up front. Blocks are written as
    /// they finish; a failed run leaves already written files in place.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An output directory cannot be created
    /// - The worker pool cannot be started
    /// - Any output file cannot be written
    pub fn run(&self, progress: &ProgressReporter) -> Result<AggregationSummary> {
        self.writer.prepare(self.output_dirs())?;

        let blocks: Vec<Block> = self.grid.blocks(self.config.block).collect();
        let pool = worker_pool(self.config.workers)?;
        let summaries = pool.install(|| {
            blocks
                .par_iter()
                .map(|block| {
                    let summary = self.process_block(block);
                    progress.advance();
                    summary
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let summary = summaries
            .into_iter()
            .fold(AggregationSummary::default(), AggregationSummary::combine);

        info!(
            "Wrote {} blocks ({} files, {} holes, {} read failures) to {}",
            summary.blocks,
            summary.files_written,
            summary.holes,
            summary.read_failures,
            self.writer.root().display()
        );

        Ok(summary)
    }
}
