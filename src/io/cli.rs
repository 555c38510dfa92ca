//! Command-line interface for block aggregation, mosaic stitching and tiling

use crate::compose::aggregator::{
    AggregationConfig, AggregationSummary, BlockAggregator, ChannelSource,
};
use crate::compose::channel::{ChannelKind, GuidanceSpec};
use crate::compose::stitcher::{MosaicStitcher, StitchSummary};
use crate::compose::tiler::{TilingSummary, collect_sources, split_files};
use crate::io::configuration::{
    AUTO_WORKERS, DEFAULT_BLOCK_FACTOR, DEFAULT_GUIDANCE_SIZE, DEFAULT_TILE_SIZE,
};
use crate::io::error::Result;
use crate::io::listing::common_tiles;
use crate::io::logging::{init_logging, level_for};
use crate::io::progress::ProgressReporter;
use crate::io::writer::{NamingMode, PaddingWidths, TileWriter};
use crate::spatial::grid::{FallbackOrder, GridBuilder};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tilegrid")]
#[command(
    author,
    version,
    about = "Aggregate, stitch and split grids of image tiles"
)]
/// Command-line arguments for the tile grid tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Only log warnings and errors; hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug details
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, global = true, default_value_t = AUTO_WORKERS)]
    pub workers: usize,

    /// Also write the log to this file
    #[arg(long = "log_file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Available operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Group SxS tiles into coarser real/map/ins/guidance tiles
    Aggregate(AggregateArgs),
    /// Paste every tile into one full-resolution mosaic
    Stitch(StitchArgs),
    /// Split images into `<stem>_<x>_<y>.png` tiles
    Tile(TileArgs),
}

/// Arguments of the `aggregate` subcommand
#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Real imagery tiles (synthesized tiles are reused when omitted)
    #[arg(long = "real_dir", value_name = "DIR")]
    pub real_dir: Option<PathBuf>,

    /// Label map tiles
    #[arg(long = "map_dir", value_name = "DIR")]
    pub map_dir: PathBuf,

    /// Instance map tiles
    #[arg(long = "ins_dir", value_name = "DIR")]
    pub ins_dir: PathBuf,

    /// Synthesized imagery tiles, source of the guidance channel
    #[arg(long = "synth_dir", value_name = "DIR")]
    pub synth_dir: PathBuf,

    /// Output root receiving real/, map/, ins/ and guidance/
    #[arg(long = "out_root", value_name = "DIR")]
    pub out_root: PathBuf,

    /// Grouping factor S (SxS tiles per output tile)
    #[arg(long, default_value_t = DEFAULT_BLOCK_FACTOR,
          value_parser = positive_count)]
    pub block: usize,

    /// Tile edge length in pixels
    #[arg(long = "tile_size", default_value_t = DEFAULT_TILE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_size: u32,

    /// Guidance tile edge length in pixels
    #[arg(long = "guidance_size", default_value_t = DEFAULT_GUIDANCE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub guidance_size: u32,

    /// Skip the guidance channel
    #[arg(long = "no_guidance")]
    pub no_guidance: bool,

    /// Tiles per row when names carry no coordinates
    #[arg(long = "tiles_per_row",
          value_parser = positive_count)]
    pub tiles_per_row: Option<usize>,

    /// Fallback layout order when names carry no coordinates
    #[arg(long, value_enum, default_value_t = FallbackOrder::RowMajor)]
    pub order: FallbackOrder,

    /// Output naming scheme
    #[arg(long = "name_mode", value_enum, default_value_t = NamingMode::Coordinate)]
    pub name_mode: NamingMode,

    /// Zero padding for both coordinate parts (derived from inputs when omitted)
    #[arg(long = "coord_digits")]
    pub coord_digits: Option<usize>,

    /// Write blank real tiles instead of reading real imagery
    #[arg(long = "blank_real", conflicts_with = "real_dir")]
    pub blank_real: bool,
}

impl AggregateArgs {
    /// Channel sources in processing order
    ///
    /// Without `--real_dir` the synthesized tiles stand in as pseudo-real
    /// imagery; with `--blank_real` the real channel is never read.
    pub fn channel_sources(&self) -> Vec<ChannelSource> {
        let real = if self.blank_real {
            ChannelSource::blank(ChannelKind::Real)
        } else {
            let dir = self.real_dir.as_ref().unwrap_or(&self.synth_dir);
            ChannelSource::directory(ChannelKind::Real, dir)
        };

        vec![
            real,
            ChannelSource::directory(ChannelKind::Label, &self.map_dir),
            ChannelSource::directory(ChannelKind::Instance, &self.ins_dir),
            ChannelSource::directory(ChannelKind::Synthesized, &self.synth_dir),
        ]
    }

    /// Aggregation parameters for `workers` threads
    pub const fn config(&self, workers: usize) -> AggregationConfig {
        AggregationConfig {
            block: self.block,
            tile_size: self.tile_size,
            guidance: if self.no_guidance {
                None
            } else {
                Some(GuidanceSpec::from_synthesized(self.guidance_size))
            },
            workers,
        }
    }

    /// Grid builder honouring the fallback flags
    pub const fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new()
            .with_tiles_per_row(self.tiles_per_row)
            .with_order(self.order)
            .with_min_fallback_width(self.block)
    }
}

/// Arguments of the `stitch` subcommand
#[derive(Args, Debug)]
pub struct StitchArgs {
    /// Directory of tiles to stitch
    #[arg(long = "tiles_dir", value_name = "DIR")]
    pub tiles_dir: PathBuf,

    /// Output image path
    #[arg(long = "out_path", value_name = "PATH")]
    pub out_path: PathBuf,

    /// Tiles per row when names carry no coordinates
    #[arg(long = "tiles_per_row",
          value_parser = positive_count)]
    pub tiles_per_row: Option<usize>,

    /// Fallback layout order when names carry no coordinates
    #[arg(long, value_enum, default_value_t = FallbackOrder::RowMajor)]
    pub order: FallbackOrder,
}

impl StitchArgs {
    /// Grid builder honouring the fallback flags
    pub const fn grid_builder(&self) -> GridBuilder {
        GridBuilder::new()
            .with_tiles_per_row(self.tiles_per_row)
            .with_order(self.order)
    }
}

/// Arguments of the `tile` subcommand
#[derive(Args, Debug)]
pub struct TileArgs {
    /// Image file, or directory of images, to split
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory receiving the tiles
    #[arg(long = "out_dir", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Tile edge length in pixels
    #[arg(long = "tile_size", default_value_t = DEFAULT_TILE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_size: u32,
}

fn positive_count(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(count) => Ok(count),
        Err(err) => Err(err.to_string()),
    }
}

/// Outcome of one CLI invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSummary {
    /// Result of `aggregate`
    Aggregate(AggregationSummary),
    /// Result of `stitch`
    Stitch(StitchSummary),
    /// Result of `tile`
    Tile(TilingSummary),
}

/// Runs the selected subcommand
pub struct JobRunner {
    cli: Cli,
}

impl JobRunner {
    /// Create a runner for parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parsed arguments
    pub const fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Install logging, then run the subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if logging cannot be set up or the job fails
    pub fn run(&self) -> Result<()> {
        init_logging(
            level_for(self.cli.quiet, self.cli.verbose),
            self.cli.log_file.as_deref(),
        )?;
        self.execute().map(|_| ())
    }

    /// Run the subcommand without touching global logger state
    ///
    /// # Errors
    ///
    /// Returns configuration errors (missing directories, empty tile sets,
    /// invalid parameters) and output write failures
    pub fn execute(&self) -> Result<JobSummary> {
        match &self.cli.command {
            Command::Aggregate(args) => self.aggregate(args).map(JobSummary::Aggregate),
            Command::Stitch(args) => self.stitch(args).map(JobSummary::Stitch),
            Command::Tile(args) => self.tile(args).map(JobSummary::Tile),
        }
    }

    fn aggregate(&self, args: &AggregateArgs) -> Result<AggregationSummary> {
        let sources = args.channel_sources();
        let mut dirs: Vec<PathBuf> = Vec::new();
        for dir in sources.iter().filter_map(ChannelSource::directory_path) {
            if !dirs.iter().any(|known| known == dir) {
                dirs.push(dir.to_path_buf());
            }
        }

        let names = common_tiles(&dirs)?;
        info!("Found {} common tiles", names.len());

        let grid = args.grid_builder().build(names)?;
        let padding = PaddingWidths::derive(&grid, args.block, args.coord_digits);
        if args.name_mode == NamingMode::Coordinate {
            info!(
                "Coordinate naming uses padding X={}, Y={}",
                padding.x, padding.y
            );
        }

        let writer = TileWriter::new(&args.out_root, args.name_mode, padding);
        let block_count = grid.block_count(args.block);
        let aggregator =
            BlockAggregator::new(grid, sources, args.config(self.cli.workers), writer)?;

        let progress = ProgressReporter::for_mode("blocks", block_count, self.cli.quiet);
        let summary = aggregator.run(&progress)?;
        progress.finish("done");
        Ok(summary)
    }

    fn stitch(&self, args: &StitchArgs) -> Result<StitchSummary> {
        let stitcher = MosaicStitcher::from_directory(&args.tiles_dir, &args.grid_builder())?
            .with_workers(self.cli.workers);
        let progress =
            ProgressReporter::for_mode("rows", stitcher.grid().height(), self.cli.quiet);
        let summary = stitcher.stitch_to(&args.out_path, &progress)?;
        progress.finish("done");
        Ok(summary)
    }

    fn tile(&self, args: &TileArgs) -> Result<TilingSummary> {
        let sources = collect_sources(&args.input)?;
        let progress = ProgressReporter::for_mode("images", sources.len(), self.cli.quiet);
        let summary = split_files(&sources, args.tile_size, &args.out_dir, &progress)?;
        progress.finish("done");
        Ok(summary)
    }
}
