//! Runtime defaults and fixed naming conventions

// Block aggregation defaults
/// Default grouping factor S (SxS input tiles per output tile)
pub const DEFAULT_BLOCK_FACTOR: usize = 3;
/// Default output tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 256;
/// Default guidance tile edge length in pixels
pub const DEFAULT_GUIDANCE_SIZE: u32 = 64;

// Safety limit to prevent excessive memory allocation from stray coordinates
/// Maximum grid extent along either axis
pub const MAX_GRID_DIMENSION: usize = 65_536;

// Naming
/// Extension (case-insensitive) of tiles picked up from source directories
pub const TILE_EXTENSION: &str = "png";
/// Extension of every file written by aggregation and tiling
pub const OUTPUT_EXTENSION: &str = "png";
/// Zero padding used by sequential output names
pub const SEQUENTIAL_DIGITS: usize = 5;
/// Delimiter between coordinate segments in tile names
pub const COORDINATE_DELIMITER: char = '_';

// Output layout under the aggregation root
/// Subdirectory for downsampled real imagery
pub const REAL_OUTPUT_DIR: &str = "real";
/// Subdirectory for downsampled label maps
pub const LABEL_OUTPUT_DIR: &str = "map";
/// Subdirectory for downsampled instance maps
pub const INSTANCE_OUTPUT_DIR: &str = "ins";
/// Subdirectory for guidance tiles
pub const GUIDANCE_OUTPUT_DIR: &str = "guidance";

// Worker pool
/// Worker count meaning "one per available CPU"
pub const AUTO_WORKERS: usize = 0;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
