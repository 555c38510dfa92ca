//! Input/output: command line, configuration, errors, files and reporting

/// Command-line parsing and job orchestration
pub mod cli;
/// Defaults, naming constants and limits
pub mod configuration;
/// Error types and conversions
pub mod error;
/// Image decoding
pub mod image;
/// Tile directory listing and intersection
pub mod listing;
/// Terminal and file logging setup
pub mod logging;
/// Progress bars
pub mod progress;
/// Output naming and tile writing
pub mod writer;
