//! Error types and path context for tile grid operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all tile grid operations
#[derive(Debug)]
pub enum TileError {
    /// A required source directory does not exist or is not a directory
    MissingDirectory {
        /// Directory that was expected
        path: PathBuf,
    },

    /// No usable tiles were found
    ///
    /// Raised for an empty listing and for an empty intersection across
    /// several channel directories.
    NoTiles {
        /// Directories whose listings were considered
        directories: Vec<PathBuf>,
    },

    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an output image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Inferred grid exceeds the supported dimension
    GridTooLarge {
        /// Requested grid width in cells
        width: usize,
        /// Requested grid height in cells
        height: usize,
        /// Largest accepted extent along either axis
        limit: usize,
    },

    /// The worker thread pool could not be created
    WorkerPool {
        /// Description reported by the pool builder
        reason: String,
    },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDirectory { path } => {
                write!(f, "Required directory '{}' does not exist", path.display())
            }
            Self::NoTiles { directories } => {
                let listed = directories
                    .iter()
                    .map(|dir| format!("'{}'", dir.display()))
                    .collect::<Vec<_>>()
                    .join(", ");
                if directories.len() > 1 {
                    write!(f, "No common tile filenames across {listed}")
                } else {
                    write!(f, "No tiles found in {listed}")
                }
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::GridTooLarge {
                width,
                height,
                limit,
            } => {
                write!(
                    f,
                    "Grid of {width}x{height} cells exceeds the limit of {limit} cells per axis"
                )
            }
            Self::WorkerPool { reason } => {
                write!(f, "Failed to start worker pool: {reason}")
            }
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tile grid results
pub type Result<T> = std::result::Result<T, TileError>;

/// Attaches a filesystem path and operation name to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into `TileError::FileSystem` carrying `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| TileError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<image::ImageError> for TileError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for TileError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileError {
    TileError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject zero for parameters that must be positive
///
/// # Errors
///
/// Returns `InvalidParameter` when `value` is 0
pub fn require_positive(parameter: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        Err(invalid_parameter(parameter, &value, &"must be at least 1"))
    } else {
        Ok(value)
    }
}
