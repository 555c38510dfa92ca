//! Tile decoding with path-aware errors

use crate::io::error::{Result, TileError};
use image::DynamicImage;
use std::path::Path;

/// Decode the image at `path`, format guessed from content and extension
///
/// # Errors
///
/// Returns `ImageLoad` if the file is missing, unreadable or not a
/// supported image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| TileError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}
