//! Splitting large images into coordinate-named tiles
//!
//! Produces `<stem>_<x>_<y>.png` tiles that the grid builder reads back by
//! coordinate. Edge tiles are cropped to the image bounds rather than padded.

use crate::io::configuration::OUTPUT_EXTENSION;
use crate::io::error::{Result, TileError, WithPath, require_positive};
use crate::io::image::load_image;
use crate::io::listing::list_tiles;
use crate::io::progress::ProgressReporter;
use crate::math::integer::ceil_div;
use image::DynamicImage;
use log::info;
use std::path::{Path, PathBuf};

/// Totals reported by the tiling functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TilingSummary {
    /// Source images split
    pub images: usize,
    /// Tiles written
    pub tiles: usize,
}

/// Number of tile columns and rows needed to cover `width x height`
pub fn tile_counts(width: u32, height: u32, tile_size: u32) -> (usize, usize) {
    let size = tile_size as usize;
    (ceil_div(width as usize, size), ceil_div(height as usize, size))
}

/// Split an in-memory image into tiles named `<stem>_<x>_<y>.png` in `out_dir`
///
/// The tiles keep the source pixel format. `out_dir` must exist.
///
/// # Errors
///
/// Returns an error if `tile_size` is 0 or a tile cannot be saved
pub fn split_image(
    image: &DynamicImage,
    stem: &str,
    tile_size: u32,
    out_dir: &Path,
) -> Result<usize> {
    require_positive("tile_size", tile_size as usize)?;
    let (columns, rows) = tile_counts(image.width(), image.height(), tile_size);

    let mut written = 0;
    for y in 0..rows {
        for x in 0..columns {
            let left = x as u32 * tile_size;
            let top = y as u32 * tile_size;
            let width = tile_size.min(image.width() - left);
            let height = tile_size.min(image.height() - top);

            let tile = image.crop_imm(left, top, width, height);
            let path = out_dir.join(format!("{stem}_{x}_{y}.{OUTPUT_EXTENSION}"));
            tile.save(&path).map_err(|source| TileError::ImageExport {
                path: path.clone(),
                source,
            })?;
            written += 1;
        }
    }

    Ok(written)
}

/// Images to tile: `input` itself, or every tile-extension image inside it
///
/// # Errors
///
/// Returns an error if `input` is neither a file nor a readable directory
pub fn collect_sources(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        Ok(list_tiles(input)?
            .into_iter()
            .map(|name| input.join(name))
            .collect())
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(TileError::MissingDirectory {
            path: input.to_path_buf(),
        })
    }
}

/// Split every image in `sources` into `out_dir`, creating it if needed
///
/// # Errors
///
/// Returns an error if:
/// - The output directory cannot be created
/// - An input image cannot be decoded
/// - A tile cannot be saved
pub fn split_files(
    sources: &[PathBuf],
    tile_size: u32,
    out_dir: &Path,
    progress: &ProgressReporter,
) -> Result<TilingSummary> {
    std::fs::create_dir_all(out_dir).with_path(out_dir, "create directory")?;

    let mut summary = TilingSummary::default();
    for source in sources {
        let image = load_image(source)?;
        let stem = source
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let tiles = split_image(&image, &stem, tile_size, out_dir)?;
        info!(
            "Tiled {}: {tiles} tiles of {tile_size}px into {}",
            source.display(),
            out_dir.display()
        );
        summary.images += 1;
        summary.tiles += tiles;
        progress.advance();
    }

    Ok(summary)
}
