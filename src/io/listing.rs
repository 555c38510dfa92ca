//! Tile directory listing and cross-channel filename intersection

use crate::io::configuration::TILE_EXTENSION;
use crate::io::error::{Result, TileError, WithPath};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Whether `name` carries the tile extension (case-insensitive)
pub fn is_tile_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TILE_EXTENSION))
}

/// Sorted tile filenames directly inside `dir`
///
/// Subdirectories and non-UTF-8 names are skipped.
///
/// # Errors
///
/// Returns an error if:
/// - `dir` does not exist or is not a directory
/// - The directory cannot be read
pub fn list_tiles(dir: &Path) -> Result<BTreeSet<String>> {
    if !dir.is_dir() {
        return Err(TileError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir).with_path(dir, "read directory")? {
        let entry = entry.with_path(dir, "read directory entry")?;
        if entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_tile_name(name) {
                names.insert(name.to_string());
            }
        }
    }

    Ok(names)
}

/// Tile filenames present in every directory, in lexicographic order
///
/// # Errors
///
/// Returns an error if:
/// - Any directory is missing or unreadable
/// - No directories are given, or the intersection is empty
pub fn common_tiles(dirs: &[PathBuf]) -> Result<Vec<String>> {
    let mut common: Option<BTreeSet<String>> = None;
    for dir in dirs {
        let names = list_tiles(dir)?;
        common = Some(match common {
            Some(previous) => previous.intersection(&names).cloned().collect(),
            None => names,
        });
    }

    let common: Vec<String> = common.unwrap_or_default().into_iter().collect();
    if common.is_empty() {
        return Err(TileError::NoTiles {
            directories: dirs.to_vec(),
        });
    }

    Ok(common)
}
