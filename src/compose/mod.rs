//! Canvas composition for aggregated blocks, mosaics and tiles

/// SxS block aggregation into per-channel output tiles
pub mod aggregator;
/// Owned 8-bit pixel buffers
pub mod canvas;
/// Static channel table
pub mod channel;
/// Full-resolution mosaic stitching
pub mod stitcher;
/// Splitting large images into coordinate-named tiles
pub mod tiler;
/// Bounded rayon worker pool
pub mod workers;
