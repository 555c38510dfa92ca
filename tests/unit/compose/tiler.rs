//! Tests for splitting images into coordinate-named tiles

#[cfg(test)]
mod tests {
    use image::{DynamicImage, Rgb, RgbImage};
    use tilegrid::TileError;
    use tilegrid::compose::tiler::{collect_sources, split_files, split_image, tile_counts};
    use tilegrid::io::progress::ProgressReporter;

    // Tests tile counts round up for partial edges
    // Verified by using floor division
    #[test]
    fn test_tile_counts() {
        assert_eq!(tile_counts(512, 512, 256), (2, 2));
        assert_eq!(tile_counts(300, 256, 256), (2, 1));
        assert_eq!(tile_counts(10, 10, 256), (1, 1));
    }

    // Tests edge tiles are cropped and names carry coordinates
    // Verified by padding edge tiles to full size
    #[test]
    fn test_split_image_crops_edges() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 3, Rgb([1, 2, 3])));

        let written = split_image(&image, "scene", 2, dir.path()).expect("split");
        assert_eq!(written, 6);

        let corner = image::open(dir.path().join("scene_2_1.png")).expect("corner tile");
        assert_eq!((corner.width(), corner.height()), (1, 1));
        let inner = image::open(dir.path().join("scene_0_0.png")).expect("inner tile");
        assert_eq!((inner.width(), inner.height()), (2, 2));
    }

    // Tests zero tile size is rejected
    // Verified by removing the positivity check
    #[test]
    fn test_zero_tile_size() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert!(matches!(
            split_image(&image, "x", 0, dir.path()),
            Err(TileError::InvalidParameter { .. })
        ));
    }

    // Tests sources come from a file or every tile image in a directory
    // Verified by returning directories unexpanded
    #[test]
    fn test_collect_sources() {
        let dir = tempfile::tempdir().expect("temp dir");
        RgbImage::new(1, 1).save(dir.path().join("b.png")).expect("save");
        RgbImage::new(1, 1).save(dir.path().join("a.png")).expect("save");
        std::fs::write(dir.path().join("notes.txt"), "x").expect("write");

        let sources = collect_sources(dir.path()).expect("collect");
        assert_eq!(
            sources,
            vec![dir.path().join("a.png"), dir.path().join("b.png")]
        );

        let single = collect_sources(&dir.path().join("a.png")).expect("collect file");
        assert_eq!(single.len(), 1);

        assert!(collect_sources(&dir.path().join("missing")).is_err());
    }

    // Tests split_files creates the output directory and totals tiles
    // Verified by counting images instead of tiles
    #[test]
    fn test_split_files_summary() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = dir.path().join("big.png");
        RgbImage::from_pixel(4, 4, Rgb([9, 9, 9]))
            .save(&source)
            .expect("save");

        let out = dir.path().join("tiles");
        let progress = ProgressReporter::hidden();
        let summary = split_files(&[source], 2, &out, &progress).expect("split files");

        assert_eq!(summary.images, 1);
        assert_eq!(summary.tiles, 4);
        assert!(out.join("big_1_1.png").is_file());
        assert_eq!(progress.position(), 1);
    }
}
