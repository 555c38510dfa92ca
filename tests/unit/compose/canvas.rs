//! Tests for canvas pasting, resizing and persistence

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
    use tilegrid::compose::canvas::Canvas;
    use tilegrid::compose::channel::{PixelFormat, Resample};

    // Tests filled canvases carry the fill value in every sample
    // Verified by ignoring the fill value
    #[test]
    fn test_filled_canvas() {
        let canvas = Canvas::filled(PixelFormat::Rgb, 4, 3, 7);
        assert_eq!(canvas.dimensions(), (4, 3));
        let raw = canvas.as_raw().expect("8-bit samples");
        assert_eq!(raw.len(), 4 * 3 * 3);
        assert!(raw.iter().all(|&v| v == 7));
        assert_eq!(canvas.as_raw16(), None);
    }

    // Tests pasting places the tile at the offset
    // Verified by swapping x and y offsets
    #[test]
    fn test_paste_image_offset() {
        let mut canvas = Canvas::new(PixelFormat::Luma, 4, 4);
        let tile = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([9])));
        canvas.paste_image(&tile, 2, 0);

        assert_eq!(canvas.samples_at(2, 0), Some(&[9][..]));
        assert_eq!(canvas.samples_at(3, 1), Some(&[9][..]));
        assert_eq!(canvas.samples_at(0, 2), Some(&[0][..]));
        assert_eq!(canvas.samples_at(4, 0), None);
    }

    // Tests pasting converts the tile into the canvas format
    // Verified by skipping conversion for colour tiles
    #[test]
    fn test_paste_converts_format() {
        let mut canvas = Canvas::new(PixelFormat::Rgb, 2, 2);
        let tile = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([200])));
        canvas.paste_image(&tile, 1, 1);

        assert_eq!(canvas.samples_at(1, 1), Some(&[200, 200, 200][..]));
        assert_eq!(canvas.format(), PixelFormat::Rgb);
    }

    // Tests pasting beyond the edge clips instead of panicking
    // Verified by using unchecked pixel writes
    #[test]
    fn test_paste_clips() {
        let mut canvas = Canvas::new(PixelFormat::Luma, 2, 2);
        let tile = DynamicImage::ImageLuma8(GrayImage::from_pixel(3, 3, Luma([5])));
        canvas.paste_image(&tile, 1, 1);

        assert_eq!(canvas.samples_at(1, 1), Some(&[5][..]));
        assert_eq!(canvas.samples_at(0, 0), Some(&[0][..]));
    }

    // Tests nearest downsampling keeps exact label values
    // Verified by using bilinear for the label resize
    #[test]
    fn test_nearest_resize_preserves_values() {
        let mut canvas = Canvas::new(PixelFormat::Luma, 4, 4);
        let tile = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 2, Luma([4])));
        canvas.paste_image(&tile, 0, 0);

        let small = canvas.resized(2, 2, Resample::Nearest);
        assert_eq!(small.dimensions(), (2, 2));
        let raw = small.as_raw().expect("8-bit samples");
        assert!(raw.iter().all(|&v| v == 0 || v == 4));
        assert_eq!(small.samples_at(0, 0), Some(&[4][..]));
        assert_eq!(small.samples_at(0, 1), Some(&[0][..]));
    }

    // Tests canvases of different formats paste after conversion
    // Verified by returning early on format mismatch
    #[test]
    fn test_paste_canvas_mismatched_format() {
        let mut canvas = Canvas::new(PixelFormat::Luma, 2, 1);
        let other = Canvas::Rgb(RgbImage::from_pixel(1, 1, Rgb([10, 10, 10])));
        canvas.paste(&other, 1, 0);

        assert_eq!(canvas.samples_at(1, 0), Some(&[10][..]));
    }

    // Tests saving creates missing parent directories
    // Verified by saving without creating the parent
    #[test]
    fn test_save_creating_parent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("deep").join("out.png");
        let canvas = Canvas::filled(PixelFormat::Rgb, 3, 2, 1);

        canvas.save_creating_parent(&path).expect("save should succeed");
        let reloaded = image::open(&path).expect("reload").to_rgb8();
        assert_eq!(reloaded.dimensions(), (3, 2));
        assert_eq!(reloaded.get_pixel(0, 0), &Rgb([1, 1, 1]));
    }

    // Tests saving into a missing directory is an export error
    // Verified by creating parents inside save
    #[test]
    fn test_save_missing_parent_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("out.png");
        let canvas = Canvas::new(PixelFormat::Luma, 1, 1);

        assert!(matches!(
            canvas.save(&path),
            Err(tilegrid::TileError::ImageExport { .. })
        ));
    }

    // Tests dynamic conversion round-trips the buffer
    // Verified by converting luma to RGB
    #[test]
    fn test_to_dynamic_keeps_format() {
        let canvas = Canvas::filled(PixelFormat::Luma, 2, 2, 3);
        let dynamic = canvas.to_dynamic();
        assert_eq!(dynamic.color(), image::ColorType::L8);
        assert_eq!(Canvas::from_image(&dynamic, PixelFormat::Luma), canvas);
    }

    // Tests 16-bit canvases keep full sample precision through paste and save
    // Verified by converting 16-bit tiles with to_luma8
    #[test]
    fn test_sixteen_bit_paste_and_save() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tile: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Luma([5001]));
        let mut canvas = Canvas::new(PixelFormat::Luma16, 4, 2);
        canvas.paste_image(&DynamicImage::ImageLuma16(tile), 2, 0);

        assert_eq!(canvas.samples16_at(3, 1), Some(&[5001][..]));
        assert_eq!(canvas.samples16_at(0, 0), Some(&[0][..]));
        assert_eq!(canvas.samples_at(3, 1), None);

        let path = dir.path().join("wide.png");
        canvas.save(&path).expect("save 16-bit");
        let reloaded = image::open(&path).expect("reload");
        assert_eq!(reloaded.color(), image::ColorType::L16);
        assert_eq!(reloaded.to_luma16().get_pixel(2, 0), &Luma([5001]));
    }

    // Tests 16-bit fills scale the 8-bit value to the full range
    // Verified by storing the 8-bit value unscaled
    #[test]
    fn test_sixteen_bit_fill_scales() {
        let canvas = Canvas::filled(PixelFormat::Rgb16, 1, 1, 255);
        assert_eq!(canvas.samples16_at(0, 0), Some(&[65535, 65535, 65535][..]));
        assert_eq!(canvas.format().sample_bits(), 16);
        assert_eq!(Canvas::new(PixelFormat::Luma16, 2, 2).as_raw16(), Some(&[0; 4][..]));
    }

    // Tests colour to grey conversion uses Rec. 601 weights
    // Verified by converting with Rec. 709 weights, which give 182 for pure green
    #[test]
    fn test_grey_conversion_uses_rec601() {
        let mut canvas = Canvas::new(PixelFormat::Luma, 3, 1);
        for (x, colour) in [(0, [255, 0, 0]), (1, [0, 255, 0]), (2, [0, 0, 255])] {
            let tile = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb(colour)));
            canvas.paste_image(&tile, x, 0);
        }

        assert_eq!(canvas.samples_at(0, 0), Some(&[76][..]));
        assert_eq!(canvas.samples_at(1, 0), Some(&[150][..]));
        assert_eq!(canvas.samples_at(2, 0), Some(&[29][..]));
    }
}
