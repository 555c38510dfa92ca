//! Owned pixel buffers for composing blocks and mosaics

use crate::compose::channel::{PixelFormat, Resample};
use crate::io::error::{Result, TileError, WithPath};
use image::imageops;
use image::{
    DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, Luma, LumaA, Pixel, Primitive, Rgb,
    RgbImage, Rgba, RgbaImage,
};
use std::path::Path;

/// 16-bit grey buffer
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;
/// 16-bit grey plus alpha buffer
pub type GrayAlpha16Image = ImageBuffer<LumaA<u16>, Vec<u16>>;
/// 16-bit RGB buffer
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;
/// 16-bit RGBA buffer
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// An image buffer in one of the supported pixel formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canvas {
    /// Single-sample grey buffer
    Luma(GrayImage),
    /// Grey plus alpha buffer
    LumaAlpha(GrayAlphaImage),
    /// RGB buffer
    Rgb(RgbImage),
    /// RGBA buffer
    Rgba(RgbaImage),
    /// 16-bit grey buffer
    Luma16(Gray16Image),
    /// 16-bit grey plus alpha buffer
    LumaAlpha16(GrayAlpha16Image),
    /// 16-bit RGB buffer
    Rgb16(Rgb16Image),
    /// 16-bit RGBA buffer
    Rgba16(Rgba16Image),
}

// ITU-R 601-2 luma in 16.16 fixed point, the weights PIL uses for "L"
fn rec601<S>(r: S, g: S, b: S) -> S
where
    S: Primitive + Into<u32> + TryFrom<u32>,
{
    let (r, g, b): (u32, u32, u32) = (r.into(), g.into(), b.into());
    let luma = (r * 19_595 + g * 38_470 + b * 7_471 + 0x8000) >> 16;
    S::try_from(luma).unwrap_or(S::DEFAULT_MAX_VALUE)
}

fn grey_alpha<S>(rgba: &ImageBuffer<Rgba<S>, Vec<S>>) -> ImageBuffer<LumaA<S>, Vec<S>>
where
    S: Primitive + Into<u32> + TryFrom<u32>,
    Rgba<S>: Pixel<Subpixel = S>,
{
    ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        LumaA([rec601(r, g, b), a])
    })
}

fn drop_alpha<S: Primitive>(grey: &ImageBuffer<LumaA<S>, Vec<S>>) -> ImageBuffer<Luma<S>, Vec<S>> {
    ImageBuffer::from_fn(grey.width(), grey.height(), |x, y| Luma([grey.get_pixel(x, y).0[0]]))
}

impl Canvas {
    /// Zero-filled canvas
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        Self::filled(format, width, height, 0)
    }

    /// Canvas with every sample set to `value`
    ///
    /// 16-bit formats store the value scaled to the full 16-bit range.
    pub fn filled(format: PixelFormat, width: u32, height: u32, value: u8) -> Self {
        let wide = u16::from(value) * 257;
        match format {
            PixelFormat::Luma => Self::Luma(ImageBuffer::from_pixel(width, height, Luma([value]))),
            PixelFormat::LumaAlpha => {
                Self::LumaAlpha(ImageBuffer::from_pixel(width, height, LumaA([value; 2])))
            }
            PixelFormat::Rgb => Self::Rgb(ImageBuffer::from_pixel(width, height, Rgb([value; 3]))),
            PixelFormat::Rgba => {
                Self::Rgba(ImageBuffer::from_pixel(width, height, Rgba([value; 4])))
            }
            PixelFormat::Luma16 => {
                Self::Luma16(ImageBuffer::from_pixel(width, height, Luma([wide])))
            }
            PixelFormat::LumaAlpha16 => {
                Self::LumaAlpha16(ImageBuffer::from_pixel(width, height, LumaA([wide; 2])))
            }
            PixelFormat::Rgb16 => {
                Self::Rgb16(ImageBuffer::from_pixel(width, height, Rgb([wide; 3])))
            }
            PixelFormat::Rgba16 => {
                Self::Rgba16(ImageBuffer::from_pixel(width, height, Rgba([wide; 4])))
            }
        }
    }

    /// Convert a decoded image into a canvas of the given format
    ///
    /// Colour sources become grey with Rec. 601 weights.
    pub fn from_image(image: &DynamicImage, format: PixelFormat) -> Self {
        let colour = image.color().has_color();
        match format {
            PixelFormat::Luma if colour => Self::Luma(drop_alpha(&grey_alpha(&image.to_rgba8()))),
            PixelFormat::Luma => Self::Luma(image.to_luma8()),
            PixelFormat::LumaAlpha if colour => Self::LumaAlpha(grey_alpha(&image.to_rgba8())),
            PixelFormat::LumaAlpha => Self::LumaAlpha(image.to_luma_alpha8()),
            PixelFormat::Rgb => Self::Rgb(image.to_rgb8()),
            PixelFormat::Rgba => Self::Rgba(image.to_rgba8()),
            PixelFormat::Luma16 if colour => {
                Self::Luma16(drop_alpha(&grey_alpha(&image.to_rgba16())))
            }
            PixelFormat::Luma16 => Self::Luma16(image.to_luma16()),
            PixelFormat::LumaAlpha16 if colour => {
                Self::LumaAlpha16(grey_alpha(&image.to_rgba16()))
            }
            PixelFormat::LumaAlpha16 => Self::LumaAlpha16(image.to_luma_alpha16()),
            PixelFormat::Rgb16 => Self::Rgb16(image.to_rgb16()),
            PixelFormat::Rgba16 => Self::Rgba16(image.to_rgba16()),
        }
    }

    /// Pixel format of the buffer
    pub const fn format(&self) -> PixelFormat {
        match self {
            Self::Luma(_) => PixelFormat::Luma,
            Self::LumaAlpha(_) => PixelFormat::LumaAlpha,
            Self::Rgb(_) => PixelFormat::Rgb,
            Self::Rgba(_) => PixelFormat::Rgba,
            Self::Luma16(_) => PixelFormat::Luma16,
            Self::LumaAlpha16(_) => PixelFormat::LumaAlpha16,
            Self::Rgb16(_) => PixelFormat::Rgb16,
            Self::Rgba16(_) => PixelFormat::Rgba16,
        }
    }

    /// Width and height in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Luma(buffer) => buffer.dimensions(),
            Self::LumaAlpha(buffer) => buffer.dimensions(),
            Self::Rgb(buffer) => buffer.dimensions(),
            Self::Rgba(buffer) => buffer.dimensions(),
            Self::Luma16(buffer) => buffer.dimensions(),
            Self::LumaAlpha16(buffer) => buffer.dimensions(),
            Self::Rgb16(buffer) => buffer.dimensions(),
            Self::Rgba16(buffer) => buffer.dimensions(),
        }
    }

    /// Samples of the pixel at `(x, y)` on an 8-bit canvas
    ///
    /// `None` outside the canvas or for 16-bit formats.
    pub fn samples_at(&self, x: u32, y: u32) -> Option<&[u8]> {
        match self {
            Self::Luma(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::LumaAlpha(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::Rgb(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::Rgba(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            _ => None,
        }
    }

    /// Samples of the pixel at `(x, y)` on a 16-bit canvas
    ///
    /// `None` outside the canvas or for 8-bit formats.
    pub fn samples16_at(&self, x: u32, y: u32) -> Option<&[u16]> {
        match self {
            Self::Luma16(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::LumaAlpha16(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::Rgb16(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            Self::Rgba16(buffer) => buffer.get_pixel_checked(x, y).map(Pixel::channels),
            _ => None,
        }
    }

    /// Raw samples of an 8-bit canvas in row-major order
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Self::Luma(buffer) => Some(buffer.as_raw()),
            Self::LumaAlpha(buffer) => Some(buffer.as_raw()),
            Self::Rgb(buffer) => Some(buffer.as_raw()),
            Self::Rgba(buffer) => Some(buffer.as_raw()),
            _ => None,
        }
    }

    /// Raw samples of a 16-bit canvas in row-major order
    pub fn as_raw16(&self) -> Option<&[u16]> {
        match self {
            Self::Luma16(buffer) => Some(buffer.as_raw()),
            Self::LumaAlpha16(buffer) => Some(buffer.as_raw()),
            Self::Rgb16(buffer) => Some(buffer.as_raw()),
            Self::Rgba16(buffer) => Some(buffer.as_raw()),
            _ => None,
        }
    }

    /// Copy `tile` into the canvas with its top-left corner at `(x, y)`
    ///
    /// The tile is converted to the canvas format first. Pixels falling
    /// outside the canvas are clipped; nothing is blended.
    pub fn paste_image(&mut self, tile: &DynamicImage, x: u32, y: u32) {
        let converted = Self::from_image(tile, self.format());
        self.paste(&converted, x, y);
    }

    /// Copy another canvas into this one with its top-left corner at `(x, y)`
    ///
    /// A canvas of a different format is converted before copying.
    pub fn paste(&mut self, other: &Self, x: u32, y: u32) {
        if self.format() != other.format() {
            let converted = Self::from_image(&other.to_dynamic(), self.format());
            self.paste(&converted, x, y);
            return;
        }

        let (x, y) = (i64::from(x), i64::from(y));
        match (self, other) {
            (Self::Luma(bottom), Self::Luma(top)) => imageops::replace(bottom, top, x, y),
            (Self::LumaAlpha(bottom), Self::LumaAlpha(top)) => {
                imageops::replace(bottom, top, x, y);
            }
            (Self::Rgb(bottom), Self::Rgb(top)) => imageops::replace(bottom, top, x, y),
            (Self::Rgba(bottom), Self::Rgba(top)) => imageops::replace(bottom, top, x, y),
            (Self::Luma16(bottom), Self::Luma16(top)) => imageops::replace(bottom, top, x, y),
            (Self::LumaAlpha16(bottom), Self::LumaAlpha16(top)) => {
                imageops::replace(bottom, top, x, y);
            }
            (Self::Rgb16(bottom), Self::Rgb16(top)) => imageops::replace(bottom, top, x, y),
            (Self::Rgba16(bottom), Self::Rgba16(top)) => imageops::replace(bottom, top, x, y),
            _ => {}
        }
    }

    /// Resampled copy of the canvas at `width x height`
    #[must_use]
    pub fn resized(&self, width: u32, height: u32, filter: Resample) -> Self {
        let filter = filter.filter_type();
        match self {
            Self::Luma(buffer) => Self::Luma(imageops::resize(buffer, width, height, filter)),
            Self::LumaAlpha(buffer) => {
                Self::LumaAlpha(imageops::resize(buffer, width, height, filter))
            }
            Self::Rgb(buffer) => Self::Rgb(imageops::resize(buffer, width, height, filter)),
            Self::Rgba(buffer) => Self::Rgba(imageops::resize(buffer, width, height, filter)),
            Self::Luma16(buffer) => Self::Luma16(imageops::resize(buffer, width, height, filter)),
            Self::LumaAlpha16(buffer) => {
                Self::LumaAlpha16(imageops::resize(buffer, width, height, filter))
            }
            Self::Rgb16(buffer) => Self::Rgb16(imageops::resize(buffer, width, height, filter)),
            Self::Rgba16(buffer) => Self::Rgba16(imageops::resize(buffer, width, height, filter)),
        }
    }

    /// Copy of the buffer as a `DynamicImage`
    pub fn to_dynamic(&self) -> DynamicImage {
        match self {
            Self::Luma(buffer) => DynamicImage::ImageLuma8(buffer.clone()),
            Self::LumaAlpha(buffer) => DynamicImage::ImageLumaA8(buffer.clone()),
            Self::Rgb(buffer) => DynamicImage::ImageRgb8(buffer.clone()),
            Self::Rgba(buffer) => DynamicImage::ImageRgba8(buffer.clone()),
            Self::Luma16(buffer) => DynamicImage::ImageLuma16(buffer.clone()),
            Self::LumaAlpha16(buffer) => DynamicImage::ImageLumaA16(buffer.clone()),
            Self::Rgb16(buffer) => DynamicImage::ImageRgb16(buffer.clone()),
            Self::Rgba16(buffer) => DynamicImage::ImageRgba16(buffer.clone()),
        }
    }

    /// Encode the canvas to `path`, format chosen by extension
    ///
    /// Parent directories must already exist.
    ///
    /// # Errors
    ///
    /// Returns `ImageExport` if encoding or writing fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let saved = match self {
            Self::Luma(buffer) => buffer.save(path),
            Self::LumaAlpha(buffer) => buffer.save(path),
            Self::Rgb(buffer) => buffer.save(path),
            Self::Rgba(buffer) => buffer.save(path),
            Self::Luma16(buffer) => buffer.save(path),
            Self::LumaAlpha16(buffer) => buffer.save(path),
            Self::Rgb16(buffer) => buffer.save(path),
            Self::Rgba16(buffer) => buffer.save(path),
        };
        saved.map_err(|source| TileError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Encode the canvas to `path`, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// image cannot be saved
    pub fn save_creating_parent(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
        }
        self.save(path)
    }
}
