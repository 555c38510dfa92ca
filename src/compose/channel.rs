//! Static description of every image channel handled by block aggregation
//!
//! Label and instance maps hold discrete class codes, so they are always
//! resampled with nearest-neighbour. Colour imagery uses Lanczos for both
//! read-size correction and downsampling.

use crate::io::configuration::{
    GUIDANCE_OUTPUT_DIR, INSTANCE_OUTPUT_DIR, LABEL_OUTPUT_DIR, REAL_OUTPUT_DIR,
};
use image::ColorType;
use image::imageops::FilterType;

/// In-memory pixel layout of a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Single grey value per pixel
    Luma,
    /// Grey value plus alpha
    LumaAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
    /// 16-bit grey
    Luma16,
    /// 16-bit grey plus alpha
    LumaAlpha16,
    /// 16-bit red, green, blue
    Rgb16,
    /// 16-bit red, green, blue, alpha
    Rgba16,
}

impl PixelFormat {
    /// Format that holds a decoded image's colour type without loss
    ///
    /// 8- and 16-bit types map to the same depth. Float RGB(A) keeps 16
    /// bits; unknown types fall back to 8-bit RGBA.
    pub const fn from_color_type(color: ColorType) -> Self {
        match color {
            ColorType::L8 => Self::Luma,
            ColorType::La8 => Self::LumaAlpha,
            ColorType::Rgb8 => Self::Rgb,
            ColorType::L16 => Self::Luma16,
            ColorType::La16 => Self::LumaAlpha16,
            ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb16,
            ColorType::Rgba16 | ColorType::Rgba32F => Self::Rgba16,
            _ => Self::Rgba,
        }
    }

    /// Samples per pixel
    pub const fn samples(self) -> usize {
        match self {
            Self::Luma | Self::Luma16 => 1,
            Self::LumaAlpha | Self::LumaAlpha16 => 2,
            Self::Rgb | Self::Rgb16 => 3,
            Self::Rgba | Self::Rgba16 => 4,
        }
    }

    /// Bits per sample
    pub const fn sample_bits(self) -> u32 {
        match self {
            Self::Luma | Self::LumaAlpha | Self::Rgb | Self::Rgba => 8,
            Self::Luma16 | Self::LumaAlpha16 | Self::Rgb16 | Self::Rgba16 => 16,
        }
    }
}

/// Resampling filter choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resample {
    /// Nearest neighbour; preserves exact sample values
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Lanczos with window 3
    Lanczos,
}

impl Resample {
    /// Matching `image` filter
    pub const fn filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Lanczos => FilterType::Lanczos3,
        }
    }
}

/// Named image roles composed per block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Real (or pseudo-real) colour imagery
    Real,
    /// Synthesized colour imagery; source of the guidance channel
    Synthesized,
    /// Semantic label map
    Label,
    /// Instance map
    Instance,
}

impl ChannelKind {
    /// Every channel in processing order
    pub const ALL: [Self; 4] = [Self::Real, Self::Label, Self::Instance, Self::Synthesized];

    /// Static description of this channel
    pub const fn spec(self) -> ChannelSpec {
        match self {
            Self::Real => ChannelSpec {
                kind: self,
                format: PixelFormat::Rgb,
                blank: 0,
                read_filter: Resample::Lanczos,
                downsample_filter: Resample::Lanczos,
                output_dir: Some(REAL_OUTPUT_DIR),
            },
            Self::Synthesized => ChannelSpec {
                kind: self,
                format: PixelFormat::Rgb,
                blank: 0,
                read_filter: Resample::Lanczos,
                downsample_filter: Resample::Lanczos,
                output_dir: None,
            },
            Self::Label => ChannelSpec {
                kind: self,
                format: PixelFormat::Luma,
                blank: 0,
                read_filter: Resample::Nearest,
                downsample_filter: Resample::Nearest,
                output_dir: Some(LABEL_OUTPUT_DIR),
            },
            Self::Instance => ChannelSpec {
                kind: self,
                format: PixelFormat::Luma,
                blank: 0,
                read_filter: Resample::Nearest,
                downsample_filter: Resample::Nearest,
                output_dir: Some(INSTANCE_OUTPUT_DIR),
            },
        }
    }

    /// Lower-case name used in log messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Real => "real",
            Self::Synthesized => "synth",
            Self::Label => "map",
            Self::Instance => "ins",
        }
    }
}

/// Pixel format, placeholder and filters of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSpec {
    /// Channel role
    pub kind: ChannelKind,
    /// Canvas pixel format; decoded tiles are converted to it
    pub format: PixelFormat,
    /// Sample value written to every sample of hole and unreadable members
    pub blank: u8,
    /// Filter for tiles whose decoded size differs from the tile size
    pub read_filter: Resample,
    /// Filter for reducing the composed block to the output tile size
    pub downsample_filter: Resample,
    /// Output subdirectory, `None` for channels only used as a source
    pub output_dir: Option<&'static str>,
}

/// Derived low-resolution channel produced from another channel's canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceSpec {
    /// Channel whose composed canvas is downsampled
    pub source: ChannelKind,
    /// Output edge length in pixels
    pub size: u32,
    /// Downsampling filter
    pub filter: Resample,
    /// Output subdirectory
    pub output_dir: &'static str,
}

impl GuidanceSpec {
    /// Guidance from the synthesized canvas using the high-quality filter
    pub const fn from_synthesized(size: u32) -> Self {
        Self {
            source: ChannelKind::Synthesized,
            size,
            filter: Resample::Lanczos,
            output_dir: GUIDANCE_OUTPUT_DIR,
        }
    }
}
