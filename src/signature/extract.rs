//! Region summaries used as matching keys

use crate::io::configuration::HASH_SIDE;
use crate::io::error::{Result, invalid_parameter};
use crate::signature::hash::PerceptualHash;
use crate::signature::mode::MatchMode;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge (inclusive)
    pub x: u32,
    /// Top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its origin and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering an entire image
    pub fn whole(image: &RgbImage) -> Self {
        Self::new(0, 0, image.width(), image.height())
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// True when the region contains no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check the region lies inside a `width` x `height` image
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

/// Matching key computed from a region under one mode
#[derive(Debug, Clone, PartialEq)]
pub enum Signature {
    /// Per-channel means in `[0, 255]`
    Rgb([f64; 3]),
    /// Mean luminance in `[0, 255]`
    Gray(f64),
    /// Average hash of the region
    Hash(PerceptualHash),
}

/// Exact, hashable form of a signature used to key candidate pools
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SignatureKey {
    /// Bit patterns of the three channel means
    Rgb([u64; 3]),
    /// Bit pattern of the luminance mean
    Gray(u64),
    /// The hash itself
    Hash(PerceptualHash),
}

impl Signature {
    /// Mode this signature was computed under
    pub const fn mode(&self) -> MatchMode {
        match self {
            Self::Rgb(_) => MatchMode::Rgb,
            Self::Gray(_) => MatchMode::Gray,
            Self::Hash(_) => MatchMode::Hash,
        }
    }

    /// RGB signature of a single solid color
    pub fn from_color(color: [u8; 3]) -> Self {
        Self::Rgb(color.map(f64::from))
    }

    /// Exact key for deduplication; `-0.0` and `0.0` are distinct keys
    pub fn key(&self) -> SignatureKey {
        match self {
            Self::Rgb(channels) => SignatureKey::Rgb(channels.map(f64::to_bits)),
            Self::Gray(mean) => SignatureKey::Gray(mean.to_bits()),
            Self::Hash(hash) => SignatureKey::Hash(hash.clone()),
        }
    }
}

/// Summarize a region of `image` under `mode`
///
/// # Errors
///
/// Returns `InvalidParameter` if the region is empty or extends past the
/// image bounds
pub fn extract(image: &RgbImage, region: Region, mode: MatchMode) -> Result<Signature> {
    if region.is_empty() {
        return Err(invalid_parameter(
            "region",
            &format!("{}x{}", region.width, region.height),
            &"cannot summarize a region with no pixels",
        ));
    }
    if !region.fits_within(image.width(), image.height()) {
        return Err(invalid_parameter(
            "region",
            &format!(
                "({}, {}) {}x{}",
                region.x, region.y, region.width, region.height
            ),
            &format!("exceeds image bounds {}x{}", image.width(), image.height()),
        ));
    }

    let signature = match mode {
        MatchMode::Rgb => Signature::Rgb(mean_rgb(image, region)),
        MatchMode::Gray => Signature::Gray(mean_gray(image, region)),
        MatchMode::Hash => Signature::Hash(average_hash(image, region)?),
    };
    Ok(signature)
}

fn region_pixels(image: &RgbImage, region: Region) -> impl Iterator<Item = &Rgb<u8>> {
    (region.y..region.bottom()).flat_map(move |y| {
        (region.x..region.right()).filter_map(move |x| image.get_pixel_checked(x, y))
    })
}

fn mean_rgb(image: &RgbImage, region: Region) -> [f64; 3] {
    let mut sums = [0u64; 3];
    for Rgb(channels) in region_pixels(image, region) {
        for (sum, &value) in sums.iter_mut().zip(channels) {
            *sum += u64::from(value);
        }
    }

    let count = region.pixel_count() as f64;
    sums.map(|sum| sum as f64 / count)
}

/// ITU-R 601 luma of an 8-bit pixel in 16-bit fixed point
///
/// Weights are 0.299, 0.587 and 0.114 scaled by 65536, rounded to nearest.
pub const fn luma601(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((19_595 * r as u32 + 38_470 * g as u32 + 7_471 * b as u32 + 0x8000) >> 16) as u8
}

fn mean_gray(image: &RgbImage, region: Region) -> f64 {
    let total: u64 = region_pixels(image, region)
        .map(|&pixel| u64::from(luma601(pixel)))
        .sum();

    total as f64 / region.pixel_count() as f64
}

// Resample before converting to luminance so the filter sees full color
fn average_hash(image: &RgbImage, region: Region) -> Result<PerceptualHash> {
    let cropped =
        imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image();
    let small = imageops::resize(&cropped, HASH_SIDE, HASH_SIDE, FilterType::Lanczos3);

    let samples: Vec<u8> = small.pixels().map(|&pixel| luma601(pixel)).collect();

    PerceptualHash::from_intensities(&samples).ok_or_else(|| {
        invalid_parameter(
            "hash",
            &samples.len(),
            &"downsampled grid has the wrong number of samples",
        )
    })
}
