//! Aspect-preserving resize and centered crop.
//!
//! Resizes are driven by one dimension. The other is derived as
//! `trunc(0.7 + other * target / driving)`, never less than 1.

use crate::error::{ImprintError, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Resampling filter chosen per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Final export sizes, watermark logo and OGP background.
    #[default]
    Lanczos3,
    /// Bicubic class, used for the OGP logo.
    CatmullRom,
    /// Bilinear class, used for decorative elements.
    Triangle,
}

impl ResizeFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Triangle => FilterType::Triangle,
        }
    }
}

/// Derive the free dimension when `driving` is scaled to `target`.
///
/// Computed as `trunc(0.7 + other * target / driving)`, never below 1.
pub fn derived_dimension(other: u32, driving: u32, target: u32) -> u32 {
    if driving == 0 {
        return 1;
    }
    let scaled = 0.7 + other as f64 * target as f64 / driving as f64;
    (scaled as u32).max(1)
}

/// Resize to an exact width, deriving the height.
pub fn resize_to_width(image: &RgbaImage, width: u32, filter: ResizeFilter) -> RgbaImage {
    let width = width.max(1);
    let height = derived_dimension(image.height(), image.width(), width);
    resize_exact(image, width, height, filter)
}

/// Resize to an exact height, deriving the width.
pub fn resize_to_height(image: &RgbaImage, height: u32, filter: ResizeFilter) -> RgbaImage {
    let height = height.max(1);
    let width = derived_dimension(image.width(), image.height(), height);
    resize_exact(image, width, height, filter)
}

/// Resize so that the longer side equals `target`.
///
/// Square and landscape images are driven by width, portrait images by
/// height.
pub fn fit_by_orientation(image: &RgbaImage, target: u32, filter: ResizeFilter) -> RgbaImage {
    if image.width() >= image.height() {
        resize_to_width(image, target, filter)
    } else {
        resize_to_height(image, target, filter)
    }
}

/// Cut a `target_width x target_height` window out of the middle of `image`.
///
/// Fails if the source is smaller than the target in either dimension.
pub fn center_crop(image: &RgbaImage, target_width: u32, target_height: u32) -> Result<RgbaImage> {
    let (source_width, source_height) = image.dimensions();
    if source_width < target_width || source_height < target_height {
        return Err(ImprintError::InsufficientSourceSize {
            source_width,
            source_height,
            target_width,
            target_height,
        });
    }

    if source_width == target_width && source_height == target_height {
        return Ok(image.clone());
    }

    let x = (source_width - target_width) / 2;
    let y = (source_height - target_height) / 2;
    Ok(imageops::crop_imm(image, x, y, target_width, target_height).to_image())
}

fn resize_exact(image: &RgbaImage, width: u32, height: u32, filter: ResizeFilter) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, filter.filter_type())
}
