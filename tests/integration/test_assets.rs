// Helpers for writing test images and configs into temp directories

use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const GREY: Rgba<u8> = Rgba([60, 60, 60, 255]);
pub const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Write a solid image in the given container format.
pub fn write_solid(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    color: Rgba<u8>,
    format: ImageFormat,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    let image = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color));
    match format {
        ImageFormat::Jpeg => image.to_rgb8().save_with_format(&path, format)?,
        _ => image.save_with_format(&path, format)?,
    }
    Ok(path)
}

pub fn write_text(dir: &Path, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

pub fn dimensions(path: &Path) -> anyhow::Result<(u32, u32)> {
    Ok(image::image_dimensions(path)?)
}
