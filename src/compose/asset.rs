//! Loading of input assets from the local filesystem.
//!
//! Files are read fully into memory and the handle is released before
//! decoding. The container format is detected from content, not from the
//! file extension, and recorded as the [`SourceType`] of the image.

use super::text::FontFace;
use crate::error::{ImprintError, Result};
use image::io::Reader as ImageReader;
use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Container format an image was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceType {
    Jpeg,
    Png,
    Gif,
    WebP,
    #[default]
    Unknown,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Jpeg => "jpeg",
            SourceType::Png => "png",
            SourceType::Gif => "gif",
            SourceType::WebP => "webp",
            SourceType::Unknown => "unknown",
        }
    }
}

impl From<ImageFormat> for SourceType {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Jpeg => SourceType::Jpeg,
            ImageFormat::Png => SourceType::Png,
            ImageFormat::Gif => SourceType::Gif,
            ImageFormat::WebP => SourceType::WebP,
            _ => SourceType::Unknown,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded image together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: RgbaImage,
    pub source_type: SourceType,
    pub path: PathBuf,
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let data = read_asset(path)?;
    let (image, source_type) = decode_image(path, &data)?;

    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        source_type = %source_type,
        "Decoded image asset"
    );

    Ok(LoadedImage {
        image,
        source_type,
        path: path.to_path_buf(),
    })
}

/// Read and parse a font file.
pub fn load_font(path: &Path) -> Result<FontFace> {
    let data = read_asset(path)?;
    let face = FontFace::from_bytes(data)?;
    tracing::debug!(path = %path.display(), "Loaded font face");
    Ok(face)
}

fn read_asset(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ImprintError::AssetOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode image bytes, sniffing the container format from content.
///
/// `path` only names the asset in errors.
pub fn decode_image(path: &Path, data: &[u8]) -> Result<(RgbaImage, SourceType)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImprintError::asset_decode(path, e.to_string()))?;

    let source_type = reader
        .format()
        .map(SourceType::from)
        .unwrap_or(SourceType::Unknown);

    let image = reader
        .decode()
        .map_err(|e| ImprintError::asset_decode(path, e.to_string()))?;
    Ok((image.to_rgba8(), source_type))
}
