//! Image encoder abstraction
//!
//! One encoder per output format behind a common trait, so the exporter can
//! dispatch on a parsed [`OutputFormat`] without knowing codec details.

use super::format::{OutputFormat, WebpCompression, JPEG_QUALITY};
use crate::compose::asset::SourceType;
use crate::error::{ImprintError, Result};

/// Result of encoding an image
#[derive(Debug)]
pub struct EncodedImage {
    /// The encoded image data
    pub data: Vec<u8>,
    /// The output format
    pub format: OutputFormat,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self { data, format }
    }
}

/// Trait for image encoders
///
/// Implementations take straight-alpha RGBA pixels (4 bytes per pixel).
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode raw RGBA image data to the target format
    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage>;
}

/// JPEG encoder using the image crate
///
/// JPEG has no alpha channel; translucent pixels are flattened onto black.
pub struct JpegEncoder {
    pub quality: u8,
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
        }
    }
}

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
        use image::ImageEncoder as _;

        let rgb_data = flatten_onto_black(data);

        let mut output = Vec::new();
        ImageJpegEncoder::new_with_quality(&mut output, self.quality)
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8)
            .map_err(|e| ImprintError::encode_failed("jpeg", e.to_string()))?;

        Ok(EncodedImage::new(output, OutputFormat::Jpeg))
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;
        use image::ImageEncoder as _;

        let mut output = Vec::new();
        ImagePngEncoder::new(&mut output)
            .write_image(data, width, height, image::ColorType::Rgba8)
            .map_err(|e| ImprintError::encode_failed("png", e.to_string()))?;

        Ok(EncodedImage::new(output, OutputFormat::Png))
    }
}

/// GIF encoder using the image crate with its default palette quantizer
pub struct GifEncoder;

impl ImageEncoder for GifEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Gif
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage> {
        use image::codecs::gif::GifEncoder as ImageGifEncoder;

        let mut output = Vec::new();
        {
            // The trailer is written when the encoder is dropped
            let mut encoder = ImageGifEncoder::new(&mut output);
            encoder
                .encode(data, width, height, image::ColorType::Rgba8)
                .map_err(|e| ImprintError::encode_failed("gif", e.to_string()))?;
        }

        Ok(EncodedImage::new(output, OutputFormat::Gif))
    }
}

/// WebP encoder using libwebp through the `webp` crate
///
/// The `image` crate only supports lossless WebP encoding, so both modes go
/// through libwebp.
pub struct WebPEncoder {
    pub compression: WebpCompression,
}

impl WebPEncoder {
    pub fn new(compression: WebpCompression) -> Self {
        Self { compression }
    }
}

impl ImageEncoder for WebPEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::WebP
    }

    fn encode(&self, data: &[u8], width: u32, height: u32) -> Result<EncodedImage> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ImprintError::encode_failed(
                "webp",
                format!("expected {} bytes of RGBA data, got {}", expected, data.len()),
            ));
        }

        let encoder = webp::Encoder::from_rgba(data, width, height);
        let memory = match self.compression {
            WebpCompression::Lossy { quality } => encoder.encode_simple(false, quality),
            WebpCompression::Lossless => encoder.encode_simple(true, 75.0),
        }
        .map_err(|e| ImprintError::encode_failed("webp", format!("{:?}", e)))?;

        Ok(EncodedImage::new(memory.to_vec(), OutputFormat::WebP))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder for `format`.
    ///
    /// `source_type` only affects WebP, where it selects lossy or lossless
    /// compression.
    pub fn create(format: OutputFormat, source_type: SourceType) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder::default()),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::Gif => Box::new(GifEncoder),
            OutputFormat::WebP => Box::new(WebPEncoder::new(WebpCompression::for_source(
                source_type,
            ))),
        }
    }
}

/// Convert straight-alpha RGBA to RGB composited over black.
fn flatten_onto_black(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);

    for chunk in rgba.chunks_exact(4) {
        let alpha = chunk[3] as u32;
        for &channel in &chunk[..3] {
            rgb.push(((channel as u32 * alpha + 127) / 255) as u8);
        }
    }

    rgb
}
