//! Output format parsing and the WebP compression policy.

use crate::compose::asset::SourceType;
use crate::error::ImprintError;
use std::fmt;
use std::str::FromStr;

/// Encoders available for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl OutputFormat {
    /// Parse a profile format string. Matching is exact and case-sensitive.
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "gif" => Some(OutputFormat::Gif),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ImprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ImprintError::unsupported_format(s))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality used for JPEG output.
pub const JPEG_QUALITY: u8 = 85;

/// Quality used for lossy WebP output.
pub const WEBP_LOSSY_QUALITY: f32 = 80.0;

/// How a WebP output is compressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WebpCompression {
    Lossy { quality: f32 },
    Lossless,
}

impl WebpCompression {
    /// Photographic sources (and sources of unknown type) are re-encoded
    /// lossily; sources that were already lossless stay lossless.
    pub fn for_source(source_type: SourceType) -> Self {
        match source_type {
            SourceType::Jpeg | SourceType::Unknown => WebpCompression::Lossy {
                quality: WEBP_LOSSY_QUALITY,
            },
            SourceType::Png | SourceType::Gif | SourceType::WebP => WebpCompression::Lossless,
        }
    }
}
