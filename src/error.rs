// Error types module

use std::path::PathBuf;
use thiserror::Error;

/// A shortcut for results produced anywhere in the crate.
pub type Result<T> = std::result::Result<T, ImprintError>;

/// Centralized error type for composition and export.
///
/// Every variant is fatal for the run that produced it. The binary maps all of
/// them to a single diagnostic line and a non-zero exit code.
#[derive(Error, Debug)]
pub enum ImprintError {
    /// The configuration file could not be read or parsed.
    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    /// The export profile list could not be read or parsed.
    #[error("Failed to load export profiles from {path}: {message}")]
    ProfileLoad { path: PathBuf, message: String },

    /// A loaded configuration has values that cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An input asset (base image, logo, element, font) could not be opened.
    #[error("Failed to open asset {path}: {source}")]
    AssetOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input asset was read but is not a decodable image.
    #[error("Failed to decode asset {path}: {message}")]
    AssetDecode { path: PathBuf, message: String },

    /// Font bytes could not be parsed into a face.
    #[error("Failed to load font: {message}")]
    FontLoad { message: String },

    /// A centered crop was requested that is larger than its source.
    #[error(
        "Source {source_width}x{source_height} is too small to crop to {target_width}x{target_height}"
    )]
    InsufficientSourceSize {
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
    },

    /// An output file could not be created.
    #[error("Failed to create output file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An output file was created but writing to it failed.
    #[error("Failed to write output file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The encoder for a recognised format rejected the canvas.
    #[error("Failed to encode to {format}: {message}")]
    Encode { format: String, message: String },

    /// An export format string matched no known encoder.
    #[error("Unsupported output format: {format}")]
    UnsupportedFormat { format: String },
}

impl ImprintError {
    pub fn config_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ImprintError::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn asset_decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ImprintError::AssetDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn font_load(message: impl Into<String>) -> Self {
        ImprintError::FontLoad {
            message: message.into(),
        }
    }

    pub fn encode_failed(format: impl Into<String>, message: impl Into<String>) -> Self {
        ImprintError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        ImprintError::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Short machine-readable category, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ImprintError::ConfigLoad { .. } => "config_load",
            ImprintError::ProfileLoad { .. } => "profile_load",
            ImprintError::InvalidConfig(_) => "invalid_config",
            ImprintError::AssetOpen { .. } => "asset_open",
            ImprintError::AssetDecode { .. } => "asset_decode",
            ImprintError::FontLoad { .. } => "font_load",
            ImprintError::InsufficientSourceSize { .. } => "insufficient_source_size",
            ImprintError::FileCreate { .. } => "file_create",
            ImprintError::FileWrite { .. } => "file_write",
            ImprintError::Encode { .. } => "encode",
            ImprintError::UnsupportedFormat { .. } => "unsupported_format",
        }
    }
}
