//! Batch export of a composed canvas.
//!
//! Two flavours share the same write path:
//!
//! - [`Exporter::export_profiles`] resizes the canvas once per profile and
//!   names files `prefix + base + suffix + "." + format`.
//! - [`Exporter::export_formats`] writes the canvas at its own size once per
//!   format as `base.format`.
//!
//! Work is sequential and in the given order. Unknown format strings are
//! skipped with a warning unless the exporter is strict.

use image::RgbaImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::encoder::EncoderFactory;
use super::format::OutputFormat;
use super::profile::ExportProfile;
use crate::compose::asset::SourceType;
use crate::compose::resize::{fit_by_orientation, ResizeFilter};
use crate::error::{ImprintError, Result};

/// Where output files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDestination {
    /// A directory, created if absent.
    Directory(PathBuf),
    /// The process working directory.
    WorkingDirectory,
}

impl ExportDestination {
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        match self {
            ExportDestination::Directory(dir) => dir.join(file_name),
            ExportDestination::WorkingDirectory => PathBuf::from(file_name),
        }
    }

    fn prepare(&self) -> Result<()> {
        if let ExportDestination::Directory(dir) = self {
            if !dir.is_dir() {
                std::fs::create_dir_all(dir).map_err(|source| ImprintError::FileCreate {
                    path: dir.clone(),
                    source,
                })?;
                tracing::debug!(dir = %dir.display(), "Created export directory");
            }
        }
        Ok(())
    }
}

/// A file produced by an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

/// Outcome of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub written: Vec<WrittenFile>,
    /// Format strings that matched no encoder, in encounter order.
    pub skipped: Vec<String>,
}

impl ExportReport {
    pub fn total_bytes(&self) -> u64 {
        self.written.iter().map(|f| f.bytes).sum()
    }
}

/// Writes encoded variants of a canvas to a destination.
#[derive(Debug, Clone)]
pub struct Exporter {
    destination: ExportDestination,
    strict: bool,
}

impl Exporter {
    pub fn new(destination: ExportDestination) -> Self {
        Self {
            destination,
            strict: false,
        }
    }

    /// Fail on unknown formats instead of skipping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn destination(&self) -> &ExportDestination {
        &self.destination
    }

    /// Resize and encode the canvas once per profile.
    pub fn export_profiles(
        &self,
        canvas: &RgbaImage,
        source_type: SourceType,
        profiles: &[ExportProfile],
        base_name: &str,
    ) -> Result<ExportReport> {
        self.check_formats(profiles.iter().map(|p| p.format.as_str()))?;
        self.destination.prepare()?;

        let mut report = ExportReport::default();
        for profile in profiles {
            let Some(format) = self.resolve(&profile.format, &mut report) else {
                continue;
            };

            let resized = fit_by_orientation(canvas, profile.size, ResizeFilter::Lanczos3);
            let path = self.destination.path_for(&profile.file_name(base_name));
            report
                .written
                .push(self.write_variant(&resized, format, source_type, path)?);
        }

        Ok(report)
    }

    /// Encode the canvas at its own size once per format string.
    pub fn export_formats(
        &self,
        canvas: &RgbaImage,
        source_type: SourceType,
        formats: &[String],
        base_name: &str,
    ) -> Result<ExportReport> {
        self.check_formats(formats.iter().map(String::as_str))?;
        self.destination.prepare()?;

        let mut report = ExportReport::default();
        for format_str in formats {
            let Some(format) = self.resolve(format_str, &mut report) else {
                continue;
            };

            let path = self
                .destination
                .path_for(&format!("{}.{}", base_name, format_str));
            report
                .written
                .push(self.write_variant(canvas, format, source_type, path)?);
        }

        Ok(report)
    }

    /// In strict mode, reject the batch before anything is written.
    fn check_formats<'a>(&self, mut formats: impl Iterator<Item = &'a str>) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        match formats.find(|f| OutputFormat::parse(f).is_none()) {
            Some(unknown) => Err(ImprintError::unsupported_format(unknown)),
            None => Ok(()),
        }
    }

    fn resolve(&self, format: &str, report: &mut ExportReport) -> Option<OutputFormat> {
        let parsed = OutputFormat::parse(format);
        if parsed.is_none() {
            tracing::warn!(format = %format, "Skipping unsupported output format");
            report.skipped.push(format.to_string());
        }
        parsed
    }

    fn write_variant(
        &self,
        image: &RgbaImage,
        format: OutputFormat,
        source_type: SourceType,
        path: PathBuf,
    ) -> Result<WrittenFile> {
        let encoder = EncoderFactory::create(format, source_type);
        let encoded = encoder.encode(image.as_raw(), image.width(), image.height())?;
        write_file(&path, &encoded.data)?;

        tracing::info!(
            path = %path.display(),
            format = %format,
            width = image.width(),
            height = image.height(),
            bytes = encoded.data.len(),
            "Wrote output file"
        );

        Ok(WrittenFile {
            path,
            format,
            width: image.width(),
            height: image.height(),
            bytes: encoded.data.len() as u64,
        })
    }
}

/// Create, write and flush `path` within one scope.
fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|source| ImprintError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;

    let write_error = |source| ImprintError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(file);
    writer.write_all(data).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
