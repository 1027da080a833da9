use anyhow::Context;
use clap::{Parser, Subcommand};
use imprint::compose::pipeline::{run_ogp, run_watermark, OgpRequest};
use imprint::config::{OgpConfig, WatermarkConfig, DEFAULT_CONFIG_FILE};
use imprint::export::profile::DEFAULT_PROFILES_FILE;
use imprint::export::{load_profiles, ExportDestination, ExportReport, Exporter};
use imprint::logging::{init_subscriber, LogFormat};
use imprint::ImprintError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Imprint - proportional logo/text compositing and multi-format image export
#[derive(Parser, Debug)]
#[command(name = "imprint")]
#[command(version, about, long_about = None)]
struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp the configured logo onto an image and export every profile
    Watermark {
        /// Path to configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Path to export profile list
        #[arg(long, default_value = DEFAULT_PROFILES_FILE)]
        profiles: PathBuf,

        /// Image to watermark
        image: PathBuf,
    },
    /// Generate an Open Graph card from background, logo, elements and text
    Ogp {
        /// Path to configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Comma-separated element images, relative to the source directory
        #[arg(short = 'e', long, default_value = "")]
        elements: String,

        /// Caption drawn below the element row
        #[arg(short = 't', long, default_value = "")]
        text: String,

        /// Font size in pixels; defaults to the configured size
        #[arg(short = 'p', long)]
        font_size: Option<f32>,

        /// Output file name without extension
        #[arg(short = 'o', long, default_value = "")]
        output: String,
    },
}

fn main() -> ExitCode {
    // Usage errors exit with code 2 inside parse()
    let args = Args::parse();

    if let Err(e) = init_subscriber(args.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e
                .downcast_ref::<ImprintError>()
                .map(ImprintError::kind)
                .unwrap_or("other");
            tracing::error!(kind, error = %format!("{:#}", e), "Run failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Watermark {
            config,
            profiles,
            image,
        } => watermark(&config, &profiles, &image),
        Command::Ogp {
            config,
            elements,
            text,
            font_size,
            output,
        } => {
            let ogp_config = load_ogp_config(&config)?;
            let mut request = OgpRequest::new(&ogp_config)
                .with_elements(&elements)
                .with_text(text)
                .with_output_name(output);
            if let Some(size) = font_size {
                if !size.is_finite() || size <= 0.0 {
                    return Err(ImprintError::InvalidConfig(format!(
                        "font size must be positive, got {size}"
                    ))
                    .into());
                }
                request = request.with_font_size(size);
            }
            ogp(&ogp_config, &request)
        }
    }
}

fn watermark(config_path: &Path, profiles_path: &Path, image: &Path) -> anyhow::Result<()> {
    let config = WatermarkConfig::from_file(config_path)
        .with_context(|| format!("loading configuration {}", config_path.display()))?;
    let profiles = load_profiles(profiles_path)?;

    tracing::info!(
        config_file = %config_path.display(),
        profiles = profiles.len(),
        image = %image.display(),
        "Configuration loaded successfully"
    );

    let composed = run_watermark(image, &config)
        .with_context(|| format!("watermarking {}", image.display()))?;

    let destination = if config.use_tmp_dir {
        ExportDestination::Directory(config.tmp_dir.clone())
    } else {
        ExportDestination::WorkingDirectory
    };
    let base_name = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let report = Exporter::new(destination)
        .strict(config.strict_formats)
        .export_profiles(&composed.canvas, composed.source_type, &profiles, &base_name)
        .context("exporting profiles")?;

    log_report(&report);
    Ok(())
}

fn load_ogp_config(path: &Path) -> anyhow::Result<OgpConfig> {
    let config = OgpConfig::from_file(path)
        .with_context(|| format!("loading configuration {}", path.display()))?;
    tracing::info!(
        config_file = %path.display(),
        width = config.img_width,
        height = config.img_height,
        "Configuration loaded successfully"
    );
    Ok(config)
}

fn ogp(config: &OgpConfig, request: &OgpRequest) -> anyhow::Result<()> {
    let composed = run_ogp(config, request).context("composing OGP card")?;

    let report = Exporter::new(ExportDestination::Directory(config.dest_dir.clone()))
        .strict(config.strict_formats)
        .export_formats(
            &composed.canvas,
            composed.source_type,
            &config.out_format.formats(),
            &request.output_name,
        )
        .context("exporting OGP card")?;

    log_report(&report);
    Ok(())
}

fn log_report(report: &ExportReport) {
    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        bytes = report.total_bytes(),
        "Export finished"
    );
}
