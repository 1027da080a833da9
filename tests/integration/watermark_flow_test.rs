//! Watermark end-to-end tests
//!
//! Runs the watermark pipeline and profile export against real files, both
//! through the library and through the `imprint` binary.

use super::test_assets::{dimensions, write_solid, write_text, GREY, RED};
use image::{ImageFormat, Rgba};
use imprint::compose::pipeline::run_watermark;
use imprint::compose::SourceType;
use imprint::config::WatermarkConfig;
use imprint::export::{load_profiles, ExportDestination, Exporter, OutputFormat};
use std::path::Path;
use std::process::Command;

fn write_config(dir: &Path, use_tmp_dir: bool) -> anyhow::Result<()> {
    let config = serde_json::json!({
        "logoWidthMagnification": 0.2,
        "logoMarginMagnification": 0.05,
        "logoAlphaValue": 1.0,
        "useTmpDir": use_tmp_dir,
        "tmpDir": dir.join("tmp"),
        "logoImgPath": dir.join("logo.png"),
    });
    write_text(dir, "config.json", &config.to_string())?;
    write_text(
        dir,
        "profiles.json",
        r#"[
            {"size": 300, "format": "png"},
            {"size": 150, "format": "webp", "suffix": "_s"},
            {"size": 100, "format": "bmp"}
        ]"#,
    )?;
    Ok(())
}

fn write_images(dir: &Path) -> anyhow::Result<()> {
    write_solid(dir, "base.jpg", 1000, 600, GREY, ImageFormat::Jpeg)?;
    write_solid(dir, "logo.png", 300, 120, RED, ImageFormat::Png)?;
    Ok(())
}

#[test]
fn test_watermark_pipeline_and_profiles() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_images(dir.path())?;
    write_config(dir.path(), true)?;

    let config = WatermarkConfig::from_file(dir.path().join("config.json"))?;
    let profiles = load_profiles(dir.path().join("profiles.json"))?;
    let composed = run_watermark(&dir.path().join("base.jpg"), &config)?;

    assert_eq!(composed.source_type, SourceType::Jpeg);
    assert_eq!(composed.dimensions(), (1000, 600));
    // Logo 200x80 at (750, 470)
    assert_eq!(*composed.canvas.get_pixel(850, 510), Rgba([255, 0, 0, 255]));
    assert_ne!(*composed.canvas.get_pixel(740, 510), Rgba([255, 0, 0, 255]));

    let report = Exporter::new(ExportDestination::Directory(config.tmp_dir.clone()))
        .export_profiles(&composed.canvas, composed.source_type, &profiles, "base")?;

    assert_eq!(report.skipped, vec!["bmp"]);
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.written[1].format, OutputFormat::WebP);

    let tmp = dir.path().join("tmp");
    assert_eq!(dimensions(&tmp.join("base.png"))?, (300, 180));
    assert_eq!(dimensions(&tmp.join("base_s.webp"))?, (150, 90));
    assert!(!tmp.join("base.bmp").exists());
    Ok(())
}

#[test]
fn test_missing_logo_fails_before_output() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_solid(dir.path(), "base.jpg", 100, 100, GREY, ImageFormat::Jpeg)?;
    write_config(dir.path(), true)?;

    let config = WatermarkConfig::from_file(dir.path().join("config.json"))?;
    let err = run_watermark(&dir.path().join("base.jpg"), &config).unwrap_err();

    assert!(matches!(err, imprint::ImprintError::AssetOpen { .. }));
    assert!(!dir.path().join("tmp").exists());
    Ok(())
}

#[test]
fn test_binary_writes_into_working_directory() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_images(dir.path())?;
    write_config(dir.path(), false)?;

    let output = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .current_dir(dir.path())
        .args(["watermark", "base.jpg"])
        .env("RUST_LOG", "warn")
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(dimensions(&dir.path().join("base.png"))?, (300, 180));
    assert_eq!(dimensions(&dir.path().join("base_s.webp"))?, (150, 90));
    // Skipped format is reported as a warning
    assert!(String::from_utf8_lossy(&output.stderr).contains("bmp"));
    Ok(())
}

#[test]
fn test_binary_usage_error_exit_code() -> anyhow::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .arg("watermark")
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_binary_runtime_error_exit_code() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_config(dir.path(), false)?;

    let output = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .current_dir(dir.path())
        .args(["watermark", "missing.jpg"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.jpg"));
    Ok(())
}
