//! OGP card end-to-end tests

use super::test_assets::{dimensions, write_solid, write_text, GREY, RED};
use image::{ImageFormat, Rgba};
use imprint::compose::pipeline::{run_ogp, OgpRequest};
use imprint::compose::SourceType;
use imprint::config::OgpConfig;
use imprint::export::{ExportDestination, Exporter};
use std::path::Path;
use std::process::Command;

const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn write_assets(dir: &Path) -> anyhow::Result<()> {
    let assets = dir.join("assets");
    std::fs::create_dir_all(&assets)?;
    write_solid(&assets, "bg.jpg", 600, 360, GREY, ImageFormat::Jpeg)?;
    write_solid(&assets, "logo.png", 100, 50, BLUE, ImageFormat::Png)?;
    write_solid(&assets, "a.png", 60, 30, RED, ImageFormat::Png)?;
    write_solid(&assets, "b.png", 30, 60, RED, ImageFormat::Png)?;
    Ok(())
}

fn write_config(dir: &Path, out_format: &str) -> anyhow::Result<()> {
    let config = serde_json::json!({
        "imgWidth": 1200,
        "imgHeight": 630,
        "logoWidthMagnification": 0.25,
        "elementWidthMagnification": 0.1,
        "elementMarginMagnification": 0.05,
        "fontSize": 36,
        "outFormat": out_format,
        "bgImgPath": "bg.jpg",
        "logoImgPath": "logo.png",
        "srcDir": dir.join("assets"),
        "destDir": dir.join("dest"),
    });
    write_text(dir, "config.json", &config.to_string())?;
    Ok(())
}

#[test]
fn test_ogp_card_exported_per_format() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_assets(dir.path())?;
    write_config(dir.path(), "png,webp,bmp")?;

    let config = OgpConfig::from_file(dir.path().join("config.json"))?;
    let request = OgpRequest::new(&config)
        .with_elements("a.png,b.png")
        .with_text("Hello")
        .with_output_name("card");

    let composed = run_ogp(&config, &request)?;
    assert_eq!(composed.dimensions(), (1200, 630));
    assert_eq!(composed.source_type, SourceType::Jpeg);
    // First element 120x60 at (450, 285); logo 300x150 at (450, 52)
    assert_eq!(*composed.canvas.get_pixel(500, 300), RED);
    assert_eq!(*composed.canvas.get_pixel(600, 120), BLUE);

    let report = Exporter::new(ExportDestination::Directory(config.dest_dir.clone()))
        .export_formats(
            &composed.canvas,
            composed.source_type,
            &config.out_format.formats(),
            &request.output_name,
        )?;

    assert_eq!(report.skipped, vec!["bmp"]);
    let dest = dir.path().join("dest");
    assert_eq!(dimensions(&dest.join("card.png"))?, (1200, 630));
    assert_eq!(dimensions(&dest.join("card.webp"))?, (1200, 630));
    assert!(!dest.join("card.bmp").exists());
    Ok(())
}

#[test]
fn test_missing_element_aborts_run() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_assets(dir.path())?;
    write_config(dir.path(), "png")?;

    let config = OgpConfig::from_file(dir.path().join("config.json"))?;
    let request = OgpRequest::new(&config).with_elements("a.png,nope.png");

    let err = run_ogp(&config, &request).unwrap_err();
    assert!(matches!(err, imprint::ImprintError::AssetOpen { .. }));
    Ok(())
}

#[test]
fn test_missing_font_only_matters_with_text() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_assets(dir.path())?;
    write_config(dir.path(), "png")?;

    let mut config = OgpConfig::from_file(dir.path().join("config.json"))?;
    config.font_bin_path = Some("missing.ttf".into());

    let composed = run_ogp(&config, &OgpRequest::new(&config).with_elements("a.png"))?;
    assert_eq!(composed.dimensions(), (1200, 630));

    let err = run_ogp(&config, &OgpRequest::new(&config).with_text("Hello")).unwrap_err();
    assert!(matches!(err, imprint::ImprintError::AssetOpen { .. }));
    Ok(())
}

#[test]
fn test_binary_default_name() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_assets(dir.path())?;
    write_config(dir.path(), "png")?;

    let output = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .current_dir(dir.path())
        .args(["--log-format", "json", "ogp", "-e", "a.png", "-t", "Hi", "-p", "24"])
        .output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(dimensions(&dir.path().join("dest").join("ogp.png"))?, (1200, 630));
    Ok(())
}

#[test]
fn test_binary_rejects_short_background() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    write_assets(dir.path())?;
    write_solid(
        &dir.path().join("assets"),
        "bg.jpg",
        1200,
        400,
        GREY,
        ImageFormat::Jpeg,
    )?;
    write_config(dir.path(), "png")?;

    let output = Command::new(env!("CARGO_BIN_EXE_imprint"))
        .current_dir(dir.path())
        .args(["ogp", "-o", "card"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("too small"));
    assert!(!dir.path().join("dest").join("card.png").exists());
    Ok(())
}
