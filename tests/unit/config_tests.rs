// Configuration module unit tests

use imprint::config::*;
use imprint::ImprintError;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_watermark_config_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "logoWidthMagnification": 0.2,
            "logoMarginMagnification": 0.05,
            "logoAlphaValue": 0.8,
            "useTmpDir": true,
            "logoImgPath": "logo.png"
        }"#,
    )
    .unwrap();

    let config = WatermarkConfig::from_file(&path).unwrap();
    assert_eq!(config.logo_width_magnification, 0.2);
    assert_eq!(config.logo_alpha_value, 0.8);
    assert!(config.use_tmp_dir);
    assert_eq!(config.tmp_dir, PathBuf::from("./tmp/"));
}

#[test]
fn test_watermark_config_from_yaml_with_env() {
    std::env::set_var("IMPRINT_UNIT_LOGO_PATH", "/srv/assets/logo.png");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(
        &path,
        "\
        logoWidthMagnification: 0.1\n\
        logoMarginMagnification: 0.01\n\
        logoImgPath: ${IMPRINT_UNIT_LOGO_PATH}\n",
    )
    .unwrap();

    let config = WatermarkConfig::from_file(&path).unwrap();
    assert_eq!(config.logo_img_path, PathBuf::from("/srv/assets/logo.png"));
}

#[test]
fn test_unset_env_var_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "\
        logoWidthMagnification: 0.1\n\
        logoMarginMagnification: 0.01\n\
        logoImgPath: ${IMPRINT_UNIT_NEVER_SET}\n",
    )
    .unwrap();

    let err = WatermarkConfig::from_file(&path).unwrap_err();
    match err {
        ImprintError::ConfigLoad { message, .. } => {
            assert!(message.contains("IMPRINT_UNIT_NEVER_SET"))
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "logoWidthMagnification": -1.0,
            "logoMarginMagnification": 0.05,
            "logoImgPath": "l.png"
        }"#,
    )
    .unwrap();

    assert!(matches!(
        WatermarkConfig::from_file(&path).unwrap_err(),
        ImprintError::InvalidConfig(_)
    ));
}

#[test]
fn test_ogp_config_full() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ogp.json");
    fs::write(
        &path,
        r##"{
            "imgWidth": 1200,
            "imgHeight": 630,
            "logoWidthMagnification": 0.3,
            "elementWidthMagnification": 0.1,
            "elementMarginMagnification": 0.02,
            "fontSize": 40,
            "bgAlphaValue": 0.7,
            "outFormat": "png,webp",
            "bgImgPath": "bg.jpg",
            "logoImgPath": "logo.png",
            "fontBinPath": "fonts/NotoSans.ttf",
            "srcDir": "./assets",
            "destDir": "./out",
            "textColor": "#333"
        }"##,
    )
    .unwrap();

    let config = OgpConfig::from_file(&path).unwrap();
    assert_eq!(config.font_size, 40.0);
    assert_eq!(config.out_format.formats(), vec!["png", "webp"]);
    assert_eq!(
        config.font_path(),
        Some(PathBuf::from("./assets/fonts/NotoSans.ttf"))
    );
    assert_eq!(config.dest_dir, PathBuf::from("./out"));
    assert_eq!(
        config.text_color().unwrap(),
        imprint::compose::Color::new(0x33, 0x33, 0x33)
    );
}

#[test]
fn test_ogp_config_rejects_zero_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ogp.yaml");
    fs::write(
        &path,
        "\
        imgWidth: 0\n\
        imgHeight: 630\n\
        logoWidthMagnification: 0.3\n\
        elementWidthMagnification: 0.1\n\
        elementMarginMagnification: 0.02\n\
        bgImgPath: bg.jpg\n\
        logoImgPath: logo.png\n",
    )
    .unwrap();

    assert!(matches!(
        OgpConfig::from_file(&path).unwrap_err(),
        ImprintError::InvalidConfig(_)
    ));
}

#[test]
fn test_output_format_list_variants() {
    assert_eq!(OutputFormatList::default().formats(), vec!["png"]);
    assert_eq!(
        OutputFormatList::List(vec!["jpeg".into(), " gif ".into(), "".into()]).formats(),
        vec!["jpeg", "gif"]
    );
}
