use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::check_magnification;
use crate::error::{ImprintError, Result};

/// Settings for the watermark tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatermarkConfig {
    /// Logo width as a fraction of the longer canvas side.
    pub logo_width_magnification: f64,
    /// Margin to the bottom-right corner as a fraction of the longer side.
    pub logo_margin_magnification: f64,
    /// Logo opacity, clamped to [0, 1].
    #[serde(default = "default_alpha")]
    pub logo_alpha_value: f64,
    /// Write outputs into `tmp_dir` instead of the working directory.
    #[serde(default)]
    pub use_tmp_dir: bool,
    #[serde(default = "default_tmp_dir")]
    pub tmp_dir: PathBuf,
    pub logo_img_path: PathBuf,
    /// Fail on unknown export formats instead of skipping them.
    #[serde(default)]
    pub strict_formats: bool,
}

fn default_alpha() -> f64 {
    1.0
}

fn default_tmp_dir() -> PathBuf {
    PathBuf::from("./tmp/")
}

impl WatermarkConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Self =
            super::load_document(path).map_err(|e| ImprintError::config_load(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_magnification("logoWidthMagnification", self.logo_width_magnification)
            .map_err(ImprintError::InvalidConfig)?;
        check_magnification("logoMarginMagnification", self.logo_margin_magnification)
            .map_err(ImprintError::InvalidConfig)?;
        Ok(())
    }
}
