use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::check_magnification;
use crate::compose::text::{parse_hex_color, Color};
use crate::error::{ImprintError, Result};

/// Settings for the OGP card generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OgpConfig {
    pub img_width: u32,
    pub img_height: u32,
    /// Logo width as a fraction of `img_width`.
    pub logo_width_magnification: f64,
    /// Element size as a fraction of `img_width`.
    pub element_width_magnification: f64,
    /// Extra row width as a fraction of `img_width`.
    pub element_margin_magnification: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Background opacity, clamped to [0, 1].
    #[serde(default = "default_alpha")]
    pub bg_alpha_value: f64,
    #[serde(default)]
    pub out_format: OutputFormatList,
    pub bg_img_path: PathBuf,
    pub logo_img_path: PathBuf,
    /// Font file; the embedded face is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_bin_path: Option<PathBuf>,
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default)]
    pub strict_formats: bool,
}

fn default_font_size() -> f32 {
    32.0
}

fn default_alpha() -> f64 {
    1.0
}

fn default_src_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from("./dest")
}

fn default_text_color() -> String {
    "#FFFFFF".to_string()
}

/// Output formats, either `"png,webp"` or `["png", "webp"]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum OutputFormatList {
    Joined(String),
    List(Vec<String>),
}

impl Default for OutputFormatList {
    fn default() -> Self {
        OutputFormatList::Joined("png".to_string())
    }
}

impl OutputFormatList {
    /// Format strings in configured order, trimmed, blanks dropped.
    pub fn formats(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            OutputFormatList::Joined(joined) => joined.split(',').collect(),
            OutputFormatList::List(list) => list.iter().map(String::as_str).collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl OgpConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Self =
            super::load_document(path).map_err(|e| ImprintError::config_load(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.img_width == 0 || self.img_height == 0 {
            return Err(ImprintError::InvalidConfig(format!(
                "imgWidth and imgHeight must be positive, got {}x{}",
                self.img_width, self.img_height
            )));
        }

        for (name, value) in [
            ("logoWidthMagnification", self.logo_width_magnification),
            ("elementWidthMagnification", self.element_width_magnification),
            ("elementMarginMagnification", self.element_margin_magnification),
        ] {
            check_magnification(name, value).map_err(ImprintError::InvalidConfig)?;
        }

        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ImprintError::InvalidConfig(format!(
                "fontSize must be positive, got {}",
                self.font_size
            )));
        }

        self.text_color()?;
        Ok(())
    }

    pub fn text_color(&self) -> Result<Color> {
        parse_hex_color(&self.text_color)
    }

    pub fn background_path(&self) -> PathBuf {
        self.src_dir.join(&self.bg_img_path)
    }

    pub fn logo_path(&self) -> PathBuf {
        self.src_dir.join(&self.logo_img_path)
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.font_bin_path.as_ref().map(|p| self.src_dir.join(p))
    }

    /// Resolve an element name against `src_dir`.
    pub fn element_path(&self, name: &str) -> PathBuf {
        self.src_dir.join(name)
    }
}
