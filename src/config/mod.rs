//! Configuration loading for the watermark and OGP tools.
//!
//! Configuration files are JSON or YAML, chosen by file extension. `${VAR}`
//! placeholders are replaced with environment variable values before the
//! document is parsed.

mod ogp;
mod watermark;

pub use ogp::{OgpConfig, OutputFormatList};
pub use watermark::WatermarkConfig;

use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Document syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` select YAML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Replace every `${VAR_NAME}` with the value of the environment variable.
///
/// Fails if any referenced variable is unset.
pub fn substitute_env(text: &str) -> Result<String, String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

    for caps in re.captures_iter(text) {
        let var_name = &caps[1];
        std::env::var(var_name).map_err(|_| {
            format!(
                "Environment variable '{}' is referenced but not set",
                var_name
            )
        })?;
    }

    let substituted = re.replace_all(text, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    });
    Ok(substituted.into_owned())
}

/// Parse a document after environment substitution.
pub fn parse_document<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
) -> Result<T, String> {
    let substituted = substitute_env(text)?;
    match format {
        DocumentFormat::Json => serde_json::from_str(&substituted).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(&substituted).map_err(|e| e.to_string()),
    }
}

/// Read and parse a JSON or YAML document from disk.
///
/// Errors are plain messages; callers wrap them in the error variant that
/// fits the document being loaded.
pub fn load_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    parse_document(&text, DocumentFormat::from_path(path))
}

pub(crate) fn check_magnification(name: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "{} must be a finite, non-negative number, got {}",
            name, value
        ));
    }
    Ok(())
}
