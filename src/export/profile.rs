use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::load_document;
use crate::error::{ImprintError, Result};

/// Default profile list file name, looked up in the working directory.
pub const DEFAULT_PROFILES_FILE: &str = "profiles.json";

/// One desired output variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportProfile {
    /// Length of the longer side after resizing.
    pub size: u32,
    /// Format string, matched exactly against the known encoders.
    pub format: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl ExportProfile {
    pub fn new(size: u32, format: impl Into<String>) -> Self {
        Self {
            size,
            format: format.into(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// `prefix + base_name + suffix + "." + format`
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}{}{}.{}", self.prefix, base_name, self.suffix, self.format)
    }
}

/// Load a JSON or YAML list of profiles.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<ExportProfile>> {
    let path = path.as_ref();
    let profile_error = |message: String| ImprintError::ProfileLoad {
        path: path.to_path_buf(),
        message,
    };

    let profiles: Vec<ExportProfile> = load_document(path).map_err(profile_error)?;
    if let Some((index, _)) = profiles.iter().enumerate().find(|(_, p)| p.size == 0) {
        return Err(profile_error(format!("profile {} has size 0", index)));
    }
    Ok(profiles)
}
