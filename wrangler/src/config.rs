//! Wrangler configuration file support.
//!
//! Settings cover how the input file is read and whether the output is
//! audited. The reference year, calendar bounds and column list are not
//! configurable; they live in [`crate::core::schema`].
//!
//! ```toml
//! [reader]
//! separator = ";"
//! null_values = ["", "NA"]
//!
//! [pipeline]
//! validate = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{WrangleError, WrangleResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WranglerConfig {
    #[serde(default)]
    pub reader: ReaderConfig,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Delimited-file reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Field separator. When unset it is taken from the file extension.
    #[serde(default)]
    pub separator: Option<char>,
    /// Tokens read as missing values in every column.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
    /// Rows scanned to infer column types.
    #[serde(default = "default_infer_schema_length")]
    pub infer_schema_length: usize,
}

/// Pipeline behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Audit the clean table against its output invariants.
    #[serde(default = "default_validate")]
    pub validate: bool,
}

fn default_null_values() -> Vec<String> {
    ["", "NA", "NaN", "nan", "null"]
        .iter()
        .map(|v| v.to_string())
        .collect()
}

fn default_infer_schema_length() -> usize {
    10_000
}

fn default_validate() -> bool {
    true
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            separator: None,
            null_values: default_null_values(),
            infer_schema_length: default_infer_schema_length(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            validate: default_validate(),
        }
    }
}

impl ReaderConfig {
    /// Separator as a single byte, if one is configured.
    ///
    /// # Returns
    /// * `Ok(None)` when no separator is configured
    /// * `Err(WrangleError::Config)` when the separator is not ASCII
    pub fn separator_byte(&self) -> WrangleResult<Option<u8>> {
        match self.separator {
            None => Ok(None),
            Some(c) if c.is_ascii() => Ok(Some(c as u8)),
            Some(c) => Err(WrangleError::Config(format!(
                "separator must be a single ASCII character, got '{}'",
                c
            ))),
        }
    }
}

impl WranglerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(WranglerConfig)` if successful
    /// * `Err(WrangleError::Config)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> WrangleResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            WrangleError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> WrangleResult<Self> {
        let config: WranglerConfig = toml::from_str(content)
            .map_err(|e| WrangleError::Config(format!("Failed to parse config file: {}", e)))?;

        // Reject a bad separator at load time rather than at first read
        config.reader.separator_byte()?;

        Ok(config)
    }
}
