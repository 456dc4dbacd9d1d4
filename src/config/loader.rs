/// Configuration loading from TOML file
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::{Overrides, RunConfig};
use crate::error::{GapError, Result};
use crate::time::DateTemplate;
use crate::types::{DateBound, DayMode};

/// On-disk settings; every key is optional and named like its command-line flag
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub in_filename: Option<PathBuf>,
    pub out_filename: Option<PathBuf>,
    pub out_date_format: Option<String>,
    pub data_format: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GapError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Parse the raw strings, naming the offending key on failure
    pub fn into_overrides(self) -> Result<Overrides> {
        let mode = self
            .data_format
            .as_deref()
            .map(|s| s.parse::<DayMode>())
            .transpose()
            .map_err(|e| GapError::ConfigError(format!("data_format: {}", e)))?;

        Ok(Overrides {
            input_path: self.in_filename,
            output_path: self.out_filename,
            template: self.out_date_format.as_deref().map(DateTemplate::parse),
            mode,
            start: parse_bound("start_date", self.start_date.as_deref())?,
            end: parse_bound("end_date", self.end_date.as_deref())?,
            log_level: self.log_level,
        })
    }
}

fn parse_bound(key: &str, value: Option<&str>) -> Result<Option<DateBound>> {
    value
        .map(|s| s.parse::<DateBound>())
        .transpose()
        .map_err(|e| match e {
            GapError::InvalidDateFormat(msg) => {
                GapError::InvalidDateFormat(format!("{}: {}", key, msg))
            }
            other => other,
        })
}

pub fn load_file_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| GapError::ConfigError(format!("Failed to read config file: {}", e)))?;

    FileConfig::from_toml(&content)
}

pub fn validate_config(config: &RunConfig) -> Result<()> {
    if config.input_path.as_os_str().is_empty() {
        return Err(GapError::ConfigError("in_filename is empty".to_string()));
    }

    if config.output_path.as_os_str().is_empty() {
        return Err(GapError::ConfigError("out_filename is empty".to_string()));
    }

    if let (DateBound::Date(start), DateBound::Date(end)) = (config.start, config.end) {
        if start > end {
            return Err(GapError::InvalidRange { start, end });
        }
    }

    if !config.template.has_tokens() {
        warn!(
            "Output date format '{}' has no YYYY, MM or DD token; every row will be identical",
            config.template
        );
    }

    Ok(())
}

/// Refuse an output path that resolves to the input file.
///
/// The input must already exist. The output may not, so its parent directory
/// is resolved and the file name joined back on.
pub fn check_output_target(config: &RunConfig) -> Result<()> {
    let input = config.input_path.canonicalize()?;
    let output = resolve_output(&config.output_path)?;

    // Never replace the trading data with its own gaps
    if output == input {
        return Err(GapError::ConfigError(format!(
            "out_filename {} is the same file as in_filename {}",
            config.output_path.display(),
            config.input_path.display()
        )));
    }
    Ok(())
}

fn resolve_output(path: &Path) -> Result<PathBuf> {
    if let Ok(existing) = path.canonicalize() {
        return Ok(existing);
    }

    let file_name = path.file_name().ok_or_else(|| {
        GapError::ConfigError(format!("out_filename {} has no file name", path.display()))
    })?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    Ok(parent.canonicalize()?.join(file_name))
}
