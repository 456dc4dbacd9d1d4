/// Run configuration: built-in defaults, optional TOML file, command line
pub mod loader;

pub use loader::{check_output_target, load_file_config, validate_config, FileConfig};

use std::path::PathBuf;

use crate::time::DateTemplate;
use crate::types::{DateBound, DayMode};

pub const DEFAULT_INPUT: &str = "^SPX.csv";
pub const DEFAULT_OUTPUT: &str = "dates.csv";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Everything one run needs. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub template: DateTemplate,
    pub mode: DayMode,
    pub start: DateBound,
    pub end: DateBound,
    pub log_level: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            template: DateTemplate::default(),
            mode: DayMode::default(),
            start: DateBound::All,
            end: DateBound::All,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RunConfig {
    /// Apply overrides on top of the defaults
    pub fn from_overrides(overrides: Overrides) -> Self {
        let defaults = RunConfig::default();
        RunConfig {
            input_path: overrides.input_path.unwrap_or(defaults.input_path),
            output_path: overrides.output_path.unwrap_or(defaults.output_path),
            template: overrides.template.unwrap_or(defaults.template),
            mode: overrides.mode.unwrap_or(defaults.mode),
            start: overrides.start.unwrap_or(defaults.start),
            end: overrides.end.unwrap_or(defaults.end),
            log_level: overrides.log_level.unwrap_or(defaults.log_level),
        }
    }
}

/// Partially specified settings from one source, already parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub template: Option<DateTemplate>,
    pub mode: Option<DayMode>,
    pub start: Option<DateBound>,
    pub end: Option<DateBound>,
    pub log_level: Option<String>,
}

impl Overrides {
    /// Fill unset fields from `fallback`; values already set here win
    pub fn or(self, fallback: Overrides) -> Overrides {
        Overrides {
            input_path: self.input_path.or(fallback.input_path),
            output_path: self.output_path.or(fallback.output_path),
            template: self.template.or(fallback.template),
            mode: self.mode.or(fallback.mode),
            start: self.start.or(fallback.start),
            end: self.end.or(fallback.end),
            log_level: self.log_level.or(fallback.log_level),
        }
    }
}
