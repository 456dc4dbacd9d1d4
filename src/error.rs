/// Centralized error types for the market dates tool
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GapError {
    // Date Errors
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    // Data Errors
    #[error("No trading dates found in {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid input data: {0}")]
    InvalidInputData(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    // File I/O Errors
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("File {} not found. Please make sure the file exists and try again.", .0.display())]
    InputFileNotFound(PathBuf),

    #[error("File write failed: {0}")]
    FileWriteFailed(String),
}

pub type Result<T> = std::result::Result<T, GapError>;

impl GapError {
    /// Errors caused by what the user typed rather than by the files involved
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            GapError::InvalidDateFormat(_)
                | GapError::InvalidRange { .. }
                | GapError::InvalidParameter(_)
                | GapError::ConfigError(_)
        )
    }

    /// Get error code for logging
    pub fn error_code(&self) -> &str {
        match self {
            GapError::InvalidDateFormat(_) => "DATE_001",
            GapError::InvalidRange { .. } => "DATE_002",
            GapError::EmptyInput(_) => "DATA_001",
            GapError::MissingColumn { .. } => "DATA_002",
            GapError::InvalidInputData(_) => "DATA_003",
            GapError::Csv(_) => "DATA_004",
            GapError::ConfigError(_) => "CFG_001",
            GapError::InvalidParameter(_) => "CFG_002",
            GapError::FileError(_) => "FILE_001",
            GapError::InputFileNotFound(_) => "FILE_002",
            GapError::FileWriteFailed(_) => "FILE_003",
        }
    }
}
