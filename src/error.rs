//! Error types for dose-oxide
//!
//! This module provides structured error handling using thiserror,
//! replacing ad-hoc String-based errors with proper typed errors.

use thiserror::Error;

/// Main error type for dose-oxide operations
#[derive(Error, Debug)]
pub enum DoseError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Empty dataset error
    #[error("Dataset is empty or has no rows")]
    EmptyDataset,

    /// No rows survived cleaning for the current column mapping
    #[error("No valid data rows after cleaning")]
    NoValidSamples,

    /// Concentration extremes unusable for a log-scale axis
    #[error("Cannot resolve a log-scale axis range: {reason}")]
    DegenerateAxis { reason: String },

    /// Curve fitting collaborator failed for a compound
    #[error("Fit failed for '{compound}': {reason}")]
    FitFailed { compound: String, reason: String },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for dose-oxide operations
pub type Result<T> = std::result::Result<T, DoseError>;

/// UI-friendly error message formatting
impl DoseError {
    /// Get a user-friendly error message suitable for displaying in UI
    pub fn user_message(&self) -> String {
        match self {
            DoseError::FileIo(e) => format!("File error: {}", e),
            DoseError::Polars(e) => format!("Data error: {}", e),
            DoseError::Json(e) => format!("JSON error: {}", e),
            DoseError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            DoseError::ColumnNotFound { column } => {
                format!("Column '{}' not found", column)
            }
            DoseError::EmptyDataset => "Dataset is empty".to_string(),
            DoseError::NoValidSamples => {
                "No valid data rows after cleaning; check the column mapping".to_string()
            }
            DoseError::DegenerateAxis { reason } => {
                format!("Plot axis could not be resolved: {}", reason)
            }
            DoseError::FitFailed { compound, reason } => {
                format!("Curve fit failed for '{}': {}", compound, reason)
            }
            DoseError::Custom(msg) => msg.clone(),
        }
    }

    /// Get a short title for the error (for toast notifications)
    pub fn title(&self) -> &'static str {
        match self {
            DoseError::FileIo(_) => "File Error",
            DoseError::Polars(_) => "Data Error",
            DoseError::Json(_) => "JSON Error",
            DoseError::UnsupportedFormat { .. } => "Unsupported Format",
            DoseError::ColumnNotFound { .. } => "Column Not Found",
            DoseError::EmptyDataset => "Empty Dataset",
            DoseError::NoValidSamples => "No Valid Data",
            DoseError::DegenerateAxis { .. } => "Axis Error",
            DoseError::FitFailed { .. } => "Fit Error",
            DoseError::Custom(_) => "Error",
        }
    }
}
