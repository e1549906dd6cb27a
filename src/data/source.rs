use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{DoseError, Result};

/// DataSource wraps a Polars DataFrame holding one loaded assay file.
///
/// The frame is immutable once loaded; loading a new file replaces the whole
/// DataSource. Column order matches the file's header order, which the column
/// auto-detection relies on.
#[derive(Debug)]
pub struct DataSource {
    /// Materialized DataFrame for column access and cleaning
    df: DataFrame,
    /// Original file path, if loaded from disk
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load data from a file (CSV, or tab-separated TXT/TSV)
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| DoseError::UnsupportedFormat {
                extension: "(none)".to_string(),
            })?;

        let separator = match extension.to_lowercase().as_str() {
            "csv" => b',',
            "tsv" | "txt" => b'\t',
            ext => {
                return Err(DoseError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .with_separator(separator)
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(DoseError::EmptyDataset);
        }

        tracing::debug!(
            rows = df.height(),
            columns = df.width(),
            path = %path.display(),
            "loaded dataset"
        );

        Ok(Self {
            df,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Create DataSource from an already-loaded DataFrame
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self {
            df,
            file_path: None,
        }
    }

    /// Get a reference to the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get column values as a Series
    pub fn column_values(&self, col: &str) -> Result<Series> {
        self.df
            .column(col)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| DoseError::ColumnNotFound {
                column: col.to_string(),
            })
    }

    /// Get all column names in declaration order
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Get the original file path, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}
