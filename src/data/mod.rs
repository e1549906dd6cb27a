//! Data layer: tabular source, column mapping, cleaning, and summaries

pub mod clean;
pub mod mapping;
pub mod source;
pub mod stats;

pub use clean::{CleanedSample, DataSummary};
pub use mapping::ColumnMapping;
pub use source::DataSource;
pub use stats::Stats;
