//! dose-oxide: dose-response assay visualization core
//!
//! Ingests tabular (compound, concentration, response) measurements, maps
//! arbitrary column names onto those roles, cleans rows into fit-ready
//! samples, and turns externally fitted dose-response models into themed,
//! renderer-agnostic plot descriptions with IC50 and Dmax reference
//! annotations.
//!
//! Curve fitting itself is an external collaborator behind the
//! [`fit::Fitter`] and [`fit::CurvePredictor`] traits; rendering is left to
//! whatever consumes the serialized [`plot::PlotDescription`].

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod export;
pub mod fit;
pub mod plot;
pub mod state;

pub use config::{PlotConfig, PlotConfigPatch};
pub use data::{CleanedSample, ColumnMapping, DataSource, DataSummary};
pub use error::{DoseError, Result};
pub use fit::{AnalysisResults, CompoundFit, FittedModel};
pub use plot::PlotDescription;
pub use state::{AnalysisSession, Theme};
