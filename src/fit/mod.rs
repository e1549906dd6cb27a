//! Interface to the external curve-fitting collaborator
//!
//! Fitting itself (parameter estimation, model selection) happens outside
//! this crate. This module defines the types that cross that boundary, the
//! per-compound outcome bookkeeping, and a predictor that evaluates an
//! already-fitted four-parameter logistic for curve sampling.

mod hill;

pub use hill::HillPredictor;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::clean::group_by_compound;
use crate::data::CleanedSample;

/// Errors reported by a fitting collaborator or predictor
#[derive(Error, Debug, Clone)]
pub enum FitError {
    /// Fitted parameter vector does not match the model's expectations
    #[error("model '{model}' expects {expected} parameters, got {actual}")]
    InvalidParameters {
        model: String,
        expected: usize,
        actual: usize,
    },

    /// Too few samples to fit
    #[error("not enough samples: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// IC50 must be strictly positive to evaluate on a log-concentration axis
    #[error("non-positive IC50 parameter: {0}")]
    NonPositiveIc50(f64),

    /// Opaque failure from the external engine
    #[error("{0}")]
    Collaborator(String),
}

/// One compound's best fitted model, as returned by the external engine.
///
/// `params` is interpreted positionally as `[hillslope, bottom, top, ic50]`
/// when it carries at least three entries; shorter vectors fall back to
/// bottom 0.0 / top 1.0 where a plateau is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    /// Model identifier, e.g. "four_param_logistic"
    pub model: String,
    /// Fitted parameter vector
    pub params: Vec<f64>,
    /// Fitted IC50 concentration
    pub ic50: f64,
    /// Root-mean-square error of the fit
    pub rmse: f64,
    /// Akaike information criterion, when the engine reports one
    #[serde(default)]
    pub aic: Option<f64>,
    /// Predicted response per cleaned sample, aligned index-for-index
    #[serde(default)]
    pub y_predicted: Option<Vec<f64>>,
}

impl FittedModel {
    /// Lower plateau: `params[1]`, defaulting to 0.0 for short vectors
    pub fn bottom(&self) -> f64 {
        self.params.get(1).copied().unwrap_or(0.0)
    }

    /// Upper plateau: `params[2]`, defaulting to 1.0 for short vectors
    pub fn top(&self) -> f64 {
        self.params.get(2).copied().unwrap_or(1.0)
    }
}

/// Fits cleaned samples for one compound
pub trait Fitter {
    fn fit(&self, samples: &[CleanedSample]) -> Result<FittedModel, FitError>;
}

/// Evaluates a fitted model at arbitrary concentrations
pub trait CurvePredictor {
    fn predict(&self, fit: &FittedModel, x: &[f64]) -> Result<Vec<f64>, FitError>;
}

/// Per-compound fit outcome.
///
/// Failures are recorded per key so one compound's error never disturbs the
/// entry, plot, or metrics of another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompoundFit {
    Fitted(FittedModel),
    Failed { reason: String },
}

impl CompoundFit {
    /// The fitted model, if this outcome is a success
    pub fn fitted(&self) -> Option<&FittedModel> {
        match self {
            CompoundFit::Fitted(model) => Some(model),
            CompoundFit::Failed { .. } => None,
        }
    }
}

/// All per-compound fit outcomes of one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    outcomes: HashMap<String, CompoundFit>,
}

impl AnalysisResults {
    /// Run the fitter once per compound, isolating failures per key
    pub fn run(fitter: &dyn Fitter, samples: &[CleanedSample]) -> Self {
        profiling::scope!("run_analysis");

        let mut outcomes = HashMap::new();
        for (compound, group) in group_by_compound(samples) {
            let outcome = match fitter.fit(&group) {
                Ok(model) => CompoundFit::Fitted(model),
                Err(e) => {
                    tracing::warn!(compound = %compound, error = %e, "fit failed");
                    CompoundFit::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.insert(compound, outcome);
        }
        Self { outcomes }
    }

    /// Wrap precomputed fitted models (e.g. loaded from a results file)
    pub fn from_fitted_map(fits: HashMap<String, FittedModel>) -> Self {
        Self {
            outcomes: fits
                .into_iter()
                .map(|(compound, model)| (compound, CompoundFit::Fitted(model)))
                .collect(),
        }
    }

    /// Load precomputed fitted models from a JSON map of compound to model
    pub fn load_json(path: &Path) -> crate::error::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let fits: HashMap<String, FittedModel> = serde_json::from_str(&contents)?;
        Ok(Self::from_fitted_map(fits))
    }

    pub fn insert(&mut self, compound: impl Into<String>, outcome: CompoundFit) {
        self.outcomes.insert(compound.into(), outcome);
    }

    pub fn get(&self, compound: &str) -> Option<&CompoundFit> {
        self.outcomes.get(compound)
    }

    /// The fitted model for a compound, if the fit succeeded
    pub fn fitted(&self, compound: &str) -> Option<&FittedModel> {
        self.get(compound).and_then(CompoundFit::fitted)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CompoundFit)> {
        self.outcomes.iter()
    }
}
