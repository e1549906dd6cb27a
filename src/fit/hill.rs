//! Four-parameter logistic evaluation

use super::{CurvePredictor, FitError, FittedModel};

/// Evaluates the standard four-parameter logistic (Hill) model from an
/// already-fitted parameter vector `[hillslope, bottom, top, ic50]`.
///
/// This is evaluation only; parameter estimation stays with the external
/// fitting engine. Engines that report a per-point prediction function of
/// their own can implement [`CurvePredictor`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillPredictor;

impl HillPredictor {
    /// Response at concentration `x` for an inhibition curve: `top` as
    /// `x -> 0`, `bottom` as `x -> inf`, midpoint at `x == ic50`.
    fn response(hillslope: f64, bottom: f64, top: f64, ic50: f64, x: f64) -> f64 {
        bottom + (top - bottom) / (1.0 + (x / ic50).powf(hillslope))
    }
}

impl CurvePredictor for HillPredictor {
    fn predict(&self, fit: &FittedModel, x: &[f64]) -> Result<Vec<f64>, FitError> {
        let &[hillslope, bottom, top, ic50, ..] = fit.params.as_slice() else {
            return Err(FitError::InvalidParameters {
                model: fit.model.clone(),
                expected: 4,
                actual: fit.params.len(),
            });
        };
        if !(ic50 > 0.0) {
            return Err(FitError::NonPositiveIc50(ic50));
        }

        Ok(x.iter()
            .map(|&c| Self::response(hillslope, bottom, top, ic50, c))
            .collect())
    }
}
