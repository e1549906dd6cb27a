//! Curve sampling and log-axis range resolution

use crate::constants::curve::{
    AXIS_DECADE_FACTOR, DEFAULT_CURVE_POINTS, X_AXIS_MAX_CLAMP, X_AXIS_MIN_CLAMP,
};
use crate::data::CleanedSample;
use crate::error::{DoseError, Result};
use crate::fit::{CurvePredictor, FitError, FittedModel};

/// Resolved x-axis bounds in concentration units (not yet log-transformed)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub x_min: f64,
    pub x_max: f64,
}

impl AxisRange {
    /// Bounds in log10 space, as a log-type axis expects them
    pub fn log10(&self) -> [f64; 2] {
        [self.x_min.log10(), self.x_max.log10()]
    }
}

/// Evenly log-spaced fitted-curve samples over the resolved axis range
#[derive(Debug, Clone, PartialEq)]
pub struct CurveGeometry {
    /// (concentration, predicted response) pairs in ascending concentration order
    pub points: Vec<(f64, f64)>,
    pub x_min: f64,
    pub x_max: f64,
}

/// Resolve the plot's x-axis range from a compound's samples.
///
/// Only strictly positive, finite concentrations participate, independent of
/// upstream cleaning. The observed range is extended by one decade on each
/// side and clamped to `[1e-6, 1e6]` so degenerate inputs cannot produce an
/// unusable log axis. With no usable concentrations at all, resolution fails
/// and the caller renders no curve or reference geometry.
pub fn resolve_axis_range(samples: &[CleanedSample]) -> Result<AxisRange> {
    let mut raw_min = f64::INFINITY;
    let mut raw_max = f64::NEG_INFINITY;

    for sample in samples {
        let c = sample.concentration;
        if c.is_finite() && c > 0.0 {
            raw_min = raw_min.min(c);
            raw_max = raw_max.max(c);
        }
    }

    if !raw_min.is_finite() || !raw_max.is_finite() || raw_min <= 0.0 {
        return Err(DoseError::DegenerateAxis {
            reason: "no strictly positive concentrations".to_string(),
        });
    }

    Ok(AxisRange {
        x_min: (raw_min / AXIS_DECADE_FACTOR).max(X_AXIS_MIN_CLAMP),
        x_max: (raw_max * AXIS_DECADE_FACTOR).min(X_AXIS_MAX_CLAMP),
    })
}

/// Concentrations evenly spaced in log space across the range, inclusive of
/// both endpoints
fn log_spaced(range: &AxisRange, n_points: usize) -> Vec<f64> {
    let n = n_points.max(2);
    let [log_min, log_max] = range.log10();
    let step = (log_max - log_min) / (n - 1) as f64;

    (0..n)
        .map(|i| 10f64.powf(log_min + step * i as f64))
        .collect()
}

/// Sample the fitted curve across the resolved axis range.
///
/// The predictor is the external collaborator's evaluation function; its
/// failure fails curve resolution for this compound only and must not block
/// the scalar metrics derived elsewhere.
pub fn resolve_curve(
    predictor: &dyn CurvePredictor,
    fit: &FittedModel,
    range: &AxisRange,
    n_points: usize,
) -> std::result::Result<CurveGeometry, FitError> {
    let x = log_spaced(range, n_points);
    let y = predictor.predict(fit, &x)?;

    Ok(CurveGeometry {
        points: x.into_iter().zip(y).collect(),
        x_min: range.x_min,
        x_max: range.x_max,
    })
}

/// Default curve resolution with the standard point count
pub fn resolve_curve_default(
    predictor: &dyn CurvePredictor,
    fit: &FittedModel,
    range: &AxisRange,
) -> std::result::Result<CurveGeometry, FitError> {
    resolve_curve(predictor, fit, range, DEFAULT_CURVE_POINTS)
}
