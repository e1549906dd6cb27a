//! Derived reference scalars: IC50 response level, observed and predicted Dmax

use crate::data::CleanedSample;
use crate::fit::FittedModel;

/// Scalar quantities behind the reference lines.
///
/// Every field is `None` when no fit exists for the compound or when the
/// underlying arithmetic degenerates; absence propagates as absence, never
/// as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceQuantities {
    /// Fitted IC50 concentration
    pub ic50_concentration: Option<f64>,
    /// Response at 50% of the fitted inhibition range: (top + bottom) / 2
    pub ic50_response_level: Option<f64>,
    /// Mean response over all samples at the maximum tested concentration
    pub observed_dmax: Option<f64>,
    /// The fitted curve's lower plateau (bottom parameter)
    pub predicted_dmax: Option<f64>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Mean response among samples at the exact maximum concentration observed.
///
/// Ties at the maximum all contribute to the mean, not just the first row.
fn observed_dmax(samples: &[CleanedSample]) -> Option<f64> {
    let max_concentration = samples
        .iter()
        .map(|s| s.concentration)
        .fold(f64::NEG_INFINITY, f64::max);
    if !max_concentration.is_finite() {
        return None;
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    for sample in samples {
        if sample.concentration == max_concentration {
            sum += sample.response;
            count += 1;
        }
    }
    if count == 0 {
        return None;
    }
    finite(sum / count as f64)
}

/// Derive the reference quantities for one compound.
///
/// Purely a function of the fit result and the compound's cleaned samples;
/// curve sampling is not involved, so a predictor failure elsewhere does not
/// affect these values.
pub fn derive_reference_quantities(
    fit: Option<&FittedModel>,
    samples: &[CleanedSample],
) -> ReferenceQuantities {
    let Some(fit) = fit else {
        return ReferenceQuantities::default();
    };

    let bottom = fit.bottom();
    let top = fit.top();

    ReferenceQuantities {
        ic50_concentration: finite(fit.ic50),
        ic50_response_level: finite((top + bottom) / 2.0),
        observed_dmax: observed_dmax(samples),
        predicted_dmax: finite(bottom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(concentration: f64, response: f64) -> CleanedSample {
        CleanedSample {
            compound: "A".to_string(),
            concentration,
            response,
        }
    }

    fn fit(params: Vec<f64>) -> FittedModel {
        FittedModel {
            model: "four_param_logistic".to_string(),
            ic50: params.get(3).copied().unwrap_or(5.0),
            rmse: 0.0,
            aic: None,
            y_predicted: None,
            params,
        }
    }

    #[test]
    fn test_standard_parameter_vector() {
        let fit = fit(vec![1.2, 0.1, 0.9, 5.0]);
        let samples = [sample(1.0, 0.8), sample(10.0, 0.2)];
        let q = derive_reference_quantities(Some(&fit), &samples);

        assert_eq!(q.ic50_concentration, Some(5.0));
        assert_eq!(q.ic50_response_level, Some(0.5));
        assert_eq!(q.predicted_dmax, Some(0.1));
        assert_eq!(q.observed_dmax, Some(0.2));
    }

    #[test]
    fn test_short_vector_defaults() {
        let fit = fit(vec![1.0]);
        let q = derive_reference_quantities(Some(&fit), &[sample(1.0, 0.5)]);

        // bottom defaults to 0.0, top to 1.0
        assert_eq!(q.ic50_response_level, Some(0.5));
        assert_eq!(q.predicted_dmax, Some(0.0));
    }

    #[test]
    fn test_observed_dmax_averages_ties() {
        let fit = fit(vec![1.0, 0.0, 1.0, 1.0]);
        let samples = [
            sample(1.0, 0.9),
            sample(100.0, 0.3),
            sample(100.0, 0.1),
            sample(10.0, 0.6),
        ];
        let q = derive_reference_quantities(Some(&fit), &samples);

        assert_eq!(q.observed_dmax, Some(0.2));
    }

    #[test]
    fn test_no_fit_is_all_absent() {
        let q = derive_reference_quantities(None, &[sample(1.0, 0.5)]);
        assert_eq!(q, ReferenceQuantities::default());
        assert!(q.observed_dmax.is_none());
    }

    #[test]
    fn test_no_samples_gives_absent_observed_dmax() {
        let fit = fit(vec![1.0, 0.1, 0.9, 2.0]);
        let q = derive_reference_quantities(Some(&fit), &[]);

        assert_eq!(q.observed_dmax, None);
        assert_eq!(q.predicted_dmax, Some(0.1));
    }

    #[test]
    fn test_non_finite_ic50_is_absent() {
        let mut model = fit(vec![1.0, 0.1, 0.9, f64::NAN]);
        model.ic50 = f64::NAN;
        let q = derive_reference_quantities(Some(&model), &[sample(1.0, 0.5)]);

        assert_eq!(q.ic50_concentration, None);
        assert_eq!(q.ic50_response_level, Some(0.5));
    }
}
