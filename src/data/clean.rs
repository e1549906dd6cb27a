//! Row cleaning: raw tabular cells to fit-ready numeric samples

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::mapping::ColumnMapping;
use crate::data::stats::value_range;
use crate::data::DataSource;

/// One validated observation, ready for curve fitting.
///
/// Invariants: `compound` is trimmed and non-empty, `concentration` is
/// strictly positive and finite, `response` is finite. The fitted curve's
/// x-axis is logarithmic, so non-positive concentrations can never survive
/// cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedSample {
    pub compound: String,
    pub concentration: f64,
    pub response: f64,
}

/// Filter and coerce raw rows into valid samples under the given mapping.
///
/// Rows are rejected when the compound cell is empty or missing, when either
/// numeric cell fails to parse, or when the concentration is not strictly
/// positive. Output order preserves input order.
///
/// A mapped column name absent from the data yields an empty result ("no
/// valid data") rather than a distinct error, so a stale mapping degrades
/// softly after a new file load.
pub fn clean(source: &DataSource, mapping: &ColumnMapping) -> Vec<CleanedSample> {
    profiling::scope!("clean_samples");

    let (compounds, concentrations, responses) = match (
        source.column_values(&mapping.compound),
        source.column_values(&mapping.concentration),
        source.column_values(&mapping.response),
    ) {
        (Ok(c), Ok(x), Ok(y)) => (c, x, y),
        _ => {
            tracing::warn!(
                compound = %mapping.compound,
                concentration = %mapping.concentration,
                response = %mapping.response,
                "mapped column missing from dataset, no rows cleaned"
            );
            return Vec::new();
        }
    };

    // Casting is non-strict: unparsable cells become null and the row drops.
    let compound_str = match compounds.cast(&DataType::String) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let conc_f64 = concentrations.cast(&DataType::Float64).ok();
    let resp_f64 = responses.cast(&DataType::Float64).ok();
    let (Some(conc_f64), Some(resp_f64)) = (conc_f64, resp_f64) else {
        return Vec::new();
    };

    let compound_chunked = match compound_str.str() {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    let (Ok(conc_chunked), Ok(resp_chunked)) = (conc_f64.f64(), resp_f64.f64()) else {
        return Vec::new();
    };

    let total = source.height();
    let mut samples = Vec::with_capacity(total);

    for ((compound, concentration), response) in compound_chunked
        .into_iter()
        .zip(conc_chunked.into_iter())
        .zip(resp_chunked.into_iter())
    {
        let Some(compound) = compound.map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        let Some(concentration) = concentration.filter(|v| v.is_finite() && *v > 0.0) else {
            continue;
        };
        let Some(response) = response.filter(|v| v.is_finite()) else {
            continue;
        };

        samples.push(CleanedSample {
            compound: compound.to_string(),
            concentration,
            response,
        });
    }

    if samples.len() < total {
        tracing::debug!(
            kept = samples.len(),
            dropped = total - samples.len(),
            "cleaned dataset"
        );
    }

    samples
}

/// Unique compound names in first-seen order (from the raw compound column,
/// before numeric cleaning, so compounds with no valid rows still appear)
pub fn compounds(source: &DataSource, mapping: &ColumnMapping) -> Vec<String> {
    let Ok(series) = source.column_values(&mapping.compound) else {
        return Vec::new();
    };
    let Ok(cast) = series.cast(&DataType::String) else {
        return Vec::new();
    };
    let Ok(chunked) = cast.str() else {
        return Vec::new();
    };

    let mut seen = Vec::new();
    for value in chunked.into_iter().flatten() {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !seen.iter().any(|s| s == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}

/// Group cleaned samples by compound, preserving first-seen compound order
/// and per-compound input order
pub fn group_by_compound(samples: &[CleanedSample]) -> Vec<(String, Vec<CleanedSample>)> {
    let mut groups: Vec<(String, Vec<CleanedSample>)> = Vec::new();
    for sample in samples {
        match groups.iter_mut().find(|(name, _)| *name == sample.compound) {
            Some((_, group)) => group.push(sample.clone()),
            None => groups.push((sample.compound.clone(), vec![sample.clone()])),
        }
    }
    groups
}

/// Cleaned samples belonging to one compound, in input order
pub fn samples_for(samples: &[CleanedSample], compound: &str) -> Vec<CleanedSample> {
    samples
        .iter()
        .filter(|s| s.compound == compound)
        .cloned()
        .collect()
}

/// Whole-dataset summary for the data preview panel
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataSummary {
    pub total_rows: usize,
    pub compounds: Vec<String>,
    pub concentration_range: (f64, f64),
    pub response_range: (f64, f64),
}

/// Summarize the raw dataset under the current mapping.
///
/// Ranges are computed over every parseable cell, not just cleaned rows, so
/// the preview reflects the file as loaded.
pub fn summarize(source: &DataSource, mapping: &ColumnMapping) -> DataSummary {
    let concentration_range = source
        .column_values(&mapping.concentration)
        .map(|s| value_range(&s))
        .unwrap_or((0.0, 0.0));
    let response_range = source
        .column_values(&mapping.response)
        .map(|s| value_range(&s))
        .unwrap_or((0.0, 0.0));

    DataSummary {
        total_rows: source.height(),
        compounds: compounds(source, mapping),
        concentration_range,
        response_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ColumnMapping {
        ColumnMapping::new("C", "X", "Y")
    }

    #[test]
    fn test_drops_non_positive_concentrations() {
        let df = polars::df!(
            "C" => &["A", "A", "A"],
            "X" => &["0", "-1", "10"],
            "Y" => &["1.0", "0.5", "0.3"],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].concentration, 10.0);
        assert_eq!(samples[0].response, 0.3);
    }

    #[test]
    fn test_drops_unparsable_cells_and_trims_compound() {
        let df = polars::df!(
            "C" => &["  MP-1-008  ", "MP-1-008", "", "MP-1-008"],
            "X" => &["0.1", "abc", "1.0", "10"],
            "Y" => &["0.95", "0.9", "0.8", "0.4"],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].compound, "MP-1-008");
        assert_eq!(samples[0].concentration, 0.1);
        assert_eq!(samples[1].concentration, 10.0);
    }

    #[test]
    fn test_all_outputs_valid() {
        let df = polars::df!(
            "C" => &["A", "B", "", "C", "D"],
            "X" => &["1e-3", "0", "5", "NaN", "100"],
            "Y" => &["0.1", "0.2", "0.3", "0.4", "NaN"],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        for sample in &samples {
            assert!(sample.concentration > 0.0);
            assert!(sample.concentration.is_finite());
            assert!(sample.response.is_finite());
            assert!(!sample.compound.is_empty());
        }
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].compound, "A");
    }

    #[test]
    fn test_missing_mapped_column_yields_empty() {
        let df = polars::df!(
            "Compound" => &["A"],
            "Conc" => &[1.0_f64],
            "Resp" => &[0.5_f64],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        assert!(samples.is_empty());
    }

    #[test]
    fn test_numeric_columns_pass_through() {
        let df = polars::df!(
            "C" => &["A", "A"],
            "X" => &[0.5_f64, 2.0],
            "Y" => &[0.9_f64, 0.4],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].concentration, 2.0);
    }

    #[test]
    fn test_order_is_stable() {
        let df = polars::df!(
            "C" => &["A", "B", "A", "B"],
            "X" => &[1.0_f64, 2.0, 3.0, 4.0],
            "Y" => &[0.1_f64, 0.2, 0.3, 0.4],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let samples = clean(&source, &mapping());
        let concs: Vec<f64> = samples.iter().map(|s| s.concentration).collect();
        assert_eq!(concs, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_compound_grouping() {
        let df = polars::df!(
            "C" => &["B", "A", "B"],
            "X" => &[1.0_f64, 2.0, 3.0],
            "Y" => &[0.1_f64, 0.2, 0.3],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);
        let samples = clean(&source, &mapping());

        let groups = group_by_compound(&samples);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "B");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "A");

        assert_eq!(compounds(&source, &mapping()), vec!["B", "A"]);
    }

    #[test]
    fn test_summary_uses_raw_values() {
        let df = polars::df!(
            "C" => &["A", "A", "A"],
            "X" => &["0", "0.1", "100"],
            "Y" => &["1.0", "0.9", "0.2"],
        )
        .unwrap();
        let source = DataSource::from_dataframe(df);

        let summary = summarize(&source, &mapping());
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.compounds, vec!["A"]);
        // Raw range includes the zero concentration that cleaning drops
        assert_eq!(summary.concentration_range, (0.0, 100.0));
        assert_eq!(summary.response_range, (0.2, 1.0));
    }
}
