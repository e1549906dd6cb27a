//! Column role mapping and auto-detection

use serde::{Deserialize, Serialize};

use crate::constants::detect::{COMPOUND_KEYWORDS, CONCENTRATION_KEYWORDS, RESPONSE_KEYWORDS};
use crate::data::DataSource;

/// Assignment of raw column names to the three semantic roles.
///
/// Empty strings mean "undetected". The mapping is always replaced as a
/// whole: auto-detection on every data load, or an explicit user choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub compound: String,
    pub concentration: String,
    pub response: String,
}

impl ColumnMapping {
    pub fn new(
        compound: impl Into<String>,
        concentration: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            compound: compound.into(),
            concentration: concentration.into(),
            response: response.into(),
        }
    }

    /// True once all three roles carry a column name
    pub fn is_resolved(&self) -> bool {
        !self.compound.is_empty() && !self.concentration.is_empty() && !self.response.is_empty()
    }
}

fn matches_any(column: &str, keywords: &[&str]) -> bool {
    let lower = column.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// Auto-detect a column mapping from the loaded columns.
///
/// Every role starts at the first column; columns are then scanned in
/// declaration order and a keyword hit overwrites the role, so the last
/// matching column wins. This is a heuristic: callers must still allow a
/// manual override.
///
/// Returns `None` for an empty dataset (no columns to choose from).
pub fn detect_columns(source: &DataSource) -> Option<ColumnMapping> {
    let columns = source.column_names();
    let first = columns.first()?.clone();

    let mut mapping = ColumnMapping::new(first.clone(), first.clone(), first);

    for col in &columns {
        if matches_any(col, COMPOUND_KEYWORDS) {
            mapping.compound = col.clone();
        }
        if matches_any(col, CONCENTRATION_KEYWORDS) {
            mapping.concentration = col.clone();
        }
        if matches_any(col, RESPONSE_KEYWORDS) {
            mapping.response = col.clone();
        }
    }

    tracing::debug!(
        compound = %mapping.compound,
        concentration = %mapping.concentration,
        response = %mapping.response,
        "auto-detected column mapping"
    );

    Some(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn source_with_columns(names: &[&str]) -> DataSource {
        let columns: Vec<Column> = names
            .iter()
            .map(|n| Column::new((*n).into(), &["x"]))
            .collect();
        DataSource::from_dataframe(DataFrame::new(columns).unwrap())
    }

    #[test]
    fn test_detects_standard_headers() {
        let source = source_with_columns(&["Compound", "Conc", "Rab10", "Rep"]);
        let mapping = detect_columns(&source).unwrap();

        assert_eq!(mapping.compound, "Compound");
        assert_eq!(mapping.concentration, "Conc");
        assert_eq!(mapping.response, "Rab10");
    }

    #[test]
    fn test_defaults_to_first_column() {
        let source = source_with_columns(&["A", "B", "C"]);
        let mapping = detect_columns(&source).unwrap();

        assert_eq!(mapping.compound, "A");
        assert_eq!(mapping.concentration, "A");
        assert_eq!(mapping.response, "A");
        assert!(mapping.is_resolved());
    }

    #[test]
    fn test_last_matching_column_wins() {
        let source = source_with_columns(&["dose_low", "dose_high", "signal"]);
        let mapping = detect_columns(&source).unwrap();

        assert_eq!(mapping.concentration, "dose_high");
        assert_eq!(mapping.response, "signal");
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let source = source_with_columns(&["DRUG_ID", "DOSE_uM", "Signal_mean"]);
        let mapping = detect_columns(&source).unwrap();

        assert_eq!(mapping.compound, "DRUG_ID");
        assert_eq!(mapping.concentration, "DOSE_uM");
        assert_eq!(mapping.response, "Signal_mean");
    }

    #[test]
    fn test_mapping_always_references_existing_columns() {
        let headers = [
            vec!["Compound", "Conc", "Response"],
            vec!["x", "y"],
            vec!["drug", "dosage", "rab8", "extra_response"],
            vec!["only_one"],
        ];
        for names in &headers {
            let source = source_with_columns(names);
            let mapping = detect_columns(&source).unwrap();
            let columns = source.column_names();
            assert!(columns.contains(&mapping.compound));
            assert!(columns.contains(&mapping.concentration));
            assert!(columns.contains(&mapping.response));
        }
    }

    #[test]
    fn test_unresolved_default() {
        assert!(!ColumnMapping::default().is_resolved());
    }
}
