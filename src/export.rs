//! Tabular export of compound metrics and raw data
//!
//! CSV exports double-quote text fields; TXT exports are tab-separated and
//! unquoted. Numeric metrics are written with six decimal places and absent
//! values as `N/A`.

use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::data::{CleanedSample, ColumnMapping};
use crate::error::Result;
use crate::fit::{AnalysisResults, FittedModel};
use crate::plot::CompoundMetrics;

/// Export format for the metrics tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Txt,
}

impl ExportFormat {
    fn separator(&self) -> char {
        match self {
            ExportFormat::Csv => ',',
            ExportFormat::Txt => '\t',
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }
}

/// One metrics table row: a compound plus its best-model metrics
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub compound: String,
    pub metrics: CompoundMetrics,
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "N/A".to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn text_field(text: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Csv => quote(text),
        ExportFormat::Txt => text.to_string(),
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// One summary row per compound in the given order, including compounds
/// whose fit failed (written as `N/A` entries) so the export mirrors the
/// whole analysis run
pub fn summary_rows(compounds: &[String], results: &AnalysisResults) -> Vec<MetricsRow> {
    compounds
        .iter()
        .map(|compound| {
            let metrics = match results.fitted(compound) {
                Some(model) => CompoundMetrics {
                    model: model.model.clone(),
                    ic50: finite(model.ic50),
                    rmse: finite(model.rmse),
                    aic: model.aic.and_then(finite),
                },
                None => CompoundMetrics {
                    model: "N/A".to_string(),
                    ic50: None,
                    rmse: None,
                    aic: None,
                },
            };
            MetricsRow {
                compound: compound.clone(),
                metrics,
            }
        })
        .collect()
}

/// Render the metrics table (Compound, Model, IC50, RMSE, AIC)
pub fn metrics_table(rows: &[MetricsRow], format: ExportFormat) -> String {
    let sep = format.separator();
    let mut lines = Vec::with_capacity(rows.len() + 1);

    lines.push(
        ["Compound", "Model", "IC50", "RMSE", "AIC"].join(&sep.to_string()),
    );
    for row in rows {
        let fields = [
            text_field(&row.compound, format),
            text_field(&row.metrics.model, format),
            format_metric(row.metrics.ic50),
            format_metric(row.metrics.rmse),
            format_metric(row.metrics.aic),
        ];
        lines.push(fields.join(&sep.to_string()));
    }
    lines.join("\n")
}

/// Write the metrics table to a file
pub fn write_metrics_table(path: &Path, rows: &[MetricsRow], format: ExportFormat) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", metrics_table(rows, format))?;
    writer.flush()?;
    Ok(())
}

/// Render one compound's cleaned rows as CSV, with the fitted model's
/// per-sample predictions appended when present
pub fn compound_data_csv(
    samples: &[CleanedSample],
    mapping: &ColumnMapping,
    fit: Option<&FittedModel>,
) -> String {
    let predicted = fit.and_then(|f| f.y_predicted.as_deref());

    let mut header = vec![
        mapping.compound.clone(),
        mapping.concentration.clone(),
        mapping.response.clone(),
    ];
    if predicted.is_some() {
        header.push("Predicted_Response".to_string());
    }

    let mut lines = vec![header.join(",")];
    for (index, sample) in samples.iter().enumerate() {
        let mut fields = vec![
            quote(&sample.compound),
            sample.concentration.to_string(),
            sample.response.to_string(),
        ];
        if let Some(y) = predicted.and_then(|p| p.get(index)) {
            fields.push(format!("{:.6}", y));
        }
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

/// Write one compound's data export to a file
pub fn write_compound_data(
    path: &Path,
    samples: &[CleanedSample],
    mapping: &ColumnMapping,
    fit: Option<&FittedModel>,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", compound_data_csv(samples, mapping, fit))?;
    writer.flush()?;
    Ok(())
}

fn timestamp() -> String {
    Utc::now().format("%Y%m%dT%H%M%S").to_string()
}

/// Default file name for the best-models export
pub fn default_metrics_filename(format: ExportFormat) -> String {
    format!("best_models_{}.{}", timestamp(), format.extension())
}

/// Default file name for the all-models summary export
pub fn default_summary_filename(format: ExportFormat) -> String {
    format!("dose_response_summary_{}.{}", timestamp(), format.extension())
}

/// Default file name for a per-compound data export
pub fn default_compound_filename(compound: &str) -> String {
    format!("{}-data.csv", compound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<MetricsRow> {
        vec![
            MetricsRow {
                compound: "MP-1-008".to_string(),
                metrics: CompoundMetrics {
                    model: "four_param_logistic".to_string(),
                    ic50: Some(5.25),
                    rmse: Some(0.0123456789),
                    aic: None,
                },
            },
            MetricsRow {
                compound: "MP-1-009".to_string(),
                metrics: CompoundMetrics {
                    model: "three_param_logistic".to_string(),
                    ic50: None,
                    rmse: Some(0.2),
                    aic: Some(-14.5),
                },
            },
        ]
    }

    #[test]
    fn test_csv_quotes_text_and_formats_numbers() {
        let csv = metrics_table(&rows(), ExportFormat::Csv);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Compound,Model,IC50,RMSE,AIC");
        assert_eq!(
            lines[1],
            "\"MP-1-008\",\"four_param_logistic\",5.250000,0.012346,N/A"
        );
        assert_eq!(
            lines[2],
            "\"MP-1-009\",\"three_param_logistic\",N/A,0.200000,-14.500000"
        );
    }

    #[test]
    fn test_txt_is_tab_separated_unquoted() {
        let txt = metrics_table(&rows(), ExportFormat::Txt);
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], "Compound\tModel\tIC50\tRMSE\tAIC");
        assert!(lines[1].starts_with("MP-1-008\tfour_param_logistic\t5.250000"));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let rows = vec![MetricsRow {
            compound: "cpd \"x\"".to_string(),
            metrics: CompoundMetrics {
                model: "m".to_string(),
                ic50: None,
                rmse: None,
                aic: None,
            },
        }];
        let csv = metrics_table(&rows, ExportFormat::Csv);
        assert!(csv.lines().nth(1).unwrap().starts_with("\"cpd \"\"x\"\"\""));
    }

    #[test]
    fn test_compound_data_with_predictions() {
        let mapping = ColumnMapping::new("Compound", "Conc", "Rab10");
        let samples = vec![
            CleanedSample {
                compound: "A".to_string(),
                concentration: 0.1,
                response: 0.9,
            },
            CleanedSample {
                compound: "A".to_string(),
                concentration: 1.0,
                response: 0.5,
            },
        ];
        let fit = FittedModel {
            model: "four_param_logistic".to_string(),
            params: vec![1.0, 0.0, 1.0, 1.0],
            ic50: 1.0,
            rmse: 0.0,
            aic: None,
            y_predicted: Some(vec![0.88, 0.52]),
        };

        let csv = compound_data_csv(&samples, &mapping, Some(&fit));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Compound,Conc,Rab10,Predicted_Response");
        assert_eq!(lines[1], "\"A\",0.1,0.9,0.880000");
        assert_eq!(lines[2], "\"A\",1,0.5,0.520000");

        let without = compound_data_csv(&samples, &mapping, None);
        assert_eq!(without.lines().next().unwrap(), "Compound,Conc,Rab10");
    }

    #[test]
    fn test_summary_rows_include_failed_fits() {
        use crate::fit::CompoundFit;

        let mut results = AnalysisResults::default();
        results.insert(
            "A",
            CompoundFit::Fitted(FittedModel {
                model: "four_param_logistic".to_string(),
                params: vec![1.0, 0.1, 0.9, 2.0],
                ic50: 2.0,
                rmse: 0.01,
                aic: Some(-4.0),
                y_predicted: None,
            }),
        );
        results.insert(
            "B",
            CompoundFit::Failed {
                reason: "did not converge".to_string(),
            },
        );

        let compounds = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let rows = summary_rows(&compounds, &results);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].metrics.model, "four_param_logistic");
        assert_eq!(rows[0].metrics.ic50, Some(2.0));
        assert_eq!(rows[1].metrics.model, "N/A");
        assert_eq!(rows[1].metrics.ic50, None);
        assert_eq!(rows[2].metrics.model, "N/A");
    }

    #[test]
    fn test_write_metrics_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best_models.csv");
        write_metrics_table(&path, &rows(), ExportFormat::Csv).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Compound,Model,IC50,RMSE,AIC\n"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_default_filenames() {
        let name = default_metrics_filename(ExportFormat::Csv);
        assert!(name.starts_with("best_models_"));
        assert!(name.ends_with(".csv"));
        assert_eq!(default_compound_filename("A"), "A-data.csv");
    }
}
