//! The authoritative analysis state and its synchronous recompute pipeline

use std::path::Path;

use polars::prelude::DataFrame;

use crate::config::{PlotConfig, PlotConfigPatch};
use crate::data::clean::{clean, compounds, samples_for, summarize};
use crate::data::mapping::detect_columns;
use crate::data::{CleanedSample, ColumnMapping, DataSource, DataSummary};
use crate::error::{DoseError, Result};
use crate::fit::{AnalysisResults, CurvePredictor, Fitter, HillPredictor};
use crate::plot::assemble::assemble;
use crate::plot::PlotDescription;
use crate::state::Theme;

/// One analysis session: loaded data, column mapping, plot configuration,
/// fit results, and the ambient theme.
///
/// Mutations replace whole values (a new mapping or config is swapped in
/// atomically, never field-merged in place), and every plot recompute reads
/// the current snapshot and publishes a brand-new [`PlotDescription`]
/// stamped with the next revision. The session is single-threaded; callers
/// that want to debounce bursts of changes do so before calling in.
pub struct AnalysisSession {
    data: Option<DataSource>,
    mapping: ColumnMapping,
    config: PlotConfig,
    results: Option<AnalysisResults>,
    theme: Theme,
    predictor: Box<dyn CurvePredictor>,
    revision: u64,
    error_message: Option<String>,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self {
            data: None,
            mapping: ColumnMapping::default(),
            config: PlotConfig::default(),
            results: None,
            theme: Theme::default(),
            predictor: Box::new(HillPredictor),
            revision: 0,
            error_message: None,
        }
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different curve predictor (the external engine's evaluation
    /// function) instead of the built-in logistic evaluator
    pub fn with_predictor(predictor: Box<dyn CurvePredictor>) -> Self {
        Self {
            predictor,
            ..Self::default()
        }
    }

    /// Load a CSV/TSV file, replacing the dataset, re-detecting the column
    /// mapping, and discarding stale fit results
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let source = DataSource::load(path)?;
        self.install_data(source);
        Ok(())
    }

    /// Replace the dataset with an in-memory frame (same lifecycle as a file
    /// load)
    pub fn set_dataframe(&mut self, df: DataFrame) {
        self.install_data(DataSource::from_dataframe(df));
    }

    fn install_data(&mut self, source: DataSource) {
        self.mapping = detect_columns(&source).unwrap_or_default();
        self.data = Some(source);
        self.results = None;
        self.error_message = None;
    }

    /// Replace the whole column mapping (user override of auto-detection)
    pub fn set_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping;
    }

    /// Replace the whole plot configuration
    pub fn set_config(&mut self, config: PlotConfig) {
        self.config = config;
    }

    /// Apply a partial configuration update; the merged record replaces the
    /// current one wholesale
    pub fn update_config(&mut self, patch: &PlotConfigPatch) {
        self.config = self.config.merged(patch);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn data(&self) -> Option<&DataSource> {
        self.data.as_ref()
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn results(&self) -> Option<&AnalysisResults> {
        self.results.as_ref()
    }

    /// The last user-visible problem, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Unique compound names in first-seen order
    pub fn compounds(&self) -> Vec<String> {
        self.data
            .as_ref()
            .map(|source| compounds(source, &self.mapping))
            .unwrap_or_default()
    }

    /// All cleaned samples under the current mapping
    pub fn cleaned_samples(&self) -> Vec<CleanedSample> {
        self.data
            .as_ref()
            .map(|source| clean(source, &self.mapping))
            .unwrap_or_default()
    }

    /// Raw-dataset summary for the preview panel
    pub fn summary(&self) -> Option<DataSummary> {
        self.data
            .as_ref()
            .map(|source| summarize(source, &self.mapping))
    }

    /// Clean the current dataset and run the fitter once per compound.
    ///
    /// One compound's failure is recorded in its own entry and never
    /// disturbs the others. With nothing to fit, the session keeps no
    /// results and surfaces a visible message instead.
    pub fn run_analysis(&mut self, fitter: &dyn Fitter) -> Result<()> {
        let Some(source) = self.data.as_ref() else {
            let err = DoseError::EmptyDataset;
            self.error_message = Some(err.user_message());
            return Err(err);
        };

        let samples = clean(source, &self.mapping);
        if samples.is_empty() {
            let err = DoseError::NoValidSamples;
            self.error_message = Some(err.user_message());
            self.results = None;
            return Err(err);
        }

        self.error_message = None;
        self.results = Some(AnalysisResults::run(fitter, &samples));
        Ok(())
    }

    /// Install externally computed fit results (e.g. loaded from JSON)
    pub fn set_results(&mut self, results: AnalysisResults) {
        self.results = Some(results);
        self.error_message = None;
    }

    /// Recompute the plot for one compound from the current snapshot.
    ///
    /// Returns `None` before any data is loaded. Every call publishes a new
    /// description with a strictly increasing revision, even when the
    /// content is unchanged, so renderers can detect that a recompute
    /// happened.
    pub fn plot_for(&mut self, compound: &str) -> Option<PlotDescription> {
        self.data.as_ref()?;

        let samples = samples_for(&self.cleaned_samples(), compound);
        let fit = self.results.as_ref().and_then(|r| r.get(compound));

        let mut description = assemble(
            compound,
            &samples,
            fit,
            self.predictor.as_ref(),
            &self.config,
            self.theme.is_dark(),
        );

        self.revision += 1;
        description.revision = self.revision;
        Some(description)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drop all loaded state, keeping the configuration and theme
    pub fn reset(&mut self) {
        self.data = None;
        self.mapping = ColumnMapping::default();
        self.results = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{FitError, FittedModel};

    struct StubFitter {
        fail_for: Option<&'static str>,
    }

    impl Fitter for StubFitter {
        fn fit(&self, samples: &[CleanedSample]) -> std::result::Result<FittedModel, FitError> {
            if Some(samples[0].compound.as_str()) == self.fail_for {
                return Err(FitError::Collaborator("did not converge".to_string()));
            }
            Ok(FittedModel {
                model: "four_param_logistic".to_string(),
                params: vec![1.0, 0.1, 0.9, 2.0],
                ic50: 2.0,
                rmse: 0.03,
                aic: Some(-8.0),
                y_predicted: None,
            })
        }
    }

    fn assay_frame() -> DataFrame {
        polars::df!(
            "Compound" => &["A", "A", "A", "B", "B", "B"],
            "Conc" => &[0.1_f64, 1.0, 10.0, 0.1, 1.0, 10.0],
            "Rab10" => &[0.9_f64, 0.6, 0.2, 0.95, 0.55, 0.25],
        )
        .unwrap()
    }

    #[test]
    fn test_load_detects_mapping_and_clears_results() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());

        assert_eq!(session.mapping().compound, "Compound");
        assert_eq!(session.mapping().concentration, "Conc");
        assert_eq!(session.mapping().response, "Rab10");
        assert!(session.results().is_none());
        assert_eq!(session.compounds(), vec!["A", "B"]);
    }

    #[test]
    fn test_analysis_and_plot_pipeline() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());
        session
            .run_analysis(&StubFitter { fail_for: None })
            .unwrap();

        let plot = session.plot_for("A").unwrap();
        assert_eq!(plot.traces.len(), 2);
        assert_eq!(plot.revision, 1);
        assert!(plot.metrics.is_some());

        // Revision strictly increases even for an unchanged snapshot
        let again = session.plot_for("A").unwrap();
        assert_eq!(again.revision, 2);
        assert_eq!(again.traces, plot.traces);
    }

    #[test]
    fn test_failed_compound_does_not_disturb_others() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());
        session
            .run_analysis(&StubFitter {
                fail_for: Some("B"),
            })
            .unwrap();

        let plot_a = session.plot_for("A").unwrap();
        assert_eq!(plot_a.traces.len(), 2);
        assert!(plot_a.metrics.is_some());

        let plot_b = session.plot_for("B").unwrap();
        assert_eq!(plot_b.traces.len(), 1);
        assert!(plot_b.metrics.is_none());
        assert!(plot_b.layout.shapes.is_empty());
    }

    #[test]
    fn test_no_valid_rows_surfaces_message() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(
            polars::df!(
                "Compound" => &["A", "A"],
                "Conc" => &[0.0_f64, -1.0],
                "Rab10" => &[0.9_f64, 0.6],
            )
            .unwrap(),
        );

        let err = session.run_analysis(&StubFitter { fail_for: None });
        assert!(matches!(err, Err(DoseError::NoValidSamples)));
        assert!(session.error_message().is_some());
        assert!(session.results().is_none());

        // The data trace still assembles, just with nothing to show
        let plot = session.plot_for("A").unwrap();
        assert_eq!(plot.traces.len(), 1);
        assert!(plot.traces[0].x.is_empty());
    }

    #[test]
    fn test_config_patch_changes_next_plot() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());

        session.update_config(&PlotConfigPatch {
            plot_style: Some("dark_background".to_string()),
            ..Default::default()
        });

        let plot = session.plot_for("A").unwrap();
        assert_eq!(plot.layout.plot_bgcolor, "#2f3136");
        // Untouched fields keep their defaults
        assert_eq!(session.config().plot_width, 800);
    }

    #[test]
    fn test_mapping_override_replaces_whole_value() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());

        session.set_mapping(ColumnMapping::new("Compound", "Conc", "Conc"));
        assert_eq!(session.mapping().response, "Conc");

        let samples = session.cleaned_samples();
        assert!(samples.iter().all(|s| s.concentration == s.response));
    }

    #[test]
    fn test_theme_flows_into_classic_style() {
        let mut session = AnalysisSession::new();
        session.set_dataframe(assay_frame());
        session.update_config(&PlotConfigPatch {
            plot_style: Some("classic".to_string()),
            ..Default::default()
        });

        session.toggle_theme();
        assert!(session.theme().is_dark());
        let plot = session.plot_for("A").unwrap();
        assert_eq!(plot.layout.plot_bgcolor, "#2d2d2d");
    }

    #[test]
    fn test_plot_before_load_is_none() {
        let mut session = AnalysisSession::new();
        assert!(session.plot_for("A").is_none());
        assert_eq!(session.revision(), 0);
    }
}
