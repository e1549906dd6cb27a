use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dose_oxide::data::clean::samples_for;
use dose_oxide::error::Result;
use dose_oxide::export::{self, ExportFormat, MetricsRow};
use dose_oxide::fit::AnalysisResults;
use dose_oxide::{AnalysisSession, ColumnMapping, PlotConfig, Theme};

/// Assemble dose-response plots and metric exports from an assay table
#[derive(Parser)]
#[command(name = "dose-oxide", version)]
struct Cli {
    /// Input data file (.csv, .tsv, or tab-separated .txt)
    data: PathBuf,

    /// Precomputed fit results: a JSON map of compound name to fitted model
    #[arg(long)]
    fits: Option<PathBuf>,

    /// Plot configuration JSON (fields omitted keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plot only this compound instead of every detected compound
    #[arg(long)]
    compound: Option<String>,

    /// Override the auto-detected column mapping: compound, concentration,
    /// and response column names
    #[arg(long, num_args = 3, value_names = ["COMPOUND", "CONC", "RESPONSE"])]
    columns: Option<Vec<String>>,

    /// Also export each compound's cleaned rows (with predictions when
    /// available) as CSV
    #[arg(long)]
    export_data: bool,

    /// Output directory for plot JSON and metric exports
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Resolve the ambient theme as dark
    #[arg(long)]
    dark: bool,

    /// Metrics export format
    #[arg(long, value_enum, default_value = "csv")]
    format: FormatArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Txt,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Txt => ExportFormat::Txt,
        }
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

fn run(cli: Cli) -> Result<()> {
    let mut session = AnalysisSession::new();
    session.load_file(&cli.data)?;

    if let Some(columns) = &cli.columns {
        session.set_mapping(ColumnMapping::new(
            columns[0].clone(),
            columns[1].clone(),
            columns[2].clone(),
        ));
    }
    if let Some(path) = &cli.config {
        session.set_config(PlotConfig::load(path)?);
    }
    if let Some(path) = &cli.fits {
        session.set_results(AnalysisResults::load_json(path)?);
    }
    if cli.dark {
        session.set_theme(Theme::Dark);
    }

    if let Some(summary) = session.summary() {
        tracing::info!(
            rows = summary.total_rows,
            compounds = summary.compounds.len(),
            "dataset loaded"
        );
    }

    let compounds = match &cli.compound {
        Some(compound) => vec![compound.clone()],
        None => session.compounds(),
    };
    if compounds.is_empty() {
        tracing::warn!("no compounds detected under the current column mapping");
    }

    std::fs::create_dir_all(&cli.out_dir)?;

    let mut rows = Vec::new();
    for compound in &compounds {
        let Some(description) = session.plot_for(compound) else {
            continue;
        };

        let path = cli
            .out_dir
            .join(format!("{}_plot.json", sanitize(compound)));
        std::fs::write(&path, serde_json::to_string_pretty(&description)?)?;
        tracing::info!(compound = %compound, path = %path.display(), "plot written");

        if let Some(metrics) = description.metrics {
            rows.push(MetricsRow {
                compound: compound.clone(),
                metrics,
            });
        }

        if cli.export_data {
            let samples = samples_for(&session.cleaned_samples(), compound);
            let fit = session.results().and_then(|r| r.fitted(compound)).cloned();
            let path = cli
                .out_dir
                .join(export::default_compound_filename(&sanitize(compound)));
            export::write_compound_data(&path, &samples, session.mapping(), fit.as_ref())?;
        }
    }

    let format = ExportFormat::from(cli.format);
    if !rows.is_empty() {
        let path = cli.out_dir.join(export::default_metrics_filename(format));
        export::write_metrics_table(&path, &rows, format)?;
        tracing::info!(path = %path.display(), "metrics exported");
    }
    if let Some(results) = session.results() {
        let summary = export::summary_rows(&compounds, results);
        let path = cli.out_dir.join(export::default_summary_filename(format));
        export::write_metrics_table(&path, &summary, format)?;
        tracing::info!(path = %path.display(), "summary exported");
    }

    if let Some(message) = session.error_message() {
        tracing::warn!("{}", message);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", e.title(), e.user_message());
        std::process::exit(1);
    }
}
