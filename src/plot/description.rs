//! Renderer-agnostic plot description types
//!
//! A [`PlotDescription`] is a complete, immutable snapshot of one compound's
//! chart. Field names serialize in Plotly's vocabulary so the JSON can feed
//! a Plotly-family renderer directly, but nothing here depends on one.

use serde::Serialize;

use crate::plot::shapes::{Annotation, Shape};
use crate::plot::style::LegendDescriptor;

/// Marker styling of a data-point trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: String,
    pub size: f64,
    pub opacity: f64,
    pub symbol: &'static str,
}

/// Line styling of a fitted-curve trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceLine {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    pub dash: &'static str,
}

/// One series of the plot: data points or the fitted curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<TraceLine>,
    pub showlegend: bool,
}

/// Font sizing block for titles and axis labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSize {
    pub size: u32,
}

/// Axis title with its font
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub text: String,
    pub font: FontSize,
}

/// One axis of the plot.
///
/// `range` is in the axis's own coordinate space: log10 units for the
/// logarithmic x axis, plain response units for y. An absent range lets the
/// renderer auto-fit (the degraded mode when axis resolution fails).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: AxisTitle,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    pub showgrid: bool,
    pub gridcolor: String,
    pub showline: bool,
    pub linecolor: &'static str,
    pub linewidth: u32,
    pub zeroline: bool,
}

/// Plot margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

/// Plot title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotTitle {
    pub text: String,
    pub font: FontSize,
}

/// Global font block: style font color plus the application typeface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutFont {
    pub color: &'static str,
    pub family: &'static str,
}

/// The complete layout block: axes, sizing, style colors, legend, and the
/// reference geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: PlotTitle,
    pub xaxis: AxisSpec,
    pub yaxis: AxisSpec,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font: LayoutFont,
    pub legend: LegendDescriptor,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

/// Headline metrics for the compound, for tables and exports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundMetrics {
    pub model: String,
    pub ic50: Option<f64>,
    pub rmse: Option<f64>,
    pub aic: Option<f64>,
}

/// The fully assembled chart for one compound.
///
/// A fresh value replaces the prior one wholesale on every recompute; the
/// monotonically increasing `revision` lets a renderer distinguish "new
/// snapshot, redraw" from "same reference, no-op".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDescription {
    pub compound: String,
    pub revision: u64,
    pub traces: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CompoundMetrics>,
}
