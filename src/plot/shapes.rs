//! Declarative reference-line shapes and labels
//!
//! Everything here is geometry in plot coordinate space; no rendering. Line
//! and label colors always come from the configuration, never from here.

use serde::Serialize;

use crate::config::PlotConfig;
use crate::constants::reference::{
    DMAX_GAP_THRESHOLD, IC50_LABEL_X_FACTOR, IC50_LABEL_Y_PAPER, LINE_WIDTH,
    MIDPOINT_CAPTION_Y_OFFSET,
};
use crate::plot::geometry::AxisRange;
use crate::plot::reference::ReferenceQuantities;

/// Line styling of a shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSpec {
    pub color: String,
    pub width: f64,
    pub dash: &'static str,
}

/// One reference line in plot coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub line: LineSpec,
}

impl Shape {
    /// Full-height vertical line at `x` (paper-relative y)
    fn vertical(x: f64, color: &str) -> Self {
        Self {
            kind: "line",
            xref: "x",
            yref: "paper",
            x0: x,
            y0: 0.0,
            x1: x,
            y1: 1.0,
            line: LineSpec {
                color: color.to_string(),
                width: LINE_WIDTH,
                dash: "dash",
            },
        }
    }

    /// Horizontal line at `y` spanning the resolved x-axis range
    fn horizontal(y: f64, range: &AxisRange, color: &str) -> Self {
        Self {
            kind: "line",
            xref: "x",
            yref: "y",
            x0: range.x_min,
            y0: y,
            x1: range.x_max,
            y1: y,
            line: LineSpec {
                color: color.to_string(),
                width: LINE_WIDTH,
                dash: "dash",
            },
        }
    }
}

/// Annotation font block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationFont {
    pub color: String,
    pub size: u32,
}

/// One positioned text label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub text: String,
    pub showarrow: bool,
    pub font: AnnotationFont,
    pub bgcolor: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bordercolor: Option<String>,
    pub borderwidth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderpad: Option<u32>,
}

/// IC50 lines require the toggle plus both quantities present, finite, and a
/// concentration that can exist on a log axis
fn ic50_lines_visible(quantities: &ReferenceQuantities, config: &PlotConfig) -> Option<(f64, f64)> {
    if !config.show_ic50_lines {
        return None;
    }
    let concentration = quantities.ic50_concentration.filter(|c| *c > 0.0)?;
    let level = quantities.ic50_response_level?;
    Some((concentration, level))
}

/// Build the reference-line shapes for one compound.
///
/// The predicted-Dmax line appears only when it is meaningfully below the
/// observed line: a gap of more than 0.02 response units, with the predicted
/// plateau at or under the observed one. A gap of exactly 0.02 stays hidden.
pub fn build_shapes(
    quantities: &ReferenceQuantities,
    range: &AxisRange,
    config: &PlotConfig,
) -> Vec<Shape> {
    let mut shapes = Vec::new();

    if let Some((concentration, level)) = ic50_lines_visible(quantities, config) {
        shapes.push(Shape::vertical(
            concentration,
            &config.ic50_vertical_line_color,
        ));
        shapes.push(Shape::horizontal(
            level,
            range,
            &config.ic50_horizontal_line_color,
        ));
    }

    if config.show_dmax_lines {
        if let Some(observed) = quantities.observed_dmax {
            shapes.push(Shape::horizontal(
                observed,
                range,
                &config.observed_dmax_color,
            ));

            if let Some(predicted) = quantities.predicted_dmax {
                let distinct =
                    (observed - predicted).abs() > DMAX_GAP_THRESHOLD && predicted <= observed;
                if distinct {
                    shapes.push(Shape::horizontal(
                        predicted,
                        range,
                        &config.predicted_dmax_color,
                    ));
                }
            }
        }
    }

    shapes
}

/// Build the labels accompanying the IC50 reference lines: the value badge
/// offset right of the vertical line, and the midpoint caption at the left
/// edge of the horizontal line
pub fn build_annotations(
    quantities: &ReferenceQuantities,
    range: &AxisRange,
    config: &PlotConfig,
) -> Vec<Annotation> {
    let mut annotations = Vec::new();

    if let Some((concentration, level)) = ic50_lines_visible(quantities, config) {
        annotations.push(Annotation {
            x: concentration * IC50_LABEL_X_FACTOR,
            y: IC50_LABEL_Y_PAPER,
            xref: "x",
            yref: "paper",
            text: format!("IC₅₀ = {:.1}", concentration),
            showarrow: false,
            font: AnnotationFont {
                color: config.line_color.clone(),
                size: config.text_size,
            },
            bgcolor: "rgba(255, 255, 255, 0.9)",
            bordercolor: Some(config.line_color.clone()),
            borderwidth: 1,
            borderpad: Some(3),
        });

        annotations.push(Annotation {
            x: range.x_min,
            y: level - MIDPOINT_CAPTION_Y_OFFSET,
            xref: "x",
            yref: "y",
            text: "50% of maximum inhibition".to_string(),
            showarrow: false,
            font: AnnotationFont {
                color: config.ic50_horizontal_line_color.clone(),
                size: config.text_size.saturating_sub(3),
            },
            bgcolor: "rgba(255, 255, 255, 0.8)",
            bordercolor: None,
            borderwidth: 0,
            borderpad: None,
        });
    }

    annotations
}
