//! Top-level plot assembly for a single compound

use crate::config::PlotConfig;
use crate::constants::plot::{MARGIN, Y_AXIS_RANGE};
use crate::data::CleanedSample;
use crate::fit::{CompoundFit, CurvePredictor};
use crate::plot::description::{
    AxisSpec, AxisTitle, CompoundMetrics, FontSize, Layout, LayoutFont, Margin, Marker,
    PlotDescription, PlotTitle, Trace, TraceLine,
};
use crate::plot::geometry::{resolve_axis_range, resolve_curve_default};
use crate::plot::reference::derive_reference_quantities;
use crate::plot::shapes::{build_annotations, build_shapes};
use crate::plot::style::{
    axis_line_color, is_effective_dark, line_dash, marker_symbol, resolve_colors, resolve_legend,
    LegendPosition, PlotStyle,
};

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Assemble the complete plot description for one compound.
///
/// The data-point trace is always present. With a successful fit, the curve
/// trace and metrics join it; when only the curve sampling fails, the
/// metrics and reference geometry still come through (partial success). A
/// degenerate axis suppresses curve and reference geometry but keeps the
/// data trace with an auto-fit range.
///
/// The returned description carries revision 0; the session stamps the real
/// revision when it publishes the snapshot.
pub fn assemble(
    compound: &str,
    samples: &[CleanedSample],
    fit: Option<&CompoundFit>,
    predictor: &dyn CurvePredictor,
    config: &PlotConfig,
    ambient_dark: bool,
) -> PlotDescription {
    profiling::scope!("assemble_plot");

    let mut traces = vec![Trace {
        x: samples.iter().map(|s| s.concentration).collect(),
        y: samples.iter().map(|s| s.response).collect(),
        mode: "markers",
        kind: "scatter",
        name: format!("{} (data)", compound),
        marker: Some(Marker {
            color: config.data_point_color.clone(),
            size: config.data_point_size,
            opacity: config.data_point_alpha,
            symbol: marker_symbol(&config.point_marker_style),
        }),
        line: None,
        showlegend: true,
    }];

    let axis_range = resolve_axis_range(samples).ok();
    let fitted = fit.and_then(CompoundFit::fitted);

    if let (Some(model), Some(range)) = (fitted, axis_range.as_ref()) {
        match resolve_curve_default(predictor, model, range) {
            Ok(curve) => {
                let (x, y): (Vec<f64>, Vec<f64>) = curve.points.into_iter().unzip();
                traces.push(Trace {
                    x,
                    y,
                    mode: "lines",
                    kind: "scatter",
                    name: format!("{} ({})", compound, model.model),
                    marker: None,
                    line: Some(TraceLine {
                        color: config.line_color.clone(),
                        width: config.line_thickness,
                        opacity: config.line_alpha,
                        dash: line_dash(&config.line_style),
                    }),
                    showlegend: true,
                });
            }
            Err(e) => {
                tracing::warn!(compound = %compound, error = %e, "curve sampling failed");
            }
        }
    }

    // Metrics come from the fit result itself, independent of curve sampling
    let metrics = fitted.map(|model| CompoundMetrics {
        model: model.model.clone(),
        ic50: finite(model.ic50),
        rmse: finite(model.rmse),
        aic: model.aic.and_then(finite),
    });

    // Reference geometry needs a usable axis range; the quantities themselves
    // need only the fit and the samples
    let (shapes, annotations) = match axis_range.as_ref() {
        Some(range) => {
            let quantities = derive_reference_quantities(fitted, samples);
            (
                build_shapes(&quantities, range, config),
                build_annotations(&quantities, range, config),
            )
        }
        None => (Vec::new(), Vec::new()),
    };

    let style = PlotStyle::from_name(&config.plot_style);
    let colors = resolve_colors(style, ambient_dark);
    let effective_dark = is_effective_dark(style, ambient_dark);
    let gridcolor = format!("rgba(128, 128, 128, {})", config.grid_alpha);
    let [l, r, t, b] = MARGIN;

    let layout = Layout {
        title: PlotTitle {
            text: format!("Dose-Response Curve: {}", compound),
            font: FontSize {
                size: config.title_size,
            },
        },
        xaxis: AxisSpec {
            title: AxisTitle {
                text: "Log Concentration".to_string(),
                font: FontSize {
                    size: config.text_size,
                },
            },
            kind: Some("log"),
            range: axis_range.as_ref().map(|r| r.log10()),
            showgrid: config.grid_enabled,
            gridcolor: gridcolor.clone(),
            showline: true,
            linecolor: axis_line_color(effective_dark),
            linewidth: 1,
            zeroline: false,
        },
        yaxis: AxisSpec {
            title: AxisTitle {
                text: "Response".to_string(),
                font: FontSize {
                    size: config.text_size,
                },
            },
            kind: None,
            range: Some(Y_AXIS_RANGE),
            showgrid: config.grid_enabled,
            gridcolor,
            showline: true,
            linecolor: axis_line_color(effective_dark),
            linewidth: 1,
            zeroline: false,
        },
        width: config.plot_width,
        height: config.plot_height,
        margin: Margin { l, r, t, b },
        plot_bgcolor: colors.plot_bgcolor,
        paper_bgcolor: colors.paper_bgcolor,
        font: LayoutFont {
            color: colors.font_color,
            family: "Roboto, sans-serif",
        },
        legend: resolve_legend(
            LegendPosition::from_name(&config.legend_position),
            style,
            ambient_dark,
        ),
        shapes,
        annotations,
    };

    PlotDescription {
        compound: compound.to_string(),
        revision: 0,
        traces,
        layout,
        metrics,
    }
}
