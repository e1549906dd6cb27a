//! Named plot styles, legend placement, and color resolution

use serde::Serialize;

use crate::constants::plot::{LEGEND_BORDER_WIDTH, LEGEND_FONT_SIZE};

/// The fixed set of named plot styles.
///
/// Unknown names fall back to `Classic`, which is also the only
/// mode-sensitive style: it follows the ambient light/dark theme, while
/// every other named style keeps its own palette regardless of the theme
/// and `DarkBackground` is always dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    SeabornV08,
    Ggplot,
    Bmh,
    #[default]
    Classic,
    FiveThirtyEight,
    Grayscale,
    DarkBackground,
}

impl PlotStyle {
    /// Parse a style keyword, falling back to `Classic` for unknown names
    pub fn from_name(name: &str) -> Self {
        match name {
            "seaborn-v0_8" => PlotStyle::SeabornV08,
            "ggplot" => PlotStyle::Ggplot,
            "bmh" => PlotStyle::Bmh,
            "classic" => PlotStyle::Classic,
            "fivethirtyeight" => PlotStyle::FiveThirtyEight,
            "grayscale" => PlotStyle::Grayscale,
            "dark_background" => PlotStyle::DarkBackground,
            _ => PlotStyle::Classic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlotStyle::SeabornV08 => "seaborn-v0_8",
            PlotStyle::Ggplot => "ggplot",
            PlotStyle::Bmh => "bmh",
            PlotStyle::Classic => "classic",
            PlotStyle::FiveThirtyEight => "fivethirtyeight",
            PlotStyle::Grayscale => "grayscale",
            PlotStyle::DarkBackground => "dark_background",
        }
    }

    /// All selectable style names, in menu order
    pub fn all_names() -> &'static [&'static str] {
        &[
            "seaborn-v0_8",
            "ggplot",
            "bmh",
            "classic",
            "fivethirtyeight",
            "grayscale",
            "dark_background",
        ]
    }
}

/// Concrete background and font colors for a resolved style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleColors {
    pub plot_bgcolor: &'static str,
    pub paper_bgcolor: &'static str,
    pub font_color: &'static str,
}

impl PlotStyle {
    fn light_colors(&self) -> StyleColors {
        match self {
            PlotStyle::SeabornV08 => StyleColors {
                plot_bgcolor: "#f8f9fa",
                paper_bgcolor: "white",
                font_color: "#2e3440",
            },
            PlotStyle::Ggplot => StyleColors {
                plot_bgcolor: "#e8e8e8",
                paper_bgcolor: "white",
                font_color: "#333333",
            },
            PlotStyle::Bmh => StyleColors {
                plot_bgcolor: "#f5f5f5",
                paper_bgcolor: "white",
                font_color: "#262626",
            },
            PlotStyle::Classic | PlotStyle::DarkBackground => StyleColors {
                plot_bgcolor: "white",
                paper_bgcolor: "white",
                font_color: "black",
            },
            PlotStyle::FiveThirtyEight => StyleColors {
                plot_bgcolor: "#f0f0f0",
                paper_bgcolor: "#fafafa",
                font_color: "#444444",
            },
            PlotStyle::Grayscale => StyleColors {
                plot_bgcolor: "#f8f8f8",
                paper_bgcolor: "#ffffff",
                font_color: "#2f2f2f",
            },
        }
    }

    fn dark_colors(&self) -> StyleColors {
        match self {
            PlotStyle::SeabornV08 => StyleColors {
                plot_bgcolor: "#2a2d3a",
                paper_bgcolor: "#1e1e1e",
                font_color: "#e8e8e8",
            },
            PlotStyle::Ggplot => StyleColors {
                plot_bgcolor: "#3a3a3a",
                paper_bgcolor: "#2d2d2d",
                font_color: "#e0e0e0",
            },
            PlotStyle::Bmh => StyleColors {
                plot_bgcolor: "#2c2c2c",
                paper_bgcolor: "#1f1f1f",
                font_color: "#e0e0e0",
            },
            PlotStyle::Classic => StyleColors {
                plot_bgcolor: "#2d2d2d",
                paper_bgcolor: "#1f1f1f",
                font_color: "#e0e0e0",
            },
            PlotStyle::FiveThirtyEight => StyleColors {
                plot_bgcolor: "#2a2a2a",
                paper_bgcolor: "#1e1e1e",
                font_color: "#c0c0c0",
            },
            PlotStyle::Grayscale => StyleColors {
                plot_bgcolor: "#2f2f2f",
                paper_bgcolor: "#1a1a1a",
                font_color: "#d0d0d0",
            },
            PlotStyle::DarkBackground => StyleColors {
                plot_bgcolor: "#2f3136",
                paper_bgcolor: "#36393f",
                font_color: "#dcddde",
            },
        }
    }
}

/// Whether the resolved appearance is dark: the explicit dark style, or
/// `classic` under a dark ambient theme
pub fn is_effective_dark(style: PlotStyle, ambient_dark: bool) -> bool {
    style == PlotStyle::DarkBackground || (style == PlotStyle::Classic && ambient_dark)
}

/// Resolve a style to concrete colors under the given ambient theme
pub fn resolve_colors(style: PlotStyle, ambient_dark: bool) -> StyleColors {
    if style == PlotStyle::DarkBackground {
        return style.dark_colors();
    }
    if is_effective_dark(style, ambient_dark) {
        style.dark_colors()
    } else {
        style.light_colors()
    }
}

/// Axis line color under the effective appearance
pub fn axis_line_color(effective_dark: bool) -> &'static str {
    if effective_dark { "#666666" } else { "#333333" }
}

/// The fixed set of legend positions; unknown keywords fall back to
/// `UpperRight`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
    UpperCenter,
    LowerCenter,
    Center,
}

impl LegendPosition {
    pub fn from_name(name: &str) -> Self {
        match name {
            "upper right" => LegendPosition::UpperRight,
            "upper left" => LegendPosition::UpperLeft,
            "lower right" => LegendPosition::LowerRight,
            "lower left" => LegendPosition::LowerLeft,
            "upper center" => LegendPosition::UpperCenter,
            "lower center" => LegendPosition::LowerCenter,
            "center" => LegendPosition::Center,
            _ => LegendPosition::UpperRight,
        }
    }

    /// (orientation, x, y, xanchor, yanchor)
    fn anchor(&self) -> (&'static str, f64, f64, &'static str, &'static str) {
        match self {
            LegendPosition::UpperRight => ("v", 1.0, 1.0, "right", "top"),
            LegendPosition::UpperLeft => ("v", 0.0, 1.0, "left", "top"),
            LegendPosition::LowerRight => ("v", 1.0, 0.0, "right", "bottom"),
            LegendPosition::LowerLeft => ("v", 0.0, 0.0, "left", "bottom"),
            LegendPosition::UpperCenter => ("h", 0.5, 1.02, "center", "bottom"),
            LegendPosition::LowerCenter => ("h", 0.5, -0.1, "center", "top"),
            LegendPosition::Center => ("v", 0.5, 0.5, "center", "middle"),
        }
    }
}

/// Legend font block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendFont {
    pub size: u32,
    pub color: &'static str,
}

/// Fully resolved legend placement and chrome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendDescriptor {
    pub orientation: &'static str,
    pub x: f64,
    pub y: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub bgcolor: &'static str,
    pub bordercolor: &'static str,
    pub borderwidth: u32,
    pub font: LegendFont,
}

/// Resolve a legend position keyword under the given style and ambient theme.
///
/// Chrome colors follow the *effective* appearance, so a classic plot under a
/// dark ambient theme gets the dark legend chrome.
pub fn resolve_legend(
    position: LegendPosition,
    style: PlotStyle,
    ambient_dark: bool,
) -> LegendDescriptor {
    let (orientation, x, y, xanchor, yanchor) = position.anchor();
    let dark = is_effective_dark(style, ambient_dark);

    LegendDescriptor {
        orientation,
        x,
        y,
        xanchor,
        yanchor,
        bgcolor: if dark {
            "rgba(45, 45, 45, 0.95)"
        } else {
            "rgba(255, 255, 255, 0.9)"
        },
        bordercolor: if dark { "#666666" } else { "#cccccc" },
        borderwidth: LEGEND_BORDER_WIDTH,
        font: LegendFont {
            size: LEGEND_FONT_SIZE,
            color: if dark { "#e0e0e0" } else { "#333333" },
        },
    }
}

/// Canonical marker symbol for a keyword, `circle` for unknown values
pub fn marker_symbol(name: &str) -> &'static str {
    match name {
        "circle" => "circle",
        "square" => "square",
        "diamond" => "diamond",
        "cross" => "cross",
        "x" => "x",
        "triangle-up" => "triangle-up",
        "triangle-down" => "triangle-down",
        "star" => "star",
        _ => "circle",
    }
}

/// Canonical line dash for a keyword, `solid` for unknown values
pub fn line_dash(name: &str) -> &'static str {
    match name {
        "solid" => "solid",
        "dash" => "dash",
        "dot" => "dot",
        "dashdot" => "dashdot",
        "longdash" => "longdash",
        "longdashdot" => "longdashdot",
        _ => "solid",
    }
}
