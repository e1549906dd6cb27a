//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the crate, making them easier to maintain and configure.

/// Column auto-detection keywords
///
/// A column name containing one of these substrings (case-insensitive) is
/// assigned to the corresponding role. Columns are scanned in declaration
/// order and the last match wins, so later columns override earlier ones.
pub mod detect {
    /// Substrings identifying the compound column
    pub const COMPOUND_KEYWORDS: &[&str] = &["compound", "drug"];

    /// Substrings identifying the concentration column
    pub const CONCENTRATION_KEYWORDS: &[&str] = &["conc", "dose"];

    /// Substrings identifying the response column
    pub const RESPONSE_KEYWORDS: &[&str] = &["response", "rab", "signal"];
}

/// Curve sampling and axis resolution
pub mod curve {
    /// Default number of sampled points along the fitted curve
    pub const DEFAULT_CURVE_POINTS: usize = 200;

    /// Lower clamp for the extended x-axis range (log axis cannot reach 0)
    pub const X_AXIS_MIN_CLAMP: f64 = 1e-6;

    /// Upper clamp for the extended x-axis range
    pub const X_AXIS_MAX_CLAMP: f64 = 1e6;

    /// Factor by which the observed concentration range is extended on each
    /// side (one decade)
    pub const AXIS_DECADE_FACTOR: f64 = 10.0;
}

/// Reference line and annotation geometry
pub mod reference {
    /// Minimum |observed - predicted| Dmax gap before the predicted line is
    /// drawn as a separate shape
    pub const DMAX_GAP_THRESHOLD: f64 = 0.02;

    /// Horizontal offset factor for the IC50 value label (right of the line)
    pub const IC50_LABEL_X_FACTOR: f64 = 1.1;

    /// Paper-coordinate height of the IC50 value label
    pub const IC50_LABEL_Y_PAPER: f64 = 0.95;

    /// Vertical offset of the midpoint caption below the horizontal line
    pub const MIDPOINT_CAPTION_Y_OFFSET: f64 = 0.05;

    /// Reference line width
    pub const LINE_WIDTH: f64 = 2.0;
}

/// Plot layout defaults
pub mod plot {
    /// Fixed y-axis range for normalized response data
    pub const Y_AXIS_RANGE: [f64; 2] = [0.0, 1.1];

    /// Plot margins: left, right, top, bottom
    pub const MARGIN: [u32; 4] = [60, 60, 80, 60];

    /// Legend font size
    pub const LEGEND_FONT_SIZE: u32 = 12;

    /// Legend border width
    pub const LEGEND_BORDER_WIDTH: u32 = 1;
}
