//! Plot configuration: a flat value-type record of every visual knob
//!
//! Consumers never mutate a config in place; updates either replace the
//! whole record or apply a [`PlotConfigPatch`] that shallow-merges the
//! populated fields into a fresh copy.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// All visual settings for the compound plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub plot_width: u32,
    pub plot_height: u32,
    pub data_point_size: f64,
    pub data_point_alpha: f64,
    pub data_point_color: String,
    pub line_thickness: f64,
    pub line_alpha: f64,
    pub line_color: String,
    pub show_ic50_lines: bool,
    pub show_dmax_lines: bool,
    pub grid_enabled: bool,
    // Reference line colors
    pub ic50_vertical_line_color: String,
    pub ic50_horizontal_line_color: String,
    pub observed_dmax_color: String,
    pub predicted_dmax_color: String,
    // Advanced styling keywords, resolved with explicit fallbacks
    pub plot_style: String,
    pub point_marker_style: String,
    pub line_style: String,
    pub legend_position: String,
    // Text and grid styling
    pub text_size: u32,
    pub title_size: u32,
    pub grid_alpha: f64,
    pub grid_style: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            plot_width: 800,
            plot_height: 600,
            data_point_size: 8.0,
            data_point_alpha: 0.8,
            data_point_color: "#1f77b4".to_string(),
            line_thickness: 2.0,
            line_alpha: 0.9,
            line_color: "#ff7f0e".to_string(),
            show_ic50_lines: true,
            show_dmax_lines: true,
            grid_enabled: true,
            ic50_vertical_line_color: "#d62728".to_string(),
            ic50_horizontal_line_color: "#d62728".to_string(),
            observed_dmax_color: "#2ca02c".to_string(),
            predicted_dmax_color: "#ff7f0e".to_string(),
            plot_style: "seaborn-v0_8".to_string(),
            point_marker_style: "circle".to_string(),
            line_style: "solid".to_string(),
            legend_position: "upper right".to_string(),
            text_size: 12,
            title_size: 16,
            grid_alpha: 0.3,
            grid_style: "solid".to_string(),
        }
    }
}

impl PlotConfig {
    /// A new config with the patch's populated fields applied
    pub fn merged(&self, patch: &PlotConfigPatch) -> Self {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// A partial configuration update; only populated fields are merged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfigPatch {
    pub plot_width: Option<u32>,
    pub plot_height: Option<u32>,
    pub data_point_size: Option<f64>,
    pub data_point_alpha: Option<f64>,
    pub data_point_color: Option<String>,
    pub line_thickness: Option<f64>,
    pub line_alpha: Option<f64>,
    pub line_color: Option<String>,
    pub show_ic50_lines: Option<bool>,
    pub show_dmax_lines: Option<bool>,
    pub grid_enabled: Option<bool>,
    pub ic50_vertical_line_color: Option<String>,
    pub ic50_horizontal_line_color: Option<String>,
    pub observed_dmax_color: Option<String>,
    pub predicted_dmax_color: Option<String>,
    pub plot_style: Option<String>,
    pub point_marker_style: Option<String>,
    pub line_style: Option<String>,
    pub legend_position: Option<String>,
    pub text_size: Option<u32>,
    pub title_size: Option<u32>,
    pub grid_alpha: Option<f64>,
    pub grid_style: Option<String>,
}

macro_rules! merge_field {
    ($patch:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $config.$field = value.clone();
            }
        )+
    };
}

impl PlotConfigPatch {
    fn apply_to(&self, config: &mut PlotConfig) {
        merge_field!(
            self,
            config,
            plot_width,
            plot_height,
            data_point_size,
            data_point_alpha,
            data_point_color,
            line_thickness,
            line_alpha,
            line_color,
            show_ic50_lines,
            show_dmax_lines,
            grid_enabled,
            ic50_vertical_line_color,
            ic50_horizontal_line_color,
            observed_dmax_color,
            predicted_dmax_color,
            plot_style,
            point_marker_style,
            line_style,
            legend_position,
            text_size,
            title_size,
            grid_alpha,
            grid_style,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_merges_only_populated_fields() {
        let config = PlotConfig::default();
        let patch = PlotConfigPatch {
            show_dmax_lines: Some(false),
            plot_style: Some("ggplot".to_string()),
            ..Default::default()
        };

        let next = config.merged(&patch);
        assert!(!next.show_dmax_lines);
        assert_eq!(next.plot_style, "ggplot");
        // Everything else untouched
        assert_eq!(next.data_point_color, config.data_point_color);
        assert_eq!(next.plot_width, config.plot_width);
        assert!(next.show_ic50_lines);
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let config = PlotConfig::default();
        assert_eq!(config.merged(&PlotConfigPatch::default()), config);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PlotConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PlotConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let back: PlotConfig = serde_json::from_str(r#"{"plot_width": 1024}"#).unwrap();
        assert_eq!(back.plot_width, 1024);
        assert_eq!(back.plot_height, 600);
        assert_eq!(back.legend_position, "upper right");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_config.json");

        let mut config = PlotConfig::default();
        config.line_color = "#000000".to_string();
        config.save(&path).unwrap();

        let back = PlotConfig::load(&path).unwrap();
        assert_eq!(back, config);
    }
}
