//! Configuration objects for composing and exporting charts.
//!
//! Nothing here is process-wide state: a [`BatchConfig`] is built once
//! (usually with `Default`, which carries the compiled-in constants) and
//! passed by reference to the resolver, the composer and the exporter.

use crate::groups::GroupMap;
use crate::style::StyleMap;
use crate::{
    DEFAULT_DPI_HIGH, DEFAULT_DPI_THUMB, DEFAULT_TIME_LIMIT, DEFAULT_X_INTERVAL, POINTS_PER_INCH,
};

/// Layout and styling of one chart.
///
/// Sizes are in points: the canvas is `width` x `height` points and the
/// exporter rasterizes it at `dpi / 72` pixels per point.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas width in points (default: 8 in)
    pub width: u32,
    /// Canvas height in points (default: 5 in)
    pub height: u32,
    /// Fixed X domain is [0, x_max]
    pub x_max: f64,
    /// Spacing of the X ticks
    pub x_interval: f64,
    pub x_label: String,
    pub font_family: String,
    pub title_size: f64,
    pub label_size: f64,
    pub tick_label_size: f64,
    pub legend_size: f64,
    /// Length of the inward tick marks
    pub tick_length: i32,
    /// Width of the axes and of the frame around the plotting area
    pub axis_width: u32,
    pub line_width: u32,
    /// Opacity of the series lines, so overlapping methods stay visible
    pub series_opacity: f64,
    /// Fraction of the Y data span added above and below
    pub y_margin: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: (8. * POINTS_PER_INCH) as u32,
            height: (5. * POINTS_PER_INCH) as u32,
            x_max: DEFAULT_TIME_LIMIT,
            x_interval: DEFAULT_X_INTERVAL,
            x_label: "Time (s)".to_string(),
            font_family: "serif".to_string(),
            title_size: 14.,
            label_size: 12.,
            tick_label_size: 10.,
            legend_size: 10.,
            tick_length: 5,
            axis_width: 1,
            line_width: 1,
            series_opacity: 0.8,
            y_margin: 0.05,
        }
    }
}

/// Resolutions and cropping of the exported artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub dpi_high: f32,
    pub dpi_thumb: f32,
    /// Blank border kept around the tight content box, in points
    pub pad: f32,
    /// Suffix of the thumbnail file name, before `.png`
    pub thumb_suffix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi_high: DEFAULT_DPI_HIGH,
            dpi_thumb: DEFAULT_DPI_THUMB,
            pad: 0.1 * POINTS_PER_INCH,
            thumb_suffix: "_thumb".to_string(),
        }
    }
}

/// Everything a batch run needs besides the paths.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Rows with a larger time are dropped when a case is loaded
    pub time_limit: Option<f64>,
    pub groups: GroupMap,
    pub styles: StyleMap,
    pub chart: ChartConfig,
    pub export: ExportConfig,
}

impl BatchConfig {
    pub fn time_limit(&self) -> f64 {
        self.time_limit.unwrap_or(DEFAULT_TIME_LIMIT)
    }

    /// Same time window for loading and for the X axis.
    pub fn with_time_limit(mut self, limit: f64) -> Self {
        self.time_limit = Some(limit);
        self.chart.x_max = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_defaults() {
        let config = ChartConfig::default();
        assert_eq!((config.width, config.height), (576, 360));
        assert_eq!(config.x_max, 200.);
        assert_eq!(config.x_interval, 20.);
        assert_eq!(config.x_label, "Time (s)");
    }

    #[test]
    fn export_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.dpi_high, 300.);
        assert_eq!(config.dpi_thumb, 72.);
    }

    #[test]
    fn time_limit_moves_the_x_axis() {
        let config = BatchConfig::default();
        assert_eq!(config.time_limit(), 200.);
        let config = config.with_time_limit(120.);
        assert_eq!(config.time_limit(), 120.);
        assert_eq!(config.chart.x_max, 120.);
    }
}
