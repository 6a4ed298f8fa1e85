//! Chart styling.
//!
//! All styling lives in an explicit [`ChartStyle`] value passed into the
//! renderer. There is no process-wide style state: two charts rendered
//! with different styles never interfere.

/// Colorblind-friendly color palette (Okabe-Ito).
pub mod palette {
    /// Series colors, assigned to pair columns in order.
    pub const SERIES: [&str; 7] = [
        "#E69F00", // orange
        "#009E73", // green
        "#CC79A7", // magenta
        "#56B4E9", // sky blue
        "#D55E00", // vermillion
        "#0072B2", // blue
        "#F0E442", // yellow
    ];

    /// Threshold line - black
    pub const THRESHOLD: &str = "#000000";

    /// Latency trace - vermillion
    pub const LATENCY: &str = "#D55E00";

    /// Axis and tick strokes
    pub const AXIS: &str = "#333333";

    /// Grid lines
    pub const GRID: &str = "#DDDDDD";
}

/// Immutable styling for the clearance chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    /// Total chart width in pixels
    pub width: f64,
    /// Total chart height in pixels
    pub height: f64,
    /// Left margin (y-axis labels)
    pub margin_left: f64,
    /// Right margin
    pub margin_right: f64,
    /// Top margin (legend row)
    pub margin_top: f64,
    /// Bottom margin (x-axis labels)
    pub margin_bottom: f64,
    /// Vertical gap between the two panels
    pub panel_gap: f64,
    /// Data line stroke width
    pub line_width: f64,
    /// Axis stroke width
    pub axis_width: f64,
    /// Font family for every label
    pub font_family: String,
    /// Axis-title font size
    pub font_size: f64,
    /// Tick-label font size
    pub tick_font_size: f64,
    /// Legend font size
    pub legend_font_size: f64,
    /// Background fill
    pub background: String,
    /// Dash pattern for the threshold line
    pub threshold_dash: String,
    /// Number of ticks per axis
    pub tick_count: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 700.0,
            margin_left: 70.0,
            margin_right: 20.0,
            margin_top: 40.0,
            margin_bottom: 50.0,
            panel_gap: 40.0,
            line_width: 2.5,
            axis_width: 1.0,
            font_family: "sans-serif".to_string(),
            font_size: 15.0,
            tick_font_size: 12.0,
            legend_font_size: 13.0,
            background: "white".to_string(),
            threshold_dash: "8,5".to_string(),
            tick_count: 5,
        }
    }
}

impl ChartStyle {
    /// Series color for a pair column, cycling through the palette.
    pub fn series_color(&self, index: usize) -> &'static str {
        palette::SERIES[index % palette::SERIES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_cycles() {
        let style = ChartStyle::default();
        assert_eq!(style.series_color(0), palette::SERIES[0]);
        assert_eq!(style.series_color(7), palette::SERIES[0]);
        assert_eq!(style.series_color(8), palette::SERIES[1]);
    }
}
