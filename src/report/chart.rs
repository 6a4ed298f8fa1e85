//! Two-panel clearance chart rendered to SVG.
//!
//! Top panel: one line per collision pair plus the dashed safety
//! threshold. Bottom panel: the recorded controller latency. Both panels
//! share the time axis.

use std::path::Path;

use svg::node::element::{Group, Line, Polyline, Rectangle, Text};
use svg::Document;
use thiserror::Error;

use crate::core::types::Timestamped;

use super::style::{palette, ChartStyle};
use super::table::DistanceTable;

/// Error type for chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    /// I/O error while writing the SVG
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The distance table holds no frames
    #[error("cannot chart an empty distance table")]
    EmptyTable,
}

/// One panel's pixel rectangle and data ranges.
struct Panel {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Panel {
    fn map_x(&self, v: f64) -> f64 {
        let (lo, hi) = self.x_range;
        self.x + (v - lo) / (hi - lo).max(f64::EPSILON) * self.w
    }

    fn map_y(&self, v: f64) -> f64 {
        let (lo, hi) = self.y_range;
        // SVG y grows downward.
        self.y + self.h - (v - lo) / (hi - lo).max(f64::EPSILON) * self.h
    }
}

/// Clearance chart renderer.
///
/// Holds only an immutable style; every render call is independent.
pub struct ClearanceChart {
    style: ChartStyle,
}

impl ClearanceChart {
    /// Create a renderer with the given style.
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Render the chart document.
    ///
    /// `latency` is re-zeroed to its own first sample, matching the
    /// table's re-zeroed timebase. Passing `None` (or an empty stream)
    /// gives the clearance panel the full height.
    pub fn render(
        &self,
        table: &DistanceTable,
        latency: Option<&[Timestamped<f64>]>,
        threshold: f64,
    ) -> Result<Document, ChartError> {
        if table.is_empty() {
            return Err(ChartError::EmptyTable);
        }
        let style = &self.style;
        let latency = latency.filter(|s| !s.is_empty());

        let times = table.relative_seconds();
        let t_max = times.last().copied().unwrap_or(0.0).max(f64::EPSILON);

        let plot_w = style.width - style.margin_left - style.margin_right;
        let plot_h = style.height - style.margin_top - style.margin_bottom;
        let (top_h, bottom_h) = if latency.is_some() {
            let usable = plot_h - style.panel_gap;
            (usable * 0.58, usable * 0.42)
        } else {
            (plot_h, 0.0)
        };

        // Clearance range covers the data and the threshold, padded 5%.
        let mut d_min = threshold;
        let mut d_max = threshold;
        for row in table.rows() {
            for &d in row {
                d_min = d_min.min(d);
                d_max = d_max.max(d);
            }
        }
        let pad = (d_max - d_min).max(1e-3) * 0.05;

        let top = Panel {
            x: style.margin_left,
            y: style.margin_top,
            w: plot_w,
            h: top_h,
            x_range: (0.0, t_max),
            y_range: (d_min - pad, d_max + pad),
        };

        let mut document = Document::new()
            .set("width", style.width)
            .set("height", style.height)
            .set("viewBox", (0, 0, style.width as i32, style.height as i32));

        document = document.add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", style.width)
                .set("height", style.height)
                .set("fill", style.background.as_str()),
        );

        document = document.add(self.render_axes(
            &top,
            "axes-clearance",
            "Collision Distance (m)",
            latency.is_none(),
        ));
        document = document.add(self.render_clearance(table, &times, &top, threshold));
        document = document.add(self.render_legend(table, &top));

        if let Some(samples) = latency {
            let l_start = samples[0].timestamp_us;
            let l_times: Vec<f64> = samples
                .iter()
                .map(|s| s.timestamp_us.saturating_sub(l_start) as f64 / 1_000_000.0)
                .collect();
            let l_max = samples.iter().map(|s| s.data).fold(0.0f64, f64::max);

            let bottom = Panel {
                x: style.margin_left,
                y: style.margin_top + top_h + style.panel_gap,
                w: plot_w,
                h: bottom_h,
                x_range: (0.0, t_max),
                y_range: (0.0, (l_max * 1.1).max(1e-3)),
            };
            document = document.add(self.render_axes(&bottom, "axes-latency", "Computation Time (ms)", true));
            document = document.add(self.render_latency(samples, &l_times, &bottom));
        }

        Ok(document)
    }

    /// Render and write the chart to a file.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        table: &DistanceTable,
        latency: Option<&[Timestamped<f64>]>,
        threshold: f64,
    ) -> Result<(), ChartError> {
        let document = self.render(table, latency, threshold)?;
        svg::save(path, &document)?;
        Ok(())
    }

    /// Axis frame, grid, ticks and titles for one panel.
    fn render_axes(&self, panel: &Panel, id: &str, y_title: &str, with_x_labels: bool) -> Group {
        let style = &self.style;
        let mut group = Group::new().set("id", id);

        // Frame: left and bottom axis lines.
        group = group.add(
            Line::new()
                .set("x1", panel.x)
                .set("y1", panel.y)
                .set("x2", panel.x)
                .set("y2", panel.y + panel.h)
                .set("stroke", palette::AXIS)
                .set("stroke-width", style.axis_width),
        );
        group = group.add(
            Line::new()
                .set("x1", panel.x)
                .set("y1", panel.y + panel.h)
                .set("x2", panel.x + panel.w)
                .set("y2", panel.y + panel.h)
                .set("stroke", palette::AXIS)
                .set("stroke-width", style.axis_width),
        );

        let ticks = style.tick_count.max(2);
        for i in 0..ticks {
            let f = i as f64 / (ticks - 1) as f64;

            // Horizontal grid + y tick label
            let yv = panel.y_range.0 + f * (panel.y_range.1 - panel.y_range.0);
            let yp = panel.map_y(yv);
            group = group.add(
                Line::new()
                    .set("x1", panel.x)
                    .set("y1", yp)
                    .set("x2", panel.x + panel.w)
                    .set("y2", yp)
                    .set("stroke", palette::GRID)
                    .set("stroke-width", 0.5),
            );
            group = group.add(
                Text::new(format_tick(yv, panel.y_range.1 - panel.y_range.0))
                    .set("x", panel.x - 8.0)
                    .set("y", yp + style.tick_font_size * 0.35)
                    .set("text-anchor", "end")
                    .set("font-size", style.tick_font_size)
                    .set("font-family", style.font_family.as_str())
                    .set("fill", palette::AXIS),
            );

            // X tick label (bottom panel only)
            if with_x_labels {
                let xv = panel.x_range.0 + f * (panel.x_range.1 - panel.x_range.0);
                let xp = panel.map_x(xv);
                group = group.add(
                    Text::new(format_tick(xv, panel.x_range.1 - panel.x_range.0))
                        .set("x", xp)
                        .set("y", panel.y + panel.h + style.tick_font_size + 6.0)
                        .set("text-anchor", "middle")
                        .set("font-size", style.tick_font_size)
                        .set("font-family", style.font_family.as_str())
                        .set("fill", palette::AXIS),
                );
            }
        }

        // Y-axis title, rotated.
        let ty = panel.y + panel.h / 2.0;
        let tx = panel.x - style.margin_left + 18.0;
        group = group.add(
            Text::new(y_title)
                .set("x", tx)
                .set("y", ty)
                .set("text-anchor", "middle")
                .set("font-size", style.font_size)
                .set("font-family", style.font_family.as_str())
                .set("fill", palette::AXIS)
                .set("transform", format!("rotate(-90, {}, {})", tx, ty)),
        );

        if with_x_labels {
            group = group.add(
                Text::new("Time (s)")
                    .set("x", panel.x + panel.w / 2.0)
                    .set("y", panel.y + panel.h + style.margin_bottom - 6.0)
                    .set("text-anchor", "middle")
                    .set("font-size", style.font_size)
                    .set("font-family", style.font_family.as_str())
                    .set("fill", palette::AXIS),
            );
        }

        group
    }

    /// Pair traces plus the dashed threshold line.
    fn render_clearance(
        &self,
        table: &DistanceTable,
        times: &[f64],
        panel: &Panel,
        threshold: f64,
    ) -> Group {
        let style = &self.style;
        let mut group = Group::new().set("id", "clearance");

        for col in 0..table.pair_count() {
            let points: String = times
                .iter()
                .zip(table.rows().iter().map(|row| row[col]))
                .map(|(&t, d)| format!("{:.2},{:.2}", panel.map_x(t), panel.map_y(d)))
                .collect::<Vec<_>>()
                .join(" ");
            group = group.add(
                Polyline::new()
                    .set("points", points)
                    .set("fill", "none")
                    .set("stroke", style.series_color(col))
                    .set("stroke-width", style.line_width)
                    .set("stroke-linecap", "round")
                    .set("stroke-linejoin", "round"),
            );
        }

        let ty = panel.map_y(threshold);
        group = group.add(
            Line::new()
                .set("x1", panel.x)
                .set("y1", ty)
                .set("x2", panel.x + panel.w)
                .set("y2", ty)
                .set("stroke", palette::THRESHOLD)
                .set("stroke-width", style.line_width)
                .set("stroke-dasharray", style.threshold_dash.as_str()),
        );

        group
    }

    /// Legend row above the clearance panel.
    fn render_legend(&self, table: &DistanceTable, panel: &Panel) -> Group {
        let style = &self.style;
        let mut group = Group::new().set("id", "legend");

        let y = panel.y - 14.0;
        let mut x = panel.x;
        let swatch = 22.0;

        let mut entries: Vec<(String, &str, Option<&str>)> = table
            .pair_names()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), style.series_color(i), None))
            .collect();
        entries.push(("Lower bound".to_string(), palette::THRESHOLD, Some(style.threshold_dash.as_str())));

        for (label, color, dash) in entries {
            let mut line = Line::new()
                .set("x1", x)
                .set("y1", y)
                .set("x2", x + swatch)
                .set("y2", y)
                .set("stroke", color)
                .set("stroke-width", style.line_width);
            if let Some(dash) = dash {
                line = line.set("stroke-dasharray", dash);
            }
            group = group.add(line);

            group = group.add(
                Text::new(label.clone())
                    .set("x", x + swatch + 6.0)
                    .set("y", y + style.legend_font_size * 0.35)
                    .set("font-size", style.legend_font_size)
                    .set("font-family", style.font_family.as_str())
                    .set("fill", palette::AXIS),
            );

            // Advance by swatch + approximate label width.
            x += swatch + 14.0 + label.len() as f64 * style.legend_font_size * 0.55;
        }

        group
    }

    /// Latency trace for the bottom panel.
    fn render_latency(
        &self,
        samples: &[Timestamped<f64>],
        times: &[f64],
        panel: &Panel,
    ) -> Group {
        let style = &self.style;
        let points: String = times
            .iter()
            .zip(samples.iter().map(|s| s.data))
            .map(|(&t, v)| format!("{:.2},{:.2}", panel.map_x(t), panel.map_y(v)))
            .collect::<Vec<_>>()
            .join(" ");

        Group::new().set("id", "latency").add(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", palette::LATENCY)
                .set("stroke-width", style.line_width)
                .set("stroke-linecap", "round")
                .set("stroke-linejoin", "round"),
        )
    }
}

/// Format a tick value with precision scaled to the axis range.
fn format_tick(value: f64, range: f64) -> String {
    if range >= 10.0 {
        format!("{:.0}", value)
    } else if range >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DistanceTable {
        let mut table = DistanceTable::new(vec!["a".to_string(), "b".to_string()]);
        for i in 0..20u64 {
            let t = i as f64 / 19.0;
            table.push_row(i * 100_000, vec![0.2 - 0.1 * t, 0.15 + 0.05 * t]);
        }
        table
    }

    #[test]
    fn test_render_empty_table_rejected() {
        let chart = ClearanceChart::new(ChartStyle::default());
        let empty = DistanceTable::new(vec!["a".to_string()]);
        assert!(matches!(
            chart.render(&empty, None, 0.1),
            Err(ChartError::EmptyTable)
        ));
    }

    #[test]
    fn test_render_contains_traces_and_threshold() {
        let chart = ClearanceChart::new(ChartStyle::default());
        let doc = chart.render(&sample_table(), None, 0.1).unwrap();
        let text = doc.to_string();

        // Two pair traces plus the dashed threshold.
        assert_eq!(text.matches("<polyline").count(), 2);
        assert!(text.contains("stroke-dasharray"));
        assert!(text.contains("Collision Distance (m)"));
        // No latency stream: single panel.
        assert!(!text.contains("Computation Time (ms)"));
    }

    #[test]
    fn test_render_with_latency_panel() {
        let chart = ClearanceChart::new(ChartStyle::default());
        let latency: Vec<Timestamped<f64>> = (0..10u64)
            .map(|i| Timestamped::new(0.4 + 0.01 * i as f64, i * 200_000))
            .collect();
        let doc = chart
            .render(&sample_table(), Some(latency.as_slice()), 0.1)
            .unwrap();
        let text = doc.to_string();

        assert_eq!(text.matches("<polyline").count(), 3);
        assert!(text.contains("Computation Time (ms)"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");
        let chart = ClearanceChart::new(ChartStyle::default());
        chart.save(&path, &sample_table(), None, 0.1).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<svg"));
    }
}
