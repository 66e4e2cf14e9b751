//! Plotters-powered line chart widget for Ratatui.
//!
//! Used for the daily trend and the hourly pattern. Plotters gives us axis and
//! tick rendering for free; `plotters-ratatui-backend` draws into the Ratatui
//! buffer.

use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// How x values map to tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// x = days since the given date.
    Days(NaiveDate),
    /// x = hour of day.
    Hour,
}

impl XAxis {
    pub fn format(self, v: f64) -> String {
        match self {
            XAxis::Days(origin) => origin
                .checked_add_days(Days::new(v.max(0.0).round() as u64))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            XAxis::Hour => format!("{:02}h", v.round() as i64),
        }
    }

    fn description(self) -> &'static str {
        match self {
            XAxis::Days(_) => "date",
            XAxis::Hour => "hour of day",
        }
    }
}

/// A render-only chart description; series and bounds are computed by the caller.
pub struct LinePlottersChart<'a> {
    pub series: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_axis: XAxis,
    pub y_label: &'a str,
    pub color: RGBColor,
}

impl<'a> Widget for LinePlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_axis.description())
                .y_desc(self.y_label)
                .x_labels(4)
                .y_labels(4)
                .x_label_formatter(&|v| self.x_axis.format(*v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            chart.draw_series(LineSeries::new(self.series.iter().copied(), &self.color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Axis bounds for a non-negative series, padded so lines don't sit on the frame.
///
/// Returns `None` for an empty series.
pub fn line_bounds(series: &[(f64, f64)]) -> Option<([f64; 2], [f64; 2])> {
    let (first, rest) = series.split_first()?;
    let (mut x_min, mut x_max, mut y_max) = (first.0, first.0, first.1);
    for &(x, y) in rest {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }

    if x_max <= x_min {
        x_min -= 1.0;
        x_max += 1.0;
    }
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    Some(([x_min, x_max], [0.0, y_top]))
}
