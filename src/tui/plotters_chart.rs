//! Plotters-powered progress chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::RecordGrammar;

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: the series and bounds are computed
/// outside the render call, and x values are day offsets from `first_date`
/// (which is only used to print date-labeled ticks).
pub struct ProgressChart<'a> {
    /// Line+marker series of `(days since first record, quantity)`.
    pub series: &'a [(f64, f64)],
    /// Optional goal quantity, drawn as a horizontal rule across the x range.
    pub target: Option<f64>,
    /// Date of the first record; anchors the x tick labels.
    pub first_date: NaiveDate,
    /// X bounds (days since first record).
    pub x_bounds: [f64; 2],
    /// Y bounds (quantity).
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> Widget for ProgressChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let first_date = self.first_date;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + date-labeled ticks.
            //
            // We disable the mesh lines to reduce visual clutter in low-resolution
            // terminal rendering; the axes + labels are usually enough here.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc(self.y_label)
                .x_labels(4)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_axis_date(first_date, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: keep the palette high-contrast for terminal readability.
            let line_color = RGBColor(0, 255, 255); // cyan
            let marker_color = WHITE;
            let target_color = RGBColor(255, 0, 0); // red

            // 1) Target rule first, so the progress line stays visible on top
            //    when the series reaches the goal.
            if let Some(t) = self.target {
                chart.draw_series(LineSeries::new([(x0, t), (x1, t)], &target_color))?;
            }

            // 2) Progress line.
            chart.draw_series(LineSeries::new(self.series.iter().copied(), &line_color))?;

            // 3) Observation markers.
            //
            // We intentionally avoid `Circle` markers here. The underlying
            // `plotters-ratatui-backend` currently maps circle radii incorrectly
            // (pixel radius -> normalized canvas units), producing huge circles.
            // A colored `Pixel` gives a clean dot that reads well in terminals.
            chart.draw_series(
                self.series
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), marker_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Format a day-offset tick as a calendar date.
fn fmt_axis_date(first_date: NaiveDate, offset: f64) -> String {
    let date = first_date + Duration::days(offset.round() as i64);
    date.format(RecordGrammar::DATE_FORMAT).to_string()
}
