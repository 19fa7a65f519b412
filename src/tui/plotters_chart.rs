//! Plotters-powered equivalence curve widget for Ratatui.
//!
//! Each segment between consecutive samples is drawn in its own Viridis color
//! so the chart carries the same score shading as the ASCII plot.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::viridis;

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct DotsPlottersChart<'a> {
    /// `(lifter 1 lift, lifter 2 lift)` samples in order.
    pub points: &'a [(f64, f64)],
    /// One color fraction in `[0, 1]` per segment (`points.len() - 1`).
    pub fractions: &'a [f64],
    /// Highlighted sample (the TUI cursor).
    pub cursor: Option<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for DotsPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
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
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (segment, &fraction) in self.points.windows(2).zip(self.fractions) {
                let (r, g, b) = viridis(fraction);
                let color = RGBColor(r, g, b);
                chart.draw_series(LineSeries::new(segment.iter().copied(), &color))?;
            }

            // `Circle` radii are mis-scaled by the ratatui backend; a pixel reads fine.
            if let Some(cursor) = self.cursor {
                chart.draw_series(std::iter::once(Pixel::new(cursor, RGBColor(255, 0, 0))))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
