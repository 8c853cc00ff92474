use std::f64::consts::TAU;

use eframe::egui::{Rect, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::series_colors;
use crate::data::chart::{ChartSeries, ChartType};
use crate::data::report::format_value;
use crate::state::AppState;

/// Segments used to approximate one full pie circle.
const PIE_RESOLUTION: usize = 180;

// ---------------------------------------------------------------------------
// Chart preview (right half of the central panel)
// ---------------------------------------------------------------------------

/// Render the current chart and return the screen rect it occupies.
pub fn chart_plot(ui: &mut Ui, state: &AppState) -> Option<Rect> {
    let Some(series) = state.session.chart() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Build a report, then click 'Preview Chart'.");
        });
        return None;
    };

    // The title is part of the captured area so exported PNGs carry it.
    let response = ui
        .vertical(|ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(&series.title).strong().size(16.0));
            });
            match series.chart_type {
                ChartType::Bar | ChartType::Column => bar_plot(ui, series),
                ChartType::Line => line_plot(ui, series),
                ChartType::Pie => pie_plot(ui, series),
            }
        })
        .response;

    Some(response.rect)
}

/// Axis formatter that prints the category label at integer positions.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn bar_plot(ui: &mut Ui, series: &ChartSeries) {
    let colors = series_colors(series);
    let bars: Vec<Bar> = series
        .values
        .iter()
        .zip(&series.labels)
        .zip(colors)
        .enumerate()
        .map(|(i, ((&value, label), color))| {
            Bar::new(i as f64, value)
                .name(format!("{label}: {}", format_value(value)))
                .fill(color)
                .width(0.6)
        })
        .collect();

    let horizontal = series.chart_type == ChartType::Bar;
    let mut chart = BarChart::new(bars).name(&series.value_label);
    if horizontal {
        chart = chart.horizontal();
    }

    let labels = series.labels.clone();
    let mut plot = Plot::new("report_bar_chart")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false);
    plot = if horizontal {
        plot.x_axis_label(series.value_label.clone())
            .y_axis_label(series.group_label.clone())
            .y_axis_formatter(category_formatter(labels))
    } else {
        plot.x_axis_label(series.group_label.clone())
            .y_axis_label(series.value_label.clone())
            .x_axis_formatter(category_formatter(labels))
    };

    plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

fn line_plot(ui: &mut Ui, series: &ChartSeries) {
    let points: Vec<[f64; 2]> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();

    Plot::new("report_line_chart")
        .x_axis_label(series.group_label.clone())
        .y_axis_label(series.value_label.clone())
        .x_axis_formatter(category_formatter(series.labels.clone()))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).name(&series.value_label).width(2.0));
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(4.0));
        });
}

fn pie_plot(ui: &mut Ui, series: &ChartSeries) {
    let colors = series_colors(series);
    let shares = series.shares();
    let total: f64 = series.values.iter().sum();

    Plot::new("report_pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock and go clockwise.
            let mut start = TAU / 4.0;
            for ((label, &value), (color, share)) in series
                .labels
                .iter()
                .zip(&series.values)
                .zip(colors.into_iter().zip(&shares))
            {
                let sweep = value / total * TAU;
                let end = start - sweep;
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge(start, end)))
                        .fill_color(color)
                        .name(label),
                );

                let mid = (start + end) / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{share:.1}%")).strong(),
                ));
                start = end;
            }
        });
}

/// Polygon outline of a unit-circle wedge from `start` to `end` (radians).
fn wedge(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = ((start - end).abs() / TAU * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * i as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    points
}
