use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::chart::{ChartSeries, ChartType};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

/// One colour per entry of `series`, in drawing order.
///
/// Colours are assigned by rank in the report, so a group keeps its colour
/// when a bar chart draws the series in reverse.
pub fn series_colors(series: &ChartSeries) -> Vec<Color32> {
    let mut colors = generate_palette(series.len());
    if series.chart_type == ChartType::Bar {
        colors.reverse();
    }
    colors
}
