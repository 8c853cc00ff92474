use eframe::egui::{self, ColorImage, Rect};
use image::RgbaImage;

use crate::config::Settings;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyReportApp {
    pub state: AppState,
    /// Where the chart was drawn last frame, for cropping screenshots.
    chart_rect: Option<Rect>,
}

impl RustyReportApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
            chart_rect: None,
        }
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.state.chart_export_pending {
            return;
        }
        let shot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let (Some(shot), Some(rect)) = (shot, self.chart_rect) else {
            return;
        };

        let cropped = shot.region(&rect, Some(ctx.pixels_per_point()));
        match to_rgba_image(&cropped) {
            Some(img) => self.state.finish_chart_export(&img),
            None => log::error!("Screenshot buffer has unexpected size {:?}", cropped.size),
        }
    }
}

fn to_rgba_image(image: &ColorImage) -> Option<RgbaImage> {
    let [w, h] = image.size;
    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    RgbaImage::from_raw(w as u32, h as u32, bytes)
}

impl eframe::App for RustyReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);

        // ---- Top panel: file row ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: report and chart builders ----
        egui::SidePanel::left("control_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report table + chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |cols| {
                table::report_table(&mut cols[0], &self.state);
                self.chart_rect = plot::chart_plot(&mut cols[1], &self.state);
            });
        });
    }
}
