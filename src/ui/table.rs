use eframe::egui::{Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::report::format_value;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Report preview table (left half of the central panel)
// ---------------------------------------------------------------------------

pub fn report_table(ui: &mut Ui, state: &AppState) {
    let Some(report) = state.session.report() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No report yet.");
        });
        return;
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(eframe::egui::Align::Center))
        .column(Column::remainder().at_least(120.0))
        .column(Column::auto().at_least(100.0))
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong(report.group_label.as_str());
            });
            header.col(|ui| {
                ui.strong(report.aggregation.label());
            });
        })
        .body(|body| {
            body.rows(20.0, report.len(), |mut row| {
                let r = &report.rows[row.index()];
                row.col(|ui| {
                    ui.label(r.group.as_str());
                });
                row.col(|ui| {
                    ui.with_layout(Layout::right_to_left(eframe::egui::Align::Center), |ui| {
                        ui.label(format_value(r.value));
                    });
                });
            });
        });
}
