use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::chart::ChartType;
use crate::data::export::ReportFormat;
use crate::data::report::Aggregation;
use crate::state::{AppState, Status};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the file row: browse, read, selected file and status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Rusty Report");
        ui.separator();

        ui.label("Select CSV/Excel:");
        if ui.button("Browse").clicked() {
            open_file_dialog(state);
        }
        if ui.button("Read").clicked() {
            state.read_file();
        }

        let file_label = state
            .session
            .selected_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No file selected".to_string());
        ui.label(RichText::new(file_label).color(Color32::LIGHT_BLUE));

        ui.separator();

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(RichText::new(msg).color(Color32::GREEN));
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – file info, report builder, chart builder
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            file_info(ui, state);
            ui.add_space(8.0);
            report_builder(ui, state);
            ui.add_space(8.0);
            chart_builder(ui, state);
        });
}

fn file_info(ui: &mut Ui, state: &AppState) {
    ui.strong("File Info");
    ui.separator();
    if state.info_text.is_empty() {
        ui.label("No file read yet.");
    } else {
        ui.label(RichText::new(&state.info_text).monospace());
    }
}

fn report_builder(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Build Report (GroupBy + Aggregation)");
    ui.separator();

    let loaded = state.session.table().is_some();
    ui.add_enabled_ui(loaded, |ui: &mut Ui| {
        let text_columns = state.session.roles().text_columns.clone();
        let numeric_columns = state.session.roles().numeric_columns.clone();

        ui.label("Group By (Text column):");
        string_combo(ui, "group_by", &mut state.group_column, &text_columns);

        ui.label("Aggregation:");
        let labels: Vec<String> = Aggregation::LABELS.iter().map(|s| s.to_string()).collect();
        string_combo(ui, "aggregation", &mut state.aggregation, &labels);

        ui.label("Value (Numeric column):");
        string_combo(ui, "value_column", &mut state.value_column, &numeric_columns);

        ui.add_space(4.0);
        if ui.button("Preview Report").clicked() {
            state.preview_report();
        }
    });

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Export as:");
        egui::ComboBox::from_id_salt("export_format")
            .selected_text(state.export_format.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for fmt in ReportFormat::ALL {
                    ui.selectable_value(&mut state.export_format, fmt, fmt.to_string());
                }
            });
    });
    if ui.button("Export Report").clicked() {
        state.export_report();
    }
}

fn chart_builder(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Chart Builder");
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Chart Type:");
        egui::ComboBox::from_id_salt("chart_type")
            .selected_text(state.chart_type.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for t in ChartType::ALL {
                    ui.selectable_value(&mut state.chart_type, t, t.to_string());
                }
            });
    });

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Preview Chart").clicked() {
            state.preview_chart();
        }
        if ui.button("Export Chart (PNG)").clicked() {
            state.request_chart_export();
            if state.chart_export_pending {
                ui.ctx()
                    .send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
        }
    });
}

fn string_combo(ui: &mut Ui, id: &str, selected: &mut String, options: &[String]) {
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(selected.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in options {
                ui.selectable_value(selected, opt.clone(), opt.as_str());
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select a CSV or Excel file")
        .add_filter("Supported files", &["csv", "xlsx", "xls"])
        .add_filter("CSV Files", &["csv"])
        .add_filter("Excel Files", &["xlsx", "xls"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Selected {}", path.display());
        state.select_file(path);
    }
}
