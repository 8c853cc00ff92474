use std::path::PathBuf;

use image::RgbaImage;

use crate::config::Settings;
use crate::data::chart::ChartType;
use crate::data::export::ReportFormat;
use crate::error::{Prerequisite, SessionError};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A message for the status line.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded file, table, report and chart.
    pub session: Session,

    /// Dropdown selections, kept as raw labels until "Preview Report".
    pub group_column: String,
    pub aggregation: String,
    pub value_column: String,

    pub chart_type: ChartType,
    pub export_format: ReportFormat,

    /// Text of the "File Info" box.
    pub info_text: String,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,

    /// Set when "Export Chart" was clicked and a screenshot is on its way.
    pub chart_export_pending: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            session: Session::new(settings),
            group_column: String::new(),
            aggregation: String::new(),
            value_column: String::new(),
            chart_type: ChartType::default(),
            export_format: ReportFormat::default(),
            info_text: String::new(),
            status: None,
            chart_export_pending: false,
        }
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.session.select_file(path);
        self.status = None;
    }

    /// "Read": load the file, show its summary and preselect the dropdowns.
    pub fn read_file(&mut self) {
        let summary = match self.session.read_file() {
            Ok(summary) => summary,
            Err(e) => return self.fail("Read Error", e),
        };
        self.info_text = summary.to_string();

        let roles = self.session.roles();
        self.group_column = roles.text_columns.first().cloned().unwrap_or_default();
        self.value_column = roles.numeric_columns.first().cloned().unwrap_or_default();
        self.aggregation = "Sum".to_string();

        // A file without group or value columns still loads; say which side is missing.
        match self.session.default_request() {
            Ok(_) => self.info("File read successfully. Now select columns and preview report."),
            Err(e) => self.fail("Read Warning", e),
        }
    }

    /// "Preview Report".
    pub fn preview_report(&mut self) {
        let result = self
            .session
            .preview_report_from_labels(&self.group_column, &self.aggregation, &self.value_column)
            .map(|report| report.len());
        match result {
            Ok(0) => self.info("No rows had a numeric value; the report is empty."),
            Ok(n) => self.info(&format!("Report built with {n} groups.")),
            Err(e) => self.fail("Report Error", e),
        }
    }

    /// "Preview Chart".
    pub fn preview_chart(&mut self) {
        if let Err(e) = self.session.preview_chart(self.chart_type) {
            self.fail("Chart Error", e);
        } else {
            self.status = None;
        }
    }

    /// "Export Report".
    pub fn export_report(&mut self) {
        match self.session.export_report(self.export_format) {
            Ok(path) => self.info(&format!("Report exported successfully: {}", path.display())),
            Err(e) => self.fail("Export Error", e),
        }
    }

    /// "Export Chart (PNG)": the capture itself happens on the next frame.
    pub fn request_chart_export(&mut self) {
        if self.session.chart().is_none() {
            let err = SessionError::MissingPrerequisite(Prerequisite::ChartRendered);
            return self.fail("Export Error", err);
        }
        self.chart_export_pending = true;
    }

    /// Called with the captured chart pixels.
    pub fn finish_chart_export(&mut self, image: &RgbaImage) {
        self.chart_export_pending = false;
        match self.session.export_chart(image) {
            Ok(path) => self.info(&format!("Chart exported successfully: {}", path.display())),
            Err(e) => self.fail("Export Error", e),
        }
    }

    fn info(&mut self, msg: &str) {
        self.status = Some(Status::Info(msg.to_string()));
    }

    fn fail(&mut self, title: &str, err: SessionError) {
        log::error!("{title}: {err}");
        self.status = Some(Status::Error(format!("{title}: {err}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_then_preview_fills_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "Rep,Region,Sales\nAnn,west,\"1,000\"\nBo,West,500\nCy,east,250\n")
            .unwrap();

        let mut state = AppState::default();
        state.select_file(path);
        state.read_file();
        assert_eq!(state.group_column, "Rep");
        assert_eq!(state.value_column, "Sales");
        assert!(state.info_text.starts_with("Rows: 3\nColumns: 3"));

        state.group_column = "Region".into();
        state.preview_report();
        assert_eq!(state.status, Some(Status::Info("Report built with 2 groups.".into())));
        let report = state.session.report().unwrap();
        assert_eq!(report.rows[0].group, "West");
        assert_eq!(report.rows[0].value, 1500.0);
    }

    #[test]
    fn preview_without_read_sets_error_status() {
        let mut state = AppState::default();
        state.preview_report();
        match &state.status {
            Some(Status::Error(msg)) => assert!(msg.contains("read the file")),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn chart_export_needs_a_chart() {
        let mut state = AppState::default();
        state.request_chart_export();
        assert!(!state.chart_export_pending);
        assert!(matches!(state.status, Some(Status::Error(_))));
    }
}
