use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::config::Settings;
use crate::data::chart::{derive_chart, ChartSeries, ChartType};
use crate::data::classify::{classify_columns, ColumnRoles};
use crate::data::export::{self, ReportFormat};
use crate::data::loader::load_file;
use crate::data::model::{Table, TableSummary};
use crate::data::report::{build_report, Report, ReportRequest};
use crate::error::{ColumnRole, ExportTargetError, Prerequisite, ReportBuildError, SessionError};

// ---------------------------------------------------------------------------
// Session: the current file, table, report and chart
// ---------------------------------------------------------------------------

/// Everything one user action needs from the previous ones.
///
/// Each action checks its prerequisites first and replaces its own output
/// wholesale: reading a file drops the old report and chart, building a
/// report drops the old chart.
#[derive(Debug, Default)]
pub struct Session {
    pub settings: Settings,
    selected_path: Option<PathBuf>,
    loaded_path: Option<PathBuf>,
    table: Option<Table>,
    roles: ColumnRoles,
    report: Option<Report>,
    chart: Option<ChartSeries>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Remember the file chosen in the file picker. Nothing is read yet.
    pub fn select_file(&mut self, path: impl Into<PathBuf>) {
        self.selected_path = Some(path.into());
    }

    pub fn selected_path(&self) -> Option<&Path> {
        self.selected_path.as_deref()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn chart(&self) -> Option<&ChartSeries> {
        self.chart.as_ref()
    }

    /// Load the selected file and classify its columns.
    ///
    /// On failure the previously loaded table, if any, is kept.
    pub fn read_file(&mut self) -> Result<TableSummary, SessionError> {
        let path = self
            .selected_path
            .clone()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::FileSelected))?;

        let table = load_file(&path)?;
        let roles = classify_columns(&table, &self.settings);
        let summary = table.summary();

        log::info!(
            "Classified columns: text {:?}, numeric {:?}",
            roles.text_columns,
            roles.numeric_columns
        );

        self.table = Some(table);
        self.roles = roles;
        self.loaded_path = Some(path);
        self.report = None;
        self.chart = None;
        Ok(summary)
    }

    /// The request pre-selected after a successful read.
    pub fn default_request(&self) -> Result<ReportRequest, SessionError> {
        self.require_table()?;
        Ok(self.roles.default_request()?)
    }

    /// Build a report from raw dropdown selections.
    pub fn preview_report_from_labels(
        &mut self,
        group: &str,
        aggregation: &str,
        value: &str,
    ) -> Result<&Report, SessionError> {
        self.require_table()?;
        if [group, aggregation, value].iter().any(|s| s.trim().is_empty()) {
            return Err(SessionError::MissingPrerequisite(Prerequisite::SelectionsMade));
        }
        let request = ReportRequest::from_labels(group, aggregation, value)?;
        self.preview_report(&request)
    }

    /// Build a report, replacing the previous report and chart.
    pub fn preview_report(&mut self, request: &ReportRequest) -> Result<&Report, SessionError> {
        let table = self
            .table
            .as_ref()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::FileRead))?;
        self.report = None;
        self.chart = None;

        check_role(table, &self.roles, ColumnRole::Group, &request.group_column)?;
        check_role(table, &self.roles, ColumnRole::Value, &request.value_column)?;

        let report = build_report(table, request)?;
        Ok(self.report.insert(report))
    }

    /// Derive the chart series for the current report.
    pub fn preview_chart(&mut self, chart_type: ChartType) -> Result<&ChartSeries, SessionError> {
        let report = self
            .report
            .as_ref()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::ReportBuilt))?;
        self.chart = None;
        let series = derive_chart(report, chart_type, &self.settings)?;
        Ok(self.chart.insert(series))
    }

    /// Write the current report next to the input file.
    pub fn export_report(&self, format: ReportFormat) -> Result<PathBuf, SessionError> {
        let report = self
            .report
            .as_ref()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::ReportBuilt))?;
        let dir = self.export_dir()?;
        Ok(export::export_report(
            report,
            format,
            &dir,
            &self.settings.report_base_name,
        )?)
    }

    /// Write the rendered image of the current chart next to the input file.
    pub fn export_chart(&self, image: &RgbaImage) -> Result<PathBuf, SessionError> {
        if self.chart.is_none() {
            return Err(SessionError::MissingPrerequisite(Prerequisite::ChartRendered));
        }
        let dir = self.export_dir()?;
        Ok(export::export_chart(image, &dir, &self.settings.chart_base_name)?)
    }

    fn require_table(&self) -> Result<&Table, SessionError> {
        self.table
            .as_ref()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::FileRead))
    }

    fn export_dir(&self) -> Result<PathBuf, SessionError> {
        let input = self
            .loaded_path
            .as_deref()
            .ok_or(SessionError::MissingPrerequisite(Prerequisite::FileRead))?;
        export::input_folder(input)
            .ok_or_else(|| ExportTargetError::MissingDirectory(input.to_path_buf()).into())
    }
}

/// Columns that exist but were not offered for `role` are rejected; columns
/// that do not exist at all are left for the report builder to report.
fn check_role(
    table: &Table,
    roles: &ColumnRoles,
    role: ColumnRole,
    name: &str,
) -> Result<(), ReportBuildError> {
    let eligible = match role {
        ColumnRole::Group => roles.is_text(name),
        ColumnRole::Value => roles.is_numeric(name),
    };
    if table.column(name).is_some() && !eligible {
        return Err(ReportBuildError::IneligibleColumn {
            role,
            name: name.to_string(),
        });
    }
    Ok(())
}
