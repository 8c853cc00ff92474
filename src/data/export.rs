use std::fmt;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use rust_xlsxwriter::Workbook;

use super::report::Report;
use crate::error::ExportTargetError;

// ---------------------------------------------------------------------------
// Report export
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 2] = [ReportFormat::Xlsx, ReportFormat::Csv];

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Xlsx => write!(f, "Excel (.xlsx)"),
            ReportFormat::Csv => write!(f, "CSV (.csv)"),
        }
    }
}

/// Write `report` as `<dest_dir>/<base_name>.<ext>`, replacing any existing file.
///
/// The header row is `Group` followed by the aggregation label.
pub fn export_report(
    report: &Report,
    format: ReportFormat,
    dest_dir: &Path,
    base_name: &str,
) -> Result<PathBuf, ExportTargetError> {
    let out_path = target_path(dest_dir, base_name, format.extension())?;
    let header = [report.group_label.as_str(), report.aggregation.label()];

    match format {
        ReportFormat::Csv => write_csv(report, &header, &out_path),
        ReportFormat::Xlsx => write_xlsx(report, &header, &out_path),
    }
    .map_err(|msg| ExportTargetError::write(&out_path, msg))?;

    log::info!("Exported {} report rows to {}", report.len(), out_path.display());
    Ok(out_path)
}

fn write_csv(report: &Report, header: &[&str; 2], path: &Path) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer.write_record(header).map_err(|e| e.to_string())?;
    for row in &report.rows {
        let value = row.value.to_string();
        writer
            .write_record([row.group.as_str(), value.as_str()])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())
}

fn write_xlsx(report: &Report, header: &[&str; 2], path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Report").map_err(|e| e.to_string())?;

    for (col, title) in header.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .map_err(|e| e.to_string())?;
    }
    for (i, row) in report.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, &row.group).map_err(|e| e.to_string())?;
        sheet.write_number(r, 1, row.value).map_err(|e| e.to_string())?;
    }

    workbook.save(path).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Chart export
// ---------------------------------------------------------------------------

/// Save a rendered chart as `<dest_dir>/<base_name>.png`, replacing any existing file.
pub fn export_chart(
    image: &RgbaImage,
    dest_dir: &Path,
    base_name: &str,
) -> Result<PathBuf, ExportTargetError> {
    let out_path = target_path(dest_dir, base_name, "png")?;
    image
        .save_with_format(&out_path, image::ImageFormat::Png)
        .map_err(|e| ExportTargetError::write(&out_path, e))?;

    log::info!(
        "Exported {}x{} chart to {}",
        image.width(),
        image.height(),
        out_path.display()
    );
    Ok(out_path)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Absolute folder containing `input`, where exports are written.
pub fn input_folder(input: &Path) -> Option<PathBuf> {
    let absolute = if input.is_absolute() {
        input.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(input)
    };
    absolute.parent().map(Path::to_path_buf)
}

fn target_path(dest_dir: &Path, base_name: &str, ext: &str) -> Result<PathBuf, ExportTargetError> {
    if !dest_dir.is_dir() {
        return Err(ExportTargetError::MissingDirectory(dest_dir.to_path_buf()));
    }
    Ok(dest_dir.join(format!("{base_name}.{ext}")))
}
