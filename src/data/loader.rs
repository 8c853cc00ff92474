use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::model::{CellValue, Table};
use crate::error::UnreadableFileError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-delimited text, first row is the header
/// * anything else – spreadsheet workbook (`.xlsx`, `.xls`, `.xlsb`, `.ods`),
///   first sheet, first row is the header
///
/// Either the whole table loads or an [`UnreadableFileError`] carrying the
/// underlying parser message is returned.
pub fn load_file(path: &Path) -> Result<Table, UnreadableFileError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        _ => load_spreadsheet(path),
    }?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.column_count(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Rows shorter than the header are padded with missing cells; rows longer
/// than the header make the file unreadable.
fn load_csv(path: &Path) -> Result<Table, UnreadableFileError> {
    let fail = |msg: String| UnreadableFileError::new(path, msg);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| fail(format!("opening CSV: {e}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| fail(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(fail("no header row found".to_string()));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| fail(format!("CSV row {}: {e}", row_no + 1)))?;

        if record.len() > headers.len() {
            return Err(fail(format!(
                "CSV row {}: expected {} fields, saw {}",
                row_no + 1,
                headers.len(),
                record.len()
            )));
        }
        if record.len() < headers.len() {
            log::warn!(
                "CSV row {} has {} of {} fields; padding with empty cells",
                row_no + 1,
                record.len(),
                headers.len()
            );
        }

        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

/// Plain numbers become [`CellValue::Number`]; formatted ones such as
/// `"12,000"` stay text and are left to the numeric-coercion heuristic.
fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return CellValue::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => CellValue::Number(v),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path) -> Result<Table, UnreadableFileError> {
    let fail = |msg: String| UnreadableFileError::new(path, msg);

    let mut workbook =
        open_workbook_auto(path).map_err(|e| fail(format!("opening workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| fail("workbook has no sheets".to_string()))?
        .map_err(|e| fail(format!("reading first sheet: {e}")))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| fail("first sheet is empty".to_string()))?
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();

    Ok(Table::from_rows(headers, rows))
}

fn spreadsheet_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Missing,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) if s.trim().is_empty() => CellValue::Missing,
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}
