use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// The input file could not be turned into a table.
#[derive(Debug, Error)]
#[error("could not read {}: {message}", path.display())]
pub struct UnreadableFileError {
    pub path: PathBuf,
    pub message: String,
}

impl UnreadableFileError {
    pub fn new(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Which side of a report request a column was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Group,
    Value,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Group => write!(f, "group-by"),
            ColumnRole::Value => write!(f, "value"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ReportBuildError {
    #[error("{role} column '{name}' does not exist in the table")]
    UnknownColumn { role: ColumnRole, name: String },

    #[error("column '{name}' cannot be used as the {role} column")]
    IneligibleColumn { role: ColumnRole, name: String },

    #[error("unknown aggregation '{0}'")]
    UnknownAggregation(String),

    #[error("the table has no rows to aggregate")]
    NoRows,

    #[error("the table has no columns usable as a {0} column")]
    NoEligibleColumns(ColumnRole),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("the report is empty; a chart needs at least one row")]
pub struct EmptyReportError;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidChartDataError {
    #[error("pie charts cannot show negative values ('{label}' is {value})")]
    NegativeSlice { label: String, value: f64 },

    #[error("pie chart values add up to zero")]
    ZeroTotal,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error(transparent)]
    Empty(#[from] EmptyReportError),

    #[error(transparent)]
    InvalidData(#[from] InvalidChartDataError),
}

#[derive(Debug, Error)]
pub enum ExportTargetError {
    #[error("export folder {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("could not write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl ExportTargetError {
    pub fn write(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        ExportTargetError::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session errors
// ---------------------------------------------------------------------------

/// A step that must have happened before an action can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    FileSelected,
    FileRead,
    SelectionsMade,
    ReportBuilt,
    ChartRendered,
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Prerequisite::FileSelected => "Please select a file first.",
            Prerequisite::FileRead => "Please read the file first.",
            Prerequisite::SelectionsMade => {
                "Please select Group By column, Aggregation, and Value column."
            }
            Prerequisite::ReportBuilt => "No report yet. Click 'Preview Report' first.",
            Prerequisite::ChartRendered => "No chart yet. Click 'Preview Chart' first.",
        };
        f.write_str(msg)
    }
}

/// Anything a user-triggered action can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    MissingPrerequisite(Prerequisite),

    #[error(transparent)]
    Unreadable(#[from] UnreadableFileError),

    #[error(transparent)]
    Report(#[from] ReportBuildError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Export(#[from] ExportTargetError),
}
