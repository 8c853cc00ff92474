/// Data layer: core types, loading, and the report pipeline.
///
/// Architecture:
/// ```text
///  .csv / .xlsx / .xls
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  Table → ColumnRoles (group keys / value columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  report   │  Table + ReportRequest → Report (sorted groups)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  Report + ChartType → ChartSeries (top N)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Report → .xlsx / .csv, rendered chart → .png
///   └──────────┘
/// ```

pub mod chart;
pub mod classify;
pub mod export;
pub mod loader;
pub mod model;
pub mod report;
