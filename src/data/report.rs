use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use super::model::{CellValue, Table};
use crate::error::{ColumnRole, ReportBuildError};

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
    Max,
    Min,
    Count,
    Median,
}

impl Aggregation {
    /// Labels offered in the aggregation dropdown. "Average" is an alias of Mean.
    pub const LABELS: [&'static str; 7] =
        ["Sum", "Mean", "Average", "Max", "Min", "Count", "Median"];

    pub fn label(self) -> &'static str {
        match self {
            Aggregation::Sum => "Sum",
            Aggregation::Mean => "Mean",
            Aggregation::Max => "Max",
            Aggregation::Min => "Min",
            Aggregation::Count => "Count",
            Aggregation::Median => "Median",
        }
    }

    /// Reduce one non-empty partition.
    fn apply(self, values: &mut [f64]) -> f64 {
        let n = values.len() as f64;
        match self {
            Aggregation::Sum => values.iter().sum(),
            Aggregation::Mean => values.iter().sum::<f64>() / n,
            Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregation::Count => n,
            Aggregation::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Aggregation {
    type Err = ReportBuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" | "average" => Ok(Aggregation::Mean),
            "max" => Ok(Aggregation::Max),
            "min" => Ok(Aggregation::Min),
            "count" => Ok(Aggregation::Count),
            "median" => Ok(Aggregation::Median),
            _ => Err(ReportBuildError::UnknownAggregation(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Request / Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub group_column: String,
    pub aggregation: Aggregation,
    pub value_column: String,
}

impl ReportRequest {
    pub fn new(
        group_column: impl Into<String>,
        aggregation: Aggregation,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            group_column: group_column.into(),
            aggregation,
            value_column: value_column.into(),
        }
    }

    /// Build a request from dropdown labels, rejecting unknown aggregations.
    pub fn from_labels(group: &str, aggregation: &str, value: &str) -> Result<Self, ReportBuildError> {
        Ok(Self::new(group.trim(), aggregation.parse()?, value.trim()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub group: String,
    pub value: f64,
}

/// Grouped, aggregated rows sorted by value, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub group_label: String,
    pub value_label: String,
    pub aggregation: Aggregation,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Label used for rows whose group cell is empty.
pub const BLANK_GROUP: &str = "(Blank)";

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Group `request.value_column` by `request.group_column` and aggregate.
///
/// Group keys are trimmed and title-cased, so `"acme corp"` and `" ACME CORP "`
/// share the group `"Acme Corp"`. Value cells that do not parse as numbers are
/// dropped before aggregating. Groups keep first-seen order among equal values.
pub fn build_report(table: &Table, request: &ReportRequest) -> Result<Report, ReportBuildError> {
    let group_col = table
        .column(&request.group_column)
        .ok_or_else(|| ReportBuildError::UnknownColumn {
            role: ColumnRole::Group,
            name: request.group_column.clone(),
        })?;
    let value_col = table
        .column(&request.value_column)
        .ok_or_else(|| ReportBuildError::UnknownColumn {
            role: ColumnRole::Value,
            name: request.value_column.clone(),
        })?;

    if table.row_count() == 0 {
        return Err(ReportBuildError::NoRows);
    }

    let mut partitions: IndexMap<String, Vec<f64>> = IndexMap::new();
    let mut dropped = 0usize;
    for (group_cell, value_cell) in group_col.cells.iter().zip(&value_col.cells) {
        let Some(value) = value_cell.as_number() else {
            dropped += 1;
            continue;
        };
        partitions
            .entry(normalize_group(group_cell))
            .or_default()
            .push(value);
    }

    if dropped > 0 {
        log::warn!(
            "Dropped {dropped} row(s) with non-numeric '{}' values",
            request.value_column
        );
    }

    let mut rows: Vec<ReportRow> = partitions
        .into_iter()
        .map(|(group, mut values)| ReportRow {
            value: request.aggregation.apply(&mut values),
            group,
        })
        .collect();
    // `sort_by` is stable, so ties stay in first-seen order.
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));

    log::info!(
        "Built {} report: {} groups of '{}' by '{}'",
        request.aggregation,
        rows.len(),
        request.value_column,
        request.group_column
    );

    Ok(Report {
        group_label: "Group".to_string(),
        value_label: "Value".to_string(),
        aggregation: request.aggregation,
        rows,
    })
}

fn normalize_group(cell: &CellValue) -> String {
    let titled = title_case(cell.to_string().trim());
    if titled.is_empty() {
        BLANK_GROUP.to_string()
    } else {
        titled
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// A "word" starts at any letter not preceded by another letter, so
/// `"o'neil-smith"` becomes `"O'Neil-Smith"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// Format a value for display with thousands separators and two decimals.
pub fn format_value(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn sales_table() -> Table {
        let regions = ["North", "south", "North", "East", "EAST"];
        let sales = [
            CellValue::Number(100.0),
            text("200"),
            text("bad"),
            CellValue::Number(50.0),
            CellValue::Number(75.0),
        ];
        Table::from_rows(
            vec!["Region".into(), "Sales".into()],
            regions
                .iter()
                .zip(sales)
                .map(|(r, s)| vec![text(r), s])
                .collect(),
        )
    }

    fn pairs(report: &Report) -> Vec<(&str, f64)> {
        report.rows.iter().map(|r| (r.group.as_str(), r.value)).collect()
    }

    fn run(agg: Aggregation) -> Report {
        build_report(&sales_table(), &ReportRequest::new("Region", agg, "Sales")).unwrap()
    }

    #[test]
    fn sum_normalizes_drops_and_sorts() {
        let report = run(Aggregation::Sum);
        assert_eq!(
            pairs(&report),
            vec![("South", 200.0), ("East", 125.0), ("North", 100.0)]
        );
        assert_eq!(report.group_label, "Group");
        assert_eq!(report.value_label, "Value");
    }

    #[test]
    fn sum_matches_total_of_parseable_values() {
        let report = run(Aggregation::Sum);
        let total: f64 = report.rows.iter().map(|r| r.value).sum();
        assert!((total - 425.0).abs() < 1e-9);
    }

    #[test]
    fn count_excludes_unparseable_values() {
        let t = Table::from_rows(
            vec!["Client".into(), "Amount".into()],
            ["1", "x", "2", "", "3"]
                .iter()
                .map(|a| vec![text("acme"), text(a)])
                .collect(),
        );
        let report =
            build_report(&t, &ReportRequest::new("Client", Aggregation::Count, "Amount")).unwrap();
        assert_eq!(pairs(&report), vec![("Acme", 3.0)]);
    }

    #[test]
    fn mean_max_min_median() {
        assert_eq!(
            pairs(&run(Aggregation::Mean)),
            vec![("South", 200.0), ("North", 100.0), ("East", 62.5)]
        );
        assert_eq!(
            pairs(&run(Aggregation::Max)),
            vec![("South", 200.0), ("North", 100.0), ("East", 75.0)]
        );
        assert_eq!(
            pairs(&run(Aggregation::Min)),
            vec![("South", 200.0), ("North", 100.0), ("East", 50.0)]
        );
        assert_eq!(
            pairs(&run(Aggregation::Median)),
            vec![("South", 200.0), ("North", 100.0), ("East", 62.5)]
        );
    }

    #[test]
    fn median_of_odd_partition_is_middle_value() {
        let mut values = vec![9.0, 1.0, 5.0];
        assert_eq!(Aggregation::Median.apply(&mut values), 5.0);
    }

    #[test]
    fn spelling_variants_collapse_into_one_group() {
        let t = Table::from_rows(
            vec!["Client".into(), "Amount".into()],
            ["acme corp", " Acme Corp ", "ACME CORP"]
                .iter()
                .map(|c| vec![text(c), CellValue::Number(1.0)])
                .collect(),
        );
        let report =
            build_report(&t, &ReportRequest::new("Client", Aggregation::Sum, "Amount")).unwrap();
        assert_eq!(pairs(&report), vec![("Acme Corp", 3.0)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let t = Table::from_rows(
            vec!["K".into(), "V".into()],
            ["b", "a", "c", "a"]
                .iter()
                .zip([1.0, 1.0, 5.0, 0.0])
                .map(|(k, v)| vec![text(k), CellValue::Number(v)])
                .collect(),
        );
        let report = build_report(&t, &ReportRequest::new("K", Aggregation::Sum, "V")).unwrap();
        assert_eq!(pairs(&report), vec![("C", 5.0), ("B", 1.0), ("A", 1.0)]);
    }

    #[test]
    fn building_twice_is_identical() {
        assert_eq!(run(Aggregation::Median), run(Aggregation::Median));
    }

    #[test]
    fn rows_are_sorted_descending() {
        for agg in [Aggregation::Sum, Aggregation::Count, Aggregation::Min] {
            let report = run(agg);
            assert!(report.rows.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }

    #[test]
    fn blank_groups_get_a_label() {
        let t = Table::from_rows(
            vec!["K".into(), "V".into()],
            vec![
                vec![CellValue::Missing, CellValue::Number(2.0)],
                vec![text("  "), CellValue::Number(3.0)],
            ],
        );
        let report = build_report(&t, &ReportRequest::new("K", Aggregation::Sum, "V")).unwrap();
        assert_eq!(pairs(&report), vec![(BLANK_GROUP, 5.0)]);
    }

    #[test]
    fn no_surviving_values_is_an_empty_report() {
        let t = Table::from_rows(
            vec!["K".into(), "V".into()],
            vec![vec![text("a"), text("n/a")]],
        );
        let report = build_report(&t, &ReportRequest::new("K", Aggregation::Sum, "V")).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn zero_row_table_is_an_error() {
        let t = Table::from_rows(vec!["K".into(), "V".into()], vec![]);
        assert_eq!(
            build_report(&t, &ReportRequest::new("K", Aggregation::Sum, "V")),
            Err(ReportBuildError::NoRows)
        );
    }

    #[test]
    fn unknown_columns_are_errors() {
        let err = build_report(&sales_table(), &ReportRequest::new("Zone", Aggregation::Sum, "Sales"))
            .unwrap_err();
        assert_eq!(
            err,
            ReportBuildError::UnknownColumn {
                role: ColumnRole::Group,
                name: "Zone".into()
            }
        );
        let err = build_report(&sales_table(), &ReportRequest::new("Region", Aggregation::Sum, "Qty"))
            .unwrap_err();
        assert!(matches!(err, ReportBuildError::UnknownColumn { role: ColumnRole::Value, .. }));
    }

    #[test]
    fn aggregation_labels_parse() {
        for label in Aggregation::LABELS {
            assert!(label.parse::<Aggregation>().is_ok(), "{label}");
        }
        assert_eq!("Average".parse::<Aggregation>(), Ok(Aggregation::Mean));
        assert_eq!(
            ReportRequest::from_labels("Region", "Mode", "Sales"),
            Err(ReportBuildError::UnknownAggregation("Mode".into()))
        );
    }

    #[test]
    fn title_case_handles_word_boundaries() {
        assert_eq!(title_case("acme corp"), "Acme Corp");
        assert_eq!(title_case("o'neil-SMITH"), "O'Neil-Smith");
        assert_eq!(title_case("3rd street"), "3Rd Street");
    }

    #[test]
    fn values_are_formatted_for_display() {
        assert_eq!(format_value(12345.6), "12,345.60");
        assert_eq!(format_value(-1000.0), "-1,000.00");
        assert_eq!(format_value(0.004), "0.00");
        assert_eq!(format_value(999.999), "1,000.00");
    }
}
