use std::fmt;

use super::report::Report;
use crate::config::Settings;
use crate::error::{ChartError, EmptyReportError, InvalidChartDataError};

// ---------------------------------------------------------------------------
// Chart types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartType {
    /// Horizontal bars, largest at the top.
    #[default]
    Bar,
    /// Vertical bars, largest on the left.
    Column,
    /// One point per group, joined in report order. Not a time series.
    Line,
    Pie,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [ChartType::Bar, ChartType::Column, ChartType::Pie, ChartType::Line];
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartType::Bar => "Bar",
            ChartType::Column => "Column",
            ChartType::Line => "Line",
            ChartType::Pie => "Pie",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// ChartSeries – plot-ready labels and values
// ---------------------------------------------------------------------------

/// Labels and values in the order they should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
    /// Axis captions, taken from the report's column labels.
    pub group_label: String,
    pub value_label: String,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Percentage of the total for each value (pie slice captions).
    pub fn shares(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        if total == 0.0 {
            return vec![0.0; self.values.len()];
        }
        self.values.iter().map(|v| v / total * 100.0).collect()
    }
}

/// Turn a report into a plot series for `chart_type`.
///
/// Only the top rows are kept: `settings.chart_top_n` (10 by default) for
/// bar, column and line charts and `settings.pie_top_n` (6) for pies. These
/// are readability limits. Bar charts are reversed so that a renderer drawing
/// the first category at the bottom puts the largest bar on top.
pub fn derive_chart(
    report: &Report,
    chart_type: ChartType,
    settings: &Settings,
) -> Result<ChartSeries, ChartError> {
    if report.is_empty() {
        return Err(EmptyReportError.into());
    }

    let keep = match chart_type {
        ChartType::Pie => settings.pie_top_n,
        _ => settings.chart_top_n,
    };
    let top = &report.rows[..keep.min(report.len())];

    let mut labels: Vec<String> = top.iter().map(|r| r.group.clone()).collect();
    let mut values: Vec<f64> = top.iter().map(|r| r.value).collect();

    match chart_type {
        ChartType::Bar => {
            labels.reverse();
            values.reverse();
        }
        ChartType::Pie => check_pie_values(&labels, &values)?,
        ChartType::Column | ChartType::Line => {}
    }

    log::info!("Derived {chart_type} chart with {} of {} groups", values.len(), report.len());

    Ok(ChartSeries {
        chart_type,
        title: format!(
            "{chart_type} Chart: {} by {}",
            report.value_label, report.group_label
        ),
        labels,
        values,
        group_label: report.group_label.clone(),
        value_label: report.value_label.clone(),
    })
}

fn check_pie_values(labels: &[String], values: &[f64]) -> Result<(), InvalidChartDataError> {
    if let Some((label, &value)) = labels.iter().zip(values).find(|(_, v)| **v < 0.0) {
        return Err(InvalidChartDataError::NegativeSlice {
            label: label.clone(),
            value,
        });
    }
    if values.iter().sum::<f64>() == 0.0 {
        return Err(InvalidChartDataError::ZeroTotal);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::report::{Aggregation, ReportRow};

    fn report(rows: &[(&str, f64)]) -> Report {
        Report {
            group_label: "Group".into(),
            value_label: "Value".into(),
            aggregation: Aggregation::Sum,
            rows: rows
                .iter()
                .map(|(g, v)| ReportRow {
                    group: g.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    fn derive(r: &Report, t: ChartType) -> Result<ChartSeries, ChartError> {
        derive_chart(r, t, &Settings::default())
    }

    #[test]
    fn truncates_to_ten_or_six() {
        let names: Vec<String> = (0..15).map(|i| format!("G{i}")).collect();
        let rows: Vec<(&str, f64)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), (15 - i) as f64))
            .collect();
        let r = report(&rows);

        for t in [ChartType::Bar, ChartType::Column, ChartType::Line] {
            let series = derive(&r, t).unwrap();
            assert_eq!(series.labels.len(), 10, "{t}");
            assert_eq!(series.values.len(), 10, "{t}");
        }
        let pie = derive(&r, ChartType::Pie).unwrap();
        assert_eq!(pie.len(), 6);
        assert_eq!(pie.labels[0], "G0");
    }

    #[test]
    fn bar_is_reversed_column_is_not() {
        let r = report(&[("A", 30.0), ("B", 20.0), ("C", 10.0)]);

        let bar = derive(&r, ChartType::Bar).unwrap();
        assert_eq!(bar.labels, vec!["C", "B", "A"]);
        assert_eq!(bar.values, vec![10.0, 20.0, 30.0]);

        let column = derive(&r, ChartType::Column).unwrap();
        assert_eq!(column.labels, vec!["A", "B", "C"]);

        let line = derive(&r, ChartType::Line).unwrap();
        assert_eq!(line.labels, vec!["A", "B", "C"]);
    }

    #[test]
    fn title_uses_report_labels() {
        let r = report(&[("A", 1.0)]);
        assert_eq!(derive(&r, ChartType::Pie).unwrap().title, "Pie Chart: Value by Group");
        assert_eq!(derive(&r, ChartType::Bar).unwrap().title, "Bar Chart: Value by Group");
    }

    #[test]
    fn empty_report_cannot_be_charted() {
        let r = report(&[]);
        assert_eq!(
            derive(&r, ChartType::Bar),
            Err(ChartError::Empty(EmptyReportError))
        );
    }

    #[test]
    fn pie_rejects_negative_and_zero_total() {
        let negative = report(&[("A", 5.0), ("B", -1.0)]);
        assert!(matches!(
            derive(&negative, ChartType::Pie),
            Err(ChartError::InvalidData(InvalidChartDataError::NegativeSlice { .. }))
        ));
        // Bars handle negatives fine.
        assert!(derive(&negative, ChartType::Bar).is_ok());

        let zeros = report(&[("A", 0.0), ("B", 0.0)]);
        assert_eq!(
            derive(&zeros, ChartType::Pie),
            Err(ChartError::InvalidData(InvalidChartDataError::ZeroTotal))
        );
    }

    #[test]
    fn pie_shares_add_up() {
        let r = report(&[("A", 3.0), ("B", 1.0)]);
        let shares = derive(&r, ChartType::Pie).unwrap().shares();
        assert_eq!(shares, vec![75.0, 25.0]);
    }
}
