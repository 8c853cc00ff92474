use super::model::{StorageKind, Table};
use crate::config::Settings;
use crate::error::{ColumnRole, ReportBuildError};
use crate::data::report::{Aggregation, ReportRequest};

// ---------------------------------------------------------------------------
// Column roles: which columns can feed which dropdown
// ---------------------------------------------------------------------------

/// Columns eligible as group keys and as value columns, in table order.
///
/// The two lists may overlap: a text column full of `"1,200"`-style values is
/// both a valid group key (by storage) and a valid value column (by content).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub text_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
}

/// Partition the table's columns into text-like and numeric-like.
pub fn classify_columns(table: &Table, settings: &Settings) -> ColumnRoles {
    let threshold = settings.numeric_threshold(table.row_count());
    let mut roles = ColumnRoles::default();

    for col in table.columns() {
        match col.storage_kind() {
            StorageKind::Numeric => roles.numeric_columns.push(col.name.clone()),
            StorageKind::Text => {
                roles.text_columns.push(col.name.clone());
                let parseable = col.cells.iter().filter_map(|c| c.as_number()).count();
                if parseable >= threshold {
                    log::debug!(
                        "Column '{}' is numeric-looking text ({parseable}/{} cells parse)",
                        col.name,
                        table.row_count()
                    );
                    roles.numeric_columns.push(col.name.clone());
                }
            }
        }
    }

    roles
}

impl ColumnRoles {
    pub fn is_text(&self, name: &str) -> bool {
        self.text_columns.iter().any(|c| c == name)
    }

    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == name)
    }

    /// First text column, first numeric column, `Sum`.
    ///
    /// A table without a usable column on either side is reported as
    /// [`ReportBuildError::NoEligibleColumns`] instead of an empty pick.
    pub fn default_request(&self) -> Result<ReportRequest, ReportBuildError> {
        let group = self
            .text_columns
            .first()
            .ok_or(ReportBuildError::NoEligibleColumns(ColumnRole::Group))?;
        let value = self
            .numeric_columns
            .first()
            .ok_or(ReportBuildError::NoEligibleColumns(ColumnRole::Value))?;
        Ok(ReportRequest::new(group.clone(), Aggregation::Sum, value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(headers: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[test]
    fn numeric_storage_and_numeric_looking_text() {
        let t = table(
            &["Region", "Units", "Revenue"],
            vec![
                vec![text("North"), CellValue::Number(1.0), text("1,000")],
                vec![text("South"), CellValue::Number(2.0), text("2,500")],
                vec![text("East"), CellValue::Number(3.0), text("n/a")],
                vec![text("West"), CellValue::Missing, text("700")],
                vec![text("North"), CellValue::Number(5.0), text("12,000")],
            ],
        );
        let roles = classify_columns(&t, &Settings::default());
        assert_eq!(roles.text_columns, vec!["Region", "Revenue"]);
        assert_eq!(roles.numeric_columns, vec!["Units", "Revenue"]);
        assert!(roles.is_text("Revenue") && roles.is_numeric("Revenue"));
    }

    #[test]
    fn small_tables_never_promote_text_columns() {
        // Two parseable cells can never reach the minimum of three.
        let t = table(&["Code"], vec![vec![text("1")], vec![text("2,0")]]);
        let roles = classify_columns(&t, &Settings::default());
        assert!(roles.numeric_columns.is_empty());
    }

    #[test]
    fn ratio_is_configurable() {
        let rows = vec![
            vec![text("1")],
            vec![text("2")],
            vec![text("3")],
            vec![text("x")],
            vec![text("y")],
        ];
        let t = table(&["Mixed"], rows);

        let strict = Settings {
            numeric_match_ratio: 0.8,
            ..Settings::default()
        };
        assert!(classify_columns(&t, &strict).numeric_columns.is_empty());
        assert_eq!(
            classify_columns(&t, &Settings::default()).numeric_columns,
            vec!["Mixed"]
        );
    }

    #[test]
    fn default_request_picks_first_of_each() {
        let roles = ColumnRoles {
            text_columns: vec!["Region".into(), "Rep".into()],
            numeric_columns: vec!["Sales".into(), "Units".into()],
        };
        let req = roles.default_request().unwrap();
        assert_eq!(req.group_column, "Region");
        assert_eq!(req.value_column, "Sales");
        assert_eq!(req.aggregation, Aggregation::Sum);
    }

    #[test]
    fn no_eligible_columns_is_distinct() {
        let only_numbers = ColumnRoles {
            text_columns: vec![],
            numeric_columns: vec!["Sales".into()],
        };
        assert_eq!(
            only_numbers.default_request(),
            Err(ReportBuildError::NoEligibleColumns(ColumnRole::Group))
        );

        let only_text = ColumnRoles {
            text_columns: vec!["Region".into()],
            numeric_columns: vec![],
        };
        assert_eq!(
            only_text.default_request(),
            Err(ReportBuildError::NoEligibleColumns(ColumnRole::Value))
        );
    }
}
