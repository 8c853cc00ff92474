use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it came out of the file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // Whole numbers print without a trailing ".0" so "2024" stays "2024".
            CellValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl CellValue {
    /// Narrow the cell to a number, if it holds or spells one.
    ///
    /// Text is trimmed and stripped of `,` thousands separators, then parsed
    /// with the grammar `[+-]? digits [. digits] [e[+-]digits]`. Infinities,
    /// `NaN` and anything else that does not parse yield `None`, which
    /// callers treat as missing rather than zero.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Number(_) | CellValue::Missing => None,
            CellValue::Text(s) => parse_number(s),
        }
    }
}

/// Parse a human-written number such as `" 12,000.50 "`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Column / Table
// ---------------------------------------------------------------------------

/// How a column's values are stored after loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Every present cell is a number (an all-empty column counts too).
    Numeric,
    /// At least one cell is text.
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn storage_kind(&self) -> StorageKind {
        if self.cells.iter().any(|c| matches!(c, CellValue::Text(_))) {
            StorageKind::Text
        } else {
            StorageKind::Numeric
        }
    }
}

/// An immutable, column-major table with unique column names in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from header names and rows of cells.
    ///
    /// Short rows are padded with [`CellValue::Missing`]; cells beyond the
    /// header width are ignored. Header names are made unique the way
    /// spreadsheet tools do it: blanks become `Unnamed: <idx>` and repeats
    /// get a `.1`, `.2`, … suffix.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let names = unique_headers(headers);
        let row_count = rows.len();
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(row_count)))
            .collect();

        for mut row in rows {
            row.resize(columns.len(), CellValue::Missing);
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }

        Table { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            rows: self.row_count,
            columns: self.column_count(),
            headings: self.column_names(),
        }
    }
}

fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.into_iter().enumerate() {
        let base = match raw.trim() {
            "" => format!("Unnamed: {idx}"),
            trimmed => trimmed.to_string(),
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.push(name);
    }
    seen
}

// ---------------------------------------------------------------------------
// TableSummary – what the UI shows after "Read"
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub headings: Vec<String>,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows: {}", self.rows)?;
        writeln!(f, "Columns: {}", self.columns)?;
        write!(f, "Column Headings:")?;
        for h in &self.headings {
            write!(f, "\n- {h}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(text("12,000").as_number(), Some(12000.0));
        assert_eq!(text("  -1,234.5 ").as_number(), Some(-1234.5));
        assert_eq!(text("+7").as_number(), Some(7.0));
    }

    #[test]
    fn garbage_is_missing_not_zero() {
        assert_eq!(text("abc").as_number(), None);
        assert_eq!(text("").as_number(), None);
        assert_eq!(text(",").as_number(), None);
        assert_eq!(text("inf").as_number(), None);
        assert_eq!(text("NaN").as_number(), None);
        assert_eq!(CellValue::Missing.as_number(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(2024.0).to_string(), "2024");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Missing.to_string(), "");
    }

    #[test]
    fn storage_kind_follows_cells() {
        let numeric = Column::new("n", vec![CellValue::Number(1.0), CellValue::Missing]);
        let mixed = Column::new("m", vec![CellValue::Number(1.0), text("x")]);
        assert_eq!(numeric.storage_kind(), StorageKind::Numeric);
        assert_eq!(mixed.storage_kind(), StorageKind::Text);
    }

    #[test]
    fn from_rows_pads_and_dedups() {
        let table = Table::from_rows(
            vec!["a".into(), "".into(), "a".into()],
            vec![vec![text("x")], vec![text("y"), CellValue::Number(2.0), text("z")]],
        );
        assert_eq!(table.column_names(), vec!["a", "Unnamed: 1", "a.1"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[1].cells, vec![CellValue::Missing, CellValue::Number(2.0)]);
    }

    #[test]
    fn summary_lists_headings() {
        let table = Table::from_rows(vec!["Region".into(), "Sales".into()], vec![]);
        assert_eq!(
            table.summary().to_string(),
            "Rows: 0\nColumns: 2\nColumn Headings:\n- Region\n- Sales"
        );
    }
}
