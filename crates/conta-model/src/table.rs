use crate::{ConvError, Result};

/// Untyped tabular input exactly as read from a CSV file or worksheet.
///
/// Cells are kept positional so the original column order survives; the
/// normalizer resolves columns by header name against a pattern's mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Original file (or sheet) name, used for pattern matching and logging.
    pub source_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source_name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            source_name: source_name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Resolve a header name to its position. Headers are compared after
    /// trimming; the match is otherwise exact, ambiguity is not tolerated.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name.trim())
    }

    /// Cell accessor tolerant of short rows (exports often drop trailing
    /// empty cells); anything out of range reads as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", |c| c.as_str())
    }

    pub fn row_is_blank(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_none_or(|r| r.iter().all(|c| c.trim().is_empty()))
    }
}

/// Expected value shape of one output column; drives XLSX cell formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    /// Two-decimal monetary amount.
    Money,
    /// Compact `yyyymmdd` date, written as text to match the reference export.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Text,
        }
    }

    pub const fn integer(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Integer,
        }
    }

    pub const fn money(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Money,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            kind: ColumnKind::Date,
        }
    }
}

/// Fixed output schema: exact column order and per-column value kind.
#[derive(Debug, PartialEq, Eq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl OutputSchema {
    pub fn header(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// An ordered sequence of output rows bound to one schema.
///
/// Every row has exactly `schema.width()` cells; missing business data is an
/// explicit empty string, never an absent cell.
#[derive(Debug)]
pub struct OutputTable {
    pub schema: &'static OutputSchema,
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    pub fn new(schema: &'static OutputSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.schema.width() {
            return Err(ConvError::InvalidPattern {
                name: self.schema.name.to_string(),
                reason: format!(
                    "output row has {} cells, schema requires {}",
                    row.len(),
                    self.schema.width()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Row builder that fills cells by column name and defaults the rest to "".
#[derive(Debug)]
pub struct RowBuilder {
    schema: &'static OutputSchema,
    cells: Vec<String>,
}

impl RowBuilder {
    pub fn new(schema: &'static OutputSchema) -> Self {
        Self {
            schema,
            cells: vec![String::new(); schema.width()],
        }
    }

    pub fn set(mut self, column: &str, value: impl Into<String>) -> Self {
        if let Some(idx) = self.schema.columns.iter().position(|c| c.name == column) {
            self.cells[idx] = value.into();
        } else {
            // A typo in a builder call is a programming error in the pattern
            // definitions, not a data problem; fail loudly in debug builds.
            debug_assert!(false, "unknown output column '{column}'");
        }
        self
    }

    pub fn build(self) -> Vec<String> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_SCHEMA: OutputSchema = OutputSchema {
        name: "test",
        columns: &[
            ColumnSpec::text("A"),
            ColumnSpec::money("B"),
            ColumnSpec::text("C"),
        ],
    };

    #[test]
    fn row_builder_defaults_unset_cells_to_empty() {
        let row = RowBuilder::new(&TEST_SCHEMA).set("B", "12.50").build();
        assert_eq!(row, vec!["".to_string(), "12.50".to_string(), String::new()]);
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut table = OutputTable::new(&TEST_SCHEMA);
        assert!(table.push_row(vec!["x".to_string()]).is_err());
        assert!(
            table
                .push_row(vec![String::new(), String::new(), String::new()])
                .is_ok()
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn blank_row_detection_ignores_whitespace() {
        let mut table = RawTable::new("t.csv", vec!["A".to_string()]);
        table.rows.push(vec!["  ".to_string()]);
        table.rows.push(vec!["x".to_string()]);
        assert!(table.row_is_blank(0));
        assert!(!table.row_is_blank(1));
        // Out-of-range rows read as blank.
        assert!(table.row_is_blank(9));
    }
}
