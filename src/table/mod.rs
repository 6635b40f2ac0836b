//! In-memory tables loaded from whitespace-delimited trace files.

pub mod parse;
pub mod scalar;

pub use parse::{load_table, parse_table};
pub use scalar::Scalar;

/// Header plus rows; every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep the leading `n` rows; no-op if the table is already shorter.
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Scalar> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
