use serde::{Deserialize, Serialize};

use super::Table;

/// A ragged in-memory grid of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridTable {
    rows: Vec<Vec<String>>,
    #[serde(default)]
    literal: bool,
}

impl GridTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            literal: false,
        }
    }

    pub fn literal(mut self, literal: bool) -> Self {
        self.literal = literal;
        self
    }

    /// Builds a grid from string slices, mostly for tests.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl Table for GridTable {
    fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
    }

    fn set_cell(&mut self, col: usize, row: usize, contents: String) {
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            cells.resize_with(col + 1, String::new);
        }
        cells[col] = contents;
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    fn is_literal_table(&self) -> bool {
        self.literal
    }

    fn set_not_literal(&mut self) {
        self.literal = false;
    }
}
