//! The cell grid a table is read from and written back to.
//!
//! The compiler and the evaluator never hold on to a table; every call that
//! needs cells takes the table as an argument.

pub mod grid;
pub mod markup;

pub use grid::GridTable;

/// Cell access for one test table, addressed by `(column, row)`.
pub trait Table {
    fn cell(&self, col: usize, row: usize) -> Option<&str>;
    fn set_cell(&mut self, col: usize, row: usize, contents: String);
    fn row_count(&self) -> usize;
    fn column_count(&self, row: usize) -> usize;
    /// A literal table shows every cell verbatim instead of interpreting it.
    fn is_literal_table(&self) -> bool;
    fn set_not_literal(&mut self);
}
