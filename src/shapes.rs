//! Table shapes decide which instructions a table turns into.
//!
//! [`SlimTable`] pairs a shape with the compiler of one table instance and
//! owns the two phases: append every instruction, then (once the executor
//! has answered) evaluate every expectation.

use tracing::warn;

use crate::compiler::TableCompiler;
use crate::errors::{Result, SlimError};
use crate::expectation::EvaluationReport;
use crate::instruction::{Instruction, ResultMap};
use crate::symbols::SymbolTable;
use crate::table::Table;
use crate::verdict;

pub mod decision;

pub use decision::DecisionTable;

pub trait TableShape {
    /// Prefix of every tag this shape's tables produce.
    fn table_type(&self) -> &str;

    fn append_instructions(
        &mut self,
        compiler: &mut TableCompiler,
        table: &dyn Table,
        symbols: &dyn SymbolTable,
    ) -> Result<()>;

    /// Runs after the expectations, for results that are not judged but used,
    /// such as symbol assignments.
    fn evaluate_return_values(
        &mut self,
        _compiler: &TableCompiler,
        _table: &mut dyn Table,
        _results: &ResultMap,
        _symbols: &mut dyn SymbolTable,
        _report: &mut EvaluationReport,
    ) {
    }
}

impl<T: TableShape + ?Sized> TableShape for Box<T> {
    fn table_type(&self) -> &str {
        (**self).table_type()
    }

    fn append_instructions(
        &mut self,
        compiler: &mut TableCompiler,
        table: &dyn Table,
        symbols: &dyn SymbolTable,
    ) -> Result<()> {
        (**self).append_instructions(compiler, table, symbols)
    }

    fn evaluate_return_values(
        &mut self,
        compiler: &TableCompiler,
        table: &mut dyn Table,
        results: &ResultMap,
        symbols: &mut dyn SymbolTable,
        report: &mut EvaluationReport,
    ) {
        (**self).evaluate_return_values(compiler, table, results, symbols, report)
    }
}

/// Picks a shape from the type part of a header cell (`decisionTable:Foo`).
pub fn shape_for(header: &str) -> Result<Box<dyn TableShape>> {
    let table_type = header.split(crate::compiler::HEADER_SEPARATOR).next().unwrap_or_default();
    match table_type.trim() {
        "decisionTable" | "dt" => Ok(Box::new(DecisionTable::new())),
        other => Err(SlimError::syntax(format!("unknown table type '{}'", other))),
    }
}

pub struct SlimTable<S> {
    shape: S,
    compiler: TableCompiler,
}

impl<S: TableShape> SlimTable<S> {
    pub fn new(shape: S, id: &str, table: &dyn Table) -> Self {
        let compiler = TableCompiler::new(shape.table_type(), id, table);
        Self { shape, compiler }
    }

    pub fn compiler(&self) -> &TableCompiler {
        &self.compiler
    }

    pub fn instructions(&self) -> &[Instruction] {
        self.compiler.instructions()
    }

    /// Appends all of the table's instructions.
    ///
    /// A malformed table does not fail the caller: cell `(0,0)` is replaced
    /// by a failure diagnostic and whatever was appended so far stays. Only a
    /// [`SlimError::Syntax`] is returned.
    pub fn append_instructions(
        &mut self,
        table: &mut dyn Table,
        symbols: &dyn SymbolTable,
    ) -> Result<()> {
        match self
            .shape
            .append_instructions(&mut self.compiler, table, symbols)
        {
            Ok(()) => Ok(()),
            Err(e) if e.is_syntax() => Err(e),
            Err(e) => {
                warn!(table = self.compiler.table_name(), error = %e, "bad table");
                report_bad_table(table, &e);
                Ok(())
            }
        }
    }

    pub fn evaluate_expectations(
        &mut self,
        table: &mut dyn Table,
        results: &ResultMap,
        symbols: &mut dyn SymbolTable,
    ) -> EvaluationReport {
        let mut report = self.compiler.evaluate_expectations(table, results, &*symbols);
        self.shape
            .evaluate_return_values(&self.compiler, table, results, symbols, &mut report);
        report
    }
}

/// Overwrites the header cell with `!style_fail(!-<header>: Bad table: <detail>-!)`.
pub fn report_bad_table(table: &mut dyn Table, error: &SlimError) {
    let header = table.cell(0, 0).unwrap_or_default().to_string();
    let detail = match error {
        SlimError::BadTable { reason, .. } => reason.clone(),
        other => other.to_string(),
    };
    let diagnostic = verdict::literal(&format!("{}: Bad table: {}", header, detail));
    table.set_cell(0, 0, verdict::fail(&diagnostic));
}
