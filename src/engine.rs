//! Whole-document pipeline: pipe text in, instruction batch out, and after
//! the executor has run, annotated pipe text back.

use crate::config::SlimConfig;
use crate::errors::Result;
use crate::expectation::EvaluationReport;
use crate::instruction::{Instruction, ResultMap};
use crate::shapes::{shape_for, SlimTable, TableShape};
use crate::symbols::SymbolTable;
use crate::table::markup::{parse_tables, render_tables};
use crate::table::{GridTable, Table};

/// Every table of one document together with its compiled state.
pub struct CompiledDocument {
    tables: Vec<GridTable>,
    slim_tables: Vec<SlimTable<Box<dyn TableShape>>>,
}

/// Parses `text` and appends the instructions of every table in it.
///
/// A malformed table is marked in its header cell and the rest continue; an
/// unknown table type stops the whole document with a syntax error.
pub fn compile_document(
    text: &str,
    config: &SlimConfig,
    symbols: &dyn SymbolTable,
) -> Result<CompiledDocument> {
    let mut tables = parse_tables(text);
    let mut slim_tables = Vec::with_capacity(tables.len());
    for (index, table) in tables.iter_mut().enumerate() {
        let shape = shape_for(table.cell(0, 0).unwrap_or_default())?;
        let mut slim_table = SlimTable::new(shape, &config.table_id(index), &*table);
        slim_table.append_instructions(table, symbols)?;
        slim_tables.push(slim_table);
    }
    Ok(CompiledDocument {
        tables,
        slim_tables,
    })
}

impl CompiledDocument {
    pub fn tables(&self) -> &[GridTable] {
        &self.tables
    }

    /// The batch for the executor, in table order.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.slim_tables
            .iter()
            .flat_map(|t| t.instructions().iter().cloned())
            .collect()
    }

    /// Grades every table against `results`.
    pub fn evaluate(
        &mut self,
        results: &ResultMap,
        symbols: &mut dyn SymbolTable,
    ) -> EvaluationReport {
        let mut report = EvaluationReport::default();
        for (slim_table, table) in self.slim_tables.iter_mut().zip(self.tables.iter_mut()) {
            report.merge(slim_table.evaluate_expectations(table, results, symbols));
        }
        report
    }

    pub fn render(&self) -> String {
        render_tables(&self.tables)
    }
}
