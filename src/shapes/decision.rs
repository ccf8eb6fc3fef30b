//! Decision tables.
//!
//! ```text
//! |decisionTable:Calculator|   <- fixture, constructor args to the right
//! |x   |y   |sum?   |          <- inputs, then outputs ending in '?'
//! |1   |2   |3      |
//! |5   |5   |$total=|          <- store the result in symbol `total`
//! ```
//!
//! Each data row sets its inputs, calls `execute`, then calls one method per
//! output column.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::error;

use super::TableShape;
use crate::compiler::TableCompiler;
use crate::errors::{Result, SlimError};
use crate::expectation::EvaluationReport;
use crate::instruction::ResultMap;
use crate::symbols::{replace_symbols, SymbolTable};
use crate::table::Table;
use crate::verdict::{self, Outcome};

pub const TABLE_TYPE: &str = "decisionTable";

const OUTPUT_SUFFIX: char = '?';
const COLUMN_ROW: usize = 1;
const FIRST_DATA_ROW: usize = 2;

lazy_static! {
    static ref SYMBOL_ASSIGNMENT: Regex =
        Regex::new(r"\A\s*\$([a-zA-Z][a-zA-Z0-9_]*)\s*=\s*\z").expect("assignment pattern is valid");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Column {
    Input { col: usize, name: String },
    Output { col: usize, name: String },
}

/// An output cell that captures its result into a symbol instead of checking it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SymbolAssignment {
    tag: String,
    col: usize,
    row: usize,
    symbol: String,
}

#[derive(Debug, Default)]
pub struct DecisionTable {
    assignments: Vec<SymbolAssignment>,
}

impl DecisionTable {
    pub fn new() -> Self {
        Self::default()
    }
}

fn columns(table: &dyn Table) -> Vec<Column> {
    (0..table.column_count(COLUMN_ROW))
        .filter_map(|col| {
            let name = table.cell(col, COLUMN_ROW)?.trim();
            if name.is_empty() {
                None
            } else if let Some(output) = name.strip_suffix(OUTPUT_SUFFIX) {
                Some(Column::Output {
                    col,
                    name: output.to_string(),
                })
            } else {
                Some(Column::Input {
                    col,
                    name: name.to_string(),
                })
            }
        })
        .collect()
}

fn assigned_symbol(cell: &str) -> Option<String> {
    SYMBOL_ASSIGNMENT
        .captures(cell)
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
}

impl TableShape for DecisionTable {
    fn table_type(&self) -> &str {
        TABLE_TYPE
    }

    fn append_instructions(
        &mut self,
        compiler: &mut TableCompiler,
        table: &dyn Table,
        symbols: &dyn SymbolTable,
    ) -> Result<()> {
        if table.row_count() <= COLUMN_ROW {
            return Err(SlimError::bad_table(
                table.cell(0, 0).unwrap_or_default(),
                "a decision table needs a row of column names",
            ));
        }
        compiler.construct_fixture(table)?;
        let instance = compiler.table_name().to_string();
        let columns = columns(table);

        for row in FIRST_DATA_ROW..table.row_count() {
            for column in &columns {
                let Column::Input { col, name } = column else {
                    continue;
                };
                let Some(cell) = table.cell(*col, row) else {
                    continue;
                };
                let value = replace_symbols(cell, symbols);
                compiler.call_void(&instance, &format!("set {}", name), &[value], *col, row);
            }
            compiler.call_function(&instance, "execute", &[]);
            for column in &columns {
                let Column::Output { col, name } = column else {
                    continue;
                };
                let Some(cell) = table.cell(*col, row) else {
                    continue;
                };
                match assigned_symbol(cell) {
                    Some(symbol) => {
                        let tag = compiler.call_function(&instance, name, &[]);
                        self.assignments.push(SymbolAssignment {
                            tag,
                            col: *col,
                            row,
                            symbol,
                        });
                    }
                    None => {
                        compiler.call_and_expect(table, &instance, name, &[], *col, row);
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate_return_values(
        &mut self,
        compiler: &TableCompiler,
        table: &mut dyn Table,
        results: &ResultMap,
        symbols: &mut dyn SymbolTable,
        report: &mut EvaluationReport,
    ) {
        for assignment in std::mem::take(&mut self.assignments) {
            let Some(value) = results.get(&assignment.tag) else {
                error!(tag = %assignment.tag, "no result reported for symbol assignment");
                table.set_cell(
                    assignment.col,
                    assignment.row,
                    verdict::error(&format!("no result for {}", assignment.tag)),
                );
                report.record(Outcome::Error, assignment.tag);
                continue;
            };
            symbols.set_symbol(&assignment.symbol, value);
            table.set_cell(
                assignment.col,
                assignment.row,
                format!("${}<-[{}]", assignment.symbol, compiler.literalize(value)),
            );
            report.record(Outcome::Plain, assignment.tag);
        }
    }
}
