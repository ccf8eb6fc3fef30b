//! Deferred checks on instruction results.
//!
//! The compiler registers one [`Expectation`] per instruction whose result
//! decides a cell's verdict. Once the executor has answered the whole batch,
//! each expectation looks up its result by tag and overwrites its cell.

use tracing::{debug, error};

use crate::instruction::{instruction_tag, ResultMap};
use crate::symbols::{replace_symbols, replace_symbols_with_full_expansion, SymbolTable};
use crate::table::Table;
use crate::verdict::{self, Outcome};

pub mod comparison;

/// Substring by which the executor reports that an instruction threw.
pub const EXCEPTION_MARKER: &str = "Exception";

/// Text shown for a passing empty cell.
const BLANK: &str = "BLANK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectationKind {
    /// The fixture or instance was built.
    Construction,
    /// A call whose return value is not checked.
    VoidReturn,
    /// A call whose return value must match the expected cell text.
    ReturnedValue { expected: String },
}

impl ExpectationKind {
    fn name(&self) -> &'static str {
        match self {
            ExpectationKind::Construction => "construction",
            ExpectationKind::VoidReturn => "void-return",
            ExpectationKind::ReturnedValue { .. } => "returned-value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub instruction_number: usize,
    pub col: usize,
    pub row: usize,
    pub kind: ExpectationKind,
}

/// What every expectation of one table needs while it is evaluated.
pub struct EvaluationContext<'a> {
    pub table_name: &'a str,
    /// Whether the table was literal when it was compiled.
    pub literal: bool,
    pub symbols: &'a dyn SymbolTable,
}

impl EvaluationContext<'_> {
    pub fn literalize(&self, contents: &str) -> String {
        if self.literal {
            verdict::literal(contents)
        } else {
            contents.to_string()
        }
    }
}

impl Expectation {
    pub fn new(instruction_number: usize, col: usize, row: usize, kind: ExpectationKind) -> Self {
        Self {
            instruction_number,
            col,
            row,
            kind,
        }
    }

    pub fn tag(&self, table_name: &str) -> String {
        instruction_tag(table_name, self.instruction_number)
    }

    /// Resolves this expectation against `results` and writes the verdict into
    /// its cell.
    pub fn evaluate(
        &self,
        ctx: &EvaluationContext<'_>,
        table: &mut dyn Table,
        results: &ResultMap,
    ) -> Outcome {
        let tag = self.tag(ctx.table_name);
        let Some(value) = results.get(&tag) else {
            error!(%tag, col = self.col, row = self.row, "no result reported for instruction");
            table.set_cell(
                self.col,
                self.row,
                verdict::error(&format!("no result for {}", tag)),
            );
            return Outcome::Error;
        };
        let literalized = ctx.literalize(value);
        let original = table.cell(self.col, self.row).unwrap_or_default().to_string();
        let (outcome, message) =
            self.evaluation_message(ctx.symbols, value, &literalized, &original);
        debug!(%tag, col = self.col, row = self.row, kind = self.kind.name(), ?outcome, "evaluated expectation");
        table.set_cell(self.col, self.row, message);
        outcome
    }

    /// The verdict for one result, given the cell's content before evaluation.
    pub fn evaluation_message(
        &self,
        symbols: &dyn SymbolTable,
        value: &str,
        literalized: &str,
        original: &str,
    ) -> (Outcome, String) {
        match &self.kind {
            ExpectationKind::Construction => {
                if value.contains(EXCEPTION_MARKER) {
                    (Outcome::Fail, verdict::fail(literalized))
                } else {
                    (Outcome::Pass, verdict::pass(original))
                }
            }
            ExpectationKind::VoidReturn => {
                if value.contains(EXCEPTION_MARKER) {
                    (Outcome::Fail, verdict::fail(literalized))
                } else {
                    (Outcome::Plain, replace_symbols_with_full_expansion(original, symbols))
                }
            }
            ExpectationKind::ReturnedValue { expected } => {
                let (outcome, message) =
                    returned_value_message(symbols, expected, value, literalized, original);
                (outcome, replace_symbols_with_full_expansion(&message, symbols))
            }
        }
    }
}

fn returned_value_message(
    symbols: &dyn SymbolTable,
    expected: &str,
    value: &str,
    literalized: &str,
    original: &str,
) -> (Outcome, String) {
    let resolved = replace_symbols(expected, symbols);
    if value == resolved {
        (
            Outcome::Pass,
            verdict::pass(if original.is_empty() { BLANK } else { original }),
        )
    } else if resolved.is_empty() {
        (Outcome::Ignore, verdict::ignore(literalized))
    } else if let Some(judged) = comparison::judge(&resolved, value, expected) {
        judged
    } else {
        (
            Outcome::Fail,
            verdict::fail_message(literalized, &format!("expected [{}]", original)),
        )
    }
}

/// Tally of one evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    pub passed: usize,
    pub failed: usize,
    pub ignored: usize,
    pub plain: usize,
    /// Tags that had no entry in the result mapping.
    pub missing: Vec<String>,
}

impl EvaluationReport {
    pub fn record(&mut self, outcome: Outcome, tag: String) {
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::Ignore => self.ignored += 1,
            Outcome::Plain => self.plain += 1,
            Outcome::Error => self.missing.push(tag),
        }
    }

    pub fn merge(&mut self, other: EvaluationReport) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.ignored += other.ignored;
        self.plain += other.plain;
        self.missing.extend(other.missing);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.missing.is_empty()
    }
}
