//! Turns table cells into tagged instructions.
//!
//! A [`TableCompiler`] belongs to exactly one table instance. It hands out
//! tags `<tableType>_<id>_<n>` with `n` counting up from zero, keeps the
//! instructions it has built in order, and remembers which cell each result
//! will be judged in. The table itself is passed into every call that reads
//! or writes cells.

use tracing::debug;

use crate::errors::{Result, SlimError};
use crate::expectation::{EvaluationContext, EvaluationReport, Expectation, ExpectationKind};
use crate::instruction::{instruction_tag, Instruction, InstructionKind, ResultMap};
use crate::naming::{normalize_member_name, normalize_type_name};
use crate::symbols::SymbolTable;
use crate::table::Table;
use crate::verdict;

/// Separates the table type from the fixture name in a header cell.
pub const HEADER_SEPARATOR: char = ':';

#[derive(Debug)]
pub struct TableCompiler {
    table_name: String,
    next_instruction: usize,
    instructions: Vec<Instruction>,
    expectations: Vec<Expectation>,
    literal: bool,
}

impl TableCompiler {
    pub fn new(table_type: &str, id: &str, table: &dyn Table) -> Self {
        Self {
            table_name: format!("{}_{}", table_type, id),
            next_instruction: 0,
            instructions: Vec::new(),
            expectations: Vec::new(),
            literal: table.is_literal_table(),
        }
    }

    /// `<tableType>_<id>`; also the instance name of the table's fixture.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The number the next prepared instruction will get.
    pub fn instruction_number(&self) -> usize {
        self.next_instruction
    }

    pub fn make_instruction_tag(&self, number: usize) -> String {
        instruction_tag(&self.table_name, number)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn expectations(&self) -> &[Expectation] {
        &self.expectations
    }

    pub fn add_expectation(&mut self, expectation: Expectation) {
        self.expectations.push(expectation);
    }

    /// Allocates the next tag. Tags are never reused, even if the
    /// instruction is dropped.
    pub fn prepare_instruction(&mut self) -> Instruction {
        let instruction = Instruction::with_tag(self.make_instruction_tag(self.next_instruction));
        self.next_instruction += 1;
        instruction
    }

    pub fn add_instruction(&mut self, instruction: Instruction) {
        debug!(
            tag = instruction.tag(),
            kind = instruction.kind().map(|k| k.as_str()),
            operation = instruction.operation(),
            "appended instruction"
        );
        self.instructions.push(instruction);
    }

    /// Builds the table's fixture from the header cell `<type>:<Fixture>`,
    /// passing the rest of the header row as constructor arguments.
    pub fn construct_fixture(&mut self, table: &dyn Table) -> Result<()> {
        let header = table
            .cell(0, 0)
            .ok_or(SlimError::MissingCell { col: 0, row: 0 })?;
        let fixture_name = header
            .split(HEADER_SEPARATOR)
            .nth(1)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                SlimError::bad_table(
                    header,
                    format!("expected '<type>{}<fixture>' in the header", HEADER_SEPARATOR),
                )
            })?;
        let class_name = normalize_type_name(fixture_name);
        let instance_name = self.table_name.clone();
        self.construct_instance(table, &instance_name, &class_name, 0, 0);
        Ok(())
    }

    /// Appends `make <instance> <class> <args...>`, the arguments being the
    /// cells right of the class cell. The class cell gets the verdict.
    pub fn construct_instance(
        &mut self,
        table: &dyn Table,
        instance_name: &str,
        class_name: &str,
        class_name_column: usize,
        row: usize,
    ) {
        self.add_expectation(Expectation::new(
            self.instruction_number(),
            class_name_column,
            row,
            ExpectationKind::Construction,
        ));
        let mut make = self.prepare_instruction();
        make.push(InstructionKind::Make.as_str());
        make.push(instance_name);
        make.push(class_name);
        for argument in cells_starting_at(table, class_name_column + 1, row) {
            make.push(argument);
        }
        self.add_instruction(make);
    }

    /// Appends `call <instance> <method> <args...>` and returns its tag.
    pub fn call_function(
        &mut self,
        instance_name: &str,
        function_name: &str,
        args: &[String],
    ) -> String {
        let mut call = self.prepare_instruction();
        add_call(&mut call, instance_name, function_name);
        for arg in args {
            call.push(arg.as_str());
        }
        let tag = call.tag().to_string();
        self.add_instruction(call);
        tag
    }

    /// Like [`call_function`](Self::call_function), and the result is checked
    /// against the current content of cell `(col, row)`.
    pub fn call_and_expect(
        &mut self,
        table: &dyn Table,
        instance_name: &str,
        function_name: &str,
        args: &[String],
        col: usize,
        row: usize,
    ) -> String {
        let expected = table.cell(col, row).unwrap_or_default().to_string();
        self.add_expectation(self.returned_value_expectation(expected, self.instruction_number(), col, row));
        self.call_function(instance_name, function_name, args)
    }

    /// A call whose cell passes unless the executor reports an exception.
    pub fn call_void(
        &mut self,
        instance_name: &str,
        function_name: &str,
        args: &[String],
        col: usize,
        row: usize,
    ) -> String {
        self.add_expectation(Expectation::new(
            self.instruction_number(),
            col,
            row,
            ExpectationKind::VoidReturn,
        ));
        self.call_function(instance_name, function_name, args)
    }

    pub fn returned_value_expectation(
        &self,
        expected: String,
        instruction_number: usize,
        col: usize,
        row: usize,
    ) -> Expectation {
        Expectation::new(
            instruction_number,
            col,
            row,
            ExpectationKind::ReturnedValue { expected },
        )
    }

    /// Escapes `contents` if the table was literal when compiled.
    pub fn literalize(&self, contents: &str) -> String {
        if self.literal {
            verdict::literal(contents)
        } else {
            contents.to_string()
        }
    }

    /// Escapes every cell of a literal table. The table's literal flag is
    /// cleared, so a second call changes nothing.
    pub fn literalize_table(&self, table: &mut dyn Table) {
        if !table.is_literal_table() {
            return;
        }
        table.set_not_literal();
        for row in 0..table.row_count() {
            for col in 0..table.column_count(row) {
                let contents = table.cell(col, row).unwrap_or_default().to_string();
                table.set_cell(col, row, self.literalize(&contents));
            }
        }
    }

    /// Literalizes the table, then resolves and discards every expectation.
    pub fn evaluate_expectations(
        &mut self,
        table: &mut dyn Table,
        results: &ResultMap,
        symbols: &dyn SymbolTable,
    ) -> EvaluationReport {
        self.literalize_table(table);
        let ctx = EvaluationContext {
            table_name: &self.table_name,
            literal: self.literal,
            symbols,
        };
        let mut report = EvaluationReport::default();
        for expectation in std::mem::take(&mut self.expectations) {
            let outcome = expectation.evaluate(&ctx, table, results);
            report.record(outcome, expectation.tag(&self.table_name));
        }
        report
    }

    pub fn pass_cell(&self, table: &mut dyn Table, col: usize, row: usize) {
        let contents = table.cell(col, row).unwrap_or_default().to_string();
        table.set_cell(col, row, verdict::pass(&contents));
    }

    pub fn fail_cell(&self, table: &mut dyn Table, col: usize, row: usize, value: &str) {
        table.set_cell(col, row, verdict::fail(value));
    }

    /// `[<cell>] !style_fail(<message>)`
    pub fn fail_message_cell(&self, table: &mut dyn Table, col: usize, row: usize, message: &str) {
        let contents = table.cell(col, row).unwrap_or_default().to_string();
        table.set_cell(col, row, verdict::fail_message(&contents, message));
    }

    /// `[<actual>] !style_fail(expected [<cell>])`
    pub fn expected_cell(&self, table: &mut dyn Table, col: usize, row: usize, actual: &str) {
        let contents = table.cell(col, row).unwrap_or_default().to_string();
        let message = verdict::fail_message(actual, &format!("expected [{}]", contents));
        table.set_cell(col, row, message);
    }
}

/// The contents of row `row` from column `starting_column` to its end.
pub fn cells_starting_at(table: &dyn Table, starting_column: usize, row: usize) -> Vec<String> {
    (starting_column..table.column_count(row))
        .map(|col| table.cell(col, row).unwrap_or_default().to_string())
        .collect()
}

/// Fills in `call <instance> <normalized method>` after the tag.
pub fn add_call(instruction: &mut Instruction, instance_name: &str, function_name: &str) {
    instruction.push(InstructionKind::Call.as_str());
    instruction.push(instance_name);
    instruction.push(normalize_member_name(function_name));
}
