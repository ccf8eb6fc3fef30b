//! Expectation evaluation: the three expectation kinds, comparisons, symbols
//! in verdicts, literal tables and missing results.

use slimtable::compiler::TableCompiler;
use slimtable::expectation::{EvaluationReport, Expectation, ExpectationKind};
use slimtable::instruction::ResultMap;
use slimtable::symbols::{LocalSymbols, SymbolTable};
use slimtable::table::{GridTable, Table};
use slimtable::verdict::Outcome;

fn results(pairs: &[(&str, &str)]) -> ResultMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Compiles one checked call against cell (0,0) holding `expected`, answers it
/// with `actual`, and returns the cell afterwards.
fn check(expected: &str, actual: &str, symbols: &LocalSymbols) -> String {
    let mut table = GridTable::from_rows([[expected]]);
    let mut compiler = TableCompiler::new("t", "0", &table);
    let tag = compiler.call_and_expect(&table, "t_0", "value", &[], 0, 0);
    compiler.evaluate_expectations(&mut table, &results(&[(tag.as_str(), actual)]), symbols);
    table.cell(0, 0).unwrap().to_string()
}

#[cfg(test)]
mod returned_value_tests {
    use super::*;

    #[test]
    fn exact_match_passes_with_the_original_text() {
        assert_eq!(check("42", "42", &LocalSymbols::new()), "!style_pass(42)");
    }

    #[test]
    fn blank_expectation_ignores_any_value() {
        let none = LocalSymbols::new();
        assert_eq!(check("", "anything", &none), "!style_ignore(anything)");
        assert_eq!(check("", "Exception: boom", &none), "!style_ignore(Exception: boom)");
    }

    #[test]
    fn blank_expectation_with_blank_result_passes_as_blank() {
        assert_eq!(check("", "", &LocalSymbols::new()), "!style_pass(BLANK)");
    }

    #[test]
    fn mismatch_shows_actual_and_expected() {
        assert_eq!(
            check("42", "41", &LocalSymbols::new()),
            "[41] !style_fail(expected [42])"
        );
    }

    #[test]
    fn relational_expectations_are_compared_numerically() {
        let none = LocalSymbols::new();
        assert_eq!(check("<10", "9", &none), "!style_pass(9<10)");
        assert_eq!(check("<10", "11", &none), "!style_fail(11<10)");
        assert_eq!(check(" >= 2 ", "2", &none), "!style_pass(2>=2)");
    }

    #[test]
    fn range_expectations_are_compared_numerically() {
        let none = LocalSymbols::new();
        assert_eq!(check("1<_<=10", "10", &none), "!style_pass(1<10<=10)");
        assert_eq!(check("1<_<=10", "10.0001", &none), "!style_fail(1<10.0001<=10)");
    }

    #[test]
    fn unparsable_comparisons_fall_back_to_expected() {
        let none = LocalSymbols::new();
        assert_eq!(check("<10", "ten", &none), "[ten] !style_fail(expected [<10])");
        assert_eq!(check("=>10", "11", &none), "[11] !style_fail(expected [=>10])");
    }

    #[test]
    fn expected_symbols_are_resolved_before_comparing() {
        let symbols: LocalSymbols = [("x", "5")].into_iter().collect();
        assert_eq!(check("$x", "5", &symbols), "!style_pass($x->[5])");
        assert_eq!(check("$x", "6", &symbols), "[6] !style_fail(expected [$x->[5]])");
        assert_eq!(check("<$x", "4", &symbols), "!style_pass(4<$x->[5])");
    }

    #[test]
    fn symbols_inside_the_actual_value_are_expanded_too() {
        let symbols: LocalSymbols = [("x", "5")].into_iter().collect();
        assert_eq!(check("", "cost $x", &symbols), "!style_ignore(cost $x->[5])");
    }
}

#[cfg(test)]
mod construction_and_void_tests {
    use super::*;

    #[test]
    fn construction_passes_with_the_original_cell() {
        let mut table = GridTable::from_rows([["decisionTable:Calc"]]);
        let mut compiler = TableCompiler::new("decisionTable", "0", &table);
        compiler.construct_fixture(&table).unwrap();
        let report = compiler.evaluate_expectations(
            &mut table,
            &results(&[("decisionTable_0_0", "OK")]),
            &LocalSymbols::new(),
        );
        assert_eq!(table.cell(0, 0), Some("!style_pass(decisionTable:Calc)"));
        assert_eq!(report.passed, 1);
    }

    #[test]
    fn construction_exception_fails_whatever_the_cell_says() {
        let mut table = GridTable::from_rows([["decisionTable:Calc"]]);
        let mut compiler = TableCompiler::new("decisionTable", "0", &table);
        compiler.construct_fixture(&table).unwrap();
        compiler.evaluate_expectations(
            &mut table,
            &results(&[(
                "decisionTable_0_0",
                "__EXCEPTION__:java.lang.ClassNotFoundException: Calc",
            )]),
            &LocalSymbols::new(),
        );
        assert_eq!(table.cell(0, 0), Some("!style_fail(__EXCEPTION__:java.lang.ClassNotFoundException: Calc)"));

        let exception = Expectation::new(0, 0, 0, ExpectationKind::Construction);
        let (outcome, message) = exception.evaluation_message(
            &LocalSymbols::new(),
            "java.lang.NullPointerException",
            "java.lang.NullPointerException",
            "anything",
        );
        assert_eq!(outcome, Outcome::Fail);
        assert_eq!(message, "!style_fail(java.lang.NullPointerException)");
    }

    #[test]
    fn the_exception_marker_is_case_sensitive() {
        // Only the exact substring counts; an upper-case protocol prefix alone does not.
        let construction = Expectation::new(0, 0, 0, ExpectationKind::Construction);
        let (outcome, message) =
            construction.evaluation_message(&LocalSymbols::new(), "__EXCEPTION__", "x", "Calc");
        assert_eq!(outcome, Outcome::Pass);
        assert_eq!(message, "!style_pass(Calc)");
    }

    #[test]
    fn void_returns_leave_the_cell_with_expanded_symbols() {
        let symbols: LocalSymbols = [("id", "17")].into_iter().collect();
        let mut table = GridTable::from_rows([["$id"]]);
        let mut compiler = TableCompiler::new("t", "0", &table);
        let tag = compiler.call_void("t_0", "set id", &["17".to_string()], 0, 0);
        let report = compiler.evaluate_expectations(
            &mut table,
            &results(&[(tag.as_str(), "/__VOID__/")]),
            &symbols,
        );
        assert_eq!(table.cell(0, 0), Some("$id->[17]"));
        assert_eq!(report.plain, 1);
    }

    #[test]
    fn void_return_exception_fails() {
        let void = Expectation::new(0, 0, 0, ExpectationKind::VoidReturn);
        let (outcome, message) = void.evaluation_message(
            &LocalSymbols::new(),
            "__EXCEPTION__:IllegalArgumentException",
            "__EXCEPTION__:IllegalArgumentException",
            "7",
        );
        assert_eq!(outcome, Outcome::Fail);
        assert_eq!(message, "!style_fail(__EXCEPTION__:IllegalArgumentException)");
    }

    #[test]
    fn void_cells_that_read_like_verdicts_are_still_unchecked() {
        let mut table = GridTable::from_rows([["!style_fail(x)"]]);
        let mut compiler = TableCompiler::new("t", "0", &table);
        let tag = compiler.call_void("t_0", "set note", &["x".to_string()], 0, 0);
        let report = compiler.evaluate_expectations(
            &mut table,
            &results(&[(tag.as_str(), "/__VOID__/")]),
            &LocalSymbols::new(),
        );
        assert_eq!(table.cell(0, 0), Some("!style_fail(x)"));
        assert_eq!(report.plain, 1);
        assert_eq!(report.failed, 0);
        assert!(report.is_success());
    }
}

#[cfg(test)]
mod literal_table_tests {
    use super::*;

    #[test]
    fn literal_tables_escape_cells_and_values() {
        let mut table = GridTable::from_rows([vec!["dt:F"], vec!["7"], vec![""]]).literal(true);
        let mut compiler = TableCompiler::new("dt", "0", &table);
        compiler.construct_fixture(&table).unwrap();
        compiler.call_and_expect(&table, "dt_0", "get", &[], 0, 1);
        compiler.call_and_expect(&table, "dt_0", "get", &[], 0, 2);
        compiler.evaluate_expectations(
            &mut table,
            &results(&[("dt_0_0", "OK"), ("dt_0_1", "8"), ("dt_0_2", "<i>")]),
            &LocalSymbols::new(),
        );
        assert_eq!(table.cell(0, 0), Some("!style_pass(!-dt:F-!)"));
        assert_eq!(table.cell(0, 1), Some("[!-8-!] !style_fail(expected [!-7-!])"));
        assert_eq!(table.cell(0, 2), Some("!style_ignore(!-<i>-!)"));
        assert!(!table.is_literal_table());
    }
}

#[cfg(test)]
mod pass_tests {
    use super::*;

    #[test]
    fn a_missing_result_is_surfaced_in_the_cell_and_the_report() {
        let mut table = GridTable::from_rows([["5"]]);
        let mut compiler = TableCompiler::new("t", "0", &table);
        compiler.call_and_expect(&table, "t_0", "value", &[], 0, 0);
        let report =
            compiler.evaluate_expectations(&mut table, &ResultMap::new(), &LocalSymbols::new());
        assert_eq!(table.cell(0, 0), Some("!style_error(no result for t_0_0)"));
        assert_eq!(report.missing, ["t_0_0"]);
        assert!(!report.is_success());
    }

    #[test]
    fn expectations_are_consumed_by_evaluation() {
        let mut table = GridTable::from_rows([["5"]]);
        let mut compiler = TableCompiler::new("t", "0", &table);
        compiler.call_and_expect(&table, "t_0", "value", &[], 0, 0);
        let answers = results(&[("t_0_0", "5")]);
        let first = compiler.evaluate_expectations(&mut table, &answers, &LocalSymbols::new());
        let second = compiler.evaluate_expectations(&mut table, &answers, &LocalSymbols::new());
        assert_eq!(first.passed, 1);
        assert_eq!(second, EvaluationReport::default());
        assert_eq!(table.cell(0, 0), Some("!style_pass(5)"));
    }

    #[test]
    fn evaluation_order_does_not_change_the_grid() {
        let rows = [vec!["1", "2", "3"], vec!["<5", "", "x"]];
        let answers = [("1", "1"), ("2", "9"), ("3", "3"), ("<5", "4"), ("", "q"), ("x", "y")];

        let grade = |order: &[(usize, usize)]| {
            let mut table = GridTable::from_rows(rows.clone());
            let mut compiler = TableCompiler::new("t", "0", &table);
            let mut result_map = ResultMap::new();
            for &(col, row) in order {
                let expected = table.cell(col, row).unwrap().to_string();
                let tag = compiler.call_and_expect(&table, "t_0", "value", &[], col, row);
                let actual = answers.iter().find(|(e, _)| *e == expected).unwrap().1;
                result_map.insert(tag, actual.to_string());
            }
            compiler.evaluate_expectations(&mut table, &result_map, &LocalSymbols::new());
            table
        };

        let forward = grade(&[(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        let backward = grade(&[(2, 1), (1, 1), (0, 1), (2, 0), (1, 0), (0, 0)]);
        assert_eq!(forward, backward);
        assert_eq!(forward.cell(1, 0), Some("[9] !style_fail(expected [2])"));
        assert_eq!(forward.cell(0, 1), Some("!style_pass(4<5)"));
    }

    #[test]
    fn symbols_written_between_phases_are_seen_by_evaluation() {
        let mut symbols = LocalSymbols::new();
        let mut table = GridTable::from_rows([["$total"]]);
        let mut compiler = TableCompiler::new("t", "0", &table);
        let tag = compiler.call_and_expect(&table, "t_0", "total", &[], 0, 0);
        symbols.set_symbol("total", "12");
        compiler.evaluate_expectations(&mut table, &results(&[(tag.as_str(), "12")]), &symbols);
        assert_eq!(table.cell(0, 0), Some("!style_pass($total->[12])"));
    }
}
