// Regression tests for the slimtable binary: output streams, exit codes and
// miette-rendered diagnostics.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn slimtable() -> Command {
    let mut cmd = Command::cargo_bin("slimtable").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn compile_prints_the_instruction_batch_as_json() {
    slimtable()
        .args(["compile", "tests/fixtures/calculator.txt"])
        .assert()
        .success()
        .stdout(
            contains("\"decisionTable_0_0\"")
                .and(contains("\"make\""))
                .and(contains("\"Calculator\""))
                .and(contains("\"setX\""))
                .and(contains("\"decisionTable_0_8\"")),
        );
}

#[test]
fn compile_uses_the_given_table_id() {
    slimtable()
        .args(["compile", "tests/fixtures/calculator.txt", "--id", "7"])
        .assert()
        .success()
        .stdout(contains("\"decisionTable_7_0\"").and(contains("decisionTable_0_").not()));
}

#[test]
fn evaluate_prints_the_annotated_table() {
    slimtable()
        .args([
            "evaluate",
            "tests/fixtures/calculator.txt",
            "--results",
            "tests/fixtures/calculator_results.yaml",
        ])
        .assert()
        .success()
        .stdout(
            contains("|!style_pass(decisionTable:Calculator)|")
                .and(contains("|1|2|!style_pass(3)|"))
                .and(contains("|5|5|!style_pass(10)|")),
        )
        .stderr(contains("3 passed"));
}

#[test]
fn evaluate_exits_with_one_when_a_cell_fails() {
    slimtable()
        .args([
            "evaluate",
            "tests/fixtures/calculator.txt",
            "--results",
            "tests/fixtures/calculator_wrong.json",
        ])
        .assert()
        .code(1)
        .stdout(contains("|5|5|[11] !style_fail(expected [10])|"))
        .stderr(contains("1 failed"));
}

#[test]
fn normalize_prints_type_and_member_names() {
    slimtable()
        .args(["normalize", "my fixture"])
        .assert()
        .success()
        .stdout("MyFixture\n");
    slimtable()
        .args(["normalize", "--member", "do it"])
        .assert()
        .success()
        .stdout("doIt\n");
}

#[test]
fn unknown_table_type_is_reported_with_a_diagnostic() {
    slimtable()
        .args(["compile", "tests/fixtures/unknown_type.txt"])
        .assert()
        .code(2)
        .stderr(contains("slimtable::table::syntax").and(contains("queryTable")));
}

#[test]
fn missing_input_file_is_an_io_error() {
    slimtable()
        .args(["compile", "tests/fixtures/no_such_file.txt"])
        .assert()
        .code(2)
        .stderr(contains("slimtable::io"));
}

#[test]
fn test_subcommand_runs_the_scenario_suites() {
    slimtable()
        .args(["test", "tests/suites"])
        .assert()
        .success()
        .stdout(contains("Test summary").and(contains("PASS")));
}

#[test]
fn missing_results_fail_the_run_with_a_diagnostic() {
    slimtable()
        .args([
            "evaluate",
            "tests/fixtures/calculator.txt",
            "--results",
            "tests/fixtures/calculator_partial.yaml",
        ])
        .assert()
        .code(1)
        .stdout(contains("!style_error(no result for decisionTable_0_4)"))
        .stderr(contains("slimtable::results::missing").and(contains("decisionTable_0_8")));
}
