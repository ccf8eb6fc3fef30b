//! Slimtable Scenario Harness
//!
//! Runs YAML scenario suites through the whole pipeline: parse the table
//! text, compile it, feed it a canned executor answer, evaluate, and compare
//! the annotated table with what the case expects.
//!
//! # Test Format
//!
//! ```yaml
//! - name: "sum passes"
//!   table: |
//!     |decisionTable:Calc|
//!     |x|y|sum?|
//!     |1|2|3|
//!   symbols: { x: "5" }                 # optional, seeds the symbol table
//!   results:                            # tag -> returned value
//!     decisionTable_0_0: OK
//!     decisionTable_0_1: /__VOID__/
//!   expected: |                         # annotated table after evaluation
//!     |!style_pass(decisionTable:Calc)|
//!     ...
//!   instructions: [["decisionTable_0_0", "make", ...]]   # optional
//!   expect_error: "unknown table type"  # for documents that must not compile
//!   skip: false
//!   only: false
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use difference::{Changeset, Difference};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::config::{SlimConfig, GREEN, RED, YELLOW};
use crate::engine::compile_document;
use crate::errors::{Result, SlimError};
use crate::symbols::LocalSymbols;

// =============================================================================
// CORE TYPES
// =============================================================================

/// A single YAML scenario.
#[derive(Debug, Deserialize, Clone)]
pub struct TestCase {
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub symbols: HashMap<String, String>,
    #[serde(default)]
    pub results: HashMap<String, String>,
    pub expected: Option<String>,
    pub instructions: Option<Vec<Vec<String>>>,
    pub expect_error: Option<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Pass {
        file: String,
        name: String,
    },
    Fail {
        file: String,
        name: String,
        error: String,
        /// Expected and actual table text, when the tables differ.
        mismatch: Option<(String, String)>,
    },
    Skipped {
        file: String,
        name: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

// =============================================================================
// DISCOVERY AND LOADING
// =============================================================================

/// Discovers all YAML files recursively under the given root directory.
pub fn discover_yaml_files<P: AsRef<Path>>(root: P) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path).map_err(|e| SlimError::io(path, e))?;
    Ok(serde_yaml::from_str(&content)?)
}

pub fn skip_reason(case: &TestCase, has_only: bool, filter: Option<&str>) -> Option<String> {
    if has_only && !case.only {
        return Some("Not marked 'only' in 'only' mode".to_string());
    }
    if case.skip {
        return Some("Marked 'skip'".to_string());
    }
    if let Some(f) = filter {
        if !case.name.to_lowercase().contains(&f.to_lowercase()) {
            return Some(format!("Filtered out by substring: {}", f));
        }
    }
    None
}

// =============================================================================
// EXECUTION
// =============================================================================

/// Runs one scenario through compile, evaluate and compare.
pub fn run_test_case(file: &str, case: &TestCase, config: &SlimConfig) -> TestResult {
    let fail = |error: String, mismatch: Option<(String, String)>| TestResult::Fail {
        file: file.to_string(),
        name: case.name.clone(),
        error,
        mismatch,
    };
    let pass = || TestResult::Pass {
        file: file.to_string(),
        name: case.name.clone(),
    };

    if case.expected.is_none() && case.instructions.is_none() && case.expect_error.is_none() {
        return fail("Nothing to check".to_string(), None);
    }

    let mut symbols = LocalSymbols::from(case.symbols.clone());
    let mut document = match compile_document(&case.table, config, &symbols) {
        Ok(document) => document,
        Err(e) => {
            return match case.expect_error.as_deref() {
                Some(expected) if e.to_string().contains(expected) => pass(),
                _ => fail(format!("Compilation failed: {}", e), None),
            };
        }
    };
    if let Some(expected) = case.expect_error.as_deref() {
        return fail(
            format!("Expected error '{}' but the table compiled", expected),
            None,
        );
    }

    if let Some(expected) = &case.instructions {
        let actual: Vec<Vec<String>> = document
            .instructions()
            .iter()
            .map(|i| i.tokens().to_vec())
            .collect();
        if &actual != expected {
            return fail(
                "Instructions did not match expected".to_string(),
                Some((format_instructions(expected), format_instructions(&actual))),
            );
        }
    }

    document.evaluate(&case.results, &mut symbols);
    let actual = document.render();
    match case.expected.as_deref() {
        Some(expected) if normalize(expected) != normalize(&actual) => fail(
            "Table did not match expected".to_string(),
            Some((normalize(expected), normalize(&actual))),
        ),
        _ => pass(),
    }
}

fn format_instructions(instructions: &[Vec<String>]) -> String {
    instructions
        .iter()
        .map(|tokens| tokens.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// REPORTING
// =============================================================================

pub fn summarize(results: &[TestResult]) -> Summary {
    results.iter().fold(Summary::default(), |mut summary, r| {
        match r {
            TestResult::Pass { .. } => summary.passed += 1,
            TestResult::Fail { .. } => summary.failed += 1,
            TestResult::Skipped { .. } => summary.skipped += 1,
        }
        summary
    })
}

pub fn report_results(results: &[TestResult], config: &SlimConfig) {
    for r in results {
        match r {
            TestResult::Pass { file, name } => {
                println!("{}: {} [{}]", config.colorize("PASS", GREEN), name, file)
            }
            TestResult::Fail { .. } => print_failure(r, config),
            TestResult::Skipped { file, name, reason } => println!(
                "{}: {} [{}] ({})",
                config.colorize("SKIP", YELLOW),
                name,
                file,
                reason
            ),
        }
    }

    let summary = summarize(results);
    println!(
        "\nTest summary: total {}, {} {}, {} {}, {} {}",
        results.len(),
        config.colorize("passed", GREEN),
        summary.passed,
        config.colorize("failed", RED),
        summary.failed,
        config.colorize("skipped", YELLOW),
        summary.skipped,
    );
}

pub fn print_failure(r: &TestResult, config: &SlimConfig) {
    if let TestResult::Fail {
        file,
        name,
        error,
        mismatch,
    } = r
    {
        eprintln!("{}: {} [{}]", config.colorize("FAIL", RED), name, file);
        eprintln!("  Error: {}", error);
        if let Some((expected, actual)) = mismatch {
            eprintln!("  Diff:");
            print_diff(expected, actual, config);
        }
    }
}

/// Line diff of expected against actual.
pub fn print_diff(expected: &str, actual: &str, config: &SlimConfig) {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                for line in x.lines() {
                    eprintln!("    {}", line);
                }
            }
            Difference::Rem(x) => {
                for line in x.lines() {
                    eprintln!("  - {}", config.colorize(line, GREEN));
                }
            }
            Difference::Add(x) => {
                for line in x.lines() {
                    eprintln!("  + {}", config.colorize(line, RED));
                }
            }
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Runs every case of every suite under `root` without printing anything.
pub fn run_suites(root: &Path, filter: Option<&str>, config: &SlimConfig) -> Result<Vec<TestResult>> {
    let mut all_cases = Vec::new();
    for path in discover_yaml_files(root) {
        let file = path.display().to_string();
        for case in load_test_cases(&path)? {
            all_cases.push((file.clone(), case));
        }
    }
    let has_only = all_cases.iter().any(|(_, case)| case.only);

    Ok(all_cases
        .into_iter()
        .map(|(file, case)| match skip_reason(&case, has_only, filter) {
            Some(reason) => TestResult::Skipped {
                file,
                name: case.name,
                reason,
            },
            None => run_test_case(&file, &case, config),
        })
        .collect())
}

/// Runs and reports every suite under `root`.
pub fn run_all(root: &Path, filter: Option<&str>, config: &SlimConfig) -> Result<Summary> {
    let results = run_suites(root, filter, config)?;
    report_results(&results, config);
    Ok(summarize(&results))
}
