//! Handles all user-facing output for the CLI.
//!
//! Machine-readable results (JSON, table text) go to stdout uncolored; the
//! evaluation summary goes to stderr and is colored when the terminal allows.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::errors::SlimError;
use crate::expectation::EvaluationReport;

fn color_choice(use_colors: bool) -> ColorChoice {
    if use_colors {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints the tally of one evaluation run to stderr.
pub fn print_report(report: &EvaluationReport, use_colors: bool) {
    let mut stderr = StandardStream::stderr(color_choice(use_colors));
    print_count(&mut stderr, "passed", report.passed, Color::Green);
    print_count(&mut stderr, "failed", report.failed, Color::Red);
    print_count(&mut stderr, "ignored", report.ignored, Color::Yellow);
    let _ = writeln!(stderr, "{} unchecked", report.plain);
    for tag in &report.missing {
        print_error(SlimError::MissingResult { tag: tag.clone() });
    }
}

fn print_count(stream: &mut StandardStream, label: &str, count: usize, color: Color) {
    if count > 0 {
        let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)));
    }
    let _ = write!(stream, "{} {}", count, label);
    let _ = stream.reset();
    let _ = write!(stream, ", ");
}

/// Renders an error with its miette diagnostic to stderr.
pub fn print_error(error: SlimError) {
    let report = miette::Report::new(error);
    eprintln!("{:?}", report);
}
