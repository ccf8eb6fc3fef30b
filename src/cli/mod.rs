//! The slimtable command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::args::{Command, SlimArgs};
use crate::config::{init_logging, SlimConfig};
use crate::engine::compile_document;
use crate::errors::{Result, SlimError};
use crate::harness;
use crate::instruction::{instructions_to_json, parse_results, parse_string_map};
use crate::naming::{normalize_member_name, normalize_type_name};
use crate::symbols::LocalSymbols;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = SlimArgs::parse();
    let mut config = match SlimConfig::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(e);
            process::exit(2);
        }
    };
    if args.no_color {
        config.use_colors = false;
    }
    if let Some(filter) = &args.log {
        config.log_filter = filter.clone();
    }
    init_logging(&config.log_filter);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Compile { file, id } => handle_compile(&file, id, config),
        Command::Evaluate {
            file,
            results,
            symbols,
            id,
        } => handle_evaluate(&file, &results, symbols.as_deref(), id, config),
        Command::Normalize { name, member } => {
            if member {
                println!("{}", normalize_member_name(&name));
            } else {
                println!("{}", normalize_type_name(&name));
            }
            Ok(true)
        }
        Command::Test { path, filter } => {
            let root = path.unwrap_or_else(|| config.test_root.clone().into());
            harness::run_all(&root, filter.as_deref(), &config).map(|s| s.failed == 0)
        }
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            output::print_error(e);
            process::exit(2);
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| SlimError::io(path, e))
}

fn with_id(mut config: SlimConfig, id: Option<String>) -> SlimConfig {
    if let Some(id) = id {
        config.table_id = id;
    }
    config
}

/// Handles the `compile` subcommand.
fn handle_compile(path: &Path, id: Option<String>, config: SlimConfig) -> Result<bool> {
    let config = with_id(config, id);
    let source = read(path)?;
    let document = compile_document(&source, &config, &LocalSymbols::new())?;
    println!("{}", instructions_to_json(&document.instructions())?);
    Ok(true)
}

/// Handles the `evaluate` subcommand.
fn handle_evaluate(
    path: &Path,
    results: &Path,
    symbols: Option<&Path>,
    id: Option<String>,
    config: SlimConfig,
) -> Result<bool> {
    let config = with_id(config, id);
    let source = read(path)?;
    let results = parse_results(&read(results)?)?;
    let mut symbols = match symbols {
        Some(path) => LocalSymbols::from(parse_string_map(&read(path)?)?),
        None => LocalSymbols::new(),
    };

    let mut document = compile_document(&source, &config, &symbols)?;
    let report = document.evaluate(&results, &mut symbols);
    print!("{}", document.render());
    output::print_report(&report, config.use_colors);
    Ok(report.is_success())
}
