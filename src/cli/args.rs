//! Defines the command-line arguments and subcommands for the slimtable CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "slimtable",
    version,
    about = "Compile test tables into executor instructions and grade the results."
)]
pub struct SlimArgs {
    /// Configuration file (defaults to ./slimtable.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `slimtable=trace`.
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the instruction batch of a table file as JSON.
    Compile {
        /// The pipe-text table file.
        #[arg(required = true)]
        file: PathBuf,
        /// Id of the first table (tags read `<type>_<id>_<n>`).
        #[arg(long)]
        id: Option<String>,
    },
    /// Grade a table file against the executor's results and print it annotated.
    Evaluate {
        /// The pipe-text table file.
        #[arg(required = true)]
        file: PathBuf,
        /// YAML or JSON mapping of instruction tag to returned value.
        #[arg(long, required = true)]
        results: PathBuf,
        /// YAML or JSON mapping of symbol name to value, known before the run.
        #[arg(long)]
        symbols: Option<PathBuf>,
        /// Id of the first table.
        #[arg(long)]
        id: Option<String>,
    },
    /// Print the identifier a display name normalizes to.
    Normalize {
        /// The name as written in a table.
        #[arg(required = true)]
        name: String,
        /// Normalize as a method name instead of a fixture name.
        #[arg(long)]
        member: bool,
    },
    /// Discover and run all YAML scenario suites in a directory.
    Test {
        /// The directory holding the suites (defaults to the configured test root).
        path: Option<PathBuf>,
        /// Only run cases whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
    },
}
