//! Slimtable turns rows of a test table into tagged instructions for a remote
//! executor, then grades the executor's results cell by cell.
//!
//! The two phases of one table instance:
//!
//! 1. [`shapes::SlimTable::append_instructions`] walks the cells, normalizes
//!    names ([`naming`]), and appends `make`/`call` instructions, registering
//!    one [`expectation::Expectation`] per result that decides a cell.
//! 2. [`shapes::SlimTable::evaluate_expectations`] takes the tag → result
//!    mapping and overwrites each such cell with a verdict.

pub use crate::errors::{Result, SlimError};

pub mod cli;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod expectation;
pub mod harness;
pub mod instruction;
pub mod naming;
pub mod shapes;
pub mod symbols;
pub mod table;
pub mod verdict;
