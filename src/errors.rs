//! Slimtable error handling.
//!
//! Only structural problems become a [`SlimError`]. Anything the remote executor
//! reports, and any expectation text that fails to parse, is turned into a
//! verdict string inside the table instead.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlimError>;

/// Unified error type for compiling tables, loading inputs and running suites.
#[derive(Debug, Error, Diagnostic)]
pub enum SlimError {
    /// The table does not have the shape its interpreter needs.
    #[error("{header}: Bad table: {reason}")]
    #[diagnostic(
        code(slimtable::table::bad_shape),
        help("check the header cell and the row layout of the table")
    )]
    BadTable { header: String, reason: String },

    /// Raised by table shapes that want table processing halted entirely.
    #[error("Syntax error: {message}")]
    #[diagnostic(code(slimtable::table::syntax))]
    Syntax { message: String },

    #[error("no cell at column {col}, row {row}")]
    #[diagnostic(code(slimtable::table::missing_cell))]
    MissingCell { col: usize, row: usize },

    #[error("no result reported for instruction {tag}")]
    #[diagnostic(
        code(slimtable::results::missing),
        help("every emitted tag must be answered by the executor, even if only with an exception marker")
    )]
    MissingResult { tag: String },

    #[error("an instruction needs at least its tag")]
    #[diagnostic(code(slimtable::instruction::untagged))]
    UntaggedInstruction,

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(slimtable::config))]
    Config { message: String },

    #[error("IO error on {path}: {source}")]
    #[diagnostic(code(slimtable::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    #[diagnostic(code(slimtable::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(slimtable::json))]
    Json(#[from] serde_json::Error),
}

impl SlimError {
    pub fn bad_table(header: impl Into<String>, reason: impl Into<String>) -> Self {
        SlimError::BadTable {
            header: header.into(),
            reason: reason.into(),
        }
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        SlimError::Syntax {
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        SlimError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// True for the one error kind allowed to escape the append-all boundary.
    pub fn is_syntax(&self) -> bool {
        matches!(self, SlimError::Syntax { .. })
    }
}
