//! Run configuration.
//!
//! Read from `slimtable.yaml` (or the file given with `--config`); every field
//! is optional and command-line flags override what the file says.
//!
//! ```yaml
//! table_id: "7"
//! test_root: tests/suites
//! use_colors: false
//! log_filter: slimtable=debug
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{Result, SlimError};

pub const DEFAULT_CONFIG_FILE: &str = "slimtable.yaml";
pub const LOG_ENV_VAR: &str = "SLIMTABLE_LOG";

// Color constants for terminal output
pub const RESET: &str = "\x1b[0m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlimConfig {
    /// Id of the first table; later tables in the same document count up from it
    /// when it is numeric.
    pub table_id: String,
    pub test_root: String,
    pub use_colors: bool,
    pub log_filter: String,
}

impl Default for SlimConfig {
    fn default() -> Self {
        Self {
            table_id: "0".to_string(),
            test_root: "tests/suites".to_string(),
            use_colors: atty::is(atty::Stream::Stderr),
            log_filter: "warn".to_string(),
        }
    }
}

impl SlimConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| SlimError::Config {
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| SlimError::io(path, e))?;
        Self::from_yaml(&text)
    }

    /// Loads `path` if given, else `slimtable.yaml` if it exists, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// The id of the `index`-th table in a document.
    pub fn table_id(&self, index: usize) -> String {
        match self.table_id.parse::<usize>().ok().map(|first| first.checked_add(index)) {
            Some(Some(id)) => id.to_string(),
            _ if index == 0 => self.table_id.clone(),
            _ => format!("{}_{}", self.table_id, index),
        }
    }

    /// Apply color formatting to text if colors are enabled.
    pub fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

/// Installs the stderr log subscriber used by the binaries.
///
/// `SLIMTABLE_LOG` wins over `filter`. Calling this twice is harmless.
pub fn init_logging(filter: &str) {
    let filter = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| filter.to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
