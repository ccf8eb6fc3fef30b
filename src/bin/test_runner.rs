// Slimtable scenario runner: runs the YAML suites under the configured test root
// Usage: cargo run --bin test_runner [filter]

use std::env;
use std::path::PathBuf;

use slimtable::config::{init_logging, SlimConfig};
use slimtable::harness;

fn main() {
    let filter = env::args().nth(1);
    let config = match SlimConfig::discover(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    init_logging(&config.log_filter);
    match harness::run_all(&PathBuf::from(&config.test_root), filter.as_deref(), &config) {
        Ok(summary) if summary.failed == 0 => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
