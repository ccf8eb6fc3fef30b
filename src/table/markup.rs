//! Wiki-style pipe text for tables.
//!
//! ```text
//! |decisionTable:MyFixture|
//! |x|double?|
//! |2|4|
//! ```
//!
//! A table whose first row starts with `!|` is a literal table. Lines that do
//! not start with a pipe are ignored, except that a blank line ends a table
//! when a document holds several.

use super::{GridTable, Table};

const LITERAL_PREFIX: &str = "!|";

/// Reads one table from pipe text.
pub fn parse_table(text: &str) -> GridTable {
    let mut rows = Vec::new();
    let mut literal = false;
    for line in text.lines().map(str::trim) {
        let body = if let Some(rest) = line.strip_prefix(LITERAL_PREFIX) {
            if rows.is_empty() {
                literal = true;
            }
            rest
        } else if let Some(rest) = line.strip_prefix('|') {
            rest
        } else {
            continue;
        };
        let body = body.strip_suffix('|').unwrap_or(body);
        rows.push(body.split('|').map(|cell| cell.trim().to_string()).collect());
    }
    GridTable::new(rows).literal(literal)
}

/// Reads every table of a document; tables are separated by blank lines.
pub fn parse_tables(text: &str) -> Vec<GridTable> {
    let mut tables = Vec::new();
    let mut block = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            push_block(&mut tables, &mut block);
        } else {
            block.push_str(line);
            block.push('\n');
        }
    }
    push_block(&mut tables, &mut block);
    tables
}

fn push_block(tables: &mut Vec<GridTable>, block: &mut String) {
    let table = parse_table(block);
    if table.row_count() > 0 {
        tables.push(table);
    }
    block.clear();
}

/// Writes a table back out as pipe text, one row per line.
pub fn render_table(table: &dyn Table) -> String {
    let mut out = String::new();
    for row in 0..table.row_count() {
        if row == 0 && table.is_literal_table() {
            out.push('!');
        }
        out.push('|');
        for col in 0..table.column_count(row) {
            out.push_str(table.cell(col, row).unwrap_or_default());
            out.push('|');
        }
        out.push('\n');
    }
    out
}

/// Writes several tables, separated by blank lines.
pub fn render_tables<'a, I>(tables: I) -> String
where
    I: IntoIterator<Item = &'a GridTable>,
{
    tables
        .into_iter()
        .map(|table| render_table(table))
        .collect::<Vec<_>>()
        .join("\n")
}
