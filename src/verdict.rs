//! Verdict text written back into table cells.
//!
//! Downstream renderers key on these exact wrappers.

pub fn pass(content: &str) -> String {
    format!("!style_pass({})", content)
}

pub fn fail(content: &str) -> String {
    format!("!style_fail({})", content)
}

/// `[<content>] !style_fail(<message>)`
pub fn fail_message(content: &str, message: &str) -> String {
    format!("[{}] {}", content, fail(message))
}

pub fn ignore(content: &str) -> String {
    format!("!style_ignore({})", content)
}

/// Marks a cell whose instruction never got a result back.
pub fn error(content: &str) -> String {
    format!("!style_error({})", content)
}

/// Escapes text so the renderer shows it verbatim.
pub fn literal(content: &str) -> String {
    format!("!-{}-!", content)
}

/// How an evaluated cell counts in the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Ignore,
    Error,
    /// Left as plain (possibly symbol-expanded) content.
    Plain,
}
