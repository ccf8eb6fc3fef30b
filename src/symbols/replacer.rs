//! Symbol substitution.
//!
//! A symbol reference is `$` followed by a letter and any run of word
//! characters. The scan walks the string left to right; a known symbol has
//! every literal occurrence of its reference replaced at once, an unknown one
//! is skipped. After a replacement the scan resumes one character past where
//! the `$` stood, so a reference assembled from substituted text is still
//! found. A symbol whose value textually re-creates its own reference keeps
//! expanding; nothing here guards against that.

use lazy_static::lazy_static;
use regex::Regex;

use super::SymbolTable;

lazy_static! {
    static ref SYMBOL_REFERENCE: Regex =
        Regex::new(r"\$([a-zA-Z][a-zA-Z0-9_]*)").expect("symbol pattern is valid");
}

/// How a resolved symbol is written back into the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstitutionMode {
    /// `$x` becomes the stored value.
    Silent,
    /// `$x` becomes `$x->[value]`, keeping the reference visible in verdicts.
    FullExpansion,
}

pub struct SymbolReplacer<'a> {
    symbols: &'a dyn SymbolTable,
    mode: SubstitutionMode,
}

impl<'a> SymbolReplacer<'a> {
    pub fn new(symbols: &'a dyn SymbolTable, mode: SubstitutionMode) -> Self {
        Self { symbols, mode }
    }

    pub fn replace(&self, text: &str) -> String {
        let mut text = text.to_string();
        let mut position = 0;
        while position <= text.len() {
            let Some(found) = SYMBOL_REFERENCE.captures(&text[position..]) else {
                break;
            };
            let Some(name) = found.get(1) else {
                break;
            };
            let name_start = position + name.start();
            let name = name.as_str().to_string();
            if let Some(value) = self.symbols.symbol(&name) {
                let reference = format!("${}", name);
                let replacement = self.translate(&name, value);
                text = text.replace(&reference, &replacement);
            }
            position = next_boundary(&text, name_start);
        }
        text
    }

    fn translate(&self, name: &str, value: &str) -> String {
        match self.mode {
            SubstitutionMode::Silent => value.to_string(),
            SubstitutionMode::FullExpansion => format!("${}->[{}]", name, value),
        }
    }
}

// After a replacement the old offset may fall inside a multi-byte character.
fn next_boundary(text: &str, mut position: usize) -> usize {
    while position < text.len() && !text.is_char_boundary(position) {
        position += 1;
    }
    position
}

/// Replaces every resolvable symbol reference with its value.
pub fn replace_symbols(text: &str, symbols: &dyn SymbolTable) -> String {
    SymbolReplacer::new(symbols, SubstitutionMode::Silent).replace(text)
}

/// Replaces every resolvable `$x` with `$x->[value]`.
pub fn replace_symbols_with_full_expansion(text: &str, symbols: &dyn SymbolTable) -> String {
    SymbolReplacer::new(symbols, SubstitutionMode::FullExpansion).replace(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::LocalSymbols;

    fn symbols(pairs: &[(&str, &str)]) -> LocalSymbols {
        pairs.iter().copied().collect()
    }

    #[test]
    fn silent_mode_replaces_every_occurrence() {
        let table = symbols(&[("x", "5")]);
        assert_eq!(replace_symbols("$x+$x", &table), "5+5");
    }

    #[test]
    fn full_expansion_keeps_the_reference() {
        let table = symbols(&[("x", "5")]);
        assert_eq!(replace_symbols_with_full_expansion("$x", &table), "$x->[5]");
        assert_eq!(
            replace_symbols_with_full_expansion("!style_pass($x)", &table),
            "!style_pass($x->[5])"
        );
    }

    #[test]
    fn unknown_symbols_are_left_alone() {
        let table = symbols(&[("known", "1")]);
        assert_eq!(replace_symbols("$unknown and $known", &table), "$unknown and 1");
        assert_eq!(replace_symbols("no symbols here", &table), "no symbols here");
    }

    #[test]
    fn names_must_start_with_a_letter() {
        let table = symbols(&[("1x", "bad"), ("x", "good")]);
        assert_eq!(replace_symbols("$1x $x", &table), "$1x good");
    }

    #[test]
    fn longest_name_wins() {
        let table = symbols(&[("ab", "1"), ("abc", "2")]);
        assert_eq!(replace_symbols("$abc", &table), "2");
    }

    #[test]
    fn adjacent_references_are_all_found() {
        let table = symbols(&[("a", "1"), ("b", "2")]);
        assert_eq!(replace_symbols("$a$b", &table), "12");
    }

    #[test]
    fn nested_references_expand_through_a_bounded_chain() {
        // Each value introduces the next reference; the chain ends at `c`.
        let table = symbols(&[("a", "x$b"), ("b", "y$c"), ("c", "z")]);
        assert_eq!(replace_symbols("$a", &table), "xyz");
    }

    #[test]
    fn a_value_starting_with_a_reference_is_not_rescanned() {
        let table = symbols(&[("a", "$b"), ("b", "1")]);
        assert_eq!(replace_symbols("$a", &table), "$b");
    }

    #[test]
    fn multibyte_text_around_symbols_is_preserved() {
        let table = symbols(&[("x", ""), ("y", "ü")]);
        assert_eq!(replace_symbols("$xé$y", &table), "éü");
    }
}
