//! Symbols shared by the tables of one test run.
//!
//! A symbol table is created once per run and handed explicitly to every
//! table that compiles or evaluates against it. There is no global store.

use std::collections::HashMap;

pub mod replacer;

pub use replacer::{
    replace_symbols, replace_symbols_with_full_expansion, SubstitutionMode, SymbolReplacer,
};

/// Named string values visible to symbol substitution.
///
/// Writes never delete; setting an existing name overwrites it.
pub trait SymbolTable {
    fn symbol(&self, name: &str) -> Option<&str>;
    fn set_symbol(&mut self, name: &str, value: &str);
}

/// The default run-scoped symbol table: a plain map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSymbols {
    symbols: HashMap<String, String>,
}

impl LocalSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolTable for LocalSymbols {
    fn symbol(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    fn set_symbol(&mut self, name: &str, value: &str) {
        self.symbols.insert(name.to_string(), value.to_string());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalSymbols {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            symbols: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for LocalSymbols {
    fn from(symbols: HashMap<String, String>) -> Self {
        Self { symbols }
    }
}
