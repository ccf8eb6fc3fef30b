//! Instructions sent to the remote executor, and the results it sends back.
//!
//! On the wire an instruction is a flat list of strings whose first element is
//! its tag: `["decisionTable_0_1", "call", "decisionTable_0", "doIt"]`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag → returned value, as reported by the executor after a batch has run.
pub type ResultMap = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Make,
    Call,
}

impl InstructionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionKind::Make => "make",
            InstructionKind::Call => "call",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the tag of instruction `number` within the table called `table_name`.
pub fn instruction_tag(table_name: &str, number: usize) -> String {
    format!("{}_{}", table_name, number)
}

/// One tagged construction or invocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Instruction {
    tokens: Vec<String>,
}

impl TryFrom<Vec<String>> for Instruction {
    type Error = crate::SlimError;

    fn try_from(tokens: Vec<String>) -> crate::Result<Self> {
        if tokens.is_empty() {
            return Err(crate::SlimError::UntaggedInstruction);
        }
        Ok(Self { tokens })
    }
}

impl From<Instruction> for Vec<String> {
    fn from(instruction: Instruction) -> Self {
        instruction.tokens
    }
}

impl Instruction {
    pub(crate) fn with_tag(tag: String) -> Self {
        Self { tokens: vec![tag] }
    }

    pub(crate) fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn tag(&self) -> &str {
        &self.tokens[0]
    }

    /// `make` or `call`, once the instruction has been filled in.
    pub fn kind(&self) -> Option<InstructionKind> {
        match self.tokens.get(1).map(String::as_str) {
            Some("make") => Some(InstructionKind::Make),
            Some("call") => Some(InstructionKind::Call),
            _ => None,
        }
    }

    /// The instance being constructed or called.
    pub fn target(&self) -> Option<&str> {
        self.tokens.get(2).map(String::as_str)
    }

    /// The class name of a `make`, or the method name of a `call`.
    pub fn operation(&self) -> Option<&str> {
        self.tokens.get(3).map(String::as_str)
    }

    pub fn arguments(&self) -> &[String] {
        self.tokens.get(4..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Serializes a batch the way the transport hands it over: a JSON array of arrays.
pub fn instructions_to_json(instructions: &[Instruction]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(instructions)?)
}

/// Reads a result mapping from YAML or JSON (JSON is accepted as YAML).
pub fn parse_results(text: &str) -> crate::Result<ResultMap> {
    parse_string_map(text)
}

/// Reads a flat `name: value` mapping. Plain scalars keep their text exactly
/// as written (`0.50`, `007`, `null`); nested values are rejected.
pub fn parse_string_map(text: &str) -> crate::Result<HashMap<String, String>> {
    if text.trim().is_empty() {
        return Ok(HashMap::new());
    }
    Ok(serde_yaml::from_str(text)?)
}
