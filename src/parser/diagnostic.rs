use std::fmt::Display;

use itertools::Itertools;

use crate::error_handling::ErrorType;

pub const NO_ERRORS: &str = "No syntax errors found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorType {
    // A required nonterminal or terminal is absent; parsing went on as if it
    // had matched nothing
    Missing(String),
    // A token that nothing in scope can start; it was thrown away
    Illegal(String),
    // Input ran out while structure was still open; parsing stopped here
    UnexpectedEof,
}

impl ErrorType for SyntaxErrorType {}

impl Display for SyntaxErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorType::Missing(name) => write!(f, "missing {}", name),
            SyntaxErrorType::Illegal(terminal) => write!(f, "illegal {}", terminal),
            SyntaxErrorType::UnexpectedEof => write!(f, "Unexpected EOF"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub error: SyntaxErrorType,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} : syntax error, {}", self.line, self.error)
    }
}

/// One diagnostic per line in the order they were found, or the fixed
/// all-clear line when there are none.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        NO_ERRORS.to_string()
    } else {
        diagnostics.iter().join("\n")
    }
}
