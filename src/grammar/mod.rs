/*
    This module is for storing grammars and the built-in C-minus grammar
*/

use std::fmt::Display;
use std::path::Path;

use indexmap::IndexMap;

use crate::bnf::{self, FileResult};

const CMINUS_SOURCE: &str = include_str!("cminus.bnf");
const CMINUS_NAME: &str = "cminus.bnf";

// The base unit in a grammar rule. The end marker never appears inside a
// rule; it only shows up in FOLLOW sets, table keys and the token stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
    Epsilon,
    EndOfInput,
}

impl Symbol {
    pub fn terminal(text: &str) -> Self {
        Symbol::Terminal(text.to_string())
    }

    pub fn nonterminal(name: &str) -> Self {
        Symbol::Nonterminal(name.to_string())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(text) => write!(f, "{}", text),
            Symbol::Nonterminal(name) => write!(f, "{}", name),
            Symbol::Epsilon => write!(f, "epsilon"),
            Symbol::EndOfInput => write!(f, "$"),
        }
    }
}

// The symbols in a single alternative
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

pub fn is_epsilon(alternative: &Alternative) -> bool {
    matches!(alternative.as_slice(), [Symbol::Epsilon])
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: String,
    // Kept in definition order; table construction depends on it
    pub rules: IndexMap<String, Rewrite>,
}

impl Grammar {
    pub fn cminus() -> FileResult<Grammar> {
        bnf::parse_str(CMINUS_SOURCE, Path::new(CMINUS_NAME))
    }

    pub fn rewrite(&self, nonterminal: &str) -> Option<&Rewrite> {
        self.rules.get(nonterminal)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &String> {
        self.rules.keys()
    }
}
