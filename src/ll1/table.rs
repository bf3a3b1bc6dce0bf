use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::grammar::{Grammar, Symbol};
use super::first_follow::FirstFollow;

/// A registration the table refused because the cell was already taken.
/// Alternatives are indices into the nonterminal's rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub nonterminal: String,
    pub terminal: Symbol,
    pub kept: usize,
    pub rejected: usize,
}

/// LL(1) decisions: (nonterminal, lookahead terminal or end marker) to the
/// index of the chosen alternative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParseTable {
    cells: IndexMap<String, BTreeMap<Symbol, usize>>,
    conflicts: Vec<Conflict>,
}

impl ParseTable {
    /// Fills the table alternative by alternative, in grammar order. A cell is
    /// only ever written while empty, so an earlier alternative beats a later
    /// one, and a concrete alternative listed before an empty one keeps the
    /// lookaheads the empty one would claim through FOLLOW.
    pub fn build(grammar: &Grammar, sets: &FirstFollow) -> Self {
        let mut table = ParseTable::default();

        for (name, rewrite) in &grammar.rules {
            table.cells.entry(name.clone()).or_default();

            for (index, alternative) in rewrite.iter().enumerate() {
                let first = sets.first_of(alternative);

                for terminal in first.iter().filter(|s| **s != Symbol::Epsilon) {
                    table.register(name, terminal, index);
                }

                if first.contains(&Symbol::Epsilon) {
                    for terminal in sets.follow_of(name).into_iter().flatten() {
                        table.register(name, terminal, index);
                    }
                }
            }
        }

        table
    }

    fn register(&mut self, nonterminal: &str, terminal: &Symbol, alternative: usize) {
        let row = self.cells.entry(nonterminal.to_string()).or_default();

        match row.get(terminal).copied() {
            None => {
                row.insert(terminal.clone(), alternative);
            }
            Some(kept) if kept != alternative => self.conflicts.push(Conflict {
                nonterminal: nonterminal.to_string(),
                terminal: terminal.clone(),
                kept,
                rejected: alternative,
            }),
            Some(_) => {}
        }
    }

    pub fn lookup(&self, nonterminal: &str, terminal: &Symbol) -> Option<usize> {
        self.cells.get(nonterminal)?.get(terminal).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &BTreeMap<Symbol, usize>)> {
        self.cells.iter()
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}
