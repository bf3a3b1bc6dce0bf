use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::grammar::{Grammar, Symbol};

/// Terminals plus, where it applies, `Epsilon` (FIRST) or `EndOfInput` (FOLLOW).
pub type TerminalSet = BTreeSet<Symbol>;

/// One set per nonterminal, in grammar order.
pub type SymbolSets = IndexMap<String, TerminalSet>;

#[derive(Debug, Clone, PartialEq)]
pub struct FirstFollow {
    pub first: SymbolSets,
    pub follow: SymbolSets,
}

impl FirstFollow {
    /// Runs both fixed points to completion. FOLLOW(start) is seeded with the
    /// end marker before the first FOLLOW pass.
    pub fn solve(grammar: &Grammar) -> Self {
        let empty: SymbolSets = grammar.nonterminals()
            .map(|name| (name.clone(), TerminalSet::new()))
            .collect();

        let mut sets = FirstFollow {
            first: empty.clone(),
            follow: empty,
        };

        while sets.first_pass(grammar) {}

        if let Some(start) = sets.follow.get_mut(&grammar.start_symbol) {
            start.insert(Symbol::EndOfInput);
        }
        while sets.follow_pass(grammar) {}

        sets
    }

    /// FIRST of a symbol sequence. Contains `Epsilon` when the whole sequence
    /// can derive the empty string, which includes the empty sequence.
    pub fn first_of(&self, sequence: &[Symbol]) -> TerminalSet {
        let mut out = TerminalSet::new();

        for symbol in sequence {
            match symbol {
                Symbol::Epsilon => break,
                Symbol::Nonterminal(name) => {
                    let first = self.first_of_nonterminal(name);
                    out.extend(first.iter().filter(|s| **s != Symbol::Epsilon).cloned());
                    if !first.contains(&Symbol::Epsilon) {
                        return out;
                    }
                }
                terminal => {
                    out.insert(terminal.clone());
                    return out;
                }
            }
        }

        out.insert(Symbol::Epsilon);
        out
    }

    #[cfg(test)]
    pub fn is_nullable(&self, nonterminal: &str) -> bool {
        self.first_of_nonterminal(nonterminal).contains(&Symbol::Epsilon)
    }

    pub fn follow_of(&self, nonterminal: &str) -> Option<&TerminalSet> {
        self.follow.get(nonterminal)
    }

    fn first_of_nonterminal(&self, name: &str) -> &TerminalSet {
        static EMPTY: TerminalSet = TerminalSet::new();
        self.first.get(name).unwrap_or(&EMPTY)
    }

    /// One full pass of the FIRST equations over every alternative. Returns
    /// whether any set grew.
    pub fn first_pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;

        for (name, rewrite) in &grammar.rules {
            for alternative in rewrite {
                let additions = self.first_of(alternative);
                let set = self.first.entry(name.clone()).or_default();
                for symbol in additions {
                    changed |= set.insert(symbol);
                }
            }
        }

        changed
    }

    /// One full pass of the FOLLOW equations over every occurrence of every
    /// nonterminal. Returns whether any set grew.
    pub fn follow_pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;

        for (owner, rewrite) in &grammar.rules {
            for alternative in rewrite {
                for (i, symbol) in alternative.iter().enumerate() {
                    let Symbol::Nonterminal(name) = symbol else {
                        continue;
                    };

                    let trailing = self.first_of(&alternative[i + 1..]);
                    let mut additions: TerminalSet = trailing.iter()
                        .filter(|s| **s != Symbol::Epsilon)
                        .cloned()
                        .collect();
                    if trailing.contains(&Symbol::Epsilon) {
                        if let Some(owner_follow) = self.follow.get(owner) {
                            additions.extend(owner_follow.iter().cloned());
                        }
                    }

                    let set = self.follow.entry(name.clone()).or_default();
                    for symbol in additions {
                        changed |= set.insert(symbol);
                    }
                }
            }
        }

        changed
    }
}
