/*
    This module turns a grammar into the tables a predictive parser runs on
*/

mod first_follow;
mod table;

use itertools::Itertools;

use crate::bnf::FileResult;
use crate::grammar::{Alternative, Grammar, Symbol};

pub use first_follow::{FirstFollow, SymbolSets};
pub use table::ParseTable;

/// A grammar together with everything derived from it. Built once, then only
/// read; parsers borrow it.
#[derive(Debug)]
pub struct Ll1Grammar {
    pub grammar: Grammar,
    pub sets: FirstFollow,
    pub table: ParseTable,
}

impl Ll1Grammar {
    pub fn new(grammar: Grammar) -> Self {
        let sets = FirstFollow::solve(&grammar);
        let table = ParseTable::build(&grammar, &sets);

        Ll1Grammar { grammar, sets, table }
    }

    pub fn cminus() -> FileResult<Self> {
        Grammar::cminus().map(Ll1Grammar::new)
    }

    pub fn start_symbol(&self) -> &str {
        &self.grammar.start_symbol
    }

    /// The alternative the table picks, if any.
    pub fn predict(&self, nonterminal: &str, terminal: &Symbol) -> Option<&Alternative> {
        let index = self.table.lookup(nonterminal, terminal)?;
        self.grammar.rewrite(nonterminal)?.get(index)
    }

    pub fn in_follow(&self, nonterminal: &str, terminal: &Symbol) -> bool {
        self.sets.follow_of(nonterminal).is_some_and(|follow| follow.contains(terminal))
    }
}

fn render_alternative(alternative: &Alternative) -> String {
    alternative.iter().join(" ")
}

fn render_sets(lines: &mut Vec<String>, title: &str, sets: &SymbolSets) {
    lines.push(title.to_string());
    lines.extend(sets.iter().map(|(name, set)| format!("  {} = {{ {} }}", name, set.iter().join(", "))));
}

/// Human-readable dump of FIRST, FOLLOW, every table cell and the conflicts
/// the table resolved.
pub fn render_analysis(analysis: &Ll1Grammar) -> String {
    let rules = &analysis.grammar.rules;
    let mut lines = Vec::new();

    render_sets(&mut lines, "FIRST", &analysis.sets.first);
    render_sets(&mut lines, "FOLLOW", &analysis.sets.follow);

    lines.push("TABLE".to_string());
    for (name, row) in analysis.table.rows() {
        lines.extend(row.iter().map(|(terminal, &index)| {
            format!("  {}, {} -> {}", name, terminal, render_alternative(&rules[name][index]))
        }));
    }

    lines.push("CONFLICTS".to_string());
    lines.extend(analysis.table.conflicts().iter().map(|conflict| {
        let rewrite = &rules[&conflict.nonterminal];
        format!(
            "  {}, {}: kept {}, dropped {}",
            conflict.nonterminal,
            conflict.terminal,
            render_alternative(&rewrite[conflict.kept]),
            render_alternative(&rewrite[conflict.rejected])
        )
    }));

    lines.join("\n")
}
