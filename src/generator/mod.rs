/*
    This module generates random token streams from a grammar, for testing
    the parser against inputs nobody wrote by hand
*/

use std::collections::{BTreeSet, HashMap};

use rand::prelude::*;

use crate::grammar::*;
use crate::scanner::{Token, TokenKind, KEYWORDS};

const IDS: [&str; 4] = ["x", "y", "count", "main"];
const NUMS: [&str; 3] = ["0", "1", "42"];

// Past this depth only the shallowest alternatives are taken
const MAX_DEPTH: usize = 12;

pub struct Generator<'g> {
    grammar: &'g Grammar,
    heights: HashMap<&'g str, usize>,
    rng: StdRng,
    line: usize,
}

impl<'g> Generator<'g> {
    pub fn new(grammar: &'g Grammar, seed: u64) -> Self {
        Generator { grammar, heights: min_heights(grammar), rng: StdRng::seed_from_u64(seed), line: 1 }
    }

    /// A random sentence of the grammar, as the tokens a scanner would hand
    /// over for it. The end-of-input token is not included.
    pub fn generate(&mut self) -> Vec<Token> {
        let grammar = self.grammar;
        let mut tokens = Vec::new();
        self.line = 1;
        self.generate_nonterminal(&grammar.start_symbol, 0, &mut tokens);
        tokens
    }

    fn generate_nonterminal(&mut self, nonterminal: &'g str, depth: usize, tokens: &mut Vec<Token>) {
        let grammar = self.grammar;
        let Some(rewrite) = grammar.rewrite(nonterminal) else {
            return;
        };

        let alternative = if depth < MAX_DEPTH {
            match rewrite.choose(&mut self.rng) {
                Some(a) => a,
                None => return,
            }
        } else {
            match rewrite.iter().min_by_key(|a| self.alternative_height(a)) {
                Some(a) => a,
                None => return,
            }
        };

        for symbol in alternative {
            self.generate_symbol(symbol, depth + 1, tokens);
        }
    }

    fn generate_symbol(&mut self, symbol: &'g Symbol, depth: usize, tokens: &mut Vec<Token>) {
        match symbol {
            Symbol::Nonterminal(name) => self.generate_nonterminal(name, depth, tokens),
            Symbol::Terminal(text) => {
                let token = self.make_token(text);
                tokens.push(token);
                if matches!(text.as_str(), ";" | "{" | "}") {
                    self.line += 1;
                }
            }
            Symbol::Epsilon | Symbol::EndOfInput => {}
        }
    }

    fn alternative_height(&self, alternative: &Alternative) -> usize {
        alternative_height(alternative, &self.heights).unwrap_or(usize::MAX)
    }

    pub fn make_token(&mut self, terminal: &str) -> Token {
        let (kind, lexeme) = match terminal {
            "ID" => (TokenKind::Id, *IDS.choose(&mut self.rng).unwrap_or(&"x")),
            "NUM" => (TokenKind::Num, *NUMS.choose(&mut self.rng).unwrap_or(&"0")),
            keyword if KEYWORDS.contains(&keyword) => (TokenKind::Keyword, keyword),
            symbol => (TokenKind::Symbol, symbol),
        };
        Token::new(kind, lexeme, self.line)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Every terminal used anywhere in the grammar.
pub fn terminals(grammar: &Grammar) -> BTreeSet<&str> {
    grammar.rules.values()
        .flatten()
        .flatten()
        .filter_map(|symbol| match symbol {
            Symbol::Terminal(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn alternative_height(alternative: &Alternative, heights: &HashMap<&str, usize>) -> Option<usize> {
    alternative.iter()
        .map(|symbol| match symbol {
            Symbol::Nonterminal(name) => heights.get(name.as_str()).copied(),
            _ => Some(0),
        })
        .try_fold(0, |acc, height| height.map(|h| acc.max(h)))
}

// Height of the shallowest derivation tree of each nonterminal, by fixed point
fn min_heights(grammar: &Grammar) -> HashMap<&str, usize> {
    let mut heights = HashMap::new();

    loop {
        let mut changed = false;
        for (name, rewrite) in &grammar.rules {
            let best = rewrite.iter()
                .filter_map(|alternative| alternative_height(alternative, &heights))
                .min()
                .map(|h| h + 1);

            if let Some(best) = best {
                if heights.get(name.as_str()).map_or(true, |&old| best < old) {
                    heights.insert(name.as_str(), best);
                    changed = true;
                }
            }
        }
        if !changed {
            return heights;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ll1::Ll1Grammar;
    use crate::parser::{PredictiveParser, SyntaxErrorType};
    use crate::scanner::TokenBuffer;

    const SEEDS: u64 = 200;

    #[test]
    fn every_nonterminal_terminates() {
        let grammar = Grammar::cminus().unwrap();
        let heights = min_heights(&grammar);

        assert_eq!(heights.len(), grammar.rules.len());
        assert_eq!(heights["Declaration-list"], 1);
    }

    #[test]
    fn generation_is_reproducible() {
        let grammar = Grammar::cminus().unwrap();

        let first = Generator::new(&grammar, 7).generate();
        let second = Generator::new(&grammar, 7).generate();
        assert_eq!(first, second);
    }

    #[test]
    fn generated_programs_parse_cleanly() {
        let analysis = Ll1Grammar::cminus().unwrap();

        for seed in 0..SEEDS {
            let tokens = Generator::new(&analysis.grammar, seed).generate();
            let expected: Vec<String> = tokens.iter().map(Token::to_string).collect();

            let output = PredictiveParser::new(&analysis, TokenBuffer::new(tokens)).parse();

            assert!(output.diagnostics.is_empty(), "seed {}: {:?}", seed, output.diagnostics);
            let leaves: Vec<&str> = output.tree.leaves()
                .into_iter()
                .filter(|&leaf| leaf != "epsilon" && leaf != "$")
                .collect();
            assert_eq!(leaves, expected, "seed {}", seed);
            assert_eq!(output.tree.children.last().map(|c| c.label.as_str()), Some("$"));
        }
    }

    #[test]
    fn corrupted_programs_recover() {
        let analysis = Ll1Grammar::cminus().unwrap();
        let pool: Vec<&str> = terminals(&analysis.grammar).into_iter().collect();

        for seed in 0..SEEDS {
            let mut generator = Generator::new(&analysis.grammar, seed);
            let mut tokens = generator.generate();

            for _ in 0..3 {
                let at = generator.rng().gen_range(0..=tokens.len());
                match generator.rng().gen_range(0..3) {
                    0 if at < tokens.len() => {
                        tokens.remove(at);
                    }
                    1 => {
                        let terminal = *pool.choose(generator.rng()).unwrap();
                        let token = generator.make_token(terminal);
                        tokens.insert(at, token);
                    }
                    _ => tokens.truncate(at),
                }
            }
            let last_line = tokens.iter().map(|t| t.line).max().unwrap_or(1);

            let output = PredictiveParser::new(&analysis, TokenBuffer::new(tokens)).parse();

            let eofs: Vec<usize> = output.diagnostics.iter()
                .enumerate()
                .filter(|(_, d)| d.error == SyntaxErrorType::UnexpectedEof)
                .map(|(i, _)| i)
                .collect();
            let ends_with_marker = output.tree.children.last().is_some_and(|c| c.label == "$");

            match eofs.as_slice() {
                [] => assert!(ends_with_marker, "seed {}", seed),
                [i] => {
                    assert_eq!(*i, output.diagnostics.len() - 1, "seed {}", seed);
                    assert!(!ends_with_marker, "seed {}", seed);
                }
                _ => panic!("seed {}: more than one unexpected end of input", seed),
            }
            assert!(output.diagnostics.iter().all(|d| d.line <= last_line), "seed {}", seed);
        }
    }
}
