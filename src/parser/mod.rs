/*
    This module is the table-driven recursive-descent parser
*/

mod diagnostic;

use crate::grammar::{is_epsilon, Alternative, Symbol};
use crate::ll1::Ll1Grammar;
use crate::parse_tree::ParseTree;
use crate::scanner::{Scanner, Token, TokenSource};

pub use diagnostic::{render_diagnostics, Diagnostic, SyntaxErrorType};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub tree: ParseTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Predictive parser with panic-mode recovery. One instance parses one input.
///
/// Recovery never discards a token without logging it and never logs after
/// an unexpected end of input:
/// - no table entry, lookahead in FOLLOW: the nonterminal is reported missing
///   and skipped, no node is built for it;
/// - no table entry, end of input: report and halt for good;
/// - no table entry otherwise: report the token as illegal, drop it, retry;
/// - terminal mismatch: report it missing and leave the lookahead alone.
pub struct PredictiveParser<'g, S: TokenSource> {
    analysis: &'g Ll1Grammar,
    source: S,
    lookahead: Token,
    diagnostics: Vec<Diagnostic>,
    halted: bool,
}

impl<'g, S: TokenSource> PredictiveParser<'g, S> {
    pub fn new(analysis: &'g Ll1Grammar, mut source: S) -> Self {
        let lookahead = source.next_token();

        PredictiveParser {
            analysis,
            source,
            lookahead,
            diagnostics: Vec::new(),
            halted: false,
        }
    }

    pub fn parse(mut self) -> ParseOutput {
        let analysis = self.analysis;
        let start = analysis.start_symbol();
        let mut root = ParseTree::new(start);

        // The root stands in for the start rule, so its body is parsed straight
        // into it and recovery begins at the body's first symbol
        if let Some(body) = analysis.grammar.rewrite(start).and_then(|rewrite| rewrite.first()) {
            self.parse_sequence(body, &mut root);
        }

        if !self.halted {
            while !self.lookahead.is_eof() {
                self.report(SyntaxErrorType::Illegal(self.lookahead.terminal().to_string()));
                self.advance();
            }
            root.add(ParseTree::leaf(self.lookahead.to_string()));
        }

        ParseOutput { tree: root, diagnostics: self.diagnostics }
    }

    fn advance(&mut self) {
        self.lookahead = self.source.next_token();
    }

    fn report(&mut self, error: SyntaxErrorType) {
        self.diagnostics.push(Diagnostic { line: self.lookahead.line, error });
    }

    fn halt(&mut self) {
        self.report(SyntaxErrorType::UnexpectedEof);
        self.halted = true;
    }

    fn parse_nonterminal(&mut self, nonterminal: &'g str, parent: &mut ParseTree) {
        if self.halted {
            return;
        }

        let mut node = ParseTree::new(nonterminal);
        if self.expand(nonterminal, &mut node) {
            parent.add(node);
        }
    }

    // Fills `node` with the children of the predicted alternative. Returns
    // false when recovery decided the nonterminal is absent.
    fn expand(&mut self, nonterminal: &'g str, node: &mut ParseTree) -> bool {
        let analysis = self.analysis;

        loop {
            let terminal = self.lookahead.terminal();

            if let Some(alternative) = analysis.predict(nonterminal, &terminal) {
                self.parse_sequence(alternative, node);
                return true;
            }

            if analysis.in_follow(nonterminal, &terminal) {
                self.report(SyntaxErrorType::Missing(nonterminal.to_string()));
                return false;
            }

            if terminal == Symbol::EndOfInput {
                self.halt();
                return false;
            }

            self.report(SyntaxErrorType::Illegal(terminal.to_string()));
            self.advance();
        }
    }

    fn parse_sequence(&mut self, alternative: &'g Alternative, node: &mut ParseTree) {
        if is_epsilon(alternative) {
            node.add(ParseTree::leaf(Symbol::Epsilon.to_string()));
            return;
        }

        for symbol in alternative {
            if self.halted {
                break;
            }
            match symbol {
                Symbol::Nonterminal(name) => self.parse_nonterminal(name, node),
                expected => self.match_terminal(expected, node),
            }
        }
    }

    fn match_terminal(&mut self, expected: &Symbol, parent: &mut ParseTree) {
        if self.halted {
            return;
        }

        if self.lookahead.terminal() == *expected {
            parent.add(ParseTree::leaf(self.lookahead.to_string()));
            self.advance();
        } else if self.lookahead.is_eof() {
            self.halt();
        } else {
            self.report(SyntaxErrorType::Missing(expected.to_string()));
        }
    }
}

/// Scans and parses C-minus source text in one go.
pub fn parse_source(analysis: &Ll1Grammar, source: &str) -> ParseOutput {
    PredictiveParser::new(analysis, Scanner::new(source)).parse()
}
