/*
    This module reads the BNF text the built-in grammar is written in
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::path::Path;

use crate::grammar::*;
use crate::error_handling::*;
use indexmap::IndexMap;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

#[derive(Debug, Clone, PartialEq)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingEquals,
    // A rule has multiple equals signs
    UnexpectedEquals,
    // The rule line starts with something other than a nonterminal
    MissingNonterminal,
    // There is an unclosed quote
    UnmatchedQuote,
    // An alternative with no symbols, e.g. `A = | "x"`
    EmptyAlternative,
    // `EPSILON` written next to other symbols
    EpsilonNotAlone,
    // An undefined nonterminal was used
    UndefinedNonterminal(String),
    // The same nonterminal has two rule lines
    DuplicateRule(String),
    // No rule lines at all
    EmptyGrammar,
    // `""` has no text to match
    EmptyTerminal,
    // Somehow a full rewrite was parsed as a base alternative
    UnsplitRewrite,
    // A blank line got too deep into the parser
    UnexpectedBlankLine,
}

impl ErrorType for CompileErrorType {}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingEquals => write!(f, "Expected `=` after nonterminal"),
            CompileErrorType::UnexpectedEquals => write!(f, "Unexpected `=` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::UnmatchedQuote => write!(f, "Unmatched quotes"),
            CompileErrorType::EmptyAlternative => write!(f, "Alternative has no symbols (write `EPSILON` for the empty alternative)"),
            CompileErrorType::EpsilonNotAlone => write!(f, "`EPSILON` must be the only symbol of its alternative"),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::DuplicateRule(nonterminal) => write!(f, "`{}` is defined more than once", nonterminal),
            CompileErrorType::EmptyGrammar => write!(f, "Grammar has no rules"),
            CompileErrorType::EmptyTerminal => write!(f, "Terminals cannot be empty"),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser"),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    rewrite: Rewrite,
    location: Location,
}

fn parse_symbol(token: &Token) -> Result<Symbol> {
    match token {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnsplitRewrite),
        Token::Epsilon => Ok(Symbol::Epsilon),
        Token::Nonterminal(name) => Ok(Symbol::nonterminal(name)),
        Token::Terminal(text) => Ok(Symbol::terminal(text)),
    }
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    let alternative = tokens.iter().map(parse_symbol).collect::<Result<Alternative>>()?;

    match alternative.len() {
        0 => Err(CompileErrorType::EmptyAlternative),
        1 => Ok(alternative),
        _ if alternative.contains(&Symbol::Epsilon) => Err(CompileErrorType::EpsilonNotAlone),
        _ => Ok(alternative),
    }
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let (symbol, body) = match tokens {
        [] => return Err(CompileErrorType::UnexpectedBlankLine),
        [Token::Nonterminal(symbol), Token::Equals, body @ ..] => (symbol, body),
        [Token::Nonterminal(_), ..] => return Err(CompileErrorType::MissingEquals),
        _ => return Err(CompileErrorType::MissingNonterminal),
    };

    let rewrite = body.split(|t| *t == Token::Or)
        .map(parse_alternative)
        .collect::<Result<Rewrite>>()?;

    Ok(Rule { symbol: symbol.clone(), rewrite, location })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(|tokens| parse_line(&tokens, location.clone()))
        .map_err(|error| CompileError { location, error })
}

// Blank lines and `;` comments carry no rule
fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

// Keeps definition order; a second rule for the same nonterminal is an error
fn ruleset_from_rules(rules: Vec<Rule>) -> FileResult<IndexMap<String, Rewrite>> {
    let mut ruleset = IntermediateRuleset::with_capacity(rules.len());
    let mut errors = Vec::new();

    for Rule { symbol, rewrite, location } in rules {
        if ruleset.contains_key(&symbol) {
            errors.push(CompileError { location, error: CompileErrorType::DuplicateRule(symbol) });
        } else {
            ruleset.insert(symbol, (rewrite, location));
        }
    }

    if let Err(undefined) = verify_rules(&ruleset) {
        errors.extend(undefined);
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ruleset.into_iter()
        .map(|(symbol, (rewrite, _))| (symbol, rewrite))
        .collect())
}

fn grammar_from_rules(rules: Vec<Rule>, name: &Path) -> FileResult<Grammar> {
    let Some(first) = rules.first() else {
        return Err(vec![CompileError {
            location: Location { file: name.to_path_buf(), line: 0 },
            error: CompileErrorType::EmptyGrammar,
        }]);
    };
    let start_symbol = first.symbol.clone();

    Ok(Grammar { start_symbol, rules: ruleset_from_rules(rules)? })
}

/// Parses a whole grammar text. Every malformed line is reported, not just
/// the first one; `name` only labels error locations.
pub fn parse_str(source: &str, name: &Path) -> FileResult<Grammar> {
    let (rules, errors): (Vec<_>, Vec<_>) = source.lines()
        .enumerate()
        .filter(|(_, line)| is_rule_line(line))
        .map(|(i, line)| parse_lex_line(line, Location { file: name.to_path_buf(), line: i + 1 }))
        .partition_result();

    if !errors.is_empty() {
        return Err(errors);
    }

    grammar_from_rules(rules, name)
}
