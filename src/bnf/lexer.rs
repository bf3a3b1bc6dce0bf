use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

// The bare word that stands for the empty alternative
const EPSILON_WORD: &str = "EPSILON";

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Epsilon,
    Nonterminal(String),
    Terminal(String),
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '=' | '|' | '"')
}

// Expects the opening quote to be the next character
pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next();
    let text: String = line.peeking_take_while(|&c| c != '"').collect();

    match line.next() {
        Some('"') if text.is_empty() => Err(CompileErrorType::EmptyTerminal),
        Some('"') => Ok(Token::Terminal(text)),
        _ => Err(CompileErrorType::UnmatchedQuote),
    }
}

// A word runs until whitespace or the next piece of BNF punctuation
pub fn lex_word(line: &mut impl PeekingNext<Item = char>) -> Token {
    let word: String = line.peeking_take_while(|&c| !is_delimiter(c)).collect();

    match word.as_str() {
        EPSILON_WORD => Token::Epsilon,
        _ => Token::Nonterminal(word),
    }
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut chars = line.chars().peekable();
    let mut tokens = Vec::new();

    while let Some(&c) = chars.peek() {
        let token = match c {
            '=' => {
                chars.next();
                Token::Equals
            }
            '|' => {
                chars.next();
                Token::Or
            }
            '"' => lex_terminal(&mut chars)?,
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            _ => lex_word(&mut chars),
        };
        tokens.push(token);
    }

    Ok(tokens)
}
