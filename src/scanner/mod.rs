/*
    This module turns C-minus source text into tokens for the parser
*/

mod token;

use std::iter::Peekable;
use std::str::Chars;

use itertools::{Itertools, PeekingNext};

pub use token::*;

// One-character symbols that are always returned as they are
const SINGLE_SYMBOLS: [char; 12] = [';', ':', ',', '[', ']', '(', ')', '{', '}', '+', '-', '<'];

// Where a run of malformed characters is considered over
const BOUNDARY_SYMBOLS: [char; 15] = [';', ':', ',', '[', ']', '(', ')', '{', '}', '+', '-', '*', '/', '=', '<'];

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\n' | '\r' | '\t' | '\u{0b}' | '\u{0c}')
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_garbage(c: char) -> bool {
    !is_space(c) && !BOUNDARY_SYMBOLS.contains(&c)
}

/// Pull-based lexer. Malformed lexemes are dropped without a report: numbers
/// glued to letters (`12abc`), numbers with a leading zero (`012`), words
/// glued to invalid characters, stray `*/`, and any other invalid character
/// together with whatever follows it up to the next boundary.
pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner { chars: source.chars().peekable(), line: 1 }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_garbage(&mut self) {
        while self.chars.peeking_next(|&c| is_garbage(c)).is_some() {}
    }

    // True when the next character cannot legally follow a word or number
    fn garbage_follows(&mut self) -> bool {
        self.chars.peek().is_some_and(|&c| is_garbage(c) && !is_word(c))
    }

    fn skip_line_comment(&mut self) {
        while self.chars.peeking_next(|&c| c != '\n' && c != '\u{0c}').is_some() {}
    }

    // Returns false when the input ends inside the comment
    fn skip_block_comment(&mut self) -> bool {
        while let Some(c) = self.bump() {
            if c == '*' && self.chars.peek() == Some(&'/') {
                self.bump();
                return true;
            }
        }
        false
    }

    fn lex_word(&mut self, first: char, line: usize) -> Option<Token> {
        let mut lexeme = first.to_string();
        lexeme.extend(self.chars.peeking_take_while(|&c| is_word(c)));

        if self.garbage_follows() {
            self.skip_garbage();
            return None;
        }

        if KEYWORDS.contains(&lexeme.as_str()) {
            Some(Token::new(TokenKind::Keyword, &lexeme, line))
        } else {
            Some(Token::new(TokenKind::Id, &lexeme, line))
        }
    }

    fn lex_number(&mut self, first: char, line: usize) -> Option<Token> {
        let mut lexeme = first.to_string();
        lexeme.extend(self.chars.peeking_take_while(|c| c.is_ascii_digit()));

        if self.chars.peek().is_some_and(|&c| c.is_alphabetic() || c == '_') {
            self.chars.peeking_take_while(|&c| is_word(c)).for_each(drop);
            return None;
        }

        if lexeme.len() > 1 && lexeme.starts_with('0') {
            return None;
        }

        if self.garbage_follows() {
            self.skip_garbage();
            return None;
        }

        Some(Token::new(TokenKind::Num, &lexeme, line))
    }
}

impl TokenSource for Scanner<'_> {
    fn next_token(&mut self) -> Token {
        loop {
            let line = self.line;
            let Some(c) = self.bump() else {
                return Token::eof(self.line);
            };

            let token = match c {
                c if is_space(c) => None,
                c if c.is_alphabetic() || c == '_' => self.lex_word(c, line),
                c if c.is_ascii_digit() => self.lex_number(c, line),
                '/' => match self.chars.peek().copied() {
                    Some('/') => {
                        self.skip_line_comment();
                        None
                    }
                    Some('*') => {
                        self.bump();
                        if !self.skip_block_comment() {
                            return Token::eof(self.line);
                        }
                        None
                    }
                    _ => Some(Token::new(TokenKind::Symbol, "/", line)),
                },
                '=' => match self.chars.peeking_next(|&c| c == '=') {
                    Some(_) => Some(Token::new(TokenKind::Symbol, "==", line)),
                    None => Some(Token::new(TokenKind::Symbol, "=", line)),
                },
                '*' => match self.chars.peeking_next(|&c| c == '/') {
                    Some(_) => None,
                    None => Some(Token::new(TokenKind::Symbol, "*", line)),
                },
                c if SINGLE_SYMBOLS.contains(&c) => Some(Token::new(TokenKind::Symbol, &c.to_string(), line)),
                _ => {
                    self.skip_garbage();
                    None
                }
            };

            if let Some(token) = token {
                return token;
            }
        }
    }
}
