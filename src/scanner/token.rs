use std::fmt::Display;

use crate::grammar::Symbol;

pub const KEYWORDS: [&str; 7] = ["break", "else", "for", "if", "int", "return", "void"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Id,
    Num,
    Symbol,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    // 1-based line the token starts on
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        Token { kind, lexeme: lexeme.to_string(), line }
    }

    pub fn eof(line: usize) -> Self {
        Token::new(TokenKind::Eof, "$", line)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// The grammar terminal this token stands for in the parse table.
    pub fn terminal(&self) -> Symbol {
        match self.kind {
            TokenKind::Id => Symbol::terminal("ID"),
            TokenKind::Num => Symbol::terminal("NUM"),
            TokenKind::Keyword | TokenKind::Symbol => Symbol::Terminal(self.lexeme.clone()),
            TokenKind::Eof => Symbol::EndOfInput,
        }
    }
}

// How a matched token is labelled in the parse tree
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "(KEYWORD, {})", self.lexeme),
            TokenKind::Id => write!(f, "(ID, {})", self.lexeme),
            TokenKind::Num => write!(f, "(NUM, {})", self.lexeme),
            TokenKind::Symbol => write!(f, "(SYMBOL, {})", self.lexeme),
            TokenKind::Eof => write!(f, "$"),
        }
    }
}

/// Where the parser pulls its tokens from. Implementations must keep
/// returning an end-of-input token once the input is exhausted.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

#[cfg(test)]
pub use buffer::TokenBuffer;
