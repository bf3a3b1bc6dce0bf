use std::fmt::Display;
use std::path::PathBuf;

use itertools::Itertools;

pub trait ErrorType: Display + PartialEq {}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]  {}", self.location, self.error)
    }
}

pub type Errors<T> = Vec<Error<T>>;

/// Failures that stop the program before or after a parse. Syntax errors in
/// the parsed source are never one of these.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("the built-in grammar is invalid:\n{}", render_list(.0))]
    Grammar(Errors<crate::bnf::CompileErrorType>),

    #[error("could not read `{}`: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("could not write `{}`: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

fn render_list<T: ErrorType>(errors: &Errors<T>) -> String {
    errors.iter().join("\n")
}
