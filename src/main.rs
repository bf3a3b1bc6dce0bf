mod bnf;
mod cli;
mod error_handling;
#[cfg(test)]
mod generator;
mod grammar;
mod ll1;
mod parse_tree;
mod parser;
mod scanner;

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::error_handling::AppError;
use crate::ll1::{render_analysis, Ll1Grammar};
use crate::parser::render_diagnostics;

fn run(cli: &Cli) -> Result<(), AppError> {
    let analysis = Ll1Grammar::cminus().map_err(AppError::Grammar)?;

    if cli.table {
        println!("{}", render_analysis(&analysis));
        return Ok(());
    }

    let source = fs::read_to_string(&cli.file)
        .map_err(|source| AppError::Read { path: cli.file.clone(), source })?;

    let output = parser::parse_source(&analysis, &source);

    fs::write(&cli.tree, output.tree.render())
        .map_err(|source| AppError::Write { path: cli.tree.clone(), source })?;
    fs::write(&cli.errors, render_diagnostics(&output.diagnostics))
        .map_err(|source| AppError::Write { path: cli.errors.clone(), source })?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
