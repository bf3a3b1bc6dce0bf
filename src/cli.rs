use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// C-minus source file to parse
    #[arg(default_value = "input.txt")]
    pub file: PathBuf,

    /// Where to write the parse tree
    #[arg(short, long, value_name = "FILE", default_value = "parse_tree.txt")]
    pub tree: PathBuf,

    /// Where to write the syntax errors
    #[arg(short, long, value_name = "FILE", default_value = "syntax_errors.txt")]
    pub errors: PathBuf,

    /// Print the FIRST and FOLLOW sets and the parse table to stdout
    #[arg(long)]
    pub table: bool,
}
