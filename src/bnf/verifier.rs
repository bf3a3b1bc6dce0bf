use indexmap::IndexMap;

use crate::grammar::Symbol;
use super::{Alternative, CompileError, CompileErrorType, CompileErrors, FileResult, Location, Rewrite};

// Rules keyed by the nonterminal they define, with the line that defined them
pub type IntermediateRuleset = IndexMap<String, (Rewrite, Location)>;

fn undefined_in<'a>(alternative: &'a Alternative, rules: &'a IntermediateRuleset) -> impl Iterator<Item = &'a String> + 'a {
    alternative.iter().filter_map(move |symbol| match symbol {
        Symbol::Nonterminal(name) if !rules.contains_key(name) => Some(name),
        _ => None,
    })
}

/// Reports every use of a nonterminal that has no rule, in file order.
pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let errors: CompileErrors = rules.values()
        .flat_map(|(rewrite, location)| {
            rewrite.iter()
                .flat_map(|alternative| undefined_in(alternative, rules))
                .map(move |name| CompileError {
                    location: location.clone(),
                    error: CompileErrorType::UndefinedNonterminal(name.clone()),
                })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
