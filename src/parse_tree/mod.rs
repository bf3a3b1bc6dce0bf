/*
    This module holds parse trees and draws them as text
*/

use std::fmt::Display;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub label: String,
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn new(label: impl Into<String>) -> Self {
        ParseTree { label: label.into(), children: Vec::new() }
    }

    pub fn leaf(label: impl Into<String>) -> Self {
        ParseTree::new(label)
    }

    #[cfg(test)]
    pub fn with_children(label: impl Into<String>, children: Vec<ParseTree>) -> Self {
        ParseTree { label: label.into(), children }
    }

    pub fn add(&mut self, child: ParseTree) {
        self.children.push(child);
    }

    /// Labels of all leaves, left to right.
    #[cfg(test)]
    pub fn leaves(&self) -> Vec<&str> {
        if self.children.is_empty() {
            return vec![self.label.as_str()];
        }
        self.children.iter().flat_map(ParseTree::leaves).collect()
    }

    pub fn render(&self) -> String {
        let mut lines = vec![self.label.clone()];
        render_children(self, "", &mut lines);
        lines.join("\n")
    }
}

fn render_children(node: &ParseTree, prefix: &str, lines: &mut Vec<String>) {
    let count = node.children.len();

    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let (branch, continuation) = if last { (LAST_BRANCH, SPACE) } else { (BRANCH, PIPE) };

        lines.push(format!("{}{}{}", prefix, branch, child.label));
        render_children(child, &format!("{}{}", prefix, continuation), lines);
    }
}

impl Display for ParseTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
