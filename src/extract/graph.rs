//! Heuristic co-occurrence graph between entities of one file.
//!
//! This is not a call graph. A function "calls" another entity when that
//! entity's name appears as a whole word within a fixed window of lines
//! starting at the function's declaration. Mentions in comments or strings
//! count; calls past the window do not.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Edge, Entity, Relation};

/// Lines scanned after a function declaration, the declaration included.
pub const DEFAULT_WINDOW_LINES: usize = 40;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
    static ref WORD_ONLY: Regex = Regex::new(r"^\w+$").unwrap();
}

/// Edges of a single file, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooccurrenceGraph {
    pub edges: Vec<Edge>,
}

impl CooccurrenceGraph {
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Names referenced from `from`'s window.
    pub fn targets_of<'a>(&'a self, from: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from == from)
            .map(|e| e.to.as_str())
    }
}

/// Build the co-occurrence graph for one file.
///
/// `lines` must be the same split used for extraction so entity line numbers
/// line up. Each `(from, to)` pair appears once even when the source name is
/// declared more than once. Self-references are never emitted.
pub fn build_cooccurrence_graph(
    path: &str,
    entities: &[Entity],
    lines: &[&str],
    window_lines: usize,
) -> CooccurrenceGraph {
    let mut names: Vec<&str> = Vec::new();
    for e in entities {
        if !names.contains(&e.name.as_str()) {
            names.push(&e.name);
        }
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut edges = Vec::new();

    for source in entities.iter().filter(|e| e.kind.is_function_like()) {
        let start = source.line.saturating_sub(1).min(lines.len());
        let end = start.saturating_add(window_lines).min(lines.len());
        let window = Window::new(&lines[start..end]);

        for &target in &names {
            if target == source.name || seen.contains(&(source.name.as_str(), target)) {
                continue;
            }
            if window.mentions(target) {
                seen.insert((source.name.as_str(), target));
                edges.push(Edge {
                    from: source.name.clone(),
                    to: target.to_string(),
                    relation: Relation::Calls,
                    file: path.to_string(),
                });
            }
        }
    }

    CooccurrenceGraph { edges }
}

/// A window of lines with its word tokens indexed once.
struct Window<'a> {
    lines: &'a [&'a str],
    words: HashSet<&'a str>,
}

impl<'a> Window<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        let words = lines
            .iter()
            .flat_map(|line| WORD.find_iter(line).map(|m| m.as_str()))
            .collect();
        Self { lines, words }
    }

    /// Whole-word occurrence of `name`, same result as searching `\bname\b`.
    fn mentions(&self, name: &str) -> bool {
        if WORD_ONLY.is_match(name) {
            return self.words.contains(name);
        }
        match Regex::new(&format!(r"\b{}\b", regex::escape(name))) {
            Ok(re) => self.lines.iter().any(|line| re.is_match(line)),
            Err(_) => false,
        }
    }
}
