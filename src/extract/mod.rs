//! Lexical entity extraction.
//!
//! Declarations are found with per-language single-line regular expressions
//! and linked by textual proximity. Nothing here parses code: there is no
//! tokenizer, no scope and no name resolution, so expect both misses and
//! false hits on unusual formatting.

mod entity;
mod graph;
mod scan;

pub use entity::{Edge, Entity, EntityKind, KindBucket, Relation};
pub use graph::{build_cooccurrence_graph, CooccurrenceGraph, DEFAULT_WINDOW_LINES};
pub use scan::extract_entities;

pub(crate) use scan::extract_from_lines;
