//! Entity and edge structures produced by the extractor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind label attached to a declaration pattern.
///
/// Labels are not normalized across languages: Go's `type` and Rust's
/// `struct` stay distinct. [`EntityKind::bucket`] collapses them for
/// summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Function,
    Func,
    Def,
    /// Member functions in Java, C# and similar languages. Counted as
    /// function-like next to `function`, `func` and `def`.
    Method,
    Class,
    Struct,
    Interface,
    Trait,
    Type,
    Enum,
    Module,
}

/// Summary bucket for an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindBucket {
    FunctionLike,
    ClassLike,
    Other,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Function,
        EntityKind::Func,
        EntityKind::Def,
        EntityKind::Method,
        EntityKind::Class,
        EntityKind::Struct,
        EntityKind::Interface,
        EntityKind::Trait,
        EntityKind::Type,
        EntityKind::Enum,
        EntityKind::Module,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Func => "func",
            EntityKind::Def => "def",
            EntityKind::Method => "method",
            EntityKind::Class => "class",
            EntityKind::Struct => "struct",
            EntityKind::Interface => "interface",
            EntityKind::Trait => "trait",
            EntityKind::Type => "type",
            EntityKind::Enum => "enum",
            EntityKind::Module => "module",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    pub fn bucket(&self) -> KindBucket {
        match self {
            EntityKind::Function | EntityKind::Func | EntityKind::Def | EntityKind::Method => {
                KindBucket::FunctionLike
            }
            EntityKind::Class
            | EntityKind::Struct
            | EntityKind::Interface
            | EntityKind::Trait
            | EntityKind::Type => KindBucket::ClassLike,
            EntityKind::Enum | EntityKind::Module => KindBucket::Other,
        }
    }

    /// Only function-like entities get a reference window.
    pub fn is_function_like(&self) -> bool {
        self.bucket() == KindBucket::FunctionLike
    }

    pub fn is_class_like(&self) -> bool {
        self.bucket() == KindBucket::ClassLike
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declaration found on a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Unqualified name, never empty.
    pub name: String,
    /// 1-based line of the match.
    pub line: usize,
    pub language: String,
}

/// Relation carried by an edge. Only `calls` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Calls,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Calls => "calls",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A heuristic reference between two entity names of the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub relation: Relation,
    pub file: String,
}
