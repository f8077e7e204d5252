//! Codeatlas - lexical repository mapping.
//!
//! Codeatlas takes a set of text files, decides what each one is (code,
//! markup, config, style or other), pulls function and class declarations
//! out of code files with per-language regular expressions and links
//! declarations that are mentioned close to each other. It does not parse:
//! everything is line-based pattern matching, fast and approximate.
//!
//! # Architecture
//!
//! - `classify`: extension → category / language
//! - `languages`: the validated, data-driven language pattern table
//! - `extract`: entity extraction and the co-occurrence graph
//! - `analyze`: per-file analysis and repository aggregation
//! - `sources`: collecting text files from a local directory
//! - `config`: YAML configuration
//! - `report`: output formatting (pretty, JSON, Markdown)
//!
//! # Adding a New Language
//!
//! Add a [`languages::LanguageDef`] entry, either to the built-in list in
//! `src/languages/builtin.rs` or under `languages:` in a config file. No
//! other code changes are needed.
//!
//! ```
//! use codeatlas::analyze_repository;
//!
//! let analysis = analyze_repository([("a.py", "def foo():\n    bar()\n\ndef bar():\n    pass\n")]);
//! assert_eq!(analysis.total_functions, 2);
//! assert_eq!(analysis.total_edges, 1);
//! ```

pub mod analyze;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod languages;
pub mod report;
pub mod sources;

pub use analyze::{
    analyze_repository, Aggregator, FileAnalysisResult, FileAnalyzer, FileFailure,
    HeuristicAnalyzer, RepositoryAnalysis,
};
pub use classify::{categorize, classify, detect_language, Category, FileClassification};
pub use config::Config;
pub use error::{AnalysisError, TableError};
pub use extract::{
    build_cooccurrence_graph, extract_entities, CooccurrenceGraph, Edge, Entity, EntityKind,
};
pub use languages::{LanguageDef, LanguagePatternSet, LanguageTable};
