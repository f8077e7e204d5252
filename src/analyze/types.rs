//! Per-file and repository-level analysis results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::{Category, FileClassification};
use crate::extract::{CooccurrenceGraph, Edge, Entity};

/// Everything learned about one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysisResult {
    pub path: String,
    #[serde(flatten)]
    pub classification: FileClassification,
    pub line_count: usize,
    pub byte_size: usize,
    pub entities: Vec<Entity>,
    pub graph: CooccurrenceGraph,
}

impl FileAnalysisResult {
    pub fn language(&self) -> Option<&str> {
        self.classification.language.as_deref()
    }

    pub fn category(&self) -> Category {
        self.classification.category
    }

    /// Function-like entities (function, func, def, method).
    pub fn functions(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_function_like())
    }

    /// Class-like entities (class, struct, interface, trait, type).
    pub fn classes(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.kind.is_class_like())
    }

    pub fn function_count(&self) -> usize {
        self.functions().count()
    }

    pub fn class_count(&self) -> usize {
        self.classes().count()
    }

    pub fn edges(&self) -> &[Edge] {
        self.graph.edges()
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: String,
    pub error: String,
}

/// Share of code files written in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageShare {
    pub language: String,
    pub files: usize,
    /// Percentage of code files, 0-100.
    pub percent: f64,
}

/// Aggregate over a batch of files.
///
/// Counts only include files that were analyzed successfully; failed files
/// appear in `failures` and nowhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryAnalysis {
    /// Files handed to the aggregator.
    pub total_supplied: usize,
    /// Files analyzed successfully (any category).
    pub files_analyzed: usize,
    pub files_by_category: BTreeMap<Category, usize>,
    pub files_by_language: BTreeMap<String, usize>,
    pub total_entities: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_edges: usize,
    pub total_lines: usize,
    /// Per-file results sorted by path.
    pub results: Vec<FileAnalysisResult>,
    #[serde(default)]
    pub failures: Vec<FileFailure>,
}

impl Default for RepositoryAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryAnalysis {
    /// Empty aggregate with every category present at zero.
    pub fn new() -> Self {
        Self {
            total_supplied: 0,
            files_analyzed: 0,
            files_by_category: Category::ALL.iter().map(|c| (*c, 0)).collect(),
            files_by_language: BTreeMap::new(),
            total_entities: 0,
            total_functions: 0,
            total_classes: 0,
            total_edges: 0,
            total_lines: 0,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Fold one successful file into the totals.
    pub(crate) fn record(&mut self, result: FileAnalysisResult) {
        self.files_analyzed += 1;
        *self.files_by_category.entry(result.category()).or_insert(0) += 1;
        if let Some(lang) = result.language() {
            *self.files_by_language.entry(lang.to_string()).or_insert(0) += 1;
        }
        self.total_entities += result.entities.len();
        self.total_functions += result.function_count();
        self.total_classes += result.class_count();
        self.total_edges += result.graph.len();
        self.total_lines += result.line_count;
        self.results.push(result);
    }

    pub(crate) fn record_failure(&mut self, failure: FileFailure) {
        self.failures.push(failure);
    }

    pub fn category_count(&self, category: Category) -> usize {
        self.files_by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// True when every supplied file was analyzed.
    pub fn is_complete(&self) -> bool {
        self.files_analyzed == self.total_supplied
    }

    pub fn result_for(&self, path: &str) -> Option<&FileAnalysisResult> {
        self.results.iter().find(|r| r.path == path)
    }

    /// Edges across all files, in result order.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.results.iter().flat_map(|r| r.edges().iter())
    }

    /// Languages by file count, descending, ties broken by name.
    pub fn language_breakdown(&self) -> Vec<LanguageShare> {
        let code_files = self.category_count(Category::Code);
        let mut shares: Vec<LanguageShare> = self
            .files_by_language
            .iter()
            .map(|(language, files)| LanguageShare {
                language: language.clone(),
                files: *files,
                percent: if code_files > 0 {
                    *files as f64 * 100.0 / code_files as f64
                } else {
                    0.0
                },
            })
            .collect();
        shares.sort_by(|a, b| b.files.cmp(&a.files).then_with(|| a.language.cmp(&b.language)));
        shares
    }
}
