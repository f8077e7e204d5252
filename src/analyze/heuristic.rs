//! Regex-driven analyzer backed by a [`LanguageTable`].

use crate::error::AnalysisError;
use crate::extract::{
    build_cooccurrence_graph, extract_from_lines, CooccurrenceGraph, DEFAULT_WINDOW_LINES,
};
use crate::languages::LanguageTable;

use super::{FileAnalysisResult, FileAnalyzer};

/// Files larger than this are rejected unless configured otherwise.
pub const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;

/// Classifies a file, then extracts entities and the co-occurrence graph
/// when it is code.
#[derive(Debug, Clone)]
pub struct HeuristicAnalyzer<'a> {
    table: &'a LanguageTable,
    window_lines: usize,
    max_file_bytes: usize,
}

impl Default for HeuristicAnalyzer<'static> {
    fn default() -> Self {
        Self::new(LanguageTable::builtin())
    }
}

impl<'a> HeuristicAnalyzer<'a> {
    pub fn new(table: &'a LanguageTable) -> Self {
        Self {
            table,
            window_lines: DEFAULT_WINDOW_LINES,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    /// Set the reference window size. Values below 1 are raised to 1.
    pub fn window_lines(mut self, lines: usize) -> Self {
        self.window_lines = lines.max(1);
        self
    }

    /// Set the largest accepted file size in bytes.
    pub fn max_file_bytes(mut self, bytes: usize) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    pub fn table(&self) -> &LanguageTable {
        self.table
    }
}

impl FileAnalyzer for HeuristicAnalyzer<'_> {
    fn analyze_file(&self, path: &str, content: &str) -> Result<FileAnalysisResult, AnalysisError> {
        if content.len() > self.max_file_bytes {
            return Err(AnalysisError::TooLarge {
                size: content.len(),
                limit: self.max_file_bytes,
            });
        }
        if content.contains('\0') {
            return Err(AnalysisError::Binary);
        }

        let classification = self.table.classify(path);
        let lines: Vec<&str> = content.lines().collect();

        let language = classification
            .language
            .as_deref()
            .and_then(|id| self.table.get(id));

        let (entities, graph) = match language {
            Some(lang) => {
                let entities = extract_from_lines(&lines, lang);
                let graph = build_cooccurrence_graph(path, &entities, &lines, self.window_lines);
                (entities, graph)
            }
            None => (Vec::new(), CooccurrenceGraph::default()),
        };

        log::debug!(
            "{}: {} ({}), {} entities, {} edges",
            path,
            classification.category,
            classification.language.as_deref().unwrap_or("-"),
            entities.len(),
            graph.len()
        );

        Ok(FileAnalysisResult {
            path: path.to_string(),
            classification,
            line_count: lines.len(),
            byte_size: content.len(),
            entities,
            graph,
        })
    }
}
