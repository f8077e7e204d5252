//! Core trait for per-file analysis.

use crate::error::AnalysisError;

use super::FileAnalysisResult;

/// Analyzes one file's content.
///
/// Implementations must be pure with respect to their inputs: the aggregator
/// may call them from several threads at once and in any order.
///
/// # Errors
///
/// An error only excludes the offending file from the aggregate. The
/// aggregator also converts panics into [`AnalysisError::Panicked`].
pub trait FileAnalyzer: Send + Sync {
    fn analyze_file(&self, path: &str, content: &str) -> Result<FileAnalysisResult, AnalysisError>;
}

impl<T: FileAnalyzer + ?Sized> FileAnalyzer for &T {
    fn analyze_file(&self, path: &str, content: &str) -> Result<FileAnalysisResult, AnalysisError> {
        (**self).analyze_file(path, content)
    }
}
