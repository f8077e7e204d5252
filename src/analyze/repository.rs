//! Repository-level aggregation.

use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::AnalysisError;

use super::{FileAnalysisResult, FileAnalyzer, FileFailure, HeuristicAnalyzer, RepositoryAnalysis};

/// Runs a [`FileAnalyzer`] over a batch of files and reduces the results.
///
/// Every call builds its aggregate from scratch, so one aggregator can be
/// reused, or shared between threads, without runs interfering.
pub struct Aggregator<A> {
    analyzer: A,
    parallel: bool,
}

impl<A: FileAnalyzer> Aggregator<A> {
    /// Create an aggregator. Files are analyzed in parallel by default.
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            parallel: true,
        }
    }

    /// Set whether files are analyzed on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Analyze a path → content mapping.
    ///
    /// Paths are sorted before analysis so `results` comes out in the same
    /// order whatever the input order was. A file whose analysis fails or
    /// panics is logged, listed in `failures` and left out of every count.
    pub fn analyze_repository<I, K, V>(&self, files: I) -> RepositoryAnalysis
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str> + Sync,
        V: AsRef<str> + Sync,
    {
        let mut files: Vec<(K, V)> = files.into_iter().collect();
        files.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

        let outcomes: Vec<Result<FileAnalysisResult, FileFailure>> = if self.parallel {
            files
                .par_iter()
                .map(|(path, content)| self.analyze_one(path.as_ref(), content.as_ref()))
                .collect()
        } else {
            files
                .iter()
                .map(|(path, content)| self.analyze_one(path.as_ref(), content.as_ref()))
                .collect()
        };

        let mut analysis = RepositoryAnalysis::new();
        analysis.total_supplied = files.len();
        for outcome in outcomes {
            match outcome {
                Ok(result) => analysis.record(result),
                Err(failure) => analysis.record_failure(failure),
            }
        }

        log::info!(
            "analyzed {}/{} files: {} functions, {} classes, {} edges",
            analysis.files_analyzed,
            analysis.total_supplied,
            analysis.total_functions,
            analysis.total_classes,
            analysis.total_edges
        );

        analysis
    }

    fn analyze_one(&self, path: &str, content: &str) -> Result<FileAnalysisResult, FileFailure> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.analyzer.analyze_file(path, content)
        }))
        .unwrap_or_else(|payload| Err(AnalysisError::Panicked(panic_message(payload.as_ref()))));

        outcome.map_err(|e| {
            log::warn!("skipping {}: {}", path, e);
            FileFailure {
                path: path.to_string(),
                error: e.to_string(),
            }
        })
    }
}

/// Analyze with the built-in language table and default limits.
pub fn analyze_repository<I, K, V>(files: I) -> RepositoryAnalysis
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str> + Sync,
    V: AsRef<str> + Sync,
{
    Aggregator::new(HeuristicAnalyzer::default()).analyze_repository(files)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use std::collections::{BTreeMap, HashMap};

    /// Delegates to the heuristic analyzer except for one poisoned path.
    struct FailingAnalyzer {
        inner: HeuristicAnalyzer<'static>,
        poisoned: &'static str,
        panic: bool,
    }

    impl FileAnalyzer for FailingAnalyzer {
        fn analyze_file(
            &self,
            path: &str,
            content: &str,
        ) -> Result<FileAnalysisResult, AnalysisError> {
            if path == self.poisoned {
                if self.panic {
                    panic!("boom in {}", path);
                }
                return Err(AnalysisError::Other("injected failure".to_string()));
            }
            self.inner.analyze_file(path, content)
        }
    }

    fn three_files() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("a.py", "def foo():\n    bar()\n\ndef bar():\n    pass\n"),
            ("b.js", "class User {}\nfunction greet(u) { return u; }\n"),
            ("c.py", "class Broken:\n    pass\n"),
        ])
    }

    #[test]
    fn test_python_example() {
        let analysis =
            analyze_repository([("a.py", "def foo():\n    bar()\n\ndef bar():\n    pass\n")]);
        assert_eq!(analysis.files_analyzed, 1);
        assert_eq!(analysis.total_functions, 2);
        assert_eq!(analysis.total_edges, 1);

        let file = &analysis.results[0];
        let funcs: Vec<(&str, usize)> = file.functions().map(|e| (e.name.as_str(), e.line)).collect();
        assert_eq!(funcs, vec![("foo", 1), ("bar", 4)]);
        let edge = &file.edges()[0];
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("foo", "bar"));
    }

    #[test]
    fn test_non_code_files_still_counted() {
        let analysis = analyze_repository([("readme.md", "# Title\n"), ("x.unknown", "???")]);
        assert_eq!(analysis.total_supplied, 2);
        assert_eq!(analysis.files_analyzed, 2);
        assert_eq!(analysis.category_count(Category::Markup), 1);
        assert_eq!(analysis.category_count(Category::Other), 1);
        assert_eq!(analysis.total_entities, 0);
        assert!(analysis.files_by_language.is_empty());
    }

    #[test]
    fn test_failure_isolation() {
        let aggregator = Aggregator::new(FailingAnalyzer {
            inner: HeuristicAnalyzer::default(),
            poisoned: "c.py",
            panic: false,
        });
        let analysis = aggregator.analyze_repository(three_files());

        assert_eq!(analysis.total_supplied, 3);
        assert_eq!(analysis.files_analyzed, 2);
        assert!(!analysis.is_complete());
        assert!(analysis.result_for("c.py").is_none());
        assert_eq!(analysis.failures.len(), 1);
        assert_eq!(analysis.failures[0].path, "c.py");
        assert_eq!(analysis.failures[0].error, "injected failure");
        // Broken class from c.py is not counted
        assert_eq!(analysis.total_classes, 1);
        assert_eq!(analysis.total_functions, 3);

        let healthy = analyze_repository(three_files());
        assert_eq!(analysis.result_for("a.py"), healthy.result_for("a.py"));
        assert_eq!(analysis.result_for("b.js"), healthy.result_for("b.js"));
    }

    #[test]
    fn test_panic_isolation() {
        let aggregator = Aggregator::new(FailingAnalyzer {
            inner: HeuristicAnalyzer::default(),
            poisoned: "b.js",
            panic: true,
        })
        .parallel(false);
        let analysis = aggregator.analyze_repository(three_files());

        assert_eq!(analysis.files_analyzed, 2);
        assert_eq!(analysis.failures.len(), 1);
        assert!(analysis.failures[0].error.contains("boom in b.js"));
    }

    #[test]
    fn test_results_sorted_by_path() {
        let analysis = analyze_repository(three_files());
        let paths: Vec<&str> = analysis.results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.py", "b.js", "c.py"]);
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let forward: BTreeMap<String, String> = three_files()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let reversed: Vec<(String, String)> = forward.clone().into_iter().rev().collect();

        let first = Aggregator::new(HeuristicAnalyzer::default()).analyze_repository(&forward);
        let second = Aggregator::new(HeuristicAnalyzer::default())
            .parallel(false)
            .analyze_repository(reversed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let analysis = analyze_repository(Vec::<(String, String)>::new());
        assert_eq!(analysis.total_supplied, 0);
        assert_eq!(analysis.files_analyzed, 0);
        assert!(analysis.is_complete());
        assert!(analysis.language_breakdown().is_empty());
    }
}
