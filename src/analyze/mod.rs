//! Per-file analysis and repository aggregation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌────────────────────┐
//! │ path → content  │────▶│ FileAnalyzer     │────▶│ FileAnalysisResult │
//! └─────────────────┘     │ (per file, maybe │     │ (entities, graph)  │
//!                         │  in parallel)    │     └────────────────────┘
//!                         └──────────────────┘               │
//!                                                            ▼
//!                                               ┌────────────────────────┐
//!                                               │ Aggregator → Repository│
//!                                               │ Analysis (totals, per  │
//!                                               │ category / language)   │
//!                                               └────────────────────────┘
//! ```
//!
//! Files never influence each other: entity names are scoped to the file
//! they were found in and edges never cross files.

mod heuristic;
mod repository;
mod traits;
mod types;

pub use heuristic::{HeuristicAnalyzer, DEFAULT_MAX_FILE_BYTES};
pub use repository::{analyze_repository, Aggregator};
pub use traits::FileAnalyzer;
pub use types::{FileAnalysisResult, FileFailure, LanguageShare, RepositoryAnalysis};
