//! Collect text sources from a local checkout.
//!
//! Stands in for fetching a repository over the network: the result is the
//! same path → content mapping the aggregator consumes. Files that are not
//! valid UTF-8 are skipped here and never reach the analyzer.

use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::Config;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    "__pycache__",
];

/// Text files keyed by relative, `/`-separated path.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub files: BTreeMap<String, String>,
    /// Files that could not be decoded as text.
    pub skipped: Vec<String>,
    /// Whether collection stopped at the configured file cap.
    pub truncated: bool,
}

impl SourceSet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Collect text files under `root`, honoring the config's excludes and cap.
///
/// A file root yields that single file keyed by its file name.
pub fn collect_sources(root: &Path, config: &Config) -> anyhow::Result<SourceSet> {
    let excludes = config.exclude_set()?;
    let max_files = config.max_files();
    let mut set = SourceSet::default();

    let metadata = std::fs::metadata(root)
        .map_err(|e| anyhow::anyhow!("cannot access {}: {}", root.display(), e))?;
    if metadata.is_file() {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        read_into(&mut set, root, name);
        return Ok(set);
    }

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&&*name)
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative_key(root, entry.path());
        if excludes.is_match(&rel) {
            log::debug!("excluded {}", rel);
            continue;
        }

        if set.files.len() >= max_files {
            log::warn!("stopping at {} files (max_files)", max_files);
            set.truncated = true;
            break;
        }

        read_into(&mut set, entry.path(), rel);
    }

    Ok(set)
}

fn read_into(set: &mut SourceSet, path: &Path, key: String) {
    match std::fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => {
                set.files.insert(key, text);
            }
            Err(_) => {
                log::debug!("skipping non-text file {}", key);
                set.skipped.push(key);
            }
        },
        Err(e) => {
            log::warn!("cannot read {}: {}", path.display(), e);
            set.skipped.push(key);
        }
    }
}

fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
