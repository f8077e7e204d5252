//! Configuration file schema for codeatlas.
//!
//! Every field is optional; an empty file behaves like the defaults.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::{HeuristicAnalyzer, DEFAULT_MAX_FILE_BYTES};
use crate::extract::DEFAULT_WINDOW_LINES;
use crate::languages::{LanguageDef, LanguageTable};

/// Config file names searched in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codeatlas.yaml", ".codeatlas.yaml"];

/// Default cap on files collected from a directory.
pub const DEFAULT_MAX_FILES: usize = 5000;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// Lines scanned after each function declaration when linking entities.
    #[serde(default)]
    pub window_lines: Option<usize>,
    /// Files above this size are reported as failures instead of analyzed.
    #[serde(default)]
    pub max_file_bytes: Option<usize>,
    /// Stop collecting after this many files.
    #[serde(default)]
    pub max_files: Option<usize>,
    /// Analyze files on a thread pool (default: true).
    #[serde(default)]
    pub parallel: Option<bool>,
    /// Glob patterns for paths to skip (e.g., "**/generated/**").
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Extra languages appended after the built-in table.
    #[serde(default)]
    pub languages: Vec<LanguageDef>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // serde_yaml rejects a fully empty document
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load the config at `explicit`, or the first one discovered, or defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(),
        };
        match path {
            Some(p) => {
                let config = Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
                log::info!("using config {}", p.display());
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn window_lines(&self) -> usize {
        self.window_lines.unwrap_or(DEFAULT_WINDOW_LINES)
    }

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_bytes.unwrap_or(DEFAULT_MAX_FILE_BYTES)
    }

    pub fn max_files(&self) -> usize {
        self.max_files.unwrap_or(DEFAULT_MAX_FILES)
    }

    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    /// Compiled exclude globs.
    pub fn exclude_set(&self) -> anyhow::Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("invalid exclude pattern {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Built-in languages plus the ones declared here.
    pub fn language_table(&self) -> anyhow::Result<LanguageTable> {
        let table = LanguageTable::with_extra(&self.languages)?;
        Ok(table)
    }

    /// Analyzer for `table` with this config's limits applied.
    pub fn analyzer<'a>(&self, table: &'a LanguageTable) -> HeuristicAnalyzer<'a> {
        HeuristicAnalyzer::new(table)
            .window_lines(self.window_lines())
            .max_file_bytes(self.max_file_bytes())
    }
}

/// Find a config file in the working directory, then the user config dir.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    directories::ProjectDirs::from("", "", "codeatlas")
        .map(|dirs| dirs.config_dir().join("config.yaml"))
        .filter(|p| p.exists())
}

/// Check a config for invalid values.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.window_lines == Some(0) {
        anyhow::bail!("window_lines must be at least 1");
    }
    if config.max_file_bytes == Some(0) {
        anyhow::bail!("max_file_bytes must be greater than 0");
    }
    if config.max_files == Some(0) {
        anyhow::bail!("max_files must be greater than 0");
    }

    config.exclude_set()?;
    config.language_table()?;

    Ok(())
}
