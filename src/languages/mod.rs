//! Language pattern tables.
//!
//! A [`LanguageTable`] is an ordered list of [`LanguagePatternSet`]s, each
//! mapping file extensions to a set of `(kind, regex)` declaration patterns.
//! Tables are validated once at construction and are read-only afterwards,
//! so they can be shared freely between worker threads.
//!
//! # Adding a Language
//!
//! Append a `BuiltinLanguage` entry in `builtin.rs`, or declare it under
//! `languages:` in the config file. No code changes are needed.

mod builtin;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::classify::{self, Category};
use crate::error::TableError;
use crate::extract::EntityKind;

use builtin::BUILTIN_LANGUAGES;

/// The validated built-in table.
static BUILTIN_TABLE: Lazy<LanguageTable> = Lazy::new(|| {
    LanguageTable::new(builtin_definitions()).unwrap_or_else(|e| {
        panic!("built-in language table is invalid: {}", e);
    })
});

/// Uncompiled definition of a language, as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDef {
    pub id: String,
    pub extensions: Vec<String>,
    pub patterns: Vec<PatternDef>,
}

/// A single declaration pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDef {
    pub kind: EntityKind,
    pub pattern: String,
}

/// Compiled patterns for one language.
#[derive(Debug, Clone)]
pub struct LanguagePatternSet {
    id: String,
    extensions: Vec<String>,
    patterns: Vec<(EntityKind, Regex)>,
}

impl LanguagePatternSet {
    /// Compile a definition, checking that every pattern has a capture group.
    pub fn compile(def: &LanguageDef) -> Result<Self, TableError> {
        if def.extensions.is_empty() {
            return Err(TableError::EmptyExtensions(def.id.clone()));
        }
        if def.patterns.is_empty() {
            return Err(TableError::EmptyPatterns(def.id.clone()));
        }

        for ext in &def.extensions {
            if ext.is_empty() || ext.starts_with('.') || *ext != ext.to_lowercase() {
                return Err(TableError::InvalidExtension {
                    language: def.id.clone(),
                    extension: ext.clone(),
                });
            }
        }

        let patterns = def
            .patterns
            .iter()
            .map(|p| {
                let regex = Regex::new(&p.pattern).map_err(|e| TableError::InvalidPattern {
                    language: def.id.clone(),
                    kind: p.kind.to_string(),
                    source: e,
                })?;
                // captures_len counts the implicit whole-match group
                if regex.captures_len() < 2 {
                    return Err(TableError::MissingCaptureGroup {
                        language: def.id.clone(),
                        kind: p.kind.to_string(),
                        pattern: p.pattern.clone(),
                    });
                }
                Ok((p.kind, regex))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: def.id.clone(),
            extensions: def.extensions.clone(),
            patterns,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Patterns in declaration order.
    pub fn patterns(&self) -> &[(EntityKind, Regex)] {
        &self.patterns
    }

    pub fn handles_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Distinct kinds this language can produce, in first-declared order.
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        for (kind, _) in &self.patterns {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        kinds
    }
}

/// Ordered, validated collection of language pattern sets.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    languages: Vec<LanguagePatternSet>,
}

impl LanguageTable {
    /// Build and validate a table.
    ///
    /// Fails if any pattern does not compile or lacks a capture group, if a
    /// language id repeats, or if a language claims an extension that belongs
    /// to the markup, config or style sets. Two languages may share an
    /// extension; the one declared first wins during lookup.
    pub fn new(defs: Vec<LanguageDef>) -> Result<Self, TableError> {
        classify::check_category_sets()?;

        let mut seen = HashSet::new();
        for def in &defs {
            if !seen.insert(def.id.as_str()) {
                return Err(TableError::DuplicateLanguage(def.id.clone()));
            }
            for ext in &def.extensions {
                if let Some(category) = classify::category_set_for(ext) {
                    return Err(TableError::OverlappingExtension {
                        extension: ext.clone(),
                        first: format!("language {}", def.id),
                        second: format!("{} set", category),
                    });
                }
            }
        }

        let languages = defs
            .iter()
            .map(LanguagePatternSet::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { languages })
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static LanguageTable {
        &BUILTIN_TABLE
    }

    /// Built-in languages followed by `extra`, validated as one table.
    pub fn with_extra(extra: &[LanguageDef]) -> Result<Self, TableError> {
        let mut defs = builtin_definitions();
        defs.extend(extra.iter().cloned());
        Self::new(defs)
    }

    pub fn languages(&self) -> &[LanguagePatternSet] {
        &self.languages
    }

    pub fn get(&self, id: &str) -> Option<&LanguagePatternSet> {
        self.languages.iter().find(|l| l.id == id)
    }

    /// First language, in declaration order, that handles `ext`.
    pub fn for_extension(&self, ext: &str) -> Option<&LanguagePatternSet> {
        self.languages.iter().find(|l| l.handles_extension(ext))
    }

    /// Language for a path, by its lowercased extension.
    pub fn detect_language(&self, path: &str) -> Option<&str> {
        let ext = classify::extension_of(path)?;
        self.for_extension(&ext).map(|l| l.id())
    }

    /// Coarse category for a path.
    pub fn categorize(&self, path: &str) -> Category {
        self.classify(path).category
    }

    /// Language, category and extension for a path.
    pub fn classify(&self, path: &str) -> classify::FileClassification {
        let extension = classify::extension_of(path);
        let language = extension
            .as_deref()
            .and_then(|ext| self.for_extension(ext))
            .map(|l| l.id().to_string());

        let category = if language.is_some() {
            Category::Code
        } else {
            extension
                .as_deref()
                .and_then(classify::category_set_for)
                .unwrap_or(Category::Other)
        };

        classify::FileClassification {
            language,
            category,
            extension: extension.unwrap_or_default(),
        }
    }
}

/// Built-in definitions in declaration order.
pub fn builtin_definitions() -> Vec<LanguageDef> {
    BUILTIN_LANGUAGES
        .iter()
        .map(|lang| LanguageDef {
            id: lang.id.to_string(),
            extensions: lang.extensions.iter().map(|e| e.to_string()).collect(),
            patterns: lang
                .patterns
                .iter()
                .map(|(kind, pattern)| PatternDef {
                    kind: *kind,
                    pattern: pattern.to_string(),
                })
                .collect(),
        })
        .collect()
}
