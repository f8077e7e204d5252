//! File classification by extension.
//!
//! A path is `code` when a language in the table claims its extension.
//! Otherwise it falls into the markup, config or style set, or `other`.
//! Classification never fails.

use phf::phf_set;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TableError;
use crate::languages::LanguageTable;

static MARKUP_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "md", "markdown", "rst", "txt", "adoc", "asciidoc", "html", "htm", "xhtml", "xml", "tex", "org",
};

static CONFIG_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "json", "yaml", "yml", "toml", "ini", "cfg", "conf", "env", "properties", "lock",
    "gitignore", "dockerignore", "editorconfig",
};

static STYLE_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "css", "scss", "sass", "less", "styl",
};

/// Coarse file category used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Code,
    Markup,
    Config,
    Style,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Code,
        Category::Markup,
        Category::Config,
        Category::Style,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Code => "code",
            Category::Markup => "markup",
            Category::Config => "config",
            Category::Style => "style",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a single path.
///
/// `category` is [`Category::Code`] exactly when `language` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileClassification {
    pub language: Option<String>,
    pub category: Category,
    /// Lowercased extension without the dot; empty when there is none.
    pub extension: String,
}

/// Lowercased text after the last `.` of the final path component.
pub fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Non-code category whose extension set contains `ext`.
pub fn category_set_for(ext: &str) -> Option<Category> {
    if MARKUP_EXTENSIONS.contains(ext) {
        Some(Category::Markup)
    } else if CONFIG_EXTENSIONS.contains(ext) {
        Some(Category::Config)
    } else if STYLE_EXTENSIONS.contains(ext) {
        Some(Category::Style)
    } else {
        None
    }
}

/// Extensions of a non-code category, sorted.
pub fn category_extensions(category: Category) -> Vec<&'static str> {
    let set = match category {
        Category::Markup => &MARKUP_EXTENSIONS,
        Category::Config => &CONFIG_EXTENSIONS,
        Category::Style => &STYLE_EXTENSIONS,
        Category::Code | Category::Other => return Vec::new(),
    };
    let mut exts: Vec<&'static str> = set.iter().copied().collect();
    exts.sort_unstable();
    exts
}

/// Verify the markup, config and style sets are pairwise disjoint.
pub(crate) fn check_category_sets() -> Result<(), TableError> {
    let sets = [
        (Category::Markup, &MARKUP_EXTENSIONS),
        (Category::Config, &CONFIG_EXTENSIONS),
        (Category::Style, &STYLE_EXTENSIONS),
    ];
    for (i, (first, a)) in sets.iter().enumerate() {
        for (second, b) in &sets[i + 1..] {
            if let Some(ext) = a.iter().find(|ext| b.contains(**ext)) {
                return Err(TableError::OverlappingExtension {
                    extension: ext.to_string(),
                    first: format!("{} set", first),
                    second: format!("{} set", second),
                });
            }
        }
    }
    Ok(())
}

/// Language for a path using the built-in table.
pub fn detect_language(path: &str) -> Option<&'static str> {
    LanguageTable::builtin().detect_language(path)
}

/// Category for a path using the built-in table.
pub fn categorize(path: &str) -> Category {
    LanguageTable::builtin().categorize(path)
}

/// Full classification using the built-in table.
pub fn classify(path: &str) -> FileClassification {
    LanguageTable::builtin().classify(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("src/main.RS").as_deref(), Some("rs"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of(".gitignore").as_deref(), Some("gitignore"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of(""), None);
        assert_eq!(extension_of("trailing."), None);
        assert_eq!(extension_of("dir.d/README"), None);
        assert_eq!(extension_of(r"win\dir.v2\main.py").as_deref(), Some("py"));
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("app.py"), Some("python"));
        assert_eq!(detect_language("web/index.JSX"), Some("javascript"));
        assert_eq!(detect_language("lib.ts"), Some("typescript"));
        assert_eq!(detect_language("main.go"), Some("go"));
        assert_eq!(detect_language("lib.rs"), Some("rust"));
        assert_eq!(detect_language("io.h"), Some("c"));
        assert_eq!(detect_language("vec.hpp"), Some("cpp"));
        assert_eq!(detect_language("README.md"), None);
        assert_eq!(detect_language("Makefile"), None);
        assert_eq!(detect_language(""), None);
        assert_eq!(detect_language("x.unknown"), None);
    }

    #[test]
    fn test_every_builtin_extension_detects_its_language() {
        for lang in LanguageTable::builtin().languages() {
            for ext in lang.extensions() {
                let path = format!("dir/file.{}", ext);
                assert_eq!(detect_language(&path), Some(lang.id()), "path {}", path);
            }
        }
    }

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("main.py"), Category::Code);
        assert_eq!(categorize("readme.md"), Category::Markup);
        assert_eq!(categorize("index.html"), Category::Markup);
        assert_eq!(categorize("Cargo.toml"), Category::Config);
        assert_eq!(categorize("package.json"), Category::Config);
        assert_eq!(categorize("site.scss"), Category::Style);
        assert_eq!(categorize("x.unknown"), Category::Other);
        assert_eq!(categorize("LICENSE"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_code_iff_language_detected() {
        let paths = [
            "a.py", "b.md", "c.yaml", "d.css", "e", ".env", "f.rs", "g.zzz", "h.", "i.JSON",
        ];
        for path in paths {
            let c = classify(path);
            assert_eq!(
                c.category == Category::Code,
                c.language.is_some(),
                "path {}",
                path
            );
            assert_eq!(c.language.as_deref(), detect_language(path));
        }
    }

    #[test]
    fn test_category_sets_disjoint() {
        check_category_sets().unwrap();
        let total: usize = Category::ALL
            .iter()
            .map(|c| category_extensions(*c).len())
            .sum();
        let all: std::collections::HashSet<&str> = Category::ALL
            .iter()
            .flat_map(|c| category_extensions(*c))
            .collect();
        assert_eq!(total, all.len());
    }
}
