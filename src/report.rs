//! Output formatting for codeatlas results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal summary
//! - JSON: the full analysis plus tool metadata, for other programs
//! - Markdown: a documentation page for the repository

use colored::*;
use serde::{Deserialize, Serialize};

use crate::analyze::{FileAnalysisResult, FileFailure, LanguageShare, RepositoryAnalysis};
use crate::classify::Category;

/// Classes listed per file in Markdown before truncating.
const MAX_CLASSES_PER_FILE: usize = 20;
/// Functions listed per file in Markdown before truncating.
const MAX_FUNCTIONS_PER_FILE: usize = 30;
/// Files documented in Markdown before truncating.
const MAX_DOCUMENTED_FILES: usize = 100;
/// Relationships listed in Markdown before truncating.
const MAX_RELATIONSHIPS: usize = 50;

// =============================================================================
// Statistics
// =============================================================================

/// Flat counters shared by every output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub total_files: usize,
    pub analyzed_files: usize,
    pub failed_files: usize,
    pub code_files: usize,
    pub markup_files: usize,
    pub config_files: usize,
    pub style_files: usize,
    pub other_files: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_entities: usize,
    pub total_relationships: usize,
    pub total_lines: usize,
}

impl RepositoryStats {
    pub fn from_analysis(analysis: &RepositoryAnalysis) -> Self {
        Self {
            total_files: analysis.total_supplied,
            analyzed_files: analysis.files_analyzed,
            failed_files: analysis.failed_count(),
            code_files: analysis.category_count(Category::Code),
            markup_files: analysis.category_count(Category::Markup),
            config_files: analysis.category_count(Category::Config),
            style_files: analysis.category_count(Category::Style),
            other_files: analysis.category_count(Category::Other),
            total_functions: analysis.total_functions,
            total_classes: analysis.total_classes,
            total_entities: analysis.total_entities,
            total_relationships: analysis.total_edges,
            total_lines: analysis.total_lines,
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON document.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub stats: RepositoryStats,
    pub languages: Vec<LanguageShare>,
    pub files: Vec<FileAnalysisResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl JsonReport {
    pub fn new(path: &str, analysis: &RepositoryAnalysis) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: path.to_string(),
            stats: RepositoryStats::from_analysis(analysis),
            languages: analysis.language_breakdown(),
            files: analysis.results.clone(),
            failures: analysis.failures.clone(),
        }
    }
}

/// Render results as pretty-printed JSON.
pub fn to_json(path: &str, analysis: &RepositoryAnalysis) -> anyhow::Result<String> {
    let report = JsonReport::new(path, analysis);
    Ok(serde_json::to_string_pretty(&report)?)
}

// =============================================================================
// Markdown Format
// =============================================================================

/// One-sentence description of a file.
pub fn describe_file(result: &FileAnalysisResult) -> String {
    let ext = result.classification.extension.as_str();
    let lines = thousands(result.line_count);

    if let Some(language) = result.language() {
        let functions = result.function_count();
        let classes = result.class_count();
        let mut desc = format!("A {} source file", language);
        if functions > 0 || classes > 0 {
            let mut parts = Vec::new();
            if functions > 0 {
                parts.push(plural(functions, "function", "functions"));
            }
            if classes > 0 {
                parts.push(plural(classes, "class", "classes"));
            }
            desc.push_str(&format!(" containing {}", parts.join(" and ")));
        }
        desc.push_str(&format!(" with {} lines of code.", lines));
        return desc;
    }

    match result.category() {
        Category::Markup => format!("A markup/documentation file ({}) with {} lines.", ext, lines),
        Category::Config => format!("A configuration file ({}) for project settings.", ext),
        Category::Style => format!("A stylesheet file ({}) for styling.", ext),
        Category::Code | Category::Other if ext.is_empty() => {
            format!("A file with {} lines.", lines)
        }
        Category::Code | Category::Other => format!("A {} file with {} lines.", ext, lines),
    }
}

/// Overview prose for the top of the Markdown page.
pub fn overview(name: &str, analysis: &RepositoryAnalysis) -> String {
    let stats = RepositoryStats::from_analysis(analysis);
    let languages = analysis.files_by_language.len();

    let mut paragraphs = vec![format!(
        "The **{}** repository was supplied as **{}** files.",
        name,
        thousands(stats.total_files)
    )];

    paragraphs.push(format!(
        "The analysis examined **{}** files: **{}** code files, **{}** documentation/markup \
         files, **{}** configuration files and **{}** stylesheet files.",
        thousands(stats.analyzed_files),
        stats.code_files,
        stats.markup_files,
        stats.config_files,
        stats.style_files
    ));

    if stats.code_files > 0 {
        paragraphs.push(format!(
            "The codebase contains **{}** and **{}** across **{}**.",
            plural(stats.total_functions, "function", "functions"),
            plural(stats.total_classes, "class", "classes"),
            plural(languages, "programming language", "programming languages")
        ));
    }

    if stats.failed_files > 0 {
        paragraphs.push(format!(
            "**{}** could not be analyzed and {} listed under Failures.",
            plural(stats.failed_files, "file", "files"),
            if stats.failed_files == 1 { "is" } else { "are" }
        ));
    }

    paragraphs.join("\n\n")
}

/// Render a Markdown documentation page.
pub fn render_markdown(name: &str, analysis: &RepositoryAnalysis) -> String {
    let stats = RepositoryStats::from_analysis(analysis);
    let mut md: Vec<String> = Vec::new();

    md.push(format!("# {} Documentation\n", name));
    md.push(format!(
        "*Generated by codeatlas v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    md.push("## Overview\n".to_string());
    md.push(format!("{}\n", overview(name, analysis)));

    md.push("## Repository Statistics\n".to_string());
    md.push("| Metric | Count |".to_string());
    md.push("|--------|-------|".to_string());
    for (label, value) in [
        ("Total Files", stats.total_files),
        ("Analyzed Files", stats.analyzed_files),
        ("Failed Files", stats.failed_files),
        ("Code Files", stats.code_files),
        ("Markup Files", stats.markup_files),
        ("Config Files", stats.config_files),
        ("Style Files", stats.style_files),
        ("Other Files", stats.other_files),
        ("Functions", stats.total_functions),
        ("Classes", stats.total_classes),
        ("Entities", stats.total_entities),
        ("Relationships", stats.total_relationships),
        ("Lines", stats.total_lines),
    ] {
        md.push(format!("| **{}** | {} |", label, thousands(value)));
    }
    md.push(String::new());

    let languages = analysis.language_breakdown();
    if !languages.is_empty() {
        md.push("## Languages\n".to_string());
        md.push("| Language | Files | Share |".to_string());
        md.push("|----------|-------|-------|".to_string());
        for share in &languages {
            md.push(format!(
                "| {} | {} | {:.1}% |",
                share.language, share.files, share.percent
            ));
        }
        md.push(String::new());
    }

    if !analysis.results.is_empty() {
        md.push("## Code Documentation\n".to_string());
        for result in analysis.results.iter().take(MAX_DOCUMENTED_FILES) {
            write_file_section(&mut md, result);
        }
        if analysis.results.len() > MAX_DOCUMENTED_FILES {
            md.push(format!(
                "*... and {} more files*\n",
                analysis.results.len() - MAX_DOCUMENTED_FILES
            ));
        }
    }

    let edges: Vec<_> = analysis.all_edges().collect();
    if !edges.is_empty() {
        md.push("## Code Relationships\n".to_string());
        md.push("*Names that appear near a function declaration*\n".to_string());
        for edge in edges.iter().take(MAX_RELATIONSHIPS) {
            md.push(format!(
                "- `{}` → `{}` *({}, {})*",
                edge.from,
                edge.to,
                edge.relation.as_str(),
                edge.file
            ));
        }
        if edges.len() > MAX_RELATIONSHIPS {
            md.push(format!(
                "\n*... and {} more relationships*",
                edges.len() - MAX_RELATIONSHIPS
            ));
        }
        md.push(String::new());
    }

    if !analysis.failures.is_empty() {
        md.push("## Failures\n".to_string());
        for failure in &analysis.failures {
            md.push(format!("- `{}`: {}", failure.path, failure.error));
        }
        md.push(String::new());
    }

    md.join("\n")
}

fn write_file_section(md: &mut Vec<String>, result: &FileAnalysisResult) {
    md.push(format!("### `{}`\n", result.path));
    md.push(format!("{}\n", describe_file(result)));

    let classes: Vec<_> = result.classes().collect();
    if !classes.is_empty() {
        md.push("#### Classes\n".to_string());
        for class in classes.iter().take(MAX_CLASSES_PER_FILE) {
            md.push(format!("- **`{}`** {} (line {})", class.name, class.kind, class.line));
        }
        if classes.len() > MAX_CLASSES_PER_FILE {
            md.push(format!("- *... and {} more*", classes.len() - MAX_CLASSES_PER_FILE));
        }
        md.push(String::new());
    }

    let functions: Vec<_> = result.functions().collect();
    if !functions.is_empty() {
        md.push("#### Functions\n".to_string());
        for func in functions.iter().take(MAX_FUNCTIONS_PER_FILE) {
            md.push(format!("- **`{}()`** (line {})", func.name, func.line));
        }
        if functions.len() > MAX_FUNCTIONS_PER_FILE {
            md.push(format!("- *... and {} more*", functions.len() - MAX_FUNCTIONS_PER_FILE));
        }
        md.push(String::new());
    }

    md.push("---\n".to_string());
}

fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", thousands(n), if n == 1 { one } else { many })
}

/// Format with `,` thousands separators.
fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(path: &str, analysis: &RepositoryAnalysis) {
    let stats = RepositoryStats::from_analysis(analysis);

    // Header
    println!();
    print!("  ");
    print!("{}", "codeatlas".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    write_result_summary(&stats);
    println!();

    write_categories(&stats);
    println!();

    let languages = analysis.language_breakdown();
    if !languages.is_empty() {
        write_languages(&languages);
        println!();
    }

    write_entity_totals(&stats);
    println!();

    if !analysis.failures.is_empty() {
        write_failures(&analysis.failures);
        println!();
    }
}

fn write_result_summary(stats: &RepositoryStats) {
    if stats.failed_files == 0 {
        print!("  {}", "✓".green());
    } else {
        print!("  {}", "✗".red());
    }
    print!(
        " {}/{} files analyzed",
        stats.analyzed_files.to_string().bold(),
        stats.total_files
    );
    if stats.failed_files > 0 {
        print!("  {}", format!("({} failed)", stats.failed_files).red());
    }
    println!();
}

fn write_categories(stats: &RepositoryStats) {
    println!("  {}", "Files:".bold());
    for (label, count) in [
        ("code", stats.code_files),
        ("markup", stats.markup_files),
        ("config", stats.config_files),
        ("style", stats.style_files),
        ("other", stats.other_files),
    ] {
        let count = if count > 0 {
            count.to_string().normal()
        } else {
            count.to_string().dimmed()
        };
        println!("    {:<12} {:>6}", label, count);
    }
}

fn write_languages(languages: &[LanguageShare]) {
    println!("  {}", "Languages:".bold());
    for share in languages {
        println!(
            "    {:<12} {:>6}  {}",
            share.language.blue(),
            share.files,
            format!("{:5.1}%", share.percent).dimmed()
        );
    }
}

fn write_entity_totals(stats: &RepositoryStats) {
    println!("  {}", "Entities:".bold());
    println!("    {:<14} {:>6}", "functions", stats.total_functions);
    println!("    {:<14} {:>6}", "classes", stats.total_classes);
    println!("    {:<14} {:>6}", "all entities", stats.total_entities);
    println!("    {:<14} {:>6}", "relationships", stats.total_relationships);
    println!("    {:<14} {:>6}", "lines", thousands(stats.total_lines));
}

fn write_failures(failures: &[FileFailure]) {
    println!("  {} ({}):", "Failures".red().bold(), failures.len());
    for failure in failures {
        print!("    {}", failure.path.blue());
        println!("  {}", failure.error.dimmed());
    }
}
