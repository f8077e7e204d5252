//! Command-line interface for codeatlas.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::analyze::Aggregator;
use crate::classify::{self, Category};
use crate::config::{self, Config};
use crate::report;
use crate::sources;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

const FORMATS: &[&str] = &["pretty", "json", "markdown"];

/// Map a repository's files, declarations and their relationships.
///
/// Codeatlas classifies every file (code, markup, config, style, other),
/// finds function and class declarations with per-language patterns and
/// links declarations that appear near each other. It reads text only and
/// never executes or fully parses the code it looks at.
#[derive(Parser)]
#[command(name = "codeatlas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a directory or file
    Analyze(AnalyzeArgs),
    /// List supported languages and file categories
    Languages(LanguagesArgs),
    /// Write a starter config file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty, json, or markdown
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Write the report to a file instead of stdout (json and markdown only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after collecting this many files
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Analyze files one at a time instead of on a thread pool
    #[arg(long)]
    pub sequential: bool,

    /// Exit non-zero when any file could not be analyzed
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the languages command.
#[derive(Parser)]
pub struct LanguagesArgs {
    /// Include languages declared in this config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codeatlas.yaml")]
    pub output: PathBuf,
}

const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Load the explicit or discovered config and validate it.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let (config, _) = Config::load(explicit)?;
    config::validate(&config)?;
    Ok(config)
}

/// Name used in report titles: the directory or file name of `path`.
fn repository_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| path.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if !FORMATS.contains(&args.format.as_str()) {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'markdown'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }
    if args.output.is_some() && args.format == "pretty" {
        eprintln!("Error: --output requires --format json or --format markdown");
        return Ok(EXIT_ERROR);
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(max_files) = args.max_files {
        if max_files == 0 {
            eprintln!("Error: --max-files must be greater than 0");
            return Ok(EXIT_ERROR);
        }
        config.max_files = Some(max_files);
    }
    if args.sequential {
        config.parallel = Some(false);
    }

    let table = config.language_table()?;

    let sources = match sources::collect_sources(&args.path, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if !sources.skipped.is_empty() {
        log::warn!("skipped {} non-text files", sources.skipped.len());
    }
    if sources.truncated {
        eprintln!(
            "Warning: stopped after {} files, raise --max-files to analyze more",
            config.max_files()
        );
    }
    if sources.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let aggregator = Aggregator::new(config.analyzer(&table)).parallel(config.parallel());
    let analysis = aggregator.analyze_repository(&sources.files);

    let path_str = args.path.to_string_lossy().to_string();
    let rendered = match args.format.as_str() {
        "json" => Some(report::to_json(&path_str, &analysis)?),
        "markdown" => Some(report::render_markdown(&repository_name(&args.path), &analysis)),
        _ => {
            report::write_pretty(&path_str, &analysis);
            None
        }
    };

    if let Some(text) = rendered {
        match &args.output {
            Some(out) => {
                write_output(out, &text)?;
                eprintln!("Wrote {}", out.display());
            }
            None => println!("{}", text),
        }
    }

    if args.strict && !analysis.is_complete() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn write_output(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path.display(), e))
}

/// Run the languages command.
pub fn run_languages(args: &LanguagesArgs) -> anyhow::Result<i32> {
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let table = config.language_table()?;

    println!("Languages:");
    println!();
    for lang in table.languages() {
        let kinds: Vec<&str> = lang.kinds().iter().map(|k| k.as_str()).collect();
        println!(
            "  {:<12} {:<28} {}",
            lang.id(),
            lang.extensions().join(", "),
            kinds.join(", ")
        );
    }

    println!();
    println!("Other categories:");
    println!();
    for category in [Category::Markup, Category::Config, Category::Style] {
        let exts = classify::category_extensions(category);
        println!("  {:<12} {}", category.as_str(), exts.join(", "));
    }
    println!("  {:<12} anything else", Category::Other.as_str());

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Err(e) = write_output(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to add excludes or languages", args.output.display());
    println!("  2. Run: codeatlas analyze . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
