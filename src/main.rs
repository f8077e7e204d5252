//! Codeatlas CLI entry point.

use clap::Parser;
use codeatlas::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli::log_filter(cli.verbose)),
    )
    .init();

    let result = match &cli.command {
        Commands::Analyze(args) => cli::run_analyze(args),
        Commands::Languages(args) => cli::run_languages(args),
        Commands::Init(args) => cli::run_init(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
