// Command-line entry point for the Java Code Analyzer.

use anyhow::Result;
use clap::Parser;
use java_code_analyzer::application::runner::{self, RunOptions};
use java_code_analyzer::domain::document::DocumentFormat;
use java_code_analyzer::infrastructure::config::AnalyzerConfig;
use java_code_analyzer::infrastructure::DocumentAstParser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Parsed compilation unit (.yaml, .yml or .json tree document)
    source: PathBuf,

    /// Directory receiving code.txt, ast.dot, ast.yaml and stats.txt
    output_dir: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Format of the tree artifact (yaml, json)
    #[arg(long, value_parser = parse_format)]
    tree_format: Option<DocumentFormat>,

    /// Spaces per indentation level in code.txt
    #[arg(long)]
    indent: Option<usize>,

    /// Run the exporters concurrently
    #[arg(long)]
    parallel: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(s: &str) -> Result<DocumentFormat, String> {
    DocumentFormat::from_str(s).ok_or_else(|| format!("unknown tree format `{}` (expected yaml or json)", s))
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let outcome = load_config(&cli).and_then(|config| {
        let options = RunOptions {
            source: cli.source.clone(),
            output_dir: cli.output_dir.clone(),
            config,
        };
        runner::run(&DocumentAstParser::default(), &options)
    });

    match &outcome {
        Ok(report) if report.is_complete() => {
            println!("Parse tree and statistics saved to: {}", cli.output_dir.display());
        }
        Ok(report) => eprintln!(
            "{} of {} artifacts could not be written to {}",
            report.failures().count(),
            report.outcomes.len(),
            cli.output_dir.display()
        ),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
        }
    }
    std::process::exit(runner::exit_code(&outcome));
}

/// The config file, if any, with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::load_or_default(cli.config.as_deref())?;
    if let Some(format) = cli.tree_format {
        config.tree.format = format;
    }
    if let Some(indent) = cli.indent {
        config.format.indent_width = indent;
    }
    config.pipeline.parallel |= cli.parallel;
    Ok(config)
}
