// One analyzer run: parse, create the output directory, export.

use crate::application::{standard_exporters, AnalyzeUsecase, PipelineReport};
use crate::infrastructure::concurrency::init_thread_pool;
use crate::infrastructure::config::AnalyzerConfig;
use crate::infrastructure::OutputDir;
use crate::ports::AstParser;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Exit code for a run that failed before any artifact was written.
pub const FATAL_EXIT_CODE: i32 = 1;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub config: AnalyzerConfig,
}

/// Parse `source` and write every artifact into `output_dir`.
///
/// The tree is parsed before the directory is created, so an unreadable or
/// malformed source leaves nothing behind.
pub fn run(parser: &dyn AstParser, options: &RunOptions) -> Result<PipelineReport> {
    let config = &options.config;
    debug!("Configuration: {:?}", config);

    let ast = parser.parse(&options.source)?;

    let output = OutputDir::create(&options.output_dir)
        .with_context(|| format!("Cannot create output directory {}", options.output_dir.display()))?;

    if config.pipeline.parallel {
        // The global pool can only be configured once per process.
        if let Err(e) = init_thread_pool(config.pipeline.workers) {
            warn!("{:#}", e);
        }
    }

    let usecase = AnalyzeUsecase::new(standard_exporters(
        config.format.clone(),
        config.graph.clone(),
        config.tree.format,
    ))
    .parallel(config.pipeline.parallel);

    Ok(usecase.run(&ast, &output))
}

/// `0` or `2` from the report, `1` when the run failed outright.
pub fn exit_code(outcome: &Result<PipelineReport>) -> i32 {
    match outcome {
        Ok(report) => report.exit_code(),
        Err(_) => FATAL_EXIT_CODE,
    }
}
