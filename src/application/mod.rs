// Application layer: runs every exporter against one tree.

pub mod runner;

use crate::common::AnalyzerError;
use crate::domain::Ast;
use crate::domain::document::DocumentFormat;
use crate::ports::dot_exporter::{DotExporter, GraphConfig};
use crate::ports::pretty_printer::{FormatConfig, PrettyPrinter};
use crate::ports::stats_exporter::StatsExporter;
use crate::ports::tree_exporter::TreeExporter;
use crate::ports::{ArtifactExporter, ArtifactSink};
use rayon::prelude::*;
use tracing::{debug, error, info};

/// Result of one exporter.
#[derive(Debug)]
pub struct ExportOutcome {
    pub artifact: String,
    pub result: Result<(), AnalyzerError>,
}

/// Per-artifact outcomes, in exporter order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub outcomes: Vec<ExportOutcome>,
}

impl PipelineReport {
    pub fn failures(&self) -> impl Iterator<Item = &AnalyzerError> + '_ {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    pub fn written(&self) -> impl Iterator<Item = &str> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| o.artifact.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// `0` when every artifact was written, `2` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_complete() {
            0
        } else {
            2
        }
    }
}

/// The four standard artifacts: code, graph, tree document, statistics.
pub fn standard_exporters(
    format: FormatConfig,
    graph: GraphConfig,
    tree_format: DocumentFormat,
) -> Vec<Box<dyn ArtifactExporter>> {
    vec![
        Box::new(PrettyPrinter::new(format)),
        Box::new(DotExporter::new(graph)),
        Box::new(TreeExporter::new(tree_format)),
        Box::new(StatsExporter),
    ]
}

pub struct AnalyzeUsecase {
    pub exporters: Vec<Box<dyn ArtifactExporter>>,
    pub parallel: bool,
}

impl AnalyzeUsecase {
    pub fn new(exporters: Vec<Box<dyn ArtifactExporter>>) -> Self {
        Self {
            exporters,
            parallel: false,
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every exporter once. A failing exporter only loses its own
    /// artifact; the others still run.
    pub fn run(&self, ast: &Ast, sink: &dyn ArtifactSink) -> PipelineReport {
        debug!(
            "Running {} exporters over {} nodes ({})",
            self.exporters.len(),
            ast.len(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let outcomes = if self.parallel {
            self.exporters
                .par_iter()
                .map(|exporter| Self::export_one(exporter.as_ref(), ast, sink))
                .collect()
        } else {
            self.exporters
                .iter()
                .map(|exporter| Self::export_one(exporter.as_ref(), ast, sink))
                .collect()
        };

        PipelineReport { outcomes }
    }

    fn export_one(exporter: &dyn ArtifactExporter, ast: &Ast, sink: &dyn ArtifactSink) -> ExportOutcome {
        let artifact = exporter.artifact().to_string();
        let result = exporter.export(ast.root(), sink).map_err(|e| {
            AnalyzerError::ExportWriteFailure {
                artifact: artifact.clone(),
                reason: e.to_string(),
            }
        });

        match &result {
            Ok(()) => info!("Wrote {}", artifact),
            Err(e) => error!("{}", e),
        }
        ExportOutcome { artifact, result }
    }
}
