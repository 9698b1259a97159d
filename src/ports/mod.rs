use crate::common::AnalyzerError;
use crate::domain::{Ast, NodeRef};
use std::path::Path;
use thiserror::Error;

pub mod dot_exporter;
pub mod pretty_printer;
pub mod stats_exporter;
pub mod tree_exporter;

/// Produces a validated tree from a source location.
pub trait AstParser {
    fn parse(&self, path: &Path) -> Result<Ast, AnalyzerError>;
}

/// Destination for rendered artifacts.
/// Implementations must be thread-safe (Send + Sync).
pub trait ArtifactSink: Send + Sync {
    fn write(&self, name: &str, contents: &str) -> std::io::Result<()>;
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("rendering aborted: {0}")]
    Render(#[from] pretty_printer::RenderError),
    #[error("encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One artifact produced from the tree by a single walk.
pub trait ArtifactExporter: Send + Sync {
    /// File name of the artifact, e.g. `ast.dot`.
    fn artifact(&self) -> &str;

    fn render(&self, root: NodeRef<'_>) -> Result<String, ExportError>;

    fn export(&self, root: NodeRef<'_>, sink: &dyn ArtifactSink) -> Result<(), ExportError> {
        let contents = self.render(root)?;
        sink.write(self.artifact(), &contents)?;
        Ok(())
    }
}
