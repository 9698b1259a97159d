// Statistics report exporter.

use crate::domain::ast::NodeRef;
use crate::domain::statistics::Statistics;
use crate::ports::{ArtifactExporter, ExportError};

pub const ARTIFACT: &str = "stats.txt";

#[derive(Debug, Default)]
pub struct StatsExporter;

impl StatsExporter {
    /// `Stats:` heading followed by the category table.
    pub fn report(root: NodeRef<'_>) -> String {
        format!("Stats:\n{}", Statistics::collect(root).render_table())
    }
}

impl ArtifactExporter for StatsExporter {
    fn artifact(&self) -> &str {
        ARTIFACT
    }

    fn render(&self, root: NodeRef<'_>) -> Result<String, ExportError> {
        Ok(Self::report(root))
    }
}
