//! Tree Exporter
//!
//! Writes the hierarchical `{kind, attributes, children}` document. No
//! attribute is dropped, so decoding the artifact rebuilds an isomorphic
//! tree.

use crate::domain::ast::NodeRef;
use crate::domain::document::{DocumentFormat, NodeDocument};
use crate::ports::{ArtifactExporter, ExportError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub format: DocumentFormat,
}

pub struct TreeExporter {
    format: DocumentFormat,
    artifact: String,
}

impl TreeExporter {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            artifact: format!("ast.{}", format.extension()),
        }
    }
}

impl Default for TreeExporter {
    fn default() -> Self {
        Self::new(DocumentFormat::default())
    }
}

impl ArtifactExporter for TreeExporter {
    fn artifact(&self) -> &str {
        &self.artifact
    }

    fn render(&self, root: NodeRef<'_>) -> Result<String, ExportError> {
        NodeDocument::from_node(root)
            .encode(self.format)
            .map_err(|e| ExportError::Encode(e.to_string()))
    }
}
