//! Tree Document Module
//!
//! Hierarchical `{kind, attributes, children}` projection of an AST, used by
//! the YAML/JSON exporter and by the document parser.

use crate::domain::ast::{Ast, AstBuilder, AstError, NodeId, NodeRef};
use crate::domain::attribute::{AttrValue, Attributes};
use crate::domain::node_kind::NodeKind;
use crate::domain::traversal::{walk, Flow, Visitor};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::Path;
use thiserror::Error;

/// A node and, recursively, its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub kind: NodeKind,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<NodeDocument>,
}

/// Serialization formats for tree documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tree(#[from] AstError),
    #[error("tree is {depth} levels deep, YAML documents hold at most {limit}; use JSON")]
    TooDeep { depth: usize, limit: usize },
}

/// Deepest tree the YAML form can carry. The YAML reader nests at most 128
/// collections and every level costs a mapping plus its `children` list,
/// with two more for a `range` attribute.
pub const MAX_YAML_DEPTH: usize = 60;

impl DocumentFormat {
    /// Parse a format from user input.
    pub fn from_str(s: &str) -> Option<DocumentFormat> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "json" => Some(DocumentFormat::Json),
            _ => None,
        }
    }

    /// Infer the format from a file path's extension.
    pub fn from_path(path: &Path) -> Option<DocumentFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_str)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl NodeDocument {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeDocument) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDocument>) -> Self {
        self.children.extend(children);
        self
    }

    /// Project the subtree rooted at `node`.
    pub fn from_node(node: NodeRef<'_>) -> Self {
        let mut stack = match walk(node, &mut DocumentBuilder, Vec::new()) {
            Ok(stack) => stack,
            Err(never) => match never {},
        };
        stack.pop().unwrap_or_else(|| NodeDocument::new(node.kind()))
    }

    /// Number of levels in the subtree, counting this node.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    pub fn encode(&self, format: DocumentFormat) -> Result<String, DocumentError> {
        Ok(match format {
            DocumentFormat::Yaml => {
                let depth = self.depth();
                if depth > MAX_YAML_DEPTH {
                    return Err(DocumentError::TooDeep { depth, limit: MAX_YAML_DEPTH });
                }
                serde_yaml::to_string(self)?
            }
            DocumentFormat::Json => {
                let mut json = serde_json::to_string_pretty(self)?;
                json.push('\n');
                json
            }
        })
    }

    pub fn decode(text: &str, format: DocumentFormat) -> Result<Self, DocumentError> {
        Ok(match format {
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
            DocumentFormat::Json => {
                // Deep expression chains nest past serde_json's default limit;
                // the stack grows on demand instead.
                let mut de = serde_json::Deserializer::from_str(text);
                de.disable_recursion_limit();
                let doc = NodeDocument::deserialize(serde_stacker::Deserializer::new(&mut de))?;
                de.end()?;
                doc
            }
        })
    }
}

/// Rebuilds documents bottom-up: every node pops its children's documents
/// off the accumulator stack when it is left.
struct DocumentBuilder;

impl Visitor for DocumentBuilder {
    type Acc = Vec<NodeDocument>;
    type Error = Infallible;

    fn enter(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Infallible> {
        Ok(Flow::Continue)
    }

    fn leave(&mut self, node: NodeRef<'_>, acc: &mut Self::Acc) -> Result<(), Infallible> {
        let children = acc.split_off(acc.len() - node.child_count());
        acc.push(NodeDocument {
            kind: node.kind(),
            attributes: node.attributes().clone(),
            children,
        });
        Ok(())
    }
}

impl Ast {
    /// Build and validate a tree from its document form.
    pub fn from_document(doc: &NodeDocument) -> Result<Ast, AstError> {
        let mut builder = AstBuilder::with_root(doc.kind, doc.attributes.clone());
        let mut pending: Vec<(NodeId, &NodeDocument)> = vec![(builder.root(), doc)];

        // Breadth-first keeps sibling order and avoids recursion.
        let mut cursor = 0;
        while cursor < pending.len() {
            let (id, node) = pending[cursor];
            for child in &node.children {
                let child_id = builder.add_node(id, child.kind, child.attributes.clone());
                pending.push((child_id, child));
            }
            cursor += 1;
        }
        builder.finish()
    }

    pub fn to_document(&self) -> NodeDocument {
        NodeDocument::from_node(self.root())
    }
}
