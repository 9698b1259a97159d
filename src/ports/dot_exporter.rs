//! AST DOT Exporter
//!
//! Exports the syntax tree as Graphviz DOT: one node per AST node, one edge
//! per parent/child link, both in pre-order.

use crate::domain::ast::NodeRef;
use crate::domain::attribute::{keys, AttrValue};
use crate::domain::node_kind::NodeKind;
use crate::domain::traversal::{walk, Flow, Visitor};
use crate::ports::{ArtifactExporter, ExportError};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

pub const ARTIFACT: &str = "ast.dot";

const MAX_DESCRIPTOR: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Add shapes and fill colours per node category.
    pub styled: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { styled: true }
    }
}

pub struct DotExporter {
    config: GraphConfig,
}

impl DotExporter {
    pub fn new(config: GraphConfig) -> Self {
        Self { config }
    }

    /// Convert the subtree rooted at `root` to a DOT string.
    pub fn to_dot(&self, root: NodeRef<'_>) -> String {
        let mut lines = Vec::new();

        lines.push("digraph AST {".to_string());
        if self.config.styled {
            lines.push("    rankdir=TB;".to_string());
            lines.push("    node [fontname=\"Helvetica\", fontsize=11];".to_string());
            lines.push("    edge [fontname=\"Helvetica\", fontsize=9];".to_string());
            lines.push("".to_string());
        }

        let mut visitor = DotVisitor {
            styled: self.config.styled,
            next_id: 0,
            open: Vec::new(),
        };
        match walk(root, &mut visitor, lines) {
            Ok(mut lines) => {
                lines.push("}".to_string());
                let mut dot = lines.join("\n");
                dot.push('\n');
                dot
            }
            Err(never) => match never {},
        }
    }
}

impl Default for DotExporter {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl ArtifactExporter for DotExporter {
    fn artifact(&self) -> &str {
        ARTIFACT
    }

    fn render(&self, root: NodeRef<'_>) -> Result<String, ExportError> {
        Ok(self.to_dot(root))
    }
}

/// Assigns pre-order ids; `open` holds the ids of the nodes currently being
/// visited, so its top is always the parent of the next entered node.
struct DotVisitor {
    styled: bool,
    next_id: usize,
    open: Vec<usize>,
}

impl Visitor for DotVisitor {
    type Acc = Vec<String>;
    type Error = Infallible;

    fn enter(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<Flow, Infallible> {
        let id = self.next_id;
        self.next_id += 1;

        let label = escape_label(&node_label(node));
        if self.styled {
            let (shape, fill) = node_style(node.kind());
            let tooltip = node
                .range()
                .map(|span| format!(", tooltip=\"{}\"", AttrValue::from(span)))
                .unwrap_or_default();
            acc.push(format!(
                "    n{} [label=\"{}\", shape={}, style=\"filled\", fillcolor=\"{}\"{}];",
                id, label, shape, fill, tooltip
            ));
        } else {
            acc.push(format!("    n{} [label=\"{}\"];", id, label));
        }
        if let Some(parent) = self.open.last() {
            acc.push(format!("    n{} -> n{};", parent, id));
        }

        self.open.push(id);
        Ok(Flow::Continue)
    }

    fn leave(&mut self, _node: NodeRef<'_>, _acc: &mut Vec<String>) -> Result<(), Infallible> {
        self.open.pop();
        Ok(())
    }
}

/// `Kind` or `Kind: descriptor`, where the descriptor is the most telling
/// attribute the node carries.
pub fn node_label(node: NodeRef<'_>) -> String {
    let descriptor = [keys::NAME, keys::OPERATOR, keys::VALUE, keys::TYPE]
        .iter()
        .find_map(|key| node.text(key).filter(|v| !v.is_empty()))
        .map(str::to_string)
        .or_else(|| {
            node.text(keys::CONTENT)
                .and_then(|c| c.lines().map(str::trim).find(|l| !l.is_empty()))
                .map(str::to_string)
        });

    match descriptor {
        Some(d) => format!("{}: {}", node.kind(), truncate(&d, MAX_DESCRIPTOR)),
        None => node.kind().to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut short: String = text.chars().take(max).collect();
        short.push_str("...");
        short
    }
}

fn node_style(kind: NodeKind) -> (&'static str, &'static str) {
    match kind {
        NodeKind::CompilationUnit => ("folder", "#a6e3a1"),
        NodeKind::PackageDecl | NodeKind::ImportDecl => ("note", "#f5e0dc"),
        NodeKind::Type(_) => ("box", "#89b4fa"),
        NodeKind::Member(_) => ("box", "#b4befe"),
        NodeKind::Parameter
        | NodeKind::VariableDeclarator
        | NodeKind::TypeParameter
        | NodeKind::CatchClause
        | NodeKind::SwitchEntry => ("ellipse", "#94e2d5"),
        NodeKind::Stmt(_) => ("diamond", "#f9e2af"),
        NodeKind::Expr(_) => ("ellipse", "#cba6f7"),
        NodeKind::Comment(_) => ("note", "#6c7086"),
    }
}

fn escape_label(label: &str) -> String {
    label
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
