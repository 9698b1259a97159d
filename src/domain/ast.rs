// AST data structures for the Java Code Analyzer.
// The tree lives in an arena; parents are plain indices so that the
// ownership graph stays acyclic.

use crate::domain::attribute::{keys, AttrValue, Attributes, Span};
use crate::domain::node_kind::NodeKind;
use thiserror::Error;

/// Index of a node inside its [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Storage for a single node.
#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    attributes: Attributes,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Violations of the tree invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstError {
    #[error("tree has no nodes")]
    Empty,
    #[error("root must be a CompilationUnit, found {found}")]
    InvalidRoot { found: NodeKind },
    #[error("{parent} cannot contain {child}")]
    MisplacedChild { parent: NodeKind, child: NodeKind },
    #[error("{kind} needs at least {expected} children, found {found}")]
    MissingChildren {
        kind: NodeKind,
        expected: usize,
        found: usize,
    },
    #[error("node {index} is not linked to its parent")]
    BrokenLink { index: usize },
    #[error("tree is too large ({0} nodes)")]
    TooLarge(usize),
}

/// An immutable, validated syntax tree.
#[derive(Debug, Clone)]
pub struct Ast {
    nodes: Vec<NodeData>,
}

impl Ast {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { ast: self, id: NodeId(0) }
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { ast: self, id }
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check every structural invariant of the tree.
    pub fn validate(&self) -> Result<(), AstError> {
        let root = self.nodes.first().ok_or(AstError::Empty)?;
        if root.kind != NodeKind::CompilationUnit || root.parent.is_some() {
            return Err(AstError::InvalidRoot { found: root.kind });
        }

        for (index, data) in self.nodes.iter().enumerate() {
            if index > 0 {
                let linked = data.parent.map_or(false, |parent| {
                    self.nodes[parent.index()]
                        .children
                        .iter()
                        .filter(|child| child.index() == index)
                        .count()
                        == 1
                });
                if !linked {
                    return Err(AstError::BrokenLink { index });
                }
            }

            for child in &data.children {
                let child_kind = self.nodes[child.index()].kind;
                if !data.kind.accepts_child(child_kind) {
                    return Err(AstError::MisplacedChild {
                        parent: data.kind,
                        child: child_kind,
                    });
                }
            }

            let expected = data.kind.min_children();
            if data.children.len() < expected {
                return Err(AstError::MissingChildren {
                    kind: data.kind,
                    expected,
                    found: data.children.len(),
                });
            }
        }
        Ok(())
    }
}

/// Borrowed view of a node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.ast.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn attributes(&self) -> &'a Attributes {
        &self.data().attributes
    }

    pub fn attr(&self, key: &str) -> Option<&'a AttrValue> {
        self.data().attributes.get(key)
    }

    /// Text attribute, if present.
    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.attr(key).and_then(AttrValue::as_text)
    }

    /// Flag attribute; absent flags read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.attr(key).and_then(AttrValue::as_flag).unwrap_or(false)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.attr(key).and_then(AttrValue::as_int)
    }

    /// Source range of the node, when the parser recorded one.
    pub fn range(&self) -> Option<Span> {
        self.attr(keys::RANGE).and_then(AttrValue::as_span)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.text(keys::NAME)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.ast.node(id))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        self.data().children.get(index).map(|id| self.ast.node(*id))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let ast = self.ast;
        self.data().children.iter().map(move |id| ast.node(*id))
    }
}

/// Builds an [`Ast`] atomically. The tree only becomes visible through
/// [`AstBuilder::finish`], after validation.
#[derive(Debug)]
pub struct AstBuilder {
    nodes: Vec<NodeData>,
}

impl AstBuilder {
    /// Start a tree whose root is a `CompilationUnit`.
    pub fn new() -> Self {
        Self::with_root(NodeKind::CompilationUnit, Attributes::new())
    }

    /// Start a tree with an explicit root; `finish` rejects anything that
    /// is not a `CompilationUnit`.
    pub fn with_root(kind: NodeKind, attributes: Attributes) -> Self {
        Self {
            nodes: vec![NodeData {
                kind,
                attributes,
                children: Vec::new(),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent` and return its id.
    pub fn add<K, V>(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.add_node(parent, kind, attributes)
    }

    pub fn add_node(&mut self, parent: NodeId, kind: NodeKind, attributes: Attributes) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            attributes,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Insert or replace an attribute on a node that is still being built.
    pub fn set_attr(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.nodes[id.index()].attributes.insert(key.into(), value.into());
    }

    /// Validate and freeze the tree.
    pub fn finish(self) -> Result<Ast, AstError> {
        if self.nodes.len() > u32::MAX as usize {
            return Err(AstError::TooLarge(self.nodes.len()));
        }
        let ast = Ast { nodes: self.nodes };
        ast.validate()?;
        Ok(ast)
    }
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}
