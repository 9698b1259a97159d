// Domain model for the Java Code Analyzer: the AST, its traversal, and the
// analyses computed from it.

pub mod ast;
pub mod attribute;
pub mod document;
pub mod node_kind;
pub mod statistics;
pub mod traversal;

pub use ast::{Ast, AstBuilder, AstError, NodeId, NodeRef};
pub use attribute::{keys, AttrValue, Attributes, Position, Span};
pub use node_kind::{CommentKind, ExprKind, MemberKind, NodeKind, StmtKind, TypeKind};
