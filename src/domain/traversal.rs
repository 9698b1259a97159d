//! Traversal Framework
//!
//! A single generic walker shared by every exporter. Visitors receive an
//! `enter` call in pre-order and a `leave` call once all children have been
//! visited; both can read and update an injected accumulator.

use crate::domain::ast::NodeRef;
use crate::domain::node_kind::{CommentKind, ExprKind, MemberKind, NodeKind, StmtKind, TypeKind};
use std::convert::Infallible;

/// What the walker should do after `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// End the traversal now and return the accumulator as it stands.
    Stop,
}

/// Per-kind callbacks. Every hook defaults to a no-op; `enter` and `leave`
/// dispatch to the hooks by category and may themselves be overridden by
/// visitors that treat all nodes alike.
pub trait Visitor {
    type Acc;
    type Error;

    fn enter(&mut self, node: NodeRef<'_>, acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        match node.kind() {
            NodeKind::CompilationUnit => self.enter_compilation_unit(node, acc),
            NodeKind::PackageDecl => self.enter_package(node, acc),
            NodeKind::ImportDecl => self.enter_import(node, acc),
            NodeKind::Type(kind) => self.enter_type_decl(node, kind, acc),
            NodeKind::Member(kind) => self.enter_member(node, kind, acc),
            NodeKind::Parameter => self.enter_parameter(node, acc),
            NodeKind::VariableDeclarator => self.enter_variable(node, acc),
            NodeKind::TypeParameter => self.enter_type_parameter(node, acc),
            NodeKind::CatchClause => self.enter_catch_clause(node, acc),
            NodeKind::SwitchEntry => self.enter_switch_entry(node, acc),
            NodeKind::Stmt(kind) => self.enter_statement(node, kind, acc),
            NodeKind::Expr(kind) => self.enter_expression(node, kind, acc),
            NodeKind::Comment(kind) => self.enter_comment(node, kind, acc),
        }
    }

    fn leave(&mut self, node: NodeRef<'_>, acc: &mut Self::Acc) -> Result<(), Self::Error> {
        match node.kind() {
            NodeKind::CompilationUnit => self.leave_compilation_unit(node, acc),
            NodeKind::PackageDecl => self.leave_package(node, acc),
            NodeKind::ImportDecl => self.leave_import(node, acc),
            NodeKind::Type(kind) => self.leave_type_decl(node, kind, acc),
            NodeKind::Member(kind) => self.leave_member(node, kind, acc),
            NodeKind::Parameter => self.leave_parameter(node, acc),
            NodeKind::VariableDeclarator => self.leave_variable(node, acc),
            NodeKind::TypeParameter => self.leave_type_parameter(node, acc),
            NodeKind::CatchClause => self.leave_catch_clause(node, acc),
            NodeKind::SwitchEntry => self.leave_switch_entry(node, acc),
            NodeKind::Stmt(kind) => self.leave_statement(node, kind, acc),
            NodeKind::Expr(kind) => self.leave_expression(node, kind, acc),
            NodeKind::Comment(kind) => self.leave_comment(node, kind, acc),
        }
    }

    fn enter_compilation_unit(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_package(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_import(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_type_decl(&mut self, _node: NodeRef<'_>, _kind: TypeKind, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_member(&mut self, _node: NodeRef<'_>, _kind: MemberKind, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_parameter(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_variable(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_type_parameter(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_catch_clause(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_switch_entry(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_statement(&mut self, _node: NodeRef<'_>, _kind: StmtKind, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_expression(&mut self, _node: NodeRef<'_>, _kind: ExprKind, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }
    fn enter_comment(&mut self, _node: NodeRef<'_>, _kind: CommentKind, _acc: &mut Self::Acc) -> Result<Flow, Self::Error> {
        Ok(Flow::Continue)
    }

    fn leave_compilation_unit(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_package(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_import(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_type_decl(&mut self, _node: NodeRef<'_>, _kind: TypeKind, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_member(&mut self, _node: NodeRef<'_>, _kind: MemberKind, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_parameter(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_variable(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_type_parameter(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_catch_clause(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_switch_entry(&mut self, _node: NodeRef<'_>, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_statement(&mut self, _node: NodeRef<'_>, _kind: StmtKind, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_expression(&mut self, _node: NodeRef<'_>, _kind: ExprKind, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
    fn leave_comment(&mut self, _node: NodeRef<'_>, _kind: CommentKind, _acc: &mut Self::Acc) -> Result<(), Self::Error> {
        Ok(())
    }
}

enum Step<'a> {
    Enter(NodeRef<'a>),
    Leave(NodeRef<'a>),
}

/// Walk the subtree rooted at `root`, threading `acc` through the visitor.
///
/// Nodes are entered in pre-order with children in source order and left
/// after their last child. The walk uses an explicit stack, so tree depth is
/// bounded by memory rather than by the call stack. A visitor error aborts
/// this walk only; the tree is borrowed immutably throughout.
pub fn walk<'a, V: Visitor + ?Sized>(
    root: NodeRef<'a>,
    visitor: &mut V,
    mut acc: V::Acc,
) -> Result<V::Acc, V::Error> {
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                if visitor.enter(node, &mut acc)? == Flow::Stop {
                    return Ok(acc);
                }
                stack.push(Step::Leave(node));
                stack.extend(node.children().rev().map(Step::Enter));
            }
            Step::Leave(node) => visitor.leave(node, &mut acc)?,
        }
    }
    Ok(acc)
}

struct NodeCounter;

impl Visitor for NodeCounter {
    type Acc = usize;
    type Error = Infallible;

    fn enter(&mut self, _node: NodeRef<'_>, acc: &mut usize) -> Result<Flow, Infallible> {
        *acc += 1;
        Ok(Flow::Continue)
    }
}

/// Number of nodes in the subtree rooted at `root`.
pub fn count_nodes(root: NodeRef<'_>) -> usize {
    match walk(root, &mut NodeCounter, 0) {
        Ok(count) => count,
        Err(never) => match never {},
    }
}
