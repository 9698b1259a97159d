#![allow(dead_code)]

use java_code_analyzer::domain::document::NodeDocument;
use java_code_analyzer::domain::{CommentKind, ExprKind, MemberKind, NodeKind, StmtKind, TypeKind};

pub fn doc(kind: NodeKind) -> NodeDocument {
    NodeDocument::new(kind)
}

pub fn name(n: &str) -> NodeDocument {
    doc(NodeKind::Expr(ExprKind::Name)).with_attr("name", n)
}

pub fn block(stmts: Vec<NodeDocument>) -> NodeDocument {
    doc(NodeKind::Stmt(StmtKind::Block)).with_children(stmts)
}

pub fn call(method: &str, scope: Option<NodeDocument>, args: Vec<NodeDocument>) -> NodeDocument {
    let mut node = doc(NodeKind::Expr(ExprKind::MethodCall)).with_attr("name", method);
    if let Some(scope) = scope {
        node = node.with_attr("scoped", true).with_child(scope);
    }
    node.with_children(args)
}

pub fn expr_stmt(expr: NodeDocument) -> NodeDocument {
    doc(NodeKind::Stmt(StmtKind::Expression)).with_child(expr)
}

/// Number of nodes in a document, counted recursively.
pub fn doc_size(doc: &NodeDocument) -> usize {
    1 + doc.children.iter().map(doc_size).sum::<usize>()
}

/// A small order tracker: one generic top-level class with an inner class,
/// two methods and a mix of statements and expressions.
pub fn order_tracker() -> NodeDocument {
    let add_order = doc(NodeKind::Member(MemberKind::Method))
        .with_attr("modifiers", "public")
        .with_attr("type", "void")
        .with_attr("name", "addOrder")
        .with_child(doc(NodeKind::Expr(ExprKind::Annotation)).with_attr("name", "Deprecated"))
        .with_child(doc(NodeKind::Parameter).with_attr("type", "Order").with_attr("name", "order"))
        .with_child(block(vec![
            doc(NodeKind::Stmt(StmtKind::If))
                .with_child(
                    doc(NodeKind::Expr(ExprKind::Binary))
                        .with_attr("operator", "==")
                        .with_child(name("order"))
                        .with_child(doc(NodeKind::Expr(ExprKind::Literal)).with_attr("value", "null")),
                )
                .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Throw)).with_child(
                    doc(NodeKind::Expr(ExprKind::ObjectCreation))
                        .with_attr("type", "IllegalArgumentException")
                        .with_child(doc(NodeKind::Expr(ExprKind::Literal)).with_attr("value", "\"order\"")),
                )])),
            expr_stmt(call("add", Some(name("orders")), vec![name("order")])),
        ]));

    let process_all = doc(NodeKind::Member(MemberKind::Method))
        .with_attr("modifiers", "public")
        .with_attr("name", "processAll")
        .with_child(block(vec![
            expr_stmt(call(
                "forEach",
                Some(name("orders")),
                vec![doc(NodeKind::Expr(ExprKind::MethodReference))
                    .with_attr("name", "process")
                    .with_child(name("Order"))],
            )),
            doc(NodeKind::Stmt(StmtKind::Try))
                .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::While))
                    .with_child(name("running"))
                    .with_child(block(vec![expr_stmt(call("tick", None, vec![]))]))]))
                .with_child(
                    doc(NodeKind::CatchClause)
                        .with_child(
                            doc(NodeKind::Parameter)
                                .with_attr("type", "RuntimeException")
                                .with_attr("name", "e"),
                        )
                        .with_child(block(vec![])),
                ),
            expr_stmt(call(
                "removeIf",
                Some(name("orders")),
                vec![doc(NodeKind::Expr(ExprKind::Lambda))
                    .with_child(doc(NodeKind::Parameter).with_attr("name", "o"))
                    .with_child(call("isDone", Some(name("o")), vec![]))],
            )),
        ]));

    let inner = doc(NodeKind::Type(TypeKind::Class))
        .with_attr("modifiers", "static")
        .with_attr("name", "Order")
        .with_child(
            doc(NodeKind::Member(MemberKind::Field))
                .with_attr("modifiers", "private")
                .with_attr("type", "String")
                .with_child(doc(NodeKind::VariableDeclarator).with_attr("name", "id")),
        );

    doc(NodeKind::CompilationUnit)
        .with_child(doc(NodeKind::PackageDecl).with_attr("name", "org.parser"))
        .with_child(doc(NodeKind::ImportDecl).with_attr("name", "java.util.ArrayList"))
        .with_child(doc(NodeKind::ImportDecl).with_attr("name", "java.util.List"))
        .with_child(doc(NodeKind::Comment(CommentKind::Javadoc)).with_attr("content", " Tracks orders. "))
        .with_child(
            doc(NodeKind::Type(TypeKind::Class))
                .with_attr("modifiers", "public")
                .with_attr("name", "OrderTracker")
                .with_child(doc(NodeKind::TypeParameter).with_attr("name", "T"))
                .with_child(
                    doc(NodeKind::Member(MemberKind::Field))
                        .with_attr("modifiers", "private")
                        .with_attr("type", "List<Order>")
                        .with_child(
                            doc(NodeKind::VariableDeclarator).with_attr("name", "orders").with_child(
                                doc(NodeKind::Expr(ExprKind::ObjectCreation)).with_attr("type", "ArrayList<>"),
                            ),
                        ),
                )
                .with_child(add_order)
                .with_child(process_all)
                .with_child(inner)
                .with_child(doc(NodeKind::Comment(CommentKind::Line)).with_attr("content", " end")),
        )
}
