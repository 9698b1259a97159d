//! Statistics Aggregator
//!
//! Counts structural categories in one pre-order walk and renders them as a
//! fixed-width table.

use crate::domain::ast::NodeRef;
use crate::domain::node_kind::{CommentKind, ExprKind, MemberKind, StmtKind, TypeKind};
use crate::domain::traversal::{walk, Flow, Visitor};
use std::convert::Infallible;
use std::fmt::Write as _;

/// Counted categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Classes,
    Methods,
    Statements,
    Imports,
    Fields,
    Constructors,
    Interfaces,
    Enums,
    Annotations,
    Comments,
    IfStatements,
    ForLoops,
    WhileLoops,
    TryCatchBlocks,
    SwitchStatements,
    LambdaExpressions,
    MethodReferences,
    AssertStatements,
    SynchronizedBlocks,
    ThrowStatements,
    Generics,
    AnnotationUses,
    InnerClasses,
}

impl Category {
    pub const ALL: [Category; 23] = [
        Category::Classes,
        Category::Methods,
        Category::Statements,
        Category::Imports,
        Category::Fields,
        Category::Constructors,
        Category::Interfaces,
        Category::Enums,
        Category::Annotations,
        Category::Comments,
        Category::IfStatements,
        Category::ForLoops,
        Category::WhileLoops,
        Category::TryCatchBlocks,
        Category::SwitchStatements,
        Category::LambdaExpressions,
        Category::MethodReferences,
        Category::AssertStatements,
        Category::SynchronizedBlocks,
        Category::ThrowStatements,
        Category::Generics,
        Category::AnnotationUses,
        Category::InnerClasses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Classes => "Classes",
            Category::Methods => "Methods",
            Category::Statements => "Statements",
            Category::Imports => "Imports",
            Category::Fields => "Fields",
            Category::Constructors => "Constructors",
            Category::Interfaces => "Interfaces",
            Category::Enums => "Enums",
            Category::Annotations => "Annotations",
            Category::Comments => "Comments",
            Category::IfStatements => "If Statements",
            Category::ForLoops => "For Loops",
            Category::WhileLoops => "While Loops",
            Category::TryCatchBlocks => "Try-Catch Blocks",
            Category::SwitchStatements => "Switch Statements",
            Category::LambdaExpressions => "Lambda Expressions",
            Category::MethodReferences => "Method References",
            Category::AssertStatements => "Assert Statements",
            Category::SynchronizedBlocks => "Synchronized Blocks",
            Category::ThrowStatements => "Throw Statements",
            Category::Generics => "Generics",
            Category::AnnotationUses => "Annotation Uses",
            Category::InnerClasses => "Inner Classes",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Occurrence counts for every [`Category`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    counts: [u64; 23],
}

const LABEL_WIDTH: usize = 30;
const COUNT_WIDTH: usize = 5;

impl Statistics {
    /// Count every category in the subtree rooted at `root`.
    pub fn collect(root: NodeRef<'_>) -> Self {
        match walk(root, &mut StatisticsVisitor, Statistics::default()) {
            Ok(stats) => stats,
            Err(never) => match never {},
        }
    }

    pub fn get(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    fn bump(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Categories with their counts, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Bordered table, one row per category.
    pub fn render_table(&self) -> String {
        let border = format!("+{}+{}+\n", "-".repeat(LABEL_WIDTH + 2), "-".repeat(COUNT_WIDTH + 2));
        let mut out = String::new();
        out.push_str(&border);
        let _ = writeln!(out, "| {:<lw$} | {:>cw$} |", "Statistic", "Count", lw = LABEL_WIDTH, cw = COUNT_WIDTH);
        out.push_str(&border);
        for (category, count) in self.iter() {
            let _ = writeln!(
                out,
                "| {:<lw$} | {:>cw$} |",
                category.label(),
                count,
                lw = LABEL_WIDTH,
                cw = COUNT_WIDTH
            );
        }
        out.push_str(&border);
        out
    }
}

struct StatisticsVisitor;

impl Visitor for StatisticsVisitor {
    type Acc = Statistics;
    type Error = Infallible;

    fn enter_import(&mut self, _node: NodeRef<'_>, acc: &mut Statistics) -> Result<Flow, Infallible> {
        acc.bump(Category::Imports);
        Ok(Flow::Continue)
    }

    fn enter_type_decl(&mut self, node: NodeRef<'_>, kind: TypeKind, acc: &mut Statistics) -> Result<Flow, Infallible> {
        match kind {
            TypeKind::Class => acc.bump(Category::Classes),
            TypeKind::Interface => {
                acc.bump(Category::Classes);
                acc.bump(Category::Interfaces);
            }
            TypeKind::Enum => acc.bump(Category::Enums),
            TypeKind::AnnotationType => acc.bump(Category::Annotations),
        }
        if node.parent().map_or(false, |p| p.kind().is_type_decl()) {
            acc.bump(Category::InnerClasses);
        }
        Ok(Flow::Continue)
    }

    fn enter_member(&mut self, _node: NodeRef<'_>, kind: MemberKind, acc: &mut Statistics) -> Result<Flow, Infallible> {
        match kind {
            MemberKind::Method => acc.bump(Category::Methods),
            MemberKind::Constructor => acc.bump(Category::Constructors),
            MemberKind::Field => acc.bump(Category::Fields),
            MemberKind::EnumConstant | MemberKind::AnnotationMember | MemberKind::Initializer => {}
        }
        Ok(Flow::Continue)
    }

    fn enter_type_parameter(&mut self, _node: NodeRef<'_>, acc: &mut Statistics) -> Result<Flow, Infallible> {
        acc.bump(Category::Generics);
        Ok(Flow::Continue)
    }

    fn enter_statement(&mut self, _node: NodeRef<'_>, kind: StmtKind, acc: &mut Statistics) -> Result<Flow, Infallible> {
        acc.bump(Category::Statements);
        let specific = match kind {
            StmtKind::If => Some(Category::IfStatements),
            StmtKind::For => Some(Category::ForLoops),
            StmtKind::While => Some(Category::WhileLoops),
            StmtKind::Try => Some(Category::TryCatchBlocks),
            StmtKind::Switch => Some(Category::SwitchStatements),
            StmtKind::Assert => Some(Category::AssertStatements),
            StmtKind::Synchronized => Some(Category::SynchronizedBlocks),
            StmtKind::Throw => Some(Category::ThrowStatements),
            _ => None,
        };
        if let Some(category) = specific {
            acc.bump(category);
        }
        Ok(Flow::Continue)
    }

    fn enter_expression(&mut self, _node: NodeRef<'_>, kind: ExprKind, acc: &mut Statistics) -> Result<Flow, Infallible> {
        match kind {
            ExprKind::Lambda => acc.bump(Category::LambdaExpressions),
            ExprKind::MethodReference => acc.bump(Category::MethodReferences),
            ExprKind::Annotation => acc.bump(Category::AnnotationUses),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn enter_comment(&mut self, _node: NodeRef<'_>, _kind: CommentKind, acc: &mut Statistics) -> Result<Flow, Infallible> {
        acc.bump(Category::Comments);
        Ok(Flow::Continue)
    }
}
