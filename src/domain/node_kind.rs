//! Node Kind Module
//!
//! The closed set of Java node kinds the analyzer understands, grouped by
//! category so that visitors can dispatch on a whole family at once.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    PackageDecl,
    ImportDecl,
    Type(TypeKind),
    Member(MemberKind),
    Parameter,
    VariableDeclarator,
    TypeParameter,
    CatchClause,
    SwitchEntry,
    Stmt(StmtKind),
    Expr(ExprKind),
    Comment(CommentKind),
}

/// Type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    /// `@interface` declaration.
    AnnotationType,
}

/// Declarations that live inside a type body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Constructor,
    Field,
    EnumConstant,
    AnnotationMember,
    Initializer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Block,
    Expression,
    LocalVar,
    If,
    For,
    ForEach,
    While,
    Do,
    Switch,
    Try,
    Throw,
    Return,
    Break,
    Continue,
    Assert,
    Synchronized,
    Labeled,
    Empty,
    LocalClass,
    /// `this(...)` / `super(...)` at the start of a constructor.
    ExplicitCtor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Name,
    Literal,
    This,
    Super,
    FieldAccess,
    MethodCall,
    ObjectCreation,
    ArrayCreation,
    ArrayAccess,
    ArrayInitializer,
    Unary,
    Binary,
    Assign,
    Conditional,
    Cast,
    InstanceOf,
    Enclosed,
    Lambda,
    MethodReference,
    Annotation,
    ClassLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    Line,
    Block,
    Javadoc,
}

impl TypeKind {
    pub const ALL: [TypeKind; 4] = [
        TypeKind::Class,
        TypeKind::Interface,
        TypeKind::Enum,
        TypeKind::AnnotationType,
    ];

    /// Java keyword introducing the declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::AnnotationType => "@interface",
        }
    }
}

impl MemberKind {
    pub const ALL: [MemberKind; 6] = [
        MemberKind::Method,
        MemberKind::Constructor,
        MemberKind::Field,
        MemberKind::EnumConstant,
        MemberKind::AnnotationMember,
        MemberKind::Initializer,
    ];
}

impl StmtKind {
    pub const ALL: [StmtKind; 20] = [
        StmtKind::Block,
        StmtKind::Expression,
        StmtKind::LocalVar,
        StmtKind::If,
        StmtKind::For,
        StmtKind::ForEach,
        StmtKind::While,
        StmtKind::Do,
        StmtKind::Switch,
        StmtKind::Try,
        StmtKind::Throw,
        StmtKind::Return,
        StmtKind::Break,
        StmtKind::Continue,
        StmtKind::Assert,
        StmtKind::Synchronized,
        StmtKind::Labeled,
        StmtKind::Empty,
        StmtKind::LocalClass,
        StmtKind::ExplicitCtor,
    ];
}

impl ExprKind {
    pub const ALL: [ExprKind; 21] = [
        ExprKind::Name,
        ExprKind::Literal,
        ExprKind::This,
        ExprKind::Super,
        ExprKind::FieldAccess,
        ExprKind::MethodCall,
        ExprKind::ObjectCreation,
        ExprKind::ArrayCreation,
        ExprKind::ArrayAccess,
        ExprKind::ArrayInitializer,
        ExprKind::Unary,
        ExprKind::Binary,
        ExprKind::Assign,
        ExprKind::Conditional,
        ExprKind::Cast,
        ExprKind::InstanceOf,
        ExprKind::Enclosed,
        ExprKind::Lambda,
        ExprKind::MethodReference,
        ExprKind::Annotation,
        ExprKind::ClassLiteral,
    ];
}

impl CommentKind {
    pub const ALL: [CommentKind; 3] = [CommentKind::Line, CommentKind::Block, CommentKind::Javadoc];
}

impl NodeKind {
    /// Every node kind, in declaration order.
    pub fn all() -> impl Iterator<Item = NodeKind> {
        [
            NodeKind::CompilationUnit,
            NodeKind::PackageDecl,
            NodeKind::ImportDecl,
        ]
        .into_iter()
        .chain(TypeKind::ALL.into_iter().map(NodeKind::Type))
        .chain(MemberKind::ALL.into_iter().map(NodeKind::Member))
        .chain([
            NodeKind::Parameter,
            NodeKind::VariableDeclarator,
            NodeKind::TypeParameter,
            NodeKind::CatchClause,
            NodeKind::SwitchEntry,
        ])
        .chain(StmtKind::ALL.into_iter().map(NodeKind::Stmt))
        .chain(ExprKind::ALL.into_iter().map(NodeKind::Expr))
        .chain(CommentKind::ALL.into_iter().map(NodeKind::Comment))
    }

    /// Stable name used in documents and graph labels.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "CompilationUnit",
            NodeKind::PackageDecl => "PackageDecl",
            NodeKind::ImportDecl => "ImportDecl",
            NodeKind::Type(kind) => match kind {
                TypeKind::Class => "ClassDecl",
                TypeKind::Interface => "InterfaceDecl",
                TypeKind::Enum => "EnumDecl",
                TypeKind::AnnotationType => "AnnotationDecl",
            },
            NodeKind::Member(kind) => match kind {
                MemberKind::Method => "MethodDecl",
                MemberKind::Constructor => "ConstructorDecl",
                MemberKind::Field => "FieldDecl",
                MemberKind::EnumConstant => "EnumConstantDecl",
                MemberKind::AnnotationMember => "AnnotationMemberDecl",
                MemberKind::Initializer => "InitializerDecl",
            },
            NodeKind::Parameter => "Parameter",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::TypeParameter => "TypeParameter",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::SwitchEntry => "SwitchEntry",
            NodeKind::Stmt(kind) => match kind {
                StmtKind::Block => "BlockStmt",
                StmtKind::Expression => "ExpressionStmt",
                StmtKind::LocalVar => "LocalVarStmt",
                StmtKind::If => "IfStmt",
                StmtKind::For => "ForStmt",
                StmtKind::ForEach => "ForEachStmt",
                StmtKind::While => "WhileStmt",
                StmtKind::Do => "DoStmt",
                StmtKind::Switch => "SwitchStmt",
                StmtKind::Try => "TryStmt",
                StmtKind::Throw => "ThrowStmt",
                StmtKind::Return => "ReturnStmt",
                StmtKind::Break => "BreakStmt",
                StmtKind::Continue => "ContinueStmt",
                StmtKind::Assert => "AssertStmt",
                StmtKind::Synchronized => "SynchronizedStmt",
                StmtKind::Labeled => "LabeledStmt",
                StmtKind::Empty => "EmptyStmt",
                StmtKind::LocalClass => "LocalClassStmt",
                StmtKind::ExplicitCtor => "ExplicitCtorStmt",
            },
            NodeKind::Expr(kind) => match kind {
                ExprKind::Name => "NameExpr",
                ExprKind::Literal => "LiteralExpr",
                ExprKind::This => "ThisExpr",
                ExprKind::Super => "SuperExpr",
                ExprKind::FieldAccess => "FieldAccessExpr",
                ExprKind::MethodCall => "MethodCallExpr",
                ExprKind::ObjectCreation => "ObjectCreationExpr",
                ExprKind::ArrayCreation => "ArrayCreationExpr",
                ExprKind::ArrayAccess => "ArrayAccessExpr",
                ExprKind::ArrayInitializer => "ArrayInitializerExpr",
                ExprKind::Unary => "UnaryExpr",
                ExprKind::Binary => "BinaryExpr",
                ExprKind::Assign => "AssignExpr",
                ExprKind::Conditional => "ConditionalExpr",
                ExprKind::Cast => "CastExpr",
                ExprKind::InstanceOf => "InstanceOfExpr",
                ExprKind::Enclosed => "EnclosedExpr",
                ExprKind::Lambda => "LambdaExpr",
                ExprKind::MethodReference => "MethodReferenceExpr",
                ExprKind::Annotation => "AnnotationExpr",
                ExprKind::ClassLiteral => "ClassExpr",
            },
            NodeKind::Comment(kind) => match kind {
                CommentKind::Line => "LineComment",
                CommentKind::Block => "BlockComment",
                CommentKind::Javadoc => "JavadocComment",
            },
        }
    }

    /// Look a kind up by its stable name.
    pub fn from_name(name: &str) -> Option<NodeKind> {
        Self::all().find(|kind| kind.name() == name)
    }

    pub fn is_type_decl(self) -> bool {
        matches!(self, NodeKind::Type(_))
    }

    pub fn is_statement(self) -> bool {
        matches!(self, NodeKind::Stmt(_))
    }

    pub fn is_expression(self) -> bool {
        matches!(self, NodeKind::Expr(_))
    }

    pub fn is_comment(self) -> bool {
        matches!(self, NodeKind::Comment(_))
    }

    pub fn is_annotation(self) -> bool {
        self == NodeKind::Expr(ExprKind::Annotation)
    }

    /// Whether `child` may appear directly under a node of this kind.
    pub fn accepts_child(self, child: NodeKind) -> bool {
        use NodeKind::*;

        if child == CompilationUnit {
            return false;
        }
        match self {
            CompilationUnit => matches!(child, PackageDecl | ImportDecl | Type(_) | Comment(_)),
            PackageDecl | ImportDecl => child.is_annotation(),
            Type(kind) => match child {
                Member(MemberKind::EnumConstant) => kind == TypeKind::Enum,
                Member(MemberKind::AnnotationMember) => kind == TypeKind::AnnotationType,
                Member(_) | Type(_) | TypeParameter | Comment(_) => true,
                other => other.is_annotation(),
            },
            Member(kind) => match kind {
                MemberKind::Method | MemberKind::Constructor => {
                    matches!(child, TypeParameter | Parameter | Stmt(StmtKind::Block) | Comment(_))
                        || child.is_annotation()
                }
                MemberKind::Field => matches!(child, VariableDeclarator) || child.is_annotation(),
                MemberKind::EnumConstant | MemberKind::AnnotationMember => child.is_expression(),
                MemberKind::Initializer => child == Stmt(StmtKind::Block),
            },
            Parameter | TypeParameter => child.is_annotation(),
            VariableDeclarator => child.is_expression(),
            CatchClause => matches!(child, Parameter | Stmt(StmtKind::Block)),
            SwitchEntry => matches!(child, Expr(_) | Stmt(_) | Comment(_)),
            Stmt(kind) => match kind {
                StmtKind::Block => matches!(child, Stmt(_) | Comment(_)),
                StmtKind::LocalVar => child == VariableDeclarator || child.is_annotation(),
                StmtKind::LocalClass => child.is_type_decl(),
                StmtKind::Switch => matches!(child, Expr(_) | SwitchEntry),
                StmtKind::Try => matches!(child, Stmt(_) | Expr(_) | CatchClause),
                StmtKind::Empty | StmtKind::Break | StmtKind::Continue => false,
                _ => matches!(child, Expr(_) | Stmt(_)),
            },
            Expr(kind) => match kind {
                ExprKind::Lambda => matches!(child, Parameter | Expr(_) | Stmt(StmtKind::Block)),
                ExprKind::Name
                | ExprKind::Literal
                | ExprKind::This
                | ExprKind::Super
                | ExprKind::ClassLiteral => false,
                _ => child.is_expression(),
            },
            Comment(_) => false,
        }
    }

    /// Minimum number of children a well-formed node of this kind carries.
    pub fn min_children(self) -> usize {
        use NodeKind::*;

        match self {
            Member(MemberKind::Field) | Member(MemberKind::Initializer) | CatchClause => 1,
            Stmt(kind) => match kind {
                StmtKind::If
                | StmtKind::ForEach
                | StmtKind::While
                | StmtKind::Do
                | StmtKind::Synchronized => 2,
                StmtKind::Expression
                | StmtKind::LocalVar
                | StmtKind::For
                | StmtKind::Switch
                | StmtKind::Try
                | StmtKind::Throw
                | StmtKind::Assert
                | StmtKind::Labeled
                | StmtKind::LocalClass => 1,
                _ => 0,
            },
            Expr(kind) => match kind {
                ExprKind::Conditional => 3,
                ExprKind::ArrayAccess | ExprKind::Binary | ExprKind::Assign => 2,
                ExprKind::FieldAccess
                | ExprKind::Unary
                | ExprKind::Cast
                | ExprKind::InstanceOf
                | ExprKind::Enclosed
                | ExprKind::Lambda
                | ExprKind::MethodReference => 1,
                _ => 0,
            },
            _ => 0,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        NodeKind::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown node kind `{}`", name)))
    }
}
