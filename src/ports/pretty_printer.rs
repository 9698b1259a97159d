//! Pretty Printer
//!
//! Renders the tree back to normalized Java source. Rendering happens
//! bottom-up: when a node is left, its children's text is popped off the
//! accumulator stack and combined using the node kind's template.

use crate::domain::ast::NodeRef;
use crate::domain::attribute::keys;
use crate::domain::node_kind::{CommentKind, ExprKind, MemberKind, NodeKind, StmtKind, TypeKind};
use crate::domain::traversal::{walk, Visitor};
use crate::ports::{ArtifactExporter, ExportError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ARTIFACT: &str = "code.txt";

/// Layout options for the printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Spaces added per nesting level.
    pub indent_width: usize,
    pub line_terminator: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            line_terminator: "\n".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("{kind} is missing its {role}")]
    MissingChild { kind: NodeKind, role: &'static str },
}

pub struct PrettyPrinter {
    config: FormatConfig,
}

impl PrettyPrinter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Render the subtree rooted at `root`.
    pub fn print(&self, root: NodeRef<'_>) -> Result<String, RenderError> {
        let mut renderer = Renderer {
            indent: " ".repeat(self.config.indent_width),
        };
        let mut stack = walk(root, &mut renderer, Vec::new())?;
        let text = stack.pop().unwrap_or_default();

        let terminator = &self.config.line_terminator;
        let mut out = text.lines().collect::<Vec<_>>().join(terminator);
        out.push_str(terminator);
        Ok(out.replace(LITERAL_NEWLINE, terminator))
    }
}

impl Default for PrettyPrinter {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

impl ArtifactExporter for PrettyPrinter {
    fn artifact(&self) -> &str {
        ARTIFACT
    }

    fn render(&self, root: NodeRef<'_>) -> Result<String, ExportError> {
        Ok(self.print(root)?)
    }
}

/// A rendered child together with the node it came from.
struct Part<'a> {
    node: NodeRef<'a>,
    text: String,
}

impl Part<'_> {
    fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    fn is_block(&self) -> bool {
        self.kind() == NodeKind::Stmt(StmtKind::Block)
    }
}

/// Stands in for line breaks inside literal values (text blocks) while the
/// output is assembled, so indentation never touches their content.
const LITERAL_NEWLINE: char = '\u{0}';

/// Whether `node` is an `if` without `else`, possibly at the end of a chain
/// of unbraced statement bodies.
fn ends_with_open_if(node: NodeRef<'_>) -> bool {
    let mut node = node;
    loop {
        let next = match node.kind() {
            NodeKind::Stmt(StmtKind::If) if node.child_count() < 3 => return true,
            NodeKind::Stmt(StmtKind::If)
            | NodeKind::Stmt(StmtKind::For)
            | NodeKind::Stmt(StmtKind::ForEach)
            | NodeKind::Stmt(StmtKind::While)
            | NodeKind::Stmt(StmtKind::Labeled) => node.child(node.child_count().saturating_sub(1)),
            _ => None,
        };
        match next {
            Some(body) if body.kind() != NodeKind::Stmt(StmtKind::Block) => node = body,
            _ => return false,
        }
    }
}

/// `- -x` must not print as `--x`, nor `+ +x` as `++x`.
fn merges_with(op: &str, operand: &str) -> bool {
    match (op.chars().last(), operand.chars().next()) {
        (Some(last), Some(first)) => (last == '-' || last == '+') && (first == '-' || first == '+'),
        _ => false,
    }
}

fn missing(kind: NodeKind, role: &'static str) -> RenderError {
    RenderError::MissingChild { kind, role }
}

fn join(parts: &[Part<'_>], sep: &str) -> String {
    parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(sep)
}

fn partition<'a>(parts: Vec<Part<'a>>, pred: impl Fn(NodeKind) -> bool) -> (Vec<Part<'a>>, Vec<Part<'a>>) {
    parts.into_iter().partition(|p| pred(p.kind()))
}

/// `"<value> "` for a non-empty text attribute, otherwise nothing.
fn prefix(node: NodeRef<'_>, key: &str) -> String {
    match node.text(key) {
        Some(value) if !value.is_empty() => format!("{} ", value),
        _ => String::new(),
    }
}

fn annotation_lines(annotations: &[Part<'_>]) -> String {
    annotations.iter().map(|a| format!("{}\n", a.text)).collect()
}

fn annotations_inline(annotations: &[Part<'_>]) -> String {
    annotations.iter().map(|a| format!("{} ", a.text)).collect()
}

/// Declarations and top-level items: blank lines between items, except
/// after a comment and between consecutive imports.
fn join_items(items: &[Part<'_>]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            let prev = items[i - 1].kind();
            let tight = prev.is_comment()
                || (prev == NodeKind::ImportDecl && item.kind() == NodeKind::ImportDecl);
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        out.push_str(&item.text);
    }
    out
}

fn comment_text(open: &str, content: &str, close: &str) -> String {
    let mut lines = content.split('\n');
    let mut out = String::from(open);
    if let Some(first) = lines.next() {
        out.push_str(first.trim_end());
    }
    for line in lines {
        out.push_str("\n ");
        out.push_str(line.trim());
    }
    out.push_str(close);
    out
}

struct Renderer {
    indent: String,
}

impl Renderer {
    fn indent(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", self.indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn block(&self, body: &str) -> String {
        if body.is_empty() {
            "{\n}".to_string()
        } else {
            format!("{{\n{}\n}}", self.indent(body))
        }
    }

    /// Body of a control statement: blocks stay on the header line, other
    /// statements go on the next line, one level deeper.
    fn nested(&self, header: String, body: &Part<'_>) -> String {
        if body.is_block() {
            format!("{} {}", header, body.text)
        } else {
            format!("{}\n{}", header, self.indent(&body.text))
        }
    }

    fn pop_parts<'a>(&self, node: NodeRef<'a>, acc: &mut Vec<String>) -> Vec<Part<'a>> {
        let texts = acc.split_off(acc.len() - node.child_count());
        node.children()
            .zip(texts)
            .map(|(node, text)| Part { node, text })
            .collect()
    }

    fn compilation_unit(&self, parts: Vec<Part<'_>>) -> String {
        join_items(&parts)
    }

    fn package(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> String {
        format!(
            "{}package {};",
            annotation_lines(&parts),
            node.name().unwrap_or_default()
        )
    }

    fn import(&self, node: NodeRef<'_>) -> String {
        format!(
            "import {}{}{};",
            if node.flag(keys::STATIC) { "static " } else { "" },
            node.name().unwrap_or_default(),
            if node.flag(keys::ASTERISK) { ".*" } else { "" }
        )
    }

    fn type_decl(&self, node: NodeRef<'_>, kind: TypeKind, parts: Vec<Part<'_>>) -> String {
        let (annotations, rest) = partition(parts, NodeKind::is_annotation);
        let (type_params, members) = partition(rest, |k| k == NodeKind::TypeParameter);

        let mut out = annotation_lines(&annotations);
        out.push_str(&prefix(node, keys::MODIFIERS));
        out.push_str(kind.keyword());
        out.push(' ');
        out.push_str(node.name().unwrap_or_default());
        if !type_params.is_empty() {
            out.push_str(&format!("<{}>", join(&type_params, ", ")));
        }
        for (key, word) in [(keys::EXTENDS, "extends"), (keys::IMPLEMENTS, "implements")] {
            if let Some(value) = node.text(key).filter(|v| !v.is_empty()) {
                out.push_str(&format!(" {} {}", word, value));
            }
        }

        let body = if kind == TypeKind::Enum {
            let (constants, others) = partition(members, |k| k == NodeKind::Member(MemberKind::EnumConstant));
            let mut body = join(&constants, ", ");
            if !others.is_empty() {
                body.push_str(";\n\n");
                body.push_str(&join_items(&others));
            }
            body
        } else {
            join_items(&members)
        };

        if body.is_empty() {
            out.push_str(" {\n}");
        } else {
            out.push_str(&format!(" {{\n\n{}\n}}", self.indent(&body)));
        }
        out
    }

    fn member(&self, node: NodeRef<'_>, kind: MemberKind, parts: Vec<Part<'_>>) -> Result<String, RenderError> {
        let (comments, parts) = partition(parts, NodeKind::is_comment);
        let (annotations, rest) = partition(parts, NodeKind::is_annotation);
        let mut out: String = comments.iter().map(|c| format!("{}\n", c.text)).collect();

        match kind {
            MemberKind::Method | MemberKind::Constructor => {
                let (type_params, rest) = partition(rest, |k| k == NodeKind::TypeParameter);
                let (params, rest) = partition(rest, |k| k == NodeKind::Parameter);
                out.push_str(&annotation_lines(&annotations));
                out.push_str(&prefix(node, keys::MODIFIERS));
                if !type_params.is_empty() {
                    out.push_str(&format!("<{}> ", join(&type_params, ", ")));
                }
                if kind == MemberKind::Method {
                    out.push_str(node.text(keys::TYPE).unwrap_or("void"));
                    out.push(' ');
                }
                out.push_str(&format!("{}({})", node.name().unwrap_or_default(), join(&params, ", ")));
                if let Some(throws) = node.text(keys::THROWS).filter(|t| !t.is_empty()) {
                    out.push_str(&format!(" throws {}", throws));
                }
                match rest.first() {
                    Some(body) => {
                        out.push(' ');
                        out.push_str(&body.text);
                    }
                    None => out.push(';'),
                }
            }
            MemberKind::Field => {
                out.push_str(&annotation_lines(&annotations));
                out.push_str(&format!(
                    "{}{} {};",
                    prefix(node, keys::MODIFIERS),
                    node.text(keys::TYPE).unwrap_or_default(),
                    join(&rest, ", ")
                ));
            }
            MemberKind::EnumConstant => {
                out.push_str(&annotations_inline(&annotations));
                out.push_str(node.name().unwrap_or_default());
                if !rest.is_empty() {
                    out.push_str(&format!("({})", join(&rest, ", ")));
                }
            }
            MemberKind::AnnotationMember => {
                out.push_str(&annotation_lines(&annotations));
                out.push_str(&format!(
                    "{}{} {}()",
                    prefix(node, keys::MODIFIERS),
                    node.text(keys::TYPE).unwrap_or_default(),
                    node.name().unwrap_or_default()
                ));
                if let Some(default) = rest.first() {
                    out.push_str(&format!(" default {}", default.text));
                }
                out.push(';');
            }
            MemberKind::Initializer => {
                let body = rest.first().ok_or_else(|| missing(node.kind(), "body"))?;
                if node.flag(keys::STATIC) {
                    out.push_str("static ");
                }
                out.push_str(&body.text);
            }
        }
        Ok(out)
    }

    fn parameter(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> String {
        let name = node.name().unwrap_or_default();
        let ty = node.text(keys::TYPE).unwrap_or_default();
        if ty.is_empty() {
            return name.to_string();
        }
        format!(
            "{}{}{}{} {}",
            annotations_inline(&parts),
            prefix(node, keys::MODIFIERS),
            ty,
            if node.flag(keys::VARARGS) { "..." } else { "" },
            name
        )
    }

    fn variable(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> String {
        let name = node.name().unwrap_or_default();
        match parts.first() {
            Some(init) => format!("{} = {}", name, init.text),
            None => name.to_string(),
        }
    }

    fn type_parameter(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> String {
        let mut out = annotations_inline(&parts);
        out.push_str(node.name().unwrap_or_default());
        if let Some(bound) = node.text(keys::BOUND).filter(|b| !b.is_empty()) {
            out.push_str(&format!(" extends {}", bound));
        }
        out
    }

    fn catch_clause(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> Result<String, RenderError> {
        let (params, rest) = partition(parts, |k| k == NodeKind::Parameter);
        let param = params.first().ok_or_else(|| missing(node.kind(), "parameter"))?;
        let body = rest.first().ok_or_else(|| missing(node.kind(), "body"))?;
        Ok(format!("catch ({}) {}", param.text, body.text))
    }

    fn switch_entry(&self, node: NodeRef<'_>, parts: Vec<Part<'_>>) -> String {
        let labels = (node.int(keys::LABELS).unwrap_or(0).max(0) as usize).min(parts.len());
        let mut parts = parts;
        let body = parts.split_off(labels);
        let mut out = if labels == 0 {
            "default:".to_string()
        } else {
            format!("case {}:", join(&parts, ", "))
        };
        if !body.is_empty() {
            out.push('\n');
            out.push_str(&self.indent(&join(&body, "\n")));
        }
        out
    }

    fn statement(&self, node: NodeRef<'_>, kind: StmtKind, parts: Vec<Part<'_>>) -> Result<String, RenderError> {
        let node_kind = node.kind();
        let required = |index: usize, role: &'static str| {
            parts.get(index).ok_or_else(|| missing(node_kind, role))
        };

        Ok(match kind {
            StmtKind::Block => self.block(&join(&parts, "\n")),
            StmtKind::Expression => format!("{};", required(0, "expression")?.text),
            StmtKind::LocalVar => {
                let annotations: String = parts
                    .iter()
                    .filter(|p| p.kind().is_annotation())
                    .map(|a| format!("{} ", a.text))
                    .collect();
                let declarators = parts
                    .iter()
                    .filter(|p| !p.kind().is_annotation())
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{}{}{} {};",
                    annotations,
                    prefix(node, keys::MODIFIERS),
                    node.text(keys::TYPE).unwrap_or("var"),
                    declarators
                )
            }
            StmtKind::If => {
                let condition = required(0, "condition")?;
                let then = required(1, "then branch")?;
                let header = format!("if ({})", condition.text);
                let otherwise = parts.get(2);
                // An unbraced `if` without `else` in the then-branch would
                // capture our `else`.
                let braced = otherwise.is_some() && !then.is_block() && ends_with_open_if(then.node);
                let mut out = if braced {
                    format!("{} {}", header, self.block(&then.text))
                } else {
                    self.nested(header, then)
                };
                if let Some(otherwise) = otherwise {
                    out.push_str(if then.is_block() || braced { " else" } else { "\nelse" });
                    if otherwise.kind() == NodeKind::Stmt(StmtKind::If) {
                        out.push(' ');
                        out.push_str(&otherwise.text);
                    } else {
                        out = self.nested(out, otherwise);
                    }
                }
                out
            }
            StmtKind::For => {
                let init = node.int(keys::INIT).unwrap_or(0).max(0) as usize;
                let update = node.int(keys::UPDATE).unwrap_or(0).max(0) as usize;
                let condition = usize::from(node.flag(keys::CONDITION));
                let body_index = init + condition + update;
                let body = required(body_index, "body")?;
                let header = parts.get(..body_index).ok_or_else(|| missing(node_kind, "header"))?;
                let init_text = header[..init]
                    .iter()
                    .map(|p| p.text.trim_end_matches(';'))
                    .collect::<Vec<_>>()
                    .join(", ");
                let condition_text = if condition == 1 { header[init].text.as_str() } else { "" };
                let update_text = join(&header[init + condition..], ", ");
                self.nested(format!("for ({}; {}; {})", init_text, condition_text, update_text), body)
            }
            StmtKind::ForEach => {
                let iterable = required(0, "iterable")?;
                let body = required(1, "body")?;
                let header = format!(
                    "for ({}{} {} : {})",
                    prefix(node, keys::MODIFIERS),
                    node.text(keys::TYPE).unwrap_or("var"),
                    node.name().unwrap_or_default(),
                    iterable.text
                );
                self.nested(header, body)
            }
            StmtKind::While => {
                let condition = required(0, "condition")?;
                self.nested(format!("while ({})", condition.text), required(1, "body")?)
            }
            StmtKind::Do => {
                let body = required(0, "body")?;
                let condition = required(1, "condition")?;
                let out = self.nested("do".to_string(), body);
                let sep = if body.is_block() { " " } else { "\n" };
                format!("{}{}while ({});", out, sep, condition.text)
            }
            StmtKind::Switch => {
                let selector = required(0, "selector")?;
                format!("switch ({}) {}", selector.text, self.block(&join(&parts[1..], "\n")))
            }
            StmtKind::Try => {
                let resources = node.int(keys::RESOURCES).unwrap_or(0).max(0) as usize;
                let block = required(resources, "try block")?;
                let mut out = String::from("try");
                if resources > 0 {
                    let list = parts[..resources]
                        .iter()
                        .map(|p| p.text.trim_end_matches(';'))
                        .collect::<Vec<_>>()
                        .join("; ");
                    out.push_str(&format!(" ({})", list));
                }
                out.push(' ');
                out.push_str(&block.text);
                let tail = &parts[resources + 1..];
                let (finally, catches) = match tail.split_last() {
                    Some((last, rest)) if node.flag(keys::FINALLY) => (Some(last), rest),
                    _ => (None, tail),
                };
                for catch in catches {
                    out.push(' ');
                    out.push_str(&catch.text);
                }
                if let Some(finally) = finally {
                    out.push_str(&format!(" finally {}", finally.text));
                }
                out
            }
            StmtKind::Throw => format!("throw {};", required(0, "exception")?.text),
            StmtKind::Return => match parts.first() {
                Some(value) => format!("return {};", value.text),
                None => "return;".to_string(),
            },
            StmtKind::Break | StmtKind::Continue => {
                let word = if kind == StmtKind::Break { "break" } else { "continue" };
                match node.text(keys::LABEL).filter(|l| !l.is_empty()) {
                    Some(label) => format!("{} {};", word, label),
                    None => format!("{};", word),
                }
            }
            StmtKind::Assert => {
                let check = required(0, "check")?;
                match parts.get(1) {
                    Some(message) => format!("assert {} : {};", check.text, message.text),
                    None => format!("assert {};", check.text),
                }
            }
            StmtKind::Synchronized => {
                let lock = required(0, "lock")?;
                self.nested(format!("synchronized ({})", lock.text), required(1, "body")?)
            }
            StmtKind::Labeled => format!(
                "{}: {}",
                node.text(keys::LABEL).unwrap_or_default(),
                required(0, "statement")?.text
            ),
            StmtKind::Empty => ";".to_string(),
            StmtKind::LocalClass => required(0, "declaration")?.text.clone(),
            StmtKind::ExplicitCtor => {
                format!("{}({});", node.name().unwrap_or("super"), join(&parts, ", "))
            }
        })
    }

    fn expression(&self, node: NodeRef<'_>, kind: ExprKind, parts: Vec<Part<'_>>) -> Result<String, RenderError> {
        let node_kind = node.kind();
        let required = |index: usize, role: &'static str| {
            parts
                .get(index)
                .map(|p| p.text.as_str())
                .ok_or_else(|| missing(node_kind, role))
        };
        let name = node.name().unwrap_or_default();
        let ty = node.text(keys::TYPE).unwrap_or_default();

        Ok(match kind {
            ExprKind::Name => name.to_string(),
            ExprKind::Literal => node
                .text(keys::VALUE)
                .unwrap_or("null")
                .replace('\n', &LITERAL_NEWLINE.to_string()),
            ExprKind::This | ExprKind::Super => {
                let word = if kind == ExprKind::This { "this" } else { "super" };
                if name.is_empty() {
                    word.to_string()
                } else {
                    format!("{}.{}", name, word)
                }
            }
            ExprKind::FieldAccess => format!("{}.{}", required(0, "scope")?, name),
            ExprKind::MethodCall => {
                let (scope, args) = if node.flag(keys::SCOPED) {
                    (format!("{}.", required(0, "scope")?), &parts[1..])
                } else {
                    (String::new(), &parts[..])
                };
                format!("{}{}({})", scope, name, join(args, ", "))
            }
            ExprKind::ObjectCreation => format!("new {}({})", ty, join(&parts, ", ")),
            ExprKind::ArrayCreation => {
                let mut out = format!("new {}", ty);
                let mut initializer = None;
                for part in &parts {
                    if part.kind() == NodeKind::Expr(ExprKind::ArrayInitializer) {
                        initializer = Some(part);
                    } else {
                        out.push_str(&format!("[{}]", part.text));
                    }
                }
                let extra = node.int(keys::EXTRA_DIMS).unwrap_or(0).max(0) as usize;
                out.push_str(&"[]".repeat(extra));
                if let Some(init) = initializer {
                    out.push(' ');
                    out.push_str(&init.text);
                }
                out
            }
            ExprKind::ArrayAccess => format!("{}[{}]", required(0, "array")?, required(1, "index")?),
            ExprKind::ArrayInitializer => format!("{{{}}}", join(&parts, ", ")),
            ExprKind::Unary => {
                let operand = required(0, "operand")?;
                let op = node.text(keys::OPERATOR).unwrap_or_default();
                if node.flag(keys::POSTFIX) {
                    format!("{}{}", operand, op)
                } else if merges_with(op, operand) {
                    format!("{} {}", op, operand)
                } else {
                    format!("{}{}", op, operand)
                }
            }
            ExprKind::Binary => format!(
                "{} {} {}",
                required(0, "left operand")?,
                node.text(keys::OPERATOR).unwrap_or_default(),
                required(1, "right operand")?
            ),
            ExprKind::Assign => format!(
                "{} {} {}",
                required(0, "target")?,
                node.text(keys::OPERATOR).unwrap_or("="),
                required(1, "value")?
            ),
            ExprKind::Conditional => format!(
                "{} ? {} : {}",
                required(0, "condition")?,
                required(1, "then value")?,
                required(2, "else value")?
            ),
            ExprKind::Cast => format!("({}) {}", ty, required(0, "operand")?),
            ExprKind::InstanceOf => format!("{} instanceof {}", required(0, "operand")?, ty),
            ExprKind::Enclosed => format!("({})", required(0, "inner expression")?),
            ExprKind::Lambda => {
                let params: Vec<&Part<'_>> = parts.iter().filter(|p| p.kind() == NodeKind::Parameter).collect();
                let body = parts.last().filter(|p| p.kind() != NodeKind::Parameter);
                let body = body.ok_or_else(|| missing(node_kind, "body"))?;
                let bare = params.len() == 1
                    && params[0].node.text(keys::TYPE).map_or(true, str::is_empty);
                if bare {
                    format!("{} -> {}", params[0].text, body.text)
                } else {
                    let list = params.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join(", ");
                    format!("({}) -> {}", list, body.text)
                }
            }
            ExprKind::MethodReference => format!("{}::{}", required(0, "scope")?, name),
            ExprKind::Annotation => {
                if parts.is_empty() {
                    format!("@{}", name)
                } else {
                    format!("@{}({})", name, join(&parts, ", "))
                }
            }
            ExprKind::ClassLiteral => format!("{}.class", ty),
        })
    }

    fn comment(&self, node: NodeRef<'_>, kind: CommentKind) -> String {
        let content = node.text(keys::CONTENT).unwrap_or_default();
        match kind {
            CommentKind::Line => format!("//{}", content.trim_end()),
            CommentKind::Block => comment_text("/*", content, "*/"),
            CommentKind::Javadoc => comment_text("/**", content, "*/"),
        }
    }
}

impl Visitor for Renderer {
    type Acc = Vec<String>;
    type Error = RenderError;

    fn leave_compilation_unit(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.compilation_unit(parts));
        Ok(())
    }

    fn leave_package(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.package(node, parts));
        Ok(())
    }

    fn leave_import(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        self.pop_parts(node, acc);
        acc.push(self.import(node));
        Ok(())
    }

    fn leave_type_decl(&mut self, node: NodeRef<'_>, kind: TypeKind, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.type_decl(node, kind, parts));
        Ok(())
    }

    fn leave_member(&mut self, node: NodeRef<'_>, kind: MemberKind, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.member(node, kind, parts)?);
        Ok(())
    }

    fn leave_parameter(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.parameter(node, parts));
        Ok(())
    }

    fn leave_variable(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.variable(node, parts));
        Ok(())
    }

    fn leave_type_parameter(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.type_parameter(node, parts));
        Ok(())
    }

    fn leave_catch_clause(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.catch_clause(node, parts)?);
        Ok(())
    }

    fn leave_switch_entry(&mut self, node: NodeRef<'_>, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.switch_entry(node, parts));
        Ok(())
    }

    fn leave_statement(&mut self, node: NodeRef<'_>, kind: StmtKind, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.statement(node, kind, parts)?);
        Ok(())
    }

    fn leave_expression(&mut self, node: NodeRef<'_>, kind: ExprKind, acc: &mut Vec<String>) -> Result<(), RenderError> {
        let parts = self.pop_parts(node, acc);
        acc.push(self.expression(node, kind, parts)?);
        Ok(())
    }

    fn leave_comment(&mut self, node: NodeRef<'_>, kind: CommentKind, acc: &mut Vec<String>) -> Result<(), RenderError> {
        self.pop_parts(node, acc);
        acc.push(self.comment(node, kind));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ast::{Ast, AstBuilder};
    use crate::domain::attribute::AttrValue;
    use crate::domain::document::NodeDocument;

    fn doc(kind: NodeKind) -> NodeDocument {
        NodeDocument::new(kind)
    }

    fn name(n: &str) -> NodeDocument {
        doc(NodeKind::Expr(ExprKind::Name)).with_attr("name", n)
    }

    fn lit(v: &str) -> NodeDocument {
        doc(NodeKind::Expr(ExprKind::Literal)).with_attr("value", v)
    }

    fn block(stmts: Vec<NodeDocument>) -> NodeDocument {
        doc(NodeKind::Stmt(StmtKind::Block)).with_children(stmts)
    }

    fn print(root: NodeDocument) -> String {
        let ast = Ast::from_document(&root).unwrap();
        PrettyPrinter::default().print(ast.root()).unwrap()
    }

    fn order_class() -> NodeDocument {
        doc(NodeKind::CompilationUnit)
            .with_child(doc(NodeKind::PackageDecl).with_attr("name", "org.parser"))
            .with_child(doc(NodeKind::ImportDecl).with_attr("name", "java.util.ArrayList"))
            .with_child(doc(NodeKind::ImportDecl).with_attr("name", "java.util.List"))
            .with_child(
                doc(NodeKind::Type(TypeKind::Class))
                    .with_attr("name", "Order")
                    .with_child(
                        doc(NodeKind::Member(MemberKind::Field))
                            .with_attr("modifiers", "private")
                            .with_attr("type", "String")
                            .with_child(doc(NodeKind::VariableDeclarator).with_attr("name", "status")),
                    )
                    .with_child(
                        doc(NodeKind::Comment(CommentKind::Line)).with_attr("content", " Getter"),
                    )
                    .with_child(
                        doc(NodeKind::Member(MemberKind::Method))
                            .with_attr("modifiers", "public")
                            .with_attr("type", "String")
                            .with_attr("name", "getStatus")
                            .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Return)).with_child(name("status"))])),
                    ),
            )
    }

    #[test]
    fn test_prints_class_with_members() {
        let expected = "\
package org.parser;

import java.util.ArrayList;
import java.util.List;

class Order {

  private String status;

  // Getter
  public String getStatus() {
    return status;
  }
}
";
        assert_eq!(print(order_class()), expected);
    }

    #[test]
    fn test_indent_width_and_line_terminator() {
        let ast = Ast::from_document(&order_class()).unwrap();
        let printer = PrettyPrinter::new(FormatConfig {
            indent_width: 4,
            line_terminator: "\r\n".to_string(),
        });
        let out = printer.print(ast.root()).unwrap();
        assert!(out.contains("class Order {\r\n\r\n    private String status;\r\n"));
        assert!(out.contains("        return status;\r\n"));
        assert!(out.ends_with("}\r\n"));
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_control_flow_templates() {
        let if_stmt = doc(NodeKind::Stmt(StmtKind::If))
            .with_child(name("ready"))
            .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Return)).with_child(lit("1"))]))
            .with_child(
                doc(NodeKind::Stmt(StmtKind::If))
                    .with_child(name("late"))
                    .with_child(doc(NodeKind::Stmt(StmtKind::Return)).with_child(lit("2")))
                    .with_child(block(vec![])),
            );
        let for_stmt = doc(NodeKind::Stmt(StmtKind::For))
            .with_attr("init", 1i64)
            .with_attr("condition", true)
            .with_attr("update", 1i64)
            .with_child(
                doc(NodeKind::Stmt(StmtKind::LocalVar)).with_attr("type", "int").with_child(
                    doc(NodeKind::VariableDeclarator).with_attr("name", "i").with_child(lit("0")),
                ),
            )
            .with_child(
                doc(NodeKind::Expr(ExprKind::Binary))
                    .with_attr("operator", "<")
                    .with_child(name("i"))
                    .with_child(name("n")),
            )
            .with_child(
                doc(NodeKind::Expr(ExprKind::Unary))
                    .with_attr("operator", "++")
                    .with_attr("postfix", true)
                    .with_child(name("i")),
            )
            .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Break))]));
        let method = doc(NodeKind::Member(MemberKind::Method))
            .with_attr("name", "run")
            .with_child(block(vec![if_stmt, for_stmt]));
        let root = doc(NodeKind::CompilationUnit)
            .with_child(doc(NodeKind::Type(TypeKind::Class)).with_attr("name", "A").with_child(method));

        let expected = "\
class A {

  void run() {
    if (ready) {
      return 1;
    } else if (late)
      return 2;
    else {
    }
    for (int i = 0; i < n; i++) {
      break;
    }
  }
}
";
        assert_eq!(print(root), expected);
    }

    #[test]
    fn test_try_switch_and_lambda() {
        let try_stmt = doc(NodeKind::Stmt(StmtKind::Try))
            .with_attr("finally", true)
            .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Throw)).with_child(
                doc(NodeKind::Expr(ExprKind::ObjectCreation))
                    .with_attr("type", "IllegalStateException")
                    .with_child(lit("\"bad\"")),
            )]))
            .with_child(
                doc(NodeKind::CatchClause)
                    .with_child(doc(NodeKind::Parameter).with_attr("type", "RuntimeException").with_attr("name", "e"))
                    .with_child(block(vec![])),
            )
            .with_child(block(vec![doc(NodeKind::Stmt(StmtKind::Empty))]));
        let switch = doc(NodeKind::Stmt(StmtKind::Switch))
            .with_child(name("code"))
            .with_child(
                doc(NodeKind::SwitchEntry)
                    .with_attr("labels", 2i64)
                    .with_child(lit("1"))
                    .with_child(lit("2"))
                    .with_child(doc(NodeKind::Stmt(StmtKind::Break))),
            )
            .with_child(doc(NodeKind::SwitchEntry).with_child(doc(NodeKind::Stmt(StmtKind::Return))));
        let lambda = doc(NodeKind::Stmt(StmtKind::Expression)).with_child(
            doc(NodeKind::Expr(ExprKind::MethodCall))
                .with_attr("name", "forEach")
                .with_attr("scoped", true)
                .with_child(name("orders"))
                .with_child(
                    doc(NodeKind::Expr(ExprKind::Lambda))
                        .with_child(doc(NodeKind::Parameter).with_attr("name", "o"))
                        .with_child(
                            doc(NodeKind::Expr(ExprKind::MethodCall))
                                .with_attr("name", "print")
                                .with_child(name("o")),
                        ),
                ),
        );
        let method = doc(NodeKind::Member(MemberKind::Method))
            .with_attr("name", "run")
            .with_child(block(vec![try_stmt, switch, lambda]));
        let root = doc(NodeKind::CompilationUnit)
            .with_child(doc(NodeKind::Type(TypeKind::Class)).with_attr("name", "A").with_child(method));

        let expected = "\
class A {

  void run() {
    try {
      throw new IllegalStateException(\"bad\");
    } catch (RuntimeException e) {
    } finally {
      ;
    }
    switch (code) {
      case 1, 2:
        break;
      default:
        return;
    }
    orders.forEach(o -> print(o));
  }
}
";
        assert_eq!(print(root), expected);
    }

    #[test]
    fn test_generic_interface_and_enum() {
        let root = doc(NodeKind::CompilationUnit)
            .with_child(
                doc(NodeKind::Comment(CommentKind::Javadoc)).with_attr("content", "\n   * Storage.\n   "),
            )
            .with_child(
                doc(NodeKind::Type(TypeKind::Interface))
                    .with_attr("modifiers", "public")
                    .with_attr("name", "Store")
                    .with_child(doc(NodeKind::Expr(ExprKind::Annotation)).with_attr("name", "FunctionalInterface"))
                    .with_child(
                        doc(NodeKind::TypeParameter).with_attr("name", "T").with_attr("bound", "Comparable<T>"),
                    )
                    .with_child(
                        doc(NodeKind::Member(MemberKind::Method))
                            .with_attr("type", "T")
                            .with_attr("name", "get")
                            .with_child(doc(NodeKind::Parameter).with_attr("type", "int").with_attr("name", "index")),
                    ),
            )
            .with_child(
                doc(NodeKind::Type(TypeKind::Enum))
                    .with_attr("name", "Status")
                    .with_child(doc(NodeKind::Member(MemberKind::EnumConstant)).with_attr("name", "PENDING"))
                    .with_child(
                        doc(NodeKind::Member(MemberKind::EnumConstant))
                            .with_attr("name", "SHIPPED")
                            .with_child(lit("2")),
                    ),
            );

        let expected = "\
/**
 * Storage.
 */
@FunctionalInterface
public interface Store<T extends Comparable<T>> {

  T get(int index);
}

enum Status {

  PENDING, SHIPPED(2)
}
";
        assert_eq!(print(root), expected);
    }

    fn method_with(body: Vec<NodeDocument>) -> NodeDocument {
        let method = doc(NodeKind::Member(MemberKind::Method)).with_attr("name", "run").with_child(block(body));
        doc(NodeKind::CompilationUnit)
            .with_child(doc(NodeKind::Type(TypeKind::Class)).with_attr("name", "A").with_child(method))
    }

    fn call_stmt(method: &str) -> NodeDocument {
        doc(NodeKind::Stmt(StmtKind::Expression))
            .with_child(doc(NodeKind::Expr(ExprKind::MethodCall)).with_attr("name", method))
    }

    fn negate(operand: NodeDocument) -> NodeDocument {
        doc(NodeKind::Expr(ExprKind::Unary)).with_attr("operator", "-").with_child(operand)
    }

    #[test]
    fn test_else_stays_with_outer_if() {
        let inner = doc(NodeKind::Stmt(StmtKind::If)).with_child(name("b")).with_child(call_stmt("x"));
        let outer = doc(NodeKind::Stmt(StmtKind::If))
            .with_child(name("a"))
            .with_child(inner)
            .with_child(call_stmt("y"));
        let looped = doc(NodeKind::Stmt(StmtKind::If))
            .with_child(name("c"))
            .with_child(
                doc(NodeKind::Stmt(StmtKind::While)).with_child(name("d")).with_child(
                    doc(NodeKind::Stmt(StmtKind::If)).with_child(name("e")).with_child(call_stmt("x")),
                ),
            )
            .with_child(block(vec![]));
        let negation = doc(NodeKind::Stmt(StmtKind::Expression)).with_child(
            doc(NodeKind::Expr(ExprKind::Assign))
                .with_child(name("z"))
                .with_child(negate(negate(name("x")))),
        );

        let expected = "\
class A {

  void run() {
    if (a) {
      if (b)
        x();
    } else
      y();
    if (c) {
      while (d)
        if (e)
          x();
    } else {
    }
    z = - -x;
  }
}
";
        assert_eq!(print(method_with(vec![outer, looped, negation])), expected);
    }

    #[test]
    fn test_unbraced_if_without_else_is_left_alone() {
        let inner = doc(NodeKind::Stmt(StmtKind::If)).with_child(name("b")).with_child(call_stmt("x"));
        let outer = doc(NodeKind::Stmt(StmtKind::If)).with_child(name("a")).with_child(inner);
        let out = print(method_with(vec![outer]));
        assert!(out.contains("    if (a)\n      if (b)\n        x();\n"));
        assert!(merges_with("-", "-x"));
        assert!(merges_with("+", "++i"));
        assert!(!merges_with("!", "-x"));
        assert!(!merges_with("-", "x"));
    }

    #[test]
    fn test_text_block_lines_are_not_reindented() {
        let ret = doc(NodeKind::Stmt(StmtKind::Return)).with_child(lit("\"\"\"\n    hello\n    \"\"\""));
        let ast = Ast::from_document(&method_with(vec![ret])).unwrap();

        let expected = "\
class A {

  void run() {
    return \"\"\"
    hello
    \"\"\";
  }
}
";
        assert_eq!(PrettyPrinter::default().print(ast.root()).unwrap(), expected);

        let crlf = PrettyPrinter::new(FormatConfig {
            indent_width: 2,
            line_terminator: "\r\n".to_string(),
        });
        let out = crlf.print(ast.root()).unwrap();
        assert!(out.contains("return \"\"\"\r\n    hello\r\n    \"\"\";\r\n"));
        assert!(!out.contains('\u{0}'));
    }

    #[test]
    fn test_missing_child_aborts_render() {
        // Built by hand so the For node can claim a condition it lacks.
        let mut b = AstBuilder::new();
        let root = b.root();
        let class = b.add(root, NodeKind::Type(TypeKind::Class), [("name", "A")]);
        let method = b.add(class, NodeKind::Member(MemberKind::Method), [("name", "m")]);
        let body = b.add(method, NodeKind::Stmt(StmtKind::Block), [] as [(&str, AttrValue); 0]);
        let for_stmt = b.add(body, NodeKind::Stmt(StmtKind::For), [("init", AttrValue::Int(3))]);
        b.add(for_stmt, NodeKind::Stmt(StmtKind::Empty), [] as [(&str, AttrValue); 0]);
        let ast = b.finish().unwrap();

        let err = PrettyPrinter::default().print(ast.root()).unwrap_err();
        assert_eq!(
            err,
            RenderError::MissingChild { kind: NodeKind::Stmt(StmtKind::For), role: "body" }
        );
    }
}
