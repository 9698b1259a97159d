// Attribute values carried by AST nodes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered attribute map; ordering keeps every export deterministic.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Well-known attribute keys.
pub mod keys {
    pub const NAME: &str = "name";
    pub const MODIFIERS: &str = "modifiers";
    pub const TYPE: &str = "type";
    pub const EXTENDS: &str = "extends";
    pub const IMPLEMENTS: &str = "implements";
    pub const THROWS: &str = "throws";
    pub const BOUND: &str = "bound";
    pub const VALUE: &str = "value";
    pub const OPERATOR: &str = "operator";
    pub const CONTENT: &str = "content";
    pub const LABEL: &str = "label";
    pub const STATIC: &str = "static";
    pub const ASTERISK: &str = "asterisk";
    pub const VARARGS: &str = "varargs";
    pub const POSTFIX: &str = "postfix";
    pub const SCOPED: &str = "scoped";
    pub const INIT: &str = "init";
    pub const UPDATE: &str = "update";
    pub const CONDITION: &str = "condition";
    pub const RESOURCES: &str = "resources";
    pub const FINALLY: &str = "finally";
    pub const LABELS: &str = "labels";
    pub const EXTRA_DIMS: &str = "extra_dims";
    pub const RANGE: &str = "range";
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Int(i64),
    Span(Span),
    Text(String),
}

/// 1-based line/column position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Source range covered by a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    pub fn new(begin: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            begin: Position { line: begin.0, column: begin.1 },
            end: Position { line: end.0, column: end.1 },
        }
    }
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttrValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_span(&self) -> Option<Span> {
        match self {
            AttrValue::Span(span) => Some(*span),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Flag(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Span(s) => write!(
                f,
                "{}:{}-{}:{}",
                s.begin.line, s.begin.column, s.end.line, s.end.column
            ),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<Span> for AttrValue {
    fn from(value: Span) -> Self {
        AttrValue::Span(value)
    }
}
