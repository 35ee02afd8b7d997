/**
 * Binding Directives
 *
 * Typed descriptors for the clauses of one binding attribute
 */
pub mod parser;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::expression_parser::ast::{ParseSpan, AST};
use crate::expression_parser::serialize;

pub use parser::parse_directives;

/// Dotted property path of a `prop` directive (`style.color`)
pub type PropertyPath = SmallVec<[String; 2]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectiveKind {
    Prop,
    ForEach,
    Event,
    Template,
}

impl DirectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Prop => "prop",
            DirectiveKind::ForEach => "forEach",
            DirectiveKind::Event => "event",
            DirectiveKind::Template => "template",
        }
    }

    pub fn from_name(name: &str) -> Option<DirectiveKind> {
        match name {
            "prop" => Some(DirectiveKind::Prop),
            "forEach" => Some(DirectiveKind::ForEach),
            "event" => Some(DirectiveKind::Event),
            "template" => Some(DirectiveKind::Template),
            _ => None,
        }
    }

    /// `forEach` and `template` may appear at most once per attribute
    pub fn is_singleton(&self) -> bool {
        matches!(self, DirectiveKind::ForEach | DirectiveKind::Template)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `prop:path.to.target = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropDirective {
    pub span: ParseSpan,
    pub property_path: PropertyPath,
    pub expr: AST,
}

/// `forEach = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachDirective {
    pub span: ParseSpan,
    pub expr: AST,
}

/// `event:name = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDirective {
    pub span: ParseSpan,
    pub event_name: String,
    pub expr: AST,
}

/// `template:sourceId = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDirective {
    pub span: ParseSpan,
    pub source_id: String,
    pub expr: AST,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Directive {
    Prop(PropDirective),
    ForEach(ForEachDirective),
    Event(EventDirective),
    Template(TemplateDirective),
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Prop(_) => DirectiveKind::Prop,
            Directive::ForEach(_) => DirectiveKind::ForEach,
            Directive::Event(_) => DirectiveKind::Event,
            Directive::Template(_) => DirectiveKind::Template,
        }
    }

    pub fn expr(&self) -> &AST {
        match self {
            Directive::Prop(d) => &d.expr,
            Directive::ForEach(d) => &d.expr,
            Directive::Event(d) => &d.expr,
            Directive::Template(d) => &d.expr,
        }
    }

    pub fn span(&self) -> &ParseSpan {
        match self {
            Directive::Prop(d) => &d.span,
            Directive::ForEach(d) => &d.span,
            Directive::Event(d) => &d.span,
            Directive::Template(d) => &d.span,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Prop(d) => write!(
                f,
                "prop:{} = {}",
                d.property_path.join("."),
                serialize(&d.expr)
            ),
            Directive::ForEach(d) => write!(f, "forEach = {}", serialize(&d.expr)),
            Directive::Event(d) => write!(f, "event:{} = {}", d.event_name, serialize(&d.expr)),
            Directive::Template(d) => {
                write!(f, "template:{} = {}", d.source_id, serialize(&d.expr))
            }
        }
    }
}

/// Directives of one attribute in declaration order. Never empty, and holds at most
/// one `forEach` and one `template`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectiveSet {
    directives: Vec<Directive>,
}

impl DirectiveSet {
    pub(crate) fn new(directives: Vec<Directive>) -> Self {
        DirectiveSet { directives }
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Directive> {
        self.directives.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    pub fn template(&self) -> Option<&TemplateDirective> {
        self.directives.iter().find_map(|d| match d {
            Directive::Template(t) => Some(t),
            _ => None,
        })
    }

    pub fn for_each(&self) -> Option<&ForEachDirective> {
        self.directives.iter().find_map(|d| match d {
            Directive::ForEach(f) => Some(f),
            _ => None,
        })
    }

    /// `prop` and `event` directives in declaration order
    pub fn props_and_events(&self) -> impl Iterator<Item = &Directive> {
        self.directives
            .iter()
            .filter(|d| matches!(d, Directive::Prop(_) | Directive::Event(_)))
    }

    /// Declaration indices in evaluation order: `template`, then `forEach`, then the
    /// rest as declared.
    pub fn evaluation_order(&self) -> Vec<usize> {
        let position = |kind: DirectiveKind| self.directives.iter().position(|d| d.kind() == kind);

        let mut order: Vec<usize> = [DirectiveKind::Template, DirectiveKind::ForEach]
            .into_iter()
            .filter_map(position)
            .collect();
        order.extend(
            self.directives
                .iter()
                .enumerate()
                .filter(|(_, d)| !d.kind().is_singleton())
                .map(|(i, _)| i),
        );
        order
    }

    /// True when the element's children belong to a `forEach` or `template` binding
    pub fn handles_children(&self) -> bool {
        self.directives.iter().any(|d| d.kind().is_singleton())
    }

    pub fn into_vec(self) -> Vec<Directive> {
        self.directives
    }
}

impl fmt::Display for DirectiveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", directive)?;
        }
        Ok(())
    }
}

impl IntoIterator for DirectiveSet {
    type Item = Directive;
    type IntoIter = std::vec::IntoIter<Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.into_iter()
    }
}

impl<'a> IntoIterator for &'a DirectiveSet {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.directives.iter()
    }
}
