use derive_more::Constructor;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

use crate::continuation::Continuation;
use crate::value::Value;

/// Markup tree produced for a header or a body.
#[derive(Debug, Clone)]
pub enum Markup {
    Text(String),
    Group(Vec<Markup>),
    /// Plain summary, used when recursion is prevented.
    Native(String),
    /// An ancestor showing up again. Never expandable.
    Circular(Box<Markup>),
    Reference(Reference),
    Titled { title: String, inner: Box<Markup> },
    Body(Vec<Markup>),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReferenceKind {
    /// A header whose body can be requested.
    Expandable,
    /// A budget ran out here; the body resumes from the captured state.
    Limit,
}

/// A deferred subtree: the host renders `header` and, on request, calls
/// [`Renderer::body`](crate::renderer::Renderer::body) with `value` and
/// `token`.
#[derive(Debug, Clone, Constructor)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub header: Box<Markup>,
    pub value: Value,
    pub token: Continuation,
}

impl Markup {
    pub fn text(text: impl Into<String>) -> Markup {
        Markup::Text(text.into())
    }

    /// First reference in depth first order.
    pub fn find_reference(&self) -> Option<&Reference> {
        match self {
            Markup::Reference(reference) => Some(reference),
            Markup::Group(children) | Markup::Body(children) => {
                children.iter().find_map(Markup::find_reference)
            }
            Markup::Circular(inner) | Markup::Titled { inner, .. } => inner.find_reference(),
            Markup::Text(_) | Markup::Native(_) => None,
        }
    }

    pub fn references(&self) -> Vec<&Reference> {
        let mut found = vec![];
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Reference>) {
        match self {
            Markup::Reference(reference) => {
                found.push(reference);
                reference.header.collect_references(found);
            }
            Markup::Group(children) | Markup::Body(children) => {
                for child in children {
                    child.collect_references(found);
                }
            }
            Markup::Circular(inner) | Markup::Titled { inner, .. } => {
                inner.collect_references(found)
            }
            Markup::Text(_) | Markup::Native(_) => {}
        }
    }

    pub fn is_circular(&self) -> bool {
        match self {
            Markup::Circular(_) => true,
            Markup::Group(children) | Markup::Body(children) => {
                children.iter().any(Markup::is_circular)
            }
            Markup::Titled { inner, .. } => inner.is_circular(),
            Markup::Reference(reference) => reference.header.is_circular(),
            Markup::Text(_) | Markup::Native(_) => false,
        }
    }

    /// Lines of a body, or `None` for header markup.
    pub fn lines(&self) -> Option<&[Markup]> {
        match self {
            Markup::Body(lines) => Some(lines.as_slice()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Markup::Titled { title, .. } => Some(title),
            _ => None,
        }
    }
}

impl Display for Markup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Markup::Text(text) | Markup::Native(text) => write!(f, "{text}"),
            Markup::Group(children) => {
                for child in children {
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            Markup::Circular(inner) | Markup::Titled { inner, .. } => write!(f, "{inner}"),
            Markup::Reference(reference) => write!(f, "{}", reference.header),
            Markup::Body(lines) => write!(f, "{}", lines.iter().join("\n")),
        }
    }
}
