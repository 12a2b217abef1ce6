//! Typed in-memory markup tree.
//!
//! A [`Node`] is a tag, an ordered list of [`Attribute`]s, and [`Content`]
//! that is either literal text or an ordered list of child nodes. The caller
//! picks the variant when building the node; it never changes afterwards.
//!
//! ```text
//! Node("div", [id="parent"], Children[
//!     Node("p", [], Text("I am a child."))
//! ])
//!
//! renders as
//!
//! <div id="parent"><p>I am a child.</p></div>
//! ```
//!
//! ## Rendering rules
//!
//! - Attributes are written in insertion order, each preceded by one space.
//!   Duplicate keys are kept and written twice.
//! - Every element gets an explicit closing tag, `meta` included. There is
//!   no void-element or self-closing form, so output is always XHTML-style
//!   well-formed.
//! - Nothing is escaped. Text and attribute values are written verbatim and
//!   must already be safe for the output context.
//!
//! Strings are held as `Cow<'a, str>`, so a page can borrow large shared
//! text (the stylesheet) instead of copying it into every document.
//!
//! [`tags`] holds one-line constructors for the tag names the index pages
//! use; [`Document`] adds the DOCTYPE preamble.

use std::borrow::Cow;
use std::fmt;
use std::io;

/// XHTML 1.0 Strict preamble written before the root element.
pub const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"\n    \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

/// A single `key="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

impl<'a> Attribute<'a> {
    pub fn new(key: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Build an attribute list from borrowed pairs, keeping their order.
///
/// `attrs(&[])` is the empty list.
pub fn attrs<'a>(pairs: &[(&'a str, &'a str)]) -> Vec<Attribute<'a>> {
    pairs
        .iter()
        .map(|&(key, value)| Attribute::new(key, value))
        .collect()
}

/// What sits between an element's opening and closing tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    Text(Cow<'a, str>),
    Children(Vec<Node<'a>>),
}

impl<'a> Content<'a> {
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Content::Text(text.into())
    }

    pub fn empty() -> Self {
        Content::Text(Cow::Borrowed(""))
    }
}

impl<'a> From<Vec<Node<'a>>> for Content<'a> {
    fn from(children: Vec<Node<'a>>) -> Self {
        Content::Children(children)
    }
}

/// An element in the markup tree. Owns its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'a> {
    pub tag: Cow<'a, str>,
    pub attributes: Vec<Attribute<'a>>,
    pub content: Content<'a>,
}

impl<'a> Node<'a> {
    pub fn new(
        tag: impl Into<Cow<'a, str>>,
        attributes: Vec<Attribute<'a>>,
        content: Content<'a>,
    ) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            content,
        }
    }

    /// Append one attribute after the existing ones.
    pub fn attr(mut self, key: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    /// Write this element and everything under it to `out`.
    ///
    /// Errors come straight from the sink; on failure `out` may hold a
    /// truncated rendering.
    pub fn render<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for attr in &self.attributes {
            write!(f, " {}=\"{}\"", attr.key, attr.value)?;
        }
        f.write_str(">")?;
        match &self.content {
            Content::Text(text) => f.write_str(text)?,
            Content::Children(children) => {
                for child in children {
                    fmt::Display::fmt(child, f)?;
                }
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

/// A root element plus the [`DOCTYPE`] preamble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub root: Node<'a>,
}

impl<'a> Document<'a> {
    pub fn new(root: Node<'a>) -> Self {
        Self { root }
    }

    pub fn render<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(DOCTYPE)?;
        fmt::Display::fmt(&self.root, f)
    }
}

/// Shorthand constructors, one per tag name used by the index pages.
pub mod tags {
    use super::{Attribute, Content, Node};

    pub fn html<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("html", attributes, content)
    }

    pub fn head<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("head", attributes, content)
    }

    pub fn title<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("title", attributes, content)
    }

    pub fn meta<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("meta", attributes, content)
    }

    pub fn style<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("style", attributes, content)
    }

    pub fn body<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("body", attributes, content)
    }

    pub fn h1<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("h1", attributes, content)
    }

    pub fn p<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("p", attributes, content)
    }

    pub fn div<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("div", attributes, content)
    }

    pub fn a<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("a", attributes, content)
    }

    pub fn table<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("table", attributes, content)
    }

    pub fn thead<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("thead", attributes, content)
    }

    pub fn tbody<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("tbody", attributes, content)
    }

    pub fn tr<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("tr", attributes, content)
    }

    pub fn th<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("th", attributes, content)
    }

    pub fn td<'a>(attributes: Vec<Attribute<'a>>, content: Content<'a>) -> Node<'a> {
        Node::new("td", attributes, content)
    }
}
