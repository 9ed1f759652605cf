//! Presentation tree produced by the renderer.
//!
//! Nodes are plain data: a tag, ordered attributes and children. Hosts walk
//! the tree directly or serialise it with [`PresentationNode::to_html`].

use serde::Serialize;
use std::fmt::Write as _;

/// Tags that never carry children or a closing tag.
const VOID_TAGS: [&str; 4] = ["img", "br", "hr", "meta"];

/// One node of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum PresentationNode {
    /// Tagged element
    Element(Element),
    /// Literal text, escaped on output
    Text {
        /// Unescaped text
        text: String,
    },
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in insertion order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
    /// Child nodes
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PresentationNode>,
}

impl Element {
    /// Empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Set the `style` attribute unless `css` is empty.
    #[must_use]
    pub fn style(self, css: &str) -> Self {
        if css.is_empty() {
            self
        } else {
            self.attr("style", css)
        }
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<PresentationNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child when present.
    #[must_use]
    pub fn child_opt(self, child: Option<impl Into<PresentationNode>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = PresentationNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(PresentationNode::text(text))
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the whitespace-separated `class` list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for PresentationNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl PresentationNode {
    /// Text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The element, if this is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text { .. } => None,
        }
    }

    /// Concatenated text of this subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for elements matching `predicate`, self included.
    pub fn find_all<'a>(&'a self, predicate: impl Fn(&Element) -> bool + Copy) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |element| {
            if predicate(element) {
                found.push(element);
            }
        });
        found
    }

    /// Elements carrying `class`.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.find_all(|e| e.has_class(class))
    }

    /// First element carrying `class`.
    #[must_use]
    pub fn first_by_class(&self, class: &str) -> Option<&Element> {
        self.find_by_class(class).into_iter().next()
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        if let Self::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }

    /// Serialise as HTML. Text and attribute values are escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(&escape(text)),
            Self::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}=\"{}\"", escape(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag.as_str()) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
