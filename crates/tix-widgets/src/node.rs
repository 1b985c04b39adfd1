#![forbid(unsafe_code)]

//! Visual node tree.
//!
//! Widgets and block renderers produce [`Node`] values: a small, owned
//! element tree that hosts can diff, inspect in tests, or serialize with
//! [`Node::to_html`]. Elements may carry a stable `key` used by hosts to match
//! list items across re-renders; it is emitted as `data-key` in HTML.

use std::fmt::{self, Write as _};

/// Accessibility roles used by tix widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Advisory content, e.g. diagnostics.
    Note,
    /// Search landmark.
    Search,
    /// Live status text.
    Status,
    /// A list of items.
    List,
    /// A single item in a list.
    ListItem,
    /// A named region.
    Region,
    /// Page banner.
    Banner,
}

impl Role {
    /// ARIA role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Search => "search",
            Self::Status => "status",
            Self::List => "list",
            Self::ListItem => "listitem",
            Self::Region => "region",
            Self::Banner => "banner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Elements rendered without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// A node in the visual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    key: Option<String>,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            key: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    // --- Builder methods ---

    /// Set the reconciliation key (builder).
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set an attribute, replacing an existing value (builder).
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Set an attribute only when `value` is `Some` (builder).
    #[must_use]
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Set the ARIA role (builder).
    #[must_use]
    pub fn role(self, role: Role) -> Self {
        self.attr("role", role.as_str())
    }

    /// Set the element id (builder).
    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set the class list (builder).
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child (builder).
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child when `Some` (builder).
    #[must_use]
    pub fn child_opt(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.child(child),
            None => self,
        }
    }

    /// Append several children (builder).
    #[must_use]
    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child (builder).
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    // --- Access ---

    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.tag
    }

    #[must_use]
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attrs.iter().map(|(n, v)| (*n, v.as_str()))
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// The element, if this is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Reconciliation key of an element node.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.as_element().and_then(Element::key_str)
    }

    /// Concatenated text of this node and all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for the first element satisfying `pred`.
    pub fn find(&self, pred: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let el = self.as_element()?;
        if pred(el) {
            return Some(el);
        }
        el.children.iter().find_map(|child| child.find(pred))
    }

    /// All elements satisfying `pred`, in document order.
    pub fn find_all(&self, pred: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_matching(pred, &mut out);
        out
    }

    fn collect_matching<'a>(&'a self, pred: &dyn Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if pred(el) {
                out.push(el);
            }
            for child in &el.children {
                child.collect_matching(pred, out);
            }
        }
    }

    /// First element with the given role.
    #[must_use]
    pub fn find_by_role(&self, role: Role) -> Option<&Element> {
        self.find(&|el| el.get_attr("role") == Some(role.as_str()))
    }

    /// First element with the given id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.find(&|el| el.get_attr("id") == Some(id))
    }

    /// Serialize to HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append HTML to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(el) => {
                out.push('<');
                out.push_str(el.tag);
                if let Some(key) = &el.key {
                    let _ = write!(out, " data-key=\"{}\"", escape_html(key));
                }
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {name}=\"{}\"", escape_html(value));
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Escape text for use in HTML content and attribute values.
///
/// Line breaks become character references, so serialized markup never
/// spans lines.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('\r', "&#13;")
        .replace('\n', "&#10;")
}
