//! An in-memory HTML tree.
//!
//! The tree is stored in an arena owned by a `Document`.
//! Nodes are addressed by `NodeId` and linked with parent, sibling and child relations,
//! so that detaching and re-appending a node is cheap.
//!
//! ```rust
//! use pageshell_tree::{Document, Selector};
//!
//! let mut doc = Document::parse(r#"<div id="nav"><a href="/blog">Blog</a></div>"#);
//! let sel = Selector::parse("#nav").unwrap();
//! let nav = doc.query_selector(doc.root(), &sel).unwrap();
//! doc.set_inner_html(nav, "<span>Hi</span>");
//! assert_eq!(doc.inner_html(nav), "<span>Hi</span>");
//! ```

use std::fmt::Debug;

mod parse;
pub mod selector;
pub use selector::Selector;
mod write;

/// Elements which never have children or a closing tag.
pub const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is kept as raw text.
pub const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// An error in tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// The selector is not supported or is malformed.
    IllegalSelector {
        /// The selector source.
        selector: String,
        /// The reason.
        msg: String,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::IllegalSelector { selector, msg } => {
                write!(f, "Illegal selector {:?}: {}", selector, msg)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for TreeError {}

/// The address of a node in a `Document` .
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// The data of an element node.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The lower-cased tag name.
    pub tag_name: String,
    /// The attributes in source order.
    pub attributes: Vec<(String, String)>,
}

impl ElementData {
    /// Create an element without attributes.
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Get an attribute value.
    #[inline]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Check if the element has the class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|x| x == class)
    }

    /// Check if the element is a void element.
    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag_name.as_str())
    }

    /// Check if the element content is raw text.
    pub fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.contains(&self.tag_name.as_str())
    }
}

/// The content of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    /// The document root.
    Document,
    /// A `<!...>` declaration, usually `<!DOCTYPE html>` .
    Doctype(String),
    /// An element.
    Element(ElementData),
    /// A text node (entities decoded).
    Text(String),
    /// A comment.
    Comment(String),
}

struct NodeRel {
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    content: NodeContent,
}

/// An HTML document.
///
/// Nodes which are detached (by `detach` , `set_inner_html` or unused `parse_fragment` results)
/// stay in the arena until the document is dropped,
/// so a document is meant for a single render such as a prerender or a test,
/// not for an unbounded number of refreshes.
pub struct Document {
    nodes: Vec<NodeRel>,
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Document({:?})", self.inner_html(self.root()))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut ret = Self { nodes: Vec::new() };
        ret.create_node(NodeContent::Document);
        ret
    }

    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        let mut ret = Self::new();
        let root = ret.root();
        parse::parse_into(&mut ret, root, html);
        ret
    }

    /// Get the document root.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get the first element child of the root, usually the `<html>` element.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .find(|x| self.element(*x).is_some())
    }

    /// Create a detached node.
    pub fn create_node(&mut self, content: NodeContent) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeRel {
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            content,
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create_node(NodeContent::Element(ElementData::new(tag_name)))
    }

    /// Create a detached text node.
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.create_node(NodeContent::Text(text.to_string()))
    }

    /// Parse an HTML fragment into detached nodes.
    pub fn parse_fragment(&mut self, html: &str) -> Vec<NodeId> {
        let holder = self.create_node(NodeContent::Document);
        parse::parse_into(self, holder, html);
        let ret: Vec<_> = self.children(holder).collect();
        for id in ret.iter() {
            self.detach(*id);
        }
        ret
    }

    /// Get the node content.
    #[inline]
    pub fn content(&self, id: NodeId) -> &NodeContent {
        &self.nodes[id.0].content
    }

    /// Get the node content mutably.
    #[inline]
    pub fn content_mut(&mut self, id: NodeId) -> &mut NodeContent {
        &mut self.nodes[id.0].content
    }

    /// Get the element data if the node is an element.
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.content(id) {
            NodeContent::Element(x) => Some(x),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.content_mut(id) {
            NodeContent::Element(x) => Some(x),
            _ => None,
        }
    }

    /// Get the parent node.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Get the first child node.
    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    /// Get the last child node.
    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].last_child
    }

    /// Get the previous sibling node.
    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].prev_sibling
    }

    /// Get the next sibling node.
    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    /// Iterate over the child nodes.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            cur: self.first_child(id),
        }
    }

    /// Collect all descendant nodes in tree order (the node itself excluded).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut ret = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(cur) = stack.pop() {
            ret.push(cur);
            let len = stack.len();
            stack.extend(self.children(cur));
            stack[len..].reverse();
        }
        ret
    }

    /// Append a node as the last child node.
    ///
    /// The node is detached from its previous parent first.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.nodes[parent.0].last_child;
        {
            let rel = &mut self.nodes[child.0];
            rel.parent = Some(parent);
            rel.prev_sibling = last;
        }
        match last {
            Some(last) => self.nodes[last.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
        self.nodes[parent.0].last_child = Some(child);
    }

    /// Insert a node as the previous sibling node of `target` .
    pub fn insert_before(&mut self, target: NodeId, child: NodeId) {
        let Some(parent) = self.parent(target) else {
            return;
        };
        self.detach(child);
        let prev = self.nodes[target.0].prev_sibling;
        {
            let rel = &mut self.nodes[child.0];
            rel.parent = Some(parent);
            rel.prev_sibling = prev;
            rel.next_sibling = Some(target);
        }
        self.nodes[target.0].prev_sibling = Some(child);
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(child),
            None => self.nodes[parent.0].first_child = Some(child),
        }
    }

    /// Remove the node from its parent node.
    pub fn detach(&mut self, id: NodeId) {
        let rel = &mut self.nodes[id.0];
        let (parent, prev, next) = (
            rel.parent.take(),
            rel.prev_sibling.take(),
            rel.next_sibling.take(),
        );
        let Some(parent) = parent else {
            return;
        };
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = next,
            None => self.nodes[parent.0].first_child = next,
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = prev,
            None => self.nodes[parent.0].last_child = prev,
        }
    }

    /// Remove all child nodes.
    pub fn clear_children(&mut self, id: NodeId) {
        while let Some(child) = self.first_child(id) {
            self.detach(child);
        }
    }

    /// Replace all child nodes with `children` .
    pub fn replace_children(&mut self, id: NodeId, children: impl IntoIterator<Item = NodeId>) {
        self.clear_children(id);
        for child in children {
            self.append(id, child);
        }
    }

    /// Get an attribute value.
    #[inline]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|x| x.attribute(name))
    }

    /// Set an attribute value.
    ///
    /// Nothing happens if the node is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let Some(elem) = self.element_mut(id) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        match elem.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => elem.attributes.push((name, value.to_string())),
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.attributes.retain(|(k, _)| k != name);
        }
    }

    /// Add a class to the `class` attribute if it is not there yet.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        let Some(elem) = self.element(id) else {
            return;
        };
        if elem.has_class(class) {
            return;
        }
        let value = match elem.attribute("class") {
            Some(x) if !x.trim().is_empty() => format!("{} {}", x.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &value);
    }

    /// Get the concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        if let NodeContent::Text(x) = self.content(id) {
            return x.clone();
        }
        let mut ret = String::new();
        for x in self.descendants(id) {
            if let NodeContent::Text(t) = self.content(x) {
                ret.push_str(t);
            }
        }
        ret
    }

    /// Replace all child nodes with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let NodeContent::Text(x) = self.content_mut(id) {
            *x = text.to_string();
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            let t = self.create_text_node(text);
            self.append(id, t);
        }
    }

    /// Replace all child nodes with the parsed HTML.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        let children = self.parse_fragment(html);
        self.replace_children(id, children);
    }

    /// Find all matching elements among the descendants.
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|x| {
                self.element(*x)
                    .map(|elem| selector.matches(elem))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Find the first matching element among the descendants.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|x| {
            self.element(*x)
                .map(|elem| selector.matches(elem))
                .unwrap_or(false)
        })
    }
}

/// The iterator for child nodes.
pub struct Children<'a> {
    doc: &'a Document,
    cur: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let ret = self.cur?;
        self.cur = self.doc.next_sibling(ret);
        Some(ret)
    }
}
