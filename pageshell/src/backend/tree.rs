//! An in-memory backend.
//!
//! The document is a `pageshell_tree::Document` .
//! Events and navigations are recorded instead of being dispatched,
//! which makes the backend suitable for prerendering and tests.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use pageshell_tree::{Document, NodeContent, NodeId, Selector};

use super::{Backend, BackendElement, ShellEvent};
use crate::error::Error;

struct TreeShared {
    doc: RefCell<Document>,
    path: String,
    timestamp: Cell<u64>,
    events: RefCell<Vec<ShellEvent>>,
    bound_navigations: RefCell<Vec<(NodeId, String)>>,
    navigations: RefCell<Vec<String>>,
}

/// A backend over an in-memory HTML document.
#[derive(Clone)]
pub struct TreeBackend {
    shared: Rc<TreeShared>,
}

impl TreeBackend {
    /// Parse the page source as the document of the page at `path` .
    pub fn new(html: &str, path: &str) -> Self {
        Self {
            shared: Rc::new(TreeShared {
                doc: RefCell::new(Document::parse(html)),
                path: path.to_string(),
                timestamp: Cell::new(0),
                events: RefCell::new(Vec::new()),
                bound_navigations: RefCell::new(Vec::new()),
                navigations: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Set the value returned by `timestamp` .
    pub fn set_timestamp(&self, timestamp: u64) {
        self.shared.timestamp.set(timestamp);
    }

    /// The events dispatched so far.
    pub fn events(&self) -> Vec<ShellEvent> {
        self.shared.events.borrow().clone()
    }

    /// The navigations triggered by `TreeElement::click` so far.
    pub fn navigations(&self) -> Vec<String> {
        self.shared.navigations.borrow().clone()
    }

    /// Serialize the whole document.
    pub fn html(&self) -> String {
        let doc = self.shared.doc.borrow();
        doc.inner_html(doc.root())
    }

    /// Write the whole document.
    pub fn write_html(&self, w: &mut impl std::io::Write) -> std::io::Result<()> {
        let doc = self.shared.doc.borrow();
        doc.write_inner_html(doc.root(), w)
    }

    fn element(&self, id: NodeId) -> TreeElement {
        TreeElement {
            shared: self.shared.clone(),
            id,
        }
    }

    fn find_all(&self, scope: NodeId, selector: &str) -> Result<Vec<TreeElement>, Error> {
        let selector = Selector::parse(selector)?;
        let doc = self.shared.doc.borrow();
        Ok(doc
            .query_selector_all(scope, &selector)
            .into_iter()
            .map(|id| self.element(id))
            .collect())
    }
}

impl Backend for TreeBackend {
    type Element = TreeElement;

    fn location_path(&self) -> String {
        self.shared.path.clone()
    }

    fn timestamp(&self) -> u64 {
        self.shared.timestamp.get()
    }

    fn document_element(&self) -> Result<Self::Element, Error> {
        let id = self
            .shared
            .doc
            .borrow()
            .document_element()
            .ok_or_else(|| Error::BackendError {
                msg: "The document has no root element".into(),
                err: None,
            })?;
        Ok(self.element(id))
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, Error> {
        let selector = Selector::parse(selector)?;
        let doc = self.shared.doc.borrow();
        Ok(doc
            .query_selector(doc.root(), &selector)
            .map(|id| self.element(id)))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, Error> {
        let root = self.shared.doc.borrow().root();
        self.find_all(root, selector)
    }

    fn set_title(&self, title: &str) -> Result<(), Error> {
        let title_sel = Selector::parse("title")?;
        let head_sel = Selector::parse("head")?;
        let mut doc = self.shared.doc.borrow_mut();
        let root = doc.root();
        let id = match doc.query_selector(root, &title_sel) {
            Some(x) => x,
            None => {
                let head = match doc.query_selector(root, &head_sel) {
                    Some(x) => x,
                    None => {
                        let Some(html) = doc.document_element() else {
                            log::debug!("No root element for the title");
                            return Ok(());
                        };
                        let head = doc.create_element("head");
                        match doc.first_child(html) {
                            Some(first) => doc.insert_before(first, head),
                            None => doc.append(html, head),
                        }
                        head
                    }
                };
                let x = doc.create_element("title");
                doc.append(head, x);
                x
            }
        };
        doc.set_text_content(id, title);
        Ok(())
    }

    fn dispatch_event(&self, event: &ShellEvent) -> Result<(), Error> {
        self.shared.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

/// An element of a `TreeBackend` .
#[derive(Clone)]
pub struct TreeElement {
    shared: Rc<TreeShared>,
    id: NodeId,
}

impl std::fmt::Debug for TreeElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.shared.doc.borrow();
        match doc.content(self.id) {
            NodeContent::Element(elem) => write!(f, "<{}>", elem.tag_name),
            x => write!(f, "{:?}", x),
        }
    }
}

impl TreeElement {
    /// The tag name.
    pub fn tag_name(&self) -> String {
        self.shared
            .doc
            .borrow()
            .element(self.id)
            .map(|x| x.tag_name.clone())
            .unwrap_or_default()
    }

    /// The text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        self.shared.doc.borrow().text_content(self.id)
    }

    /// The HTML of the child nodes.
    pub fn inner_html(&self) -> String {
        self.shared.doc.borrow().inner_html(self.id)
    }

    /// The HTML of the element itself.
    pub fn outer_html(&self) -> String {
        self.shared.doc.borrow().outer_html(self.id)
    }

    /// Simulate a click.
    ///
    /// Returns whether a navigation is triggered.
    pub fn click(&self) -> bool {
        let target = self
            .shared
            .bound_navigations
            .borrow()
            .iter()
            .find(|(id, _)| *id == self.id)
            .map(|(_, path)| path.clone());
        match target {
            Some(path) => {
                self.shared.navigations.borrow_mut().push(path);
                true
            }
            None => false,
        }
    }
}

impl BackendElement for TreeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.shared
            .doc
            .borrow()
            .attribute(self.id, name)
            .map(|x| x.to_string())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), Error> {
        self.shared
            .doc
            .borrow_mut()
            .set_attribute(self.id, name, value);
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> Result<(), Error> {
        self.shared.doc.borrow_mut().remove_attribute(self.id, name);
        Ok(())
    }

    fn add_class(&self, class: &str) -> Result<(), Error> {
        self.shared.doc.borrow_mut().add_class(self.id, class);
        Ok(())
    }

    fn set_text_content(&self, text: &str) {
        self.shared.doc.borrow_mut().set_text_content(self.id, text);
    }

    fn set_inner_html(&self, html: &str) -> Result<(), Error> {
        self.shared.doc.borrow_mut().set_inner_html(self.id, html);
        Ok(())
    }

    fn replace_children_with_html(&self, html: &str) -> Result<(), Error> {
        let mut doc = self.shared.doc.borrow_mut();
        let nodes = doc.parse_fragment(html);
        doc.replace_children(self.id, nodes);
        Ok(())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, Error> {
        let selector = Selector::parse(selector)?;
        let doc = self.shared.doc.borrow();
        Ok(doc
            .query_selector_all(self.id, &selector)
            .into_iter()
            .map(|id| Self {
                shared: self.shared.clone(),
                id,
            })
            .collect())
    }

    fn bind_navigation(&self, path: &str) -> Result<(), Error> {
        self.shared
            .bound_navigations
            .borrow_mut()
            .push((self.id, path.to_string()));
        Ok(())
    }
}
