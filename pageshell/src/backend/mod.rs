//! The backend-related interface.
//!
//! A backend is the document the shell works on.
//! The browser DOM backend lives in the `pageshell-dom` crate;
//! an in-memory backend is provided in the `tree` module.

use crate::error::Error;

pub mod tree;

/// An event dispatched on the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A component has been injected into its placeholder.
    ComponentLoaded {
        /// The component name.
        name: String,
        /// The selector of the placeholder.
        target_selector: String,
    },
    /// Every component injection has settled, successfully or not.
    AllComponentsLoaded,
}

impl ShellEvent {
    /// The DOM event type.
    pub fn event_type(&self) -> String {
        match self {
            Self::ComponentLoaded { name, .. } => format!("component-loaded:{}", name),
            Self::AllComponentsLoaded => "all-components-loaded".into(),
        }
    }
}

/// The interface that a backend should implement.
///
/// Selectors are plain CSS selectors.
/// Backends are not required to support combinators.
pub trait Backend: 'static {
    /// The element type.
    type Element: BackendElement;

    /// Get the path of the current page URL.
    fn location_path(&self) -> String;

    /// Get a millisecond timestamp, used for cache busting.
    fn timestamp(&self) -> u64;

    /// Get the root element of the document.
    fn document_element(&self) -> Result<Self::Element, Error>;

    /// Find the first element matching the selector.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, Error>;

    /// Find all elements matching the selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, Error>;

    /// Set the document title.
    fn set_title(&self, title: &str) -> Result<(), Error>;

    /// Dispatch an event on the document.
    fn dispatch_event(&self, event: &ShellEvent) -> Result<(), Error>;
}

/// An element in the backend.
///
/// An element is a cheap handle; cloning it does not clone the element.
pub trait BackendElement: Clone + 'static {
    /// Get an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str) -> Result<(), Error>;

    /// Remove an attribute.
    fn remove_attribute(&self, name: &str) -> Result<(), Error>;

    /// Add a class if it is not present.
    fn add_class(&self, class: &str) -> Result<(), Error>;

    /// Replace the children with a text node.
    fn set_text_content(&self, text: &str);

    /// Replace the children with parsed markup.
    fn set_inner_html(&self, html: &str) -> Result<(), Error>;

    /// Parse the markup into detached nodes and then replace the children with them.
    ///
    /// If parsing fails, the children are not changed.
    fn replace_children_with_html(&self, html: &str) -> Result<(), Error>;

    /// Find all descendant elements matching the selector, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, Error>;

    /// Navigate to `path` when the element is clicked, instead of the default action.
    fn bind_navigation(&self, path: &str) -> Result<(), Error>;
}
