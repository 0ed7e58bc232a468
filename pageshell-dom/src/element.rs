use pageshell::{backend::BackendElement, error::Error};
use wasm_bindgen::{prelude::*, JsCast};

use crate::{backend_error, log_js_error, DOCUMENT, WINDOW};

pub(crate) fn collect_elements(list: &web_sys::NodeList) -> Vec<DomElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|x| x.dyn_into::<web_sys::Element>().ok())
        .map(DomElement::new)
        .collect()
}

/// A DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    elem: web_sys::Element,
}

impl DomElement {
    /// Wrap a DOM element
    #[inline]
    pub fn new(elem: web_sys::Element) -> Self {
        Self { elem }
    }

    /// Get the underlying DOM element
    #[inline]
    pub fn dom_element(&self) -> &web_sys::Element {
        &self.elem
    }
}

impl BackendElement for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.elem.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), Error> {
        self.elem
            .set_attribute(name, value)
            .map_err(backend_error("Cannot set attribute"))
    }

    fn remove_attribute(&self, name: &str) -> Result<(), Error> {
        self.elem
            .remove_attribute(name)
            .map_err(backend_error("Cannot remove attribute"))
    }

    fn add_class(&self, class: &str) -> Result<(), Error> {
        self.elem
            .class_list()
            .add_1(class)
            .map_err(backend_error("Cannot add class"))
    }

    fn set_text_content(&self, text: &str) {
        self.elem.set_text_content(Some(text));
    }

    fn set_inner_html(&self, html: &str) -> Result<(), Error> {
        self.elem.set_inner_html(html);
        Ok(())
    }

    fn replace_children_with_html(&self, html: &str) -> Result<(), Error> {
        let parser = web_sys::DomParser::new().map_err(backend_error("Cannot create parser"))?;
        let doc = parser
            .parse_from_string(html, web_sys::SupportedType::TextHtml)
            .map_err(backend_error("Cannot parse fragment"))?;
        let body = doc.body().ok_or_else(|| Error::ParseError {
            msg: "The parsed fragment has no body".into(),
        })?;
        let fragment = DOCUMENT.with(|document| document.create_document_fragment());
        while let Some(child) = body.first_child() {
            fragment
                .append_child(&child)
                .map_err(backend_error("Cannot move parsed node"))?;
        }
        self.elem.set_text_content(None);
        self.elem
            .append_child(&fragment)
            .map_err(backend_error("Cannot append parsed nodes"))?;
        Ok(())
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>, Error> {
        let list = self
            .elem
            .query_selector_all(selector)
            .map_err(backend_error("Illegal selector"))?;
        Ok(collect_elements(&list))
    }

    fn bind_navigation(&self, path: &str) -> Result<(), Error> {
        let path = path.to_string();
        let cb = Closure::<dyn Fn(web_sys::Event)>::new(move |ev: web_sys::Event| {
            ev.prevent_default();
            let ret = WINDOW.with(|window| window.location().set_href(&path));
            if let Err(err) = ret {
                log_js_error(&err);
            }
        });
        self.elem
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .map_err(backend_error("Cannot add click listener"))?;
        // the listener lives as long as the page
        cb.forget();
        Ok(())
    }
}
