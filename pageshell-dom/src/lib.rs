//! pageshell: component loading and JSON-dictionary i18n for static landing pages
//!
//! This is the *DOM binding* module.
//!
//! ### Quick Start
//!
//! Load the compiled module in every page and start the shell.
//!
//! ```rust
//! use wasm_bindgen::prelude::*;
//! use pageshell::config::ShellConfig;
//!
//! #[wasm_bindgen(start)]
//! pub fn wasm_main() {
//!     // the shell starts when the document is parsed
//!     pageshell_dom::start(ShellConfig::default());
//! }
//! ```
//!

#![warn(missing_docs)]

use pageshell::{
    backend::{Backend, ShellEvent},
    config::ShellConfig,
    error::Error,
    PageShell,
};
use wasm_bindgen::{prelude::*, JsCast, JsValue};

mod element;
pub use element::DomElement;
mod fetch;
pub use fetch::DomFetcher;

/// The types that should usually be imported.
pub mod prelude {
    pub use crate::{DomBackend, DomElement, DomFetcher};
    pub use pageshell::prelude::*;
}

thread_local! {
    pub(crate) static WINDOW: web_sys::Window = web_sys::window().expect("Cannot init DOM backend outside web page environment");
    pub(crate) static DOCUMENT: web_sys::Document = {
        WINDOW.with(|window| {
            window.document().expect("Cannot init DOM backend when document is not ready")
        })
    };
}

pub(crate) fn js_error_message(err: &JsValue) -> String {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        String::from(err.message())
    } else if let Some(s) = err.as_string() {
        s
    } else {
        "(JavaScript Error)".into()
    }
}

pub(crate) fn log_js_error(err: &JsValue) {
    log::error!("{}", js_error_message(err));
}

pub(crate) fn backend_error(msg: &str) -> impl '_ + FnOnce(JsValue) -> Error {
    move |err| Error::BackendError {
        msg: format!("{}: {}", msg, js_error_message(&err)),
        err: None,
    }
}

/// A common async runner for DOM environment
#[inline]
pub fn async_task(fut: impl 'static + std::future::Future<Output = ()>) {
    wasm_bindgen_futures::spawn_local(fut);
}

/// Start the page shell with the current document.
///
/// If the document is still loading, the shell starts at `DOMContentLoaded` .
pub fn start(config: ShellConfig) {
    let run = move || {
        let shell = PageShell::new(DomBackend::new(), DomFetcher::new(), config);
        async_task(async move { shell.run().await });
    };
    let loading = DOCUMENT.with(|document| document.ready_state() == "loading");
    if !loading {
        run();
        return;
    }
    let cb = Closure::once_into_js(run);
    let ret = DOCUMENT.with(|document| {
        document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref())
    });
    if let Err(err) = ret {
        log_js_error(&err);
    }
}

/// A DOM backend
///
/// It works on the document of the current window.
#[derive(Debug, Default, Clone)]
pub struct DomBackend {}

impl DomBackend {
    /// Create a backend of the current document
    pub fn new() -> Self {
        Self {}
    }
}

impl Backend for DomBackend {
    type Element = DomElement;

    fn location_path(&self) -> String {
        WINDOW.with(|window| window.location().pathname().unwrap_or_else(|_| "/".into()))
    }

    fn timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn document_element(&self) -> Result<Self::Element, Error> {
        DOCUMENT
            .with(|document| document.document_element())
            .map(DomElement::new)
            .ok_or_else(|| Error::BackendError {
                msg: "The document has no root element".into(),
                err: None,
            })
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, Error> {
        let ret = DOCUMENT
            .with(|document| document.query_selector(selector))
            .map_err(backend_error("Illegal selector"))?;
        Ok(ret.map(DomElement::new))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>, Error> {
        let list = DOCUMENT
            .with(|document| document.query_selector_all(selector))
            .map_err(backend_error("Illegal selector"))?;
        Ok(element::collect_elements(&list))
    }

    fn set_title(&self, title: &str) -> Result<(), Error> {
        DOCUMENT.with(|document| document.set_title(title));
        Ok(())
    }

    fn dispatch_event(&self, event: &ShellEvent) -> Result<(), Error> {
        let init = web_sys::CustomEventInit::new();
        if let ShellEvent::ComponentLoaded {
            name,
            target_selector,
        } = event
        {
            let detail = js_sys::Object::new();
            js_sys::Reflect::set(&detail, &"componentName".into(), &name.into())
                .map_err(backend_error("Cannot build event detail"))?;
            js_sys::Reflect::set(
                &detail,
                &"targetSelector".into(),
                &target_selector.into(),
            )
            .map_err(backend_error("Cannot build event detail"))?;
            init.set_detail(&detail);
        }
        let ev = web_sys::CustomEvent::new_with_event_init_dict(&event.event_type(), &init)
            .map_err(backend_error("Cannot create event"))?;
        DOCUMENT
            .with(|document| document.dispatch_event(&ev))
            .map_err(backend_error("Cannot dispatch event"))?;
        Ok(())
    }
}
