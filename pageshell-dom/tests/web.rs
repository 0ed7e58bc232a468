//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use std::{cell::RefCell, rc::Rc, sync::Once};

use futures::future::{ready, FutureExt, LocalBoxFuture};
use pageshell::{i18n::Translator, loader::ComponentLoader};
use pageshell_dom::prelude::*;
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

static INIT: Once = Once::new();

fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).unwrap();
    });
}

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn create_wrapper(id: &str, html: &str) -> web_sys::Element {
    init();
    let document = document();
    let wrapper = document.create_element("div").unwrap();
    wrapper.set_id(id);
    wrapper.set_inner_html(html);
    document.body().unwrap().append_child(&wrapper).unwrap();
    wrapper
}

struct StaticFetch(&'static str);

impl Fetch for StaticFetch {
    fn fetch_text(&self, _req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        ready(Ok(self.0.to_string())).boxed_local()
    }
}

#[wasm_bindgen_test]
fn replace_children() {
    let wrapper = create_wrapper("replace-children", "<p>Loading</p>");
    let elem = DomElement::new(wrapper.clone());
    elem.replace_children_with_html(r#"<nav><a class="nav__link" href="/blog">Blog</a></nav>tail"#)
        .unwrap();
    assert_eq!(
        wrapper.inner_html(),
        r#"<nav><a class="nav__link" href="/blog">Blog</a></nav>tail"#
    );
    let links = elem.query_selector_all(".nav__link").unwrap();
    assert_eq!(links.len(), 1);
    links[0].add_class("nav__link--active").unwrap();
    assert_eq!(
        links[0].attribute("class").as_deref(),
        Some("nav__link nav__link--active")
    );
}

#[wasm_bindgen_test]
fn dispatch_component_event() {
    init();
    let heard = Rc::new(RefCell::new(None));
    let cb = {
        let heard = heard.clone();
        Closure::<dyn Fn(web_sys::CustomEvent)>::new(move |ev: web_sys::CustomEvent| {
            let detail = ev.detail();
            let name = js_sys::Reflect::get(&detail, &"componentName".into()).unwrap();
            let target = js_sys::Reflect::get(&detail, &"targetSelector".into()).unwrap();
            *heard.borrow_mut() = Some((name.as_string().unwrap(), target.as_string().unwrap()));
        })
    };
    document()
        .add_event_listener_with_callback("component-loaded:test", cb.as_ref().unchecked_ref())
        .unwrap();
    DomBackend::new()
        .dispatch_event(&ShellEvent::ComponentLoaded {
            name: "test".into(),
            target_selector: "#test-placeholder".into(),
        })
        .unwrap();
    assert_eq!(
        heard.borrow().clone(),
        Some(("test".to_string(), "#test-placeholder".to_string()))
    );
    document()
        .remove_event_listener_with_callback("component-loaded:test", cb.as_ref().unchecked_ref())
        .unwrap();
}

#[wasm_bindgen_test]
async fn inject_component() {
    create_wrapper("inject-component", r#"<div id="inject-placeholder"></div>"#);
    let backend = DomBackend::new();
    let fetcher = StaticFetch(r#"<img src="assets/logo.svg"><a class="nav__link" href="/blog">Blog</a>"#);
    let mut config = ShellConfig::default();
    config.components = vec![ComponentSpec::new(
        "navbar",
        "/components/navbar.html",
        "#inject-placeholder",
    )];
    let page = PagePath::resolve("/blog/post", &config);
    ComponentLoader::new(&backend, &fetcher, &config, &page)
        .load_all()
        .await;
    let placeholder = backend
        .query_selector("#inject-placeholder")
        .unwrap()
        .unwrap();
    assert_eq!(
        placeholder.dom_element().inner_html(),
        r#"<img src="../assets/logo.svg"><a class="nav__link nav__link--active" href="/blog">Blog</a>"#
    );
}

#[wasm_bindgen_test]
fn translate_elements() {
    create_wrapper(
        "translate-elements",
        r#"<h1 id="translate-title" data-i18n="test.title">Hello</h1><ul id="translate-list" data-i18n-list="test.list"><li>A</li><li>B</li></ul>"#,
    );
    let backend = DomBackend::new();
    let config = ShellConfig::default();
    let page = PagePath::resolve("/fo/", &config);
    let dict = Dictionary::from_json(r#"{"test.title": "Hey", "test.list": ["X"]}"#).unwrap();
    Translator::new(&backend, &config, &page).apply(&dict).unwrap();
    let title = backend.query_selector("#translate-title").unwrap().unwrap();
    assert_eq!(title.dom_element().text_content().as_deref(), Some("Hey"));
    let list = backend.query_selector("#translate-list").unwrap().unwrap();
    assert_eq!(
        list.dom_element().inner_html(),
        "<li>X</li><li>B</li>"
    );
    let root = backend.document_element().unwrap();
    assert_eq!(root.attribute("lang").as_deref(), Some("fo"));
    root.set_attribute("lang", "en").unwrap();
}
