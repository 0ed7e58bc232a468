#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap};

use futures::{
    channel::oneshot,
    future::{ready, FutureExt, LocalBoxFuture},
};
use pageshell::prelude::*;

pub const PAGE: &str = r##"<!DOCTYPE html><html lang="en"><head><title>Usable</title><meta name="description" content="Usable helps teams"><meta property="og:locale" content="en_US"></head><body><div id="navbar-placeholder"></div><main><h1 data-i18n="home.hero.title">Ship faster</h1><p data-i18n-html="home.hero.lead">Plain <b>lead</b></p><img src="assets/hero.png" data-i18n-alt="home.hero.alt" alt="Hero"><input data-i18n-placeholder="home.form.email" placeholder="Email"><ul data-i18n-list="home.features"><li>One</li><li>Two</li><li>Three</li></ul><a href="/pricing" data-clean-url="/pricing">Pricing</a><a href="#top">Top</a><a href="https://example.com/x">External</a></main><div id="cta-placeholder"></div><div id="footer-placeholder"></div></body></html>"##;

pub const NAVBAR: &str = r#"<nav class="nav"><a class="nav__link" href="/">Home</a><a class="nav__link" href="/blog">Blog</a><a class="nav__link" href="/pricing.html">Pricing</a><a class="nav__dropdown-item" href="https://example.com">Docs</a><button class="nav__lang-switch"><span class="nav__lang-switch-label">??</span></button><img src="assets/logo.svg" alt="Usable"><span data-i18n="nav.blog">Blog</span></nav>"#;

pub const FOOTER: &str = r#"<footer><img src='assets/logo.svg'><a href="/privacy">Privacy</a></footer>"#;

pub const CTA: &str = r#"<section class="cta"><h2 data-i18n="cta.title">Try it</h2></section>"#;

pub const DICTIONARY: &str = r#"{
    "home.title": "Usable - Skjótari",
    "home.meta.description": "Usable hjálpir toymum",
    "home.hero.title": "Skjótari",
    "home.hero.lead": "Greitt <b data-i18n=\"home.hero.bold\">x</b>",
    "home.hero.bold": "feitt",
    "home.hero.alt": "Mynd",
    "home.features": ["Eitt", "Tvey"],
    "nav.blog": "Bloggur",
    "cta.title": "Royn tað"
}"#;

/// A response of the mock fetcher: a body or an HTTP status.
pub type MockResponse = Result<String, u16>;

/// A fetcher that answers from a table keyed by the URL path.
///
/// Unknown paths answer `404` .
#[derive(Default)]
pub struct MockFetch {
    ready: HashMap<String, MockResponse>,
    deferred: RefCell<HashMap<String, oneshot::Receiver<MockResponse>>>,
    requests: RefCell<Vec<FetchRequest>>,
}

impl MockFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetcher that serves all components and the dictionary.
    pub fn site() -> Self {
        Self::new()
            .ok("/components/navbar.html", NAVBAR)
            .ok("/components/footer.html", FOOTER)
            .ok("/components/cta.html", CTA)
            .ok("/translations/fo.json", DICTIONARY)
    }

    pub fn ok(mut self, path: &str, body: &str) -> Self {
        self.ready.insert(path.to_string(), Ok(body.to_string()));
        self
    }

    pub fn status(mut self, path: &str, status: u16) -> Self {
        self.ready.insert(path.to_string(), Err(status));
        self
    }

    /// Hold the response of `path` until the returned sender is used.
    pub fn defer(&self, path: &str) -> oneshot::Sender<MockResponse> {
        let (tx, rx) = oneshot::channel();
        self.deferred.borrow_mut().insert(path.to_string(), rx);
        tx
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }
}

fn to_result(url: String, resp: MockResponse) -> Result<String, Error> {
    resp.map_err(|status| Error::FetchError {
        url,
        status: Some(status),
        msg: String::new(),
    })
}

impl Fetch for MockFetch {
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        self.requests.borrow_mut().push(req.clone());
        let path = req.url.split('?').next().unwrap_or_default().to_string();
        if let Some(rx) = self.deferred.borrow_mut().remove(&path) {
            return async move {
                let resp = rx.await.unwrap_or(Err(0));
                to_result(req.url, resp)
            }
            .boxed_local();
        }
        let resp = self.ready.get(&path).cloned().unwrap_or(Err(404));
        ready(to_result(req.url, resp)).boxed_local()
    }
}
