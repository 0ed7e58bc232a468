use futures::future::{FutureExt, LocalBoxFuture};
use pageshell::{
    error::Error,
    fetch::{CacheMode, Fetch, FetchRequest, NO_STORE_HEADERS},
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{js_error_message, WINDOW};

/// A fetcher using the `fetch` API of the window
#[derive(Debug, Default, Clone)]
pub struct DomFetcher {}

impl DomFetcher {
    /// Create a fetcher
    pub fn new() -> Self {
        Self {}
    }
}

impl Fetch for DomFetcher {
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        fetch_text(req).boxed_local()
    }
}

async fn fetch_text(req: FetchRequest) -> Result<String, Error> {
    let fetch_error = |err: JsValue| Error::FetchError {
        url: req.url.clone(),
        status: None,
        msg: js_error_message(&err),
    };
    let init = web_sys::RequestInit::new();
    init.set_method("GET");
    if req.cache == CacheMode::NoStore {
        init.set_cache(web_sys::RequestCache::NoStore);
        let headers = web_sys::Headers::new().map_err(fetch_error)?;
        for (name, value) in NO_STORE_HEADERS {
            headers.set(name, value).map_err(fetch_error)?;
        }
        init.set_headers(&headers);
    }
    let request =
        web_sys::Request::new_with_str_and_init(&req.url, &init).map_err(fetch_error)?;
    let promise = WINDOW.with(|window| window.fetch_with_request(&request));
    let resp: web_sys::Response = JsFuture::from(promise)
        .await
        .map_err(fetch_error)?
        .dyn_into()
        .map_err(fetch_error)?;
    if !resp.ok() {
        return Err(Error::FetchError {
            url: req.url.clone(),
            status: Some(resp.status()),
            msg: resp.status_text(),
        });
    }
    let text = JsFuture::from(resp.text().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    text.as_string().ok_or_else(|| Error::ParseError {
        msg: format!("The body of {:?} is not text", req.url),
    })
}
