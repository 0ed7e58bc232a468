//! The network interface.

use futures::future::LocalBoxFuture;

use crate::error::Error;

/// The headers sent with a no-store request.
pub const NO_STORE_HEADERS: [(&str, &str); 2] = [
    ("Cache-Control", "no-cache, no-store, must-revalidate"),
    ("Pragma", "no-cache"),
];

/// The cache policy of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Use the HTTP cache normally.
    Default,
    /// Bypass the HTTP cache and send the `NO_STORE_HEADERS` .
    NoStore,
}

/// A GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The URL, including the cache-busting parameter if any.
    pub url: String,
    /// The cache policy.
    pub cache: CacheMode,
}

impl FetchRequest {
    /// A plain request.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            cache: CacheMode::Default,
        }
    }

    /// A request which bypasses every cache.
    ///
    /// A `t=<timestamp>` query parameter is appended so that intermediate caches see a fresh URL.
    pub fn no_store(url: &str, timestamp: u64) -> Self {
        let sep = if url.contains('?') { '&' } else { '?' };
        Self {
            url: format!("{}{}t={}", url, sep, timestamp),
            cache: CacheMode::NoStore,
        }
    }
}

/// The interface to retrieve text resources.
///
/// Implementations must return an error for network failures and non-success statuses.
pub trait Fetch {
    /// Fetch the body of a resource as text.
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        (**self).fetch_text(req)
    }
}

impl<T: Fetch + ?Sized> Fetch for std::rc::Rc<T> {
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        (**self).fetch_text(req)
    }
}
