//! A fetcher reading the site files.

use std::path::PathBuf;

use futures::future::{ready, FutureExt, LocalBoxFuture};
use pageshell::{
    error::Error,
    fetch::{Fetch, FetchRequest},
};

/// Serve root-relative URLs from a directory, like a static file server does.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher serving `root` as `/` .
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a URL to a file path.
    pub fn file_path(&self, url: &str) -> PathBuf {
        let path = url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        self.root.join(path.trim_start_matches('/'))
    }

    fn read(&self, url: &str) -> Result<String, Error> {
        let path = self.file_path(url);
        log::trace!("Reading {} for {:?}", path.display(), url);
        std::fs::read_to_string(&path).map_err(|err| Error::FetchError {
            url: url.to_string(),
            status: (err.kind() == std::io::ErrorKind::NotFound).then_some(404),
            msg: err.to_string(),
        })
    }
}

impl Fetch for FsFetcher {
    fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
        ready(self.read(&req.url)).boxed_local()
    }
}
