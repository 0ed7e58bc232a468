//! pageshell: component loading and JSON-dictionary i18n for static landing pages
//!
//! A page is a static HTML file with placeholders for shared components
//! (navigation bar, footer, call-to-action) and marker attributes for translatable content.
//! The shell fetches the components in parallel, injects them,
//! and, on pages under the locale prefix, applies a translation dictionary
//! once both the dictionary and the document are ready.
//!
//! The document is abstracted by the `Backend` trait.
//! The browser DOM backend is in the `pageshell-dom` crate;
//! `backend::tree::TreeBackend` works on an in-memory document.
//!
//! ```rust
//! use futures::future::{ready, LocalBoxFuture, FutureExt};
//! use pageshell::prelude::*;
//! use pageshell::backend::tree::TreeBackend;
//!
//! struct Components;
//!
//! impl Fetch for Components {
//!     fn fetch_text(&self, req: FetchRequest) -> LocalBoxFuture<'_, Result<String, Error>> {
//!         let ret = if req.url.starts_with("/components/footer.html") {
//!             Ok(r#"<img src="assets/logo.svg">"#.to_string())
//!         } else {
//!             Err(Error::FetchError { url: req.url, status: Some(404), msg: String::new() })
//!         };
//!         ready(ret).boxed_local()
//!     }
//! }
//!
//! let backend = TreeBackend::new(
//!     r#"<html><head></head><body><div id="footer-placeholder"></div></body></html>"#,
//!     "/blog/post",
//! );
//! let shell = PageShell::new(backend.clone(), Components, ShellConfig::default());
//! futures::executor::block_on(shell.run());
//! assert!(backend.html().contains(r#"<img src="../assets/logo.svg">"#));
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod i18n;
pub mod loader;
pub mod path;
pub mod rewrite;
pub mod shell;

pub use shell::PageShell;

/// The commonly used types.
pub mod prelude {
    pub use super::backend::{Backend, BackendElement, ShellEvent};
    pub use super::config::{ComponentSpec, ShellConfig};
    pub use super::dictionary::{Dictionary, Entry};
    pub use super::error::Error;
    pub use super::fetch::{CacheMode, Fetch, FetchRequest};
    pub use super::path::{Locale, PagePath};
    pub use super::PageShell;
}
