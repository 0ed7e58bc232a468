//! Offline rendering of a page.
//!
//! The page runs through the same shell as in the browser,
//! with the in-memory backend and the site files as the network.

use std::path::{Path, PathBuf};

use pageshell::{
    backend::tree::TreeBackend, config::ShellConfig, path::strip_locale_prefix, PageShell,
};

use crate::{config::SiteConfig, ToolError};

/// Map the URL path of a page to its source file, the way the site is served.
///
/// The locale prefix is ignored;
/// a directory maps to its `index.html` and a clean URL to the file with the page extension.
pub fn page_file(root: &Path, url_path: &str, config: &ShellConfig) -> PathBuf {
    let path = url_path
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    let path = strip_locale_prefix(path, &config.locale.prefix).unwrap_or(path);
    let mut file = path.trim_start_matches('/').to_string();
    if file.is_empty() || file.ends_with('/') {
        file.push_str("index");
        file.push_str(&config.page_extension);
    } else {
        let last = file.rsplit('/').next().unwrap_or_default();
        if !last.contains('.') {
            file.push_str(&config.page_extension);
        }
    }
    root.join(file)
}

/// Render the page at `url_path` with its components and translations.
pub fn prerender(config: &SiteConfig, url_path: &str) -> Result<String, ToolError> {
    let file = page_file(&config.root, url_path, &config.shell);
    log::info!("Rendering {:?} from {}", url_path, file.display());
    let html = std::fs::read_to_string(&file).map_err(ToolError::io(&file))?;
    let backend = TreeBackend::new(&html, url_path);
    let shell = PageShell::new(backend.clone(), config.fetcher(), config.shell.clone());
    futures::executor::block_on(shell.run());
    for event in backend.events() {
        log::debug!("Dispatched {:?}", event.event_type());
    }
    Ok(backend.html())
}

/// Render the page at `url_path` into `output` .
pub fn prerender_to_file(
    config: &SiteConfig,
    url_path: &str,
    output: &Path,
) -> Result<(), ToolError> {
    let html = prerender(config, url_path)?;
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir).map_err(ToolError::io(dir))?;
    }
    std::fs::write(output, html).map_err(ToolError::io(output))
}
