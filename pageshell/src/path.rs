//! Page path resolution.
//!
//! Everything here is a pure function of the URL path and the locale prefix.

use crate::config::ShellConfig;

/// The locale of a page, derived from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// The page is served without the locale prefix.
    Default,
    /// The page is served under the locale prefix.
    Alternate,
}

/// Strip the `/<prefix>` segment from `path` .
///
/// Returns the remaining path (always starting with `/` ),
/// or `None` if the path is not under the prefix.
pub fn strip_locale_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix('/')?.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

// split off the `?query` and `#hash` parts
fn split_suffix(href: &str) -> (&str, &str) {
    match href.find(|c: char| c == '?' || c == '#') {
        Some(index) => href.split_at(index),
        None => (href, ""),
    }
}

/// Normalize a path for comparison.
///
/// The locale prefix, the query, the leading and trailing slashes and the page extension are removed;
/// an `index` page maps to its directory.
pub fn normalize_path(path: &str, prefix: &str, page_extension: &str) -> String {
    let (path, _) = split_suffix(path);
    let path = strip_locale_prefix(path, prefix).unwrap_or(path);
    let path = path.trim_start_matches('/');
    let path = path.strip_suffix(page_extension).unwrap_or(path);
    let path = path.trim_end_matches('/');
    if path == "index" {
        return String::new();
    }
    path.strip_suffix("/index").unwrap_or(path).to_string()
}

/// Check if a URL starts with a scheme such as `https:` or `mailto:` .
pub fn has_scheme(url: &str) -> bool {
    let Some(index) = url.find(|c: char| c == ':' || c == '/' || c == '?' || c == '#') else {
        return false;
    };
    let scheme = &url[..index];
    url[index..].starts_with(':')
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// A resolved page path.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePath {
    path: String,
    prefix: String,
    page_extension: String,
    locale: Locale,
    depth: usize,
}

impl PagePath {
    /// Resolve a URL path with the locale prefix and page extension of `config` .
    pub fn resolve(path: &str, config: &ShellConfig) -> Self {
        Self::with_prefix(path, &config.locale.prefix, &config.page_extension)
    }

    /// Resolve a URL path.
    pub fn with_prefix(path: &str, prefix: &str, page_extension: &str) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        let (locale, rest) = match strip_locale_prefix(path, prefix) {
            Some(rest) => (Locale::Alternate, rest),
            None => (Locale::Default, path),
        };
        let mut segments: Vec<&str> = rest.split('/').collect();
        // without a trailing slash the last segment names the page itself
        if !rest.ends_with('/') {
            segments.pop();
        }
        let depth = segments
            .into_iter()
            .filter(|x| !x.is_empty() && (page_extension.is_empty() || !x.ends_with(page_extension)))
            .count();
        Self {
            path: path.to_string(),
            prefix: prefix.to_string(),
            page_extension: page_extension.to_string(),
            locale,
            depth,
        }
    }

    /// The original path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The locale.
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The number of directories between the site root and the page.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The path without the locale prefix.
    pub fn unprefixed(&self) -> &str {
        strip_locale_prefix(&self.path, &self.prefix).unwrap_or(&self.path)
    }

    /// Normalize a path or a link target in the same way as this page.
    pub fn normalize(&self, path: &str) -> String {
        normalize_path(path, &self.prefix, &self.page_extension)
    }

    /// The normalized path of this page.
    pub fn normalized(&self) -> String {
        self.normalize(&self.path)
    }

    /// The key prefix of page-scoped dictionary entries, `home` for the root page.
    pub fn page_key(&self) -> String {
        let ret = self.normalized();
        if ret.is_empty() {
            "home".into()
        } else {
            ret
        }
    }

    /// Check if a navigation link points to this page or one of its ancestors.
    pub fn is_link_active(&self, href: &str) -> bool {
        if href.starts_with('#') || href.starts_with("//") || has_scheme(href) {
            return false;
        }
        let link = self.normalize(href);
        let current = self.normalized();
        if link == current {
            return true;
        }
        !link.is_empty() && current.starts_with(&link) && current[link.len()..].starts_with('/')
    }

    /// The same page in the other locale.
    pub fn switch_locale_path(&self) -> String {
        match self.locale {
            Locale::Alternate => self.unprefixed().to_string(),
            Locale::Default => format!("/{}{}", self.prefix, self.path),
        }
    }

    /// Add the locale prefix to a root-relative link target.
    ///
    /// Returns `None` for targets which should stay unchanged:
    /// external URLs, protocol-relative URLs, relative paths, anchors
    /// and targets which already carry the prefix.
    pub fn localize_href(&self, href: &str) -> Option<String> {
        if !href.starts_with('/') || href.starts_with("//") {
            return None;
        }
        let (path, _) = split_suffix(href);
        if strip_locale_prefix(path, &self.prefix).is_some() {
            return None;
        }
        Some(format!("/{}{}", self.prefix, href))
    }
}
