//! Asset path rewriting for fragments injected into nested pages.
//!
//! Fragments are written with paths relative to the site root.
//! A page `depth` directories below the root needs `depth` parent-directory steps in front of them.

use std::borrow::Cow;

use crate::path::has_scheme;

/// The attributes whose values are rewritten.
pub const ASSET_ATTRIBUTES: [&str; 4] = ["src", "href", "poster", "srcset"];

/// Check if a URL is relative to the current directory.
///
/// Absolute URLs, protocol-relative URLs, root-relative paths, anchors and query-only references are not.
pub fn is_relative_reference(url: &str) -> bool {
    !url.is_empty()
        && !url.starts_with('/')
        && !url.starts_with('#')
        && !url.starts_with('?')
        && !has_scheme(url)
}

fn rewrite_url<'a>(url: &'a str, prefix: &str) -> Cow<'a, str> {
    if is_relative_reference(url) {
        Cow::Owned(format!("{}{}", prefix, url))
    } else {
        Cow::Borrowed(url)
    }
}

// candidates are `<url> [descriptor]` separated by commas;
// commas inside a URL (such as a `data:` URI) belong to it unless they end it
fn rewrite_srcset(value: &str, prefix: &str) -> String {
    let mut ret = String::with_capacity(value.len());
    let mut rest = value;
    loop {
        let sep_len = rest
            .find(|c: char| !c.is_ascii_whitespace() && c != ',')
            .unwrap_or(rest.len());
        ret.push_str(&rest[..sep_len]);
        rest = &rest[sep_len..];
        if rest.is_empty() {
            break;
        }
        let url_len = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let url = rest[..url_len].trim_end_matches(',');
        ret.push_str(&rewrite_url(url, prefix));
        rest = &rest[url.len()..];
        let descriptor_len = if rest.starts_with(',') {
            0
        } else {
            rest.find(',').unwrap_or(rest.len())
        };
        ret.push_str(&rest[..descriptor_len]);
        rest = &rest[descriptor_len..];
    }
    ret
}

// match `name = "value"` at `start` ; returns the attribute name and the value range
fn match_attribute(bytes: &[u8], start: usize) -> Option<(&'static str, usize, usize)> {
    ASSET_ATTRIBUTES.iter().find_map(|name| {
        let end = start + name.len();
        if end > bytes.len() || !bytes[start..end].eq_ignore_ascii_case(name.as_bytes()) {
            return None;
        }
        let mut i = end;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            return None;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = *bytes.get(i)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let value_start = i + 1;
        let value_len = bytes[value_start..].iter().position(|x| *x == quote)?;
        Some((*name, value_start, value_start + value_len))
    })
}

/// Rewrite the relative asset references in `html` for a page at `depth` .
///
/// Only quoted attribute values inside start tags are rewritten; text content is kept.
/// At depth `0` the input is returned unchanged.
pub fn rewrite_asset_paths(html: &str, depth: usize) -> Cow<'_, str> {
    if depth == 0 {
        return Cow::Borrowed(html);
    }
    let prefix = "../".repeat(depth);
    let bytes = html.as_bytes();
    let mut ret = String::with_capacity(html.len());
    let mut copied = 0;
    let mut in_tag = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !in_tag {
            if bytes[i..].starts_with(b"<!--") {
                match html[i + 4..].find("-->") {
                    Some(len) => i += len + 7,
                    None => break,
                }
                continue;
            }
            if b == b'<' && bytes.get(i + 1).map_or(false, |x| x.is_ascii_alphabetic()) {
                in_tag = true;
            }
            i += 1;
            continue;
        }
        match b {
            b'>' => in_tag = false,
            b'"' | b'\'' => {
                // skip the values of other attributes
                match bytes[i + 1..].iter().position(|x| *x == b) {
                    Some(len) => i += len + 1,
                    None => break,
                }
            }
            // attribute names follow a whitespace, so that `data-src` is not matched
            _ if b.is_ascii_whitespace() => {
                if let Some((name, value_start, value_end)) = match_attribute(bytes, i + 1) {
                    let value = &html[value_start..value_end];
                    ret.push_str(&html[copied..value_start]);
                    if name == "srcset" {
                        ret.push_str(&rewrite_srcset(value, &prefix));
                    } else {
                        ret.push_str(&rewrite_url(value, &prefix));
                    }
                    copied = value_end;
                    i = value_end;
                }
            }
            _ => {}
        }
        i += 1;
    }
    ret.push_str(&html[copied..]);
    Cow::Owned(ret)
}
