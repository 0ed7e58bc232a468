//! A single-file CSS minifier.
//!
//! Comments are removed, whitespace runs are collapsed,
//! whitespace around `{` `}` `:` `;` `,` is removed and so is a `;` before `}` .
//! Selectors and values are not otherwise rewritten.

use std::path::Path;

use crate::ToolError;

fn is_punct(c: char) -> bool {
    matches!(c, '{' | '}' | ':' | ';' | ',')
}

fn strip_comments(css: &str) -> String {
    let mut ret = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        let Some(len) = rest[start + 2..].find("*/") else {
            // an unclosed comment is kept
            break;
        };
        ret.push_str(&rest[..start]);
        rest = &rest[start + 2 + len + 2..];
    }
    ret.push_str(rest);
    ret
}

/// Minify a stylesheet.
pub fn minify(css: &str) -> String {
    let css = strip_comments(css);
    let mut ret = String::with_capacity(css.len());
    let mut pending_space = false;
    for c in css.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if is_punct(c) {
            if c == '}' && ret.ends_with(';') {
                ret.pop();
            }
        } else if pending_space && !ret.is_empty() && !ret.ends_with(is_punct) {
            ret.push(' ');
        }
        pending_space = false;
        ret.push(c);
    }
    ret
}

/// The sizes before and after minifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyReport {
    /// The input size in bytes.
    pub original: usize,
    /// The output size in bytes.
    pub minified: usize,
}

impl MinifyReport {
    /// The saved bytes.
    pub fn savings(&self) -> usize {
        self.original.saturating_sub(self.minified)
    }

    /// The saved bytes in percent of the input size.
    pub fn savings_percent(&self) -> f64 {
        if self.original == 0 {
            return 0.;
        }
        self.savings() as f64 * 100. / self.original as f64
    }
}

impl std::fmt::Display for MinifyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2} KB -> {:.2} KB (saved {:.2} KB, {:.1}%)",
            self.original as f64 / 1024.,
            self.minified as f64 / 1024.,
            self.savings() as f64 / 1024.,
            self.savings_percent(),
        )
    }
}

/// Minify the file `input` into `output` .
pub fn minify_file(input: &Path, output: &Path) -> Result<MinifyReport, ToolError> {
    let css = std::fs::read_to_string(input).map_err(ToolError::io(input))?;
    let minified = minify(&css);
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir).map_err(ToolError::io(dir))?;
    }
    std::fs::write(output, &minified).map_err(ToolError::io(output))?;
    Ok(MinifyReport {
        original: css.len(),
        minified: minified.len(),
    })
}
