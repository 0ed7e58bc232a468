//! The i18n checker.
//!
//! Every marker attribute in the site pages and components is checked against the dictionary.

use std::path::{Path, PathBuf};

use pageshell::{
    dictionary::{Dictionary, Entry},
    i18n::Binding,
};
use pageshell_tree::{Document, Selector};
use rustc_hash::FxHashSet;

use crate::{config::SiteConfig, ToolError};

/// The kind of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Problem {
    /// The key is not in the dictionary.
    MissingKey,
    /// A list marker is bound to a text entry.
    ExpectedList,
    /// A non-list marker is bound to a list entry.
    ExpectedText,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Problem::MissingKey => "missing key",
            Problem::ExpectedList => "expected a list",
            Problem::ExpectedText => "expected a text",
        };
        write!(f, "{}", s)
    }
}

/// A problem of a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Finding {
    /// The file containing the marker.
    pub file: PathBuf,
    /// The marker attribute.
    pub marker: String,
    /// The dictionary key.
    pub key: String,
    /// The problem.
    pub problem: Problem,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}={:?}: {}",
            self.file.display(),
            self.marker,
            self.key,
            self.problem
        )
    }
}

fn problem_of(binding: Binding, entry: Option<&Entry>) -> Option<Problem> {
    match (binding, entry) {
        (_, None) => Some(Problem::MissingKey),
        (Binding::List, Some(Entry::Text(_))) => Some(Problem::ExpectedList),
        (Binding::List, Some(Entry::List(_))) => None,
        (_, Some(Entry::List(_))) => Some(Problem::ExpectedText),
        (_, Some(Entry::Text(_))) => None,
    }
}

/// Check the markers in an HTML source.
///
/// A marker and key pair is reported at most once per file.
pub fn check_html(file: &Path, html: &str, dict: &Dictionary) -> Vec<Finding> {
    let doc = Document::parse(html);
    let mut reported = FxHashSet::default();
    let mut ret = Vec::new();
    for binding in Binding::ALL {
        let marker = binding.marker();
        let Ok(selector) = Selector::parse(&format!("[{}]", marker)) else {
            continue;
        };
        for id in doc.query_selector_all(doc.root(), &selector) {
            let Some(key) = doc.attribute(id, &marker) else {
                continue;
            };
            let Some(problem) = problem_of(binding, dict.get(key)) else {
                continue;
            };
            if !reported.insert((marker.clone(), key.to_string())) {
                continue;
            }
            ret.push(Finding {
                file: file.to_path_buf(),
                marker: marker.clone(),
                key: key.to_string(),
                problem,
            });
        }
    }
    ret
}

fn collect_pages(dir: &Path, exclude: &[String], ret: &mut Vec<PathBuf>) -> Result<(), ToolError> {
    for entry in std::fs::read_dir(dir).map_err(ToolError::io(dir))? {
        let entry = entry.map_err(ToolError::io(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(ToolError::io(&path))?;
        if file_type.is_dir() {
            let name = entry.file_name();
            if exclude.iter().any(|x| name.to_str() == Some(x.as_str())) {
                continue;
            }
            collect_pages(&path, exclude, ret)?;
        } else if path.extension().and_then(|x| x.to_str()) == Some("html") {
            ret.push(path);
        }
    }
    Ok(())
}

/// Find all HTML files under the site root, sorted by path.
pub fn find_pages(config: &SiteConfig) -> Result<Vec<PathBuf>, ToolError> {
    let mut ret = Vec::new();
    collect_pages(&config.root, &config.exclude, &mut ret)?;
    ret.sort();
    Ok(ret)
}

/// Load the dictionary of the alternate locale from the site root.
pub fn load_dictionary(config: &SiteConfig) -> Result<Dictionary, ToolError> {
    let path = config.dictionary_path();
    let content = std::fs::read_to_string(&path).map_err(ToolError::io(&path))?;
    Dictionary::from_json(&content).map_err(|err| ToolError::Parse {
        path,
        msg: err.to_string(),
    })
}

/// Check all pages of the site.
pub fn check_site(config: &SiteConfig) -> Result<Vec<Finding>, ToolError> {
    let dict = load_dictionary(config)?;
    let mut ret = Vec::new();
    for page in find_pages(config)? {
        let html = std::fs::read_to_string(&page).map_err(ToolError::io(&page))?;
        let findings = check_html(&page, &html, &dict);
        log::debug!("{}: {} finding(s)", page.display(), findings.len());
        ret.extend(findings);
    }
    Ok(ret)
}
