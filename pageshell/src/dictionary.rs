//! The translation dictionary.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::{
    config::LocaleConfig,
    error::Error,
    fetch::{Fetch, FetchRequest},
    path::Locale,
};

/// A dictionary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A text, used as text content, markup or attribute value.
    Text(String),
    /// An ordered list, rendered as list items.
    List(Vec<String>),
}

impl Entry {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(x) => Some(Self::Text(x)),
            Value::Array(items) => Some(Self::List(
                items
                    .into_iter()
                    .map(|x| match x {
                        Value::String(x) => x,
                        x => x.to_string(),
                    })
                    .collect(),
            )),
            Value::Number(x) => Some(Self::Text(x.to_string())),
            Value::Bool(x) => Some(Self::Text(x.to_string())),
            Value::Null | Value::Object(_) => None,
        }
    }
}

/// A flat key-value dictionary of one language.
///
/// Keys are namespaced with dots, e.g. `home.hero.title` .
/// The dictionary is immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: FxHashMap<String, Entry>,
}

impl Dictionary {
    /// Parse a JSON object.
    pub fn from_json(src: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(src)?;
        Self::from_value(value)
    }

    /// Convert a JSON object.
    ///
    /// `null` and nested objects are dropped.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(map) = value else {
            return Err(Error::ParseError {
                msg: "The dictionary is not a JSON object".into(),
            });
        };
        Ok(map
            .into_iter()
            .filter_map(|(k, v)| Entry::from_value(v).map(|v| (k, v)))
            .collect())
    }

    /// Get an entry.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Get a text entry.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            Entry::Text(x) => Some(x),
            Entry::List(_) => None,
        }
    }

    /// Get a list entry.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key)? {
            Entry::List(x) => Some(x),
            Entry::Text(_) => None,
        }
    }

    /// The number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Entry)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (K, Entry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Load the dictionary of `locale` .
///
/// The default locale is the language of the page source, so nothing is fetched and `None` is returned.
pub async fn load(
    fetcher: &impl Fetch,
    config: &LocaleConfig,
    locale: Locale,
) -> Result<Option<Dictionary>, Error> {
    if locale == Locale::Default {
        return Ok(None);
    }
    let text = fetcher
        .fetch_text(FetchRequest::new(&config.dictionary_url))
        .await?;
    let dict = Dictionary::from_json(&text)?;
    log::debug!(
        "Loaded {} translations from {:?}",
        dict.len(),
        config.dictionary_url
    );
    Ok(Some(dict))
}
