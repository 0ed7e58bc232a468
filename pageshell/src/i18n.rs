//! The translation pass.
//!
//! Elements are bound to dictionary keys with marker attributes:
//!
//! | marker | target |
//! |---|---|
//! | `data-i18n` | text content |
//! | `data-i18n-html` | inner markup |
//! | `data-i18n-alt` , `data-i18n-aria-label` , `data-i18n-placeholder` , `data-i18n-title` , `data-i18n-content` | the attribute |
//! | `data-i18n-list` | the `<li>` descendants, by position |
//!
//! Every pass reads only the dictionary and the markers, so running it again gives the same document.

use crate::{
    backend::{Backend, BackendElement},
    config::ShellConfig,
    dictionary::Dictionary,
    error::Error,
    path::{Locale, PagePath},
};

/// The marker attribute set on the root element until the dictionary has settled.
pub const LOADING_MARKER: &str = "data-i18n-loading";

/// The marker attribute set on language switch controls once they are bound.
pub const SWITCH_BOUND_MARKER: &str = "data-lang-switch-bound";

/// What a marker attribute binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// The text content.
    Text,
    /// The inner markup.
    Html,
    /// An attribute.
    Attribute(&'static str),
    /// The list items.
    List,
}

impl Binding {
    /// All bindings in application order.
    ///
    /// Markup goes first so that the markers inside it are handled in the same pass.
    pub const ALL: [Binding; 8] = [
        Binding::Html,
        Binding::Text,
        Binding::Attribute("alt"),
        Binding::Attribute("aria-label"),
        Binding::Attribute("placeholder"),
        Binding::Attribute("title"),
        Binding::Attribute("content"),
        Binding::List,
    ];

    /// The marker attribute name.
    pub fn marker(&self) -> String {
        match self {
            Self::Text => "data-i18n".into(),
            Self::Html => "data-i18n-html".into(),
            Self::Attribute(x) => format!("data-i18n-{}", x),
            Self::List => "data-i18n-list".into(),
        }
    }
}

/// Applies translations, link localization and language switchers to a document.
pub struct Translator<'a, B: Backend> {
    backend: &'a B,
    config: &'a ShellConfig,
    page: &'a PagePath,
}

impl<'a, B: Backend> Translator<'a, B> {
    /// Create a translator for the page `page` .
    pub fn new(backend: &'a B, config: &'a ShellConfig, page: &'a PagePath) -> Self {
        Self {
            backend,
            config,
            page,
        }
    }

    /// Run everything that depends on the settled dictionary.
    ///
    /// Links are localized and switchers are set up even if there is no dictionary.
    /// Every step runs even if an earlier one fails; the first error is returned.
    pub fn refresh(&self, dict: Option<&Dictionary>) -> Result<(), Error> {
        let mut ret = Ok(());
        if let Some(dict) = dict {
            ret = ret.and(self.apply(dict));
        }
        if self.page.locale() == Locale::Alternate {
            ret = ret.and(self.localize_links());
        }
        ret.and(self.setup_language_switchers())
    }

    /// Apply the dictionary to every marked element and to the document metadata.
    ///
    /// Elements whose key is missing are left unchanged.
    /// A failing binding does not stop the others; the first error is returned.
    pub fn apply(&self, dict: &Dictionary) -> Result<(), Error> {
        let mut ret = Ok(());
        for binding in Binding::ALL {
            ret = ret.and(self.apply_binding(dict, binding));
        }
        ret.and(self.apply_meta(dict))
    }

    fn apply_binding(&self, dict: &Dictionary, binding: Binding) -> Result<(), Error> {
        let marker = binding.marker();
        for elem in self.backend.query_selector_all(&format!("[{}]", marker))? {
            let Some(key) = elem.attribute(&marker) else {
                continue;
            };
            match binding {
                Binding::Text => {
                    if let Some(text) = dict.text(&key) {
                        elem.set_text_content(text);
                    }
                }
                Binding::Html => {
                    if let Some(html) = dict.text(&key) {
                        elem.set_inner_html(html)?;
                    }
                }
                Binding::Attribute(name) => {
                    if let Some(value) = dict.text(&key) {
                        elem.set_attribute(name, value)?;
                    }
                }
                Binding::List => {
                    let Some(items) = dict.list(&key) else {
                        continue;
                    };
                    // extra items in either side are left alone
                    for (li, html) in elem.query_selector_all("li")?.iter().zip(items) {
                        li.set_inner_html(html)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply_meta(&self, dict: &Dictionary) -> Result<(), Error> {
        let page_key = self.page.page_key();
        let locale = &self.config.locale;
        if let Some(title) = dict
            .text(&format!("{}.title", page_key))
            .filter(|x| !x.is_empty())
        {
            self.backend.set_title(title)?;
        }
        if let Some(desc) = dict
            .text(&format!("{}.meta.description", page_key))
            .filter(|x| !x.is_empty())
        {
            if let Some(meta) = self.backend.query_selector(r#"meta[name="description"]"#)? {
                meta.set_attribute("content", desc)?;
            }
        }
        if let Some(meta) = self.backend.query_selector(r#"meta[property="og:locale"]"#)? {
            meta.set_attribute("content", &locale.alternate_og_locale)?;
        }
        self.backend
            .document_element()?
            .set_attribute("lang", &locale.alternate_lang)?;
        Ok(())
    }

    /// Add the locale prefix to internal links, so that navigation stays in the current locale.
    pub fn localize_links(&self) -> Result<(), Error> {
        for (selector, attr) in [("a[href]", "href"), ("a[data-clean-url]", "data-clean-url")] {
            for a in self.backend.query_selector_all(selector)? {
                let Some(href) = a.attribute(attr) else {
                    continue;
                };
                if let Some(localized) = self.page.localize_href(&href) {
                    a.set_attribute(attr, &localized)?;
                }
            }
        }
        Ok(())
    }

    /// Label the language switch controls and make them navigate to the other locale.
    pub fn setup_language_switchers(&self) -> Result<(), Error> {
        let nav = &self.config.nav;
        let locale = &self.config.locale;
        let (code, aria_label) = match self.page.locale() {
            Locale::Alternate => (&locale.default_lang, &locale.switch_to_default_label),
            Locale::Default => (&locale.alternate_lang, &locale.switch_to_alternate_label),
        };
        let target = self.page.switch_locale_path();
        for switch in self.backend.query_selector_all(&nav.switch_selector)? {
            if let Some(label) = switch
                .query_selector_all(&nav.switch_label_selector)?
                .into_iter()
                .next()
            {
                label.set_text_content(&code.to_uppercase());
            }
            switch.set_attribute("aria-label", aria_label)?;
            if switch.attribute(SWITCH_BOUND_MARKER).is_none() {
                switch.bind_navigation(&target)?;
                switch.set_attribute(SWITCH_BOUND_MARKER, "")?;
            }
        }
        Ok(())
    }
}
