//! The shell configuration.
//!
//! The defaults describe the landing page this crate was written for.
//! Every field can be overridden when deserializing (missing fields keep the defaults).

use serde::Deserialize;

/// A component fragment and the placeholder it is injected into.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentSpec {
    /// The component name, used in the `component-loaded:<name>` event.
    pub name: String,
    /// The URL of the HTML fragment.
    pub url: String,
    /// The selector of the placeholder element.
    pub target: String,
}

impl ComponentSpec {
    /// Create a component entry.
    pub fn new(name: &str, url: &str, target: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            target: target.to_string(),
        }
    }
}

/// The locale settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LocaleConfig {
    /// The path segment that marks an alternate-locale page (without slashes).
    pub prefix: String,
    /// The language of the page source.
    pub default_lang: String,
    /// The language served under the prefix.
    pub alternate_lang: String,
    /// The `og:locale` value of alternate-locale pages.
    pub alternate_og_locale: String,
    /// The dictionary of the alternate language.
    pub dictionary_url: String,
    /// The `aria-label` of the switch control on alternate-locale pages.
    pub switch_to_default_label: String,
    /// The `aria-label` of the switch control on default-locale pages.
    pub switch_to_alternate_label: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            prefix: "fo".into(),
            default_lang: "en".into(),
            alternate_lang: "fo".into(),
            alternate_og_locale: "fo_FO".into(),
            dictionary_url: "/translations/fo.json".into(),
            switch_to_default_label: "Switch to English".into(),
            switch_to_alternate_label: "Broyt til føroyskt".into(),
        }
    }
}

/// The navigation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavConfig {
    /// The component which contains the navigation links.
    pub component: String,
    /// The selector of navigation links.
    pub link_selector: String,
    /// The class added to active navigation links.
    pub active_class: String,
    /// The selector of language switch controls.
    pub switch_selector: String,
    /// The selector of the label inside a language switch control.
    pub switch_label_selector: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            component: "navbar".into(),
            link_selector: ".nav__link, .nav__dropdown-item, .nav__link--mobile".into(),
            active_class: "nav__link--active".into(),
            switch_selector: ".nav__lang-switch".into(),
            switch_label_selector: ".nav__lang-switch-label".into(),
        }
    }
}

/// The shell configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ShellConfig {
    /// The components, injected in parallel.
    pub components: Vec<ComponentSpec>,
    /// The locale settings.
    pub locale: LocaleConfig,
    /// The navigation settings.
    pub nav: NavConfig,
    /// The extension of page files, omitted in clean URLs.
    pub page_extension: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            components: vec![
                ComponentSpec::new("navbar", "/components/navbar.html", "#navbar-placeholder"),
                ComponentSpec::new("footer", "/components/footer.html", "#footer-placeholder"),
                ComponentSpec::new("cta", "/components/cta.html", "#cta-placeholder"),
            ],
            locale: Default::default(),
            nav: Default::default(),
            page_extension: ".html".into(),
        }
    }
}

impl ShellConfig {
    /// Find a component by name.
    pub fn component(&self, name: &str) -> Option<&ComponentSpec> {
        self.components.iter().find(|x| x.name == name)
    }
}
