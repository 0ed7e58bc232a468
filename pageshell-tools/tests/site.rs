use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use pageshell::config::ShellConfig;
use pageshell_tools::{
    check::{check_html, check_site, find_pages, Problem},
    config::SiteConfig,
    prerender::{page_file, prerender, prerender_to_file},
};
use serial_test::serial;

const INDEX: &str = r#"<!DOCTYPE html><html lang="en"><head><title>Usable</title><meta name="description" content="Usable helps teams"></head><body><div id="navbar-placeholder"></div><h1 data-i18n="home.hero.title">Ship faster</h1><p data-i18n="home.hero.missing">Missing</p><p data-i18n="home.hero.missing">Missing again</p><ul data-i18n-list="home.hero.title"><li>One</li></ul><span data-i18n="home.features">Features</span><div id="footer-placeholder"></div></body></html>"#;

const POST: &str = r#"<!DOCTYPE html><html lang="en"><head><title>Post</title></head><body><div id="navbar-placeholder"></div><article data-i18n-html="blog/post.body">Body</article></body></html>"#;

const NAVBAR: &str = r#"<nav><a class="nav__link" href="/">Home</a><a class="nav__link" href="/blog">Blog</a><img src="assets/logo.svg"><button class="nav__lang-switch"><span class="nav__lang-switch-label">?</span></button></nav>"#;

const FOOTER: &str = r#"<footer><a href="/privacy" data-i18n="footer.privacy">Privacy</a></footer>"#;

const DICTIONARY: &str = r#"{
    "home.title": "Usable - Heim",
    "home.hero.title": "Skjótari",
    "home.features": ["Eitt", "Tvey"],
    "blog/post.body": "<p>Grein</p>",
    "blog/post.title": "Grein",
    "footer.privacy": "Privatlív"
}"#;

fn write_files(root: &Path, files: &[(&str, &str)]) {
    let _ = std::fs::remove_dir_all(root);
    for (path, content) in files {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
}

static SITE: Lazy<PathBuf> = Lazy::new(|| {
    let root = std::env::temp_dir().join("pageshell-tools").join("test-site");
    write_files(
        &root,
        &[
            ("index.html", INDEX),
            ("blog/post.html", POST),
            ("components/navbar.html", NAVBAR),
            ("components/footer.html", FOOTER),
            ("translations/fo.json", DICTIONARY),
            ("node_modules/pkg/readme.html", "<p data-i18n=\"x\">x</p>"),
        ],
    );
    root
});

fn site_config() -> SiteConfig {
    SiteConfig::load(Some(SITE.as_path())).unwrap()
}

#[test]
#[serial]
fn find_site_pages() {
    let config = site_config();
    let pages: Vec<_> = find_pages(&config)
        .unwrap()
        .into_iter()
        .map(|x| x.strip_prefix(&*SITE).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        pages,
        [
            PathBuf::from("blog/post.html"),
            PathBuf::from("components/footer.html"),
            PathBuf::from("components/navbar.html"),
            PathBuf::from("index.html"),
        ]
    );
}

#[test]
fn check_markers() {
    let dict = pageshell::dictionary::Dictionary::from_json(DICTIONARY).unwrap();
    let findings = check_html(Path::new("index.html"), INDEX, &dict);
    let summary: Vec<_> = findings
        .iter()
        .map(|x| (x.marker.as_str(), x.key.as_str(), x.problem))
        .collect();
    assert_eq!(
        summary,
        [
            ("data-i18n", "home.hero.missing", Problem::MissingKey),
            ("data-i18n", "home.features", Problem::ExpectedText),
            ("data-i18n-list", "home.hero.title", Problem::ExpectedList),
        ]
    );
    assert_eq!(
        findings[0].to_string(),
        r#"index.html: data-i18n="home.hero.missing": missing key"#
    );
}

#[test]
#[serial]
fn check_whole_site() {
    let findings = check_site(&site_config()).unwrap();
    assert_eq!(findings.len(), 3);
    assert!(findings.iter().all(|x| x.file.ends_with("index.html")));
}

#[test]
fn page_files() {
    let config = ShellConfig::default();
    let root = Path::new("/site");
    assert_eq!(page_file(root, "/", &config), root.join("index.html"));
    assert_eq!(page_file(root, "/fo", &config), root.join("index.html"));
    assert_eq!(page_file(root, "/fo/", &config), root.join("index.html"));
    assert_eq!(page_file(root, "/blog/", &config), root.join("blog/index.html"));
    assert_eq!(page_file(root, "/fo/pricing", &config), root.join("pricing.html"));
    assert_eq!(page_file(root, "/pricing.html?x=1", &config), root.join("pricing.html"));
    assert_eq!(page_file(root, "/blog/post", &config), root.join("blog/post.html"));
}

#[test]
#[serial]
fn prerender_alternate_page() {
    let html = prerender(&site_config(), "/fo/").unwrap();
    assert!(html.contains(r#"<html lang="fo">"#));
    assert!(html.contains("<title>Usable - Heim</title>"));
    assert!(html.contains(r#"<h1 data-i18n="home.hero.title">Skjótari</h1>"#));
    assert!(html.contains(r#"<a class="nav__link nav__link--active" href="/fo/">Home</a>"#));
    assert!(html.contains(r#"<a href="/fo/privacy" data-i18n="footer.privacy">Privatlív</a>"#));
    assert!(html.contains(r#"<span class="nav__lang-switch-label">EN</span>"#));
    assert!(!html.contains("data-i18n-loading"));
}

#[test]
#[serial]
fn prerender_nested_page() {
    let config = site_config();
    let output = std::env::temp_dir()
        .join("pageshell-tools")
        .join("test-prerender")
        .join("post.html");
    prerender_to_file(&config, "/blog/post", &output).unwrap();
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains(r#"<img src="../assets/logo.svg">"#));
    assert!(html.contains(r#"<a class="nav__link nav__link--active" href="/blog">Blog</a>"#));
    assert!(html.contains(r#"<article data-i18n-html="blog/post.body">Body</article>"#));
    assert!(html.contains(r#"<span class="nav__lang-switch-label">FO</span>"#));
    let html = prerender(&config, "/fo/blog/post").unwrap();
    assert!(html.contains(r#"<article data-i18n-html="blog/post.body"><p>Grein</p></article>"#));
    assert!(html.contains("<title>Grein</title>"));
    assert!(prerender(&config, "/missing").is_err());
}

#[test]
#[serial]
fn load_config_layers() {
    let root = std::env::temp_dir().join("pageshell-tools").join("test-config");
    write_files(
        &root,
        &[(
            "pageshell.toml",
            r#"
                [site]
                exclude = ["drafts"]

                [build]
                css-input = "css/site.css"
                css-output = "dist/site.min.css"

                [shell]
                page-extension = ".htm"

                [shell.locale]
                prefix = "da"
                dictionary-url = "/i18n/da.json"
            "#,
        )],
    );
    let config = SiteConfig::load(Some(root.as_path())).unwrap();
    assert_eq!(config.exclude, ["drafts"]);
    assert_eq!(config.css_input, root.join("css/site.css"));
    assert_eq!(config.css_output, root.join("dist/site.min.css"));
    assert_eq!(config.shell.page_extension, ".htm");
    assert_eq!(config.shell.locale.prefix, "da");
    assert_eq!(config.shell.locale.alternate_og_locale, "fo_FO");
    assert_eq!(config.shell.components.len(), 3);
    assert_eq!(config.dictionary_path(), root.join("i18n/da.json"));

    std::env::set_var("PAGESHELL_CSS_INPUT", "other.css");
    std::env::set_var("PAGESHELL_SITE_ROOT", &root);
    let config = SiteConfig::load(None);
    std::env::remove_var("PAGESHELL_CSS_INPUT");
    std::env::remove_var("PAGESHELL_SITE_ROOT");
    let config = config.unwrap();
    assert_eq!(config.root, root);
    assert_eq!(config.css_input, root.join("other.css"));
    assert_eq!(config.css_output, root.join("dist/site.min.css"));
}

#[test]
#[serial]
fn load_default_and_broken_config() {
    let root = std::env::temp_dir().join("pageshell-tools").join("test-config-default");
    write_files(&root, &[("index.html", "")]);
    let config = SiteConfig::load(Some(root.as_path())).unwrap();
    assert_eq!(config.css_input, root.join("styles/main.css"));
    assert_eq!(config.css_output, root.join("styles/main.min.css"));
    assert_eq!(config.exclude, ["node_modules", ".git"]);
    assert_eq!(config.shell, ShellConfig::default());

    let root = std::env::temp_dir().join("pageshell-tools").join("test-config-broken");
    write_files(&root, &[("pageshell.toml", "[build\ncss-input = 1")]);
    assert!(SiteConfig::load(Some(root.as_path())).is_err());
}
