use pageshell::{
    config::ShellConfig,
    path::{has_scheme, normalize_path, Locale, PagePath},
};

fn page(path: &str) -> PagePath {
    PagePath::resolve(path, &ShellConfig::default())
}

#[test]
fn depth_and_locale() {
    let p = page("/");
    assert_eq!((p.depth(), p.locale()), (0, Locale::Default));
    let p = page("/blog/post");
    assert_eq!((p.depth(), p.locale()), (1, Locale::Default));
    let p = page("/fo/blog/post");
    assert_eq!((p.depth(), p.locale()), (1, Locale::Alternate));
    let p = page("/fo");
    assert_eq!((p.depth(), p.locale()), (0, Locale::Alternate));
    let p = page("/fo/");
    assert_eq!((p.depth(), p.locale()), (0, Locale::Alternate));
    assert_eq!(page("/blog/").depth(), 1);
    assert_eq!(page("/contact").depth(), 0);
    assert_eq!(page("/blog/post.html").depth(), 1);
    assert_eq!(page("/index.html").depth(), 0);
    assert_eq!(page("").depth(), 0);
}

#[test]
fn locale_prefix_is_a_whole_segment() {
    let p = page("/forum/thread");
    assert_eq!(p.locale(), Locale::Default);
    assert_eq!(p.depth(), 1);
    assert_eq!(page("/fo.html").locale(), Locale::Default);
}

#[test]
fn page_keys() {
    assert_eq!(page("/").page_key(), "home");
    assert_eq!(page("/fo").page_key(), "home");
    assert_eq!(page("/fo/").page_key(), "home");
    assert_eq!(page("/fo/index.html").page_key(), "home");
    assert_eq!(page("/fo/pricing.html").page_key(), "pricing");
    assert_eq!(page("/fo/blog/post/").page_key(), "blog/post");
    assert_eq!(page("/about?ref=x").page_key(), "about");
}

#[test]
fn normalization() {
    assert_eq!(normalize_path("/fo/blog.html", "fo", ".html"), "blog");
    assert_eq!(normalize_path("/blog/index.html#x", "fo", ".html"), "blog");
    assert_eq!(normalize_path("blog/", "fo", ".html"), "blog");
    assert_eq!(normalize_path("/", "fo", ".html"), "");
}

#[test]
fn active_links() {
    let p = page("/blog/post");
    assert!(p.is_link_active("/blog"));
    assert!(p.is_link_active("/blog/post.html"));
    assert!(!p.is_link_active("/pricing"));
    assert!(!p.is_link_active("/"));
    assert!(!p.is_link_active("/blo"));
    let home = page("/fo/");
    assert!(home.is_link_active("/"));
    assert!(home.is_link_active("/index.html"));
    assert!(!home.is_link_active("#features"));
    assert!(!home.is_link_active("https://example.com"));
    assert!(!home.is_link_active("//example.com"));
}

#[test]
fn switch_locale() {
    assert_eq!(page("/").switch_locale_path(), "/fo/");
    assert_eq!(page("/pricing").switch_locale_path(), "/fo/pricing");
    assert_eq!(page("/fo").switch_locale_path(), "/");
    assert_eq!(page("/fo/").switch_locale_path(), "/");
    assert_eq!(page("/fo/blog/post").switch_locale_path(), "/blog/post");
}

#[test]
fn localize_hrefs() {
    let p = page("/fo/");
    assert_eq!(p.localize_href("/pricing").as_deref(), Some("/fo/pricing"));
    assert_eq!(p.localize_href("/forum").as_deref(), Some("/fo/forum"));
    assert_eq!(p.localize_href("/").as_deref(), Some("/fo/"));
    assert_eq!(p.localize_href("/fo/pricing"), None);
    assert_eq!(p.localize_href("/fo"), None);
    assert_eq!(p.localize_href("/fo?x=1"), None);
    assert_eq!(p.localize_href("//cdn.example.com/a.js"), None);
    assert_eq!(p.localize_href("https://example.com"), None);
    assert_eq!(p.localize_href("#top"), None);
    assert_eq!(p.localize_href("blog/post"), None);
}

#[test]
fn schemes() {
    assert!(has_scheme("https://x/y.png"));
    assert!(has_scheme("mailto:hi@usable.dev"));
    assert!(has_scheme("data:image/png;base64,AAAA"));
    assert!(!has_scheme("assets/a:b.png"));
    assert!(!has_scheme("1a:b"));
    assert!(!has_scheme("/x:y"));
    assert!(!has_scheme("?a=b:c"));
}
