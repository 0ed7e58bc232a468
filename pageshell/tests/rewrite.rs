use pageshell::rewrite::{is_relative_reference, rewrite_asset_paths};

#[test]
fn identity_at_root() {
    for html in [
        "",
        r#"<img src="assets/img.png">"#,
        r#"<a href='blog/'>x</a><video poster="p.jpg"></video>"#,
        "not html at all < > \"",
    ] {
        assert_eq!(rewrite_asset_paths(html, 0), html);
    }
}

#[test]
fn relative_references_at_depth() {
    assert_eq!(
        rewrite_asset_paths(r#"<img src="assets/img.png">"#, 2),
        r#"<img src="../../assets/img.png">"#
    );
    assert_eq!(
        rewrite_asset_paths(r#"<img src="https://x/y.png">"#, 2),
        r#"<img src="https://x/y.png">"#
    );
    assert_eq!(
        rewrite_asset_paths(r##"<a href="#a">A</a>"##, 2),
        r##"<a href="#a">A</a>"##
    );
    assert_eq!(
        rewrite_asset_paths(r#"<a class="x" HREF = 'pricing.html'>P</a>"#, 1),
        r#"<a class="x" HREF = '../pricing.html'>P</a>"#
    );
}

#[test]
fn untouched_references() {
    let html = r#"<a href="/pricing">P</a><script src="//cdn.example.com/a.js"></script><a href="mailto:hi@usable.dev">M</a><a href="?page=2">N</a><img data-src="assets/lazy.png"><img src="">"#;
    assert_eq!(rewrite_asset_paths(html, 3), html);
}

#[test]
fn poster_and_srcset() {
    assert_eq!(
        rewrite_asset_paths(
            r#"<video poster="assets/p.jpg"></video><img srcset="assets/a.png 1x, https://x/b.png 2x,assets/c.png 3x">"#,
            1
        ),
        r#"<video poster="../assets/p.jpg"></video><img srcset="../assets/a.png 1x, https://x/b.png 2x,../assets/c.png 3x">"#
    );
}

#[test]
fn srcset_with_data_uri() {
    assert_eq!(
        rewrite_asset_paths(
            r#"<img srcset="data:image/png;base64,AAAA 1x, assets/b.png 2x">"#,
            1
        ),
        r#"<img srcset="data:image/png;base64,AAAA 1x, ../assets/b.png 2x">"#
    );
    assert_eq!(
        rewrite_asset_paths(r#"<img srcset="a.png, b.png 2x">"#, 1),
        r#"<img srcset="../a.png, ../b.png 2x">"#
    );
}

#[test]
fn text_content_is_kept() {
    assert_eq!(
        rewrite_asset_paths(
            r#"<p> src="logo.png" is text</p><img alt='a > b' src="logo.png"><!-- <img src="c.png"> -->"#,
            1
        ),
        r#"<p> src="logo.png" is text</p><img alt='a > b' src="../logo.png"><!-- <img src="c.png"> -->"#
    );
}

#[test]
fn unquoted_values_are_kept() {
    let html = r#"<img src=assets/x.png><p>src=assets/x.png</p>"#;
    assert_eq!(rewrite_asset_paths(html, 1), html);
}

#[test]
fn relative_reference_detection() {
    assert!(is_relative_reference("assets/a.png"));
    assert!(is_relative_reference("./a.png"));
    assert!(is_relative_reference("../a.png"));
    assert!(!is_relative_reference(""));
    assert!(!is_relative_reference("/a.png"));
    assert!(!is_relative_reference("//a.png"));
    assert!(!is_relative_reference("#a"));
    assert!(!is_relative_reference("?a"));
    assert!(!is_relative_reference("https://a.png"));
}
