use pageshell_tools::css::{minify, minify_file, MinifyReport};

#[test]
fn minify_stylesheet() {
    let src = r#"/* Usable landing page */
:root {
    --brand : #2f6fed ;
}

.nav__link ,
.nav__link--mobile {
    color : var(--brand);
    margin: 0 auto;
}
/* trailing */
"#;
    assert_eq!(
        minify(src),
        ":root{--brand:#2f6fed}.nav__link,.nav__link--mobile{color:var(--brand);margin:0 auto}"
    );
}

#[test]
fn minify_edge_cases() {
    assert_eq!(minify(""), "");
    assert_eq!(minify("  \n\t "), "");
    assert_eq!(minify("a { b : c ; ; }"), "a{b:c;}");
    assert_eq!(minify("a{b:c}/* open"), "a{b:c}/* open");
    assert_eq!(minify("a/**/b{}"), "ab{}");
    assert_eq!(
        minify("@media (max-width: 600px) { .x { display : none } }"),
        "@media (max-width:600px){.x{display:none}}"
    );
}

#[test]
fn report_savings() {
    let report = MinifyReport {
        original: 2048,
        minified: 1536,
    };
    assert_eq!(report.savings(), 512);
    assert_eq!(report.savings_percent(), 25.);
    assert_eq!(
        report.to_string(),
        "2.00 KB -> 1.50 KB (saved 0.50 KB, 25.0%)"
    );
    let empty = MinifyReport {
        original: 0,
        minified: 0,
    };
    assert_eq!(empty.savings_percent(), 0.);
}

#[test]
fn minify_into_file() {
    let dir = std::env::temp_dir().join("pageshell-tools").join("test-css");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("main.css");
    let output = dir.join("out").join("main.min.css");
    std::fs::write(&input, "body {\n  margin : 0;\n}\n").unwrap();
    let report = minify_file(&input, &output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "body{margin:0}");
    assert_eq!(report.minified, 14);
    assert!(minify_file(&dir.join("missing.css"), &output).is_err());
}
