//! Integration tests for link relativization and index generation.

use unwiki::model::{parse_page_list, PageSpec};
use unwiki::{generate_index, LinkRewriter};

#[test]
fn test_same_site_link_becomes_relative() {
    let rewriter = LinkRewriter::new("site.example", "acme/widget");
    assert_eq!(
        rewriter.relativize("[x](https://site.example/acme/widget/2.1-intro)"),
        "[x](./2.1-intro.md)"
    );
}

#[test]
fn test_other_site_unchanged() {
    let rewriter = LinkRewriter::new("site.example", "acme/widget");
    let md = "[x](https://other.example/acme/widget/2.1-intro)";
    assert_eq!(rewriter.relativize(md), md);
}

#[test]
fn test_relativize_noop_and_idempotent() {
    let rewriter = LinkRewriter::new("deepwiki.com", "rive-app/rive-runtime");

    let plain = "# Title\n\nNo links, just [a](https://github.com/rive-app).\n";
    assert_eq!(rewriter.relativize(plain), plain);

    let md = "- [Overview](https://deepwiki.com/rive-app/rive-runtime/1-overview)\n\
              - [Math](https://deepwiki.com/rive-app/rive-runtime/5.2-math#vectors)\n";
    let once = rewriter.relativize(md);
    assert_eq!(
        once,
        "- [Overview](./1-overview.md)\n- [Math](./5.2-math.md#vectors)\n"
    );
    assert_eq!(rewriter.relativize(&once), once);
}

#[test]
fn test_depth() {
    assert_eq!(PageSpec::new("2.3-foo", "Foo").depth(), 1);
    assert_eq!(PageSpec::new("2-foo", "Foo").depth(), 0);
    assert_eq!(PageSpec::new("10.4-bar", "Bar").depth(), 1);
    assert_eq!(PageSpec::new("1.2.3-deep", "Deep").depth(), 2);
}

#[test]
fn test_index_from_page_list() {
    let pages = parse_page_list(
        r#"[
            {"id": "1-overview", "title": "Overview"},
            {"id": "1.1-building", "title": "Building"},
            {"id": "2-runtime", "title": "Runtime"},
            {"id": "2.3.1-state-machines", "title": "State Machines"}
        ]"#,
    )
    .unwrap();

    let index = generate_index("rive-app/rive-runtime", &pages);
    let entries: Vec<&str> = index
        .lines()
        .skip_while(|l| *l != "## Table of Contents")
        .skip(2)
        .collect();

    assert!(index.starts_with("# rive-app/rive-runtime - DeepWiki Documentation\n\n"));
    assert_eq!(
        entries,
        vec![
            "- [Overview](./1-overview.md)",
            "  - [Building](./1.1-building.md)",
            "- [Runtime](./2-runtime.md)",
            "  - [State Machines](./2.3.1-state-machines.md)",
        ]
    );
}
