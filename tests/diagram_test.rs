//! Integration tests for diagram source recovery.

use unwiki::diagram::{
    fill_placeholders, recover_diagrams, resolve_placeholders, strip_placeholders,
    RecoveryOptions,
};
use unwiki::render::DEFAULT_PLACEHOLDER;

/// Raw markup the way a server-rendered page embeds its payload: escaped
/// Markdown inside a script string, preceded by navigation boilerplate.
fn payload() -> String {
    let sidebar = "Overview Architecture Rendering ".repeat(20);
    let page = concat!(
        r###"self.__next_f.push([1,"# Architecture\n\nThe runtime has two layers.\n\n"###,
        r###"```mermaid\ngraph TD\n    A[\"Artboard\"] --> B[\"Renderer\"]\n```\n\n"###,
        r###"## Rendering\n\nFrames are drawn on demand.\n\n"###,
        r###"```mermaid\nsequenceDiagram\n    App->>Runtime: advance(dt)\n```\n"])"###,
    );
    format!("<html><body>{sidebar}<script>{page}</script></body></html>")
}

fn anchors() -> Vec<String> {
    vec!["Architecture".to_string(), "Rendering".to_string()]
}

#[test]
fn test_recovers_sources_in_order() {
    let sources = recover_diagrams(&payload(), &anchors(), 2, &RecoveryOptions::default());

    assert_eq!(
        sources,
        vec![
            "graph TD\n    A[\"Artboard\"] --> B[\"Renderer\"]".to_string(),
            "sequenceDiagram\n    App->>Runtime: advance(dt)".to_string(),
        ]
    );
}

#[test]
fn test_never_more_than_expected() {
    for expected in 0..4 {
        let sources =
            recover_diagrams(&payload(), &anchors(), expected, &RecoveryOptions::default());
        assert!(sources.len() <= expected);
    }
}

#[test]
fn test_sidebar_mentions_do_not_anchor() {
    // A tight lookahead means only the heading inside the payload qualifies.
    let options = RecoveryOptions::default().with_lookahead(60);
    let sources = recover_diagrams(&payload(), &anchors(), 1, &options);
    assert_eq!(sources.len(), 1);
    assert!(sources[0].starts_with("graph TD"));
}

#[test]
fn test_double_escaped_payload() {
    let raw = r###"{\"md\":\"## Flow\\n```mermaid\\nflowchart LR\\n  X --\\u003e Y\\n```\"}"###;
    let anchors = vec!["Flow".to_string()];
    let sources = recover_diagrams(raw, &anchors, 1, &RecoveryOptions::default());
    assert_eq!(sources, vec!["flowchart LR\n  X --> Y".to_string()]);
}

#[test]
fn test_no_fence_in_raw_markup() {
    let sources = recover_diagrams(
        "<html><body>no diagrams here</body></html>",
        &anchors(),
        3,
        &RecoveryOptions::default(),
    );
    assert!(sources.is_empty());
}

#[test]
fn test_fill_then_strip() {
    let md = format!("# A\n\n{0}\n\ntext\n\n{0}\n\n", DEFAULT_PLACEHOLDER);
    let sources = vec!["graph TD".to_string()];

    let filled = fill_placeholders(&md, DEFAULT_PLACEHOLDER, &sources);
    assert!(filled.contains("```mermaid\ngraph TD\n```\n\n"));
    assert_eq!(filled.matches(DEFAULT_PLACEHOLDER).count(), 1);

    let stripped = strip_placeholders(&filled, DEFAULT_PLACEHOLDER);
    assert!(!stripped.contains(DEFAULT_PLACEHOLDER));
    assert_eq!(strip_placeholders(&stripped, DEFAULT_PLACEHOLDER), stripped);
    assert_eq!(resolve_placeholders(&md, DEFAULT_PLACEHOLDER, &sources), stripped);
}
