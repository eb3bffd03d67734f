//! Unescaping of diagram sources embedded in serialized payloads.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Escapes with any number of leading backslashes, so both single and
/// double escaping collapse to the literal character.
static ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\\+(n|t|"|u000[aA]|u0009|u0022|u003[cCeE]|u0026|u0027)"#)
        .expect("valid escape regex")
});

/// Unescape a diagram source and trim surrounding whitespace.
pub fn unescape_source(raw: &str) -> String {
    let unescaped = ESCAPE.replace_all(raw, |caps: &Captures| {
        match &caps[1] {
            "n" | "u000a" | "u000A" => "\n",
            "t" | "u0009" => "\t",
            "\"" | "u0022" => "\"",
            "u003c" | "u003C" => "<",
            "u003e" | "u003E" => ">",
            "u0026" => "&",
            "u0027" => "'",
            _ => "",
        }
        .to_string()
    });
    unescaped.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_escapes() {
        assert_eq!(unescape_source(r#"\ngraph TD\n\tA-->B\n"#), "graph TD\n\tA-->B");
        assert_eq!(unescape_source(r#"A[\"label\"]"#), "A[\"label\"]");
    }

    #[test]
    fn test_double_escapes() {
        assert_eq!(unescape_source(r#"graph LR\\nA-->B"#), "graph LR\nA-->B");
        assert_eq!(unescape_source(r#"A\\\"x\\\""#), "A\"x\"");
    }

    #[test]
    fn test_codepoint_escapes() {
        assert_eq!(
            unescape_source(r"A\u003cB\u003E \\u0026 it\u0027s"),
            "A<B> & it's"
        );
    }

    #[test]
    fn test_codepoint_control_and_quote_escapes() {
        assert_eq!(
            unescape_source(r"A\u0022q\u0022\u000aB\u003c\u0009C\\u000A"),
            "A\"q\"\nB<\tC"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(unescape_source("  sequenceDiagram  "), "sequenceDiagram");
        assert_eq!(unescape_source("A -- B"), "A -- B");
    }
}
