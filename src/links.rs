//! Rewriting of same-site links to relative file references.

use regex::{Captures, Regex};

/// Rewrites absolute links into the exported source as relative `.md` links.
#[derive(Debug, Clone)]
pub struct LinkRewriter {
    pattern: Regex,
}

impl LinkRewriter {
    /// Create a rewriter for links under `https://<site>/<source>/`.
    ///
    /// Root-relative links (`/<source>/<id>`) are treated as same-site.
    pub fn new(site: &str, source: &str) -> Self {
        let pattern = format!(
            r"\]\((?:https?://{})?/{}/([^/()\s#?]+)((?:[/#?][^()\s]*)?)\)",
            regex::escape(site.trim_end_matches('/')),
            regex::escape(source.trim_matches('/')),
        );
        Self {
            // Both interpolated parts are escaped, so the pattern is always valid.
            pattern: Regex::new(&pattern).expect("valid link regex"),
        }
    }

    /// Rewrite `](https://<site>/<source>/<id><rest>)` to `](./<id>.md<rest>)`.
    ///
    /// The remainder after the page id is kept verbatim, except that a bare
    /// trailing slash is dropped. Other links are left untouched; already
    /// relative links do not match.
    pub fn relativize(&self, markdown: &str) -> String {
        self.pattern
            .replace_all(markdown, |caps: &Captures| {
                let rest = &caps[2];
                let rest = match rest.strip_prefix('/') {
                    Some(after) if after.is_empty() || after.starts_with(['#', '?']) => after,
                    _ => rest,
                };
                format!("](./{}.md{})", &caps[1], rest)
            })
            .into_owned()
    }
}
