//! Positional recovery of diagram sources from raw page markup.

use super::unescape::unescape_source;
use super::RecoveryOptions;

const FENCE: &str = "```";

/// Recover up to `expected` diagram sources from the raw markup of a page.
///
/// `anchors` are the page's heading texts in document order. The first anchor
/// occurrence with a diagram fence within `lookahead` bytes marks the start of
/// the page's content in the payload; the window ends `tail_margin` bytes past
/// the last anchor. Without a matching anchor the whole input is scanned.
///
/// Matching is positional: the k-th source belongs to the k-th diagram on the
/// page. Sources of neighbouring pages can still leak in when they fall inside
/// the window.
pub fn recover_diagrams(
    raw: &str,
    anchors: &[String],
    expected: usize,
    options: &RecoveryOptions,
) -> Vec<String> {
    if expected == 0 || raw.is_empty() {
        return Vec::new();
    }

    let window = content_window(raw, anchors, options);
    log::debug!(
        "scanning {} of {} bytes for {} diagram(s)",
        window.len(),
        raw.len(),
        expected
    );

    extract_fenced(window, &options.fence_marker, expected)
}

/// Narrow the raw markup to the region belonging to the current page.
fn content_window<'a>(raw: &'a str, anchors: &[String], options: &RecoveryOptions) -> &'a str {
    let Some(start) = find_start(raw, anchors, options) else {
        return raw;
    };

    let end = anchors
        .iter()
        .rev()
        .find(|a| !a.trim().is_empty())
        .and_then(|last| {
            raw[start..]
                .find(last.as_str())
                .map(|offset| start + offset + last.len() + options.tail_margin)
        })
        .map(|end| floor_char_boundary(raw, end))
        .unwrap_or(raw.len());

    &raw[start..end]
}

fn find_start(raw: &str, anchors: &[String], options: &RecoveryOptions) -> Option<usize> {
    for anchor in anchors.iter().filter(|a| !a.trim().is_empty()) {
        for (pos, _) in raw.match_indices(anchor.as_str()) {
            let end = floor_char_boundary(raw, pos + anchor.len() + options.lookahead);
            if raw[pos..end].contains(options.fence_marker.as_str()) {
                return Some(pos);
            }
        }
    }
    None
}

/// Fenced blocks opened by `marker` and closed by the next plain fence.
fn extract_fenced(window: &str, marker: &str, limit: usize) -> Vec<String> {
    let mut sources = Vec::new();
    let mut rest = window;

    while sources.len() < limit {
        let Some(open) = rest.find(marker) else {
            break;
        };
        let body = &rest[open + marker.len()..];
        let Some(close) = body.find(FENCE) else {
            break;
        };
        sources.push(unescape_source(&body[..close]));
        rest = &body[close + FENCE.len()..];
    }

    sources
}

/// Clamp a byte offset to the input length and back to a char boundary.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
