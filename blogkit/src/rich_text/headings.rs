//! Table-of-contents heading extraction and anchor slugs

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::node::DocumentNode;

static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9\s-]").expect("BUG: invalid NON_SLUG_CHARS regex literal")
});

static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("BUG: invalid WHITESPACE_RUNS regex literal"));

static HYPHEN_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("BUG: invalid HYPHEN_RUNS regex literal"));

/// A heading listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Anchor id (slug of `text`)
    pub id: String,
    /// Display text, trimmed but otherwise unchanged
    pub text: String,
    /// Heading level, 2 or 3
    pub level: u8,
}

/// Extract level-2 and level-3 headings in document order
///
/// Headings whose text is empty after trimming are omitted. Identical heading
/// texts yield identical ids; no deduplication is performed.
pub fn extract_headings(root: &DocumentNode) -> Vec<HeadingEntry> {
    root.walk().filter_map(heading_entry).collect()
}

/// Build the table-of-contents entry for a single node, if it is one
pub fn heading_entry(node: &DocumentNode) -> Option<HeadingEntry> {
    let DocumentNode::Heading { level, children } = node else {
        return None;
    };
    if !matches!(level, 2 | 3) {
        return None;
    }

    let text = heading_text(children);
    if text.is_empty() {
        return None;
    }

    Some(HeadingEntry {
        id: slugify(&text),
        text,
        level: *level,
    })
}

/// Concatenate the text of a heading's direct text children, trimmed
///
/// Text nested inside inline containers (such as hyperlinks) does not take
/// part, so the anchor id only depends on the heading's own runs.
pub fn heading_text(children: &[DocumentNode]) -> String {
    children
        .iter()
        .filter_map(DocumentNode::text_value)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Turn heading text into an anchor slug
///
/// Lowercases, drops everything outside `[a-z0-9\s-]`, turns whitespace runs
/// into single hyphens, collapses hyphen runs and trims hyphens at both ends.
/// The result may be empty.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUNS.replace_all(&kept, "-");
    let collapsed = HYPHEN_RUNS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}
