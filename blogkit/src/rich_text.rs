//! Rich text documents from the CMS
//!
//! A rich text field is a tree of typed nodes (paragraphs, headings, lists,
//! embedded assets, hyperlinks, text). This module converts the CMS JSON into a
//! closed [`DocumentNode`] tree and derives everything pages need from it:
//! table-of-contents headings, word count and reading time, and HTML markup.
//!
//! All operations are pure and never fail on unexpected tree shapes.

// Submodules
mod assets;
mod error;
mod headings;
mod html;
mod node;
mod stats;
mod walker;

// Re-export public types
pub use assets::{AssetIndex, AssetLinks, LinkedAsset, ResolvedAsset, RichText, RichTextLinks};
pub use error::RichTextError;
pub use headings::{extract_headings, heading_entry, heading_text, slugify, HeadingEntry};
pub use html::{escape_html, render_html, render_toc_html, RenderOptions, DEFAULT_MAX_RENDER_DEPTH};
pub use node::{AssetRef, DocumentNode, Mark, MAX_NODE_DEPTH};
pub use stats::{count_words, estimate_reading_minutes, reading_time_label, DEFAULT_WORDS_PER_MINUTE};
pub use walker::{plain_text, Walk};

/// Everything a page needs from a rich text body
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Table-of-contents entries
    pub headings: Vec<HeadingEntry>,
    /// Number of words in all text leaves
    pub word_count: u64,
    /// Estimated reading time in minutes
    pub reading_minutes: u64,
}

impl DocumentSummary {
    /// Summarize a document tree
    pub fn of(root: &DocumentNode, words_per_minute: u64) -> Self {
        let word_count = count_words(root);
        Self {
            headings: extract_headings(root),
            word_count,
            reading_minutes: estimate_reading_minutes(word_count, words_per_minute),
        }
    }
}
