//! Word count and reading time estimation

use super::node::DocumentNode;

/// Default reading speed used for estimates
pub const DEFAULT_WORDS_PER_MINUTE: u64 = 200;

/// Count whitespace-separated words over all text leaves
///
/// Equivalent to joining every leaf with a single space and splitting on
/// whitespace runs. Asset titles and descriptions are not text leaves and do
/// not count.
pub fn count_words(root: &DocumentNode) -> u64 {
    root.text_leaves()
        .map(|text| text.split_whitespace().count() as u64)
        .sum()
}

/// Estimated reading time in whole minutes, never less than 1
///
/// A `words_per_minute` of 0 is treated as 1.
pub fn estimate_reading_minutes(word_count: u64, words_per_minute: u64) -> u64 {
    word_count.div_ceil(words_per_minute.max(1)).max(1)
}

/// Human-readable reading time for the given site language
pub fn reading_time_label(minutes: u64, language: &str) -> String {
    if language.starts_with("id") {
        format!("{} menit baca", minutes)
    } else {
        format!("{} min read", minutes)
    }
}
