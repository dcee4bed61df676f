//! Article records and listing rules

use serde::Deserialize;
use std::cmp::Ordering;

use crate::rich_text::{count_words, estimate_reading_minutes, RichText};

pub use crate::cms::Sys;

/// Default number of related articles shown under a post
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// An article entry as delivered by the CMS
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    /// System metadata (id, creation time)
    pub sys: Sys,
    /// Author display name
    pub author: String,
    /// Headline
    pub title: String,
    /// URL slug; articles without one are never listed
    pub slug: String,
    /// Short summary for listings and meta descriptions
    pub excerpt: String,
    /// Rich text body
    pub details: RichText,
    /// Publication date (ISO 8601)
    pub date: String,
    /// Cover image
    pub image: Option<Image>,
    /// Highlighted on the home page
    pub featured: bool,
    /// Listing category (e.g., "teknologi")
    pub category: Option<String>,
}

/// An image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Image {
    /// Absolute image URL
    pub url: String,
}

impl Article {
    /// Cover image URL, if the article has a non-empty one
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_ref()
            .map(|i| i.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Last modification date used by structured data
    pub fn date_modified(&self) -> &str {
        self.sys.created_at.as_deref().unwrap_or(&self.date)
    }

    /// Number of words in the article body
    pub fn word_count(&self) -> u64 {
        count_words(&self.details.json)
    }

    /// Estimated reading time of the article body
    pub fn reading_minutes(&self, words_per_minute: u64) -> u64 {
        estimate_reading_minutes(self.word_count(), words_per_minute)
    }

    /// Whether the article has a usable slug
    pub fn is_listed(&self) -> bool {
        !self.slug.trim().is_empty()
    }
}

/// Listing order: newest first, ties broken by id descending
pub fn listing_order(a: &Article, b: &Article) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.sys.id.cmp(&a.sys.id))
}

/// Criteria for selecting articles in a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Only articles in this category
    pub category: Option<String>,
    /// Only featured articles
    pub featured_only: bool,
    /// Only articles by this author
    pub author: Option<String>,
    /// Case-insensitive substring of title or excerpt
    pub search: Option<String>,
    /// Exclude the article with this slug
    pub exclude_slug: Option<String>,
}

impl ArticleFilter {
    /// Filter matching every listed article
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a single category
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Check whether an article passes this filter
    pub fn matches(&self, article: &Article) -> bool {
        if !article.is_listed() {
            return false;
        }
        if self.featured_only && !article.featured {
            return false;
        }
        if let Some(ref category) = self.category {
            if article.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(ref author) = self.author {
            if &article.author != author {
                return false;
            }
        }
        if let Some(ref slug) = self.exclude_slug {
            if &article.slug == slug {
                return false;
            }
        }
        if let Some(ref term) = self.search {
            let term = term.to_lowercase();
            if !article.title.to_lowercase().contains(&term)
                && !article.excerpt.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

/// Pick articles to recommend under the current one
///
/// Articles from the same category come first, then the rest, each group in
/// the order given. The current article is never included.
pub fn related_articles<'a>(
    articles: &'a [Article],
    current_slug: &str,
    current_category: Option<&str>,
    limit: usize,
) -> Vec<&'a Article> {
    let (same, other): (Vec<&Article>, Vec<&Article>) = articles
        .iter()
        .filter(|a| a.slug != current_slug)
        .partition(|a| a.category.as_deref() == current_category);

    same.into_iter().chain(other).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_text::DocumentNode;

    fn article(slug: &str, date: &str, category: Option<&str>) -> Article {
        Article {
            sys: Sys {
                id: format!("id-{}", slug),
                created_at: None,
            },
            title: format!("Title {}", slug),
            slug: slug.to_string(),
            date: date.to_string(),
            category: category.map(str::to_string),
            ..Article::default()
        }
    }

    #[test]
    fn test_deserialize_cms_article() {
        let json = r#"{
            "sys": { "id": "abc", "createdAt": "2025-08-20T10:00:00Z" },
            "author": "Redaksi",
            "title": "Etika Komunikasi Digital",
            "slug": "etika-komunikasi-digital",
            "excerpt": "Ringkasan",
            "details": {
                "json": {
                    "nodeType": "document",
                    "content": [
                        { "nodeType": "paragraph", "content": [ { "nodeType": "text", "value": "satu dua tiga" } ] }
                    ]
                }
            },
            "date": "2025-08-19",
            "image": { "url": "https://images.example.com/cover.jpg" },
            "featured": true,
            "category": "komunikasi"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.sys.id, "abc");
        assert_eq!(article.date_modified(), "2025-08-20T10:00:00Z");
        assert_eq!(article.image_url(), Some("https://images.example.com/cover.jpg"));
        assert_eq!(article.word_count(), 3);
        assert_eq!(article.reading_minutes(200), 1);
        assert!(article.featured);
        assert_eq!(article.category.as_deref(), Some("komunikasi"));
    }

    #[test]
    fn test_sparse_article_uses_defaults() {
        let article: Article =
            serde_json::from_str(r#"{ "sys": { "id": "x" }, "slug": "s", "date": "2025-01-01" }"#)
                .unwrap();
        assert_eq!(article.details.json, DocumentNode::default());
        assert_eq!(article.date_modified(), "2025-01-01");
        assert_eq!(article.image_url(), None);
        assert!(!article.featured);
    }

    #[test]
    fn test_listing_order() {
        let mut articles = vec![
            article("a", "2025-01-01", None),
            article("c", "2025-03-01", None),
            article("b", "2025-03-01", None),
        ];
        articles.sort_by(listing_order);
        let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_filter_matches() {
        let mut post = article("rust-tips", "2025-01-01", Some("teknologi"));
        post.excerpt = "Tips for writing Rust".to_string();
        post.author = "Ana".to_string();

        assert!(ArticleFilter::all().matches(&post));
        assert!(ArticleFilter::category("teknologi").matches(&post));
        assert!(!ArticleFilter::category("komunikasi").matches(&post));

        let search = ArticleFilter {
            search: Some("RUST".to_string()),
            ..ArticleFilter::default()
        };
        assert!(search.matches(&post));

        let featured = ArticleFilter {
            featured_only: true,
            ..ArticleFilter::default()
        };
        assert!(!featured.matches(&post));

        let by_other = ArticleFilter {
            author: Some("Budi".to_string()),
            ..ArticleFilter::default()
        };
        assert!(!by_other.matches(&post));

        let excluded = ArticleFilter {
            exclude_slug: Some("rust-tips".to_string()),
            ..ArticleFilter::default()
        };
        assert!(!excluded.matches(&post));
    }

    #[test]
    fn test_articles_without_slug_are_not_listed() {
        let post = article("  ", "2025-01-01", None);
        assert!(!ArticleFilter::all().matches(&post));
    }

    #[test]
    fn test_related_articles_prefer_same_category() {
        let articles = vec![
            article("current", "2025-05-01", Some("teknologi")),
            article("k1", "2025-04-01", Some("komunikasi")),
            article("t1", "2025-03-01", Some("teknologi")),
            article("k2", "2025-02-01", Some("komunikasi")),
            article("t2", "2025-01-01", Some("teknologi")),
        ];

        let related = related_articles(&articles, "current", Some("teknologi"), 3);
        let slugs: Vec<&str> = related.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["t1", "t2", "k1"]);

        assert!(related_articles(&articles[..1], "current", None, 3).is_empty());
    }
}
