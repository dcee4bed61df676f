//! sitemap.xml and robots.txt generation

use itertools::Itertools;
use serde::Serialize;

use crate::article::Article;
use crate::rich_text::escape_html;
use crate::site_config::SiteConfig;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// `daily`
    Daily,
    /// `weekly`
    Weekly,
    /// `monthly`
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

/// A single sitemap `<url>` entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    /// Absolute page URL
    pub url: String,
    /// W3C datetime of the last modification
    pub last_modified: String,
    /// Expected change frequency
    pub change_frequency: ChangeFrequency,
    /// Relative priority between 0.0 and 1.0
    pub priority: f32,
}

/// Build sitemap entries for the static pages and every listed article
///
/// # Parameters
/// * `config` - Site configuration providing the base URL
/// * `articles` - Articles to include; unlisted ones are skipped
/// * `generated_at` - Timestamp used as last modification of static pages
pub fn sitemap_entries(
    config: &SiteConfig,
    articles: &[Article],
    generated_at: &str,
) -> Vec<SitemapEntry> {
    let static_pages = [
        SitemapEntry {
            url: config.base_url.clone(),
            last_modified: generated_at.to_string(),
            change_frequency: ChangeFrequency::Weekly,
            priority: 1.0,
        },
        SitemapEntry {
            url: config.absolute_url("/about"),
            last_modified: generated_at.to_string(),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.6,
        },
    ];

    let article_pages = articles
        .iter()
        .filter(|a| a.is_listed())
        .map(|article| SitemapEntry {
            url: config.article_url(&article.slug),
            last_modified: article.date.clone(),
            change_frequency: ChangeFrequency::Weekly,
            priority: if article.featured { 0.9 } else { 0.7 },
        });

    static_pages.into_iter().chain(article_pages).collect()
}

/// Render entries as a sitemaps.org XML document
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let urls = entries
        .iter()
        .map(|entry| {
            // An empty lastmod is invalid, so the element is left out
            let last_modified = if entry.last_modified.trim().is_empty() {
                String::new()
            } else {
                format!(
                    "    <lastmod>{}</lastmod>\n",
                    escape_html(entry.last_modified.trim())
                )
            };
            format!(
                "  <url>\n    <loc>{}</loc>\n{}    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
                escape_html(&entry.url),
                last_modified,
                entry.change_frequency.as_str(),
                entry.priority
            )
        })
        .join("");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>\n",
        urls
    )
}

/// Render robots.txt pointing crawlers at the sitemap
pub fn render_robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /private/\n\nHost: {}\nSitemap: {}\n",
        config.base_url,
        config.absolute_url("/sitemap.xml")
    )
}
