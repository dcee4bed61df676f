//! schema.org structured data (JSON-LD)
//!
//! Every builder takes the site configuration explicitly; nothing here reads
//! global state.

use serde_json::{json, Value};

use crate::article::Article;
use crate::site_config::SiteConfig;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Maximum number of posts embedded in the Blog schema
pub const BLOG_SCHEMA_POST_LIMIT: usize = 10;

/// A breadcrumb trail element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Label shown in the trail
    pub name: String,
    /// Absolute URL or site-relative path
    pub url: String,
}

impl Breadcrumb {
    /// Create a breadcrumb element
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

fn publisher(config: &SiteConfig) -> Value {
    json!({
        "@type": "Organization",
        "name": config.publisher.name,
        "logo": {
            "@type": "ImageObject",
            "url": config.publisher.logo,
        },
    })
}

/// WebSite schema for the home page
pub fn website_schema(config: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": config.site_name,
        "url": config.base_url,
        "description": config.description,
        "publisher": publisher(config),
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/search?q={{search_term_string}}", config.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// Blog schema for listing pages, embedding the first posts
pub fn blog_schema(config: &SiteConfig, articles: &[Article]) -> Value {
    let posts: Vec<Value> = articles
        .iter()
        .take(BLOG_SCHEMA_POST_LIMIT)
        .map(|article| {
            let mut post = json!({
                "@type": "BlogPosting",
                "headline": article.title,
                "url": config.article_url(&article.slug),
                "datePublished": article.date,
                "dateModified": article.date_modified(),
                "author": {
                    "@type": "Person",
                    "name": article.author,
                },
                "description": article.excerpt,
            });
            if let Some(url) = article.image_url() {
                post["image"] = json!({ "@type": "ImageObject", "url": url });
            }
            post
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Blog",
        "name": format!("{} - Blog", config.site_name),
        "url": config.absolute_url("/blog"),
        "description": config.description,
        "author": {
            "@type": "Person",
            "name": config.author.name,
            "url": config.author.url,
        },
        "publisher": publisher(config),
        "blogPost": posts,
    })
}

/// BlogPosting schema for an article page
pub fn article_schema(config: &SiteConfig, article: &Article) -> Value {
    let url = config.article_url(&article.slug);
    let mut schema = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BlogPosting",
        "headline": article.title,
        "description": article.excerpt,
        "url": url,
        "datePublished": article.date,
        "dateModified": article.date_modified(),
        "author": {
            "@type": "Person",
            "name": article.author,
        },
        "publisher": publisher(config),
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
        "articleSection": "Blog",
        "inLanguage": config.language,
        "wordCount": article.word_count(),
        "isPartOf": {
            "@type": "WebSite",
            "name": config.site_name,
            "url": config.base_url,
        },
    });

    if let Some(image) = article.image_url() {
        schema["image"] = json!({
            "@type": "ImageObject",
            "url": image,
            "width": 1200,
            "height": 630,
        });
    }

    schema
}

/// BreadcrumbList schema; relative URLs are resolved against the base URL
pub fn breadcrumb_schema(config: &SiteConfig, items: &[Breadcrumb]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": item.name,
                "item": config.absolute_url(&item.url),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

/// Organization schema for the about page
pub fn organization_schema(config: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": config.publisher.name,
        "url": config.base_url,
        "logo": {
            "@type": "ImageObject",
            "url": config.publisher.logo,
        },
        "description": config.description,
        "sameAs": config.same_as,
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "customer service",
            "availableLanguage": [config.language],
        },
    })
}

/// Serialize a schema for a `<script type="application/ld+json">` tag
///
/// `</` is escaped so the payload cannot close the surrounding script element.
pub fn to_json_ld(schema: &Value) -> String {
    serde_json::to_string_pretty(schema)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}
