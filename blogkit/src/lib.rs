//! blogkit - content toolkit for a CMS-backed blog
//!
//! Pagination arithmetic for article listings, rich text analysis (table of
//! contents, word count, reading time, HTML), structured data, sitemaps and
//! the on-demand cache revalidation webhook.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod article;
pub mod cms;
pub mod pagination;
pub mod revalidate;
pub mod rich_text;
pub mod schema;
pub mod site_config;
pub mod sitemap;
pub mod source;

pub use article::{Article, ArticleFilter};
pub use cms::Sys;
pub use pagination::{page_window, paginate, PageInfo, PageResult};
pub use rich_text::{
    count_words, estimate_reading_minutes, extract_headings, DocumentNode, HeadingEntry, RichText,
};
pub use site_config::SiteConfig;
pub use source::{fetch_paginated, ArticleSource, DirectorySource};
