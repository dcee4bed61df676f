//! Article data sources
//!
//! Listing pages request one window of articles at a time through
//! [`ArticleSource::fetch_page`]; the offset comes from the pagination
//! calculator. [`DirectorySource`] serves articles exported as JSON files.

use itertools::Itertools;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::article::{listing_order, Article, ArticleFilter};
use crate::pagination::{paginate, PageRequest, PageResult};

/// One window of a filtered article collection
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    /// Articles in the requested window, in listing order
    pub items: Vec<Article>,
    /// Number of articles matching the filter overall
    pub total: u64,
}

/// A store that can serve windows of a filtered, ordered article collection
pub trait ArticleSource {
    /// Fetch up to `limit` articles after skipping `offset` matching ones
    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
        filter: &ArticleFilter,
    ) -> Result<Fetched, SourceError>;
}

/// Errors raised by article sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// A file could not be read
    #[error("IO error reading {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    /// The content directory could not be traversed
    #[error("Failed to walk content directory {}: {}", .0.display(), .1)]
    Walk(PathBuf, #[source] walkdir::Error),

    /// A file is not valid article JSON
    #[error("Invalid article JSON in {}: {}", .0.display(), .1)]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Fetch one page of articles
///
/// # Parameters
/// * `source` - Where articles come from
/// * `page` - 1-based page number
/// * `page_size` - Articles per page
/// * `filter` - Listing criteria
///
/// # Returns
/// * `Ok(PageResult<Article>)` - The page and its descriptor; page existence is not checked
/// * `Err(SourceError)` - The source could not be read
pub fn fetch_paginated<S: ArticleSource + ?Sized>(
    source: &S,
    page: u64,
    page_size: u64,
    filter: &ArticleFilter,
) -> Result<PageResult<Article>, SourceError> {
    let request = PageRequest::new(page, page_size.max(1));
    let fetched = source.fetch_page(request.offset(), request.page_size, filter)?;
    Ok(paginate(page, page_size, fetched.total).with_items(fetched.items))
}

/// Articles loaded from a directory of JSON exports
#[derive(Debug, Clone, Default)]
pub struct DirectorySource {
    articles: Vec<Article>,
}

/// A file holds one article or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleFile {
    Many(Vec<Article>),
    One(Box<Article>),
}

impl DirectorySource {
    /// Load every `*.json` file below `root`
    pub fn load(root: &Path) -> Result<Self, SourceError> {
        let paths: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map_ok(|e| {
                let path = e.path();
                (path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json"))
                    .then(|| path.to_path_buf())
            })
            .collect::<Result<_, _>>()
            .map_err(|e| SourceError::Walk(root.to_path_buf(), e))?;

        // Parse article files (optionally in parallel)
        #[cfg(feature = "parallel")]
        let parsed: Result<Vec<Vec<Article>>, _> =
            paths.par_iter().map(|path| parse_article_file(path)).collect();

        #[cfg(not(feature = "parallel"))]
        let parsed: Result<Vec<Vec<Article>>, _> =
            paths.iter().map(|path| parse_article_file(path)).collect();

        let articles: Vec<Article> = parsed?.into_iter().flatten().collect();
        log::info!(
            "Loaded {} articles from {} files in {}",
            articles.len(),
            paths.len(),
            root.display()
        );

        Ok(Self::from_articles(articles))
    }

    /// Serve an in-memory collection
    pub fn from_articles(mut articles: Vec<Article>) -> Self {
        articles.sort_by(listing_order);
        Self { articles }
    }

    /// All loaded articles in listing order, including unlisted ones
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Find a listed article by slug
    pub fn get(&self, slug: &str) -> Option<&Article> {
        self.articles
            .iter()
            .find(|a| a.is_listed() && a.slug == slug)
    }

    /// All listed articles matching `filter`, in listing order
    pub fn matching<'a>(&'a self, filter: &'a ArticleFilter) -> impl Iterator<Item = &'a Article> {
        self.articles.iter().filter(move |a| filter.matches(a))
    }
}

impl ArticleSource for DirectorySource {
    fn fetch_page(
        &self,
        offset: u64,
        limit: u64,
        filter: &ArticleFilter,
    ) -> Result<Fetched, SourceError> {
        let total = self.matching(filter).count() as u64;
        let items = self
            .matching(filter)
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(Fetched { items, total })
    }
}

fn parse_article_file(path: &Path) -> Result<Vec<Article>, SourceError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SourceError::Io(path.to_path_buf(), e))?;

    let file: ArticleFile =
        serde_json::from_str(&content).map_err(|e| SourceError::Json(path.to_path_buf(), e))?;

    Ok(match file {
        ArticleFile::Many(articles) => articles,
        ArticleFile::One(article) => vec![*article],
    })
}
