//! blogkit - content toolkit for a CMS-backed blog
//!
//! Inspects rich text exports, pages through article collections and
//! generates structured data, sitemaps and cache invalidations.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, SchemaKind};
use std::path::{Path, PathBuf};

use blogkit::article::{Article, ArticleFilter};
use blogkit::pagination::{ensure_page_exists, page_window};
use blogkit::revalidate::{self, RevalidateRequest, StampFileCache, WEBHOOK_NAME_HEADER};
use blogkit::rich_text::{
    count_words, estimate_reading_minutes, extract_headings, reading_time_label, render_toc_html,
    DocumentNode, RenderOptions, RichText,
};
use blogkit::{fetch_paginated, schema, sitemap, DirectorySource, SiteConfig};

/// Main entry point for the blogkit CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let config = SiteConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?
        .with_env_overrides();

    match cli.command {
        Commands::Headings { file } => handle_headings_command(&file)?,

        Commands::Stats { file } => handle_stats_command(&config, &file)?,

        Commands::Render { file, output, toc } => handle_render_command(&file, output, toc)?,

        Commands::List {
            dir,
            page,
            category,
            json,
        } => handle_list_command(&config, &dir, page, category, json)?,

        Commands::Schema { kind, article, dir } => {
            handle_schema_command(&config, kind, article, dir)?;
        }

        Commands::Sitemap {
            dir,
            output,
            robots,
            date,
        } => handle_sitemap_command(&config, &dir, output, robots, date)?,

        Commands::Revalidate {
            secret,
            manual,
            webhook,
            cache_dir,
        } => handle_revalidate_command(&config, secret, manual, webhook, cache_dir)?,
    }

    Ok(())
}

/// Read a rich text field from a JSON file
///
/// Accepts a bare document node, a `{ json, links }` field or a whole article.
fn load_rich_text(path: &Path) -> Result<RichText> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    if value.get("nodeType").is_some() {
        return Ok(RichText {
            json: DocumentNode::from_value(&value),
            links: None,
        });
    }

    if value.get("details").is_some() {
        let article: Article = serde_json::from_value(value)
            .with_context(|| format!("Invalid article in {}", path.display()))?;
        return Ok(article.details);
    }

    serde_json::from_value(value)
        .with_context(|| format!("{} is not a rich text document", path.display()))
}

fn load_article(path: &Path) -> Result<Article> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid article in {}", path.display()))
}

fn load_source(dir: &Path) -> Result<DirectorySource> {
    DirectorySource::load(dir)
        .with_context(|| format!("Failed to load articles from {}", dir.display()))
}

/// Write to a file, or stdout when no path is given
fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Handle the headings command
fn handle_headings_command(file: &Path) -> Result<()> {
    let rich_text = load_rich_text(file)?;
    for heading in extract_headings(&rich_text.json) {
        let indent = if heading.level == 3 { "  " } else { "" };
        println!("{}{} (#{})", indent, heading.text, heading.id);
    }
    Ok(())
}

/// Handle the stats command
fn handle_stats_command(config: &SiteConfig, file: &Path) -> Result<()> {
    let rich_text = load_rich_text(file)?;
    let words = count_words(&rich_text.json);
    let minutes = estimate_reading_minutes(words, config.words_per_minute);

    println!("Words:    {}", words);
    println!("Reading:  {}", reading_time_label(minutes, &config.language));
    println!("Headings: {}", extract_headings(&rich_text.json).len());
    Ok(())
}

/// Handle the render command
fn handle_render_command(file: &Path, output: Option<PathBuf>, toc: bool) -> Result<()> {
    let rich_text = load_rich_text(file)?;
    let mut html = String::new();

    if toc {
        html.push_str(&render_toc_html(&extract_headings(&rich_text.json)));
        html.push('\n');
    }
    html.push_str(&rich_text.to_html(&RenderOptions::default()));
    html.push('\n');

    write_output(output.as_deref(), &html)
}

/// Handle the list command
fn handle_list_command(
    config: &SiteConfig,
    dir: &Path,
    page: u64,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let source = load_source(dir)?;
    let filter = ArticleFilter {
        category,
        ..ArticleFilter::default()
    };

    let result = fetch_paginated(&source, page, config.page_size, &filter)
        .context("Failed to fetch articles")?;
    // The first page always renders, even for an empty collection
    if page != 1 {
        ensure_page_exists(page, &result.info)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&SerializablePage::from(&result))?);
        return Ok(());
    }

    println!(
        "Page {} of {} ({} articles)",
        result.info.current_page, result.info.total_pages, result.info.total_items
    );
    for article in &result.items {
        println!("  {}  {}  /{}", article.date, article.title, article.slug);
    }

    let window = page_window(result.info.current_page, result.info.total_pages);
    let pages: Vec<String> = window
        .iter()
        .map(|p| {
            if *p == result.info.current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    println!("Pages: {}", pages.join(" "));

    Ok(())
}

/// Listing output for `list --json`
#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SerializablePage<'a> {
    items: Vec<ListedArticle<'a>>,
    #[serde(flatten)]
    info: blogkit::PageInfo,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedArticle<'a> {
    slug: &'a str,
    title: &'a str,
    date: &'a str,
    category: Option<&'a str>,
}

impl<'a> From<&'a blogkit::PageResult<Article>> for SerializablePage<'a> {
    fn from(page: &'a blogkit::PageResult<Article>) -> Self {
        Self {
            items: page
                .items
                .iter()
                .map(|a| ListedArticle {
                    slug: &a.slug,
                    title: &a.title,
                    date: &a.date,
                    category: a.category.as_deref(),
                })
                .collect(),
            info: page.info,
        }
    }
}

/// Handle the schema command
fn handle_schema_command(
    config: &SiteConfig,
    kind: SchemaKind,
    article: Option<PathBuf>,
    dir: Option<PathBuf>,
) -> Result<()> {
    let value = match kind {
        SchemaKind::Website => schema::website_schema(config),
        SchemaKind::Organization => schema::organization_schema(config),
        SchemaKind::Blog => {
            let source = match dir {
                Some(ref dir) => load_source(dir)?,
                None => DirectorySource::default(),
            };
            let listed: Vec<Article> = source
                .matching(&ArticleFilter::all())
                .cloned()
                .collect();
            schema::blog_schema(config, &listed)
        }
        SchemaKind::Article => {
            let Some(path) = article else {
                bail!("The article schema needs --article <FILE>");
            };
            schema::article_schema(config, &load_article(&path)?)
        }
    };

    println!("{}", schema::to_json_ld(&value));
    Ok(())
}

/// Handle the sitemap command
fn handle_sitemap_command(
    config: &SiteConfig,
    dir: &Path,
    output: Option<PathBuf>,
    robots: bool,
    date: Option<String>,
) -> Result<()> {
    let source = load_source(dir)?;
    let generated_at = date.unwrap_or_else(|| {
        source
            .matching(&ArticleFilter::all())
            .next()
            .map(|a| a.date.clone())
            .unwrap_or_default()
    });

    let entries = sitemap::sitemap_entries(config, source.articles(), &generated_at);
    write_output(output.as_deref(), &sitemap::render_sitemap_xml(&entries))?;

    if robots {
        let Some(ref path) = output else {
            bail!("--robots needs --output so robots.txt has a directory to go to");
        };
        let robots_path = path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("robots.txt");
        write_output(Some(&robots_path), &sitemap::render_robots_txt(config))?;
    }

    log::info!("Sitemap with {} URLs", entries.len());
    Ok(())
}

/// Handle the revalidate command
fn handle_revalidate_command(
    config: &SiteConfig,
    secret: Option<String>,
    manual: bool,
    webhook: Option<String>,
    cache_dir: PathBuf,
) -> Result<()> {
    let request = if manual {
        RevalidateRequest::get(secret.as_deref())
    } else {
        let request = RevalidateRequest::post(secret.as_deref(), None);
        match webhook {
            Some(ref name) => request.with_header(WEBHOOK_NAME_HEADER, name),
            None => request,
        }
    };

    let cache = StampFileCache::new(cache_dir);
    let response = revalidate::handle(
        &request,
        config.revalidation_secret.as_deref(),
        &cache,
        revalidate::unix_millis(),
    );

    println!("{} {}", response.status, response.body_json());
    if response.status != 200 {
        bail!("Revalidation failed: {}", response.body.message);
    }
    Ok(())
}
