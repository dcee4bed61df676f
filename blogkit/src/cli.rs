//! Command-line interface definitions for blogkit

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Structured data kinds for the schema command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SchemaKind {
    /// WebSite schema for the home page
    Website,
    /// Blog schema embedding the latest posts
    Blog,
    /// Organization schema for the about page
    Organization,
    /// BlogPosting schema for a single article
    Article,
}

/// CLI structure for the blogkit application
#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version)]
#[command(about = "Content toolkit for a CMS-backed blog", long_about = None)]
pub struct Cli {
    /// Site configuration file
    #[arg(long, global = true, default_value = "blogkit.toml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for blogkit
#[derive(Subcommand)]
pub enum Commands {
    /// Print the table-of-contents headings of a rich text document
    Headings {
        /// Rich text JSON file (a document node or an article)
        file: PathBuf,
    },

    /// Print word count and reading time of a rich text document
    Stats {
        /// Rich text JSON file (a document node or an article)
        file: PathBuf,
    },

    /// Render a rich text document to HTML
    Render {
        /// Rich text JSON file (a document node or an article)
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prepend a table of contents
        #[arg(long)]
        toc: bool,
    },

    /// List one page of articles from a content directory
    List {
        /// Directory of article JSON exports
        dir: PathBuf,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Only list articles in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema.org JSON-LD
    Schema {
        /// Which schema to generate
        #[arg(value_enum)]
        kind: SchemaKind,

        /// Article JSON file (required for `article`)
        #[arg(long)]
        article: Option<PathBuf>,

        /// Content directory (used by `blog`)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Generate sitemap.xml for a content directory
    Sitemap {
        /// Directory of article JSON exports
        dir: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write robots.txt next to the output
        #[arg(long)]
        robots: bool,

        /// Last modification date of static pages (defaults to the newest article date)
        #[arg(long)]
        date: Option<String>,
    },

    /// Invalidate cached article data as the webhook would
    Revalidate {
        /// Secret to present
        #[arg(short, long)]
        secret: Option<String>,

        /// Use the manual (GET) trigger instead of the webhook (POST)
        #[arg(long)]
        manual: bool,

        /// Webhook name to report
        #[arg(long)]
        webhook: Option<String>,

        /// Directory holding cache stamp files
        #[arg(long, default_value = ".blogkit-cache")]
        cache_dir: PathBuf,
    },
}
