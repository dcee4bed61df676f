//! HTML rendering of rich text documents
//!
//! Produces semantic markup only (no classes or styling):
//! - h2/h3 carry the same anchor ids that [`extract_headings`](super::extract_headings) produces
//! - embedded assets become `<figure>` with an optional caption
//! - hyperlinks open in a new tab

use super::assets::{AssetIndex, RichText};
use super::headings::{heading_text, slugify, HeadingEntry};
use super::node::{AssetRef, DocumentNode, Mark};

/// Default nesting limit for rendering
pub const DEFAULT_MAX_RENDER_DEPTH: usize = 64;

/// Options controlling HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Nodes nested deeper than this are not rendered
    pub max_depth: usize,
    /// Emit `id` attributes on h2/h3
    pub heading_ids: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_RENDER_DEPTH,
            heading_ids: true,
        }
    }
}

impl RichText {
    /// Render this field, resolving embedded assets against its links
    pub fn to_html(&self, options: &RenderOptions) -> String {
        let index = AssetIndex::new(self.block_assets());
        render_html(&self.json, &index, options)
    }
}

/// Render a document tree to an HTML fragment
///
/// # Parameters
/// * `root` - The document tree
/// * `assets` - Linked assets used to resolve embedded asset references
/// * `options` - Rendering options
///
/// # Returns
/// * `String` - HTML fragment
pub fn render_html(root: &DocumentNode, assets: &AssetIndex, options: &RenderOptions) -> String {
    let mut renderer = Renderer {
        output: String::new(),
        assets,
        options,
        truncated: false,
    };
    renderer.write_node(root, 0);

    if renderer.truncated {
        log::warn!(
            "Rich text exceeds render depth {}, deeper content omitted",
            options.max_depth
        );
    }

    renderer.output
}

/// Render table-of-contents entries as a list of anchors
pub fn render_toc_html(headings: &[HeadingEntry]) -> String {
    if headings.is_empty() {
        return String::new();
    }

    let mut output = String::from("<nav class=\"toc\">\n<ul>\n");
    for heading in headings {
        output.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            heading.level,
            escape_html(&heading.id),
            escape_html(&heading.text)
        ));
    }
    output.push_str("</ul>\n</nav>\n");
    output
}

struct Renderer<'r, 'a> {
    output: String,
    assets: &'r AssetIndex<'a>,
    options: &'r RenderOptions,
    truncated: bool,
}

impl Renderer<'_, '_> {
    fn write_node(&mut self, node: &DocumentNode, depth: usize) {
        if depth > self.options.max_depth {
            self.truncated = true;
            return;
        }

        match node {
            DocumentNode::Document(children) => self.write_children(children, depth),

            DocumentNode::Paragraph(children) => self.write_element("p", children, depth),

            DocumentNode::Heading { level, children } => {
                let level = (*level).clamp(1, 6);
                let id = if self.options.heading_ids && matches!(level, 2 | 3) {
                    Some(slugify(&heading_text(children)))
                } else {
                    None
                };

                match id {
                    Some(id) => self
                        .output
                        .push_str(&format!("<h{} id=\"{}\">", level, escape_html(&id))),
                    None => self.output.push_str(&format!("<h{}>", level)),
                }
                self.write_children(children, depth);
                self.output.push_str(&format!("</h{}>\n", level));
            }

            DocumentNode::UnorderedList(children) => {
                self.output.push_str("<ul>\n");
                self.write_children(children, depth);
                self.output.push_str("</ul>\n");
            }

            DocumentNode::OrderedList(children) => {
                self.output.push_str("<ol>\n");
                self.write_children(children, depth);
                self.output.push_str("</ol>\n");
            }

            DocumentNode::ListItem(children) => self.write_element("li", children, depth),

            DocumentNode::Blockquote(children) => {
                self.output.push_str("<blockquote>\n");
                self.write_children(children, depth);
                self.output.push_str("</blockquote>\n");
            }

            DocumentNode::EmbeddedAsset { asset, .. } => self.write_asset(asset),

            DocumentNode::Hyperlink { uri, children } => {
                self.output.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    escape_html(uri)
                ));
                self.write_children(children, depth);
                self.output.push_str("</a>");
            }

            DocumentNode::Text { value, marks } => {
                self.output.push_str(&marks_to_html(value, marks));
            }

            DocumentNode::Unknown { .. } => {}
        }
    }

    fn write_children(&mut self, children: &[DocumentNode], depth: usize) {
        for child in children {
            self.write_node(child, depth + 1);
        }
    }

    fn write_element(&mut self, tag: &str, children: &[DocumentNode], depth: usize) {
        self.output.push_str(&format!("<{}>", tag));
        self.write_children(children, depth);
        self.output.push_str(&format!("</{}>\n", tag));
    }

    fn write_asset(&mut self, asset: &AssetRef) {
        let Some(resolved) = self.assets.resolve(asset) else {
            log::debug!("Embedded asset {:?} has no file URL, skipping", asset.id);
            return;
        };

        let src = if resolved.url.starts_with("//") {
            format!("https:{}", resolved.url)
        } else {
            resolved.url.to_string()
        };
        let alt = resolved
            .description
            .or(resolved.title)
            .unwrap_or("Embedded content");

        self.output.push_str("<figure>\n");
        self.output.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape_html(&src),
            escape_html(alt)
        ));

        if resolved.title.is_some() || resolved.description.is_some() {
            self.output.push_str("<figcaption>");
            if let Some(title) = resolved.title {
                self.output
                    .push_str(&format!("<strong>{}</strong>", escape_html(title)));
            }
            if let Some(description) = resolved.description {
                self.output
                    .push_str(&format!("<span>{}</span>", escape_html(description)));
            }
            self.output.push_str("</figcaption>\n");
        }

        self.output.push_str("</figure>\n");
    }
}

/// Convert a text leaf with marks to HTML
fn marks_to_html(value: &str, marks: &[Mark]) -> String {
    let mut text = escape_html(value);

    if marks.contains(&Mark::Code) {
        text = format!("<code>{}</code>", text);
    }
    if marks.contains(&Mark::Bold) {
        text = format!("<strong>{}</strong>", text);
    }
    if marks.contains(&Mark::Italic) {
        text = format!("<em>{}</em>", text);
    }
    if marks.contains(&Mark::Underline) {
        text = format!("<u>{}</u>", text);
    }

    text
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rich_text::extract_headings;

    fn render(node: &DocumentNode) -> String {
        render_html(node, &AssetIndex::default(), &RenderOptions::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_marks_to_html() {
        assert_eq!(marks_to_html("plain", &[]), "plain");
        assert_eq!(marks_to_html("b", &[Mark::Bold]), "<strong>b</strong>");
        assert_eq!(
            marks_to_html("x", &[Mark::Italic, Mark::Code]),
            "<em><code>x</code></em>"
        );
        assert_eq!(marks_to_html("u", &[Mark::Underline]), "<u>u</u>");
    }

    #[test]
    fn test_render_paragraph_and_link() {
        let doc = DocumentNode::Document(vec![DocumentNode::Paragraph(vec![
            DocumentNode::text("Read "),
            DocumentNode::Hyperlink {
                uri: "https://example.com/?a=1&b=2".to_string(),
                children: vec![DocumentNode::text("this")],
            },
        ])]);
        assert_eq!(
            render(&doc),
            "<p>Read <a href=\"https://example.com/?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener noreferrer\">this</a></p>\n"
        );
    }

    #[test]
    fn test_heading_ids_match_extracted_headings() {
        let doc = DocumentNode::Document(vec![
            DocumentNode::heading(1, vec![DocumentNode::text("Title")]),
            DocumentNode::heading(2, vec![DocumentNode::text("Hello, World!")]),
            DocumentNode::heading(3, vec![DocumentNode::text("  FAQ   Section  ")]),
        ]);
        let html = render(&doc);
        assert!(html.contains("<h1>Title</h1>"));
        for heading in extract_headings(&doc) {
            assert!(html.contains(&format!("id=\"{}\"", heading.id)));
        }
        assert!(html.contains("<h2 id=\"hello-world\">Hello, World!</h2>"));
    }

    #[test]
    fn test_render_lists_and_quote() {
        let doc = DocumentNode::Document(vec![
            DocumentNode::UnorderedList(vec![DocumentNode::ListItem(vec![
                DocumentNode::Paragraph(vec![DocumentNode::text("item")]),
            ])]),
            DocumentNode::OrderedList(vec![]),
            DocumentNode::Blockquote(vec![DocumentNode::Paragraph(vec![
                DocumentNode::text("quote"),
            ])]),
        ]);
        assert_eq!(
            render(&doc),
            "<ul>\n<li><p>item</p>\n</li>\n</ul>\n<ol>\n</ol>\n<blockquote>\n<p>quote</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_render_embedded_asset() {
        let doc = DocumentNode::EmbeddedAsset {
            asset: AssetRef {
                id: None,
                url: Some("//images.example.com/a.png".to_string()),
                title: Some("Chart".to_string()),
                description: None,
            },
            children: vec![],
        };
        assert_eq!(
            render(&doc),
            "<figure>\n<img src=\"https://images.example.com/a.png\" alt=\"Chart\">\n<figcaption><strong>Chart</strong></figcaption>\n</figure>\n"
        );
    }

    #[test]
    fn test_asset_without_url_renders_nothing() {
        let doc = DocumentNode::EmbeddedAsset {
            asset: AssetRef::default(),
            children: vec![],
        };
        assert_eq!(render(&doc), "");
    }

    #[test]
    fn test_unknown_nodes_render_nothing() {
        let doc = DocumentNode::Document(vec![DocumentNode::Unknown {
            node_type: "hr".to_string(),
        }]);
        assert_eq!(render(&doc), "");
    }

    #[test]
    fn test_render_depth_limit() {
        let mut node = DocumentNode::text("deep");
        for _ in 0..10 {
            node = DocumentNode::Blockquote(vec![node]);
        }
        let options = RenderOptions {
            max_depth: 3,
            heading_ids: true,
        };
        let html = render_html(&node, &AssetIndex::default(), &options);
        assert_eq!(html.matches("<blockquote>").count(), 4);
        assert!(!html.contains("deep"));
    }

    #[test]
    fn test_render_toc_html() {
        let headings = vec![
            HeadingEntry {
                id: "intro".to_string(),
                text: "Intro".to_string(),
                level: 2,
            },
            HeadingEntry {
                id: "q-a".to_string(),
                text: "Q & A".to_string(),
                level: 3,
            },
        ];
        assert_eq!(
            render_toc_html(&headings),
            "<nav class=\"toc\">\n<ul>\n<li class=\"toc-level-2\"><a href=\"#intro\">Intro</a></li>\n<li class=\"toc-level-3\"><a href=\"#q-a\">Q &amp; A</a></li>\n</ul>\n</nav>\n"
        );
        assert_eq!(render_toc_html(&[]), "");
    }
}
