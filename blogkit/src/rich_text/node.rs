//! Closed document tree for CMS rich text
//!
//! The CMS exports rich text as loosely-typed JSON (`nodeType`, `content`,
//! `value`, `marks`, `data`). It is converted once, leniently, into
//! [`DocumentNode`]; node types outside the known vocabulary become
//! [`DocumentNode::Unknown`] and are skipped by every consumer.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::RichTextError;

/// Maximum nesting accepted when converting JSON into a document tree
///
/// Deeper subtrees are replaced by an `Unknown` node.
pub const MAX_NODE_DEPTH: usize = 128;

/// Inline formatting applied to a text leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// `bold`
    Bold,
    /// `italic`
    Italic,
    /// `underline`
    Underline,
    /// `code`
    Code,
}

impl Mark {
    /// Parse a CMS mark name, ignoring marks we do not render
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Mark::Bold),
            "italic" => Some(Mark::Italic),
            "underline" => Some(Mark::Underline),
            "code" => Some(Mark::Code),
            _ => None,
        }
    }
}

/// Reference data carried by an embedded asset node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetRef {
    /// CMS asset id (`data.target.sys.id`)
    pub id: Option<String>,
    /// Inline file URL (`data.target.fields.file.url`)
    pub url: Option<String>,
    /// Inline asset title
    pub title: Option<String>,
    /// Inline asset description
    pub description: Option<String>,
}

/// A node of a rich-text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    /// Root container
    Document(Vec<DocumentNode>),
    /// Paragraph
    Paragraph(Vec<DocumentNode>),
    /// Heading level 1-6
    Heading {
        /// 1 for `heading-1` through 6 for `heading-6`
        level: u8,
        /// Heading content
        children: Vec<DocumentNode>,
    },
    /// Bulleted list of `ListItem`s
    UnorderedList(Vec<DocumentNode>),
    /// Numbered list of `ListItem`s
    OrderedList(Vec<DocumentNode>),
    /// List entry
    ListItem(Vec<DocumentNode>),
    /// Quotation block
    Blockquote(Vec<DocumentNode>),
    /// Block-level asset (image) reference
    EmbeddedAsset {
        /// Which asset to show
        asset: AssetRef,
        /// Usually empty
        children: Vec<DocumentNode>,
    },
    /// Inline hyperlink
    Hyperlink {
        /// Link target
        uri: String,
        /// Link text
        children: Vec<DocumentNode>,
    },
    /// Text leaf
    Text {
        /// Raw text
        value: String,
        /// Formatting applied to the whole leaf
        marks: Vec<Mark>,
    },
    /// A node type this crate does not understand; contributes nothing
    Unknown {
        /// The CMS `nodeType` as received
        node_type: String,
    },
}

impl DocumentNode {
    /// Create a plain text leaf
    pub fn text(value: impl Into<String>) -> Self {
        DocumentNode::Text {
            value: value.into(),
            marks: Vec::new(),
        }
    }

    /// Create a heading node
    pub fn heading(level: u8, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Heading { level, children }
    }

    /// Child nodes, empty for leaves and unknown nodes
    pub fn children(&self) -> &[DocumentNode] {
        match self {
            DocumentNode::Document(children)
            | DocumentNode::Paragraph(children)
            | DocumentNode::UnorderedList(children)
            | DocumentNode::OrderedList(children)
            | DocumentNode::ListItem(children)
            | DocumentNode::Blockquote(children)
            | DocumentNode::Heading { children, .. }
            | DocumentNode::EmbeddedAsset { children, .. }
            | DocumentNode::Hyperlink { children, .. } => children,
            DocumentNode::Text { .. } | DocumentNode::Unknown { .. } => &[],
        }
    }

    /// Text value of a leaf
    pub fn text_value(&self) -> Option<&str> {
        match self {
            DocumentNode::Text { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Parse a rich-text JSON document
    ///
    /// Only syntactically invalid JSON is an error; unexpected shapes are
    /// converted leniently.
    pub fn from_json(json: &str) -> Result<Self, RichTextError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Convert a JSON value into a document tree, never failing
    pub fn from_value(value: &Value) -> Self {
        convert(value, 0)
    }
}

impl Default for DocumentNode {
    fn default() -> Self {
        DocumentNode::Document(Vec::new())
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(DocumentNode::from_value(&value))
    }
}

fn convert(value: &Value, depth: usize) -> DocumentNode {
    let node_type = value
        .get("nodeType")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if depth >= MAX_NODE_DEPTH {
        log::warn!(
            "Rich text nested deeper than {} levels, dropping '{}' subtree",
            MAX_NODE_DEPTH,
            node_type
        );
        return DocumentNode::Unknown {
            node_type: node_type.to_string(),
        };
    }

    let children = || -> Vec<DocumentNode> {
        value
            .get("content")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(|c| convert(c, depth + 1)).collect())
            .unwrap_or_default()
    };

    match node_type {
        "document" => DocumentNode::Document(children()),
        "paragraph" => DocumentNode::Paragraph(children()),
        "heading-1" | "heading-2" | "heading-3" | "heading-4" | "heading-5" | "heading-6" => {
            let level = node_type
                .trim_start_matches("heading-")
                .parse()
                .unwrap_or(1);
            DocumentNode::Heading {
                level,
                children: children(),
            }
        }
        "unordered-list" => DocumentNode::UnorderedList(children()),
        "ordered-list" => DocumentNode::OrderedList(children()),
        "list-item" => DocumentNode::ListItem(children()),
        "blockquote" => DocumentNode::Blockquote(children()),
        "embedded-asset-block" => DocumentNode::EmbeddedAsset {
            asset: asset_ref(value.get("data")),
            children: children(),
        },
        "hyperlink" => DocumentNode::Hyperlink {
            uri: value
                .pointer("/data/uri")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            children: children(),
        },
        "text" => DocumentNode::Text {
            value: value
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: value
                .get("marks")
                .and_then(Value::as_array)
                .map(|marks| {
                    marks
                        .iter()
                        .filter_map(|m| m.get("type").and_then(Value::as_str))
                        .filter_map(Mark::from_name)
                        .collect()
                })
                .unwrap_or_default(),
        },
        other => {
            log::debug!("Skipping unknown rich text node type '{}'", other);
            DocumentNode::Unknown {
                node_type: other.to_string(),
            }
        }
    }
}

fn asset_ref(data: Option<&Value>) -> AssetRef {
    let Some(target) = data.and_then(|d| d.get("target")) else {
        return AssetRef::default();
    };

    let string_at = |pointer: &str| {
        target
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    AssetRef {
        id: string_at("/sys/id"),
        url: string_at("/fields/file/url"),
        title: string_at("/fields/title"),
        description: string_at("/fields/description"),
    }
}
