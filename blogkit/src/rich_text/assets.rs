//! Rich text fields and linked asset resolution
//!
//! The CMS delivers a rich text field as `{ json, links }`, where embedded
//! assets in `json` refer by id to entries of `links.assets.block`.

use serde::Deserialize;
use std::collections::HashMap;

use super::node::{AssetRef, DocumentNode};
use crate::cms::Sys;

/// A rich text field as delivered by the CMS
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    /// The document tree
    pub json: DocumentNode,
    /// Entities referenced from the tree
    #[serde(default)]
    pub links: Option<RichTextLinks>,
}

/// Entities linked from a rich text document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichTextLinks {
    /// Linked assets, absent when the document embeds none
    #[serde(default)]
    pub assets: Option<AssetLinks>,
}

/// Linked assets grouped by placement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetLinks {
    /// Assets embedded as blocks
    #[serde(default)]
    pub block: Vec<LinkedAsset>,
}

/// An asset listed in `links.assets.block`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkedAsset {
    /// Asset metadata; `sys.id` is what embedded nodes refer to
    pub sys: Sys,
    /// File URL, possibly protocol-relative
    pub url: String,
    /// Asset title
    #[serde(default)]
    pub title: Option<String>,
    /// Asset description, used as alt text
    #[serde(default)]
    pub description: Option<String>,
}

/// Asset data ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset<'a> {
    /// File URL as delivered
    pub url: &'a str,
    /// Title, inline value first
    pub title: Option<&'a str>,
    /// Description, inline value first
    pub description: Option<&'a str>,
}

/// Id lookup over linked assets
#[derive(Debug, Default)]
pub struct AssetIndex<'a> {
    by_id: HashMap<&'a str, &'a LinkedAsset>,
}

impl<'a> AssetIndex<'a> {
    /// Index linked assets by id
    pub fn new(assets: &'a [LinkedAsset]) -> Self {
        Self {
            by_id: assets.iter().map(|a| (a.sys.id.as_str(), a)).collect(),
        }
    }

    /// Resolve an embedded asset reference
    ///
    /// Inline fields take precedence over the linked entry. Returns `None`
    /// when no file URL is available from either.
    pub fn resolve<'s>(&'s self, asset: &'s AssetRef) -> Option<ResolvedAsset<'s>> {
        let linked = asset
            .id
            .as_deref()
            .and_then(|id| self.by_id.get(id).copied());

        let url = asset
            .url
            .as_deref()
            .or_else(|| linked.map(|l| l.url.as_str()))
            .filter(|url| !url.is_empty())?;

        Some(ResolvedAsset {
            url,
            title: asset
                .title
                .as_deref()
                .or_else(|| linked.and_then(|l| l.title.as_deref())),
            description: asset
                .description
                .as_deref()
                .or_else(|| linked.and_then(|l| l.description.as_deref())),
        })
    }
}

impl RichText {
    /// Block assets linked from this field
    pub fn block_assets(&self) -> &[LinkedAsset] {
        self.links
            .as_ref()
            .and_then(|l| l.assets.as_ref())
            .map(|a| a.block.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rich_text_field() {
        let json = r#"{
            "json": {
                "nodeType": "document",
                "content": [
                    {
                        "nodeType": "embedded-asset-block",
                        "data": { "target": { "sys": { "id": "img-1", "type": "Link" } } },
                        "content": []
                    }
                ]
            },
            "links": {
                "assets": {
                    "block": [
                        {
                            "sys": { "id": "img-1" },
                            "url": "https://images.example.com/one.png",
                            "description": "First image"
                        }
                    ]
                }
            }
        }"#;

        let field: RichText = serde_json::from_str(json).unwrap();
        assert_eq!(field.block_assets().len(), 1);

        let index = AssetIndex::new(field.block_assets());
        let DocumentNode::Document(blocks) = &field.json else {
            panic!("expected document root");
        };
        let DocumentNode::EmbeddedAsset { asset, .. } = &blocks[0] else {
            panic!("expected embedded asset");
        };
        let resolved = index.resolve(asset).unwrap();
        assert_eq!(resolved.url, "https://images.example.com/one.png");
        assert_eq!(resolved.description, Some("First image"));
        assert_eq!(resolved.title, None);
    }

    #[test]
    fn test_missing_links_default_to_empty() {
        let field: RichText =
            serde_json::from_str(r#"{ "json": { "nodeType": "document" }, "links": null }"#)
                .unwrap();
        assert!(field.block_assets().is_empty());
    }

    #[test]
    fn test_inline_fields_take_precedence() {
        let linked = vec![LinkedAsset {
            sys: Sys {
                id: "a".to_string(),
                created_at: None,
            },
            url: "https://linked/a.png".to_string(),
            title: Some("Linked".to_string()),
            description: Some("Linked description".to_string()),
        }];
        let index = AssetIndex::new(&linked);
        let asset = AssetRef {
            id: Some("a".to_string()),
            url: None,
            title: Some("Inline".to_string()),
            description: None,
        };

        let resolved = index.resolve(&asset).unwrap();
        assert_eq!(resolved.url, "https://linked/a.png");
        assert_eq!(resolved.title, Some("Inline"));
        assert_eq!(resolved.description, Some("Linked description"));
    }

    #[test]
    fn test_unresolvable_asset() {
        let index = AssetIndex::default();
        let asset = AssetRef {
            id: Some("missing".to_string()),
            ..Default::default()
        };
        assert_eq!(index.resolve(&asset), None);
    }
}
