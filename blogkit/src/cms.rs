//! Metadata shared by CMS entities

use serde::Deserialize;

/// System metadata of a CMS entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    /// Entity id, unique within the space
    pub id: String,
    /// Creation time (ISO 8601), when the CMS reports it
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;

    #[test]
    fn test_sys_is_shared_by_articles_and_assets() {
        let article: Article = serde_json::from_str(
            r#"{
                "sys": { "id": "post-1", "createdAt": "2025-08-21T08:00:00Z" },
                "details": {
                    "json": { "nodeType": "document" },
                    "links": { "assets": { "block": [ { "sys": { "id": "asset-1" }, "url": "//img/a.png" } ] } }
                }
            }"#,
        )
        .unwrap();

        let expected = Sys {
            id: "post-1".to_string(),
            created_at: Some("2025-08-21T08:00:00Z".to_string()),
        };
        assert_eq!(article.sys, expected);
        assert_eq!(article.details.block_assets()[0].sys.id, "asset-1");
        assert_eq!(article.details.block_assets()[0].sys.created_at, None);
    }
}
