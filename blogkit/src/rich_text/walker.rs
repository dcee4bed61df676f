//! Depth-first traversal of a document tree
//!
//! Traversal uses an explicit stack, so arbitrarily deep trees never exhaust
//! the call stack.

use super::node::DocumentNode;

/// Pre-order, document-order iterator over a node and all its descendants
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a DocumentNode>,
}

impl<'a> Walk<'a> {
    /// Start a walk at `root`
    pub fn new(root: &'a DocumentNode) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a DocumentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so the first child is visited next
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl DocumentNode {
    /// Iterate over this node and every descendant in document order
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// All text leaves of the tree, in document order
    pub fn text_leaves(&self) -> impl Iterator<Item = &str> {
        self.walk().filter_map(DocumentNode::text_value)
    }
}

/// Join all text leaves of the tree with single spaces
pub fn plain_text(root: &DocumentNode) -> String {
    root.text_leaves().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentNode {
        DocumentNode::Document(vec![
            DocumentNode::heading(2, vec![DocumentNode::text("A")]),
            DocumentNode::Paragraph(vec![
                DocumentNode::text("B"),
                DocumentNode::Hyperlink {
                    uri: "https://example.com".to_string(),
                    children: vec![DocumentNode::text("C")],
                },
                DocumentNode::text("D"),
            ]),
            DocumentNode::UnorderedList(vec![DocumentNode::ListItem(vec![
                DocumentNode::Paragraph(vec![DocumentNode::text("E")]),
            ])]),
        ])
    }

    #[test]
    fn test_walk_is_document_order() {
        let doc = sample();
        let leaves: Vec<&str> = doc.text_leaves().collect();
        assert_eq!(leaves, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_walk_visits_every_node() {
        let doc = sample();
        // document, heading, A, paragraph, B, hyperlink, C, D, list, item, paragraph, E
        assert_eq!(doc.walk().count(), 12);
    }

    #[test]
    fn test_walk_skips_unknown_subtrees() {
        let doc = DocumentNode::Document(vec![
            DocumentNode::Unknown {
                node_type: "table".to_string(),
            },
            DocumentNode::text("kept"),
        ]);
        assert_eq!(plain_text(&doc), "kept");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(&sample()), "A B C D E");
        assert_eq!(plain_text(&DocumentNode::Document(vec![])), "");
    }

    #[test]
    fn test_walk_deep_tree() {
        let mut node = DocumentNode::text("bottom");
        for _ in 0..10_000 {
            node = DocumentNode::Blockquote(vec![node]);
        }
        assert_eq!(node.walk().count(), 10_001);
        assert_eq!(plain_text(&node), "bottom");

        // Unwind iteratively so dropping the tree does not recurse 10k frames
        let mut current = node;
        loop {
            match current {
                DocumentNode::Blockquote(mut children) => match children.pop() {
                    Some(child) => current = child,
                    None => break,
                },
                _ => break,
            }
        }
    }
}
