//! Editor document tree and selection as seen by the decoration engine.

use crate::model::{BlockType, ContentDocument};
use serde::{Deserialize, Serialize};

/// Kind of an editor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Paragraph,
    Heading,
    List,
    Text,
    Image,
    Video,
    Audio,
    Document,
}

impl NodeKind {
    /// Check if the node carries media (and can therefore be resized).
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            NodeKind::Image | NodeKind::Video | NodeKind::Audio | NodeKind::Document
        )
    }
}

impl From<BlockType> for NodeKind {
    fn from(kind: BlockType) -> Self {
        match kind {
            BlockType::Text => NodeKind::Paragraph,
            BlockType::Image => NodeKind::Image,
            BlockType::Video => NodeKind::Video,
            BlockType::Audio => NodeKind::Audio,
            BlockType::Document => NodeKind::Document,
        }
    }
}

/// Presentation attributes a node may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// Rendered width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Rendered height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A node of the editor document tree.
///
/// Positions are absolute offsets into the document, so children carry their
/// own `start` rather than one relative to the parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeNode {
    /// Node identity, used to key decorations
    pub id: String,

    /// Node kind
    pub kind: NodeKind,

    /// Start position
    pub start: usize,

    /// Number of positions the node occupies
    pub span: usize,

    /// Presentation attributes
    #[serde(default, skip_serializing_if = "is_default_attrs")]
    pub attrs: NodeAttrs,

    /// Nested nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

fn is_default_attrs(attrs: &NodeAttrs) -> bool {
    *attrs == NodeAttrs::default()
}

impl TreeNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<String>, kind: NodeKind, start: usize, span: usize) -> Self {
        Self {
            id: id.into(),
            kind,
            start,
            span,
            attrs: NodeAttrs::default(),
            children: Vec::new(),
        }
    }

    /// Add a child node.
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// End position (exclusive), or `None` if it overflows.
    pub fn end(&self) -> Option<usize> {
        self.start.checked_add(self.span)
    }
}

/// The editor's document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorTree {
    /// Total size of the document in positions
    pub size: usize,

    /// Top-level nodes
    pub nodes: Vec<TreeNode>,
}

impl EditorTree {
    /// Create a tree of `size` positions.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            nodes: Vec::new(),
        }
    }

    /// Add a top-level node.
    pub fn with_node(mut self, node: TreeNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Lay out a document's blocks as top-level nodes in slot order.
    ///
    /// Text blocks span one position per character; media blocks are atoms
    /// of span 1.
    pub fn from_document(doc: &ContentDocument) -> Self {
        let mut tree = EditorTree::default();
        for (_, block) in doc.placements() {
            let span = match block.data.as_text() {
                Some(text) => text.content.chars().count(),
                None => 1,
            };
            tree.nodes.push(TreeNode::new(
                block.id.clone(),
                block.block_type().into(),
                tree.size,
                span,
            ));
            tree.size += span;
        }
        tree
    }

    /// Find a node by id anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        fn walk<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
            nodes.iter().find_map(|node| {
                (node.id == id)
                    .then_some(node)
                    .or_else(|| walk(&node.children, id))
            })
        }
        walk(&self.nodes, id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        fn walk<'a>(nodes: &'a mut [TreeNode], id: &str) -> Option<&'a mut TreeNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = walk(&mut node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&mut self.nodes, id)
    }

    /// Total number of nodes, including nested ones.
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes.iter().map(|node| 1 + count(&node.children)).sum()
        }
        count(&self.nodes)
    }
}

/// Current selection range, `from <= to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "SelectionRange")]
pub struct Selection {
    /// Start position
    pub from: usize,
    /// End position
    pub to: usize,
}

impl Selection {
    /// Create a selection between two positions, in either direction.
    pub fn new(anchor: usize, head: usize) -> Self {
        Self {
            from: anchor.min(head),
            to: anchor.max(head),
        }
    }

    /// A cursor at `pos`.
    pub fn collapsed(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    /// Check if the selection is a bare cursor.
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Check if `[start, end)` lies fully inside the selection.
    pub fn encloses(&self, start: usize, end: usize) -> bool {
        self.from <= start && self.to >= end
    }
}

/// Wire form of a selection; either end may come first.
#[derive(Deserialize)]
struct SelectionRange {
    from: usize,
    to: usize,
}

impl From<SelectionRange> for Selection {
    fn from(range: SelectionRange) -> Self {
        Selection::new(range.from, range.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::model::TemplateType;
    use crate::registry::RawBlock;
    use serde_json::json;

    #[test]
    fn test_selection_normalized() {
        let sel = Selection::new(20, 10);
        assert_eq!((sel.from, sel.to), (10, 20));
        assert!(sel.encloses(10, 20));
        assert!(!sel.encloses(9, 20));
        assert!(Selection::collapsed(4).is_empty());
    }

    #[test]
    fn test_selection_deserialize_normalized() {
        let sel: Selection = serde_json::from_value(json!({ "from": 20, "to": 10 })).unwrap();
        assert_eq!(sel, Selection::new(10, 20));
        assert!(sel.encloses(10, 20));
    }

    #[test]
    fn test_find_nested() {
        let tree = EditorTree::new(30).with_node(
            TreeNode::new("p", NodeKind::Paragraph, 0, 30)
                .with_child(TreeNode::new("img", NodeKind::Image, 10, 1)),
        );
        assert_eq!(tree.find("img").map(|n| n.start), Some(10));
        assert!(tree.find("nope").is_none());
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_from_document() {
        let doc = assemble(
            TemplateType::TwoCol,
            &[
                RawBlock::new("text", json!({ "content": "hello" })).with_id("t"),
                RawBlock::new("image", json!({ "url": "a.png" })).with_id("i"),
            ],
        )
        .unwrap();
        let tree = EditorTree::from_document(&doc);
        assert_eq!(tree.size, 6);
        assert_eq!(tree.nodes[1].id, "i");
        assert_eq!(tree.nodes[1].start, 5);
        assert_eq!(tree.nodes[1].kind, NodeKind::Image);
    }

    #[test]
    fn test_tree_json_defaults() {
        let tree: EditorTree = serde_json::from_value(json!({
            "size": 20,
            "nodes": [{ "id": "a", "kind": "image", "start": 10, "span": 10 }]
        }))
        .unwrap();
        assert_eq!(tree.nodes[0].attrs, NodeAttrs::default());
        assert!(tree.nodes[0].children.is_empty());
    }
}
