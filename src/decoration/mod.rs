//! Selection decoration engine.
//!
//! Decorations are view-only annotations derived from the editor tree and
//! the current selection. They are never stored in the document: the
//! renderer overlays them (for example, resize handles on a selected
//! image) and throws them away on the next transition.
//!
//! [`decorate`] is a pure function of `(tree, selection)`. Calling it twice
//! with the same inputs yields equal [`DecorationSet`]s, which is what lets
//! a UI diff decorations without spurious re-renders.
//!
//! # Example
//!
//! ```
//! use topicgrid::decoration::{decorate, EditorTree, NodeKind, Selection, TreeNode};
//!
//! let tree = EditorTree::new(40).with_node(TreeNode::new("img", NodeKind::Image, 10, 10));
//!
//! let selected = decorate(&tree, Selection::new(10, 20));
//! assert_eq!(selected.len(), 1);
//!
//! let partial = decorate(&tree, Selection::new(5, 15));
//! assert!(partial.is_empty());
//! ```

mod session;
mod tree;

pub use session::{EditorSession, EditorState, Step};
pub use tree::{EditorTree, NodeAttrs, NodeKind, Selection, TreeNode};

use serde::{Deserialize, Serialize};

/// What a decoration tells the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecorationTag {
    /// The node is fully selected; show resize handles
    SelectedForResize,
}

impl std::fmt::Display for DecorationTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecorationTag::SelectedForResize => write!(f, "selected-for-resize"),
        }
    }
}

/// A view-only annotation on one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decoration {
    /// Id of the decorated node
    pub node_id: String,
    /// Start of the decorated range
    pub from: usize,
    /// End of the decorated range (exclusive)
    pub to: usize,
    /// Annotation kind
    pub tag: DecorationTag,
}

/// Decorations for one editor state, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    /// An empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of decorations.
    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    /// Check if there are no decorations.
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Iterate decorations in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    /// Decoration on `node_id`, if any.
    pub fn get(&self, node_id: &str) -> Option<&Decoration> {
        self.decorations.iter().find(|d| d.node_id == node_id)
    }

    /// Check if `node_id` is decorated.
    pub fn contains(&self, node_id: &str) -> bool {
        self.get(node_id).is_some()
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}

/// Compute the decorations for `tree` under `selection`.
///
/// Every media node fully enclosed by the selection is tagged
/// [`DecorationTag::SelectedForResize`]. Nodes whose range reaches past the
/// end of the document are skipped; the rest of the tree is still decorated.
pub fn decorate(tree: &EditorTree, selection: Selection) -> DecorationSet {
    let mut decorations = Vec::new();
    visit(&tree.nodes, tree.size, selection, &mut decorations);
    DecorationSet { decorations }
}

fn visit(nodes: &[TreeNode], size: usize, selection: Selection, out: &mut Vec<Decoration>) {
    for node in nodes {
        match node.end() {
            Some(end) if end <= size => {
                if node.kind.is_media() && selection.encloses(node.start, end) {
                    out.push(Decoration {
                        node_id: node.id.clone(),
                        from: node.start,
                        to: end,
                        tag: DecorationTag::SelectedForResize,
                    });
                }
            }
            _ => {
                log::warn!(
                    "skipping node {} at {}+{}: outside document of size {}",
                    node.id,
                    node.start,
                    node.span,
                    size
                );
            }
        }
        visit(&node.children, size, selection, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_tree() -> EditorTree {
        EditorTree::new(40).with_node(TreeNode::new("img", NodeKind::Image, 10, 10))
    }

    #[test]
    fn test_exact_selection_decorates() {
        let set = decorate(&image_tree(), Selection::new(10, 20));
        assert_eq!(set.len(), 1);
        let d = set.get("img").unwrap();
        assert_eq!((d.from, d.to), (10, 20));
        assert_eq!(d.tag, DecorationTag::SelectedForResize);
    }

    #[test]
    fn test_partial_overlap_does_not_decorate() {
        assert!(decorate(&image_tree(), Selection::new(5, 15)).is_empty());
        assert!(decorate(&image_tree(), Selection::new(15, 25)).is_empty());
        assert!(decorate(&image_tree(), Selection::collapsed(12)).is_empty());
    }

    #[test]
    fn test_wider_selection_decorates() {
        assert!(decorate(&image_tree(), Selection::new(0, 40)).contains("img"));
    }

    #[test]
    fn test_text_nodes_never_decorated() {
        let tree = EditorTree::new(10)
            .with_node(TreeNode::new("p", NodeKind::Paragraph, 0, 5))
            .with_node(TreeNode::new("t", NodeKind::Text, 5, 5));
        assert!(decorate(&tree, Selection::new(0, 10)).is_empty());
    }

    #[test]
    fn test_nested_media() {
        let tree = EditorTree::new(30).with_node(
            TreeNode::new("p", NodeKind::Paragraph, 0, 30)
                .with_child(TreeNode::new("v", NodeKind::Video, 4, 1))
                .with_child(TreeNode::new("a", NodeKind::Audio, 20, 1)),
        );
        let set = decorate(&tree, Selection::new(0, 10));
        let ids: Vec<&str> = set.iter().map(|d| d.node_id.as_str()).collect();
        assert_eq!(ids, vec!["v"]);
    }

    #[test]
    fn test_out_of_bounds_skipped() {
        let tree = EditorTree::new(20)
            .with_node(TreeNode::new("bad", NodeKind::Image, 15, 10))
            .with_node(TreeNode::new("overflow", NodeKind::Image, usize::MAX, 2))
            .with_node(TreeNode::new("good", NodeKind::Image, 2, 3));
        let set = decorate(&tree, Selection::new(0, usize::MAX));
        let ids: Vec<&str> = set.iter().map(|d| d.node_id.as_str()).collect();
        assert_eq!(ids, vec!["good"]);
    }

    #[test]
    fn test_pure() {
        let tree = image_tree();
        let before = tree.clone();
        let first = decorate(&tree, Selection::new(10, 20));
        let second = decorate(&tree, Selection::new(10, 20));
        assert_eq!(first, second);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_serialize() {
        let set = decorate(&image_tree(), Selection::new(10, 20));
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"nodeId":"img","from":10,"to":20,"tag":"selected-for-resize"}]"#
        );
    }
}
