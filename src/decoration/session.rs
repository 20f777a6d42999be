//! Decoration state for a single editing session.

use super::{decorate, DecorationSet, EditorTree, Selection};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Editor state the decorations are derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EditorState {
    /// Document tree
    pub tree: EditorTree,
    /// Current selection
    pub selection: Selection,
}

impl EditorState {
    /// Create a state.
    pub fn new(tree: EditorTree, selection: Selection) -> Self {
        Self { tree, selection }
    }

    fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// One editor transition, as delivered by the editor's transaction queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    /// The selection or cursor moved
    SetSelection { selection: Selection },

    /// Content was inserted or deleted; the editor hands over the new tree
    ReplaceTree {
        tree: EditorTree,
        #[serde(default)]
        selection: Option<Selection>,
    },

    /// A media node was resized
    #[serde(rename_all = "camelCase")]
    Resize {
        node_id: String,
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// Tracks one session's editor state and its decorations.
///
/// Every applied [`Step`] produces a new state and a recomputed
/// [`DecorationSet`]. Recomputation is skipped when the new state hashes
/// the same as the one the current decorations were computed for.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    state: EditorState,
    decorations: DecorationSet,
    key: u64,
    recomputed: u64,
}

impl EditorSession {
    /// Start a session from an initial state.
    pub fn new(state: EditorState) -> Self {
        let key = state.structural_hash();
        let decorations = decorate(&state.tree, state.selection);
        Self {
            state,
            decorations,
            key,
            recomputed: 1,
        }
    }

    /// Current editor state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Decorations for the current state.
    pub fn decorations(&self) -> &DecorationSet {
        &self.decorations
    }

    /// Number of times decorations were actually computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputed
    }

    /// Apply one step and return the decorations of the resulting state.
    ///
    /// A step that fails leaves the session untouched.
    pub fn apply(&mut self, step: Step) -> Result<&DecorationSet> {
        let mut next = self.state.clone();

        match step {
            Step::SetSelection { selection } => next.selection = selection,
            Step::ReplaceTree { tree, selection } => {
                next.tree = tree;
                if let Some(selection) = selection {
                    next.selection = selection;
                }
            }
            Step::Resize {
                node_id,
                width,
                height,
            } => {
                let node = next
                    .tree
                    .find_mut(&node_id)
                    .filter(|node| node.kind.is_media())
                    .ok_or_else(|| Error::NodeNotFound(node_id.clone()))?;
                node.attrs.width = width.or(node.attrs.width);
                node.attrs.height = height.or(node.attrs.height);
            }
        }

        self.state = next;
        self.refresh();
        Ok(&self.decorations)
    }

    fn refresh(&mut self) {
        let key = self.state.structural_hash();
        if key == self.key {
            log::debug!("decorations unchanged (state hash {:016x})", key);
            return;
        }
        self.decorations = decorate(&self.state.tree, self.state.selection);
        self.key = key;
        self.recomputed += 1;
    }
}
