//! Visitor pattern for customizing how documents are walked and rendered.
//!
//! The walker hands every placed block to a visitor in slot order, which
//! lets callers customize the text outline or collect statistics without
//! touching the core rendering logic.
//!
//! # Example
//!
//! ```
//! use topicgrid::render::visitor::{DocumentVisitor, VisitorAction};
//! use topicgrid::model::{ContentBlock, MediaBlockData};
//!
//! struct HideUrls;
//!
//! impl DocumentVisitor for HideUrls {
//!     fn visit_media(&mut self, block: &ContentBlock, _media: &MediaBlockData) -> VisitorAction {
//!         VisitorAction::Replace(format!("{} (link hidden)", block.block_type()))
//!     }
//! }
//! ```

use crate::model::{ContentBlock, ContentDocument, LayoutArea, MediaBlockData, TextBlockData};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting placed blocks.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor {
    /// Called for a text block.
    fn visit_text(&mut self, block: &ContentBlock, text: &TextBlockData) -> VisitorAction {
        let _ = (block, text);
        VisitorAction::Continue
    }

    /// Called for an image, video, audio, or document block.
    fn visit_media(&mut self, block: &ContentBlock, media: &MediaBlockData) -> VisitorAction {
        let _ = (block, media);
        VisitorAction::Continue
    }

    /// Called before the block of an area is visited.
    fn on_area_start(&mut self, area: &LayoutArea) {
        let _ = area;
    }

    /// Called after the block of an area is visited.
    fn on_area_end(&mut self, area: &LayoutArea) {
        let _ = area;
    }
}

/// Walk `doc` in slot order, calling `emit` with each block and the
/// visitor's decision for it.
pub fn walk<V, F>(doc: &ContentDocument, visitor: &mut V, mut emit: F)
where
    V: DocumentVisitor + ?Sized,
    F: FnMut(&LayoutArea, &ContentBlock, VisitorAction),
{
    for (area, block) in doc.placements() {
        visitor.on_area_start(area);
        let action = match (block.data.as_text(), block.data.as_media()) {
            (Some(text), _) => visitor.visit_text(block, text),
            (None, Some(media)) => visitor.visit_media(block, media),
            (None, None) => VisitorAction::Continue,
        };
        emit(area, block, action);
        visitor.on_area_end(area);
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that skips all media blocks.
#[derive(Debug, Clone, Default)]
pub struct SkipMediaVisitor;

impl DocumentVisitor for SkipMediaVisitor {
    fn visit_media(&mut self, _block: &ContentBlock, _media: &MediaBlockData) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_text(&mut self, block: &ContentBlock, text: &TextBlockData) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_text(block, text);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn visit_media(&mut self, block: &ContentBlock, media: &MediaBlockData) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_media(block, media);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_area_start(&mut self, area: &LayoutArea) {
        for visitor in &mut self.visitors {
            visitor.on_area_start(area);
        }
    }

    fn on_area_end(&mut self, area: &LayoutArea) {
        for visitor in &mut self.visitors {
            visitor.on_area_end(area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_methods() {
        let action = VisitorAction::Replace("x".to_string());
        assert!(action.is_replace());
        assert_eq!(action.replacement(), Some("x"));
        assert!(VisitorAction::Skip.should_skip());
        assert!(!VisitorAction::Continue.should_skip());
    }

    #[test]
    fn test_skip_media_visitor() {
        let mut visitor = SkipMediaVisitor;
        let block = ContentBlock::image("i", 0, "a.png");
        let media = block.data.as_media().unwrap().clone();
        assert!(visitor.visit_media(&block, &media).should_skip());
    }

    #[test]
    fn test_composite_first_decision_wins() {
        struct Tag;
        impl DocumentVisitor for Tag {
            fn visit_media(&mut self, _: &ContentBlock, _: &MediaBlockData) -> VisitorAction {
                VisitorAction::Replace("tagged".to_string())
            }
        }

        let mut composite = CompositeVisitor::new()
            .with_visitor(DefaultVisitor)
            .with_visitor(SkipMediaVisitor)
            .with_visitor(Tag);
        let block = ContentBlock::image("i", 0, "a.png");
        let media = block.data.as_media().unwrap().clone();
        assert!(composite.visit_media(&block, &media).should_skip());
    }
}
