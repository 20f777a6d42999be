//! Document statistics.

use super::visitor::{walk, DocumentVisitor, VisitorAction};
use crate::catalog::LayoutCatalog;
use crate::model::{BlockType, ContentBlock, ContentDocument, MediaBlockData, TextBlockData};
use serde::{Deserialize, Serialize};

/// Statistics about an assembled document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of text blocks
    pub text_count: u32,

    /// Number of image blocks
    pub image_count: u32,

    /// Number of video blocks
    pub video_count: u32,

    /// Number of audio blocks
    pub audio_count: u32,

    /// Number of document (attachment) blocks
    pub document_count: u32,

    /// Approximate word count of all text blocks
    pub word_count: u32,

    /// Character count of all text blocks (excluding whitespace)
    pub char_count: u32,

    /// Sum of the declared media sizes in bytes
    pub media_bytes: u64,

    /// Slots that hold a block
    pub filled_slots: u32,

    /// Slots the template offers but the document leaves empty
    pub free_slots: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics for `doc`.
    pub fn collect(doc: &ContentDocument) -> Self {
        let mut stats = Self::new();
        walk(doc, &mut stats, |_, _, _| {});

        // custom documents declare their slots through their areas
        let slots = LayoutCatalog::new()
            .slot_count(doc.template())
            .unwrap_or(doc.layout().len());
        stats.free_slots = slots.saturating_sub(doc.layout().len()) as u32;
        stats
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> u32 {
        self.text_count + self.media_count()
    }

    /// Number of media blocks of any kind.
    pub fn media_count(&self) -> u32 {
        self.image_count + self.video_count + self.audio_count + self.document_count
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &DocumentStats) {
        self.text_count += other.text_count;
        self.image_count += other.image_count;
        self.video_count += other.video_count;
        self.audio_count += other.audio_count;
        self.document_count += other.document_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
        self.media_bytes = self.media_bytes.saturating_add(other.media_bytes);
        self.filled_slots += other.filled_slots;
        self.free_slots += other.free_slots;
    }
}

impl DocumentVisitor for DocumentStats {
    fn visit_text(&mut self, _block: &ContentBlock, text: &TextBlockData) -> VisitorAction {
        self.text_count += 1;
        self.filled_slots += 1;
        self.count_text(&text.content);
        VisitorAction::Continue
    }

    fn visit_media(&mut self, block: &ContentBlock, media: &MediaBlockData) -> VisitorAction {
        match block.block_type() {
            BlockType::Image => self.image_count += 1,
            BlockType::Video => self.video_count += 1,
            BlockType::Audio => self.audio_count += 1,
            BlockType::Document => self.document_count += 1,
            BlockType::Text => {}
        }
        self.filled_slots += 1;
        self.media_bytes = self.media_bytes.saturating_add(media.size.unwrap_or(0));
        VisitorAction::Continue
    }
}
