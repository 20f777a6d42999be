//! Block registry: the validation gate raw editor input passes through.
//!
//! Raw blocks arrive with a free-form `type` string and an untyped JSON
//! payload. [`BlockRegistry::normalize`] turns one into a [`ContentBlock`]
//! or reports exactly which block was wrong and why.

use crate::assemble::AssembleOptions;
use crate::detect;
use crate::error::{Error, Result};
use crate::model::{BlockData, BlockType, ContentBlock};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Block as received from the editor, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Declared kind
    #[serde(rename = "type")]
    pub kind: String,

    /// Position in the document; appended after the current maximum when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,

    /// Payload, shaped according to `kind`
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawBlock {
    /// Create a raw block.
    pub fn new(kind: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            order: None,
            data,
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Validates and normalizes raw blocks.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    normalize_text: bool,
    infer_mime: bool,
    strict_mime: bool,
}

impl BlockRegistry {
    /// Create a registry with default settings.
    pub fn new() -> Self {
        Self::from_options(&AssembleOptions::default())
    }

    /// Create a registry configured from assembly options.
    pub fn from_options(options: &AssembleOptions) -> Self {
        Self {
            normalize_text: options.normalize_text,
            infer_mime: options.infer_mime,
            strict_mime: options.strict_mime,
        }
    }

    /// Normalize the raw block at `index` of the caller's input.
    ///
    /// `current_max_order` is the highest order already taken; a block
    /// without an order is placed right after it (or at `0` if none).
    pub fn normalize(
        &self,
        index: usize,
        raw: &RawBlock,
        current_max_order: Option<i64>,
    ) -> Result<ContentBlock> {
        let kind: BlockType = raw.kind.parse().map_err(|kind| Error::InvalidBlockKind {
            index,
            kind,
        })?;

        let block_id = raw.id.clone().filter(|id| !id.trim().is_empty());
        let mismatch = |reason: String| Error::SchemaMismatch {
            index,
            block_id: block_id.clone(),
            reason,
        };

        let mut data = BlockData::from_value(kind, raw.data.clone()).map_err(mismatch)?;

        match &mut data {
            BlockData::Text(text) if self.normalize_text => {
                text.content = text.content.nfc().collect();
            }
            _ => {}
        }

        if let Some(media) = data.as_media_mut() {
            if media.mime_type.is_none() && self.infer_mime {
                let source = media.filename.as_deref().unwrap_or(&media.url);
                media.mime_type = detect::mime_from_name(source).map(str::to_string);
            }
            if self.strict_mime {
                if let Some(mime) = media.mime_type.as_deref() {
                    if !detect::mime_matches_kind(mime, kind) {
                        return Err(mismatch(format!(
                            "mime type {} does not fit a {} block (looks like {})",
                            mime,
                            kind,
                            detect::kind_for_mime(mime)
                        )));
                    }
                }
            }
        }

        let order = raw
            .order
            .unwrap_or_else(|| current_max_order.map_or(0, |max| max.saturating_add(1)));
        let id = block_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        log::debug!("normalized block {} as {} (order {})", index, kind, order);
        Ok(ContentBlock::new(id, order, data))
    }

    /// Normalize a whole input, stopping at the first invalid block.
    ///
    /// Blocks without an order are appended after the largest order in the
    /// input, in input sequence, so explicit orders are never displaced.
    pub fn normalize_all(&self, raws: &[RawBlock]) -> Result<Vec<ContentBlock>> {
        let mut current_max = raws.iter().filter_map(|raw| raw.order).max();
        let mut blocks = Vec::with_capacity(raws.len());

        for (index, raw) in raws.iter().enumerate() {
            let block = self.normalize(index, raw, current_max)?;
            if raw.order.is_none() {
                current_max = Some(block.order);
            }
            blocks.push(block);
        }

        Ok(blocks)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
