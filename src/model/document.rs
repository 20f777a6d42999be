//! Document-level types.

use super::{ContentBlock, LayoutArea, TemplateLayout, TemplateType};
use crate::assemble::validate;
use crate::catalog::LayoutCatalog;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// An assembled topic document: blocks placed into a template grid.
///
/// A `ContentDocument` always satisfies the document invariants. It can
/// only be produced by the assembler or by validating a
/// [`PersistedDocument`]; changing its blocks means assembling a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedDocument")]
pub struct ContentDocument {
    template: TemplateType,
    blocks: Vec<ContentBlock>,
    layout: TemplateLayout,
}

impl ContentDocument {
    /// Wrap parts that have already been validated.
    pub(crate) fn from_validated(
        template: TemplateType,
        blocks: Vec<ContentBlock>,
        layout: TemplateLayout,
    ) -> Self {
        Self {
            template,
            blocks,
            layout,
        }
    }

    /// Template the document is laid out with.
    pub fn template(&self) -> TemplateType {
        self.template
    }

    /// Blocks in ascending order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Grid layout.
    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Get a block by id.
    pub fn block(&self, id: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Areas paired with the blocks they hold, in slot order.
    pub fn placements(&self) -> impl Iterator<Item = (&LayoutArea, &ContentBlock)> {
        self.layout
            .areas
            .iter()
            .filter_map(move |area| self.block(&area.block_id).map(|block| (area, block)))
    }

    /// Convert back into the unchecked persisted shape.
    pub fn into_persisted(self) -> PersistedDocument {
        PersistedDocument {
            template: self.template,
            blocks: self.blocks,
            layout: self.layout,
        }
    }
}

/// Persisted document shape, as read from storage before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedDocument {
    /// Template name
    pub template: TemplateType,

    /// Blocks
    pub blocks: Vec<ContentBlock>,

    /// Grid layout
    pub layout: TemplateLayout,
}

impl TryFrom<PersistedDocument> for ContentDocument {
    type Error = Error;

    /// Validate a persisted document. A `custom` document declares its own
    /// grid, so its slot count is the number of areas it carries.
    fn try_from(persisted: PersistedDocument) -> Result<Self, Self::Error> {
        let PersistedDocument {
            template,
            mut blocks,
            layout,
        } = persisted;

        validate(template, &blocks, &layout, &LayoutCatalog::new())?;
        blocks.sort_by_key(|block| block.order);

        Ok(Self::from_validated(template, blocks, layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;

    fn two_col() -> PersistedDocument {
        let mut layout = TemplateLayout::new(2, 1);
        layout
            .areas
            .push(LayoutArea::new("area-1", "t", "1 / 2", "1 / 2"));
        layout
            .areas
            .push(LayoutArea::new("area-2", "i", "2 / 3", "1 / 2"));
        PersistedDocument {
            template: TemplateType::TwoCol,
            blocks: vec![
                ContentBlock::image("i", 1, "http://x/y.png"),
                ContentBlock::text("t", 0, "a"),
            ],
            layout,
        }
    }

    #[test]
    fn test_try_from_sorts_blocks() {
        let doc = ContentDocument::try_from(two_col()).unwrap();
        assert_eq!(doc.blocks()[0].id, "t");
        assert_eq!(doc.block_count(), 2);

        let placed: Vec<&str> = doc.placements().map(|(_, b)| b.id.as_str()).collect();
        assert_eq!(placed, vec!["t", "i"]);
    }

    #[test]
    fn test_try_from_rejects_dangling_area() {
        let mut persisted = two_col();
        persisted.layout.areas[1].block_id = "ghost".to_string();
        let err = ContentDocument::try_from(persisted).unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentInvalid(Violation::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_into_persisted_round_trip() {
        let doc = ContentDocument::try_from(two_col()).unwrap();
        let back = ContentDocument::try_from(doc.clone().into_persisted()).unwrap();
        assert_eq!(doc, back);
    }
}
