//! Document assembler: raw blocks + template choice -> validated document.
//!
//! Assembly is all-or-nothing. Every raw block is normalized through the
//! [`BlockRegistry`], the layout is resolved from the template, and the
//! result is checked against the document invariants. Any failure aborts
//! the whole assembly and names the offending block or area.
//!
//! # Example
//!
//! ```
//! use topicgrid::assemble::Assembler;
//! use topicgrid::model::TemplateType;
//! use topicgrid::registry::RawBlock;
//! use serde_json::json;
//!
//! fn main() -> topicgrid::Result<()> {
//!     let raw = vec![
//!         RawBlock::new("text", json!({ "content": "a" })).with_order(0),
//!         RawBlock::new("image", json!({ "url": "http://x/y.png" })).with_order(1),
//!     ];
//!
//!     let doc = Assembler::new().assemble(TemplateType::TwoCol, &raw)?;
//!     assert_eq!(doc.layout().columns, 2);
//!     assert_eq!(doc.layout().areas.len(), 2);
//!     Ok(())
//! }
//! ```

mod options;
mod validation;

pub use options::AssembleOptions;
pub use validation::validate;

use crate::catalog::LayoutCatalog;
use crate::error::Result;
use crate::model::{ContentBlock, ContentDocument, TemplateType};
use crate::registry::{BlockRegistry, RawBlock};
use crate::resolver::LayoutResolver;

/// Builds [`ContentDocument`]s.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    registry: BlockRegistry,
    catalog: LayoutCatalog,
}

impl Assembler {
    /// Create an assembler with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an assembler with custom options.
    pub fn with_options(options: AssembleOptions) -> Self {
        let registry = BlockRegistry::from_options(&options);
        let catalog = match options.custom_geometry {
            Some(geometry) => LayoutCatalog::new().with_custom(geometry),
            None => LayoutCatalog::new(),
        };
        Self { registry, catalog }
    }

    /// Catalog used for template lookups.
    pub fn catalog(&self) -> &LayoutCatalog {
        &self.catalog
    }

    /// Assemble a document from raw editor blocks.
    pub fn assemble(
        &self,
        template: TemplateType,
        raw_blocks: &[RawBlock],
    ) -> Result<ContentDocument> {
        let blocks = self.registry.normalize_all(raw_blocks)?;
        self.assemble_blocks(template, blocks)
    }

    /// Assemble a document from already-normalized blocks.
    ///
    /// This is how an edited block set is turned back into a document: the
    /// layout is always derived again from scratch.
    pub fn assemble_blocks(
        &self,
        template: TemplateType,
        mut blocks: Vec<ContentBlock>,
    ) -> Result<ContentDocument> {
        let layout = LayoutResolver::new(&self.catalog).resolve(&blocks, template)?;
        blocks.sort_by_key(|block| block.order);

        if let Err(e) = validate(template, &blocks, &layout, &self.catalog) {
            log::warn!("rejected {} document: {}", template, e);
            return Err(e);
        }

        log::debug!(
            "assembled {} document with {} block(s)",
            template,
            blocks.len()
        );
        Ok(ContentDocument::from_validated(template, blocks, layout))
    }

    /// Re-assemble an existing document's blocks into another template.
    pub fn retemplate(
        &self,
        doc: &ContentDocument,
        template: TemplateType,
    ) -> Result<ContentDocument> {
        self.assemble_blocks(template, doc.blocks().to_vec())
    }
}

/// Assemble a document with default options.
pub fn assemble(template: TemplateType, raw_blocks: &[RawBlock]) -> Result<ContentDocument> {
    Assembler::new().assemble(template, raw_blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CustomGeometry, SlotGeometry};
    use crate::error::{Error, Violation};
    use crate::model::BlockType;
    use serde_json::json;

    fn text(content: &str, order: i64) -> RawBlock {
        RawBlock::new("text", json!({ "content": content })).with_order(order)
    }

    #[test]
    fn test_two_col_scenario() {
        let raw = vec![
            text("a", 0),
            RawBlock::new("image", json!({ "url": "http://x/y.png" })).with_order(1),
        ];
        let doc = assemble(TemplateType::TwoCol, &raw).unwrap();

        assert_eq!(doc.layout().columns, 2);
        assert_eq!(doc.layout().rows, 1);
        assert_eq!(doc.layout().areas.len(), 2);
        assert_eq!(doc.layout().areas[0].block_id, doc.blocks()[0].id);
        assert_eq!(doc.blocks()[0].block_type(), BlockType::Text);
        assert_eq!(doc.layout().areas[1].block_id, doc.blocks()[1].id);
        assert_eq!(doc.blocks()[1].block_type(), BlockType::Image);
    }

    #[test]
    fn test_single_rejects_two_blocks() {
        let raw = vec![text("a", 0), text("b", 1)];
        let err = assemble(TemplateType::Single, &raw).unwrap_err();
        assert!(matches!(err, Error::TooManyBlocks { slots: 1, blocks: 2, .. }));
    }

    #[test]
    fn test_first_invalid_block_aborts() {
        let raw = vec![
            text("a", 0),
            RawBlock::new("video", json!({})).with_id("vid"),
            RawBlock::new("hologram", json!({})),
        ];
        let err = assemble(TemplateType::Triple, &raw).unwrap_err();
        assert_eq!(err.block_index(), Some(1));
        assert_eq!(err.block_id(), Some("vid"));
    }

    #[test]
    fn test_duplicate_order_rejected() {
        let raw = vec![text("a", 3), text("b", 3)];
        let err = assemble(TemplateType::TwoRow, &raw).unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentInvalid(Violation::DuplicateOrder { order: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let raw = vec![text("a", 0).with_id("same"), text("b", 1).with_id("same")];
        let err = assemble(TemplateType::TwoRow, &raw).unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentInvalid(Violation::DuplicateBlockId { .. })
        ));
    }

    #[test]
    fn test_blocks_sorted_by_order() {
        let raw = vec![text("second", 5), text("first", 2)];
        let doc = assemble(TemplateType::TwoCol, &raw).unwrap();
        let orders: Vec<i64> = doc.blocks().iter().map(|b| b.order).collect();
        assert_eq!(orders, vec![2, 5]);
    }

    #[test]
    fn test_custom_template() {
        let options = AssembleOptions::new().with_custom_geometry(CustomGeometry::new(
            3,
            1,
            vec![
                SlotGeometry::new("1 / span 2", "1"),
                SlotGeometry::new("3", "1"),
            ],
        ));
        let assembler = Assembler::with_options(options);
        let doc = assembler
            .assemble(TemplateType::Custom, &[text("a", 0), text("b", 1)])
            .unwrap();
        assert_eq!(doc.layout().columns, 3);
        assert_eq!(doc.layout().areas[1].grid_column, "3");
    }

    #[test]
    fn test_custom_out_of_bounds_rejected() {
        let options = AssembleOptions::new().with_custom_geometry(CustomGeometry::new(
            2,
            1,
            vec![SlotGeometry::new("1 / 5", "1")],
        ));
        let err = Assembler::with_options(options)
            .assemble(TemplateType::Custom, &[text("a", 0)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DocumentInvalid(Violation::PlacementOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_retemplate() {
        let doc = assemble(TemplateType::TwoCol, &[text("a", 0), text("b", 1)]).unwrap();
        let moved = Assembler::new()
            .retemplate(&doc, TemplateType::FocusLeft)
            .unwrap();
        assert_eq!(moved.template(), TemplateType::FocusLeft);
        assert_eq!(moved.blocks(), doc.blocks());
        assert_eq!(moved.layout().areas[0].grid_column, "1 / 3");

        assert!(Assembler::new()
            .retemplate(&doc, TemplateType::Single)
            .is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = assemble(TemplateType::Quad, &[]).unwrap();
        assert!(doc.is_empty());
        assert!(doc.layout().is_empty());
    }
}
