//! Layout resolver: binds ordered blocks to a template's slots.

use crate::catalog::LayoutCatalog;
use crate::error::{Error, Result};
use crate::model::{ContentBlock, LayoutArea, TemplateLayout, TemplateType};

/// Id of the area occupying slot `index` (0-based).
///
/// Area ids depend only on the slot, so resolving an unchanged block list
/// again yields identical ids.
pub fn area_id(index: usize) -> String {
    format!("area-{}", index + 1)
}

/// Computes concrete grid areas for a block set.
#[derive(Debug, Clone, Copy)]
pub struct LayoutResolver<'a> {
    catalog: &'a LayoutCatalog,
}

impl<'a> LayoutResolver<'a> {
    /// Create a resolver backed by `catalog`.
    pub fn new(catalog: &'a LayoutCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve `blocks` into `template`.
    ///
    /// Blocks are assigned to slots in ascending `order`; the i-th block
    /// takes the i-th slot. Unused slots produce no area. Fails with
    /// [`Error::TooManyBlocks`] before any area is computed when the
    /// template has fewer slots than blocks.
    pub fn resolve(
        &self,
        blocks: &[ContentBlock],
        template: TemplateType,
    ) -> Result<TemplateLayout> {
        let geometry = self.catalog.describe(template)?;

        if blocks.len() > geometry.slot_count {
            return Err(Error::TooManyBlocks {
                template: template.to_string(),
                blocks: blocks.len(),
                slots: geometry.slot_count,
            });
        }

        let mut ordered: Vec<&ContentBlock> = blocks.iter().collect();
        ordered.sort_by_key(|block| block.order);

        let areas = ordered
            .iter()
            .zip(&geometry.slots)
            .enumerate()
            .map(|(index, (block, slot))| {
                LayoutArea::new(
                    area_id(index),
                    block.id.clone(),
                    slot.grid_column.clone(),
                    slot.grid_row.clone(),
                )
            })
            .collect::<Vec<_>>();

        log::debug!(
            "resolved {} block(s) into {} ({}x{}, {} free slot(s))",
            areas.len(),
            template,
            geometry.columns,
            geometry.rows,
            geometry.slot_count - areas.len()
        );

        Ok(TemplateLayout {
            columns: geometry.columns,
            rows: geometry.rows,
            areas,
        })
    }
}

/// Resolve `blocks` into a built-in `template`.
pub fn resolve(blocks: &[ContentBlock], template: TemplateType) -> Result<TemplateLayout> {
    LayoutResolver::new(&LayoutCatalog::new()).resolve(blocks, template)
}
