//! Whole-document validation.

use crate::catalog::{LayoutCatalog, SlotGeometry};
use crate::error::{Error, Result, Violation};
use crate::model::{ContentBlock, GridPlacement, TemplateLayout, TemplateType};
use std::collections::{HashMap, HashSet};

/// Check every document invariant for `blocks` laid out as `layout`.
///
/// Built-in templates (and `custom` when `catalog` carries a geometry) are
/// checked against their catalog shape and slot count. A `custom` document
/// without a catalog geometry declares its own grid through `layout`.
pub fn validate(
    template: TemplateType,
    blocks: &[ContentBlock],
    layout: &TemplateLayout,
    catalog: &LayoutCatalog,
) -> Result<()> {
    let geometry = match catalog.describe(template) {
        Ok(geometry) => Some(geometry),
        Err(Error::UnsupportedTemplate(_))
            if template.is_custom() && catalog.custom().is_none() =>
        {
            None
        }
        Err(e) => return Err(e),
    };

    check_blocks(blocks)?;
    check_areas(blocks, layout)?;

    if layout.columns == 0 || layout.rows == 0 {
        return Err(Violation::EmptyGrid.into());
    }

    let slots = match &geometry {
        Some(geometry) => {
            if (geometry.columns, geometry.rows) != (layout.columns, layout.rows) {
                return Err(Violation::GridMismatch {
                    columns: geometry.columns,
                    rows: geometry.rows,
                    found_columns: layout.columns,
                    found_rows: layout.rows,
                }
                .into());
            }
            geometry.slot_count
        }
        None => layout.areas.len(),
    };

    if blocks.len() > slots {
        return Err(Violation::SlotOverflow {
            blocks: blocks.len(),
            slots,
        }
        .into());
    }

    check_placements(layout)?;

    match &geometry {
        Some(geometry) => check_slots(layout, &geometry.slots),
        None => Ok(()),
    }
}

fn check_blocks(blocks: &[ContentBlock]) -> Result<()> {
    let mut ids = HashSet::with_capacity(blocks.len());
    let mut orders = HashMap::with_capacity(blocks.len());

    for block in blocks {
        if !ids.insert(block.id.as_str()) {
            return Err(Violation::DuplicateBlockId {
                block_id: block.id.clone(),
            }
            .into());
        }
        if orders.insert(block.order, block.id.as_str()).is_some() {
            return Err(Violation::DuplicateOrder {
                block_id: block.id.clone(),
                order: block.order,
            }
            .into());
        }
    }

    Ok(())
}

fn check_areas(blocks: &[ContentBlock], layout: &TemplateLayout) -> Result<()> {
    let block_ids: HashSet<&str> = blocks.iter().map(|block| block.id.as_str()).collect();
    let mut area_ids = HashSet::with_capacity(layout.areas.len());
    let mut targets = HashSet::with_capacity(layout.areas.len());

    for area in &layout.areas {
        if !area_ids.insert(area.id.as_str()) {
            return Err(Violation::DuplicateAreaId {
                area_id: area.id.clone(),
            }
            .into());
        }
        if !block_ids.contains(area.block_id.as_str()) {
            return Err(Violation::DanglingReference {
                area_id: area.id.clone(),
                block_id: area.block_id.clone(),
            }
            .into());
        }
        if !targets.insert(area.block_id.as_str()) {
            return Err(Violation::DuplicateAreaTarget {
                block_id: area.block_id.clone(),
            }
            .into());
        }
    }

    if let Some(block) = blocks.iter().find(|b| !targets.contains(b.id.as_str())) {
        return Err(Violation::MissingArea {
            block_id: block.id.clone(),
        }
        .into());
    }

    Ok(())
}

fn check_placements(layout: &TemplateLayout) -> Result<()> {
    for area in &layout.areas {
        for (placement, tracks) in [
            (&area.grid_column, layout.columns),
            (&area.grid_row, layout.rows),
        ] {
            let parsed =
                GridPlacement::parse(placement).ok_or_else(|| Violation::InvalidPlacement {
                    area_id: area.id.clone(),
                    placement: placement.clone(),
                })?;
            if !parsed.fits(tracks) {
                return Err(Violation::PlacementOutOfBounds {
                    area_id: area.id.clone(),
                    placement: placement.clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Every area must sit on a distinct slot the template offers.
fn check_slots(layout: &TemplateLayout, slots: &[SlotGeometry]) -> Result<()> {
    let mut used = vec![false; slots.len()];

    for area in &layout.areas {
        let free = slots.iter().enumerate().position(|(i, slot)| {
            !used[i] && slot.grid_column == area.grid_column && slot.grid_row == area.grid_row
        });
        match free {
            Some(i) => used[i] = true,
            None => {
                return Err(Violation::SlotMismatch {
                    area_id: area.id.clone(),
                    grid_column: area.grid_column.clone(),
                    grid_row: area.grid_row.clone(),
                }
                .into())
            }
        }
    }

    Ok(())
}
