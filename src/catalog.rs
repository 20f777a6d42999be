//! Layout catalog: the fixed grid geometry of every template.
//!
//! Template-to-grid knowledge lives only here. The resolver and the
//! document validator consult the catalog instead of hard-coding shapes.
//!
//! # Example
//!
//! ```
//! use topicgrid::catalog::LayoutCatalog;
//! use topicgrid::model::TemplateType;
//!
//! let geometry = LayoutCatalog::new().describe(TemplateType::TwoCol).unwrap();
//! assert_eq!((geometry.columns, geometry.rows), (2, 1));
//! assert_eq!(geometry.slot_count, 2);
//! ```

use crate::error::{Error, Result};
use crate::model::TemplateType;
use serde::{Deserialize, Serialize};

/// One placement region offered by a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotGeometry {
    /// Column placement expression
    pub grid_column: String,
    /// Row placement expression
    pub grid_row: String,
}

impl SlotGeometry {
    /// Create a slot.
    pub fn new(grid_column: impl Into<String>, grid_row: impl Into<String>) -> Self {
        Self {
            grid_column: grid_column.into(),
            grid_row: grid_row.into(),
        }
    }
}

/// Grid shape and ordered slots of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGeometry {
    /// Number of grid columns
    pub columns: u32,
    /// Number of grid rows
    pub rows: u32,
    /// Number of distinct placement regions
    pub slot_count: usize,
    /// Slots in assignment order
    pub slots: Vec<SlotGeometry>,
}

/// Caller-supplied geometry for the `custom` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomGeometry {
    /// Number of grid columns
    pub columns: u32,
    /// Number of grid rows
    pub rows: u32,
    /// Slots in assignment order
    pub slots: Vec<SlotGeometry>,
}

impl CustomGeometry {
    /// Create a custom geometry.
    pub fn new(columns: u32, rows: u32, slots: Vec<SlotGeometry>) -> Self {
        Self {
            columns,
            rows,
            slots,
        }
    }
}

/// (columns, rows, slots as (gridColumn, gridRow))
type Entry = (u32, u32, &'static [(&'static str, &'static str)]);

fn builtin(template: TemplateType) -> Option<Entry> {
    let entry: Entry = match template {
        TemplateType::Single => (1, 1, &[("1 / 2", "1 / 2")]),
        TemplateType::TwoCol => (2, 1, &[("1 / 2", "1 / 2"), ("2 / 3", "1 / 2")]),
        TemplateType::TwoRow => (1, 2, &[("1 / 2", "1 / 2"), ("1 / 2", "2 / 3")]),
        TemplateType::Triple => (
            3,
            1,
            &[("1 / 2", "1 / 2"), ("2 / 3", "1 / 2"), ("3 / 4", "1 / 2")],
        ),
        TemplateType::Quad => (
            2,
            2,
            &[
                ("1 / 2", "1 / 2"),
                ("2 / 3", "1 / 2"),
                ("1 / 2", "2 / 3"),
                ("2 / 3", "2 / 3"),
            ],
        ),
        TemplateType::SidebarLeft => (4, 1, &[("1 / 2", "1 / 2"), ("2 / 5", "1 / 2")]),
        TemplateType::SidebarRight => (4, 1, &[("1 / 4", "1 / 2"), ("4 / 5", "1 / 2")]),
        TemplateType::HeaderContent => (1, 3, &[("1 / 2", "1 / 2"), ("1 / 2", "2 / 4")]),
        TemplateType::FocusLeft => (3, 1, &[("1 / 3", "1 / 2"), ("3 / 4", "1 / 2")]),
        TemplateType::FocusRight => (3, 1, &[("1 / 2", "1 / 2"), ("2 / 4", "1 / 2")]),
        TemplateType::Custom => return None,
    };
    Some(entry)
}

/// Lookup table from template to geometry.
///
/// The built-in table is fixed. A catalog may additionally carry one custom
/// geometry, which is what `describe(TemplateType::Custom)` returns.
#[derive(Debug, Clone, Default)]
pub struct LayoutCatalog {
    custom: Option<CustomGeometry>,
}

impl LayoutCatalog {
    /// Create a catalog with only the built-in templates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the geometry used for the `custom` template.
    pub fn with_custom(mut self, geometry: CustomGeometry) -> Self {
        self.custom = Some(geometry);
        self
    }

    /// Custom geometry, if one was supplied.
    pub fn custom(&self) -> Option<&CustomGeometry> {
        self.custom.as_ref()
    }

    /// Describe the grid of `template`.
    pub fn describe(&self, template: TemplateType) -> Result<TemplateGeometry> {
        if let Some((columns, rows, slots)) = builtin(template) {
            return Ok(TemplateGeometry {
                columns,
                rows,
                slot_count: slots.len(),
                slots: slots
                    .iter()
                    .map(|(column, row)| SlotGeometry::new(*column, *row))
                    .collect(),
            });
        }

        let custom = self.custom.as_ref().ok_or_else(|| {
            Error::UnsupportedTemplate("custom template requires a supplied geometry".into())
        })?;

        if custom.columns == 0 || custom.rows == 0 {
            return Err(Error::UnsupportedTemplate(format!(
                "custom grid must have at least one column and row (got {}x{})",
                custom.columns, custom.rows
            )));
        }
        if custom.slots.is_empty() {
            return Err(Error::UnsupportedTemplate(
                "custom geometry declares no slots".into(),
            ));
        }

        Ok(TemplateGeometry {
            columns: custom.columns,
            rows: custom.rows,
            slot_count: custom.slots.len(),
            slots: custom.slots.clone(),
        })
    }

    /// Slot count of `template`, if it can be described.
    pub fn slot_count(&self, template: TemplateType) -> Option<usize> {
        self.describe(template).ok().map(|g| g.slot_count)
    }

    /// All built-in templates.
    pub fn templates() -> &'static [TemplateType] {
        &TemplateType::BUILT_IN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridPlacement;

    #[test]
    fn test_slot_counts() {
        let catalog = LayoutCatalog::new();
        let expected = [
            (TemplateType::Single, 1),
            (TemplateType::TwoCol, 2),
            (TemplateType::TwoRow, 2),
            (TemplateType::Triple, 3),
            (TemplateType::Quad, 4),
            (TemplateType::SidebarLeft, 2),
            (TemplateType::SidebarRight, 2),
            (TemplateType::HeaderContent, 2),
            (TemplateType::FocusLeft, 2),
            (TemplateType::FocusRight, 2),
        ];
        for (template, slots) in expected {
            assert_eq!(catalog.slot_count(template), Some(slots), "{}", template);
        }
    }

    #[test]
    fn test_builtin_slots_fit_grid() {
        let catalog = LayoutCatalog::new();
        for template in LayoutCatalog::templates() {
            let geometry = catalog.describe(*template).unwrap();
            assert_eq!(geometry.slots.len(), geometry.slot_count);
            for slot in &geometry.slots {
                let column = GridPlacement::parse(&slot.grid_column).unwrap();
                let row = GridPlacement::parse(&slot.grid_row).unwrap();
                assert!(column.fits(geometry.columns), "{} {:?}", template, slot);
                assert!(row.fits(geometry.rows), "{} {:?}", template, slot);
            }
        }
    }

    #[test]
    fn test_custom_requires_geometry() {
        let catalog = LayoutCatalog::new();
        assert!(matches!(
            catalog.describe(TemplateType::Custom),
            Err(Error::UnsupportedTemplate(_))
        ));
    }

    #[test]
    fn test_custom_geometry() {
        let catalog = LayoutCatalog::new().with_custom(CustomGeometry::new(
            3,
            2,
            vec![
                SlotGeometry::new("1 / 4", "1 / 2"),
                SlotGeometry::new("1 / 2", "2 / 3"),
                SlotGeometry::new("2 / 4", "2 / 3"),
            ],
        ));
        let geometry = catalog.describe(TemplateType::Custom).unwrap();
        assert_eq!(geometry.slot_count, 3);
        assert_eq!(geometry.columns, 3);
    }

    #[test]
    fn test_custom_empty_grid_rejected() {
        let catalog = LayoutCatalog::new().with_custom(CustomGeometry::new(
            0,
            1,
            vec![SlotGeometry::new("1", "1")],
        ));
        assert!(catalog.describe(TemplateType::Custom).is_err());

        let catalog = LayoutCatalog::new().with_custom(CustomGeometry::new(2, 1, vec![]));
        assert!(catalog.describe(TemplateType::Custom).is_err());
    }
}
