//! Grid layout types.

use serde::{Deserialize, Serialize};

/// Placement of one block inside the template grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutArea {
    /// Area identifier, unique within the layout
    pub id: String,

    /// Id of the block placed here
    pub block_id: String,

    /// Column placement expression (e.g., "1 / 3")
    pub grid_column: String,

    /// Row placement expression (e.g., "1 / 2")
    pub grid_row: String,
}

impl LayoutArea {
    /// Create a layout area.
    pub fn new(
        id: impl Into<String>,
        block_id: impl Into<String>,
        grid_column: impl Into<String>,
        grid_row: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            block_id: block_id.into(),
            grid_column: grid_column.into(),
            grid_row: grid_row.into(),
        }
    }
}

/// Concrete grid of a document: shape plus one area per block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLayout {
    /// Number of grid columns
    pub columns: u32,

    /// Number of grid rows
    pub rows: u32,

    /// Areas in slot order
    pub areas: Vec<LayoutArea>,
}

impl TemplateLayout {
    /// Create an empty layout with the given shape.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            areas: Vec::new(),
        }
    }

    /// Find the area holding `block_id`.
    pub fn area_for(&self, block_id: &str) -> Option<&LayoutArea> {
        self.areas.iter().find(|area| area.block_id == block_id)
    }

    /// Number of areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Check if the layout places no blocks.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_wire_names() {
        let area = LayoutArea::new("area-1", "b1", "1 / 2", "1 / 2");
        let json = serde_json::to_string(&area).unwrap();
        assert!(json.contains("\"blockId\":\"b1\""));
        assert!(json.contains("\"gridColumn\":\"1 / 2\""));
        assert!(json.contains("\"gridRow\":\"1 / 2\""));
    }

    #[test]
    fn test_area_for() {
        let mut layout = TemplateLayout::new(2, 1);
        layout
            .areas
            .push(LayoutArea::new("area-1", "a", "1 / 2", "1 / 2"));
        assert_eq!(layout.area_for("a").map(|a| a.id.as_str()), Some("area-1"));
        assert!(layout.area_for("b").is_none());
        assert_eq!(layout.len(), 1);
    }
}
