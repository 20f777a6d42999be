//! Error types for topicgrid library.

use std::io;
use thiserror::Error;

/// Result type alias for topicgrid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while composing or editing content documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing persisted documents.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A raw block declared a type outside the five known kinds.
    #[error("Block {index}: invalid block kind \"{kind}\"")]
    InvalidBlockKind {
        /// Position of the block in the caller's input
        index: usize,
        /// The rejected type string
        kind: String,
    },

    /// A block's data payload does not match the shape its type requires.
    #[error("Block {index}{}: data does not match its type: {reason}", fmt_block_id(.block_id))]
    SchemaMismatch {
        /// Position of the block in the caller's input
        index: usize,
        /// Block id, when the input carried one
        block_id: Option<String>,
        /// What was wrong with the payload
        reason: String,
    },

    /// The template cannot be described (custom template without geometry).
    #[error("Unsupported template: {0}")]
    UnsupportedTemplate(String),

    /// More blocks than the template offers slots.
    #[error("Template {template} offers {slots} slot(s) but {blocks} block(s) were given")]
    TooManyBlocks {
        /// Template name
        template: String,
        /// Number of blocks supplied
        blocks: usize,
        /// Number of slots offered by the template
        slots: usize,
    },

    /// Whole-document validation failed.
    #[error("Invalid document: {0}")]
    DocumentInvalid(#[from] Violation),

    /// An editing step referenced a node that is not (or no longer) in the tree.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

impl Error {
    /// Index of the offending block in the caller's input, if known.
    pub fn block_index(&self) -> Option<usize> {
        match self {
            Error::InvalidBlockKind { index, .. } | Error::SchemaMismatch { index, .. } => {
                Some(*index)
            }
            _ => None,
        }
    }

    /// Id of the offending block, if known.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Error::SchemaMismatch { block_id, .. } => block_id.as_deref(),
            Error::DocumentInvalid(violation) => violation.block_id(),
            _ => None,
        }
    }

    /// Check if this error came from whole-document validation.
    pub fn is_document_invalid(&self) -> bool {
        matches!(self, Error::DocumentInvalid(_))
    }
}

fn fmt_block_id(block_id: &Option<String>) -> String {
    match block_id {
        Some(id) => format!(" ({})", id),
        None => String::new(),
    }
}

/// The specific document invariant that was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A layout area points at a block id that is not in the document.
    #[error("area {area_id} references missing block {block_id}")]
    DanglingReference { area_id: String, block_id: String },

    /// Two layout areas target the same block.
    #[error("block {block_id} is targeted by more than one area")]
    DuplicateAreaTarget { block_id: String },

    /// A block has no layout area.
    #[error("block {block_id} has no layout area")]
    MissingArea { block_id: String },

    /// Two blocks share an id.
    #[error("duplicate block id {block_id}")]
    DuplicateBlockId { block_id: String },

    /// Two areas share an id.
    #[error("duplicate area id {area_id}")]
    DuplicateAreaId { area_id: String },

    /// Two blocks share an order value.
    #[error("block {block_id} repeats order {order}")]
    DuplicateOrder { block_id: String, order: i64 },

    /// The document holds more blocks than its template has slots.
    #[error("{blocks} block(s) exceed the template's {slots} slot(s)")]
    SlotOverflow { blocks: usize, slots: usize },

    /// The grid shape differs from the template's catalog entry.
    #[error("grid is {found_columns}x{found_rows}, template expects {columns}x{rows}")]
    GridMismatch {
        columns: u32,
        rows: u32,
        found_columns: u32,
        found_rows: u32,
    },

    /// The grid has zero columns or rows.
    #[error("grid must have at least one column and one row")]
    EmptyGrid,

    /// A placement expression could not be parsed.
    #[error("area {area_id} has an invalid placement \"{placement}\"")]
    InvalidPlacement { area_id: String, placement: String },

    /// An area does not sit on a free slot of its template.
    #[error("area {area_id} ({grid_column}, {grid_row}) is not a free template slot")]
    SlotMismatch {
        area_id: String,
        grid_column: String,
        grid_row: String,
    },

    /// A placement expression reaches outside the grid.
    #[error("area {area_id} placement \"{placement}\" lies outside the grid")]
    PlacementOutOfBounds { area_id: String, placement: String },
}

impl Violation {
    /// Block id involved in the violation, if any.
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Violation::DanglingReference { block_id, .. }
            | Violation::DuplicateAreaTarget { block_id }
            | Violation::MissingArea { block_id }
            | Violation::DuplicateBlockId { block_id }
            | Violation::DuplicateOrder { block_id, .. } => Some(block_id),
            _ => None,
        }
    }

    /// Area id involved in the violation, if any.
    pub fn area_id(&self) -> Option<&str> {
        match self {
            Violation::DanglingReference { area_id, .. }
            | Violation::DuplicateAreaId { area_id }
            | Violation::InvalidPlacement { area_id, .. }
            | Violation::PlacementOutOfBounds { area_id, .. }
            | Violation::SlotMismatch { area_id, .. } => Some(area_id),
            _ => None,
        }
    }
}
