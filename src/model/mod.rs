//! Content model types.
//!
//! This module defines the data a topic's content is made of: typed blocks,
//! the template catalog's names, concrete grid layouts, and the assembled
//! document that ties them together. These types are the wire contract
//! with storage and with the editor front end.

mod block;
mod document;
mod layout;
mod template;

pub use block::{BlockData, BlockType, ContentBlock, MediaBlockData, TextBlockData};
pub use document::{ContentDocument, PersistedDocument};
pub use layout::{LayoutArea, TemplateLayout};
pub use template::{GridPlacement, PlacementEnd, TemplateType};
