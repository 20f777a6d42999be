//! Rendering module for persisting and describing documents.

mod json;
mod stats;
mod text;
pub mod visitor;

pub use json::{from_json, to_json, JsonFormat};
pub use stats::DocumentStats;
pub use text::{to_text, to_text_with_visitor};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, SkipMediaVisitor, VisitorAction,
};
