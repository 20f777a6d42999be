//! # topicgrid
//!
//! Template-driven layout engine for mixed-media topic documents.
//!
//! A topic is a small set of content blocks (text, images, video, audio,
//! attachments) arranged into a named grid template. This library turns the
//! editor's raw blocks into a validated [`ContentDocument`], derives its grid
//! layout, and computes the selection decorations an editor overlays on
//! resizable media.
//!
//! ## Quick Start
//!
//! ```
//! use topicgrid::{assemble, to_json, JsonFormat, RawBlock, TemplateType};
//! use serde_json::json;
//!
//! fn main() -> topicgrid::Result<()> {
//!     let doc = assemble(
//!         TemplateType::TwoCol,
//!         &[
//!             RawBlock::new("text", json!({ "content": "Intro" })),
//!             RawBlock::new("image", json!({ "url": "https://cdn.example/chart.png" })),
//!         ],
//!     )?;
//!
//!     assert_eq!(doc.layout().areas.len(), 2);
//!     println!("{}", to_json(&doc, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Ten built-in templates** plus caller-defined `custom` grids
//! - **All-or-nothing assembly** with errors that name the offending block
//! - **Validated persistence**: loading a document re-checks every invariant
//! - **Selection decorations** for resizing fully selected media

pub mod assemble;
pub mod catalog;
pub mod decoration;
pub mod detect;
pub mod error;
pub mod model;
pub mod registry;
pub mod render;
pub mod resolver;

// Re-export commonly used types
pub use assemble::{AssembleOptions, Assembler};
pub use catalog::{CustomGeometry, LayoutCatalog, SlotGeometry, TemplateGeometry};
pub use decoration::{
    decorate, Decoration, DecorationSet, DecorationTag, EditorSession, EditorState, EditorTree,
    NodeKind, Selection, Step, TreeNode,
};
pub use error::{Error, Result, Violation};
pub use model::{
    BlockData, BlockType, ContentBlock, ContentDocument, GridPlacement, LayoutArea,
    MediaBlockData, PersistedDocument, TemplateLayout, TemplateType, TextBlockData,
};
pub use registry::{BlockRegistry, RawBlock};
pub use render::{from_json, to_json, DocumentStats, JsonFormat};
pub use resolver::LayoutResolver;

use std::fs;
use std::path::Path;

/// Assemble a document from raw editor blocks with default options.
///
/// # Example
///
/// ```
/// use topicgrid::{assemble, Error, RawBlock, TemplateType};
/// use serde_json::json;
///
/// let raw = vec![
///     RawBlock::new("text", json!({ "content": "a" })),
///     RawBlock::new("text", json!({ "content": "b" })),
/// ];
/// let err = assemble(TemplateType::Single, &raw).unwrap_err();
/// assert!(matches!(err, Error::TooManyBlocks { .. }));
/// ```
pub fn assemble(template: TemplateType, raw_blocks: &[RawBlock]) -> Result<ContentDocument> {
    assemble::assemble(template, raw_blocks)
}

/// Load and validate a persisted document.
///
/// # Example
///
/// ```no_run
/// use topicgrid::load_document;
///
/// let doc = load_document("topic.json").unwrap();
/// println!("{} block(s)", doc.block_count());
/// ```
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<ContentDocument> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let doc = from_json(&json)?;
    log::debug!("loaded {} document from {}", doc.template(), path.display());
    Ok(doc)
}

/// Persist a document as JSON.
pub fn save_document<P: AsRef<Path>>(
    path: P,
    doc: &ContentDocument,
    format: JsonFormat,
) -> Result<()> {
    fs::write(path, to_json(doc, format)?)?;
    Ok(())
}

/// Render a plain-text outline of a document.
pub fn to_text(doc: &ContentDocument) -> String {
    render::to_text(doc)
}

/// Builder for assembling topic documents.
///
/// # Example
///
/// ```
/// use topicgrid::{Composer, JsonFormat, TemplateType};
///
/// let json = Composer::new()
///     .strict_mime()
///     .assemble_json(
///         TemplateType::SidebarLeft,
///         r#"[
///             {"type": "image", "data": {"url": "nav.svg"}},
///             {"type": "text", "data": {"content": "Body"}}
///         ]"#,
///     )?
///     .to_json(JsonFormat::Compact)?;
/// assert!(json.contains("\"sidebar-left\""));
/// # Ok::<(), topicgrid::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: AssembleOptions,
}

impl Composer {
    /// Create a new Composer builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization of text content.
    pub fn with_text_normalization(mut self, normalize: bool) -> Self {
        self.options = self.options.with_text_normalization(normalize);
        self
    }

    /// Enable or disable MIME type inference.
    pub fn with_mime_inference(mut self, infer: bool) -> Self {
        self.options = self.options.with_mime_inference(infer);
        self
    }

    /// Reject media whose MIME family contradicts the block kind.
    pub fn strict_mime(mut self) -> Self {
        self.options = self.options.strict_mime();
        self
    }

    /// Set the geometry used for the `custom` template.
    pub fn with_custom_geometry(mut self, geometry: CustomGeometry) -> Self {
        self.options = self.options.with_custom_geometry(geometry);
        self
    }

    /// Assemble raw blocks and return a result wrapper.
    pub fn assemble(self, template: TemplateType, raw_blocks: &[RawBlock]) -> Result<Assembled> {
        let document = Assembler::with_options(self.options).assemble(template, raw_blocks)?;
        Ok(Assembled { document })
    }

    /// Assemble a JSON array of raw blocks.
    pub fn assemble_json(self, template: TemplateType, json: &str) -> Result<Assembled> {
        let raw_blocks: Vec<RawBlock> = serde_json::from_str(json)?;
        self.assemble(template, &raw_blocks)
    }
}

/// Result of assembling a topic document.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// The assembled document
    pub document: ContentDocument,
}

impl Assembled {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to a plain-text outline.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Collect document statistics.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::collect(&self.document)
    }

    /// Write the document to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        save_document(path, &self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    /// Take the document.
    pub fn into_document(self) -> ContentDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_composer_builder() {
        let composer = Composer::new()
            .with_text_normalization(false)
            .with_mime_inference(false)
            .strict_mime();

        assert!(!composer.options.normalize_text);
        assert!(!composer.options.infer_mime);
        assert!(composer.options.strict_mime);
    }

    #[test]
    fn test_composer_default() {
        let composer = Composer::default();
        assert!(composer.options.normalize_text);
        assert!(composer.options.custom_geometry.is_none());
    }

    #[test]
    fn test_assemble_json() {
        let assembled = Composer::new()
            .assemble_json(
                TemplateType::HeaderContent,
                r#"[
                    {"type": "text", "order": 0, "data": {"content": "Title"}},
                    {"type": "audio", "order": 1, "data": {"url": "talk.mp3"}}
                ]"#,
            )
            .unwrap();

        let doc = assembled.document();
        assert_eq!(doc.layout().rows, 3);
        assert_eq!(doc.layout().areas[1].grid_row, "2 / 4");
        assert_eq!(assembled.stats().audio_count, 1);
        assert!(assembled.to_text().contains("audio: talk.mp3"));
    }

    #[test]
    fn test_assemble_json_malformed() {
        let result = Composer::new().assemble_json(TemplateType::Single, "{");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_strict_mime_rejects_mismatch() {
        let raw = vec![RawBlock::new(
            "video",
            json!({ "url": "clip.mp4", "mimeType": "image/png" }),
        )];
        assert!(Composer::new().assemble(TemplateType::Single, &raw).is_ok());

        let err = Composer::new()
            .strict_mime()
            .assemble(TemplateType::Single, &raw)
            .unwrap_err();
        assert_eq!(err.block_index(), Some(0));
    }

    #[test]
    fn test_custom_without_geometry() {
        let result = Composer::new().assemble(TemplateType::Custom, &[]);
        assert!(matches!(result, Err(Error::UnsupportedTemplate(_))));
    }

    #[test]
    fn test_json_format_variants() {
        assert_eq!(JsonFormat::default(), JsonFormat::Pretty);
    }
}
