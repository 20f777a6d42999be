//! Assembly options and configuration.

use crate::catalog::CustomGeometry;

/// Options for assembling content documents.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Normalize text content to Unicode NFC
    pub normalize_text: bool,

    /// Fill in a missing media MIME type from the filename or URL
    pub infer_mime: bool,

    /// Reject media whose declared MIME family contradicts the block kind
    pub strict_mime: bool,

    /// Geometry used when the template is `custom`
    pub custom_geometry: Option<CustomGeometry>,
}

impl AssembleOptions {
    /// Create new assembly options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization of text content.
    pub fn with_text_normalization(mut self, normalize: bool) -> Self {
        self.normalize_text = normalize;
        self
    }

    /// Enable or disable MIME type inference.
    pub fn with_mime_inference(mut self, infer: bool) -> Self {
        self.infer_mime = infer;
        self
    }

    /// Reject media with a MIME family that does not fit the block kind.
    pub fn strict_mime(mut self) -> Self {
        self.strict_mime = true;
        self
    }

    /// Set the geometry for the `custom` template.
    pub fn with_custom_geometry(mut self, geometry: CustomGeometry) -> Self {
        self.custom_geometry = Some(geometry);
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            normalize_text: true,
            infer_mime: true,
            strict_mime: false,
            custom_geometry: None,
        }
    }
}
