//! Content block types.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Rich text content
    Text,
    /// Image (PNG, JPEG, ...)
    Image,
    /// Video clip
    Video,
    /// Audio clip
    Audio,
    /// Downloadable document (PDF, slides, ...)
    Document,
}

impl BlockType {
    /// All block kinds, in declaration order.
    pub const ALL: [BlockType; 5] = [
        BlockType::Text,
        BlockType::Image,
        BlockType::Video,
        BlockType::Audio,
        BlockType::Document,
    ];

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Audio => "audio",
            BlockType::Document => "document",
        }
    }

    /// Check if this kind carries media data rather than text.
    pub fn is_media(&self) -> bool {
        !matches!(self, BlockType::Text)
    }

    /// MIME family expected for this kind (`None` for text and documents).
    pub fn mime_family(&self) -> Option<&'static str> {
        match self {
            BlockType::Image => Some("image"),
            BlockType::Video => Some("video"),
            BlockType::Audio => Some("audio"),
            BlockType::Text | BlockType::Document => None,
        }
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextBlockData {
    /// Rich text content as produced by the editor
    pub content: String,
}

impl TextBlockData {
    /// Create a text payload.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Payload of an image, video, audio, or document block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MediaBlockData {
    /// Location of the media file
    pub url: String,

    /// Original filename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Caption shown with the media
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// MIME type (e.g., "image/png")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl MediaBlockData {
    /// Create a media payload pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Set size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Block payload, discriminated by block kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockData {
    Text(TextBlockData),
    Image(MediaBlockData),
    Video(MediaBlockData),
    Audio(MediaBlockData),
    Document(MediaBlockData),
}

impl BlockData {
    /// Decode a JSON payload according to `kind`.
    ///
    /// Returns a human-readable reason when the payload does not have the
    /// shape `kind` requires.
    pub fn from_value(
        kind: BlockType,
        value: serde_json::Value,
    ) -> std::result::Result<Self, String> {
        if kind == BlockType::Text {
            let text: TextBlockData =
                serde_json::from_value(value).map_err(|e| e.to_string())?;
            return Ok(BlockData::Text(text));
        }

        let media: MediaBlockData = serde_json::from_value(value).map_err(|e| e.to_string())?;
        if media.url.trim().is_empty() {
            return Err("media url must not be empty".to_string());
        }
        Ok(BlockData::media(kind, media))
    }

    /// Wrap a media payload in the variant for `kind`.
    ///
    /// `BlockType::Text` yields an image block; callers decide the kind before
    /// reaching this point.
    fn media(kind: BlockType, media: MediaBlockData) -> Self {
        match kind {
            BlockType::Video => BlockData::Video(media),
            BlockType::Audio => BlockData::Audio(media),
            BlockType::Document => BlockData::Document(media),
            BlockType::Image | BlockType::Text => BlockData::Image(media),
        }
    }

    /// Kind of this payload.
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockData::Text(_) => BlockType::Text,
            BlockData::Image(_) => BlockType::Image,
            BlockData::Video(_) => BlockType::Video,
            BlockData::Audio(_) => BlockType::Audio,
            BlockData::Document(_) => BlockType::Document,
        }
    }

    /// Text payload, if this is a text block.
    pub fn as_text(&self) -> Option<&TextBlockData> {
        match self {
            BlockData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Media payload, if this is a media block.
    pub fn as_media(&self) -> Option<&MediaBlockData> {
        match self {
            BlockData::Text(_) => None,
            BlockData::Image(media)
            | BlockData::Video(media)
            | BlockData::Audio(media)
            | BlockData::Document(media) => Some(media),
        }
    }

    pub(crate) fn as_media_mut(&mut self) -> Option<&mut MediaBlockData> {
        match self {
            BlockData::Text(_) => None,
            BlockData::Image(media)
            | BlockData::Video(media)
            | BlockData::Audio(media)
            | BlockData::Document(media) => Some(media),
        }
    }
}

/// A content block within a topic document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireBlock")]
pub struct ContentBlock {
    /// Identifier, unique within a document
    pub id: String,

    /// Position in the document's total order
    pub order: i64,

    /// Typed payload
    pub data: BlockData,
}

impl ContentBlock {
    /// Create a block.
    pub fn new(id: impl Into<String>, order: i64, data: BlockData) -> Self {
        Self {
            id: id.into(),
            order,
            data,
        }
    }

    /// Create a text block.
    pub fn text(id: impl Into<String>, order: i64, content: impl Into<String>) -> Self {
        Self::new(id, order, BlockData::Text(TextBlockData::new(content)))
    }

    /// Create an image block.
    pub fn image(id: impl Into<String>, order: i64, url: impl Into<String>) -> Self {
        Self::new(id, order, BlockData::Image(MediaBlockData::new(url)))
    }

    /// Kind of this block.
    pub fn block_type(&self) -> BlockType {
        self.data.block_type()
    }

    /// Check if this block carries media.
    pub fn is_media(&self) -> bool {
        self.block_type().is_media()
    }

    /// Short one-line description used by text renderers and logs.
    pub fn summary(&self) -> String {
        match &self.data {
            BlockData::Text(text) => {
                let first_line = text.content.lines().next().unwrap_or("");
                let mut summary: String = first_line.chars().take(60).collect();
                if first_line.chars().count() > 60 {
                    summary.push('…');
                }
                summary
            }
            BlockData::Image(media)
            | BlockData::Video(media)
            | BlockData::Audio(media)
            | BlockData::Document(media) => media
                .caption
                .clone()
                .or_else(|| media.filename.clone())
                .unwrap_or_else(|| media.url.clone()),
        }
    }
}

impl Serialize for ContentBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ContentBlock", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.block_type())?;
        state.serialize_field("order", &self.order)?;
        match &self.data {
            BlockData::Text(text) => state.serialize_field("data", text)?,
            BlockData::Image(media)
            | BlockData::Video(media)
            | BlockData::Audio(media)
            | BlockData::Document(media) => state.serialize_field("data", media)?,
        }
        state.end()
    }
}

/// Persisted block shape, before the payload is checked against its kind.
#[derive(Deserialize)]
struct WireBlock {
    id: String,
    #[serde(rename = "type")]
    kind: BlockType,
    order: i64,
    data: serde_json::Value,
}

impl TryFrom<WireBlock> for ContentBlock {
    type Error = String;

    fn try_from(wire: WireBlock) -> std::result::Result<Self, Self::Error> {
        let data = BlockData::from_value(wire.kind, wire.data)
            .map_err(|reason| format!("block {}: {}", wire.id, reason))?;
        Ok(ContentBlock::new(wire.id, wire.order, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_type_parse() {
        assert_eq!("video".parse::<BlockType>(), Ok(BlockType::Video));
        assert_eq!("gif".parse::<BlockType>(), Err("gif".to_string()));
        assert!(!BlockType::Text.is_media());
        assert!(BlockType::Document.is_media());
    }

    #[test]
    fn test_media_requires_url() {
        let err = BlockData::from_value(BlockType::Image, json!({ "caption": "x" })).unwrap_err();
        assert!(err.contains("url"));

        let err = BlockData::from_value(BlockType::Audio, json!({ "url": "  " })).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn test_text_rejects_media_shape() {
        let result = BlockData::from_value(BlockType::Text, json!({ "url": "http://x/y.png" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_size_rejected() {
        let result =
            BlockData::from_value(BlockType::Video, json!({ "url": "a.mp4", "size": -4 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_wire_shape() {
        let block = ContentBlock::new(
            "b1",
            3,
            BlockData::Image(MediaBlockData::new("http://x/y.png").with_mime_type("image/png")),
        );
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "b1",
                "type": "image",
                "order": 3,
                "data": { "url": "http://x/y.png", "mimeType": "image/png" }
            })
        );
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let ok: ContentBlock = serde_json::from_value(json!({
            "id": "t", "type": "text", "order": 0, "data": { "content": "hi" }
        }))
        .unwrap();
        assert_eq!(ok.block_type(), BlockType::Text);

        let bad = serde_json::from_value::<ContentBlock>(json!({
            "id": "t", "type": "text", "order": 0, "data": { "url": "x" }
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_summary() {
        let block = ContentBlock::text("t", 0, "First line\nsecond");
        assert_eq!(block.summary(), "First line");

        let media = ContentBlock::new(
            "m",
            1,
            BlockData::Video(MediaBlockData::new("v.mp4").with_caption("Intro")),
        );
        assert_eq!(media.summary(), "Intro");
    }
}
