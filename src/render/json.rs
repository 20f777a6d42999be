//! JSON persistence for topic documents.

use crate::error::Result;
use crate::model::{ContentDocument, PersistedDocument};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to its persisted JSON shape.
pub fn to_json(doc: &ContentDocument, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Read a persisted document and validate it.
///
/// Malformed JSON yields [`Error::Json`](crate::Error::Json); well-formed
/// JSON that breaks a document invariant yields
/// [`Error::DocumentInvalid`](crate::Error::DocumentInvalid) or the
/// block-level error of the offending block.
pub fn from_json(json: &str) -> Result<ContentDocument> {
    let persisted: PersistedDocument = serde_json::from_str(json)?;
    ContentDocument::try_from(persisted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::assemble;
    use crate::error::{Error, Violation};
    use crate::model::TemplateType;
    use crate::registry::RawBlock;
    use serde_json::{json, Value};

    fn doc() -> ContentDocument {
        assemble(
            TemplateType::TwoCol,
            &[
                RawBlock::new("text", json!({ "content": "a" })).with_id("t"),
                RawBlock::new("image", json!({ "url": "http://x/y.png" })).with_id("i"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&doc(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"gridColumn\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&doc(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_wire_shape() {
        let json = to_json(&doc(), JsonFormat::Compact).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["template"], "two-col");
        assert_eq!(value["blocks"][1]["type"], "image");
        assert_eq!(value["blocks"][1]["data"]["mimeType"], "image/png");
        assert_eq!(value["layout"]["areas"][0]["blockId"], "t");
        assert!(value["blocks"][1]["data"].get("caption").is_none());
    }

    #[test]
    fn test_from_json_validates() {
        let original = doc();
        let back = from_json(&to_json(&original, JsonFormat::Pretty).unwrap()).unwrap();
        assert_eq!(back, original);

        let mut value: Value = serde_json::to_value(&original).unwrap();
        value["layout"]["areas"][1]["blockId"] = json!("t");
        let err = from_json(&value.to_string()).unwrap_err();
        assert!(err.is_document_invalid());
        assert!(matches!(
            err,
            Error::DocumentInvalid(Violation::DuplicateAreaTarget { .. })
        ));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(from_json("{ not json"), Err(Error::Json(_))));
    }
}
