//! Plain-text extraction from rich document blocks.
//!
//! Item descriptions arrive as a list of [`DocumentBlock`]s whose `content`
//! is itself a JSON document. Two payload shapes are recognised:
//!
//! - **image**: carries an `assetId`, or a `url` pointing into `resources`
//! - **text**: carries a `deltaFormat` array of insert operations
//!
//! Everything else is skipped. Extraction never fails: a broken block
//! contributes nothing and the rest of the document is still returned.

use deskmate_core::DocumentBlock;
use serde_json::{Map, Value};
use tracing::warn;

const ASSET_ID_FIELD: &str = "assetId";
const URL_FIELD: &str = "url";
const RESOURCE_URL_MARKER: &str = "resources";
const DELTA_FIELD: &str = "deltaFormat";
const INSERT_FIELD: &str = "insert";

/// Contribution of a text block with no insert operations.
const EMPTY_PARAGRAPH: &str = "\n";

/// Separator placed between contributing blocks.
const BLOCK_SEPARATOR: &str = "\n";

/// Shape of a decoded block payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBlockContent<'a> {
    /// Embedded image or attachment
    Image,
    /// Delta-encoded text, one value per insert operation
    Text(&'a [Value]),
    /// Neither of the above
    Unrecognized,
}

/// Why a block contributed no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `content` missing or empty
    EmptyContent,
    /// `content` is not valid JSON
    MalformedContent,
    /// Payload is an image
    Image,
    /// Payload has neither the image nor the text shape
    UnrecognizedShape,
    /// Text payload whose inserts are all whitespace
    BlankText,
}

/// Result of processing a single block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOutcome {
    Text(String),
    Skipped(SkipReason),
}

impl BlockOutcome {
    /// Text contributed by the block, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            BlockOutcome::Text(text) => Some(text),
            BlockOutcome::Skipped(_) => None,
        }
    }
}

/// Classify a decoded payload. The image check runs before the text check.
pub fn classify(payload: &Value) -> ParsedBlockContent<'_> {
    let Some(object) = payload.as_object() else {
        return ParsedBlockContent::Unrecognized;
    };

    if is_image(object) {
        return ParsedBlockContent::Image;
    }

    match object.get(DELTA_FIELD) {
        Some(Value::Array(ops)) => ParsedBlockContent::Text(ops),
        _ => ParsedBlockContent::Unrecognized,
    }
}

/// An `assetId` key counts even when its value is `null`.
///
/// A string `url` is a plain substring match, so any URL mentioning
/// `resources` is treated as an image. An array `url` matches when one of
/// its elements is exactly `resources`.
fn is_image(object: &Map<String, Value>) -> bool {
    if object.contains_key(ASSET_ID_FIELD) {
        return true;
    }

    match object.get(URL_FIELD) {
        Some(Value::String(url)) => url.contains(RESOURCE_URL_MARKER),
        Some(Value::Array(urls)) => urls
            .iter()
            .any(|u| u.as_str() == Some(RESOURCE_URL_MARKER)),
        _ => false,
    }
}

/// Text of a delta operation list.
///
/// An empty list yields a single newline so blank paragraphs keep their
/// spacing. A list whose inserts are all whitespace yields `None`.
pub fn delta_text(ops: &[Value]) -> Option<String> {
    if ops.is_empty() {
        return Some(EMPTY_PARAGRAPH.to_string());
    }

    let text: String = ops
        .iter()
        .map(|op| op.get(INSERT_FIELD).and_then(Value::as_str).unwrap_or(""))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Process one block.
pub fn extract_block(block: &DocumentBlock) -> BlockOutcome {
    let content = match block.content.as_deref() {
        Some(content) if !content.is_empty() => content,
        _ => return BlockOutcome::Skipped(SkipReason::EmptyContent),
    };

    let payload: Value = match serde_json::from_str(content) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(
                block_id = %block.id,
                doc_id = %block.doc_id,
                error = %e,
                "Skipped block with malformed JSON"
            );
            return BlockOutcome::Skipped(SkipReason::MalformedContent);
        }
    };

    match classify(&payload) {
        ParsedBlockContent::Image => BlockOutcome::Skipped(SkipReason::Image),
        ParsedBlockContent::Text(ops) => match delta_text(ops) {
            Some(text) => BlockOutcome::Text(text),
            None => BlockOutcome::Skipped(SkipReason::BlankText),
        },
        ParsedBlockContent::Unrecognized => BlockOutcome::Skipped(SkipReason::UnrecognizedShape),
    }
}

/// Extract readable text from a list of document blocks.
///
/// Contributions are joined with a newline in input order and the result is
/// trimmed at both ends. Returns an empty string when nothing contributes.
pub fn extract_block_contents(blocks: &[DocumentBlock]) -> String {
    let parts: Vec<String> = blocks
        .iter()
        .filter_map(|block| extract_block(block).into_text())
        .collect();

    parts.join(BLOCK_SEPARATOR).trim().to_string()
}
