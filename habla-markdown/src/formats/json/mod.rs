//! Editor JSON format
//!
//! Reads and writes the TipTap `JSONContent` the editor stores and exchanges. This is
//! the input side of every conversion; serializing back is mostly useful for
//! inspecting what the lenient reader made of a document.
//!
//! # Options
//!
//! - `compact`: single-line output instead of pretty-printed.

use crate::document::Node;
use crate::error::FormatError;
use crate::format::{bool_option, Format};
use std::collections::HashMap;

/// Option: single-line output.
pub const COMPACT: &str = "compact";

/// Format implementation for editor JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "TipTap editor JSON document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(unknown) = options.keys().find(|key| key.as_str() != COMPACT) {
            return Err(FormatError::NotSupported(format!(
                "Unknown json option '{unknown}' (expected: compact)"
            )));
        }
        if bool_option(options, COMPACT)? {
            serde_json::to_string(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
        } else {
            self.serialize(doc)
        }
    }
}
