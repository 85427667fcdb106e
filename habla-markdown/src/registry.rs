//! Format lookup by name or file extension
//!
//! Front ends never name a format type directly: the CLI and [`crate::export`] resolve
//! `"json"` / `"markdown"` (or a file extension) here and go through the [`Format`] trait.

use crate::document::Node;
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::{JsonFormat, MarkdownFormat};
use std::collections::HashMap;
use std::path::Path;

/// The formats available to a front end, kept in name order.
pub struct FormatRegistry {
    formats: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formats: Vec::new(),
        }
    }

    /// Editor JSON and Markdown, with diagnostics going to `tracing`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat);
        registry.register(MarkdownFormat::default());
        registry
    }

    /// Add `format`, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats.retain(|existing| existing.name() != format.name());
        let at = self
            .formats
            .partition_point(|existing| existing.name() < format.name());
        self.formats.insert(at, Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .iter()
            .find(|format| format.name() == name)
            .map(|format| format.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Registered formats in name order.
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> {
        self.formats.iter().map(|format| format.as_ref())
    }

    /// Name of the format claiming the extension of `filename`. Extensions compare
    /// ASCII case-insensitively, so `Draft.JSON` is editor JSON.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats()
            .find(|format| {
                format
                    .file_extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(extension))
            })
            .map(|format| format.name().to_string())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Node, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "'{format}' is an export-only format and cannot be read"
            )));
        }
        fmt.parse(source)
    }

    pub fn serialize(&self, doc: &Node, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        doc: &Node,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "'{format}' is an import-only format and cannot be written"
            )));
        }
        fmt.serialize_with_options(doc, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
