//! Document export pipeline.
//!
//! One call that picks the format, serializes the editor document and optionally
//! writes the result to disk. Use this from front ends ("Export as Markdown",
//! the `habla` CLI); for more control use [`FormatRegistry`] directly.

use crate::document::Node;
use crate::error::FormatError;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to export a document.
///
/// ```ignore
/// let spec = ExportSpec::new(&doc, "markdown")
///     .with_output_path("article.md")
///     .with_option("ensure-spacing", "true");
/// ```
///
/// Without an output path the serialized text is returned in memory.
#[derive(Debug)]
pub struct ExportSpec<'a> {
    /// The editor document to convert.
    pub document: &'a Node,
    /// Target format name (e.g., "markdown", "json").
    pub format: &'a str,
    /// Optional file path for writing output.
    pub output: Option<PathBuf>,
    /// Format-specific options.
    pub options: HashMap<String, String>,
}

impl<'a> ExportSpec<'a> {
    pub fn new(document: &'a Node, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// The output of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportResult {
    /// Serialized content (no output path was given).
    InMemory(String),
    /// Path of the written file.
    File(PathBuf),
}

/// Export with the default registry.
pub fn export(spec: ExportSpec<'_>) -> Result<ExportResult, FormatError> {
    export_with(&FormatRegistry::with_defaults(), spec)
}

/// Export using the formats of `registry`.
///
/// # Errors
///
/// Returns [`FormatError`] if the format is unknown or cannot serialize, if
/// serialization fails, or if the output file cannot be written.
pub fn export_with(
    registry: &FormatRegistry,
    spec: ExportSpec<'_>,
) -> Result<ExportResult, FormatError> {
    let text = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match spec.output {
        Some(path) => {
            fs::write(&path, text).map_err(|err| {
                FormatError::Io(format!("cannot write {}: {err}", path.display()))
            })?;
            tracing::debug!(path = %path.display(), format = spec.format, "exported document");
            Ok(ExportResult::File(path))
        }
        None => Ok(ExportResult::InMemory(text)),
    }
}
