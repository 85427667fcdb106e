//! Markdown format implementation
//!
//! Export only: converts the editor document tree into the Markdown published as
//! the `content` of a long-form article.
//!
//! # Element Mapping Table
//!
//! | Node             | Markdown                          | Notes                                   |
//! |------------------|-----------------------------------|-----------------------------------------|
//! | doc              | children                          |                                         |
//! | paragraph        | text + blank line                 | empty paragraph → single `\n`           |
//! | heading          | `#`×level + text                  | level clamped to 1..=6                  |
//! | blockquote       | `> ` on every line                |                                         |
//! | codeBlock        | fenced with language              | content verbatim                        |
//! | bulletList       | `- item`                          | 2-space indent per nesting level        |
//! | orderedList      | `1. item`                         | nested lists restart at 1               |
//! | image            | `![alt](src "title")`             |                                         |
//! | horizontalRule   | `---`                             |                                         |
//! | hardBreak        | `\n`                              | inline                                  |
//! | mention          | `nostr:npub…` / `nostr:nprofile…` | nprofile when relay hints exist         |
//! | nevent           | `nostr:nevent…`                   |                                         |
//! | naddr            | `nostr:naddr…`                    |                                         |
//! | text marks       | `**` `*` `` ` `` `~~` `<u>` `==` `[](…)` | fixed nesting, see [`inline`]    |
//! | unknown          | children, or nothing              | reported through the diagnostic sink    |
//!
//! # Options
//!
//! - `ensure-spacing`: run [`crate::spacing::ensure_block_spacing`] on the output.
//! - `link-references`: turn plain-text `nostr:` URIs into reference nodes before
//!   rendering (see [`crate::references`]).

pub mod inline;
pub mod lists;
pub mod nostr;
pub mod serializer;

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::document::Node;
use crate::error::FormatError;
use crate::format::{bool_option, Format};
use crate::references::link_references;
use crate::spacing::ensure_block_spacing;
use serializer::MarkdownSerializer;
use std::collections::HashMap;
use std::sync::Arc;

/// Option: run the spacing normalizer on the output.
pub const ENSURE_SPACING: &str = "ensure-spacing";
/// Option: link plain-text `nostr:` URIs before rendering.
pub const LINK_REFERENCES: &str = "link-references";

const OPTIONS: &[&str] = &[ENSURE_SPACING, LINK_REFERENCES];

/// Format implementation for Markdown
#[derive(Clone)]
pub struct MarkdownFormat {
    sink: Arc<dyn DiagnosticSink>,
}

impl MarkdownFormat {
    /// Markdown format reporting diagnostics to `sink` instead of `tracing`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        MarkdownFormat { sink }
    }
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        MarkdownFormat {
            sink: Arc::new(TracingSink),
        }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown for long-form articles"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        MarkdownSerializer::new(self.sink.as_ref()).serialize(doc)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if let Some(unknown) = options.keys().find(|key| !OPTIONS.contains(&key.as_str())) {
            return Err(FormatError::NotSupported(format!(
                "Unknown markdown option '{unknown}' (expected one of: {})",
                OPTIONS.join(", ")
            )));
        }

        let markdown = if bool_option(options, LINK_REFERENCES)? {
            self.serialize(&link_references(doc))?
        } else {
            self.serialize(doc)?
        };

        if bool_option(options, ENSURE_SPACING)? {
            Ok(ensure_block_spacing(&markdown))
        } else {
            Ok(markdown)
        }
    }
}
