//! List item rendering.
//!
//! Nesting adds a flat two spaces per level whatever the parent marker's width,
//! and nested ordered lists restart at 1.

use super::serializer::MarkdownSerializer;
use crate::document::Node;
use crate::error::FormatError;

const INDENT: &str = "  ";

/// Render one list item with an already computed `marker` (`-`, `3.`).
///
/// The first paragraph goes on the marker line; every other child becomes
/// indented continuation lines. Lines are joined with a single `\n`.
pub fn render_list_item(
    item: &Node,
    marker: &str,
    serializer: &MarkdownSerializer<'_>,
) -> Result<String, FormatError> {
    let mut parts = Vec::new();
    let mut first_paragraph = true;

    for child in item.children() {
        match child {
            Node::Paragraph(content) => {
                let text = serializer.render_children(content)?;
                if first_paragraph {
                    parts.push(format!("{marker} {}", text.trim()));
                    first_paragraph = false;
                } else {
                    parts.push(format!("{INDENT}{}", text.trim()));
                }
            }
            Node::BulletList(_) | Node::OrderedList(_) => {
                let nested = serializer.render(child)?;
                let indented: Vec<String> = nested
                    .trim()
                    .split('\n')
                    .map(|line| format!("{INDENT}{line}"))
                    .collect();
                parts.push(indented.join("\n"));
            }
            other => {
                let rendered = serializer.render(other)?;
                parts.push(format!("{INDENT}{}", rendered.trim()));
            }
        }
    }

    Ok(parts.join("\n"))
}
