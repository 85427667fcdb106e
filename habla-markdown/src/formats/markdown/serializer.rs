//! Markdown serialization (editor document → Markdown)
//!
//! A depth-first walk over [`Node`]. Every block handler ends its fragment with
//! `"\n\n"`, so consecutive blocks are separated by a blank line without any
//! post-processing; the top-level entry point only trims the ends.

use super::{inline, lists, nostr};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::document::{Image, Node, UnknownNode};
use crate::error::FormatError;

/// Serialize a document to Markdown, reporting diagnostics through `tracing`.
pub fn serialize_to_markdown(doc: &Node) -> Result<String, FormatError> {
    MarkdownSerializer::new(&TracingSink).serialize(doc)
}

/// Serialize a document to Markdown, reporting diagnostics to `sink`.
pub fn serialize_to_markdown_with(
    doc: &Node,
    sink: &dyn DiagnosticSink,
) -> Result<String, FormatError> {
    MarkdownSerializer::new(sink).serialize(doc)
}

/// Stateless renderer; the sink is the only thing it holds.
pub struct MarkdownSerializer<'a> {
    sink: &'a dyn DiagnosticSink,
}

impl<'a> MarkdownSerializer<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink) -> Self {
        MarkdownSerializer { sink }
    }

    /// Render `doc` and trim leading/trailing whitespace.
    pub fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(self.render(doc)?.trim().to_string())
    }

    /// Render a single node to its Markdown fragment.
    pub fn render(&self, node: &Node) -> Result<String, FormatError> {
        let fragment = match node {
            Node::Doc(children) | Node::ListItem(children) => self.render_children(children)?,
            Node::Paragraph(children) => {
                let content = self.render_children(children)?;
                if content.trim().is_empty() {
                    "\n".to_string()
                } else {
                    format!("{content}\n\n")
                }
            }
            Node::Heading(heading) => {
                let content = self.render_children(&heading.content)?;
                let hashes = "#".repeat(usize::from(heading.clamped_level()));
                format!("{hashes} {content}\n\n")
            }
            Node::Blockquote(children) => {
                let content = self.render_children(children)?;
                let quoted: Vec<String> = content
                    .trim()
                    .split('\n')
                    .map(|line| format!("> {line}"))
                    .collect();
                format!("{}\n\n", quoted.join("\n"))
            }
            Node::CodeBlock(code) => {
                let language = code.language.as_deref().unwrap_or_default();
                let content = self.render_children(&code.content)?;
                format!("```{language}\n{content}\n```\n\n")
            }
            Node::BulletList(items) => self.render_list(items, |_| "-".to_string())?,
            Node::OrderedList(items) => self.render_list(items, |index| format!("{}.", index + 1))?,
            Node::Image(image) => render_image(image),
            Node::HorizontalRule => "---\n\n".to_string(),
            Node::HardBreak => "\n".to_string(),
            Node::Text(text) => inline::apply_marks(&text.text, &text.marks),
            Node::Mention(mention) => nostr::mention_uri(mention)?,
            Node::NEvent(event) => nostr::event_uri(event)?,
            Node::NAddr(address) => nostr::address_uri(address)?,
            Node::Unknown(unknown) => self.render_unknown(unknown)?,
        };
        Ok(fragment)
    }

    /// Render and concatenate `children` in order.
    pub fn render_children(&self, children: &[Node]) -> Result<String, FormatError> {
        children.iter().map(|child| self.render(child)).collect()
    }

    fn render_list(
        &self,
        items: &[Node],
        marker: impl Fn(usize) -> String,
    ) -> Result<String, FormatError> {
        let rendered = items
            .iter()
            .enumerate()
            .map(|(index, item)| lists::render_list_item(item, &marker(index), self))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}\n\n", rendered.join("\n")))
    }

    fn render_unknown(&self, unknown: &UnknownNode) -> Result<String, FormatError> {
        let node_type = unknown.node_type.as_str();
        match &unknown.content {
            Some(children) => {
                if !node_type.is_empty() && node_type != "doc" {
                    self.sink.emit(Diagnostic::UnknownNode {
                        node_type: node_type.to_string(),
                    });
                }
                self.render_children(children)
            }
            None => {
                if !node_type.is_empty() && node_type != "text" {
                    self.sink.emit(Diagnostic::UnhandledNode {
                        node_type: node_type.to_string(),
                    });
                }
                Ok(String::new())
            }
        }
    }
}

fn render_image(image: &Image) -> String {
    let alt = image.alt.as_deref().unwrap_or_default();
    let src = image.src.as_deref().unwrap_or_default();
    let title = match image.title.as_deref() {
        Some(title) if !title.is_empty() => format!(" \"{title}\""),
        _ => String::new(),
    };
    format!("![{alt}]({src}{title})\n\n")
}
