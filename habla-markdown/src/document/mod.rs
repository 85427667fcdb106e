//! Editor document model
//!
//!     The rich-text editor hands us its document as TipTap `JSONContent`: a tree of
//!     `{type, attrs, content, marks, text}` objects keyed by a type string. We read it
//!     into [`Node`], a closed sum type with one variant per node kind the serializer
//!     understands, plus [`Node::Unknown`] so documents from newer editor versions
//!     still load (and still round-trip through JSON).
//!
//!     Reading is lenient in the same way the editor is: a missing or mistyped
//!     attribute falls back to its default instead of failing the whole document.
//!     Validating nostr pointers (hex keys, relay URLs) is left to encoding time.
//!
//!     The tree owns its children (`Vec<Node>`), so it is finite and acyclic by
//!     construction.

mod json;
mod marks;

pub use marks::{Mark, MarkKind};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the editor document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "json::RawNode", into = "json::RawNode")]
pub enum Node {
    /// Document root
    Doc(Vec<Node>),
    Paragraph(Vec<Node>),
    Heading(Heading),
    Blockquote(Vec<Node>),
    CodeBlock(CodeBlock),
    BulletList(Vec<Node>),
    OrderedList(Vec<Node>),
    ListItem(Vec<Node>),
    Image(Image),
    HorizontalRule,
    HardBreak,
    Text(Text),
    /// Profile reference (`npub` / `nprofile`)
    Mention(Mention),
    /// Event reference (`nevent`)
    NEvent(EventReference),
    /// Addressable event reference (`naddr`)
    NAddr(AddressReference),
    /// Any node type this crate does not know about
    Unknown(UnknownNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// 1..=6 when parsed or built with [`Node::heading`]; read it through
    /// [`Heading::clamped_level`]
    pub level: u8,
    pub content: Vec<Node>,
}

impl Heading {
    /// The level as rendered: 0 counts as 1, anything above 6 as 6.
    pub fn clamped_level(&self) -> u8 {
        self.level.clamp(1, 6)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Image {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: String,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mention {
    /// Hex public key
    pub pubkey: Option<String>,
    pub relays: Vec<String>,
    /// Display name shown by the editor
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventReference {
    /// Hex event id
    pub id: Option<String>,
    pub kind: Option<u64>,
    /// Hex public key of the event author
    pub author: Option<String>,
    pub relays: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressReference {
    /// The `d` tag of the addressable event
    pub identifier: Option<String>,
    pub kind: Option<u64>,
    /// Hex public key of the event author
    pub pubkey: Option<String>,
    pub relays: Vec<String>,
}

/// A node whose type is not part of the model.
///
/// `content` keeps the distinction between "absent" and "present but empty",
/// since the serializer only descends into unknown nodes that carry content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnknownNode {
    pub node_type: String,
    pub attrs: Map<String, Value>,
    pub content: Option<Vec<Node>>,
}

impl Node {
    /// The editor type name of this node (`"paragraph"`, `"codeBlock"`, ...).
    pub fn node_type(&self) -> &str {
        match self {
            Node::Doc(_) => "doc",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::Blockquote(_) => "blockquote",
            Node::CodeBlock(_) => "codeBlock",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::Image(_) => "image",
            Node::HorizontalRule => "horizontalRule",
            Node::HardBreak => "hardBreak",
            Node::Text(_) => "text",
            Node::Mention(_) => "mention",
            Node::NEvent(_) => "nevent",
            Node::NAddr(_) => "naddr",
            Node::Unknown(unknown) => &unknown.node_type,
        }
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::BulletList(children)
            | Node::OrderedList(children)
            | Node::ListItem(children) => children,
            Node::Heading(heading) => &heading.content,
            Node::CodeBlock(code) => &code.content,
            Node::Unknown(unknown) => unknown.content.as_deref().unwrap_or(&[]),
            Node::Image(_)
            | Node::HorizontalRule
            | Node::HardBreak
            | Node::Text(_)
            | Node::Mention(_)
            | Node::NEvent(_)
            | Node::NAddr(_) => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Doc(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::BulletList(children)
            | Node::OrderedList(children)
            | Node::ListItem(children) => Some(children),
            Node::Heading(heading) => Some(&mut heading.content),
            Node::CodeBlock(code) => Some(&mut code.content),
            Node::Unknown(unknown) => unknown.content.as_mut(),
            _ => None,
        }
    }

    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(Text {
            text: text.into(),
            marks: Vec::new(),
        })
    }

    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Node {
        Node::Text(Text {
            text: text.into(),
            marks,
        })
    }

    /// Paragraph holding a single unmarked text run.
    pub fn paragraph(text: impl Into<String>) -> Node {
        Node::Paragraph(vec![Node::text(text)])
    }

    /// Heading holding a single unmarked text run. Levels are clamped to 1..=6.
    pub fn heading(level: u8, text: impl Into<String>) -> Node {
        Node::Heading(Heading {
            level: level.clamp(1, 6),
            content: vec![Node::text(text)],
        })
    }

    /// List item holding one paragraph per entry of `paragraphs`.
    pub fn list_item<I, S>(paragraphs: I) -> Node
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::ListItem(paragraphs.into_iter().map(Node::paragraph).collect())
    }
}
