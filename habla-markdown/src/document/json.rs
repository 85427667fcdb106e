//! TipTap `JSONContent` interchange for [`Node`].

use super::{
    AddressReference, CodeBlock, EventReference, Heading, Image, Mark, Mention, Node, Text,
    UnknownNode,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The loosely typed shape the editor emits. Every field may be absent or null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attrs: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marks: Option<Vec<Mark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl From<RawNode> for Node {
    fn from(raw: RawNode) -> Self {
        let attrs = raw.attrs.unwrap_or_default();
        let node_type = raw.node_type.unwrap_or_default();
        let content = raw.content;

        match node_type.as_str() {
            "doc" => Node::Doc(content.unwrap_or_default()),
            "paragraph" => Node::Paragraph(content.unwrap_or_default()),
            "heading" => Node::Heading(Heading {
                level: heading_level(&attrs),
                content: content.unwrap_or_default(),
            }),
            "blockquote" => Node::Blockquote(content.unwrap_or_default()),
            "codeBlock" => Node::CodeBlock(CodeBlock {
                language: string_attr(&attrs, "language"),
                content: content.unwrap_or_default(),
            }),
            "bulletList" => Node::BulletList(content.unwrap_or_default()),
            "orderedList" => Node::OrderedList(content.unwrap_or_default()),
            "listItem" => Node::ListItem(content.unwrap_or_default()),
            "image" => Node::Image(Image {
                src: string_attr(&attrs, "src"),
                alt: string_attr(&attrs, "alt"),
                title: string_attr(&attrs, "title"),
            }),
            "horizontalRule" => Node::HorizontalRule,
            "hardBreak" => Node::HardBreak,
            "text" => Node::Text(Text {
                text: raw.text.unwrap_or_default(),
                marks: raw.marks.unwrap_or_default(),
            }),
            "mention" => Node::Mention(Mention {
                pubkey: string_attr(&attrs, "pubkey"),
                relays: relays_attr(&attrs),
                name: string_attr(&attrs, "name"),
            }),
            "nevent" => Node::NEvent(EventReference {
                id: string_attr(&attrs, "id"),
                kind: kind_attr(&attrs),
                author: string_attr(&attrs, "author"),
                relays: relays_attr(&attrs),
            }),
            "naddr" => Node::NAddr(AddressReference {
                identifier: string_attr(&attrs, "identifier"),
                kind: kind_attr(&attrs),
                pubkey: string_attr(&attrs, "pubkey"),
                relays: relays_attr(&attrs),
            }),
            _ => Node::Unknown(UnknownNode {
                node_type,
                attrs,
                content,
            }),
        }
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let node_type = Some(node.node_type().to_string());
        let mut attrs = Map::new();
        let mut raw = RawNode::default();

        match node {
            Node::Doc(children)
            | Node::Paragraph(children)
            | Node::Blockquote(children)
            | Node::BulletList(children)
            | Node::OrderedList(children)
            | Node::ListItem(children) => raw.content = non_empty(children),
            Node::Heading(heading) => {
                attrs.insert("level".to_string(), Value::from(heading.level));
                raw.content = non_empty(heading.content);
            }
            Node::CodeBlock(code) => {
                insert_opt(&mut attrs, "language", code.language);
                raw.content = non_empty(code.content);
            }
            Node::Image(image) => {
                insert_opt(&mut attrs, "src", image.src);
                insert_opt(&mut attrs, "alt", image.alt);
                insert_opt(&mut attrs, "title", image.title);
            }
            Node::HorizontalRule | Node::HardBreak => {}
            Node::Text(text) => {
                raw.text = Some(text.text);
                if !text.marks.is_empty() {
                    raw.marks = Some(text.marks);
                }
            }
            Node::Mention(mention) => {
                insert_opt(&mut attrs, "pubkey", mention.pubkey);
                insert_opt(&mut attrs, "name", mention.name);
                attrs.insert("relays".to_string(), Value::from(mention.relays));
            }
            Node::NEvent(event) => {
                insert_opt(&mut attrs, "id", event.id);
                if let Some(kind) = event.kind {
                    attrs.insert("kind".to_string(), Value::from(kind));
                }
                insert_opt(&mut attrs, "author", event.author);
                attrs.insert("relays".to_string(), Value::from(event.relays));
            }
            Node::NAddr(address) => {
                insert_opt(&mut attrs, "identifier", address.identifier);
                if let Some(kind) = address.kind {
                    attrs.insert("kind".to_string(), Value::from(kind));
                }
                insert_opt(&mut attrs, "pubkey", address.pubkey);
                attrs.insert("relays".to_string(), Value::from(address.relays));
            }
            Node::Unknown(unknown) => {
                attrs = unknown.attrs;
                raw.content = unknown.content;
            }
        }

        raw.node_type = node_type;
        if !attrs.is_empty() {
            raw.attrs = Some(attrs);
        }
        raw
    }
}

fn non_empty(children: Vec<Node>) -> Option<Vec<Node>> {
    if children.is_empty() {
        None
    } else {
        Some(children)
    }
}

fn insert_opt(attrs: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(value) = value {
        attrs.insert(key.to_string(), Value::String(value));
    }
}

fn string_attr(attrs: &Map<String, Value>, key: &str) -> Option<String> {
    attrs.get(key)?.as_str().map(str::to_string)
}

/// Heading level, defaulting to 1 when absent, null or zero.
fn heading_level(attrs: &Map<String, Value>) -> u8 {
    match attrs.get("level").and_then(Value::as_u64) {
        Some(0) | None => 1,
        Some(level) => level.min(6) as u8,
    }
}

/// Event kinds arrive as numbers, occasionally as numeric strings from HTML attributes.
fn kind_attr(attrs: &Map<String, Value>) -> Option<u64> {
    match attrs.get("kind")? {
        Value::Number(number) => number.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn relays_attr(attrs: &Map<String, Value>) -> Vec<String> {
    match attrs.get("relays") {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
