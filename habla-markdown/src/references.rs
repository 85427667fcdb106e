//! Plain-text `nostr:` URIs → reference nodes
//!
//!     Articles pasted or loaded from Markdown carry references as bare text such as
//!     `nostr:npub1…`. [`link_references`] turns every decodable URI found in text runs
//!     into the matching `mention`, `nevent` or `naddr` node, so the editor shows them as
//!     references and the serializer writes them back out as the same URIs.
//!
//!     `note1…` ids become `nevent` nodes of kind 1. URIs that fail to decode stay as
//!     text. Text carrying a `code` mark and code blocks are left untouched.

use crate::document::{AddressReference, EventReference, MarkKind, Mention, Node, Text};
use crate::formats::markdown::nostr::URI_SCHEME;
use nostr::nips::nip19::{FromBech32, Nip19};
use once_cell::sync::Lazy;
use regex::Regex;

static NOSTR_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)nostr:(?:npub|nprofile|nevent|note|naddr)1[a-z0-9]+")
        .expect("nostr URI pattern is valid")
});

/// Display name given to mentions created from bare URIs.
const MENTION_NAME: &str = "user";

/// Return a copy of `doc` with `nostr:` URIs in its text runs replaced by reference nodes.
pub fn link_references(doc: &Node) -> Node {
    let mut linked = doc.clone();
    link_in_place(&mut linked);
    linked
}

/// Split unmarked `text` into text and reference nodes.
pub fn split_references(text: &str) -> Vec<Node> {
    split_text(&Text {
        text: text.to_string(),
        marks: Vec::new(),
    })
}

/// Decode a single `nostr:` URI into a reference node.
pub fn reference_node(uri: &str) -> Option<Node> {
    let scheme_len = URI_SCHEME.len();
    let bech32 = match uri.get(..scheme_len) {
        Some(scheme) if scheme.eq_ignore_ascii_case(URI_SCHEME) => &uri[scheme_len..],
        _ => return None,
    };

    let decoded = match Nip19::from_bech32(bech32) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(uri, error = %e, "failed to decode nostr reference");
            return None;
        }
    };

    let node = match decoded {
        Nip19::Pubkey(public_key) => Node::Mention(Mention {
            pubkey: Some(public_key.to_hex()),
            relays: Vec::new(),
            name: Some(MENTION_NAME.to_string()),
        }),
        Nip19::Profile(profile) => Node::Mention(Mention {
            pubkey: Some(profile.public_key.to_hex()),
            relays: profile.relays.iter().map(ToString::to_string).collect(),
            name: Some(MENTION_NAME.to_string()),
        }),
        Nip19::EventId(event_id) => Node::NEvent(EventReference {
            id: Some(event_id.to_hex()),
            kind: Some(1),
            author: None,
            relays: Vec::new(),
        }),
        Nip19::Event(event) => Node::NEvent(EventReference {
            id: Some(event.event_id.to_hex()),
            kind: event.kind.map(|kind| u64::from(kind.as_u16())),
            author: event.author.map(|author| author.to_hex()),
            relays: event.relays.iter().map(ToString::to_string).collect(),
        }),
        Nip19::Coordinate(address) => Node::NAddr(AddressReference {
            identifier: Some(address.coordinate.identifier.clone()),
            kind: Some(u64::from(address.coordinate.kind.as_u16())),
            pubkey: Some(address.coordinate.public_key.to_hex()),
            relays: address.relays.iter().map(ToString::to_string).collect(),
        }),
        _ => return None,
    };
    Some(node)
}

fn link_in_place(node: &mut Node) {
    if matches!(node, Node::CodeBlock(_)) {
        return;
    }
    let Some(children) = node.children_mut() else {
        return;
    };

    let mut expanded = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        if let Node::Text(text) = &child {
            if !is_code(text) {
                expanded.extend(split_text(text));
                continue;
            }
        }
        link_in_place(&mut child);
        expanded.push(child);
    }
    *children = expanded;
}

fn is_code(text: &Text) -> bool {
    text.marks
        .iter()
        .any(|mark| mark.kind() == Some(MarkKind::Code))
}

/// Text pieces keep the marks of the run they came from; reference nodes carry none.
fn split_text(text: &Text) -> Vec<Node> {
    let piece = |s: &str| Node::marked_text(s, text.marks.clone());
    let mut nodes = Vec::new();
    let mut last = 0;

    for found in NOSTR_URI.find_iter(&text.text) {
        if found.start() > last {
            nodes.push(piece(&text.text[last..found.start()]));
        }
        nodes.push(reference_node(found.as_str()).unwrap_or_else(|| piece(found.as_str())));
        last = found.end();
    }

    if last == 0 {
        return vec![Node::Text(text.clone())];
    }
    if last < text.text.len() {
        nodes.push(piece(&text.text[last..]));
    }
    nodes
}
