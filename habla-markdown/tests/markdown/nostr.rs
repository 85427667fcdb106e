//! Reference nodes become `nostr:` URIs; plain-text URIs can be linked back into nodes.

use crate::common::{doc, to_markdown};
use habla_markdown::diagnostics::NoopSink;
use habla_markdown::format::Format;
use habla_markdown::formats::MarkdownFormat;
use habla_markdown::references::link_references;
use habla_markdown::{serialize_to_markdown_with, FormatError, Node};
use nostr::nips::nip01::Coordinate;
use nostr::nips::nip19::{FromBech32, Nip19, Nip19Coordinate, Nip19Profile};
use nostr::{Kind, PublicKey, RelayUrl, ToBech32};
use serde_json::json;
use std::collections::HashMap;

const PUBKEY: &str = "82341f882b6eabcd2ba7f1ef90aad961cf074af15b9ef44a09f9d2a8fbfbe6a2";
const EVENT_ID: &str = "a84c5de86efc2ec2cff7bad077c4171e09146b633b7ad117fffe088d9579ac33";

fn public_key() -> PublicKey {
    PublicKey::from_hex(PUBKEY).unwrap()
}

fn paragraph_with(node: serde_json::Value) -> Node {
    doc(json!({
        "type": "doc",
        "content": [{
            "type": "paragraph",
            "content": [{ "type": "text", "text": "By " }, node, { "type": "text", "text": "." }]
        }]
    }))
}

fn linked_markdown(text: &str) -> String {
    let document = Node::Doc(vec![Node::paragraph(text)]);
    to_markdown(&link_references(&document))
}

#[test]
fn mention_renders_inline_npub() {
    let document = paragraph_with(json!({ "type": "mention", "attrs": { "pubkey": PUBKEY, "name": "alice" } }));
    let npub = public_key().to_bech32().unwrap();
    assert_eq!(to_markdown(&document), format!("By nostr:{npub}."));
}

#[test]
fn mention_with_relays_renders_nprofile() {
    let document = paragraph_with(json!({
        "type": "mention",
        "attrs": { "pubkey": PUBKEY, "relays": ["wss://relay.example.com"] }
    }));
    let markdown = to_markdown(&document);
    let uri = markdown
        .strip_prefix("By nostr:")
        .and_then(|rest| rest.strip_suffix('.'))
        .expect("inline uri");

    match Nip19::from_bech32(uri).unwrap() {
        Nip19::Profile(profile) => {
            assert_eq!(profile.public_key.to_hex(), PUBKEY);
            assert_eq!(profile.relays.len(), 1);
        }
        other => panic!("expected nprofile, got {other:?}"),
    }
}

#[test]
fn nevent_carries_kind_and_author() {
    let document = paragraph_with(json!({
        "type": "nevent",
        "attrs": { "id": EVENT_ID, "kind": 1, "author": PUBKEY }
    }));
    let markdown = to_markdown(&document);
    let uri = markdown
        .strip_prefix("By nostr:")
        .and_then(|rest| rest.strip_suffix('.'))
        .expect("inline uri");

    match Nip19::from_bech32(uri).unwrap() {
        Nip19::Event(event) => {
            assert_eq!(event.event_id.to_hex(), EVENT_ID);
            assert_eq!(event.kind, Some(Kind::from(1u16)));
            assert_eq!(event.author, Some(public_key()));
        }
        other => panic!("expected nevent, got {other:?}"),
    }
}

#[test]
fn naddr_encodes_coordinate() {
    let document = paragraph_with(json!({
        "type": "naddr",
        "attrs": { "identifier": "my-article", "kind": 30023, "pubkey": PUBKEY }
    }));
    let markdown = to_markdown(&document);
    let uri = markdown
        .strip_prefix("By nostr:")
        .and_then(|rest| rest.strip_suffix('.'))
        .expect("inline uri");

    match Nip19::from_bech32(uri).unwrap() {
        Nip19::Coordinate(address) => {
            assert_eq!(address.coordinate.identifier, "my-article");
            assert_eq!(address.coordinate.kind.as_u16(), 30023);
            assert_eq!(address.coordinate.public_key, public_key());
        }
        other => panic!("expected naddr, got {other:?}"),
    }
}

#[test]
fn invalid_pubkey_fails_serialization() {
    let document = paragraph_with(json!({ "type": "mention", "attrs": { "pubkey": "not-hex" } }));
    let err = serialize_to_markdown_with(&document, &NoopSink).unwrap_err();
    assert!(matches!(err, FormatError::InvalidPointer { node: "mention", .. }));
}

#[test]
fn naddr_without_kind_fails_serialization() {
    let document = paragraph_with(json!({ "type": "naddr", "attrs": { "identifier": "x", "pubkey": PUBKEY } }));
    let err = serialize_to_markdown_with(&document, &NoopSink).unwrap_err();
    assert!(matches!(err, FormatError::InvalidPointer { node: "naddr", .. }));
}

#[test]
fn linked_npub_serializes_to_same_uri() {
    let text = format!("Thanks nostr:{} for the review", public_key().to_bech32().unwrap());
    assert_eq!(linked_markdown(&text), text);
}

#[test]
fn linked_nprofile_serializes_to_same_uri() {
    let relay = RelayUrl::parse("wss://relay.example.com").unwrap();
    let nprofile = Nip19Profile::new(public_key(), [relay]).to_bech32().unwrap();
    let text = format!("Follow nostr:{nprofile}");
    assert_eq!(linked_markdown(&text), text);
}

#[test]
fn linked_naddr_serializes_to_same_uri() {
    let coordinate = Coordinate::new(Kind::from(30023u16), public_key()).identifier("my-article");
    let naddr = Nip19Coordinate::new(coordinate, Vec::<RelayUrl>::new())
        .to_bech32()
        .unwrap();
    let text = format!("Read nostr:{naddr} next");
    assert_eq!(linked_markdown(&text), text);
}

#[test]
fn link_references_option_on_markdown_format() {
    let npub = public_key().to_bech32().unwrap();
    let document = Node::Doc(vec![Node::paragraph(format!("hi nostr:{npub}"))]);
    let mut options = HashMap::new();
    options.insert("link-references".to_string(), "true".to_string());

    let markdown = MarkdownFormat::default()
        .serialize_with_options(&document, &options)
        .unwrap();
    assert_eq!(markdown, format!("hi nostr:{npub}"));
}
