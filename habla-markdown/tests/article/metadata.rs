use crate::common::{doc, to_markdown};
use habla_markdown::document::Heading;
use habla_markdown::Node;
use habla_markdown::article::{
    extract_content, extract_hashtags, extract_title, generate_identifier, has_main_heading,
    parse_nostr_mentions, UNTITLED,
};
use nostr::nips::nip01::Coordinate;
use nostr::nips::nip19::{Nip19Coordinate, Nip19Event};
use nostr::{EventId, Kind, PublicKey, RelayUrl, ToBech32};
use serde_json::json;

const PUBKEY: &str = "82341f882b6eabcd2ba7f1ef90aad961cf074af15b9ef44a09f9d2a8fbfbe6a2";
const EVENT_ID: &str = "a84c5de86efc2ec2cff7bad077c4171e09146b633b7ad117fffe088d9579ac33";

fn public_key() -> PublicKey {
    PublicKey::from_hex(PUBKEY).unwrap()
}

#[test]
fn title_is_first_level_one_heading() {
    assert_eq!(extract_title("# My Title\n\nBody"), "My Title");
    assert_eq!(extract_title("## Sub\n# Real Title\ntext"), "Real Title");
    assert_eq!(extract_title("#   Spaced out   \nBody"), "Spaced out");
}

#[test]
fn missing_title_is_untitled() {
    assert_eq!(extract_title("Just text\n## Not a title"), UNTITLED);
    assert_eq!(extract_title(""), "Untitled");
}

#[test]
fn content_follows_the_title_line() {
    assert_eq!(extract_content("# T\n\nBody\nmore"), "Body\nmore");
    assert_eq!(extract_content("intro\n# T\nbody"), "body");
    assert_eq!(extract_content("# Only a title"), "");
}

#[test]
fn identifier_from_title() {
    assert_eq!(generate_identifier("Hello, World!"), "hello-world");
    assert_eq!(generate_identifier("  Leading and trailing  "), "-leading-and-trailing-");
    assert_eq!(generate_identifier("Rust 2024: what's new?"), "rust-2024-whats-new");
}

#[test]
fn hashtags_in_order() {
    assert_eq!(
        extract_hashtags("Posting about #nostr and #Rust_lang.\n#zaps"),
        vec!["nostr", "Rust_lang", "zaps"]
    );
    assert!(extract_hashtags("no tags here").is_empty());
}

#[test]
fn mentions_are_decoded_and_deduplicated() {
    let npub = public_key().to_bech32().unwrap();
    let note = EventId::from_hex(EVENT_ID).unwrap().to_bech32().unwrap();
    let mut pointer = Nip19Event::new(EventId::from_hex(EVENT_ID).unwrap());
    pointer.relays = vec![RelayUrl::parse("wss://relay.example.com").unwrap()];
    let nevent = pointer.to_bech32().unwrap();
    let coordinate = Coordinate::new(Kind::from(30023u16), public_key()).identifier("article");
    let naddr = Nip19Coordinate::new(coordinate, Vec::<RelayUrl>::new())
        .to_bech32()
        .unwrap();

    let content = format!(
        "nostr:{npub} wrote nostr:{note}, see nostr:{nevent} and nostr:{naddr}. Again nostr:{npub}"
    );
    let mentions = parse_nostr_mentions(&content);

    assert_eq!(mentions.pubkeys, vec![PUBKEY.to_string()]);
    assert_eq!(mentions.event_ids, vec![EVENT_ID.to_string()]);
    assert_eq!(mentions.addresses, vec![format!("30023:{PUBKEY}:article")]);
}

#[test]
fn undecodable_mentions_are_skipped() {
    let mentions = parse_nostr_mentions("broken nostr:npub1qqqqqq and nostr:note1zzzz");
    assert!(mentions.pubkeys.is_empty());
    assert!(mentions.event_ids.is_empty());
}

#[test]
fn main_heading_must_come_first() {
    let titled = doc(json!({
        "type": "doc",
        "content": [
            { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Title" }] },
            { "type": "paragraph", "content": [{ "type": "text", "text": "Body" }] }
        ]
    }));
    let subtitled = doc(json!({
        "type": "doc",
        "content": [{ "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Sub" }] }]
    }));
    let late = doc(json!({
        "type": "doc",
        "content": [
            { "type": "paragraph", "content": [{ "type": "text", "text": "Intro" }] },
            { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Title" }] }
        ]
    }));

    assert!(has_main_heading(&titled));
    assert!(!has_main_heading(&subtitled));
    assert!(!has_main_heading(&late));
    assert!(!has_main_heading(&doc(json!({ "type": "doc" }))));
}

#[test]
fn main_heading_check_reads_the_rendered_level() {
    let level_zero = Node::Doc(vec![Node::Heading(Heading {
        level: 0,
        content: vec![Node::text("Title")],
    })]);

    assert!(has_main_heading(&level_zero));
    assert_eq!(to_markdown(&level_zero), "# Title");
}

#[test]
fn title_and_content_from_serialized_document() {
    let document = doc(json!({
        "type": "doc",
        "content": [
            { "type": "heading", "attrs": { "level": 1 }, "content": [{ "type": "text", "text": "Field Notes" }] },
            { "type": "paragraph", "content": [{ "type": "text", "text": "First entry." }] },
            { "type": "heading", "attrs": { "level": 2 }, "content": [{ "type": "text", "text": "Day one" }] }
        ]
    }));
    let markdown = to_markdown(&document);

    assert_eq!(extract_title(&markdown), "Field Notes");
    assert_eq!(extract_content(&markdown), "First entry.\n\n## Day one");
}
