//! `nostr:` URIs for reference nodes (NIP-19 / NIP-21).
//!
//! Attributes are validated here, at encoding time: a malformed key, id or
//! relay URL becomes a [`FormatError::InvalidPointer`] for the caller to handle.

use crate::document::{AddressReference, EventReference, Mention};
use crate::error::FormatError;
use nostr::nips::nip01::Coordinate;
use nostr::nips::nip19::{Nip19Coordinate, Nip19Event, Nip19Profile};
use nostr::{EventId, Kind, PublicKey, RelayUrl, ToBech32};

pub const URI_SCHEME: &str = "nostr:";

/// `nostr:nprofile…` when relay hints are present, `nostr:npub…` otherwise.
pub fn mention_uri(mention: &Mention) -> Result<String, FormatError> {
    let public_key = public_key("mention", mention.pubkey.as_deref())?;
    let encoded = if mention.relays.is_empty() {
        public_key
            .to_bech32()
            .map_err(|e| FormatError::invalid_pointer("mention", e))?
    } else {
        let relays = relay_urls("mention", &mention.relays)?;
        Nip19Profile::new(public_key, relays)
            .to_bech32()
            .map_err(|e| FormatError::invalid_pointer("mention", e))?
    };
    Ok(format!("{URI_SCHEME}{encoded}"))
}

/// `nostr:nevent…`. A kind of 0 and an empty author count as absent.
pub fn event_uri(event: &EventReference) -> Result<String, FormatError> {
    let id = event
        .id
        .as_deref()
        .ok_or_else(|| FormatError::invalid_pointer("nevent", "missing event id"))?;
    let event_id = EventId::from_hex(id).map_err(|e| FormatError::invalid_pointer("nevent", e))?;

    let mut pointer = Nip19Event::new(event_id);
    pointer.author = match event.author.as_deref().filter(|author| !author.is_empty()) {
        Some(author) => Some(public_key("nevent", Some(author))?),
        None => None,
    };
    pointer.kind = match event.kind.filter(|kind| *kind != 0) {
        Some(kind) => Some(event_kind("nevent", kind)?),
        None => None,
    };
    pointer.relays = relay_urls("nevent", &event.relays)?;

    let encoded = pointer
        .to_bech32()
        .map_err(|e| FormatError::invalid_pointer("nevent", e))?;
    Ok(format!("{URI_SCHEME}{encoded}"))
}

/// `nostr:naddr…`. The kind is required; a missing identifier encodes as empty.
pub fn address_uri(address: &AddressReference) -> Result<String, FormatError> {
    let kind = address
        .kind
        .ok_or_else(|| FormatError::invalid_pointer("naddr", "missing kind"))?;
    let coordinate = Coordinate::new(
        event_kind("naddr", kind)?,
        public_key("naddr", address.pubkey.as_deref())?,
    )
    .identifier(address.identifier.clone().unwrap_or_default());

    let pointer = Nip19Coordinate::new(coordinate, relay_urls("naddr", &address.relays)?);
    let encoded = pointer
        .to_bech32()
        .map_err(|e| FormatError::invalid_pointer("naddr", e))?;
    Ok(format!("{URI_SCHEME}{encoded}"))
}

fn public_key(node: &'static str, hex: Option<&str>) -> Result<PublicKey, FormatError> {
    let hex = hex.ok_or_else(|| FormatError::invalid_pointer(node, "missing public key"))?;
    PublicKey::from_hex(hex).map_err(|e| FormatError::invalid_pointer(node, e))
}

fn event_kind(node: &'static str, kind: u64) -> Result<Kind, FormatError> {
    u16::try_from(kind)
        .map(Kind::from)
        .map_err(|_| FormatError::invalid_pointer(node, format!("kind {kind} out of range")))
}

fn relay_urls(node: &'static str, relays: &[String]) -> Result<Vec<RelayUrl>, FormatError> {
    relays
        .iter()
        .map(|url| {
            RelayUrl::parse(url)
                .map_err(|e| FormatError::invalid_pointer(node, format!("relay '{url}': {e}")))
        })
        .collect()
}
