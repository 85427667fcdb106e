//! Long-form article metadata (NIP-23)
//!
//!     Everything needed to turn serialized Markdown into the unsigned content and tag
//!     list of a kind 30023 event: title and body extraction, the `d` identifier,
//!     hashtags, and the `p` / `e` / `a` tags for every `nostr:` reference in the body.
//!     Signing and relay publication happen elsewhere.

use crate::document::Node;
use nostr::nips::nip19::{FromBech32, Nip19};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Event kind of a long-form article.
pub const LONG_FORM_KIND: u16 = 30023;

/// Title used when the Markdown has no level-1 heading.
pub const UNTITLED: &str = "Untitled";

static TITLE: Lazy<Regex> = Lazy::new(|| compile(r"(?mR)^#\s+(.+)$"));
static TITLE_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^#\s"));
static DANGLING_HASH: Lazy<Regex> = Lazy::new(|| compile(r"\n#\s*$"));
static NOT_SLUG: Lazy<Regex> = Lazy::new(|| compile(r"[^A-Za-z0-9_\s\x{FEFF}-]"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"[\s\x{FEFF}]+"));
static DASH_RUN: Lazy<Regex> = Lazy::new(|| compile(r"-+"));
static HASHTAG: Lazy<Regex> = Lazy::new(|| compile(r"#([A-Za-z0-9_]+)"));
static NOSTR_MENTION: Lazy<Regex> =
    Lazy::new(|| compile(r"nostr:((?:npub|note|nprofile|nevent|naddr)1[a-z0-9]+)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid article pattern {pattern}: {e}"))
}

/// Text of the first `# ` heading, trimmed, or [`UNTITLED`].
pub fn extract_title(markdown: &str) -> String {
    TITLE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|title| title.as_str().trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Everything after the first `# ` heading line, trimmed, without a dangling `#` line
/// at the end. Empty when there is no such heading.
pub fn extract_content(markdown: &str) -> String {
    let mut lines = markdown.split('\n');
    if !lines.any(|line| TITLE_LINE.is_match(line)) {
        return String::new();
    }
    let body = lines.collect::<Vec<_>>().join("\n");
    DANGLING_HASH.replace(body.trim(), "").into_owned()
}

/// URL-safe `d` identifier derived from a title.
///
/// `"Hello, World!"` → `"hello-world"`. Characters other than ASCII word characters,
/// whitespace and `-` are dropped.
pub fn generate_identifier(title: &str) -> String {
    let lower = title.to_lowercase();
    let kept = NOT_SLUG.replace_all(&lower, "");
    let dashed = WHITESPACE_RUN.replace_all(&kept, "-");
    DASH_RUN.replace_all(&dashed, "-").trim().to_string()
}

/// Every `#word` in the text, without the `#`, in order of appearance.
pub fn extract_hashtags(markdown: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(markdown)
        .filter_map(|caps| caps.get(1))
        .map(|tag| tag.as_str().to_string())
        .collect()
}

/// Whether the document opens with a level-1 heading, which publishing requires.
pub fn has_main_heading(doc: &Node) -> bool {
    matches!(doc.children().first(), Some(Node::Heading(heading)) if heading.clamped_level() == 1)
}

/// Entities referenced from an article body, deduplicated in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NostrMentions {
    /// Hex public keys from `npub` / `nprofile`
    pub pubkeys: Vec<String>,
    /// Hex event ids from `note` / `nevent`
    pub event_ids: Vec<String>,
    /// `kind:pubkey:identifier` coordinates from `naddr`
    pub addresses: Vec<String>,
}

/// Decode every `nostr:` URI in `content`. URIs that fail to decode are logged and skipped.
pub fn parse_nostr_mentions(content: &str) -> NostrMentions {
    let mut mentions = NostrMentions::default();

    for caps in NOSTR_MENTION.captures_iter(content) {
        let Some(bech32) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        let decoded = match Nip19::from_bech32(bech32) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(entity = bech32, error = %e, "failed to decode nostr mention");
                continue;
            }
        };

        match decoded {
            Nip19::Pubkey(public_key) => push_unique(&mut mentions.pubkeys, public_key.to_hex()),
            Nip19::Profile(profile) => {
                push_unique(&mut mentions.pubkeys, profile.public_key.to_hex())
            }
            Nip19::EventId(event_id) => push_unique(&mut mentions.event_ids, event_id.to_hex()),
            Nip19::Event(event) => push_unique(&mut mentions.event_ids, event.event_id.to_hex()),
            Nip19::Coordinate(address) => {
                let coordinate = &address.coordinate;
                push_unique(
                    &mut mentions.addresses,
                    format!(
                        "{}:{}:{}",
                        coordinate.kind.as_u16(),
                        coordinate.public_key.to_hex(),
                        coordinate.identifier
                    ),
                );
            }
            _ => {}
        }
    }

    mentions
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// An unsigned long-form article: content plus the inputs of its tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub identifier: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub summary: Option<String>,
    pub hashtags: Vec<String>,
    /// Unix seconds; used unless `previous_tags` already has a `published_at`
    pub published_at: u64,
    /// Tags of the event being replaced when editing an existing article
    pub previous_tags: Vec<Vec<String>>,
}

impl ArticleDraft {
    /// Draft from full article Markdown: title from the first `# ` heading, body after it,
    /// identifier from the title and hashtags from the body.
    pub fn from_markdown(markdown: &str, published_at: u64) -> Self {
        let title = extract_title(markdown);
        let content = extract_content(markdown);
        ArticleDraft {
            identifier: generate_identifier(&title),
            hashtags: extract_hashtags(&content),
            title,
            content,
            published_at,
            ..Default::default()
        }
    }

    pub fn kind(&self) -> u16 {
        LONG_FORM_KIND
    }

    /// The event tag list, in publication order, without duplicates.
    ///
    /// `d`, `title`, `published_at`, `image`, `summary`, then `p` / `e` / `a` for
    /// references in the content, `t` for each hashtag (lowercased), and when replacing
    /// an article its `zap` and `t` tags.
    pub fn tags(&self) -> Vec<Vec<String>> {
        let tag = |name: &str, value: &str| vec![name.to_string(), value.to_string()];
        let mut tags = vec![tag("d", &self.identifier), tag("title", &self.title)];

        let published_at = self
            .previous_tag_values("published_at")
            .next()
            .map(|previous| previous[1].clone())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| self.published_at.to_string());
        tags.push(tag("published_at", &published_at));

        if let Some(image) = self.image.as_deref().filter(|s| !s.is_empty()) {
            tags.push(tag("image", image));
        }
        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            tags.push(tag("summary", summary));
        }

        let mentions = parse_nostr_mentions(&self.content);
        tags.extend(mentions.pubkeys.iter().map(|pk| tag("p", pk)));
        tags.extend(mentions.event_ids.iter().map(|id| tag("e", id)));
        tags.extend(mentions.addresses.iter().map(|a| tag("a", a)));

        tags.extend(
            self.hashtags
                .iter()
                .map(|hashtag| tag("t", &hashtag.to_lowercase())),
        );

        tags.extend(self.previous_tag_values("zap").cloned());
        tags.extend(self.previous_tags.iter().filter(|t| is_named(t, "t")).cloned());

        dedupe(tags)
    }

    /// Previous tags with `name` and a value.
    fn previous_tag_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Vec<String>> {
        self.previous_tags
            .iter()
            .filter(move |tag| is_named(tag, name) && tag.len() > 1)
    }
}

fn is_named(tag: &[String], name: &str) -> bool {
    tag.first().is_some_and(|first| first == name)
}

fn dedupe(tags: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut unique: Vec<Vec<String>> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}
