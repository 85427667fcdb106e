//! Inline formatting marks attached to text nodes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The mark kinds the Markdown serializer knows how to wrap.
///
/// Variants are declared innermost first: when a text run carries several
/// marks, `Code` is applied closest to the text and `Link` wraps everything
/// else. The derived `Ord` is that nesting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkKind {
    Code,
    Highlight,
    Strike,
    Italic,
    Bold,
    Underline,
    Link,
}

impl MarkKind {
    /// All kinds, innermost to outermost.
    pub const NESTING_ORDER: [MarkKind; 7] = [
        MarkKind::Code,
        MarkKind::Highlight,
        MarkKind::Strike,
        MarkKind::Italic,
        MarkKind::Bold,
        MarkKind::Underline,
        MarkKind::Link,
    ];

    /// Editor name of the mark (`"bold"`, `"link"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            MarkKind::Code => "code",
            MarkKind::Highlight => "highlight",
            MarkKind::Strike => "strike",
            MarkKind::Italic => "italic",
            MarkKind::Bold => "bold",
            MarkKind::Underline => "underline",
            MarkKind::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NESTING_ORDER
            .into_iter()
            .find(|kind| kind.name() == name)
    }
}

/// A mark as it appears in the editor JSON.
///
/// The type is kept as a string so marks from newer editor versions survive a
/// JSON round-trip even though the serializer ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type", default)]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
}

impl Mark {
    pub fn new(kind: MarkKind) -> Self {
        Mark {
            mark_type: kind.name().to_string(),
            attrs: None,
        }
    }

    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Map::new();
        attrs.insert("href".to_string(), Value::String(href.into()));
        Mark {
            mark_type: MarkKind::Link.name().to_string(),
            attrs: Some(attrs),
        }
    }

    /// The known kind of this mark, or `None` for mark types we do not render.
    pub fn kind(&self) -> Option<MarkKind> {
        MarkKind::from_name(&self.mark_type)
    }

    pub fn href(&self) -> Option<&str> {
        self.attrs.as_ref()?.get("href")?.as_str()
    }
}
