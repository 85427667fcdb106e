//! Block spacing normalization
//!
//!     Markdown renderers need a blank line after most block constructs, otherwise the
//!     following paragraph gets pulled into the block (a lazy blockquote continuation, a
//!     heading swallowing the next line in some parsers, ...). [`ensure_block_spacing`]
//!     repairs any Markdown string, whatever produced it, by inserting one blank line
//!     after a block line that is directly followed by content.
//!
//!     Six rules run as sequential passes over the whole text, in this order:
//!
//!     | Rule            | Trigger line                                  | Next line must be             |
//!     |-----------------|-----------------------------------------------|-------------------------------|
//!     | blockquote      | starts with `>`                               | content not starting with `>` |
//!     | fenced code     | closing ```` ``` ```` of an open/close pair   | content                       |
//!     | list item       | `-`, `*`, `+` or `N.`, whitespace, then text  | content not starting a list item or with whitespace |
//!     | horizontal rule | exactly `---`, `***` or `___`                 | content                       |
//!     | heading         | 1 to 6 `#`, whitespace, then text             | content                       |
//!     | image           | a whole `![alt](url)` line                    | content                       |
//!
//!     "Content" means a non-empty line; a blank line or the end of the text never
//!     triggers. The trigger line itself must end with `\n`.
//!
//! Line model
//!
//!     Lines end at `\n`, `\r`, U+2028 or U+2029, like `^`/`$` in a JavaScript multi-line
//!     regex. Patterns only ever look at one line body, so no rule can match across lines:
//!     a bare marker line (`-`, `- `, `1.`, `#`, `# `) is not a list item or heading, and
//!     the whitespace after a marker never reaches into the next line. Inserted lines are
//!     empty and never trigger or close anything, which makes the whole transform
//!     idempotent.
//!
//!     Fences pair sequentially: an opening line pairs with the next line that is exactly
//!     ```` ``` ````, and scanning resumes after that closer.

use once_cell::sync::Lazy;
use regex::Regex;

/// `\s` as JavaScript defines it (Unicode White_Space plus the BOM).
const JS_WHITESPACE: &str = r"[\s\x{FEFF}]";
const JS_NON_WHITESPACE: &str = r"[^\s\x{FEFF}]";

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(r"^(?:[-*+]|[0-9]+\.){JS_WHITESPACE}+{JS_NON_WHITESPACE}"))
});
static LIST_CONTINUES: Lazy<Regex> = Lazy::new(|| compile(&format!(r"^(?:[-*+]|[0-9]+\.|{JS_WHITESPACE})")));
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| compile(r"^(?:---|\*\*\*|___)$"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^#{{1,6}}{JS_WHITESPACE}+{JS_NON_WHITESPACE}")));
static IMAGE: Lazy<Regex> = Lazy::new(|| compile(r"^!\[(?:[^\[\]]|\[[^\]]*\])*\]\([^)]*\)$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid spacing pattern {pattern}: {e}"))
}

const FENCE: &str = "```";

/// A spacing rule, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingRule {
    Blockquote,
    FencedCode,
    ListItem,
    HorizontalRule,
    Heading,
    Image,
}

impl SpacingRule {
    pub const ALL: [SpacingRule; 6] = [
        SpacingRule::Blockquote,
        SpacingRule::FencedCode,
        SpacingRule::ListItem,
        SpacingRule::HorizontalRule,
        SpacingRule::Heading,
        SpacingRule::Image,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SpacingRule::Blockquote => "blockquote",
            SpacingRule::FencedCode => "fenced-code",
            SpacingRule::ListItem => "list-item",
            SpacingRule::HorizontalRule => "horizontal-rule",
            SpacingRule::Heading => "heading",
            SpacingRule::Image => "image",
        }
    }

    /// Look a rule up by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<SpacingRule> {
        SpacingRule::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Whether `line` triggers this rule given the line after it.
    /// The fenced code rule needs the whole text and is handled by [`fence_breaks`].
    fn triggers(self, line: &str, next: &str) -> bool {
        match self {
            SpacingRule::Blockquote => line.starts_with('>') && !next.starts_with('>'),
            SpacingRule::FencedCode => false,
            SpacingRule::ListItem => LIST_ITEM.is_match(line) && !LIST_CONTINUES.is_match(next),
            SpacingRule::HorizontalRule => HORIZONTAL_RULE.is_match(line),
            SpacingRule::Heading => HEADING.is_match(line),
            SpacingRule::Image => IMAGE.is_match(line),
        }
    }
}

/// Insert a blank line after block constructs directly followed by content.
///
/// Pure and idempotent: `ensure_block_spacing(&ensure_block_spacing(s)) == ensure_block_spacing(s)`.
pub fn ensure_block_spacing(markdown: &str) -> String {
    SpacingRule::ALL
        .iter()
        .fold(markdown.to_string(), |text, rule| apply_rule(&text, *rule))
}

/// Run a single rule over `markdown`.
pub fn apply_rule(markdown: &str, rule: SpacingRule) -> String {
    let lines = split_lines(markdown);
    let breaks = match rule {
        SpacingRule::FencedCode => fence_breaks(&lines),
        _ => (0..lines.len())
            .filter(|&i| {
                followed_by_content(&lines, i) && rule.triggers(lines[i].body, lines[i + 1].body)
            })
            .collect(),
    };

    if breaks.is_empty() {
        return markdown.to_string();
    }
    tracing::debug!(rule = rule.name(), inserted = breaks.len(), "inserted blank lines");
    rebuild(&lines, &breaks, markdown.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Line<'a> {
    body: &'a str,
    /// Empty only for the last line.
    terminator: &'a str,
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Split into lines, keeping terminators. Always yields at least one line; text ending
/// in a terminator yields a final empty line.
fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        if is_line_terminator(c) {
            let end = index + c.len_utf8();
            lines.push(Line {
                body: &text[start..index],
                terminator: &text[index..end],
            });
            start = end;
        }
    }
    lines.push(Line {
        body: &text[start..],
        terminator: "",
    });
    lines
}

/// The line at `index` ends with `\n` and the next line has content.
fn followed_by_content(lines: &[Line<'_>], index: usize) -> bool {
    lines[index].terminator == "\n"
        && lines
            .get(index + 1)
            .is_some_and(|next| !next.body.is_empty())
}

fn fence_breaks(lines: &[Line<'_>]) -> Vec<usize> {
    let mut breaks = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        if line.terminator == "\n" && line.body.starts_with(FENCE) {
            let closer = (index + 1..lines.len())
                .find(|&j| lines[j].body == FENCE && lines[j].terminator == "\n");
            if let Some(closer) = closer {
                if followed_by_content(lines, closer) {
                    breaks.push(closer);
                }
                index = closer + 1;
                continue;
            }
        }
        index += 1;
    }
    breaks
}

/// Reassemble `lines`, adding a `\n` after each line index in `breaks` (ascending).
fn rebuild(lines: &[Line<'_>], breaks: &[usize], capacity: usize) -> String {
    let mut out = String::with_capacity(capacity + breaks.len());
    let mut pending = breaks.iter().peekable();
    for (index, line) in lines.iter().enumerate() {
        out.push_str(line.body);
        out.push_str(line.terminator);
        if pending.next_if(|&&b| b == index).is_some() {
            out.push('\n');
        }
    }
    out
}
