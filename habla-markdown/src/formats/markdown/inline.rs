//! Inline mark composition for text runs.

use crate::document::{Mark, MarkKind};

/// Wrap `text` in the Markdown for each of its marks.
///
/// Marks are applied innermost first in [`MarkKind`] order, whatever order the
/// editor listed them in, so `[bold, link]` always becomes `[**text**](href)`.
/// Unknown mark types are skipped. Duplicates are all applied.
pub fn apply_marks(text: &str, marks: &[Mark]) -> String {
    let mut known: Vec<(MarkKind, &Mark)> = marks
        .iter()
        .filter_map(|mark| mark.kind().map(|kind| (kind, mark)))
        .collect();
    known.sort_by_key(|(kind, _)| *kind);

    known
        .into_iter()
        .fold(text.to_string(), |inner, (kind, mark)| wrap(kind, mark, inner))
}

fn wrap(kind: MarkKind, mark: &Mark, inner: String) -> String {
    match kind {
        MarkKind::Code => format!("`{inner}`"),
        MarkKind::Highlight => format!("=={inner}=="),
        MarkKind::Strike => format!("~~{inner}~~"),
        MarkKind::Italic => format!("*{inner}*"),
        MarkKind::Bold => format!("**{inner}**"),
        MarkKind::Underline => format!("<u>{inner}</u>"),
        MarkKind::Link => format!("[{inner}]({})", mark.href().unwrap_or_default()),
    }
}
