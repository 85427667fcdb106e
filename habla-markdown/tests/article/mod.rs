//! Long-form article metadata derived from serialized Markdown.

mod metadata;
