//! Editor documents to Markdown for Nostr long-form articles
//!
//!     The Habla editor produces a TipTap/ProseMirror document tree; articles are
//!     published as NIP-23 events whose `content` is Markdown. This crate is the bridge:
//!     it reads the editor JSON, renders it to Markdown with correct block spacing,
//!     repairs spacing in Markdown from any other source, and derives the article
//!     metadata (title, `d` identifier, hashtags, referenced entities) that goes into
//!     the event tags.
//!
//!     This is a pure lib: it powers the habla CLI but is shell agnostic, so no code
//!     here assumes a terminal, environment variables or a working directory. The only
//!     I/O is the optional file write in [`export`].
//!
//! Architecture
//!
//!     .
//!     ├── error.rs                # FormatError
//!     ├── diagnostics.rs          # non-fatal serializer diagnostics and sinks
//!     ├── document                # editor document model and its JSON interchange
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── json                # editor JSON in and out
//!     │   └── markdown            # serializer, lists, inline marks, nostr URIs
//!     ├── spacing.rs              # block spacing normalizer
//!     ├── references.rs           # plain-text nostr: URIs → reference nodes
//!     ├── article.rs              # NIP-23 metadata and tags
//!     └── export.rs               # one-call export to memory or file
//!
//! Core Algorithms
//!
//!     Serialization is a single depth-first walk over a closed sum type. Block
//!     handlers end their fragment with a blank line so consecutive blocks come out
//!     separated; lists are rendered per item with a flat two-space indent per level;
//!     inline marks compose in a fixed innermost-to-outermost order so the output does
//!     not depend on the order the editor listed them in.
//!
//!     The spacing normalizer is independent of the serializer: six line-level passes
//!     that add a blank line after block constructs directly followed by content. It
//!     is idempotent.
//!
//!     Unknown node types never fail a conversion. Containers render their children,
//!     leaves render nothing, and both are reported to a [`diagnostics::DiagnosticSink`].
//!
//! Testing
//!
//!     tests
//!     ├── lib.rs
//!     ├── common
//!     ├── markdown
//!     ├── spacing
//!     └── article
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to
//!     include these in the mod.
//!
pub mod article;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod formats;
pub mod references;
pub mod registry;
pub mod spacing;

pub use diagnostics::{Diagnostic, DiagnosticSink};
pub use document::Node;
pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::serializer::{serialize_to_markdown, serialize_to_markdown_with};
pub use registry::FormatRegistry;
pub use spacing::ensure_block_spacing;
