//! Non-fatal diagnostics raised while serializing
//!
//!     Serializing never fails on an unrecognized node; it degrades and reports
//!     what it did through a [`DiagnosticSink`] handed in by the caller. The
//!     default sink forwards to `tracing`, so the CLI shows these on stderr while
//!     tests can collect them with [`CollectingSink`].

use std::fmt;
use std::sync::Mutex;

/// Something the serializer wants the caller to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Unknown node type with content: children were rendered without formatting.
    UnknownNode { node_type: String },
    /// Unknown leaf node type: nothing was rendered for it.
    UnhandledNode { node_type: String },
}

impl Diagnostic {
    pub fn node_type(&self) -> &str {
        match self {
            Diagnostic::UnknownNode { node_type } | Diagnostic::UnhandledNode { node_type } => {
                node_type
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownNode { node_type } => write!(
                f,
                "Unknown node type: {node_type}. Content will be rendered without formatting."
            ),
            Diagnostic::UnhandledNode { node_type } => {
                write!(f, "Unhandled node type: {node_type}. Node will be skipped.")
            }
        }
    }
}

/// Receiver for serializer diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(Diagnostic) + Send + Sync,
{
    fn emit(&self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Logs every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            target: "habla_markdown::serializer",
            node_type = diagnostic.node_type(),
            "{diagnostic}"
        );
    }
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(diagnostic),
            Err(poisoned) => poisoned.into_inner().push(diagnostic),
        }
    }
}
