//! Markdown serialization tests
//!
//! Editor documents in, exact Markdown out. Where exact text is not the point, the
//! output is parsed back with comrak to check the block structure a reader would see.

mod nostr;
