//! Block spacing normalizer tests
//!
//! `cases` pins the output for each construct; `properties` checks idempotence and
//! that the normalizer never splits a block it should leave alone.

mod cases;
mod properties;
