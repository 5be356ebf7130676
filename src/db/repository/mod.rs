//! Repository layer: raw SQL operations on the `documents` table.
//!
//! Functions take a borrowed `Connection` so callers decide the
//! transaction scope. Validation lives above this layer.

mod document;

pub use document::*;
