//! Memory vocabulary: taxonomy, provenance kind/source, relationships.

mod types;

pub use types::*;
