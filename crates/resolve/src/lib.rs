//! Style cascade resolution over the document tree.

pub mod context;
pub mod tree;

pub use context::{ResolvedStyle, StyleResolverContext};
pub use tree::{
    NodeRef, StyledDocument, StyledNode, StyledSequence, resolve_blocks, resolve_document,
    resolve_element,
};
