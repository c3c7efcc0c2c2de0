//! Intermediate Document Format (IDF)
//! The in-memory content tree: document, page sequences, block elements and
//! inline runs, plus the builder that keeps heading levels continuous.

pub mod builder;
pub mod document;
pub mod element;
pub mod headings;

pub use builder::DocumentBuilder;
pub use document::{Document, DocumentMetadata, PageSequence};
pub use element::{
    plain_text, Element, ElementMeta, Inline, LinkTarget, ListItem, ListOrdering, TableCell,
    TableContent, TableRow, TableSection,
};
pub use headings::{HeadingLevelTracker, MAX_HEADING_LEVEL};
