use crate::ids::AnchorId;
use serde::Serialize;

/// A heading collected while generating a document, consumed by the outline builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    /// Heading level (1 = top level). Already normalized when collected.
    pub level: u8,
    /// The anchor the outline entry points at.
    pub id: AnchorId,
    /// The flattened text content of the heading.
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, id: impl Into<AnchorId>, text: impl Into<String>) -> Self {
        Self {
            level,
            id: id.into(),
            text: text.into(),
        }
    }
}
