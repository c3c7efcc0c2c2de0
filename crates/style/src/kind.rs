//! The kinds of document element a style can be attached to.
use crate::properties::PropertyCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Paragraph,
    Headline,
    List,
    ListItem,
    Table,
    LayoutTable,
    TableCell,
    Image,
    Section,
    Part,
    TextRun,
    Hyperlink,
    PageNumber,
    Footnote,
}

impl ElementKind {
    pub const ALL: [ElementKind; 14] = [
        ElementKind::Paragraph,
        ElementKind::Headline,
        ElementKind::List,
        ElementKind::ListItem,
        ElementKind::Table,
        ElementKind::LayoutTable,
        ElementKind::TableCell,
        ElementKind::Image,
        ElementKind::Section,
        ElementKind::Part,
        ElementKind::TextRun,
        ElementKind::Hyperlink,
        ElementKind::PageNumber,
        ElementKind::Footnote,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Headline => "headline",
            ElementKind::List => "list",
            ElementKind::ListItem => "list-item",
            ElementKind::Table => "table",
            ElementKind::LayoutTable => "layout-table",
            ElementKind::TableCell => "table-cell",
            ElementKind::Image => "image",
            ElementKind::Section => "section",
            ElementKind::Part => "part",
            ElementKind::TextRun => "text-run",
            ElementKind::Hyperlink => "hyperlink",
            ElementKind::PageNumber => "page-number",
            ElementKind::Footnote => "footnote",
        }
    }

    /// The property category an element of this kind is styled with.
    pub fn category(&self) -> PropertyCategory {
        match self {
            ElementKind::Paragraph => PropertyCategory::Paragraph,
            ElementKind::Headline => PropertyCategory::Headline,
            ElementKind::List => PropertyCategory::List,
            ElementKind::ListItem => PropertyCategory::Block,
            ElementKind::Table | ElementKind::LayoutTable => PropertyCategory::Table,
            ElementKind::TableCell => PropertyCategory::TableCell,
            ElementKind::Image => PropertyCategory::Image,
            ElementKind::Section | ElementKind::Part => PropertyCategory::Section,
            ElementKind::TextRun
            | ElementKind::Hyperlink
            | ElementKind::PageNumber
            | ElementKind::Footnote => PropertyCategory::Inline,
        }
    }

    /// Name of the style used when neither the element nor the sheet's defaults pick one.
    pub fn default_style_name(&self) -> String {
        format!("{}-default", self.tag())
    }

    pub fn is_inline(&self) -> bool {
        self.category() == PropertyCategory::Inline
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
