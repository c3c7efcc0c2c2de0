//! Block and inline element types of the document tree.

use folio_style::{Dimension, ElementKind, StyleProperties};
use folio_types::{AnchorId, ResourceUri};
use serde::{Deserialize, Serialize};

/// Metadata every element carries, regardless of kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementMeta {
    /// Explicit element style name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_class: Option<String>,
    /// Free-form semantic tag (e.g. "abstract", "warning").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AnchorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_override: Option<StyleProperties>,
}

impl ElementMeta {
    pub fn styled(style_class: impl Into<String>) -> Self {
        Self {
            style_class: Some(style_class.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<AnchorId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_override(mut self, properties: StyleProperties) -> Self {
        self.style_override = Some(properties);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListOrdering {
    Ordered,
    #[default]
    Unordered,
}

/// A block-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Element {
    Paragraph {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(default)]
        content: Vec<Inline>,
    },
    Headline {
        #[serde(flatten)]
        meta: ElementMeta,
        level: u8,
        #[serde(default)]
        content: Vec<Inline>,
    },
    List {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(default)]
        ordering: ListOrdering,
        #[serde(default)]
        items: Vec<ListItem>,
    },
    Table {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(flatten)]
        table: TableContent,
    },
    /// A table used only to arrange content; it carries no tabular semantics.
    LayoutTable {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(flatten)]
        table: TableContent,
    },
    Image {
        #[serde(flatten)]
        meta: ElementMeta,
        src: ResourceUri,
        #[serde(default, rename = "altText", skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
    Section {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(default)]
        children: Vec<Element>,
    },
    Part {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(default)]
        children: Vec<Element>,
    },
}

impl Element {
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Element::Paragraph {
            meta: ElementMeta::default(),
            content,
        }
    }

    /// A paragraph holding a single text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self::paragraph(vec![Inline::text(text)])
    }

    pub fn headline(level: u8, text: impl Into<String>) -> Self {
        Element::Headline {
            meta: ElementMeta::default(),
            level,
            content: vec![Inline::text(text)],
        }
    }

    pub fn section(children: Vec<Element>) -> Self {
        Element::Section {
            meta: ElementMeta::default(),
            children,
        }
    }

    pub fn list(ordering: ListOrdering, items: Vec<ListItem>) -> Self {
        Element::List {
            meta: ElementMeta::default(),
            ordering,
            items,
        }
    }

    pub fn image(src: impl Into<ResourceUri>, alt_text: Option<&str>) -> Self {
        Element::Image {
            meta: ElementMeta::default(),
            src: src.into(),
            alt_text: alt_text.map(str::to_string),
        }
    }

    /// Replaces the element's metadata.
    pub fn with_meta(mut self, new_meta: ElementMeta) -> Self {
        *self.meta_mut() = new_meta;
        self
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Element::Paragraph { meta, .. }
            | Element::Headline { meta, .. }
            | Element::List { meta, .. }
            | Element::Table { meta, .. }
            | Element::LayoutTable { meta, .. }
            | Element::Image { meta, .. }
            | Element::Section { meta, .. }
            | Element::Part { meta, .. } => meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut ElementMeta {
        match self {
            Element::Paragraph { meta, .. }
            | Element::Headline { meta, .. }
            | Element::List { meta, .. }
            | Element::Table { meta, .. }
            | Element::LayoutTable { meta, .. }
            | Element::Image { meta, .. }
            | Element::Section { meta, .. }
            | Element::Part { meta, .. } => meta,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Paragraph { .. } => ElementKind::Paragraph,
            Element::Headline { .. } => ElementKind::Headline,
            Element::List { .. } => ElementKind::List,
            Element::Table { .. } => ElementKind::Table,
            Element::LayoutTable { .. } => ElementKind::LayoutTable,
            Element::Image { .. } => ElementKind::Image,
            Element::Section { .. } => ElementKind::Section,
            Element::Part { .. } => ElementKind::Part,
        }
    }

    /// Inline content of paragraph-like elements; empty for containers.
    pub fn inline_content(&self) -> &[Inline] {
        match self {
            Element::Paragraph { content, .. } | Element::Headline { content, .. } => content,
            _ => &[],
        }
    }
}

/// An item of a list; holds arbitrary blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub children: Vec<Element>,
}

impl ListItem {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            meta: ElementMeta::default(),
            children,
        }
    }
}

/// Column layout plus the optional header and the body rows of a table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableContent {
    #[serde(default)]
    pub columns: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<TableSection>,
    #[serde(default)]
    pub body: TableSection,
}

impl TableContent {
    /// Header cells followed by body cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.header
            .iter()
            .chain(std::iter::once(&self.body))
            .flat_map(|section| section.rows.iter())
            .flat_map(|row| row.cells.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableSection {
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default = "one")]
    pub col_span: usize,
    #[serde(default = "one")]
    pub row_span: usize,
    #[serde(default)]
    pub children: Vec<Element>,
}

fn one() -> usize {
    1
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            meta: ElementMeta::default(),
            col_span: 1,
            row_span: 1,
            children: Vec::new(),
        }
    }
}

impl TableCell {
    pub fn new(children: Vec<Element>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    pub fn span(mut self, cols: usize, rows: usize) -> Self {
        self.col_span = cols;
        self.row_span = rows;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkTarget {
    Internal(AnchorId),
    External(String),
}

/// An inline element inside a paragraph or headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inline {
    TextRun {
        #[serde(flatten)]
        meta: ElementMeta,
        text: String,
    },
    Hyperlink {
        #[serde(flatten)]
        meta: ElementMeta,
        target: LinkTarget,
        #[serde(default)]
        content: Vec<Inline>,
    },
    /// The current page number, or the page number of `reference` when set.
    PageNumber {
        #[serde(flatten)]
        meta: ElementMeta,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reference: Option<AnchorId>,
    },
    Footnote {
        #[serde(flatten)]
        meta: ElementMeta,
        marker: String,
        #[serde(default)]
        body: Vec<Element>,
    },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::TextRun {
            meta: ElementMeta::default(),
            text: text.into(),
        }
    }

    pub fn link(target: LinkTarget, content: Vec<Inline>) -> Self {
        Inline::Hyperlink {
            meta: ElementMeta::default(),
            target,
            content,
        }
    }

    pub fn page_number(reference: Option<AnchorId>) -> Self {
        Inline::PageNumber {
            meta: ElementMeta::default(),
            reference,
        }
    }

    pub fn footnote(marker: impl Into<String>, body: Vec<Element>) -> Self {
        Inline::Footnote {
            meta: ElementMeta::default(),
            marker: marker.into(),
            body,
        }
    }

    pub fn meta(&self) -> &ElementMeta {
        match self {
            Inline::TextRun { meta, .. }
            | Inline::Hyperlink { meta, .. }
            | Inline::PageNumber { meta, .. }
            | Inline::Footnote { meta, .. } => meta,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Inline::TextRun { .. } => ElementKind::TextRun,
            Inline::Hyperlink { .. } => ElementKind::Hyperlink,
            Inline::PageNumber { .. } => ElementKind::PageNumber,
            Inline::Footnote { .. } => ElementKind::Footnote,
        }
    }

    /// Appends the visible text of this run to `out`. Footnote bodies and page
    /// numbers contribute nothing.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            Inline::TextRun { text, .. } => out.push_str(text),
            Inline::Hyperlink { content, .. } => {
                content.iter().for_each(|c| c.collect_text(out));
            }
            Inline::PageNumber { .. } | Inline::Footnote { .. } => {}
        }
    }
}

/// Concatenated visible text of a run sequence.
pub fn plain_text(content: &[Inline]) -> String {
    let mut out = String::new();
    for inline in content {
        inline.collect_text(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_skips_footnotes() {
        let content = vec![
            Inline::text("Results "),
            Inline::link(
                LinkTarget::External("https://example.org".into()),
                vec![Inline::text("online")],
            ),
            Inline::footnote("1", vec![Element::text("see appendix")]),
        ];
        assert_eq!(plain_text(&content), "Results online");
    }

    #[test]
    fn deserializes_tagged_elements() {
        let json = r##"{
            "type": "section",
            "styleClass": "chapter",
            "children": [
                { "type": "headline", "level": 1, "id": "intro",
                  "content": [ { "type": "text-run", "text": "Intro" } ] },
                { "type": "table",
                  "columns": ["30%", "auto"],
                  "body": { "rows": [ { "cells": [ { "colSpan": 2, "children": [] } ] } ] } },
                { "type": "image", "src": "img/logo.png", "altText": "Logo" }
            ]
        }"##;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.kind(), ElementKind::Section);
        assert_eq!(element.meta().style_class.as_deref(), Some("chapter"));
        let Element::Section { children, .. } = element else {
            panic!("expected a section");
        };
        assert_eq!(children[0].meta().id, Some(AnchorId::from("intro")));
        let Element::Table { table, .. } = &children[1] else {
            panic!("expected a table");
        };
        assert_eq!(table.columns, vec![Dimension::Percent(30.0), Dimension::Auto]);
        let cell = table.cells().next().unwrap();
        assert_eq!((cell.col_span, cell.row_span), (2, 1));
        assert!(matches!(&children[2], Element::Image { alt_text: Some(a), .. } if a == "Logo"));
    }

    #[test]
    fn table_cells_iterate_header_first() {
        let table = TableContent {
            columns: vec![Dimension::Auto],
            header: Some(TableSection {
                rows: vec![TableRow {
                    cells: vec![TableCell::new(vec![Element::text("h")])],
                }],
            }),
            body: TableSection {
                rows: vec![TableRow {
                    cells: vec![TableCell::new(vec![Element::text("b")])],
                }],
            },
        };
        let texts: Vec<String> = table
            .cells()
            .map(|c| plain_text(c.children[0].inline_content()))
            .collect();
        assert_eq!(texts, vec!["h", "b"]);
    }
}
