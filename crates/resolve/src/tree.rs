//! The resolution walk: a parallel tree that borrows the document and carries
//! the resolved style of every node.

use crate::context::{ResolvedStyle, StyleResolverContext};
use folio_idf::{Document, Element, ElementMeta, Inline, ListItem, PageSequence, TableCell};
use folio_style::{ElementKind, StyleSheet};

/// A borrowed reference to any styleable node of the document.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a Element),
    ListItem(&'a ListItem),
    TableCell(&'a TableCell),
    Inline(&'a Inline),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            NodeRef::Block(e) => e.kind(),
            NodeRef::ListItem(_) => ElementKind::ListItem,
            NodeRef::TableCell(_) => ElementKind::TableCell,
            NodeRef::Inline(i) => i.kind(),
        }
    }

    pub fn meta(&self) -> &'a ElementMeta {
        match self {
            NodeRef::Block(e) => e.meta(),
            NodeRef::ListItem(item) => &item.meta,
            NodeRef::TableCell(cell) => &cell.meta,
            NodeRef::Inline(i) => i.meta(),
        }
    }
}

/// A node together with its resolved style and its styled children.
///
/// Children are, per kind: the inline runs of paragraphs, headlines and links;
/// the items of a list; the cells of a table (header rows first, then body rows);
/// the blocks of sections, parts, list items, cells and footnote bodies.
#[derive(Debug, Clone)]
pub struct StyledNode<'a> {
    pub node: NodeRef<'a>,
    pub style: ResolvedStyle,
    pub children: Vec<StyledNode<'a>>,
}

impl<'a> StyledNode<'a> {
    pub fn kind(&self) -> ElementKind {
        self.node.kind()
    }

    pub fn meta(&self) -> &'a ElementMeta {
        self.node.meta()
    }
}

#[derive(Debug, Clone)]
pub struct StyledSequence<'a> {
    pub sequence: &'a PageSequence,
    pub header: Option<Vec<StyledNode<'a>>>,
    pub footer: Option<Vec<StyledNode<'a>>>,
    pub body: Vec<StyledNode<'a>>,
}

#[derive(Debug, Clone)]
pub struct StyledDocument<'a> {
    pub document: &'a Document,
    pub sequences: Vec<StyledSequence<'a>>,
}

/// Resolves the style of every node of `document` in one top-down pass.
pub fn resolve_document<'a>(document: &'a Document, sheet: &StyleSheet) -> StyledDocument<'a> {
    let root = StyleResolverContext::root(sheet);
    let sequences = document
        .sequences
        .iter()
        .map(|sequence| StyledSequence {
            sequence,
            header: sequence.header.as_deref().map(|h| resolve_blocks(h, &root)),
            footer: sequence.footer.as_deref().map(|f| resolve_blocks(f, &root)),
            body: resolve_blocks(&sequence.body, &root),
        })
        .collect();
    StyledDocument {
        document,
        sequences,
    }
}

pub fn resolve_blocks<'a>(
    elements: &'a [Element],
    ctx: &StyleResolverContext<'_>,
) -> Vec<StyledNode<'a>> {
    elements.iter().map(|e| resolve_element(e, ctx.clone())).collect()
}

pub fn resolve_element<'a>(element: &'a Element, ctx: StyleResolverContext<'_>) -> StyledNode<'a> {
    let style = ctx.resolve(element.kind(), element.meta());
    let child_ctx = ctx.derive(&style);
    let children = match element {
        Element::Paragraph { content, .. } | Element::Headline { content, .. } => {
            resolve_inlines(content, &child_ctx)
        }
        Element::List { items, .. } => items
            .iter()
            .map(|item| resolve_list_item(item, child_ctx.clone()))
            .collect(),
        Element::Table { table, .. } | Element::LayoutTable { table, .. } => table
            .cells()
            .map(|cell| resolve_cell(cell, child_ctx.clone()))
            .collect(),
        Element::Section { children, .. } | Element::Part { children, .. } => {
            resolve_blocks(children, &child_ctx)
        }
        Element::Image { .. } => Vec::new(),
    };
    StyledNode {
        node: NodeRef::Block(element),
        style,
        children,
    }
}

fn resolve_list_item<'a>(item: &'a ListItem, ctx: StyleResolverContext<'_>) -> StyledNode<'a> {
    let style = ctx.resolve(ElementKind::ListItem, &item.meta);
    let children = resolve_blocks(&item.children, &ctx.derive(&style));
    StyledNode {
        node: NodeRef::ListItem(item),
        style,
        children,
    }
}

fn resolve_cell<'a>(cell: &'a TableCell, ctx: StyleResolverContext<'_>) -> StyledNode<'a> {
    let style = ctx.resolve(ElementKind::TableCell, &cell.meta);
    let children = resolve_blocks(&cell.children, &ctx.derive(&style));
    StyledNode {
        node: NodeRef::TableCell(cell),
        style,
        children,
    }
}

fn resolve_inlines<'a>(
    inlines: &'a [Inline],
    ctx: &StyleResolverContext<'_>,
) -> Vec<StyledNode<'a>> {
    inlines
        .iter()
        .map(|inline| resolve_inline(inline, ctx.clone()))
        .collect()
}

fn resolve_inline<'a>(inline: &'a Inline, ctx: StyleResolverContext<'_>) -> StyledNode<'a> {
    let style = ctx.resolve(inline.kind(), inline.meta());
    let child_ctx = ctx.derive(&style);
    let children = match inline {
        Inline::Hyperlink { content, .. } => resolve_inlines(content, &child_ctx),
        Inline::Footnote { body, .. } => resolve_blocks(body, &child_ctx),
        Inline::TextRun { .. } | Inline::PageNumber { .. } => Vec::new(),
    };
    StyledNode {
        node: NodeRef::Inline(inline),
        style,
        children,
    }
}
