use super::{mismatch, push_id};
use crate::attributes::inline_attributes;
use crate::error::GenerateError;
use crate::generator::{InlineContext, InlineGenerator};
use crate::writer::FoAttrs;
use folio_idf::{Inline, LinkTarget};
use folio_resolve::{NodeRef, StyledNode};

/// Bare character data, wrapped in `fo:inline` only when the run has attributes.
pub struct TextRunGenerator;

impl InlineGenerator for TextRunGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Inline(Inline::TextRun { text, .. }) = node.node else {
            mismatch("Text run", node.kind());
            return Ok(());
        };
        let mut attrs = inline_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        if attrs.is_empty() {
            return ctx.out.text(text);
        }
        ctx.out.start("fo:inline", &attrs)?;
        ctx.out.text(text)?;
        ctx.out.end("fo:inline")
    }
}

pub struct HyperlinkGenerator;

impl InlineGenerator for HyperlinkGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Inline(Inline::Hyperlink { target, .. }) = node.node else {
            mismatch("Hyperlink", node.kind());
            return Ok(());
        };
        let mut attrs = inline_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        match target {
            LinkTarget::Internal(id) => attrs.push("internal-destination", id.as_str()),
            LinkTarget::External(url) => {
                attrs.push("external-destination", format!("url('{}')", url));
                attrs.push("show-destination", "new");
            }
        }
        ctx.out.start("fo:basic-link", &attrs)?;
        ctx.inlines(&node.children)?;
        ctx.out.end("fo:basic-link")
    }
}

/// The current page number, or a citation of the page holding `reference`.
pub struct PageNumberGenerator;

impl InlineGenerator for PageNumberGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Inline(Inline::PageNumber { reference, .. }) = node.node else {
            mismatch("Page number", node.kind());
            return Ok(());
        };
        let mut attrs = inline_attributes(&node.style);
        match reference {
            Some(id) => {
                attrs.push("ref-id", id.as_str());
                ctx.out.empty("fo:page-number-citation", &attrs)
            }
            None => ctx.out.empty("fo:page-number", &attrs),
        }
    }
}

/// `fo:footnote`: a superscript marker in the text and the note body at the page foot.
pub struct FootnoteGenerator;

impl InlineGenerator for FootnoteGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Inline(Inline::Footnote { marker, .. }) = node.node else {
            mismatch("Footnote", node.kind());
            return Ok(());
        };
        let mut marker_attrs = inline_attributes(&node.style);
        push_id(node.meta(), &mut marker_attrs);
        if !marker_attrs.iter().any(|(name, _)| name == "baseline-shift") {
            marker_attrs.push("baseline-shift", "super");
        }
        marker_attrs.push("font-size", "smaller");

        ctx.out.open("fo:footnote")?;
        ctx.out.start("fo:inline", &marker_attrs)?;
        ctx.out.text(marker)?;
        ctx.out.end("fo:inline")?;

        ctx.out.open("fo:footnote-body")?;
        if node.children.is_empty() {
            ctx.out.empty("fo:block", &FoAttrs::new())?;
        } else {
            ctx.nested_blocks(&node.children)?;
        }
        ctx.out.end("fo:footnote-body")?;
        ctx.out.end("fo:footnote")
    }
}
