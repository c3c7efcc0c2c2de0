use super::{mismatch, push_id};
use crate::attributes::block_attributes;
use crate::error::GenerateError;
use crate::generator::{BlockContext, BlockGenerator};
use folio_idf::{Element, MAX_HEADING_LEVEL, plain_text};
use folio_resolve::{NodeRef, StyledNode};
use folio_types::Heading;

/// `fo:block` holding inline content.
pub struct ParagraphGenerator;

impl BlockGenerator for ParagraphGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let mut attrs = block_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        if ctx.artifact {
            attrs.push("role", "artifact");
        }
        ctx.out.start("fo:block", &attrs)?;
        ctx.inlines(&node.children)?;
        ctx.out.end("fo:block")
    }
}

/// A paragraph tagged with its heading level that also feeds the outline.
pub struct HeadlineGenerator;

impl BlockGenerator for HeadlineGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Block(Element::Headline { level, content, .. }) = node.node else {
            mismatch("Headline", node.kind());
            return Ok(());
        };
        let mut attrs = block_attributes(&node.style);
        if ctx.artifact {
            push_id(node.meta(), &mut attrs);
            attrs.push("role", "artifact");
        } else {
            let level = (*level).clamp(1, MAX_HEADING_LEVEL);
            let id = match &node.meta().id {
                Some(id) => id.clone(),
                None => ctx.ids.heading_id(),
            };
            attrs.push("id", id.as_str());
            attrs.push("role", format!("H{}", level));
            ctx.headings.push(Heading::new(level, id, plain_text(content)));
        }
        ctx.out.start("fo:block", &attrs)?;
        ctx.inlines(&node.children)?;
        ctx.out.end("fo:block")
    }
}

/// Sections and parts: a structural `fo:block` wrapping child blocks.
pub struct ContainerGenerator {
    pub role: &'static str,
}

impl BlockGenerator for ContainerGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let mut attrs = block_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        attrs.push("role", if ctx.artifact { "artifact" } else { self.role });
        ctx.out.start("fo:block", &attrs)?;
        ctx.blocks(&node.children)?;
        ctx.out.end("fo:block")
    }
}
