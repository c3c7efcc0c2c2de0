use super::{mismatch, push_id};
use crate::attributes::block_attributes;
use crate::error::GenerateError;
use crate::generator::{BlockContext, BlockGenerator};
use crate::writer::FoAttrs;
use folio_idf::Element;
use folio_resolve::{NodeRef, StyledNode};

/// `fo:external-graphic` inside a positioning `fo:block`.
pub struct ImageGenerator;

impl BlockGenerator for ImageGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Block(Element::Image { src, alt_text, .. }) = node.node else {
            mismatch("Image", node.kind());
            return Ok(());
        };
        let Some(resolved) = ctx.images.resolve(src) else {
            log::warn!("Image '{}' could not be resolved, omitted", src);
            return Ok(());
        };

        let mut graphic = FoAttrs::new().with("src", format!("url('{}')", resolved));
        if let Some(props) = node.style.properties.image() {
            attrs_for_size(props.content_width, "content-width", &mut graphic);
            attrs_for_size(props.content_height, "content-height", &mut graphic);
            if props.scale_to_fit == Some(true) {
                graphic.push("content-width", "scale-to-fit");
                graphic.push("content-height", "100%");
                graphic.push("scaling", "uniform");
            }
        }
        if ctx.artifact {
            graphic.push("role", "artifact");
        } else if ctx.config.fox_extensions {
            match alt_text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
                Some(alt) => graphic.push("fox:alt-text", alt),
                None => log::warn!("Image '{}' has no alternate text", src),
            }
        }

        let mut wrapper = block_attributes(&node.style);
        push_id(node.meta(), &mut wrapper);
        ctx.out.start("fo:block", &wrapper)?;
        ctx.out.empty("fo:external-graphic", &graphic)?;
        ctx.out.end("fo:block")
    }
}

fn attrs_for_size(value: Option<folio_style::Dimension>, name: &'static str, attrs: &mut FoAttrs) {
    attrs.push_opt(name, value, |d| d.fo_value());
}
