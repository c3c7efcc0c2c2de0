use super::{mismatch, push_id};
use crate::attributes::block_attributes;
use crate::error::GenerateError;
use crate::generator::{BlockContext, BlockGenerator};
use crate::writer::FoAttrs;
use folio_idf::{Element, ListOrdering};
use folio_resolve::StyledNode;
use folio_style::{Length, ListStyleType};

const DEFAULT_LABEL_WIDTH: Length = Length(18.0);
const DEFAULT_LABEL_SEPARATION: Length = Length(6.0);

/// `fo:list-block` with one label/body pair per item.
pub struct ListGenerator;

/// The marker style for a list: the styled label style when it agrees with the
/// list's ordering, else the ordering's default.
pub fn marker_style(ordering: ListOrdering, styled: Option<ListStyleType>) -> ListStyleType {
    match (ordering, styled) {
        (ListOrdering::Ordered, Some(style)) if style.is_ordered() => style,
        (ListOrdering::Ordered, _) => ListStyleType::Decimal,
        (ListOrdering::Unordered, Some(style)) if !style.is_ordered() => style,
        (ListOrdering::Unordered, _) => ListStyleType::Disc,
    }
}

impl BlockGenerator for ListGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let folio_resolve::NodeRef::Block(Element::List { ordering, .. }) = node.node else {
            mismatch("List", node.kind());
            return Ok(());
        };
        let list = node.style.properties.list();
        let label_style = marker_style(*ordering, list.and_then(|l| l.label_style));
        let label_width = list
            .and_then(|l| l.label_width)
            .unwrap_or(DEFAULT_LABEL_WIDTH);
        let separation = list
            .and_then(|l| l.label_separation)
            .unwrap_or(DEFAULT_LABEL_SEPARATION);

        let mut attrs = block_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        attrs.push("provisional-distance-between-starts", label_width.fo_value());
        attrs.push("provisional-label-separation", separation.fo_value());
        if ctx.artifact {
            attrs.push("role", "artifact");
        }
        ctx.out.start("fo:list-block", &attrs)?;

        for (index, item) in node.children.iter().enumerate() {
            let mut item_attrs = block_attributes(&item.style);
            push_id(item.meta(), &mut item_attrs);
            ctx.out.start("fo:list-item", &item_attrs)?;

            ctx.out
                .start("fo:list-item-label", &FoAttrs::new().with("end-indent", "label-end()"))?;
            ctx.out.text_element("fo:block", &label_style.marker(index + 1))?;
            ctx.out.end("fo:list-item-label")?;

            ctx.out
                .start("fo:list-item-body", &FoAttrs::new().with("start-indent", "body-start()"))?;
            if item.children.is_empty() {
                ctx.out.empty("fo:block", &FoAttrs::new())?;
            } else {
                ctx.blocks(&item.children)?;
            }
            ctx.out.end("fo:list-item-body")?;

            ctx.out.end("fo:list-item")?;
        }

        ctx.out.end("fo:list-block")
    }
}
