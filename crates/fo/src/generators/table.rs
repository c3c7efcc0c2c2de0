use super::{mismatch, push_id};
use crate::attributes::block_attributes;
use crate::error::GenerateError;
use crate::generator::{BlockContext, BlockGenerator};
use crate::writer::FoAttrs;
use folio_idf::{Element, TableSection};
use folio_resolve::{NodeRef, StyledNode};
use folio_style::Dimension;
use std::slice::Iter;

/// `fo:table` for data tables; layout tables get `role="Div"`.
pub struct TableGenerator {
    pub layout: bool,
}

fn column_width(width: &Dimension) -> String {
    match width {
        Dimension::Auto => "proportional-column-width(1)".to_string(),
        other => other.fo_value(),
    }
}

impl BlockGenerator for TableGenerator {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        let NodeRef::Block(Element::Table { table, .. } | Element::LayoutTable { table, .. }) =
            node.node
        else {
            mismatch("Table", node.kind());
            return Ok(());
        };
        if table.body.rows.is_empty() {
            log::warn!("Table without body rows skipped");
            return Ok(());
        }

        let mut attrs = block_attributes(&node.style);
        push_id(node.meta(), &mut attrs);
        if let Some(props) = node.style.properties.table() {
            attrs.push_opt("width", props.width, |w| w.fo_value());
            if props.table_layout_fixed == Some(true) {
                attrs.push("table-layout", "fixed");
            }
            attrs.push_opt("border-collapse", props.border_collapse, |collapse| {
                if collapse { "collapse" } else { "separate" }.to_string()
            });
        }
        if ctx.artifact {
            attrs.push("role", "artifact");
        } else if self.layout {
            attrs.push("role", "Div");
        }
        ctx.out.start("fo:table", &attrs)?;

        for width in &table.columns {
            ctx.out.empty(
                "fo:table-column",
                &FoAttrs::new().with("column-width", column_width(width)),
            )?;
        }

        // Styled children are the cells in header-then-body row order.
        let mut cells = node.children.iter();
        if let Some(header) = &table.header {
            ctx.out.open("fo:table-header")?;
            write_rows(header, &mut cells, ctx)?;
            ctx.out.end("fo:table-header")?;
        }
        ctx.out.open("fo:table-body")?;
        write_rows(&table.body, &mut cells, ctx)?;
        ctx.out.end("fo:table-body")?;

        ctx.out.end("fo:table")
    }
}

fn write_rows(
    section: &TableSection,
    cells: &mut Iter<'_, StyledNode<'_>>,
    ctx: &mut BlockContext<'_>,
) -> Result<(), GenerateError> {
    for row in &section.rows {
        ctx.out.open("fo:table-row")?;
        for styled in cells.by_ref().take(row.cells.len()) {
            write_cell(styled, ctx)?;
        }
        ctx.out.end("fo:table-row")?;
    }
    Ok(())
}

fn write_cell(node: &StyledNode<'_>, ctx: &mut BlockContext<'_>) -> Result<(), GenerateError> {
    let NodeRef::TableCell(cell) = node.node else {
        mismatch("Table cell", node.kind());
        return Ok(());
    };
    let mut attrs = block_attributes(&node.style);
    push_id(&cell.meta, &mut attrs);
    if cell.col_span > 1 {
        attrs.push("number-columns-spanned", cell.col_span.to_string());
    }
    if cell.row_span > 1 {
        attrs.push("number-rows-spanned", cell.row_span.to_string());
    }
    if let Some(align) = node.style.properties.table_cell().and_then(|c| c.vertical_align) {
        attrs.push("display-align", align.fo_value());
    }
    ctx.out.start("fo:table-cell", &attrs)?;
    if node.children.is_empty() {
        ctx.out.empty("fo:block", &FoAttrs::new())?;
    } else {
        ctx.blocks(&node.children)?;
    }
    ctx.out.end("fo:table-cell")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_columns_are_proportional() {
        assert_eq!(column_width(&Dimension::Auto), "proportional-column-width(1)");
        assert_eq!(column_width(&Dimension::Pt(72.0)), "72pt");
        assert_eq!(column_width(&Dimension::Percent(25.0)), "25%");
    }
}
