//! Shared attribute emission for block and inline formatting objects.

use crate::writer::FoAttrs;
use folio_resolve::ResolvedStyle;
use folio_style::dimension::format_number;
use folio_style::{BlockProperties, Length, StyleProperties, TextStyle};

/// The font a node declares itself, i.e. when its own properties name a text
/// style. Fonts reached only through the context are inherited by the FO tree.
pub fn own_font(style: &ResolvedStyle) -> Option<&TextStyle> {
    let name = style.properties.text_style()?;
    style.font.as_deref().filter(|font| font.name == name)
}

pub fn font_attributes(font: &TextStyle, attrs: &mut FoAttrs) {
    attrs.push("font-family", font.font_family.clone());
    attrs.push("font-size", font.font_size.fo_value());
    attrs.push("font-weight", font.font_weight.fo_value());
    attrs.push("font-style", font.font_style.fo_value());
}

/// All attributes of a block-level node: font, block properties and the extra
/// paragraph properties when present.
pub fn block_attributes(style: &ResolvedStyle) -> FoAttrs {
    let mut attrs = FoAttrs::new();
    if let Some(font) = own_font(style) {
        font_attributes(font, &mut attrs);
    }
    if let Some(block) = style.properties.block() {
        block_properties(block, &mut attrs);
    }
    if let Some(p) = style.properties.paragraph() {
        attrs.push_opt("text-indent", p.text_indent, |v| v.fo_value());
        attrs.push_opt("widows", p.widows, |v| v.to_string());
        attrs.push_opt("orphans", p.orphans, |v| v.to_string());
        attrs.push_opt("hyphenate", p.hyphenate, |v| v.to_string());
    }
    attrs
}

fn length(v: Length) -> String {
    v.fo_value()
}

fn block_properties(b: &BlockProperties, attrs: &mut FoAttrs) {
    attrs.push_opt("text-align", b.text_align, |v| v.fo_value().to_string());
    attrs.push_opt("line-height", b.line_height, length);
    attrs.push_opt("color", b.color, |v| v.to_hex());
    attrs.push_opt("space-before", b.space_before, length);
    attrs.push_opt("space-after", b.space_after, length);
    attrs.push_opt("start-indent", b.start_indent, length);
    attrs.push_opt("end-indent", b.end_indent, length);
    if let Some(p) = b.padding {
        attrs.push("padding-top", format!("{}pt", format_number(p.top)));
        attrs.push("padding-right", format!("{}pt", format_number(p.right)));
        attrs.push("padding-bottom", format!("{}pt", format_number(p.bottom)));
        attrs.push("padding-left", format!("{}pt", format_number(p.left)));
    }
    attrs.push_opt("border", b.border, |v| v.fo_value());
    attrs.push_opt("border-top", b.border_top, |v| v.fo_value());
    attrs.push_opt("border-right", b.border_right, |v| v.fo_value());
    attrs.push_opt("border-bottom", b.border_bottom, |v| v.fo_value());
    attrs.push_opt("border-left", b.border_left, |v| v.fo_value());
    attrs.push_opt("background-color", b.background_color, |v| v.to_hex());
    attrs.push_opt("break-before", b.break_before, |v| v.fo_value().to_string());
    attrs.push_opt("break-after", b.break_after, |v| v.fo_value().to_string());
    if b.keep_with_next == Some(true) {
        attrs.push("keep-with-next.within-page", "always");
    }
    if b.keep_together == Some(true) {
        attrs.push("keep-together.within-page", "always");
    }
}

/// Attributes of an inline node.
pub fn inline_attributes(style: &ResolvedStyle) -> FoAttrs {
    let mut attrs = FoAttrs::new();
    if let Some(font) = own_font(style) {
        font_attributes(font, &mut attrs);
    }
    if let StyleProperties::Inline(i) = style.properties() {
        attrs.push_opt("color", i.color, |v| v.to_hex());
        attrs.push_opt("text-decoration", i.text_decoration, |v| v.fo_value().to_string());
        attrs.push_opt("baseline-shift", i.baseline_shift, |v| v.fo_value().to_string());
        attrs.push_opt("background-color", i.background_color, |v| v.to_hex());
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_style::{
        Border, BorderStyle, BreakKind, FontWeight, InlineProperties, Margins,
        ParagraphProperties, TextDecoration,
    };
    use folio_types::Color;
    use std::sync::Arc;

    fn resolved(properties: StyleProperties, font: Option<TextStyle>) -> ResolvedStyle {
        ResolvedStyle {
            name: "test".into(),
            properties: Arc::new(properties),
            font: font.map(Arc::new),
        }
    }

    #[test]
    fn block_attributes_cover_spacing_borders_and_keeps() {
        let style = resolved(
            StyleProperties::Paragraph(ParagraphProperties {
                block: BlockProperties {
                    text_style: Some("body".into()),
                    space_before: Some(Length(12.0)),
                    padding: Some(Margins::vertical(2.0)),
                    border_bottom: Some(Border::new(0.5, BorderStyle::Solid, Color::gray(0x99))),
                    break_before: Some(BreakKind::Page),
                    keep_with_next: Some(true),
                    keep_together: Some(false),
                    ..Default::default()
                },
                widows: Some(2),
                ..Default::default()
            }),
            Some(TextStyle::new("body", "Serif").size(10.5).weight(FontWeight::Bold)),
        );
        let attrs = block_attributes(&style);
        assert_eq!(attrs.get("font-family"), Some("Serif"));
        assert_eq!(attrs.get("font-size"), Some("10.5pt"));
        assert_eq!(attrs.get("font-weight"), Some("bold"));
        assert_eq!(attrs.get("space-before"), Some("12pt"));
        assert_eq!(attrs.get("padding-top"), Some("2pt"));
        assert_eq!(attrs.get("padding-left"), Some("0pt"));
        assert_eq!(attrs.get("border-bottom"), Some("0.5pt solid #999999"));
        assert_eq!(attrs.get("break-before"), Some("page"));
        assert_eq!(attrs.get("keep-with-next.within-page"), Some("always"));
        assert_eq!(attrs.get("keep-together.within-page"), None);
        assert_eq!(attrs.get("widows"), Some("2"));
    }

    #[test]
    fn inherited_font_is_not_repeated() {
        let style = resolved(
            StyleProperties::empty(folio_style::PropertyCategory::Paragraph),
            Some(TextStyle::new("body", "Serif")),
        );
        assert!(block_attributes(&style).get("font-family").is_none());
    }

    #[test]
    fn inline_attributes() {
        let style = resolved(
            StyleProperties::Inline(InlineProperties {
                color: Some(Color::rgb(0, 0, 255)),
                text_decoration: Some(TextDecoration::Underline),
                ..Default::default()
            }),
            None,
        );
        let attrs = super::inline_attributes(&style);
        assert_eq!(attrs.get("color"), Some("#0000ff"));
        assert_eq!(attrs.get("text-decoration"), Some("underline"));
    }
}
