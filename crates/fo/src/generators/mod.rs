//! The built-in generator for every element kind.

mod block;
mod image;
mod inline;
mod list;
mod table;

pub use block::{ContainerGenerator, HeadlineGenerator, ParagraphGenerator};
pub use image::ImageGenerator;
pub use inline::{FootnoteGenerator, HyperlinkGenerator, PageNumberGenerator, TextRunGenerator};
pub use list::ListGenerator;
pub use table::TableGenerator;

use crate::generator::GeneratorRegistry;
use crate::writer::FoAttrs;
use folio_idf::ElementMeta;
use folio_style::ElementKind;

pub(crate) fn register_defaults(registry: &mut GeneratorRegistry) {
    registry.register_block(ElementKind::Paragraph, Box::new(ParagraphGenerator));
    registry.register_block(ElementKind::Headline, Box::new(HeadlineGenerator));
    registry.register_block(ElementKind::List, Box::new(ListGenerator));
    registry.register_block(ElementKind::Table, Box::new(TableGenerator { layout: false }));
    registry.register_block(ElementKind::LayoutTable, Box::new(TableGenerator { layout: true }));
    registry.register_block(ElementKind::Image, Box::new(ImageGenerator));
    registry.register_block(ElementKind::Section, Box::new(ContainerGenerator { role: "Sect" }));
    registry.register_block(ElementKind::Part, Box::new(ContainerGenerator { role: "Part" }));

    registry.register_inline(ElementKind::TextRun, Box::new(TextRunGenerator));
    registry.register_inline(ElementKind::Hyperlink, Box::new(HyperlinkGenerator));
    registry.register_inline(ElementKind::PageNumber, Box::new(PageNumberGenerator));
    registry.register_inline(ElementKind::Footnote, Box::new(FootnoteGenerator));
}

/// Carries the element's own anchor onto its formatting object.
pub(crate) fn push_id(meta: &ElementMeta, attrs: &mut FoAttrs) {
    if let Some(id) = &meta.id {
        attrs.push("id", id.as_str());
    }
}

pub(crate) fn mismatch(generator: &str, kind: ElementKind) {
    log::warn!("{} generator cannot handle '{}' elements, skipped", generator, kind);
}
