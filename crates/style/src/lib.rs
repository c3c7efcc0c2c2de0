//! Style sheet model: value types, the per-category property variants with their
//! inheritance rules, and the immutable `StyleSheet` aggregate.

pub mod border;
pub mod dimension;
pub mod flow;
pub mod font;
pub mod kind;
pub mod list;
pub mod parsers;
pub mod properties;
pub mod stylesheet;
pub mod text;
pub mod validate;

pub use border::{Border, BorderStyle};
pub use dimension::{Dimension, Length, Margins, PageSize};
pub use flow::{BreakKind, VerticalAlign};
pub use font::{FontStyle, FontWeight};
pub use kind::ElementKind;
pub use list::ListStyleType;
pub use parsers::StyleParseError;
pub use properties::{
    BlockProperties, CategoryView, HeadlineProperties, ImageProperties, InlineProperties,
    ListProperties, ParagraphProperties, PropertyCategory, PropertyDescriptor, PropertySet,
    SectionProperties, StyleProperties, TableCellProperties, TableProperties,
};
pub use stylesheet::{DefaultStyles, ElementStyle, PageMasterStyle, StyleSheet, TextStyle};
pub use text::{BaselineShift, TextAlign, TextDecoration};
pub use validate::ConfigError;
