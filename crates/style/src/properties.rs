//! Per-category style property sets and the cascade merge rules.
//!
//! Every element category has its own property struct. The structs form a small
//! hierarchy (`Block` is the ancestor of most block categories, `Paragraph` of
//! `Headline`) expressed through an embedded parent field, so a more specific set
//! can always be viewed as any of its ancestors. Each field carries a static
//! inheritability flag: only inheritable fields pick up a value from a parent
//! style during [`PropertySet::merge_with`].

use crate::border::Border;
use crate::dimension::{Dimension, Length, Margins};
use crate::flow::{BreakKind, VerticalAlign};
use crate::list::ListStyleType;
use crate::text::{BaselineShift, TextAlign, TextDecoration};
use folio_types::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyCategory {
    Block,
    Paragraph,
    Headline,
    List,
    Table,
    TableCell,
    Image,
    Section,
    Inline,
}

impl PropertyCategory {
    pub const ALL: [PropertyCategory; 9] = [
        PropertyCategory::Block,
        PropertyCategory::Paragraph,
        PropertyCategory::Headline,
        PropertyCategory::List,
        PropertyCategory::Table,
        PropertyCategory::TableCell,
        PropertyCategory::Image,
        PropertyCategory::Section,
        PropertyCategory::Inline,
    ];

    pub fn parent(&self) -> Option<PropertyCategory> {
        match self {
            PropertyCategory::Block | PropertyCategory::Inline => None,
            PropertyCategory::Headline => Some(PropertyCategory::Paragraph),
            PropertyCategory::Paragraph
            | PropertyCategory::List
            | PropertyCategory::Table
            | PropertyCategory::TableCell
            | PropertyCategory::Image
            | PropertyCategory::Section => Some(PropertyCategory::Block),
        }
    }

    /// True when `self` is `other` or one of its descendants.
    pub fn is_a(&self, other: PropertyCategory) -> bool {
        let mut current = Some(*self);
        while let Some(category) = current {
            if category == other {
                return true;
            }
            current = category.parent();
        }
        false
    }

    pub fn name(&self) -> &'static str {
        match self {
            PropertyCategory::Block => "block",
            PropertyCategory::Paragraph => "paragraph",
            PropertyCategory::Headline => "headline",
            PropertyCategory::List => "list",
            PropertyCategory::Table => "table",
            PropertyCategory::TableCell => "table-cell",
            PropertyCategory::Image => "image",
            PropertyCategory::Section => "section",
            PropertyCategory::Inline => "inline",
        }
    }
}

impl fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one property field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub inheritable: bool,
}

pub trait PropertySet: Clone + Default + PartialEq {
    const CATEGORY: PropertyCategory;

    /// Fills every unset inheritable field from `base`. Local fields are left alone.
    fn merge_with(&mut self, base: &Self);

    /// Copies every field set on `self` onto `target`.
    fn apply_to(&self, target: &mut Self);

    /// All fields of this category, ancestors' fields first.
    fn descriptors() -> Vec<PropertyDescriptor>;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Projection of a [`StyleProperties`] value onto one concrete category.
///
/// `view` succeeds when the runtime variant is the implementor's category or a
/// descendant of it.
pub trait CategoryView: PropertySet {
    fn view(props: &StyleProperties) -> Option<&Self>;
    fn view_mut(props: &mut StyleProperties) -> Option<&mut Self>;
}

fn inherit<T: Clone>(target: &mut Option<T>, base: &Option<T>, inheritable: bool) {
    if inheritable && target.is_none() {
        target.clone_from(base);
    }
}

macro_rules! property_set {
    (@inheritable inherited) => {
        true
    };
    (@inheritable local) => {
        false
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident : $category:ident $(extends $parent_field:ident : $parent:ty)? {
            $($inh:ident $field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                #[serde(flatten)]
                pub $parent_field: $parent,
            )?
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl PropertySet for $name {
            const CATEGORY: PropertyCategory = PropertyCategory::$category;

            fn merge_with(&mut self, base: &Self) {
                $(self.$parent_field.merge_with(&base.$parent_field);)?
                $(inherit(&mut self.$field, &base.$field, property_set!(@inheritable $inh));)*
            }

            fn apply_to(&self, target: &mut Self) {
                $(self.$parent_field.apply_to(&mut target.$parent_field);)?
                $(
                    if self.$field.is_some() {
                        target.$field.clone_from(&self.$field);
                    }
                )*
            }

            fn descriptors() -> Vec<PropertyDescriptor> {
                #[allow(unused_mut)]
                let mut out: Vec<PropertyDescriptor> = Vec::new();
                $(out.extend(<$parent as PropertySet>::descriptors());)?
                $(
                    out.push(PropertyDescriptor {
                        name: stringify!($field),
                        inheritable: property_set!(@inheritable $inh),
                    });
                )*
                out
            }
        }
    };
}

property_set! {
    /// Properties shared by every block-level category.
    pub struct BlockProperties : Block {
        inherited text_style: String,
        inherited text_align: TextAlign,
        inherited line_height: Length,
        inherited color: Color,
        local space_before: Length,
        local space_after: Length,
        local start_indent: Length,
        local end_indent: Length,
        local padding: Margins,
        local border: Border,
        local border_top: Border,
        local border_right: Border,
        local border_bottom: Border,
        local border_left: Border,
        local background_color: Color,
        local break_before: BreakKind,
        local break_after: BreakKind,
        local keep_with_next: bool,
        local keep_together: bool,
    }
}

property_set! {
    pub struct ParagraphProperties : Paragraph extends block: BlockProperties {
        inherited text_indent: Length,
        inherited widows: u32,
        inherited orphans: u32,
        inherited hyphenate: bool,
    }
}

property_set! {
    pub struct HeadlineProperties : Headline extends paragraph: ParagraphProperties {}
}

property_set! {
    pub struct ListProperties : List extends block: BlockProperties {
        inherited label_style: ListStyleType,
        inherited label_width: Length,
        inherited label_separation: Length,
    }
}

property_set! {
    pub struct TableProperties : Table extends block: BlockProperties {
        local width: Dimension,
        local table_layout_fixed: bool,
        inherited border_collapse: bool,
    }
}

property_set! {
    pub struct TableCellProperties : TableCell extends block: BlockProperties {
        local vertical_align: VerticalAlign,
    }
}

property_set! {
    pub struct ImageProperties : Image extends block: BlockProperties {
        local content_width: Dimension,
        local content_height: Dimension,
        local scale_to_fit: bool,
    }
}

property_set! {
    pub struct SectionProperties : Section extends block: BlockProperties {}
}

property_set! {
    /// Properties of inline runs. Not related to the block hierarchy.
    pub struct InlineProperties : Inline {
        inherited text_style: String,
        inherited color: Color,
        local text_decoration: TextDecoration,
        local baseline_shift: BaselineShift,
        local background_color: Color,
    }
}

/// The closed family of property sets, tagged by category in JSON:
/// `{"category": "paragraph", "textStyle": "body", "spaceAfter": "6pt"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum StyleProperties {
    Block(BlockProperties),
    Paragraph(ParagraphProperties),
    Headline(HeadlineProperties),
    List(ListProperties),
    Table(TableProperties),
    TableCell(TableCellProperties),
    Image(ImageProperties),
    Section(SectionProperties),
    Inline(InlineProperties),
}

impl StyleProperties {
    /// An empty property set of the given category.
    pub fn empty(category: PropertyCategory) -> Self {
        match category {
            PropertyCategory::Block => Self::Block(Default::default()),
            PropertyCategory::Paragraph => Self::Paragraph(Default::default()),
            PropertyCategory::Headline => Self::Headline(Default::default()),
            PropertyCategory::List => Self::List(Default::default()),
            PropertyCategory::Table => Self::Table(Default::default()),
            PropertyCategory::TableCell => Self::TableCell(Default::default()),
            PropertyCategory::Image => Self::Image(Default::default()),
            PropertyCategory::Section => Self::Section(Default::default()),
            PropertyCategory::Inline => Self::Inline(Default::default()),
        }
    }

    pub fn category(&self) -> PropertyCategory {
        match self {
            Self::Block(_) => PropertyCategory::Block,
            Self::Paragraph(_) => PropertyCategory::Paragraph,
            Self::Headline(_) => PropertyCategory::Headline,
            Self::List(_) => PropertyCategory::List,
            Self::Table(_) => PropertyCategory::Table,
            Self::TableCell(_) => PropertyCategory::TableCell,
            Self::Image(_) => PropertyCategory::Image,
            Self::Section(_) => PropertyCategory::Section,
            Self::Inline(_) => PropertyCategory::Inline,
        }
    }

    /// Merges `base` into `self` when `base` can be viewed as `self`'s category.
    /// An incompatible base leaves `self` untouched.
    pub fn merge_with(&mut self, base: &StyleProperties) {
        match self {
            Self::Block(p) => merge_viewed(p, base),
            Self::Paragraph(p) => merge_viewed(p, base),
            Self::Headline(p) => merge_viewed(p, base),
            Self::List(p) => merge_viewed(p, base),
            Self::Table(p) => merge_viewed(p, base),
            Self::TableCell(p) => merge_viewed(p, base),
            Self::Image(p) => merge_viewed(p, base),
            Self::Section(p) => merge_viewed(p, base),
            Self::Inline(p) => merge_viewed(p, base),
        }
    }

    /// Copies every field set on `self` onto `target`, provided `target` can be
    /// viewed as `self`'s category.
    pub fn apply_to(&self, target: &mut StyleProperties) {
        match self {
            Self::Block(p) => apply_viewed(p, target),
            Self::Paragraph(p) => apply_viewed(p, target),
            Self::Headline(p) => apply_viewed(p, target),
            Self::List(p) => apply_viewed(p, target),
            Self::Table(p) => apply_viewed(p, target),
            Self::TableCell(p) => apply_viewed(p, target),
            Self::Image(p) => apply_viewed(p, target),
            Self::Section(p) => apply_viewed(p, target),
            Self::Inline(p) => apply_viewed(p, target),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Block(p) => p.is_empty(),
            Self::Paragraph(p) => p.is_empty(),
            Self::Headline(p) => p.is_empty(),
            Self::List(p) => p.is_empty(),
            Self::Table(p) => p.is_empty(),
            Self::TableCell(p) => p.is_empty(),
            Self::Image(p) => p.is_empty(),
            Self::Section(p) => p.is_empty(),
            Self::Inline(p) => p.is_empty(),
        }
    }

    pub fn view<T: CategoryView>(&self) -> Option<&T> {
        T::view(self)
    }

    pub fn block(&self) -> Option<&BlockProperties> {
        BlockProperties::view(self)
    }

    pub fn paragraph(&self) -> Option<&ParagraphProperties> {
        ParagraphProperties::view(self)
    }

    pub fn list(&self) -> Option<&ListProperties> {
        ListProperties::view(self)
    }

    pub fn table(&self) -> Option<&TableProperties> {
        TableProperties::view(self)
    }

    pub fn table_cell(&self) -> Option<&TableCellProperties> {
        TableCellProperties::view(self)
    }

    pub fn image(&self) -> Option<&ImageProperties> {
        ImageProperties::view(self)
    }

    pub fn inline(&self) -> Option<&InlineProperties> {
        InlineProperties::view(self)
    }

    /// The text style named by this set, for either hierarchy.
    pub fn text_style(&self) -> Option<&str> {
        match self {
            Self::Inline(p) => p.text_style.as_deref(),
            other => other.block().and_then(|b| b.text_style.as_deref()),
        }
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Inline(p) => p.color,
            other => other.block().and_then(|b| b.color),
        }
    }
}

fn merge_viewed<T: CategoryView>(target: &mut T, base: &StyleProperties) {
    match T::view(base) {
        Some(base) => target.merge_with(base),
        None => log::debug!(
            "Skipping merge of '{}' properties into '{}' properties: incompatible categories",
            base.category(),
            T::CATEGORY
        ),
    }
}

fn apply_viewed<T: CategoryView>(source: &T, target: &mut StyleProperties) {
    let target_category = target.category();
    match T::view_mut(target) {
        Some(target) => source.apply_to(target),
        None => log::debug!(
            "Ignoring '{}' override on '{}' properties: incompatible categories",
            T::CATEGORY,
            target_category
        ),
    }
}

impl CategoryView for BlockProperties {
    fn view(props: &StyleProperties) -> Option<&Self> {
        match props {
            StyleProperties::Block(p) => Some(p),
            StyleProperties::Paragraph(p) => Some(&p.block),
            StyleProperties::Headline(p) => Some(&p.paragraph.block),
            StyleProperties::List(p) => Some(&p.block),
            StyleProperties::Table(p) => Some(&p.block),
            StyleProperties::TableCell(p) => Some(&p.block),
            StyleProperties::Image(p) => Some(&p.block),
            StyleProperties::Section(p) => Some(&p.block),
            StyleProperties::Inline(_) => None,
        }
    }

    fn view_mut(props: &mut StyleProperties) -> Option<&mut Self> {
        match props {
            StyleProperties::Block(p) => Some(p),
            StyleProperties::Paragraph(p) => Some(&mut p.block),
            StyleProperties::Headline(p) => Some(&mut p.paragraph.block),
            StyleProperties::List(p) => Some(&mut p.block),
            StyleProperties::Table(p) => Some(&mut p.block),
            StyleProperties::TableCell(p) => Some(&mut p.block),
            StyleProperties::Image(p) => Some(&mut p.block),
            StyleProperties::Section(p) => Some(&mut p.block),
            StyleProperties::Inline(_) => None,
        }
    }
}

impl CategoryView for ParagraphProperties {
    fn view(props: &StyleProperties) -> Option<&Self> {
        match props {
            StyleProperties::Paragraph(p) => Some(p),
            StyleProperties::Headline(p) => Some(&p.paragraph),
            _ => None,
        }
    }

    fn view_mut(props: &mut StyleProperties) -> Option<&mut Self> {
        match props {
            StyleProperties::Paragraph(p) => Some(p),
            StyleProperties::Headline(p) => Some(&mut p.paragraph),
            _ => None,
        }
    }
}

/// Implements `CategoryView` for a category without descendants.
macro_rules! leaf_view {
    ($ty:ty, $variant:ident) => {
        impl CategoryView for $ty {
            fn view(props: &StyleProperties) -> Option<&Self> {
                match props {
                    StyleProperties::$variant(p) => Some(p),
                    _ => None,
                }
            }

            fn view_mut(props: &mut StyleProperties) -> Option<&mut Self> {
                match props {
                    StyleProperties::$variant(p) => Some(p),
                    _ => None,
                }
            }
        }
    };
}

leaf_view!(HeadlineProperties, Headline);
leaf_view!(ListProperties, List);
leaf_view!(TableProperties, Table);
leaf_view!(TableCellProperties, TableCell);
leaf_view!(ImageProperties, Image);
leaf_view!(SectionProperties, Section);
leaf_view!(InlineProperties, Inline);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(text_style: Option<&str>, space_before: Option<f32>) -> BlockProperties {
        BlockProperties {
            text_style: text_style.map(str::to_string),
            space_before: space_before.map(Length),
            ..Default::default()
        }
    }

    #[test]
    fn inheritable_fields_fill_from_base() {
        let mut own = ParagraphProperties::default();
        let base = ParagraphProperties {
            block: BlockProperties {
                text_style: Some("body".into()),
                color: Some(Color::rgb(1, 2, 3)),
                space_before: Some(Length(12.0)),
                keep_with_next: Some(true),
                ..Default::default()
            },
            widows: Some(2),
            ..Default::default()
        };
        own.merge_with(&base);
        assert_eq!(own.block.text_style.as_deref(), Some("body"));
        assert_eq!(own.block.color, Some(Color::rgb(1, 2, 3)));
        assert_eq!(own.widows, Some(2));
        assert_eq!(own.block.space_before, None);
        assert_eq!(own.block.keep_with_next, None);
    }

    #[test]
    fn own_values_win_over_base() {
        let mut own = block(Some("caption"), None);
        own.merge_with(&block(Some("body"), Some(4.0)));
        assert_eq!(own.text_style.as_deref(), Some("caption"));
    }

    #[test]
    fn headline_merges_from_paragraph_base() {
        let mut own = StyleProperties::empty(PropertyCategory::Paragraph);
        let base = StyleProperties::Headline(HeadlineProperties {
            paragraph: ParagraphProperties {
                block: block(Some("h1"), Some(18.0)),
                hyphenate: Some(false),
                ..Default::default()
            },
        });
        own.merge_with(&base);
        let p = own.paragraph().unwrap();
        assert_eq!(p.block.text_style.as_deref(), Some("h1"));
        assert_eq!(p.hyphenate, Some(false));
        assert_eq!(p.block.space_before, None);
    }

    #[test]
    fn incompatible_merge_is_a_no_op() {
        let original = StyleProperties::Paragraph(ParagraphProperties {
            text_indent: Some(Length(10.0)),
            ..Default::default()
        });

        let mut target = original.clone();
        target.merge_with(&StyleProperties::Inline(InlineProperties {
            text_style: Some("mono".into()),
            ..Default::default()
        }));
        assert_eq!(target, original);

        // An ancestor cannot be viewed as the more specific category.
        let mut target = original.clone();
        target.merge_with(&StyleProperties::Block(block(Some("body"), None)));
        assert_eq!(target, original);

        // Nor can a sibling.
        let mut target = original.clone();
        target.merge_with(&StyleProperties::List(ListProperties {
            block: block(Some("body"), None),
            ..Default::default()
        }));
        assert_eq!(target, original);
    }

    #[test]
    fn views_follow_the_category_hierarchy() {
        for target in PropertyCategory::ALL {
            for base in PropertyCategory::ALL {
                let base_props = StyleProperties::empty(base);
                let viewable = match target {
                    PropertyCategory::Block => base_props.block().is_some(),
                    PropertyCategory::Paragraph => base_props.paragraph().is_some(),
                    PropertyCategory::Headline => base_props.view::<HeadlineProperties>().is_some(),
                    PropertyCategory::List => base_props.list().is_some(),
                    PropertyCategory::Table => base_props.table().is_some(),
                    PropertyCategory::TableCell => base_props.table_cell().is_some(),
                    PropertyCategory::Image => base_props.image().is_some(),
                    PropertyCategory::Section => base_props.view::<SectionProperties>().is_some(),
                    PropertyCategory::Inline => base_props.inline().is_some(),
                };
                assert_eq!(viewable, base.is_a(target), "{} as {}", base, target);
            }
        }
    }

    #[test]
    fn override_applies_through_ancestor_view() {
        let mut own = StyleProperties::Headline(HeadlineProperties {
            paragraph: ParagraphProperties {
                block: block(Some("h2"), Some(12.0)),
                ..Default::default()
            },
        });
        let over = StyleProperties::Block(BlockProperties {
            space_before: Some(Length(0.0)),
            break_before: Some(BreakKind::Page),
            ..Default::default()
        });
        over.apply_to(&mut own);
        let b = own.block().unwrap();
        assert_eq!(b.text_style.as_deref(), Some("h2"));
        assert_eq!(b.space_before, Some(Length(0.0)));
        assert_eq!(b.break_before, Some(BreakKind::Page));

        let mut inline = StyleProperties::empty(PropertyCategory::Inline);
        over.apply_to(&mut inline);
        assert!(inline.is_empty());
    }

    #[test]
    fn descriptors_list_every_field_once() {
        let block = BlockProperties::descriptors();
        assert_eq!(block.len(), 19);
        let para = ParagraphProperties::descriptors();
        assert_eq!(para.len(), 23);
        assert_eq!(HeadlineProperties::descriptors(), para);
        let inheritable: Vec<_> = TableProperties::descriptors()
            .into_iter()
            .filter(|d| d.inheritable)
            .map(|d| d.name)
            .collect();
        assert_eq!(
            inheritable,
            vec!["text_style", "text_align", "line_height", "color", "border_collapse"]
        );
    }

    #[test]
    fn deserializes_tagged_camel_case_json() {
        let json = r##"{
            "category": "headline",
            "textStyle": "h1",
            "spaceBefore": "18pt",
            "keepWithNext": true,
            "border": "1pt solid #cccccc",
            "widows": 3
        }"##;
        let props: StyleProperties = serde_json::from_str(json).unwrap();
        assert_eq!(props.category(), PropertyCategory::Headline);
        assert_eq!(props.text_style(), Some("h1"));
        let p = props.paragraph().unwrap();
        assert_eq!(p.widows, Some(3));
        assert_eq!(p.block.space_before, Some(Length(18.0)));
        assert_eq!(p.block.keep_with_next, Some(true));
        assert_eq!(p.block.border.unwrap().width, Length(1.0));

        let inline: StyleProperties =
            serde_json::from_str(r##"{"category": "inline", "color": "#ff0000"}"##).unwrap();
        assert_eq!(inline.color(), Some(Color::rgb(255, 0, 0)));
    }

    fn arb_block() -> impl Strategy<Value = BlockProperties> {
        (
            proptest::option::of("[a-z]{1,6}"),
            proptest::option::of(0u8..=255),
            proptest::option::of(0.0f32..48.0),
            proptest::option::of(0.0f32..48.0),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(|(text_style, gray, line_height, space_after, keep)| BlockProperties {
                text_style,
                color: gray.map(Color::gray),
                line_height: line_height.map(Length),
                space_after: space_after.map(Length),
                keep_together: keep,
                ..Default::default()
            })
    }

    fn arb_paragraph() -> impl Strategy<Value = ParagraphProperties> {
        (
            arb_block(),
            proptest::option::of(0u32..5),
            proptest::option::of(0.0f32..36.0),
        )
            .prop_map(|(block, widows, indent)| ParagraphProperties {
                block,
                widows,
                text_indent: indent.map(Length),
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(own in arb_paragraph(), base in arb_paragraph()) {
            let mut once = own.clone();
            once.merge_with(&base);
            let mut twice = once.clone();
            twice.merge_with(&base);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn merge_respects_inheritability(own in arb_paragraph(), base in arb_paragraph()) {
            let mut merged = own.clone();
            merged.merge_with(&base);
            prop_assert_eq!(
                &merged.block.text_style,
                &own.block.text_style.clone().or(base.block.text_style.clone())
            );
            prop_assert_eq!(merged.block.color, own.block.color.or(base.block.color));
            prop_assert_eq!(merged.widows, own.widows.or(base.widows));
            prop_assert_eq!(merged.block.space_after, own.block.space_after);
            prop_assert_eq!(merged.block.keep_together, own.block.keep_together);
        }

        #[test]
        fn merging_an_empty_base_changes_nothing(own in arb_paragraph()) {
            let mut merged = own.clone();
            merged.merge_with(&ParagraphProperties::default());
            prop_assert_eq!(merged, own);
        }

        #[test]
        fn apply_then_read_back(own in arb_block(), over in arb_block()) {
            let mut target = own.clone();
            over.apply_to(&mut target);
            prop_assert_eq!(&target.text_style, &over.text_style.clone().or(own.text_style.clone()));
            prop_assert_eq!(target.space_after, over.space_after.or(own.space_after));
        }
    }
}
