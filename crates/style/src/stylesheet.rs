//! Defines the top-level stylesheet structure that holds all styling information.

use crate::dimension::{Length, Margins, PageSize};
use crate::font::{FontStyle, FontWeight};
use crate::kind::ElementKind;
use crate::properties::StyleProperties;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the page master every sheet starts with.
pub const DEFAULT_PAGE_MASTER: &str = "default";

/// The immutable style aggregate shared by every resolution and generation call.
///
/// In JSON the named records are plain lists; lookups go through maps keyed by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StyleSheetDef", into = "StyleSheetDef")]
pub struct StyleSheet {
    text_styles: HashMap<String, Arc<TextStyle>>,
    element_styles: HashMap<String, Arc<ElementStyle>>,
    page_masters: Vec<PageMasterStyle>,
    default_styles: Option<DefaultStyles>,
    default_text_style: Option<String>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        Self {
            text_styles: HashMap::new(),
            element_styles: HashMap::new(),
            page_masters: vec![PageMasterStyle::default()],
            default_styles: None,
            default_text_style: None,
        }
    }

    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        self.text_styles.insert(style.name.clone(), Arc::new(style));
        self
    }

    pub fn with_element_style(mut self, style: ElementStyle) -> Self {
        self.element_styles.insert(style.name.clone(), Arc::new(style));
        self
    }

    /// Adds a page master, replacing any existing master of the same name.
    pub fn with_page_master(mut self, master: PageMasterStyle) -> Self {
        match self.page_masters.iter_mut().find(|m| m.name == master.name) {
            Some(existing) => *existing = master,
            None => self.page_masters.push(master),
        }
        self
    }

    pub fn with_page_masters(mut self, masters: Vec<PageMasterStyle>) -> Self {
        self.page_masters = masters;
        self
    }

    pub fn with_default_style(mut self, kind: ElementKind, style_name: impl Into<String>) -> Self {
        self.default_styles
            .get_or_insert_with(DefaultStyles::default)
            .0
            .insert(kind, style_name.into());
        self
    }

    pub fn with_default_text_style(mut self, name: impl Into<String>) -> Self {
        self.default_text_style = Some(name.into());
        self
    }

    pub fn text_style(&self, name: &str) -> Option<&Arc<TextStyle>> {
        self.text_styles.get(name)
    }

    pub fn text_styles(&self) -> impl Iterator<Item = &Arc<TextStyle>> {
        self.text_styles.values()
    }

    pub fn element_style(&self, name: &str) -> Option<&Arc<ElementStyle>> {
        self.element_styles.get(name)
    }

    pub fn element_styles(&self) -> impl Iterator<Item = &Arc<ElementStyle>> {
        self.element_styles.values()
    }

    pub fn page_masters(&self) -> &[PageMasterStyle] {
        &self.page_masters
    }

    pub fn page_master(&self, name: &str) -> Option<&PageMasterStyle> {
        self.page_masters.iter().find(|m| m.name == name)
    }

    /// The first declared page master, used by sequences that name none.
    pub fn default_page_master(&self) -> Option<&PageMasterStyle> {
        self.page_masters.first()
    }

    pub fn default_styles(&self) -> Option<&DefaultStyles> {
        self.default_styles.as_ref()
    }

    /// The default style name configured for `kind`, if any.
    pub fn default_style_for(&self, kind: ElementKind) -> Option<&str> {
        self.default_styles
            .as_ref()
            .and_then(|d| d.0.get(&kind))
            .map(String::as_str)
    }

    pub fn default_text_style_name(&self) -> Option<&str> {
        self.default_text_style.as_deref()
    }

    pub fn default_text_style(&self) -> Option<&Arc<TextStyle>> {
        self.default_text_style
            .as_deref()
            .and_then(|name| self.text_styles.get(name))
    }
}

/// Maps an element kind to the style name used when the element names none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultStyles(pub HashMap<ElementKind, String>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub name: String,
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: Length,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
}

fn default_font_size() -> Length {
    Length(12.0)
}

impl TextStyle {
    pub fn new(name: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font_family: font_family.into(),
            font_size: default_font_size(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
        }
    }

    pub fn size(mut self, points: f32) -> Self {
        self.font_size = Length(points);
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    pub name: String,
    pub target: ElementKind,
    pub properties: StyleProperties,
}

impl ElementStyle {
    pub fn new(name: impl Into<String>, target: ElementKind, properties: StyleProperties) -> Self {
        Self {
            name: name.into(),
            target,
            properties,
        }
    }
}

/// Page geometry for one page sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMasterStyle {
    pub name: String,
    #[serde(default)]
    pub size: PageSize,
    #[serde(default)]
    pub landscape: bool,
    #[serde(default = "default_page_margins")]
    pub margins: Margins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_extent: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_extent: Option<Length>,
}

fn default_page_margins() -> Margins {
    Margins::all(56.7)
}

impl Default for PageMasterStyle {
    fn default() -> Self {
        Self {
            name: DEFAULT_PAGE_MASTER.to_string(),
            size: PageSize::A4,
            landscape: false,
            margins: default_page_margins(),
            header_extent: None,
            footer_extent: None,
        }
    }
}

impl PageMasterStyle {
    pub fn new(name: impl Into<String>, size: PageSize) -> Self {
        Self {
            name: name.into(),
            size,
            ..Default::default()
        }
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn header(mut self, extent: f32) -> Self {
        self.header_extent = Some(Length(extent));
        self
    }

    pub fn footer(mut self, extent: f32) -> Self {
        self.footer_extent = Some(Length(extent));
        self
    }

    /// Page width and height in points, honouring orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.size.dimensions_pt();
        if self.landscape { (h, w) } else { (w, h) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StyleSheetDef {
    #[serde(default)]
    text_styles: Vec<TextStyle>,
    #[serde(default)]
    element_styles: Vec<ElementStyle>,
    #[serde(default = "default_page_masters")]
    page_masters: Vec<PageMasterStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_styles: Option<DefaultStyles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_text_style: Option<String>,
}

fn default_page_masters() -> Vec<PageMasterStyle> {
    vec![PageMasterStyle::default()]
}

impl From<StyleSheetDef> for StyleSheet {
    fn from(def: StyleSheetDef) -> Self {
        let text_styles = def
            .text_styles
            .into_iter()
            .map(|s| (s.name.clone(), Arc::new(s)))
            .collect();
        let element_styles = def
            .element_styles
            .into_iter()
            .map(|s| (s.name.clone(), Arc::new(s)))
            .collect();
        Self {
            text_styles,
            element_styles,
            page_masters: def.page_masters,
            default_styles: def.default_styles,
            default_text_style: def.default_text_style,
        }
    }
}

impl From<StyleSheet> for StyleSheetDef {
    fn from(sheet: StyleSheet) -> Self {
        let mut text_styles: Vec<TextStyle> =
            sheet.text_styles.values().map(|s| s.as_ref().clone()).collect();
        text_styles.sort_by(|a, b| a.name.cmp(&b.name));
        let mut element_styles: Vec<ElementStyle> = sheet
            .element_styles
            .values()
            .map(|s| s.as_ref().clone())
            .collect();
        element_styles.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            text_styles,
            element_styles,
            page_masters: sheet.page_masters,
            default_styles: sheet.default_styles,
            default_text_style: sheet.default_text_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyCategory;

    const SHEET: &str = r##"{
        "textStyles": [
            { "name": "body", "fontFamily": "Source Serif", "fontSize": "10.5pt" },
            { "name": "h1", "fontFamily": "Source Sans", "fontSize": 20, "fontWeight": "bold" }
        ],
        "elementStyles": [
            {
                "name": "headline-default",
                "target": "headline",
                "properties": { "category": "headline", "textStyle": "h1", "keepWithNext": true }
            },
            {
                "name": "quote",
                "target": "paragraph",
                "properties": { "category": "paragraph", "startIndent": "1cm" }
            }
        ],
        "pageMasters": [
            { "name": "portrait", "size": "A4", "margins": "2cm", "headerExtent": "1cm" }
        ],
        "defaultStyles": { "paragraph": "quote" },
        "defaultTextStyle": "body"
    }"##;

    #[test]
    fn deserializes_named_lists_into_lookup_maps() {
        let sheet: StyleSheet = serde_json::from_str(SHEET).unwrap();
        assert_eq!(sheet.text_style("h1").unwrap().font_weight, FontWeight::Bold);
        assert_eq!(sheet.text_style("body").unwrap().font_size, Length(10.5));
        let quote = sheet.element_style("quote").unwrap();
        assert_eq!(quote.target, ElementKind::Paragraph);
        assert_eq!(quote.properties.category(), PropertyCategory::Paragraph);
        assert_eq!(sheet.default_style_for(ElementKind::Paragraph), Some("quote"));
        assert_eq!(sheet.default_style_for(ElementKind::List), None);
        assert_eq!(sheet.default_text_style().unwrap().name, "body");
        let master = sheet.page_master("portrait").unwrap();
        assert_eq!(master.header_extent, Some(Length(1.0 * 28.35)));
        assert_eq!(sheet.default_page_master().unwrap().name, "portrait");
    }

    #[test]
    fn page_masters_default_to_a4() {
        let sheet: StyleSheet = serde_json::from_str("{}").unwrap();
        let master = sheet.default_page_master().unwrap();
        assert_eq!(master.name, DEFAULT_PAGE_MASTER);
        assert_eq!(master.size, PageSize::A4);
        assert_eq!(StyleSheet::new().page_masters().len(), 1);
    }

    #[test]
    fn builder_replaces_masters_by_name() {
        let sheet = StyleSheet::new()
            .with_page_master(PageMasterStyle::new(DEFAULT_PAGE_MASTER, PageSize::Letter))
            .with_page_master(PageMasterStyle::new("wide", PageSize::A4));
        assert_eq!(sheet.page_masters().len(), 2);
        assert_eq!(sheet.default_page_master().unwrap().size, PageSize::Letter);
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let mut master = PageMasterStyle::new("l", PageSize::Letter);
        master.landscape = true;
        assert_eq!(master.page_dimensions(), (792.0, 612.0));
    }

    #[test]
    fn serializes_back_to_lists() {
        let sheet: StyleSheet = serde_json::from_str(SHEET).unwrap();
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value["textStyles"][0]["name"], "body");
        assert_eq!(value["elementStyles"].as_array().unwrap().len(), 2);
    }
}
