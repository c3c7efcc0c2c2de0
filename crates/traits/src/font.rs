//! The font registration descriptor handed to the rendering engine.
//!
//! Only fonts registered here may be used by text styles: the output must embed
//! every font it references, so coverage is checked up front.

use folio_style::{ConfigError, FontStyle, FontWeight, StyleSheet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One font file providing a (weight, style) face of a family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontVariant {
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
    /// Path of the font file, relative to the engine's font base directory.
    pub path: String,
}

impl FontVariant {
    pub fn matches(&self, weight: &FontWeight, style: FontStyle) -> bool {
        self.weight.matches(weight) && self.style == style
    }

    fn describe(&self) -> String {
        format!("{} {}", self.weight, self.style)
    }
}

/// Registered families keyed by family name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontSet {
    families: BTreeMap<String, Vec<FontVariant>>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(
        mut self,
        family: impl Into<String>,
        weight: FontWeight,
        style: FontStyle,
        path: impl Into<String>,
    ) -> Self {
        self.add_variant(family, weight, style, path);
        self
    }

    pub fn add_variant(
        &mut self,
        family: impl Into<String>,
        weight: FontWeight,
        style: FontStyle,
        path: impl Into<String>,
    ) {
        self.families.entry(family.into()).or_default().push(FontVariant {
            weight,
            style,
            path: path.into(),
        });
    }

    pub fn family(&self, name: &str) -> Option<&[FontVariant]> {
        self.families.get(name).map(Vec::as_slice)
    }

    pub fn families(&self) -> impl Iterator<Item = (&str, &[FontVariant])> {
        self.families
            .iter()
            .map(|(name, variants)| (name.as_str(), variants.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Checks that every text style the sheet defines or references is backed
    /// by a registered (family, weight, style) triple.
    ///
    /// Defined but unreferenced styles count too: an element's inline override
    /// may name any of them at generation time.
    pub fn verify_coverage(&self, sheet: &StyleSheet) -> Result<(), ConfigError> {
        let names: BTreeSet<String> = sheet
            .referenced_text_styles()
            .into_keys()
            .chain(sheet.text_styles().map(|style| style.name.clone()))
            .collect();
        for name in names {
            // Unknown names are reported by the sheet's own validation.
            let Some(style) = sheet.text_style(&name) else {
                continue;
            };
            let Some(variants) = self.family(&style.font_family) else {
                return Err(ConfigError::MissingFontFamily {
                    text_style: style.name.clone(),
                    family: style.font_family.clone(),
                    available: self.families.keys().cloned().collect::<Vec<_>>().join(", "),
                });
            };
            if !variants
                .iter()
                .any(|v| v.matches(&style.font_weight, style.font_style))
            {
                return Err(ConfigError::MissingFontVariant {
                    text_style: style.name.clone(),
                    family: style.font_family.clone(),
                    weight: style.font_weight.to_string(),
                    style: style.font_style.to_string(),
                    available: variants
                        .iter()
                        .map(FontVariant::describe)
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
            log::debug!(
                "Text style '{}' is covered by {} {} {}",
                style.name,
                style.font_family,
                style.font_weight,
                style.font_style
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_style::{
        BlockProperties, ElementKind, ElementStyle, ParagraphProperties, StyleProperties,
        TextStyle,
    };

    fn sheet_using(text_style: TextStyle) -> StyleSheet {
        let name = text_style.name.clone();
        StyleSheet::new().with_text_style(text_style).with_element_style(ElementStyle::new(
            "paragraph-default",
            ElementKind::Paragraph,
            StyleProperties::Paragraph(ParagraphProperties {
                block: BlockProperties {
                    text_style: Some(name),
                    ..Default::default()
                },
                ..Default::default()
            }),
        ))
    }

    fn fonts() -> FontSet {
        FontSet::new()
            .with_variant("Serif", FontWeight::Regular, FontStyle::Normal, "serif.ttf")
            .with_variant("Serif", FontWeight::Bold, FontStyle::Normal, "serif-bold.ttf")
    }

    #[test]
    fn covered_styles_pass() {
        let sheet = sheet_using(TextStyle::new("body", "Serif").weight(FontWeight::Numeric(700)));
        assert_eq!(fonts().verify_coverage(&sheet), Ok(()));
    }

    #[test]
    fn missing_variant_names_the_triple() {
        let sheet = sheet_using(TextStyle::new("em", "Serif").style(FontStyle::Italic));
        let err = fonts().verify_coverage(&sheet).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingFontVariant {
                text_style: "em".into(),
                family: "Serif".into(),
                weight: "normal".into(),
                style: "italic".into(),
                available: "normal normal, bold normal".into(),
            }
        );
    }

    #[test]
    fn missing_family_lists_registered_ones() {
        let sheet = sheet_using(TextStyle::new("code", "Mono"));
        let err = fonts().verify_coverage(&sheet).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFontFamily { ref family, .. } if family == "Mono"));
        assert!(err.to_string().contains("Available families: [Serif]"));
    }

    #[test]
    fn unreferenced_text_styles_are_checked_too() {
        let sheet = sheet_using(TextStyle::new("body", "Serif"))
            .with_text_style(TextStyle::new("fancy", "Nowhere"));
        let err = fonts().verify_coverage(&sheet).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingFontFamily { ref text_style, ref family, .. }
                if text_style == "fancy" && family == "Nowhere"
        ));
    }

    #[test]
    fn deserializes_family_map() {
        let json = r#"{ "Serif": [ { "weight": "bold", "style": "italic", "path": "sbi.ttf" } ] }"#;
        let set: FontSet = serde_json::from_str(json).unwrap();
        let variants = set.family("Serif").unwrap();
        assert!(variants[0].matches(&FontWeight::Bold, FontStyle::Italic));
    }
}
