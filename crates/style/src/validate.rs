//! Cross-reference checks run once on a loaded style sheet, before any generation.
use crate::kind::ElementKind;
use crate::stylesheet::StyleSheet;
use std::collections::BTreeMap;
use thiserror::Error;

/// A configuration mistake that must be fixed before a document can be generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Text style '{text_style}' referenced by {referenced_by} is not defined")]
    UnknownTextStyle {
        text_style: String,
        referenced_by: String,
    },

    #[error(
        "Text style '{text_style}' uses font family '{family}', which is not registered. Available families: [{available}]"
    )]
    MissingFontFamily {
        text_style: String,
        family: String,
        available: String,
    },

    #[error(
        "Text style '{text_style}' needs {family} {weight} {style}, but the family only provides: [{available}]"
    )]
    MissingFontVariant {
        text_style: String,
        family: String,
        weight: String,
        style: String,
        available: String,
    },

    #[error("Default style for '{kind}' names unknown element style '{style}'")]
    UnknownDefaultStyle { kind: ElementKind, style: String },

    #[error("Page master '{name}' is not defined. Available page masters: [{available}]")]
    UnknownPageMaster { name: String, available: String },

    #[error("The style sheet defines no page masters")]
    NoPageMasters,
}

impl StyleSheet {
    /// Every text style name the sheet refers to, mapped to a description of the
    /// first place that refers to it.
    pub fn referenced_text_styles(&self) -> BTreeMap<String, String> {
        let mut refs = BTreeMap::new();
        if let Some(name) = self.default_text_style_name() {
            refs.entry(name.to_string())
                .or_insert_with(|| "the default text style".to_string());
        }
        let mut styles: Vec<_> = self.element_styles().collect();
        styles.sort_by(|a, b| a.name.cmp(&b.name));
        for style in styles {
            if let Some(name) = style.properties.text_style() {
                refs.entry(name.to_string())
                    .or_insert_with(|| format!("element style '{}'", style.name));
            }
        }
        refs
    }

    /// Checks the internal references of the sheet: text style names, default
    /// style entries and the presence of at least one page master.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_masters().is_empty() {
            return Err(ConfigError::NoPageMasters);
        }

        for (text_style, referenced_by) in self.referenced_text_styles() {
            if self.text_style(&text_style).is_none() {
                return Err(ConfigError::UnknownTextStyle {
                    text_style,
                    referenced_by,
                });
            }
        }

        if let Some(defaults) = self.default_styles() {
            let mut entries: Vec<_> = defaults.0.iter().collect();
            entries.sort();
            for (kind, style) in entries {
                if self.element_style(style).is_none() {
                    return Err(ConfigError::UnknownDefaultStyle {
                        kind: *kind,
                        style: style.clone(),
                    });
                }
            }
        }

        for style in self.element_styles() {
            if style.properties.category() != style.target.category() {
                log::debug!(
                    "Element style '{}' targets '{}' but carries '{}' properties",
                    style.name,
                    style.target,
                    style.properties.category()
                );
            }
        }

        Ok(())
    }

    /// Checks that `name` is a declared page master.
    pub fn check_page_master(&self, name: &str) -> Result<(), ConfigError> {
        if self.page_master(name).is_some() {
            return Ok(());
        }
        let available = self
            .page_masters()
            .iter()
            .map(|m| m.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConfigError::UnknownPageMaster {
            name: name.to_string(),
            available,
        })
    }
}
