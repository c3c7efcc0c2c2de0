//! The cascade step: name lookup, inline override, merge against the ambient style.

use folio_idf::ElementMeta;
use folio_style::{ElementKind, StyleProperties, StyleSheet, TextStyle};
use std::sync::Arc;

/// The fully resolved style of one node. Fixed once computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    /// The style name that was looked up, whether or not it existed.
    pub name: String,
    pub properties: Arc<StyleProperties>,
    /// Nearest font description, resolved through the text-style chain.
    pub font: Option<Arc<TextStyle>>,
}

impl ResolvedStyle {
    pub fn properties(&self) -> &StyleProperties {
        &self.properties
    }
}

/// Per-branch resolution state, created at the document root and derived at
/// every element. Cheap to clone; passed to children by value.
#[derive(Debug, Clone)]
pub struct StyleResolverContext<'s> {
    sheet: &'s StyleSheet,
    ambient: Option<Arc<StyleProperties>>,
    font: Option<Arc<TextStyle>>,
}

impl<'s> StyleResolverContext<'s> {
    pub fn root(sheet: &'s StyleSheet) -> Self {
        Self {
            sheet,
            ambient: None,
            font: None,
        }
    }

    pub fn sheet(&self) -> &'s StyleSheet {
        self.sheet
    }

    pub fn ambient(&self) -> Option<&StyleProperties> {
        self.ambient.as_deref()
    }

    pub fn font(&self) -> Option<&Arc<TextStyle>> {
        self.font.as_ref()
    }

    /// Explicit style class, else the sheet's default for `kind`, else `<kind>-default`.
    pub fn effective_style_name(&self, kind: ElementKind, meta: &ElementMeta) -> String {
        meta.style_class
            .clone()
            .or_else(|| self.sheet.default_style_for(kind).map(str::to_string))
            .unwrap_or_else(|| kind.default_style_name())
    }

    /// Resolves the style of an element of `kind` with metadata `meta` in this context.
    pub fn resolve(&self, kind: ElementKind, meta: &ElementMeta) -> ResolvedStyle {
        let name = self.effective_style_name(kind, meta);

        let mut properties = match self.sheet.element_style(&name) {
            Some(style) => style.properties.clone(),
            None => {
                log::debug!(
                    "No element style '{}' for {}, using empty {} properties",
                    name,
                    kind,
                    kind.category()
                );
                StyleProperties::empty(kind.category())
            }
        };

        if let Some(over) = &meta.style_override {
            over.apply_to(&mut properties);
        }

        if let Some(ambient) = &self.ambient {
            properties.merge_with(ambient);
        }

        let font = self.resolve_font(&properties);

        ResolvedStyle {
            name,
            properties: Arc::new(properties),
            font,
        }
    }

    /// The context handed to the children of a node resolved to `resolved`.
    pub fn derive(&self, resolved: &ResolvedStyle) -> Self {
        Self {
            sheet: self.sheet,
            ambient: Some(Arc::clone(&resolved.properties)),
            font: resolved.font.clone(),
        }
    }

    fn resolve_font(&self, properties: &StyleProperties) -> Option<Arc<TextStyle>> {
        let own = properties.text_style().and_then(|name| {
            let found = self.sheet.text_style(name).cloned();
            if found.is_none() {
                log::debug!("Text style '{}' is not defined, falling back", name);
            }
            found
        });
        own.or_else(|| self.font.clone())
            .or_else(|| self.sheet.default_text_style().cloned())
    }
}
