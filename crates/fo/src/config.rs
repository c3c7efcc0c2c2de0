use serde::{Deserialize, Serialize};

/// Output options for markup generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationConfig {
    /// Indent the produced markup.
    pub pretty: bool,
    /// Declare the `fox:` namespace and emit alternate text for images.
    pub fox_extensions: bool,
    /// `xml:lang` used when the document metadata names no language.
    pub default_language: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            fox_extensions: true,
            default_language: "en".to_string(),
        }
    }
}
