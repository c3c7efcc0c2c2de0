//! Exports a [`FontSet`] as the `<fonts>` section of an FO processor configuration.

use crate::error::GenerateError;
use crate::writer::{FoAttrs, FoWriter};
use folio_traits::FontSet;

/// One embedded `<font>` per variant, each with its single font triplet.
pub fn font_configuration(fonts: &FontSet, pretty: bool) -> Result<String, GenerateError> {
    let mut out = FoWriter::new(pretty);
    out.open("fonts")?;
    for (family, variants) in fonts.families() {
        for variant in variants {
            out.start(
                "font",
                &FoAttrs::new()
                    .with("embed-url", variant.path.clone())
                    .with("kerning", "yes"),
            )?;
            out.empty(
                "font-triplet",
                &FoAttrs::new()
                    .with("name", family)
                    .with("style", variant.style.fo_value())
                    .with("weight", variant.weight.fo_value()),
            )?;
            out.end("font")?;
        }
    }
    out.end("fonts")?;
    out.into_string()
}
