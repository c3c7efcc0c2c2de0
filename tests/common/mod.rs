#![allow(dead_code)]

use folio::{DocumentPipeline, PipelineBuilder, PipelineError};
use folio_style::{FontStyle, FontWeight};
use folio_traits::FontSet;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A report style sheet: body and heading text styles, a bold headline
/// default, a note paragraph style and a page master with header and footer.
pub const STYLESHEET: &str = r##"{
    "textStyles": [
        { "name": "body", "fontFamily": "Source Serif", "fontSize": "10.5pt" },
        { "name": "heading", "fontFamily": "Source Sans", "fontSize": 16, "fontWeight": "bold" },
        { "name": "small", "fontFamily": "Source Serif", "fontSize": 8, "fontStyle": "italic" }
    ],
    "elementStyles": [
        {
            "name": "headline-default",
            "target": "headline",
            "properties": {
                "category": "headline",
                "textStyle": "heading",
                "spaceBefore": "12pt",
                "keepWithNext": true
            }
        },
        {
            "name": "note",
            "target": "paragraph",
            "properties": {
                "category": "paragraph",
                "textStyle": "small",
                "color": "#555555",
                "startIndent": "1cm"
            }
        },
        {
            "name": "chapter",
            "target": "section",
            "properties": { "category": "section", "breakBefore": "page", "textAlign": "justify" }
        }
    ],
    "pageMasters": [
        {
            "name": "report",
            "size": "A4",
            "margins": "2cm",
            "headerExtent": "1cm",
            "footerExtent": "1cm"
        }
    ],
    "defaultTextStyle": "body"
}"##;

pub fn fonts() -> FontSet {
    FontSet::new()
        .with_variant("Source Serif", FontWeight::Regular, FontStyle::Normal, "fonts/serif.ttf")
        .with_variant("Source Serif", FontWeight::Regular, FontStyle::Italic, "fonts/serif-i.ttf")
        .with_variant("Source Sans", FontWeight::Bold, FontStyle::Normal, "fonts/sans-b.ttf")
}

pub fn pipeline() -> Result<DocumentPipeline, PipelineError> {
    PipelineBuilder::new()
        .with_stylesheet_json(STYLESHEET)?
        .with_fonts(fonts())
        .build()
}

/// Byte offset of `needle`, failing the test with the markup when absent.
pub fn position(markup: &str, needle: &str) -> usize {
    markup
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, markup))
}
