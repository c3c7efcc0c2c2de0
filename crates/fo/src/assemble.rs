//! Top-level assembly of the FO document.
//!
//! Order is fixed: `fo:root`, the layout master set, the metadata declarations,
//! the bookmark tree, then one `fo:page-sequence` per sequence. Content is
//! generated first into per-sequence fragments because the bookmark tree needs
//! every heading before the first page sequence is written.

use crate::attributes::font_attributes;
use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::generator::{BlockContext, GeneratorRegistry, IdAllocator};
use crate::image::ImageResolver;
use crate::outline::write_bookmark_tree;
use crate::writer::{FO_NS, FOX_NS, FoAttrs, FoWriter};
use folio_idf::{Document, DocumentMetadata};
use folio_resolve::{StyledNode, StyledSequence, resolve_document};
use folio_style::dimension::format_number;
use folio_style::{ConfigError, PageMasterStyle, StyleSheet};
use folio_types::Heading;

const XMP_NS: &str = "adobe:ns:meta/";
const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const DC_NS: &str = "http://purl.org/dc/elements/1.1/";
const PDF_NS: &str = "http://ns.adobe.com/pdf/1.3/";
const XMP_BASIC_NS: &str = "http://ns.adobe.com/xap/1.0/";

/// Generates complete FO documents against one style sheet.
pub struct FoGenerator<'a> {
    sheet: &'a StyleSheet,
    registry: &'a GeneratorRegistry,
    images: &'a dyn ImageResolver,
    config: &'a GenerationConfig,
}

/// The generated markup together with the headings collected for the outline.
#[derive(Debug, Clone)]
pub struct GeneratedFo {
    pub markup: String,
    pub headings: Vec<Heading>,
}

struct SequenceFragments<'m> {
    master: &'m PageMasterStyle,
    header: Option<Vec<u8>>,
    footer: Option<Vec<u8>>,
    body: Vec<u8>,
}

fn pt(value: f32) -> String {
    format!("{}pt", format_number(value))
}

impl<'a> FoGenerator<'a> {
    pub fn new(
        sheet: &'a StyleSheet,
        registry: &'a GeneratorRegistry,
        images: &'a dyn ImageResolver,
        config: &'a GenerationConfig,
    ) -> Self {
        Self {
            sheet,
            registry,
            images,
            config,
        }
    }

    pub fn generate(&self, document: &Document) -> Result<String, GenerateError> {
        Ok(self.generate_with_outline(document)?.markup)
    }

    /// Generates the markup and returns the collected headings with it.
    ///
    /// Heading levels must already be continuous, as produced by
    /// `DocumentBuilder` or `DocumentBuilder::import`; the bookmark tree is
    /// built from them without re-checking. Documents assembled by hand or
    /// deserialized directly should go through `import` first.
    pub fn generate_with_outline(&self, document: &Document) -> Result<GeneratedFo, GenerateError> {
        self.check_page_masters(document)?;

        let styled = resolve_document(document, self.sheet);
        let mut headings = Vec::new();
        let mut ids = IdAllocator::new();
        for sequence in &styled.sequences {
            for region in [&sequence.header, &sequence.footer].into_iter().flatten() {
                ids.reserve_explicit(region);
            }
            ids.reserve_explicit(&sequence.body);
        }
        let mut fragments = Vec::with_capacity(styled.sequences.len());
        for sequence in &styled.sequences {
            fragments.push(self.sequence_fragments(sequence, &mut headings, &mut ids)?);
        }
        if fragments.is_empty() {
            log::warn!("Document has no page sequences, writing a single empty one");
            fragments.push(SequenceFragments {
                master: self.default_master()?,
                header: None,
                footer: None,
                body: Vec::new(),
            });
        }
        log::debug!(
            "Generated {} page sequence(s) with {} heading(s)",
            fragments.len(),
            headings.len()
        );

        let mut out = FoWriter::new(self.config.pretty);
        out.declaration()?;
        let language = document
            .metadata
            .language
            .as_deref()
            .unwrap_or(self.config.default_language.as_str());
        let mut root: Vec<(&str, &str)> = vec![("xmlns:fo", FO_NS)];
        if self.config.fox_extensions {
            root.push(("xmlns:fox", FOX_NS));
        }
        root.push(("xml:lang", language));
        out.start_raw("fo:root", &root)?;

        self.write_layout_masters(&mut out)?;
        write_metadata(&mut out, &document.metadata)?;
        write_bookmark_tree(&mut out, &headings)?;
        for fragment in &fragments {
            self.write_page_sequence(&mut out, &document.metadata, fragment)?;
        }

        out.end("fo:root")?;
        Ok(GeneratedFo {
            markup: out.into_string()?,
            headings,
        })
    }

    fn default_master(&self) -> Result<&'a PageMasterStyle, ConfigError> {
        self.sheet
            .default_page_master()
            .ok_or(ConfigError::NoPageMasters)
    }

    /// Every sequence must name a known master; checked before anything is written.
    fn check_page_masters(&self, document: &Document) -> Result<(), ConfigError> {
        self.default_master()?;
        for sequence in &document.sequences {
            if let Some(name) = &sequence.page_master {
                self.sheet.check_page_master(name)?;
            }
        }
        Ok(())
    }

    fn sequence_fragments(
        &self,
        sequence: &StyledSequence<'_>,
        headings: &mut Vec<Heading>,
        ids: &mut IdAllocator,
    ) -> Result<SequenceFragments<'a>, GenerateError> {
        let master = match &sequence.sequence.page_master {
            Some(name) => {
                self.sheet.check_page_master(name)?;
                self.sheet.page_master(name).ok_or(ConfigError::NoPageMasters)?
            }
            None => self.default_master()?,
        };

        let header = self.region(sequence.header.as_deref(), ids)?;
        let footer = self.region(sequence.footer.as_deref(), ids)?;
        let body = self.fragment(&sequence.body, headings, ids, false)?;

        Ok(SequenceFragments {
            master,
            header,
            footer,
            body,
        })
    }

    /// Header or footer content: artifacts whose headings stay out of the outline.
    fn region(
        &self,
        nodes: Option<&[StyledNode<'_>]>,
        ids: &mut IdAllocator,
    ) -> Result<Option<Vec<u8>>, GenerateError> {
        let Some(nodes) = nodes else {
            return Ok(None);
        };
        let mut discarded = Vec::new();
        self.fragment(nodes, &mut discarded, ids, true).map(Some)
    }

    fn fragment(
        &self,
        nodes: &[StyledNode<'_>],
        headings: &mut Vec<Heading>,
        ids: &mut IdAllocator,
        artifact: bool,
    ) -> Result<Vec<u8>, GenerateError> {
        let mut out = FoWriter::new(self.config.pretty);
        let mut ctx = BlockContext::new(
            self.sheet,
            &mut out,
            headings,
            ids,
            self.images,
            self.config,
            self.registry,
            artifact,
        );
        ctx.blocks(nodes)?;
        Ok(out.into_bytes())
    }

    fn write_layout_masters(&self, out: &mut FoWriter) -> Result<(), GenerateError> {
        out.open("fo:layout-master-set")?;
        for master in self.sheet.page_masters() {
            let (width, height) = master.page_dimensions();
            let margins = master.margins;
            let attrs = FoAttrs::new()
                .with("master-name", master.name.clone())
                .with("page-width", pt(width))
                .with("page-height", pt(height))
                .with("margin-top", pt(margins.top))
                .with("margin-right", pt(margins.right))
                .with("margin-bottom", pt(margins.bottom))
                .with("margin-left", pt(margins.left));
            out.start("fo:simple-page-master", &attrs)?;

            let header = master.header_extent.map(|l| l.points()).unwrap_or(0.0);
            let footer = master.footer_extent.map(|l| l.points()).unwrap_or(0.0);
            out.empty(
                "fo:region-body",
                &FoAttrs::new()
                    .with("margin-top", pt(header))
                    .with("margin-bottom", pt(footer)),
            )?;
            if let Some(extent) = master.header_extent {
                out.empty("fo:region-before", &FoAttrs::new().with("extent", extent.fo_value()))?;
            }
            if let Some(extent) = master.footer_extent {
                out.empty("fo:region-after", &FoAttrs::new().with("extent", extent.fo_value()))?;
            }
            out.end("fo:simple-page-master")?;
        }
        out.end("fo:layout-master-set")
    }

    fn write_page_sequence(
        &self,
        out: &mut FoWriter,
        metadata: &DocumentMetadata,
        fragment: &SequenceFragments<'_>,
    ) -> Result<(), GenerateError> {
        let master = fragment.master;
        out.start(
            "fo:page-sequence",
            &FoAttrs::new().with("master-reference", master.name.clone()),
        )?;
        if let Some(title) = metadata.title() {
            out.text_element("fo:title", title)?;
        }

        let regions = [
            ("xsl-region-before", &fragment.header, master.header_extent.is_some()),
            ("xsl-region-after", &fragment.footer, master.footer_extent.is_some()),
        ];
        for (flow_name, content, has_extent) in regions {
            let Some(content) = content else { continue };
            if !has_extent {
                log::warn!(
                    "Page master '{}' reserves no space for {}, its content may overlap the body",
                    master.name,
                    flow_name
                );
            }
            out.start(
                "fo:static-content",
                &FoAttrs::new().with("flow-name", flow_name).with("role", "artifact"),
            )?;
            if content.is_empty() {
                out.empty("fo:block", &FoAttrs::new())?;
            } else {
                out.splice(content);
            }
            out.end("fo:static-content")?;
        }

        let mut flow = FoAttrs::new().with("flow-name", "xsl-region-body");
        if let Some(font) = self.sheet.default_text_style() {
            font_attributes(font, &mut flow);
        }
        out.start("fo:flow", &flow)?;
        if fragment.body.is_empty() {
            out.empty("fo:block", &FoAttrs::new())?;
        } else {
            out.splice(&fragment.body);
        }
        out.end("fo:flow")?;
        out.end("fo:page-sequence")
    }
}

/// XMP metadata in `fo:declarations`. Skipped without a title.
fn write_metadata(out: &mut FoWriter, metadata: &DocumentMetadata) -> Result<(), GenerateError> {
    let Some(title) = metadata.title() else {
        log::warn!("Document has no title, accessibility metadata omitted");
        return Ok(());
    };
    out.open("fo:declarations")?;
    out.start_raw("x:xmpmeta", &[("xmlns:x", XMP_NS)])?;
    out.start_raw("rdf:RDF", &[("xmlns:rdf", RDF_NS)])?;
    out.start_raw(
        "rdf:Description",
        &[
            ("rdf:about", ""),
            ("xmlns:dc", DC_NS),
            ("xmlns:pdf", PDF_NS),
            ("xmlns:xmp", XMP_BASIC_NS),
        ],
    )?;
    out.text_element("dc:title", title)?;
    if let Some(author) = &metadata.author {
        out.text_element("dc:creator", author)?;
    }
    if let Some(subject) = &metadata.subject {
        out.text_element("dc:description", subject)?;
    }
    if !metadata.keywords.is_empty() {
        out.text_element("pdf:Keywords", &metadata.keywords.join(", "))?;
    }
    if let Some(creator) = &metadata.creator {
        out.text_element("xmp:CreatorTool", creator)?;
    }
    out.end("rdf:Description")?;
    out.end("rdf:RDF")?;
    out.end("x:xmpmeta")?;
    out.end("fo:declarations")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PassThroughImageResolver;
    use folio_idf::{DocumentBuilder, Element, PageSequence};
    use folio_style::{PageSize, TextStyle};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sheet() -> StyleSheet {
        StyleSheet::new()
            .with_page_master(PageMasterStyle::new("default", PageSize::A4).header(20.0))
            .with_text_style(TextStyle::new("body", "Serif"))
            .with_default_text_style("body")
    }

    fn generate(sheet: &StyleSheet, document: &Document) -> Result<GeneratedFo, GenerateError> {
        let registry = GeneratorRegistry::with_defaults();
        let config = GenerationConfig::default();
        FoGenerator::new(sheet, &registry, &PassThroughImageResolver, &config)
            .generate_with_outline(document)
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("'{}' not found in {}", needle, haystack))
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        init();
        let document = DocumentBuilder::new()
            .title("Annual Report")
            .author("Finance")
            .keyword("budget")
            .sequence(
                PageSequence::new("default").with_header(vec![Element::text("Running head")]),
            )
            .element(Element::headline(1, "Overview"))
            .element(Element::text("Body text"))
            .build();
        let fo = generate(&sheet(), &document).unwrap().markup;

        let root = position(&fo, "<fo:root");
        let masters = position(&fo, "<fo:layout-master-set>");
        let declarations = position(&fo, "<fo:declarations>");
        let bookmarks = position(&fo, "<fo:bookmark-tree>");
        let sequence = position(&fo, "<fo:page-sequence");
        let header = position(&fo, "xsl-region-before\"");
        let flow = position(&fo, "<fo:flow");
        assert!(root < masters && masters < declarations && declarations < bookmarks);
        assert!(bookmarks < sequence && sequence < header && header < flow);

        assert!(fo.contains(r#"xml:lang="en""#));
        assert!(fo.contains("<dc:title>Annual Report</dc:title>"));
        assert!(fo.contains("<pdf:Keywords>budget</pdf:Keywords>"));
        assert!(fo.contains("<fo:title>Annual Report</fo:title>"));
        assert!(fo.contains(r#"<fo:region-before extent="20pt"/>"#));
        assert!(fo.contains(r#"font-family="Serif""#));
        assert!(fo.ends_with("</fo:root>"));
    }

    #[test]
    fn missing_title_skips_metadata_block() {
        init();
        let document = DocumentBuilder::new()
            .element(Element::headline(1, "Only heading"))
            .build();
        let fo = generate(&sheet(), &document).unwrap().markup;
        assert!(!fo.contains("fo:declarations"));
        assert!(!fo.contains("fo:title"));
        assert!(fo.contains("fo:bookmark-tree"));
    }

    #[test]
    fn no_headings_no_bookmarks() {
        let document = DocumentBuilder::new().element(Element::text("plain")).build();
        let fo = generate(&sheet(), &document).unwrap().markup;
        assert!(!fo.contains("fo:bookmark-tree"));
    }

    #[test]
    fn header_headings_are_artifacts_outside_the_outline() {
        let document = DocumentBuilder::new()
            .sequence(
                PageSequence::new("default").with_header(vec![Element::headline(1, "Header")]),
            )
            .element(Element::headline(1, "Body"))
            .build();
        let generated = generate(&sheet(), &document).unwrap();
        assert_eq!(generated.headings.len(), 1);
        assert_eq!(generated.headings[0].text, "Body");
        assert!(generated.markup.contains(r#"role="artifact""#));
    }

    #[test]
    fn unknown_page_master_fails_before_output() {
        let document = DocumentBuilder::new()
            .sequence(PageSequence::new("landscape"))
            .element(Element::text("x"))
            .build();
        let err = generate(&sheet(), &document).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Config(ConfigError::UnknownPageMaster { ref name, .. }) if name == "landscape"
        ));
    }

    #[test]
    fn empty_document_still_has_a_page_sequence() {
        let fo = generate(&sheet(), &Document::default()).unwrap().markup;
        assert!(fo.contains(r#"<fo:page-sequence master-reference="default">"#));
        assert!(fo.contains("<fo:block/>"));
    }
}
