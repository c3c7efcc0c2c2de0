// src/pipeline/orchestrator.rs
use crate::error::PipelineError;
use folio_fo::{FoGenerator, GeneratedFo, GenerationConfig, GeneratorRegistry, ImageResolver};
use folio_idf::{Document, DocumentBuilder};
use folio_style::StyleSheet;
use folio_traits::{FontSet, RenderEngine};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// The document generation pipeline: a validated style sheet and font set plus
/// the generators that turn documents into XSL-FO.
///
/// Everything it holds is immutable and shared, so one pipeline can generate
/// many documents, including from several threads at once.
#[derive(Clone)]
pub struct DocumentPipeline {
    stylesheet: Arc<StyleSheet>,
    fonts: Arc<FontSet>,
    registry: Arc<GeneratorRegistry>,
    images: Arc<dyn ImageResolver>,
    engine: Option<Arc<dyn RenderEngine>>,
    config: GenerationConfig,
}

impl DocumentPipeline {
    pub(crate) fn new(
        stylesheet: Arc<StyleSheet>,
        fonts: Arc<FontSet>,
        registry: Arc<GeneratorRegistry>,
        images: Arc<dyn ImageResolver>,
        engine: Option<Arc<dyn RenderEngine>>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            stylesheet,
            fonts,
            registry,
            images,
            engine,
            config,
        }
    }

    pub fn stylesheet(&self) -> &StyleSheet {
        &self.stylesheet
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    fn generator(&self) -> FoGenerator<'_> {
        FoGenerator::new(
            &self.stylesheet,
            &self.registry,
            self.images.as_ref(),
            &self.config,
        )
    }

    /// Generates the XSL-FO markup for a document built with `DocumentBuilder`.
    pub fn generate_markup(&self, document: &Document) -> Result<String, PipelineError> {
        Ok(self.generate_with_outline(document)?.markup)
    }

    /// Like [`generate_markup`](Self::generate_markup), also returning the
    /// headings the outline was built from.
    pub fn generate_with_outline(&self, document: &Document) -> Result<GeneratedFo, PipelineError> {
        let start = Instant::now();
        let generated = self.generator().generate_with_outline(document)?;
        log::info!(
            "Generated {} bytes of markup ({} outline entries) in {:.2?}",
            generated.markup.len(),
            generated.headings.len(),
            start.elapsed()
        );
        Ok(generated)
    }

    /// Parses a JSON document and generates its markup. Heading levels are
    /// normalized on the way in, as the builder would have done.
    pub fn generate_markup_json(&self, json: &str) -> Result<String, PipelineError> {
        let document: Document = serde_json::from_str(json)?;
        let document = DocumentBuilder::import(document).build();
        self.generate_markup(&document)
    }

    pub fn generate_to_file<P: AsRef<Path>>(
        &self,
        document: &Document,
        path: P,
    ) -> Result<(), PipelineError> {
        let markup = self.generate_markup(document)?;
        fs::write(path.as_ref(), markup)?;
        log::info!("Wrote {}", path.as_ref().display());
        Ok(())
    }

    /// The FO processor font configuration for the registered fonts.
    pub fn font_configuration(&self) -> Result<String, PipelineError> {
        Ok(folio_fo::font_configuration(&self.fonts, self.config.pretty)?)
    }

    /// Generates the markup and hands it to the configured render engine.
    pub fn render(&self, document: &Document) -> Result<Vec<u8>, PipelineError> {
        let engine = self.engine.as_ref().ok_or_else(|| {
            PipelineError::Config("No render engine configured. Use `with_engine`.".to_string())
        })?;
        let markup = self.generate_markup(document)?;
        log::info!("Rendering with engine '{}'", engine.name());
        Ok(engine.render(&markup, &self.fonts)?)
    }
}
