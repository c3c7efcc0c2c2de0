// src/pipeline/builder.rs
use super::orchestrator::DocumentPipeline;
use crate::error::PipelineError;
use folio_fo::{
    GenerationConfig, GeneratorRegistry, ImageResolver, PassThroughImageResolver,
    ResourceImageResolver,
};
use folio_style::StyleSheet;
use folio_traits::{FontSet, RenderEngine, ResourceProvider};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `DocumentPipeline`.
///
/// `build()` validates the style sheet and checks that every text style it
/// references is covered by the registered fonts, so configuration mistakes
/// surface before any markup is produced.
#[derive(Default)]
pub struct PipelineBuilder {
    stylesheet: Option<StyleSheet>,
    fonts: FontSet,
    resources: Option<Arc<dyn ResourceProvider>>,
    engine: Option<Arc<dyn RenderEngine>>,
    registry: Option<GeneratorRegistry>,
    config: GenerationConfig,
}

fn read_file(path: &Path, what: &str) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| {
        PipelineError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read {} from '{}': {}", what, path.display(), e),
        ))
    })
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_stylesheet(mut self, stylesheet: StyleSheet) -> Self {
        self.stylesheet = Some(stylesheet);
        self
    }

    pub fn with_stylesheet_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.stylesheet = Some(serde_json::from_str(json)?);
        Ok(self)
    }

    pub fn with_stylesheet_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let json = read_file(path.as_ref(), "style sheet")?;
        self.with_stylesheet_json(&json)
    }

    pub fn with_fonts(mut self, fonts: FontSet) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_fonts_json(mut self, json: &str) -> Result<Self, PipelineError> {
        self.fonts = serde_json::from_str(json)?;
        Ok(self)
    }

    pub fn with_fonts_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        let json = read_file(path.as_ref(), "font set")?;
        self.with_fonts_json(&json)
    }

    /// Images are loaded through `provider` and inlined into the markup.
    /// Without a provider, image URIs are passed through for the engine to load.
    pub fn with_resources(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(provider);
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn RenderEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Replaces the built-in generators.
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.config.pretty = pretty;
        self
    }

    /// Consumes the builder, validates the configuration and creates the `DocumentPipeline`.
    pub fn build(self) -> Result<DocumentPipeline, PipelineError> {
        let stylesheet = self.stylesheet.ok_or_else(|| {
            PipelineError::Config(
                "No style sheet has been configured. Use `with_stylesheet` or `with_stylesheet_json`."
                    .to_string(),
            )
        })?;

        stylesheet.validate()?;
        self.fonts.verify_coverage(&stylesheet)?;

        let registry = self.registry.unwrap_or_default();
        let missing = registry.missing_kinds();
        if !missing.is_empty() {
            log::warn!(
                "No generator registered for {:?}; such elements will be skipped",
                missing
            );
        }

        let images: Arc<dyn ImageResolver> = match self.resources {
            Some(provider) => {
                log::info!("Inlining images from resource provider '{}'", provider.name());
                Arc::new(ResourceImageResolver::new(provider))
            }
            None => Arc::new(PassThroughImageResolver),
        };

        log::info!(
            "Pipeline ready: {} page master(s), {} font famil(ies)",
            stylesheet.page_masters().len(),
            self.fonts.families().count()
        );

        Ok(DocumentPipeline::new(
            Arc::new(stylesheet),
            Arc::new(self.fonts),
            Arc::new(registry),
            images,
            self.engine,
            self.config,
        ))
    }
}
