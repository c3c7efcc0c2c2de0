//! Generator traits, the per-call generation contexts and the kind-indexed registry.

use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::generators;
use crate::image::ImageResolver;
use crate::writer::FoWriter;
use folio_resolve::StyledNode;
use folio_style::{ElementKind, StyleSheet};
use folio_types::{AnchorId, Heading};
use std::collections::{HashMap, HashSet};

/// Hands out identifiers for headings that carry none of their own.
///
/// Explicit ids found in the document are reserved first, so a generated
/// `heading-N` never repeats one an author wrote.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: usize,
    reserved: HashSet<AnchorId>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, id: &AnchorId) {
        self.reserved.insert(id.clone());
    }

    /// Reserves every explicit id in `nodes` and their descendants.
    pub fn reserve_explicit(&mut self, nodes: &[StyledNode<'_>]) {
        for node in nodes {
            if let Some(id) = &node.meta().id {
                self.reserve(id);
            }
            self.reserve_explicit(&node.children);
        }
    }

    pub fn heading_id(&mut self) -> AnchorId {
        loop {
            self.next += 1;
            let id = AnchorId::new(format!("heading-{}", self.next));
            if !self.reserved.contains(&id) {
                return id;
            }
        }
    }
}

/// Everything a block generator may touch while emitting one node.
pub struct BlockContext<'r> {
    pub sheet: &'r StyleSheet,
    pub out: &'r mut FoWriter,
    /// Headings collected for the outline, in document order.
    pub headings: &'r mut Vec<Heading>,
    pub ids: &'r mut IdAllocator,
    pub images: &'r dyn ImageResolver,
    pub config: &'r GenerationConfig,
    /// Set inside repeating header/footer regions.
    pub artifact: bool,
    registry: &'r GeneratorRegistry,
}

impl<'r> BlockContext<'r> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sheet: &'r StyleSheet,
        out: &'r mut FoWriter,
        headings: &'r mut Vec<Heading>,
        ids: &'r mut IdAllocator,
        images: &'r dyn ImageResolver,
        config: &'r GenerationConfig,
        registry: &'r GeneratorRegistry,
        artifact: bool,
    ) -> Self {
        Self {
            sheet,
            out,
            headings,
            ids,
            images,
            config,
            artifact,
            registry,
        }
    }

    /// Dispatches every node to its registered block generator.
    pub fn blocks(&mut self, nodes: &[StyledNode<'_>]) -> Result<(), GenerateError> {
        let registry = self.registry;
        for node in nodes {
            registry.generate_block(node, self)?;
        }
        Ok(())
    }

    /// Dispatches inline children through a narrowed context.
    pub fn inlines(&mut self, nodes: &[StyledNode<'_>]) -> Result<(), GenerateError> {
        self.inline_context().inlines(nodes)
    }

    pub fn inline_context(&mut self) -> InlineContext<'_> {
        InlineContext {
            sheet: self.sheet,
            out: &mut *self.out,
            ids: &mut *self.ids,
            images: self.images,
            config: self.config,
            registry: self.registry,
        }
    }
}

/// The inline view of a generation call: no heading accumulator, no artifact flag.
pub struct InlineContext<'r> {
    pub sheet: &'r StyleSheet,
    pub out: &'r mut FoWriter,
    pub ids: &'r mut IdAllocator,
    pub images: &'r dyn ImageResolver,
    pub config: &'r GenerationConfig,
    registry: &'r GeneratorRegistry,
}

impl InlineContext<'_> {
    pub fn inlines(&mut self, nodes: &[StyledNode<'_>]) -> Result<(), GenerateError> {
        let registry = self.registry;
        for node in nodes {
            registry.generate_inline(node, self)?;
        }
        Ok(())
    }

    /// Emits block content nested in an inline, such as a footnote body.
    /// Headings found there stay out of the outline.
    pub fn nested_blocks(&mut self, nodes: &[StyledNode<'_>]) -> Result<(), GenerateError> {
        let mut discarded = Vec::new();
        let mut ctx = BlockContext::new(
            self.sheet,
            &mut *self.out,
            &mut discarded,
            &mut *self.ids,
            self.images,
            self.config,
            self.registry,
            false,
        );
        ctx.blocks(nodes)
    }
}

pub trait BlockGenerator: Send + Sync {
    fn generate(&self, node: &StyledNode<'_>, ctx: &mut BlockContext<'_>)
    -> Result<(), GenerateError>;
}

pub trait InlineGenerator: Send + Sync {
    fn generate(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError>;
}

/// Maps element kinds to generators. Built once and shared read-only.
pub struct GeneratorRegistry {
    blocks: HashMap<ElementKind, Box<dyn BlockGenerator>>,
    inlines: HashMap<ElementKind, Box<dyn InlineGenerator>>,
}

impl GeneratorRegistry {
    /// A registry with no generators at all.
    pub fn empty() -> Self {
        Self {
            blocks: HashMap::new(),
            inlines: HashMap::new(),
        }
    }

    /// A registry covering every element kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        generators::register_defaults(&mut registry);
        registry
    }

    pub fn register_block(&mut self, kind: ElementKind, generator: Box<dyn BlockGenerator>) {
        self.blocks.insert(kind, generator);
    }

    pub fn register_inline(&mut self, kind: ElementKind, generator: Box<dyn InlineGenerator>) {
        self.inlines.insert(kind, generator);
    }

    pub fn has_generator(&self, kind: ElementKind) -> bool {
        self.blocks.contains_key(&kind) || self.inlines.contains_key(&kind)
    }

    /// Kinds without a generator; their elements would be dropped from output.
    pub fn missing_kinds(&self) -> Vec<ElementKind> {
        ElementKind::ALL
            .into_iter()
            .filter(|kind| !matches!(kind, ElementKind::ListItem | ElementKind::TableCell))
            .filter(|kind| !self.has_generator(*kind))
            .collect()
    }

    pub fn generate_block(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut BlockContext<'_>,
    ) -> Result<(), GenerateError> {
        match self.blocks.get(&node.kind()) {
            Some(generator) => generator.generate(node, ctx),
            None => {
                log::warn!("No block generator registered for '{}', element skipped", node.kind());
                Ok(())
            }
        }
    }

    pub fn generate_inline(
        &self,
        node: &StyledNode<'_>,
        ctx: &mut InlineContext<'_>,
    ) -> Result<(), GenerateError> {
        match self.inlines.get(&node.kind()) {
            Some(generator) => generator.generate(node, ctx),
            None => {
                log::warn!("No inline generator registered for '{}', run skipped", node.kind());
                Ok(())
            }
        }
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut blocks: Vec<_> = self.blocks.keys().collect();
        blocks.sort();
        let mut inlines: Vec<_> = self.inlines.keys().collect();
        inlines.sort();
        f.debug_struct("GeneratorRegistry")
            .field("blocks", &blocks)
            .field("inlines", &inlines)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PassThroughImageResolver;
    use folio_idf::Element;
    use folio_resolve::{StyleResolverContext, resolve_blocks};

    fn render(registry: &GeneratorRegistry, elements: &[Element]) -> (String, Vec<Heading>) {
        let sheet = StyleSheet::new();
        let styled = resolve_blocks(elements, &StyleResolverContext::root(&sheet));
        let mut out = FoWriter::new(false);
        let mut headings = Vec::new();
        let mut ids = IdAllocator::new();
        ids.reserve_explicit(&styled);
        let config = GenerationConfig::default();
        let mut ctx = BlockContext::new(
            &sheet,
            &mut out,
            &mut headings,
            &mut ids,
            &PassThroughImageResolver,
            &config,
            registry,
            false,
        );
        ctx.blocks(&styled).unwrap();
        (out.into_string().unwrap(), headings)
    }

    #[test]
    fn default_registry_covers_every_kind() {
        assert!(GeneratorRegistry::with_defaults().missing_kinds().is_empty());
        assert_eq!(GeneratorRegistry::empty().missing_kinds().len(), 12);
    }

    #[test]
    fn unregistered_kind_is_skipped() {
        let mut registry = GeneratorRegistry::with_defaults();
        registry.blocks.remove(&ElementKind::Image);
        let (fo, _) = render(
            &registry,
            &[Element::image("a.png", Some("A")), Element::text("after")],
        );
        assert!(!fo.contains("external-graphic"));
        assert!(fo.contains("after"));
    }

    #[test]
    fn ids_are_sequential() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.heading_id().as_str(), "heading-1");
        assert_eq!(ids.heading_id().as_str(), "heading-2");
    }

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let registry = GeneratorRegistry::with_defaults();
        let elements = [
            Element::headline(1, "Auto"),
            Element::headline(1, "Named")
                .with_meta(folio_idf::ElementMeta::default().with_id("heading-1")),
        ];
        let sheet = StyleSheet::new();
        let styled = resolve_blocks(&elements, &StyleResolverContext::root(&sheet));
        let mut ids = IdAllocator::new();
        ids.reserve_explicit(&styled);
        assert_eq!(ids.heading_id().as_str(), "heading-2");

        let (_, headings) = render(&registry, &elements);
        assert_eq!(headings.len(), 2);
        assert_ne!(headings[0].id, headings[1].id);
    }

    #[test]
    fn footnote_headings_stay_out_of_the_outline() {
        let registry = GeneratorRegistry::with_defaults();
        let paragraph = Element::paragraph(vec![
            folio_idf::Inline::text("claim"),
            folio_idf::Inline::footnote("1", vec![Element::headline(2, "Note")]),
        ]);
        let (fo, headings) = render(&registry, &[Element::headline(1, "Top"), paragraph]);
        assert!(fo.contains("fo:footnote-body"));
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Top");
    }
}
