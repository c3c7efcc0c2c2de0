//! Folio turns a structured document and a cascading style sheet into XSL-FO
//! markup for an external page-layout engine.
//!
//! The work is split across the workspace crates:
//! `folio-style` (style model), `folio-idf` (document tree),
//! `folio-resolve` (style cascade), `folio-fo` (markup generation) and
//! `folio-traits` (fonts, resources, render engines). This crate ties them
//! together behind [`PipelineBuilder`].

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{DocumentPipeline, PipelineBuilder};

pub use folio_fo::{GeneratedFo, GenerationConfig, GeneratorRegistry};
pub use folio_idf::{Document, DocumentBuilder, Element, Inline, PageSequence};
pub use folio_style::{ConfigError, StyleSheet};
pub use folio_traits::{FontSet, RenderEngine};
