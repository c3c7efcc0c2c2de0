//! Document generation pipeline.
//!
//! - [`PipelineBuilder`]: fluent builder that loads and validates the
//!   configuration
//! - [`DocumentPipeline`]: generates XSL-FO markup and hands it to a render engine
//!
//! # Example
//!
//! ```ignore
//! use folio::PipelineBuilder;
//!
//! let pipeline = PipelineBuilder::new()
//!     .with_stylesheet_file("styles.json")?
//!     .with_fonts_file("fonts.json")?
//!     .build()?;
//!
//! pipeline.generate_to_file(&document, "report.fo")?;
//! ```

mod builder;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use orchestrator::DocumentPipeline;
