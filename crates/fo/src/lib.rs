//! XSL-FO generation from a resolved document tree.
//!
//! A [`GeneratorRegistry`] maps element kinds to generators; [`FoGenerator`]
//! drives them over every page sequence and assembles the final document with
//! its layout masters, metadata and bookmark tree.

pub mod assemble;
pub mod attributes;
pub mod config;
pub mod error;
pub mod font_config;
pub mod generator;
pub mod generators;
pub mod image;
pub mod outline;
pub mod writer;

pub use assemble::{FoGenerator, GeneratedFo};
pub use config::GenerationConfig;
pub use error::GenerateError;
pub use font_config::font_configuration;
pub use generator::{
    BlockContext, BlockGenerator, GeneratorRegistry, IdAllocator, InlineContext, InlineGenerator,
};
pub use image::{ImageResolver, PassThroughImageResolver, ResourceImageResolver};
pub use outline::{OutlineEvent, outline_events, write_bookmark_tree};
pub use writer::{FoAttrs, FoWriter};
