pub mod engine;
pub mod font;
pub mod resource;

pub use engine::{EngineError, RenderEngine};
pub use font::{FontSet, FontVariant};
pub use resource::{
    FileResourceProvider, InMemoryResourceProvider, ResourceError, ResourceProvider,
    SharedResourceData,
};
