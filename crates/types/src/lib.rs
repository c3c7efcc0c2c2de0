pub mod color;
pub mod document;
pub mod ids;

pub use color::Color;
pub use document::Heading;
pub use ids::{AnchorId, ResourceUri};
