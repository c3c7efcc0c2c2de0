//! Enums for page-flow control (breaks) and cell alignment.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BreakKind {
    #[default]
    Auto,
    Page,
    Column,
    EvenPage,
    OddPage,
}

impl BreakKind {
    pub fn fo_value(&self) -> &'static str {
        match self {
            BreakKind::Auto => "auto",
            BreakKind::Page => "page",
            BreakKind::Column => "column",
            BreakKind::EvenPage => "even-page",
            BreakKind::OddPage => "odd-page",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    /// Maps to the FO `display-align` trait.
    pub fn fo_value(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "before",
            VerticalAlign::Middle => "center",
            VerticalAlign::Bottom => "after",
        }
    }
}
