use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn fo_value(&self) -> &'static str {
        match self {
            TextAlign::Left => "start",
            TextAlign::Right => "end",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Overline,
    LineThrough,
}

impl TextDecoration {
    pub fn fo_value(&self) -> &'static str {
        match self {
            TextDecoration::None => "none",
            TextDecoration::Underline => "underline",
            TextDecoration::Overline => "overline",
            TextDecoration::LineThrough => "line-through",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineShift {
    #[default]
    Baseline,
    Super,
    Sub,
}

impl BaselineShift {
    pub fn fo_value(&self) -> &'static str {
        match self {
            BaselineShift::Baseline => "baseline",
            BaselineShift::Super => "super",
            BaselineShift::Sub => "sub",
        }
    }
}
