use crate::dimension::Length;
use crate::parsers::{parse_border, run_parser};
use folio_types::Color;
use serde::{de, Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    None,
}

impl BorderStyle {
    pub fn fo_value(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
            BorderStyle::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Border {
    pub width: Length,
    pub style: BorderStyle,
    pub color: Color,
}

impl Border {
    pub fn new(width: f32, style: BorderStyle, color: Color) -> Self {
        Self {
            width: Length(width),
            style,
            color,
        }
    }

    /// The FO shorthand form, e.g. `1pt solid #000000`.
    pub fn fo_value(&self) -> String {
        if self.style == BorderStyle::None {
            return "none".to_string();
        }
        format!(
            "{} {} {}",
            self.width.fo_value(),
            self.style.fo_value(),
            self.color.to_hex()
        )
    }
}

impl<'de> Deserialize<'de> for Border {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum BorderDef {
            Str(String),
            Map {
                width: Length,
                #[serde(default)]
                style: BorderStyle,
                #[serde(default)]
                color: Color,
            },
        }

        match BorderDef::deserialize(deserializer)? {
            BorderDef::Str(s) => run_parser(parse_border, &s).map_err(de::Error::custom),
            BorderDef::Map {
                width,
                style,
                color,
            } => Ok(Border {
                width,
                style,
                color,
            }),
        }
    }
}
