//! Lengths, dimensions, box sides and page sizes, all in points.

use crate::parsers::{parse_dimension, parse_length, parse_margins, run_parser};
use serde::{de, ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Formats a point value without float noise (`12`, `12.5`, `28.35`).
pub fn format_number(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// An absolute length in points.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Length(pub f32);

impl Length {
    pub fn pt(value: f32) -> Self {
        Self(value)
    }

    pub fn points(&self) -> f32 {
        self.0
    }

    pub fn fo_value(&self) -> String {
        format!("{}pt", format_number(self.0))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fo_value())
    }
}

impl Serialize for Length {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.fo_value())
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum LengthDef {
            Num(f32),
            Str(String),
        }

        match LengthDef::deserialize(deserializer)? {
            LengthDef::Num(n) => Ok(Length(n)),
            LengthDef::Str(s) => run_parser(parse_length, &s).map_err(de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    pub fn fo_value(&self) -> String {
        match self {
            Dimension::Pt(v) => format!("{}pt", format_number(*v)),
            Dimension::Percent(v) => format!("{}%", format_number(*v)),
            Dimension::Auto => "auto".to_string(),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.fo_value())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DimensionDef {
            Num(f32),
            Str(String),
        }

        match DimensionDef::deserialize(deserializer)? {
            DimensionDef::Num(n) => Ok(Dimension::Pt(n)),
            DimensionDef::Str(s) => run_parser(parse_dimension, &s).map_err(de::Error::custom),
        }
    }
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Top and bottom only.
    pub fn vertical(value: f32) -> Self {
        Self {
            top: value,
            right: 0f32,
            bottom: value,
            left: 0f32,
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Num(f32),
            Str(String),
            Sides {
                #[serde(default)]
                top: Length,
                #[serde(default)]
                right: Length,
                #[serde(default)]
                bottom: Length,
                #[serde(default)]
                left: Length,
            },
        }

        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Num(n) => Ok(Margins::all(n)),
            MarginsDef::Str(s) => run_parser(parse_margins, &s).map_err(de::Error::custom),
            MarginsDef::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins {
                top: top.0,
                right: right.0,
                bottom: bottom.0,
                left: left.0,
            }),
        }
    }
}

/// Paper size of a page master. Named sizes are portrait, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

const NAMED_SIZES: [(PageSize, &str, f32, f32); 4] = [
    (PageSize::A4, "A4", 595.28, 841.89),
    (PageSize::A5, "A5", 419.53, 595.28),
    (PageSize::Letter, "Letter", 612.0, 792.0),
    (PageSize::Legal, "Legal", 612.0, 1008.0),
];

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        if let PageSize::Custom { width, height } = self {
            return (*width, *height);
        }
        NAMED_SIZES
            .iter()
            .find(|(size, ..)| size == self)
            .map(|(_, _, w, h)| (*w, *h))
            .unwrap_or_default()
    }

    fn named(name: &str) -> Option<Self> {
        NAMED_SIZES
            .iter()
            .find(|(_, n, ..)| n.eq_ignore_ascii_case(name))
            .map(|(size, ..)| *size)
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match NAMED_SIZES.iter().find(|(size, ..)| size == self) {
            Some((_, name, ..)) => serializer.serialize_str(name),
            None => {
                let (width, height) = self.dimensions_pt();
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", &Length(width))?;
                map.serialize_entry("height", &Length(height))?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Named(String),
            Custom { width: Length, height: Length },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(name) => PageSize::named(&name)
                .ok_or_else(|| de::Error::custom(format!("Unknown page size: {}", name))),
            PageSizeDef::Custom { width, height } => Ok(PageSize::Custom {
                width: width.0,
                height: height.0,
            }),
        }
    }
}
