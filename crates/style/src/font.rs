use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Position on the CSS 100-900 scale.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    /// Two weights match when they land on the same numeric value, so `Bold` and `700` agree.
    pub fn matches(&self, other: &FontWeight) -> bool {
        self.numeric_value() == other.numeric_value()
    }

    /// The value of an FO `font-weight` attribute.
    pub fn fo_value(&self) -> String {
        match self.numeric_value() {
            400 => "normal".to_string(),
            700 => "bold".to_string(),
            n => n.to_string(),
        }
    }
}

impl FromStr for FontWeight {
    type Err = String;

    /// Accepts the keywords (`normal` is an alias of `regular`) or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const KEYWORDS: [(&str, FontWeight); 7] = [
            ("thin", FontWeight::Thin),
            ("light", FontWeight::Light),
            ("regular", FontWeight::Regular),
            ("normal", FontWeight::Regular),
            ("medium", FontWeight::Medium),
            ("bold", FontWeight::Bold),
            ("black", FontWeight::Black),
        ];
        let trimmed = s.trim();
        if let Some((_, weight)) = KEYWORDS.iter().find(|(k, _)| k.eq_ignore_ascii_case(trimmed)) {
            return Ok(weight.clone());
        }
        match trimmed.parse::<u16>() {
            Ok(n) if (1..=1000).contains(&n) => Ok(FontWeight::Numeric(n)),
            _ => Err(format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fo_value())
    }
}

impl Serialize for FontWeight {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.fo_value())
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => s.parse().map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn fo_value(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fo_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_numeric_weights_match() {
        assert!(FontWeight::Bold.matches(&FontWeight::Numeric(700)));
        assert!(!FontWeight::Bold.matches(&FontWeight::Regular));
    }

    #[test]
    fn fo_values() {
        assert_eq!(FontWeight::Regular.fo_value(), "normal");
        assert_eq!(FontWeight::Numeric(700).fo_value(), "bold");
        assert_eq!(FontWeight::Light.fo_value(), "300");
        assert_eq!(FontStyle::Italic.fo_value(), "italic");
    }

    #[test]
    fn deserializes_names_and_numbers() {
        let w: FontWeight = serde_json::from_str("\"Bold\"").unwrap();
        assert_eq!(w, FontWeight::Bold);
        let w: FontWeight = serde_json::from_str("600").unwrap();
        assert_eq!(w, FontWeight::Numeric(600));
        assert!(serde_json::from_str::<FontWeight>("\"heavyish\"").is_err());
        assert_eq!(" NORMAL ".parse::<FontWeight>(), Ok(FontWeight::Regular));
        assert!("0".parse::<FontWeight>().is_err());
    }
}
