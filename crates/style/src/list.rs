//! List label styles and marker text generation.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyleType {
    #[default]
    Disc,
    Circle,
    Square,
    Dash,
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
    None,
}

impl ListStyleType {
    /// Whether the style numbers its items rather than drawing a symbol.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ListStyleType::Decimal
                | ListStyleType::LowerAlpha
                | ListStyleType::UpperAlpha
                | ListStyleType::LowerRoman
                | ListStyleType::UpperRoman
        )
    }

    /// The label text for the item at 1-based `index`.
    pub fn marker(&self, index: usize) -> String {
        match self {
            ListStyleType::Disc => "\u{2022}".to_string(),
            ListStyleType::Circle => "\u{25e6}".to_string(),
            ListStyleType::Square => "\u{25aa}".to_string(),
            ListStyleType::Dash => "\u{2013}".to_string(),
            ListStyleType::Decimal => format!("{}.", index),
            ListStyleType::LowerAlpha => format!("{}.", int_to_lower_alpha(index)),
            ListStyleType::UpperAlpha => format!("{}.", int_to_lower_alpha(index).to_uppercase()),
            ListStyleType::LowerRoman => format!("{}.", int_to_lower_roman(index)),
            ListStyleType::UpperRoman => format!("{}.", int_to_lower_roman(index).to_uppercase()),
            ListStyleType::None => String::new(),
        }
    }
}

fn int_to_lower_alpha(n: usize) -> String {
    if n == 0 {
        return "a".to_string();
    }
    let mut s = String::new();
    let mut num = n - 1;
    loop {
        s.insert(0, (b'a' + (num % 26) as u8) as char);
        num /= 26;
        if num == 0 {
            break;
        }
        num -= 1;
    }
    s
}

fn int_to_lower_roman(n: usize) -> String {
    const VALUES: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut num = n;
    let mut result = String::new();
    for &(val, sym) in &VALUES {
        while num >= val {
            result.push_str(sym);
            num -= val;
        }
    }
    result
}
