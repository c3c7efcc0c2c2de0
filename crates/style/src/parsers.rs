//! nom parsers for the CSS-like values that appear in style sheet JSON:
//! lengths, percentages, box shorthands, hex colors and border shorthands.

use crate::border::{Border, BorderStyle};
use crate::dimension::{Dimension, Length, Margins};
use folio_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{map, map_opt, map_res, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Cannot parse '{input}': {reason}")]
    Syntax { input: String, reason: String },

    #[error("Unexpected trailing input '{rest}' in '{input}'")]
    Trailing { input: String, rest: String },
}

type ParseError<'a> = nom::error::Error<&'a str>;

fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = ParseError<'a>>
where
    F: Parser<&'a str, Output = O, Error = ParseError<'a>>,
{
    delimited(space0, inner, space0)
}

/// A signed decimal such as `12`, `-3.5` or `.75`.
fn number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((recognize((digit1, opt((char('.'), digit1)))), recognize((char('.'), digit1)))),
        )),
        str::parse::<f32>,
    )
    .parse(input)
}

/// Points per unit. Bare numbers are points; `px` is treated as a point.
fn unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, alt((tag_no_case("pt"), tag_no_case("px")))),
        value(12.0, tag_no_case("pc")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// `12pt`, `1in`, `10mm`, `3pc` or a bare point value.
pub fn parse_length(input: &str) -> IResult<&str, Length> {
    map((number, opt(unit)), |(n, per)| Length(n * per.unwrap_or(1.0))).parse(input)
}

/// A length, a percentage or `auto`.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        value(Dimension::Auto, tag_no_case("auto")),
        map(terminated(number, char('%')), Dimension::Percent),
        map(parse_length, |l| Dimension::Pt(l.0)),
    ))
    .parse(input)
}

/// Box shorthand with CSS expansion: one, two, three or four lengths.
pub fn parse_margins(input: &str) -> IResult<&str, Margins> {
    map_opt(separated_list1(space1, parse_length), |sides| {
        let [top, right, bottom, left] = match sides.as_slice() {
            [all] => [*all; 4],
            [y, x] => [*y, *x, *y, *x],
            [top, x, bottom] => [*top, *x, *bottom, *x],
            [top, right, bottom, left] => [*top, *right, *bottom, *left],
            _ => return None,
        };
        Some(Margins {
            top: top.0,
            right: right.0,
            bottom: bottom.0,
            left: left.0,
        })
    })
    .parse(input)
}

fn hex6(input: &str) -> IResult<&str, Color> {
    map_res(take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()), |s: &str| {
        u32::from_str_radix(s, 16).map(|v| Color::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8))
    })
    .parse(input)
}

fn hex3(input: &str) -> IResult<&str, Color> {
    map_res(take_while_m_n(3, 3, |c: char| c.is_ascii_hexdigit()), |s: &str| {
        u16::from_str_radix(s, 16).map(|v| {
            let nibble = |shift: u16| ((v >> shift) & 0xf) as u8 * 17;
            Color::rgb(nibble(8), nibble(4), nibble(0))
        })
    })
    .parse(input)
}

/// `#rrggbb` or the short `#rgb` form.
pub fn parse_color(input: &str) -> IResult<&str, Color> {
    preceded(char('#'), alt((hex6, hex3))).parse(input)
}

pub fn parse_border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        value(BorderStyle::Solid, tag_no_case("solid")),
        value(BorderStyle::Dashed, tag_no_case("dashed")),
        value(BorderStyle::Dotted, tag_no_case("dotted")),
        value(BorderStyle::Double, tag_no_case("double")),
        value(BorderStyle::None, tag_no_case("none")),
    ))
    .parse(input)
}

/// `<width> <style> [<color>]`, e.g. `0.5pt solid #999`. Color defaults to black.
pub fn parse_border(input: &str) -> IResult<&str, Border> {
    map(
        (ws(parse_length), ws(parse_border_style), opt(ws(parse_color))),
        |(width, style, color)| Border {
            width,
            style,
            color: color.unwrap_or(Color::BLACK),
        },
    )
    .parse(input)
}

/// Runs `parser` over the trimmed input and requires it to consume everything.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = ParseError<'a>>,
{
    let trimmed = input.trim();
    match parser.parse(trimmed) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(StyleParseError::Trailing {
            input: trimmed.to_string(),
            rest: rest.to_string(),
        }),
        Err(e) => Err(StyleParseError::Syntax {
            input: trimmed.to_string(),
            reason: e.to_string(),
        }),
    }
}
