//! Color literal parsing.
//!
//! Recognizes three shapes, dispatched on the leading characters:
//!
//! - `#RGB`, `#RRGGBB`, `#RRGGBBAA` hex literals
//! - `rgb(r, g, b)` with integer or decimal components
//! - `rgba(r, g, b[, a])` with an optional alpha component
//!
//! All channels are normalized to `[0, 1]` floats. RGB components are
//! divided by 255; alpha is taken as-is. A missing alpha is `1.0`.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

use crate::token::ColorValue;

/// Parse a color literal.
///
/// Returns `None` for the empty string, malformed literals, non-finite
/// components, and any shape outside the supported set.
pub fn parse_color(input: &str) -> Option<ColorValue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex);
    }

    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("rgb(") || lowered.starts_with("rgba(") {
        return parse_rgb_function(trimmed);
    }

    tracing::debug!(target: "tokenforge_core", "unrecognized color literal: {trimmed:?}");
    None
}

/// Parse the digits of a hex literal (without the leading `#`).
///
/// Exactly 3, 6, or 8 hex digits are accepted. Three-digit literals double
/// each nibble; eight-digit literals carry an alpha byte.
fn parse_hex(hex: &str) -> Option<ColorValue> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let byte_at = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let channel = |b: u8| b as f32 / 255.0;

    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
            let (r, g, b) = (nibble(0)?, nibble(1)?, nibble(2)?);
            Some(ColorValue::new(
                channel(r * 17),
                channel(g * 17),
                channel(b * 17),
                1.0,
            ))
        }
        6 => Some(ColorValue::new(
            channel(byte_at(0)?),
            channel(byte_at(2)?),
            channel(byte_at(4)?),
            1.0,
        )),
        8 => Some(ColorValue::new(
            channel(byte_at(0)?),
            channel(byte_at(2)?),
            channel(byte_at(4)?),
            channel(byte_at(6)?),
        )),
        _ => None,
    }
}

/// Parse `rgb(...)` / `rgba(...)` function syntax.
fn parse_rgb_function(input: &str) -> Option<ColorValue> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);

    let token = parser.next().ok()?.clone();
    let allow_alpha = match &token {
        Token::Function(name) if name.eq_ignore_ascii_case("rgb") => false,
        Token::Function(name) if name.eq_ignore_ascii_case("rgba") => true,
        _ => return None,
    };

    let components = parser
        .parse_nested_block(|p| {
            let r = expect_number(p)?;
            p.expect_comma()?;
            let g = expect_number(p)?;
            p.expect_comma()?;
            let b = expect_number(p)?;
            let a = if allow_alpha && p.try_parse(|p| p.expect_comma()).is_ok() {
                expect_number(p)?
            } else {
                1.0
            };
            if !p.is_exhausted() {
                return Err(p.new_custom_error(()));
            }
            Ok::<_, CssParseError<'_, ()>>((r, g, b, a))
        })
        .ok()?;

    if !parser.is_exhausted() {
        return None;
    }

    let (r, g, b, a) = components;
    if ![r, g, b, a].iter().all(|c| c.is_finite()) {
        return None;
    }

    Some(ColorValue::new(
        (r / 255.0).clamp(0.0, 1.0),
        (g / 255.0).clamp(0.0, 1.0),
        (b / 255.0).clamp(0.0, 1.0),
        a.clamp(0.0, 1.0),
    ))
}

/// Expect a bare number token (integer or decimal; percentages rejected).
fn expect_number<'i>(parser: &mut Parser<'i, '_>) -> Result<f32, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok(value),
        _ => Err(parser.new_custom_error(())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn hex_shortcut_doubles_nibbles() {
        let c = parse_color("#F73").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.4667));
        assert!(close(c.b, 0.2));
        assert!(close(c.alpha(), 1.0));
    }

    #[test]
    fn hex_six_digits() {
        let c = parse_color("#FF5733").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.3412));
        assert!(close(c.b, 0.2));
        assert!(close(c.alpha(), 1.0));
    }

    #[test]
    fn hex_eight_digits_carries_alpha() {
        let c = parse_color("#FF573380").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 0.3412));
        assert!(close(c.b, 0.2));
        assert!(close(c.alpha(), 0.5020));
    }

    #[test]
    fn hex_rejects_other_lengths() {
        assert!(parse_color("#F7").is_none());
        assert!(parse_color("#F733").is_none());
        assert!(parse_color("#FF57331").is_none());
        assert!(parse_color("#FF5733801").is_none());
    }

    #[test]
    fn hex_rejects_non_hex_digits() {
        assert!(parse_color("#GG5733").is_none());
        assert!(parse_color("#FF573G").is_none());
    }

    #[test]
    fn rgb_function() {
        let c = parse_color("rgb(255, 87, 51)").unwrap();
        assert!(close(c.r, 1.0));
        assert!(close(c.g, 87.0 / 255.0));
        assert!(close(c.b, 0.2));
        assert!(close(c.alpha(), 1.0));
    }

    #[test]
    fn rgb_accepts_decimals() {
        let c = parse_color("rgb(127.5, 0, 0)").unwrap();
        assert!(close(c.r, 0.5));
    }

    #[test]
    fn rgba_with_alpha() {
        let c = parse_color("rgba(255, 87, 51, 0.5)").unwrap();
        assert!(close(c.alpha(), 0.5));
    }

    #[test]
    fn rgba_without_alpha_defaults_to_opaque() {
        let c = parse_color("rgba(255, 87, 51)").unwrap();
        assert!(close(c.alpha(), 1.0));
    }

    #[test]
    fn rgb_rejects_missing_commas() {
        assert!(parse_color("rgb(255 87 51)").is_none());
    }

    #[test]
    fn rgb_rejects_extra_components() {
        assert!(parse_color("rgb(255, 87, 51, 0.5)").is_none());
    }

    #[test]
    fn rgb_rejects_trailing_garbage() {
        assert!(parse_color("rgb(255, 87, 51) extra").is_none());
    }

    #[test]
    fn empty_and_unknown_inputs() {
        assert!(parse_color("").is_none());
        assert!(parse_color("   ").is_none());
        assert!(parse_color("hsl(10, 20%, 30%)").is_none());
        assert!(parse_color("red").is_none());
    }

    #[test]
    fn case_insensitive_function_names() {
        assert!(parse_color("RGB(1, 2, 3)").is_some());
        assert!(parse_color("RGBA(1, 2, 3, 0.1)").is_some());
    }
}
