//! Dimension literal parsing.

use cssparser::{Parser, ParserInput, Token};

use crate::token::{BorderRadiusValue, DimensionUnit, DimensionValue, RadiusUnit};

/// Parse a `<number><unit>` literal into a [`DimensionValue`].
///
/// The input is trimmed; the unit is matched case-insensitively against
/// `{px, rem, em, pt}` and lowercased on output. A leading minus and a
/// fractional part are permitted. Anything else returns `None`.
pub fn parse_dimension(input: &str) -> Option<DimensionValue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parser_input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut parser_input);

    let token = parser.next().ok()?.clone();
    let dimension = match token {
        Token::Dimension { value, unit, .. } => {
            DimensionValue::new(value, DimensionUnit::parse(unit.as_ref())?)
        }
        _ => return None,
    };

    if !parser.is_exhausted() || !dimension.value.is_finite() {
        return None;
    }
    Some(dimension)
}

/// Parse a border-radius literal.
///
/// Border radii accept the dimension units minus `pt`, plus percentages
/// (`"50%"` is the common pill shape). Per-corner overrides are a
/// model-side concept; a literal always produces a uniform radius.
pub fn parse_radius(input: &str) -> Option<BorderRadiusValue> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parser_input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut parser_input);

    let token = parser.next().ok()?.clone();
    let radius = match token {
        Token::Dimension { value, unit, .. } => {
            let unit = match unit.to_ascii_lowercase().as_str() {
                "px" => RadiusUnit::Px,
                "rem" => RadiusUnit::Rem,
                "em" => RadiusUnit::Em,
                _ => return None,
            };
            BorderRadiusValue {
                value,
                unit,
                corners: None,
            }
        }
        Token::Percentage { unit_value, .. } => BorderRadiusValue {
            value: unit_value * 100.0,
            unit: RadiusUnit::Percent,
            corners: None,
        },
        _ => return None,
    };

    if !parser.is_exhausted() || !radius.value.is_finite() {
        return None;
    }
    Some(radius)
}
