//! The normalized token model.
//!
//! Both importers (DTCG documents and the remote variables service) funnel
//! into the types defined here. The model is deliberately a set of closed
//! tagged enumerations: downstream consumers pattern-match on
//! [`TokenType`] and [`TokenValueOrAlias`] rather than dispatching on an
//! open class hierarchy.
//!
//! The payload/type correspondence (a `color` token carries a
//! [`ColorValue`], and so on) is enforced in exactly one place:
//! [`NormalizedToken::new`]. Call sites never need to re-check it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Names
// ============================================================================

/// Normalize a raw source name into the canonical dotted form.
///
/// Lowercases, replaces `/` with `.`, and collapses whitespace runs into a
/// single hyphen. `"Color/Primary Hover"` becomes `"color.primary-hover"`.
pub fn normalize_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace('/', ".");

    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Derive a token id from a normalized name by substituting `-` for `.`.
pub fn name_to_id(name: &str) -> String {
    name.replace('.', "-")
}

// ============================================================================
// Token types
// ============================================================================

/// The closed set of token categories understood by downstream generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    /// A color value.
    Color,
    /// A dimension used for spacing scales.
    Spacing,
    /// A composite typography value.
    Typography,
    /// A corner radius.
    BorderRadius,
    /// A box shadow.
    Shadow,
    /// A general dimension (length with unit).
    Dimension,
    /// A bare number.
    Number,
    /// A bare string.
    String,
    /// A boolean flag.
    Boolean,
}

impl TokenType {
    /// The camelCase name used on the wire and in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Spacing => "spacing",
            Self::Typography => "typography",
            Self::BorderRadius => "borderRadius",
            Self::Shadow => "shadow",
            Self::Dimension => "dimension",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Value types
// ============================================================================

/// An RGBA color with all channels normalized to `[0, 1]`.
///
/// Integer byte values are an input-side concept only; the model never
/// stores them. A missing alpha always *means* `1.0` — the option exists so
/// emitted output can omit the channel when it is fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    /// Red channel in `[0, 1]`.
    pub r: f32,
    /// Green channel in `[0, 1]`.
    pub g: f32,
    /// Blue channel in `[0, 1]`.
    pub b: f32,
    /// Alpha channel in `[0, 1]`; `None` means fully opaque.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f32>,
}

impl ColorValue {
    /// Create a color from explicit channels.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: Some(a),
        }
    }

    /// The effective alpha channel.
    pub fn alpha(&self) -> f32 {
        self.a.unwrap_or(1.0)
    }

    /// Canonical hex emission: `#RRGGBB`, or `#RRGGBBAA` when not opaque.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b) = (byte(self.r), byte(self.g), byte(self.b));
        let a = byte(self.alpha());

        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

/// Units accepted for dimension values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    /// CSS pixels.
    Px,
    /// Root em.
    Rem,
    /// Em.
    Em,
    /// Points.
    Pt,
}

impl DimensionUnit {
    /// Parse a unit suffix, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "px" => Some(Self::Px),
            "rem" => Some(Self::Rem),
            "em" => Some(Self::Em),
            "pt" => Some(Self::Pt),
            _ => None,
        }
    }

    /// The lowercase unit suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for DimensionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A length with a unit, e.g. `16px` or `1.5rem`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionValue {
    /// Numeric magnitude.
    pub value: f32,
    /// Unit suffix.
    pub unit: DimensionUnit,
}

impl DimensionValue {
    /// Create a dimension value.
    pub fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

/// Units accepted for border-radius values. Unlike [`DimensionUnit`], this
/// set permits percentages (`50%` is a common pill-shape radius).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusUnit {
    /// CSS pixels.
    Px,
    /// Root em.
    Rem,
    /// Em.
    Em,
    /// Percentage of the box size.
    #[serde(rename = "%")]
    Percent,
}

impl RadiusUnit {
    /// The unit suffix as written in source values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Percent => "%",
        }
    }
}

/// Per-corner radius overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    /// Top-left corner.
    pub top_left: f32,
    /// Top-right corner.
    pub top_right: f32,
    /// Bottom-right corner.
    pub bottom_right: f32,
    /// Bottom-left corner.
    pub bottom_left: f32,
}

/// A border radius: a uniform value plus optional per-corner overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadiusValue {
    /// Uniform radius magnitude.
    pub value: f32,
    /// Unit of the radius.
    pub unit: RadiusUnit,
    /// Per-corner overrides, when the source distinguishes corners.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<CornerRadii>,
}

/// A box shadow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowValue {
    /// Shadow color.
    pub color: ColorValue,
    /// Horizontal offset.
    pub offset_x: f32,
    /// Vertical offset.
    pub offset_y: f32,
    /// Blur radius.
    pub blur: f32,
    /// Spread radius, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f32>,
    /// Inner shadow flag, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inset: Option<bool>,
}

/// A font weight: either a numeric weight or a named keyword kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// Numeric weight, e.g. `400`.
    Numeric(f64),
    /// Named weight, e.g. `"bold"`.
    Named(String),
}

/// A line height: a unitless multiplier or an explicit length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineHeight {
    /// Unitless multiplier, e.g. `1.5`.
    Multiplier(f64),
    /// Explicit length, e.g. `24px`.
    Length(DimensionValue),
}

/// A composite typography value.
///
/// `font_family` and `font_size` are required; a source group that cannot
/// produce both never composes into a typography token at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyValue {
    /// Font family stack, verbatim from the source.
    pub font_family: String,
    /// Font size.
    pub font_size: DimensionValue,
    /// Font weight, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Line height, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    /// Letter spacing, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<DimensionValue>,
    /// Text case transform, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_case: Option<String>,
    /// Text decoration, when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

// ============================================================================
// Values and aliases
// ============================================================================

/// The typed payload of a concrete token value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenValue {
    /// Boolean payload.
    Boolean(bool),
    /// Numeric payload.
    Number(f64),
    /// String payload.
    String(String),
    /// Color payload.
    Color(ColorValue),
    /// Dimension payload (used by both `dimension` and `spacing` tokens).
    Dimension(DimensionValue),
    /// Typography payload.
    Typography(TypographyValue),
    /// Border-radius payload.
    BorderRadius(BorderRadiusValue),
    /// Shadow payload.
    Shadow(ShadowValue),
}

impl TokenValue {
    /// Whether this payload variant is legal for the given token type.
    pub fn matches_type(&self, token_type: TokenType) -> bool {
        matches!(
            (self, token_type),
            (Self::Boolean(_), TokenType::Boolean)
                | (Self::Number(_), TokenType::Number)
                | (Self::String(_), TokenType::String)
                | (Self::Color(_), TokenType::Color)
                | (Self::Dimension(_), TokenType::Dimension | TokenType::Spacing)
                | (Self::Typography(_), TokenType::Typography)
                | (Self::BorderRadius(_), TokenType::BorderRadius)
                | (Self::Shadow(_), TokenType::Shadow)
        )
    }

    /// Name of the payload variant, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Color(_) => "color",
            Self::Dimension(_) => "dimension",
            Self::Typography(_) => "typography",
            Self::BorderRadius(_) => "borderRadius",
            Self::Shadow(_) => "shadow",
        }
    }
}

/// A concrete value or a symbolic reference to another token.
///
/// References are never resolved by the pipeline; they are emitted as-is
/// and checked for existence by [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenValueOrAlias {
    /// A concrete, typed value.
    Value(TokenValue),
    /// A symbolic reference to another token by normalized name.
    Alias {
        /// Dot-separated normalized name of the target token.
        reference: String,
    },
}

impl TokenValueOrAlias {
    /// Wrap a concrete value.
    pub fn value(value: TokenValue) -> Self {
        Self::Value(value)
    }

    /// Create an alias to a normalized token name.
    pub fn alias(reference: impl Into<String>) -> Self {
        Self::Alias {
            reference: reference.into(),
        }
    }

    /// The alias reference, if this is an alias.
    pub fn as_alias(&self) -> Option<&str> {
        match self {
            Self::Alias { reference } => Some(reference),
            Self::Value(_) => None,
        }
    }
}

// ============================================================================
// Tokens and token sets
// ============================================================================

/// Which ingestion source produced a token or token set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    /// The remote variables service.
    Figma,
    /// A DTCG-format document.
    Dtcg,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Figma => f.write_str("figma"),
            Self::Dtcg => f.write_str("dtcg"),
        }
    }
}

/// Per-token metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Source that produced the token.
    pub source: TokenSource,
}

/// A single normalized token.
///
/// Construct through [`NormalizedToken::new`], which normalizes the name,
/// derives the id, and enforces payload/type correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedToken {
    /// Name with dots replaced by hyphens.
    pub id: String,
    /// Lowercase, dot-separated, non-empty name.
    pub name: String,
    /// Token category.
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Default value (or alias).
    pub value: TokenValueOrAlias,
    /// Additional per-mode values, keyed by mode name. Never empty when
    /// present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<BTreeMap<String, TokenValueOrAlias>>,
    /// Human-readable description from the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TokenMetadata>,
}

impl NormalizedToken {
    /// Create a token from a raw source name, a type, and a value.
    ///
    /// The name is normalized (see [`normalize_name`]) and must be
    /// non-empty afterwards. A concrete value must carry the payload
    /// variant matching `token_type`; aliases are accepted for any type
    /// since their targets are checked post-normalization.
    pub fn new(raw_name: &str, token_type: TokenType, value: TokenValueOrAlias) -> Result<Self> {
        let name = normalize_name(raw_name);
        if name.is_empty() {
            return Err(Error::EmptyName {
                raw: raw_name.to_string(),
            });
        }
        if let TokenValueOrAlias::Value(payload) = &value {
            if !payload.matches_type(token_type) {
                return Err(Error::PayloadMismatch {
                    name,
                    token_type,
                    payload: payload.variant_name(),
                });
            }
        }
        Ok(Self {
            id: name_to_id(&name),
            name,
            token_type,
            value,
            modes: None,
            description: None,
            metadata: None,
        })
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach per-mode values. An empty map collapses to absent.
    pub fn with_modes(mut self, modes: BTreeMap<String, TokenValueOrAlias>) -> Self {
        self.modes = if modes.is_empty() { None } else { Some(modes) };
        self
    }

    /// Attach source metadata.
    pub fn with_source(mut self, source: TokenSource) -> Self {
        self.metadata = Some(TokenMetadata { source });
        self
    }
}

/// Metadata describing a whole token set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSetMetadata {
    /// Source that produced the set.
    pub source: TokenSource,
    /// Display name, e.g. `"Figma Variables - <file key>"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version string, when the source supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description, when the source supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TokenSetMetadata {
    /// Metadata with only a source.
    pub fn new(source: TokenSource) -> Self {
        Self {
            source,
            name: None,
            version: None,
            description: None,
        }
    }

    /// Metadata with a source and display name.
    pub fn named(source: TokenSource, name: impl Into<String>) -> Self {
        Self {
            source,
            name: Some(name.into()),
            version: None,
            description: None,
        }
    }
}

/// The aggregated result of one ingest invocation: a name-keyed mapping of
/// normalized tokens plus set-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Tokens keyed by normalized name.
    pub tokens: BTreeMap<String, NormalizedToken>,
    /// Set-level metadata.
    pub metadata: TokenSetMetadata,
}

impl TokenSet {
    /// Create an empty set.
    pub fn new(metadata: TokenSetMetadata) -> Self {
        Self {
            tokens: BTreeMap::new(),
            metadata,
        }
    }

    /// Insert a token under its normalized name.
    ///
    /// Returns the previously stored token when the name was already taken
    /// (later insertion wins); callers decide whether that deserves a
    /// collision warning.
    pub fn insert(&mut self, token: NormalizedToken) -> Option<NormalizedToken> {
        self.tokens.insert(token.name.clone(), token)
    }

    /// Look up a token by normalized name.
    pub fn get(&self, name: &str) -> Option<&NormalizedToken> {
        self.tokens.get(name)
    }

    /// Whether a token with this normalized name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    /// Number of tokens in the set.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize the set to a compact JSON string.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize the set to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_name_rules() {
        assert_eq!(normalize_name("Color/Primary"), "color.primary");
        assert_eq!(normalize_name("Color/Primary Hover"), "color.primary-hover");
        assert_eq!(normalize_name("spacing / md"), "spacing-.-md");
        assert_eq!(normalize_name("  Button  "), "button");
        assert_eq!(normalize_name("a/b/c"), "a.b.c");
    }

    #[test]
    fn name_to_id_substitutes_dots() {
        assert_eq!(name_to_id("color.primary"), "color-primary");
        assert_eq!(name_to_id("plain"), "plain");
    }

    #[test]
    fn constructor_normalizes_and_derives_id() {
        let token = NormalizedToken::new(
            "Typography/Body Large",
            TokenType::Number,
            TokenValueOrAlias::value(TokenValue::Number(1.0)),
        )
        .unwrap();
        assert_eq!(token.name, "typography.body-large");
        assert_eq!(token.id, "typography-body-large");
    }

    #[test]
    fn constructor_rejects_payload_mismatch() {
        let err = NormalizedToken::new(
            "color.primary",
            TokenType::Color,
            TokenValueOrAlias::value(TokenValue::Number(4.0)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PayloadMismatch { .. }));
    }

    #[test]
    fn constructor_accepts_alias_for_any_type() {
        let token = NormalizedToken::new(
            "color.secondary",
            TokenType::Color,
            TokenValueOrAlias::alias("color.primary"),
        )
        .unwrap();
        assert_eq!(token.value.as_alias(), Some("color.primary"));
    }

    #[test]
    fn constructor_rejects_empty_name() {
        let err = NormalizedToken::new(
            "   ",
            TokenType::Number,
            TokenValueOrAlias::value(TokenValue::Number(0.0)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmptyName { .. }));
    }

    #[test]
    fn spacing_accepts_dimension_payload() {
        let token = NormalizedToken::new(
            "spacing.md",
            TokenType::Spacing,
            TokenValueOrAlias::value(TokenValue::Dimension(DimensionValue::new(
                16.0,
                DimensionUnit::Px,
            ))),
        );
        assert!(token.is_ok());
    }

    #[test]
    fn empty_modes_collapse_to_absent() {
        let token = NormalizedToken::new(
            "color.primary",
            TokenType::Color,
            TokenValueOrAlias::value(TokenValue::Color(ColorValue::new(1.0, 0.0, 0.0, 1.0))),
        )
        .unwrap()
        .with_modes(BTreeMap::new());
        assert!(token.modes.is_none());
    }

    #[test]
    fn insert_reports_displaced_token() {
        let mut set = TokenSet::new(TokenSetMetadata::new(TokenSource::Dtcg));
        let first = NormalizedToken::new(
            "color.primary",
            TokenType::Color,
            TokenValueOrAlias::value(TokenValue::Color(ColorValue::new(1.0, 0.0, 0.0, 1.0))),
        )
        .unwrap();
        let second = NormalizedToken::new(
            "color.primary",
            TokenType::Color,
            TokenValueOrAlias::value(TokenValue::Color(ColorValue::new(0.0, 1.0, 0.0, 1.0))),
        )
        .unwrap();

        assert!(set.insert(first).is_none());
        let displaced = set.insert(second.clone()).expect("collision");
        assert_ne!(displaced.value, second.value);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("color.primary").unwrap().value, second.value);
    }

    #[test]
    fn color_hex_emission() {
        let opaque = ColorValue::new(1.0, 0.0, 0.2, 1.0);
        assert_eq!(opaque.to_hex(), "#FF0033");

        let translucent = ColorValue::new(1.0, 0.0, 0.2, 0.5);
        assert_eq!(translucent.to_hex(), "#FF003380");

        let implicit_alpha = ColorValue {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: None,
        };
        assert_eq!(implicit_alpha.to_hex(), "#000000");
    }
}
