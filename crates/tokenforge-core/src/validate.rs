//! Cross-token validation.
//!
//! Three independent checks run over a finished [`TokenSet`]:
//!
//! 1. **Required-type coverage** — the set should contain at least one
//!    token of each category a design system cannot do without.
//! 2. **Alias-target existence** — every symbolic reference, in primary
//!    values and in mode values, must point at a token in the set.
//! 3. **Cycle detection** — the alias graph formed by primary values must
//!    be acyclic.
//!
//! The checks are advisory: they never mutate the set, and a failed check
//! is reported rather than raised. Aliases themselves stay unresolved.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::token::{TokenSet, TokenType, TokenValueOrAlias};

/// Token types a complete design system is expected to cover.
pub const REQUIRED_TYPES: [TokenType; 5] = [
    TokenType::Color,
    TokenType::Spacing,
    TokenType::Typography,
    TokenType::BorderRadius,
    TokenType::Shadow,
];

/// An alias whose target is not present in the token set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidReference {
    /// Name of the referencing token. Mode-level references are qualified
    /// as `"<name> (mode: <mode>)"`.
    pub token: String,
    /// The dangling reference.
    pub reference: String,
}

/// Result of the alias-target existence check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReferenceReport {
    /// Whether every reference resolved.
    pub valid: bool,
    /// The dangling references, in token order.
    pub invalid: Vec<InvalidReference>,
}

/// Result of the cycle detection check.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    /// Whether any alias cycle exists.
    pub has_circular: bool,
    /// Each cycle as an ordered list of names closing back on the first,
    /// e.g. `["a", "b", "a"]`.
    pub cycles: Vec<Vec<String>>,
}

/// Combined report of all three checks.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Required types with no representative token.
    pub missing_types: Vec<TokenType>,
    /// Alias-target existence results.
    pub references: ReferenceReport,
    /// Cycle detection results.
    pub cycles: CycleReport,
}

impl ValidationReport {
    /// Whether all three checks passed.
    pub fn is_valid(&self) -> bool {
        self.missing_types.is_empty() && self.references.valid && !self.cycles.has_circular
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return f.write_str("token set is valid");
        }
        for ty in &self.missing_types {
            writeln!(f, "missing required token type: {ty}")?;
        }
        for invalid in &self.references.invalid {
            writeln!(
                f,
                "unknown alias target \"{}\" referenced by {}",
                invalid.reference, invalid.token
            )?;
        }
        for cycle in &self.cycles.cycles {
            writeln!(f, "circular alias chain: {}", cycle.join(" -> "))?;
        }
        Ok(())
    }
}

/// Run all three checks.
pub fn validate(set: &TokenSet) -> ValidationReport {
    ValidationReport {
        missing_types: missing_required_types(set),
        references: check_references(set),
        cycles: detect_cycles(set),
    }
}

/// Required token types with no representative in the set.
pub fn missing_required_types(set: &TokenSet) -> Vec<TokenType> {
    REQUIRED_TYPES
        .iter()
        .copied()
        .filter(|ty| !set.tokens.values().any(|t| t.token_type == *ty))
        .collect()
}

/// Check that every alias, in primary and mode values, targets a token in
/// the set.
pub fn check_references(set: &TokenSet) -> ReferenceReport {
    let mut invalid = Vec::new();

    for (name, token) in &set.tokens {
        if let Some(reference) = token.value.as_alias() {
            if !set.contains(reference) {
                invalid.push(InvalidReference {
                    token: name.clone(),
                    reference: reference.to_string(),
                });
            }
        }
        if let Some(modes) = &token.modes {
            for (mode, value) in modes {
                if let Some(reference) = value.as_alias() {
                    if !set.contains(reference) {
                        invalid.push(InvalidReference {
                            token: format!("{name} (mode: {mode})"),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }
    }

    ReferenceReport {
        valid: invalid.is_empty(),
        invalid,
    }
}

/// Detect circular alias chains among primary values.
///
/// The alias graph treats each token's primary value as at most one edge
/// `name -> reference`. Traversal is depth-first with white/gray/black
/// marking; when a gray node is re-encountered, the slice of the current
/// path from that node forward is recorded as a cycle.
pub fn detect_cycles(set: &TokenSet) -> CycleReport {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        White,
        Gray,
        Black,
    }

    let mut marks: BTreeMap<&str, Mark> = set
        .tokens
        .keys()
        .map(|name| (name.as_str(), Mark::White))
        .collect();
    let mut cycles = Vec::new();

    for start in set.tokens.keys() {
        if marks[start.as_str()] != Mark::White {
            continue;
        }

        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(start.as_str());

        while let Some(name) = current {
            match marks.get(name).copied() {
                // Edge into a token that does not exist; the existence
                // check reports it, the chain simply ends here.
                None => break,
                Some(Mark::Black) => break,
                Some(Mark::Gray) => {
                    let entry = path
                        .iter()
                        .position(|&n| n == name)
                        .unwrap_or_default();
                    let mut cycle: Vec<String> =
                        path[entry..].iter().map(|n| n.to_string()).collect();
                    cycle.push(name.to_string());
                    cycles.push(cycle);
                    break;
                }
                Some(Mark::White) => {
                    marks.insert(name, Mark::Gray);
                    path.push(name);
                    current = set
                        .tokens
                        .get(name)
                        .and_then(|t| match &t.value {
                            TokenValueOrAlias::Alias { reference } => Some(reference.as_str()),
                            TokenValueOrAlias::Value(_) => None,
                        });
                }
            }
        }

        for name in path {
            marks.insert(name, Mark::Black);
        }
    }

    CycleReport {
        has_circular: !cycles.is_empty(),
        cycles,
    }
}
