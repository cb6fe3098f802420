//! Version-constraint expressions for package requirements.
//!
//! The supported grammar mirrors what recipe authors actually write:
//! a pin (`1.2`), a caret range (`^1`), a tilde range (`~11`), or an
//! unconstrained wildcard (`*`). Expressions may additionally be wrapped
//! in square brackets (`[^1]`, `[~11]`, `[]`), the spelling used inside
//! combined requirement references such as `boost/[^1]`.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error parsing a version-constraint expression.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("empty version constraint")]
    Empty,

    #[error("malformed version constraint `{expr}`: {source}")]
    Malformed {
        expr: String,
        source: semver::Error,
    },

    #[error("unsupported version constraint `{expr}` (expected a pin, `^`, `~`, or `*`)")]
    Unsupported { expr: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Repr {
    /// Unconstrained: any version is acceptable, prereleases included.
    Any,
    /// A semver requirement (pin, caret, or tilde).
    Req(VersionReq),
}

/// A parsed version constraint.
///
/// Immutable after parsing. `Display` produces the canonical text form,
/// which parses back to an equal constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    repr: Repr,
    canonical: String,
}

impl VersionConstraint {
    /// The unconstrained wildcard, written `*`.
    pub fn any() -> Self {
        VersionConstraint {
            repr: Repr::Any,
            canonical: "*".to_string(),
        }
    }

    /// Parse a constraint expression.
    ///
    /// Bracketed forms are unwrapped first, so `[^1]` and `^1` parse to
    /// the same constraint, and both `[]` and `*` mean unconstrained.
    pub fn parse(expr: &str) -> Result<Self, ConstraintError> {
        let trimmed = expr.trim();
        if trimmed.is_empty() {
            return Err(ConstraintError::Empty);
        }

        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
            .unwrap_or(trimmed);

        if inner.is_empty() || inner == "*" {
            return Ok(VersionConstraint::any());
        }

        let canonical = match inner.chars().next() {
            Some('^') | Some('~') | Some('=') => inner.to_string(),
            // A bare pin means "this version": model it as semver `=`,
            // which is lenient about missing minor/patch components
            // (`=1.2` matches any 1.2.x).
            Some(c) if c.is_ascii_digit() => format!("={inner}"),
            _ => {
                return Err(ConstraintError::Unsupported {
                    expr: trimmed.to_string(),
                })
            }
        };

        let req: VersionReq = canonical.parse().map_err(|source| ConstraintError::Malformed {
            expr: trimmed.to_string(),
            source,
        })?;

        Ok(VersionConstraint {
            repr: Repr::Req(req),
            canonical,
        })
    }

    /// Check whether a concrete version satisfies this constraint.
    pub fn matches(&self, version: &Version) -> bool {
        match &self.repr {
            Repr::Any => true,
            Repr::Req(req) => req.matches(version),
        }
    }

    /// Check if this is the unconstrained wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self.repr, Repr::Any)
    }

    /// The underlying semver requirement, if one exists (`None` for `*`).
    pub fn as_version_req(&self) -> Option<&VersionReq> {
        match &self.repr {
            Repr::Any => None,
            Repr::Req(req) => Some(req),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for VersionConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionConstraint::parse(s)
    }
}

impl Serialize for VersionConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical)
    }
}

impl<'de> Deserialize<'de> for VersionConstraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        VersionConstraint::parse(&s).map_err(serde::de::Error::custom)
    }
}
