//! Package requirement declarations.
//!
//! A `PackageRequirement` names an external package a recipe unit needs,
//! the acceptable version range, and whether the entry overrides versions
//! pulled in transitively by other requirements. Declaration order is
//! significant to the external resolver's override precedence, so
//! requirements always travel in order-preserving lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constraint::VersionConstraint;
use crate::core::errors::RecipeError;

/// A single declared package requirement.
///
/// Immutable once created; the external resolver consumes it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequirement {
    /// Package name
    name: String,

    /// Acceptable version range
    constraint: VersionConstraint,

    /// Force this constraint above transitively-requested versions
    override_flag: bool,
}

impl PackageRequirement {
    /// Create a requirement with the unconstrained wildcard.
    pub fn new(name: impl Into<String>) -> Result<Self, RecipeError> {
        let name = name.into();
        validate_package_name(&name)?;
        Ok(PackageRequirement {
            name,
            constraint: VersionConstraint::any(),
            override_flag: false,
        })
    }

    /// Set the version constraint.
    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// Mark this requirement as an override.
    pub fn with_override(mut self, override_flag: bool) -> Self {
        self.override_flag = override_flag;
        self
    }

    /// Parse a combined reference of the form `name/constraint`,
    /// e.g. `boost/[^1]` or `fmt/~11`.
    pub fn parse_reference(reference: &str) -> Result<Self, RecipeError> {
        let (name, expr) = reference
            .split_once('/')
            .ok_or_else(|| RecipeError::MalformedReference {
                reference: reference.to_string(),
            })?;

        let constraint = VersionConstraint::parse(expr)?;
        Ok(PackageRequirement::new(name)?.with_constraint(constraint))
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the version constraint.
    pub fn constraint(&self) -> &VersionConstraint {
        &self.constraint
    }

    /// Check if this requirement overrides transitive versions.
    pub fn is_override(&self) -> bool {
        self.override_flag
    }

    /// Check if a concrete version satisfies this requirement.
    pub fn matches_version(&self, version: &semver::Version) -> bool {
        self.constraint.matches(version)
    }
}

impl fmt::Display for PackageRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.constraint)?;
        if self.override_flag {
            write!(f, " (override)")?;
        }
        Ok(())
    }
}

/// Requirement entry as it appears in `Recipe.toml`.
///
/// Two spellings are accepted:
///
/// ```toml
/// [[requirements]]
/// name = "boost"
/// version = "^1"
///
/// [[requirements]]
/// ref = "fmt/[~11]"
/// override = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequirementSpec {
    /// Combined `name/constraint` reference
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,

    /// Package name (split spelling)
    #[serde(default)]
    pub name: Option<String>,

    /// Version constraint (split spelling; absent means unconstrained)
    #[serde(default)]
    pub version: Option<String>,

    /// Override flag
    #[serde(default, rename = "override")]
    pub override_flag: bool,
}

impl RequirementSpec {
    /// Convert to a validated `PackageRequirement`.
    pub fn to_requirement(&self) -> Result<PackageRequirement, RecipeError> {
        let req = match (&self.reference, &self.name) {
            (Some(reference), None) => PackageRequirement::parse_reference(reference)?,
            (None, Some(name)) => {
                let constraint = match &self.version {
                    Some(expr) => VersionConstraint::parse(expr)?,
                    None => VersionConstraint::any(),
                };
                PackageRequirement::new(name.as_str())?.with_constraint(constraint)
            }
            // `ref` already carries the constraint; a stray `name` or
            // `version` next to it would be silently shadowed.
            _ => return Err(RecipeError::IncompleteRequirement),
        };

        Ok(req.with_override(self.override_flag))
    }
}

/// Validate a package name for use in a requirement.
pub fn validate_package_name(name: &str) -> Result<(), RecipeError> {
    if name.is_empty() {
        return Err(RecipeError::EmptyRequirementName);
    }

    if !name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        return Err(RecipeError::InvalidRequirementName {
            name: name.to_string(),
            reason: "must start with an ASCII letter or digit",
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
    {
        return Err(RecipeError::InvalidRequirementName {
            name: name.to_string(),
            reason: "only lowercase letters, digits, `.`, `_`, and `-` are allowed",
        });
    }

    Ok(())
}
