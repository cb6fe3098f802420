//! Recipe validation error types.

use thiserror::Error;

use crate::core::constraint::ConstraintError;

/// Error loading or validating a recipe descriptor.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to parse recipe: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid requirement: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("requirement has an empty package name")]
    EmptyRequirementName,

    #[error("invalid package name `{name}`: {reason}")]
    InvalidRequirementName { name: String, reason: &'static str },

    #[error(
        "requirement entry must specify either `ref = \"name/constraint\"` or `name` (with optional `version`)"
    )]
    IncompleteRequirement,

    #[error("malformed requirement reference `{reference}` (expected `name/constraint`)")]
    MalformedReference { reference: String },

    #[error("duplicate requirement for `{name}`: a package may be declared at most once without `override`")]
    DuplicateRequirement { name: String },

    #[error("option `{key}` declares no choices")]
    EmptyChoices { key: String },

    #[error("option `{key}` default `{default}` is not one of its declared choices")]
    InvalidDefault { key: String, default: String },

    #[error("unknown option `{key}`")]
    UnknownOption { key: String },

    #[error("value `{value}` is not a valid choice for option `{key}`")]
    InvalidOptionValue { key: String, value: String },

    #[error("unknown layout policy `{name}` (expected `standard`)")]
    UnknownLayout { name: String },
}
