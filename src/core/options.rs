//! User-configurable build options.
//!
//! A recipe publishes the options it recognizes, the domain of values each
//! accepts, and a default for each. Enforcement happens when the external
//! tool feeds a value back in: anything outside the declared domain is a
//! configuration error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::errors::RecipeError;

/// A scalar option value: options are either boolean toggles (`shared`)
/// or small enumerations of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

/// A declared option: its value domain and default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDeclaration {
    /// Accepted values, in declaration order.
    pub choices: Vec<OptionValue>,

    /// Default value; must be one of `choices`.
    pub default: OptionValue,
}

impl OptionDeclaration {
    /// Validate the declaration invariants for the option named `key`.
    pub fn validate(&self, key: &str) -> Result<(), RecipeError> {
        if self.choices.is_empty() {
            return Err(RecipeError::EmptyChoices {
                key: key.to_string(),
            });
        }
        if !self.choices.contains(&self.default) {
            return Err(RecipeError::InvalidDefault {
                key: key.to_string(),
                default: self.default.to_string(),
            });
        }
        Ok(())
    }

    /// Check if a value lies in this option's domain.
    pub fn accepts(&self, value: &OptionValue) -> bool {
        self.choices.contains(value)
    }
}

/// The full set of options a recipe recognizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    declarations: BTreeMap<String, OptionDeclaration>,
}

impl OptionSet {
    /// Build an option set, validating each declaration.
    pub fn new(declarations: BTreeMap<String, OptionDeclaration>) -> Result<Self, RecipeError> {
        for (key, decl) in &declarations {
            decl.validate(key)?;
        }
        Ok(OptionSet { declarations })
    }

    /// Look up an option declaration by key.
    pub fn get(&self, key: &str) -> Option<&OptionDeclaration> {
        self.declarations.get(key)
    }

    /// The default value for an option, if declared.
    pub fn default_of(&self, key: &str) -> Option<&OptionValue> {
        self.declarations.get(key).map(|decl| &decl.default)
    }

    /// Validate an externally supplied `key = value` assignment.
    pub fn check(&self, key: &str, value: &OptionValue) -> Result<(), RecipeError> {
        let decl = self
            .declarations
            .get(key)
            .ok_or_else(|| RecipeError::UnknownOption {
                key: key.to_string(),
            })?;

        if !decl.accepts(value) {
            return Err(RecipeError::InvalidOptionValue {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Iterate declarations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDeclaration)> {
        self.declarations.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared options.
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if no options are declared.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
