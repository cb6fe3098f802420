//! Core data structures for stevedore.
//!
//! This module contains the foundational types of the recipe model:
//! - Version constraints and package requirements
//! - Option declarations and their value domains
//! - Setting axes and generator selection
//! - The recipe unit itself

pub mod constraint;
pub mod errors;
pub mod generator;
pub mod options;
pub mod recipe;
pub mod requirement;
pub mod settings;

pub use constraint::VersionConstraint;
pub use errors::RecipeError;
pub use generator::Generator;
pub use options::{OptionDeclaration, OptionSet, OptionValue};
pub use recipe::{Recipe, RECIPE_FILE_NAME};
pub use requirement::PackageRequirement;
pub use settings::{BuildType, SettingAxis};
