//! Stevedore - declarative package-recipe descriptors for C/C++ builds.
//!
//! This crate models the recipe unit an external package-management tool
//! consumes: which packages a build unit requires (and under which version
//! constraints), which options it recognizes, which setting axes it reads,
//! which generators to invoke, and where generated and built artifacts
//! belong on disk. Resolution, file generation, and toolchain handling
//! stay with the external tool; stevedore supplies well-formed,
//! order-preserving declarations.

pub mod core;
pub mod layout;
pub mod util;

pub use crate::core::{
    constraint::VersionConstraint, errors::RecipeError, generator::Generator,
    options::OptionSet, options::OptionValue, recipe::Recipe, requirement::PackageRequirement,
    settings::BuildType, settings::SettingAxis,
};

pub use layout::{Layout, LayoutPolicy};
