//! `Recipe.toml` parsing and the recipe unit model.
//!
//! A recipe unit is the complete declaration the external tool consumes
//! for one build unit: ordered package requirements, recognized options,
//! consumed setting axes, generator selection, and a layout policy.
//! Units are independent of each other; loading one is a pure,
//! idempotent read with no cross-unit state.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::errors::RecipeError;
use crate::core::generator::Generator;
use crate::core::options::{OptionDeclaration, OptionSet, OptionValue};
use crate::core::requirement::{PackageRequirement, RequirementSpec};
use crate::core::settings::SettingAxis;
use crate::layout::{Layout, LayoutPolicy};
use crate::util::fs;

/// The canonical descriptor file name.
pub const RECIPE_FILE_NAME: &str = "Recipe.toml";

/// A validated recipe unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    /// Unit name from the `[recipe]` section.
    name: String,

    /// Setting axes this unit consumes; values arrive externally.
    settings: Vec<SettingAxis>,

    /// Generators the external tool must invoke.
    generators: Vec<Generator>,

    /// Directory convention for build and generator output.
    layout: LayoutPolicy,

    /// Recognized options and their defaults.
    options: OptionSet,

    /// Declared requirements, in declaration order.
    requirements: Vec<PackageRequirement>,

    /// The directory containing this recipe.
    recipe_dir: PathBuf,
}

/// Raw recipe as deserialized from TOML, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecipe {
    recipe: RawRecipeMeta,

    #[serde(default)]
    options: BTreeMap<String, OptionDeclaration>,

    #[serde(default)]
    requirements: Vec<RequirementSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecipeMeta {
    name: String,

    #[serde(default)]
    settings: Vec<SettingAxis>,

    #[serde(default)]
    generators: Vec<Generator>,

    /// Layout policy name; kept as a string so an unknown name surfaces
    /// as a recipe error rather than a bare deserialization failure.
    #[serde(default)]
    layout: Option<String>,
}

impl Recipe {
    /// Load a recipe from a `Recipe.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
            .with_context(|| format!("invalid recipe: {}", path.display()))
    }

    /// Parse recipe content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, RecipeError> {
        let raw: RawRecipe = toml::from_str(content)?;
        let recipe_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let layout = match raw.recipe.layout.as_deref() {
            Some(name) => name.parse()?,
            None => LayoutPolicy::default(),
        };

        let options = OptionSet::new(raw.options)?;

        let mut requirements = Vec::with_capacity(raw.requirements.len());
        for spec in &raw.requirements {
            requirements.push(spec.to_requirement()?);
        }
        validate_requirements(&raw.recipe.name, &requirements)?;

        Ok(Recipe {
            name: raw.recipe.name,
            settings: raw.recipe.settings,
            generators: raw.recipe.generators,
            layout,
            options,
            requirements,
            recipe_dir,
        })
    }

    /// The unit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The setting axes this unit consumes.
    pub fn settings(&self) -> &[SettingAxis] {
        &self.settings
    }

    /// The generators to invoke, in declaration order.
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// The layout policy token.
    pub fn layout(&self) -> LayoutPolicy {
        self.layout
    }

    /// The recognized options.
    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// The declared requirements, in declaration order.
    pub fn requirements(&self) -> &[PackageRequirement] {
        &self.requirements
    }

    /// The directory containing the recipe file.
    pub fn recipe_dir(&self) -> &Path {
        &self.recipe_dir
    }

    /// Validate an externally supplied option assignment against the
    /// declared domain.
    pub fn check_option(&self, key: &str, value: &OptionValue) -> Result<(), RecipeError> {
        self.options.check(key, value)
    }

    /// Bind this unit's layout policy to a root directory.
    pub fn bind_layout(
        &self,
        root: &Path,
        build_type: crate::core::settings::BuildType,
    ) -> Layout {
        self.layout.bind(root, build_type)
    }
}

/// Check the declared requirement list for internal contradictions.
///
/// A package may be named at most once without `override`; further
/// entries for the same name must be overrides. Multiple overrides in
/// one unit are legal but their relative precedence belongs to the
/// external resolver, so they are only noted.
fn validate_requirements(
    unit: &str,
    requirements: &[PackageRequirement],
) -> Result<(), RecipeError> {
    let mut plain: HashSet<&str> = HashSet::new();
    for req in requirements {
        if !req.is_override() && !plain.insert(req.name()) {
            return Err(RecipeError::DuplicateRequirement {
                name: req.name().to_string(),
            });
        }
    }

    let overrides = requirements.iter().filter(|r| r.is_override()).count();
    if overrides > 1 {
        tracing::debug!(
            "recipe `{}` declares {} overrides; relative precedence is decided by the resolver",
            unit,
            overrides
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::BuildType;

    const UNO: &str = r#"
[recipe]
name = "01.uno"
settings = ["os", "compiler", "build_type", "arch"]
generators = ["CMakeToolchain", "CMakeDeps"]
layout = "standard"

[options.shared]
choices = [true, false]
default = true

[[requirements]]
name = "boost"
version = "^1"
"#;

    const PLAY: &str = r#"
[recipe]
name = "04.play"
settings = ["os", "compiler", "build_type", "arch"]
generators = ["CMakeToolchain", "CMakeDeps"]
layout = "standard"

[options.shared]
choices = [true, false]
default = true

[[requirements]]
ref = "fmt/[~11]"
override = true

[[requirements]]
ref = "boost/[]"
override = true

[[requirements]]
ref = "folly/[]"

[[requirements]]
ref = "gtest/[^1]"
"#;

    fn parse(content: &str) -> Recipe {
        Recipe::parse(content, Path::new("Recipe.toml")).unwrap()
    }

    #[test]
    fn test_parse_single_requirement_unit() {
        let recipe = parse(UNO);

        assert_eq!(recipe.name(), "01.uno");
        assert_eq!(recipe.settings(), SettingAxis::ALL.as_slice());
        assert_eq!(
            recipe.generators(),
            [Generator::CMakeToolchain, Generator::CMakeDeps].as_slice()
        );
        assert_eq!(recipe.layout(), LayoutPolicy::Standard);

        let reqs = recipe.requirements();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].name(), "boost");
        assert_eq!(reqs[0].constraint().to_string(), "^1");
        assert!(!reqs[0].is_override());

        assert_eq!(recipe.options().default_of("shared"), Some(&true.into()));
    }

    #[test]
    fn test_parse_preserves_requirement_order() {
        let recipe = parse(PLAY);
        let names: Vec<&str> = recipe.requirements().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["fmt", "boost", "folly", "gtest"]);

        let overrides: Vec<bool> = recipe
            .requirements()
            .iter()
            .map(|r| r.is_override())
            .collect();
        assert_eq!(overrides, [true, true, false, false]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(PLAY);
        let second = parse(PLAY);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_defaults_to_standard() {
        let recipe = parse(
            r#"
[recipe]
name = "bare"
"#,
        );
        assert_eq!(recipe.layout(), LayoutPolicy::Standard);
        assert!(recipe.requirements().is_empty());
        assert!(recipe.options().is_empty());
    }

    #[test]
    fn test_unknown_layout_rejected() {
        let result = Recipe::parse(
            r#"
[recipe]
name = "bad"
layout = "flat"
"#,
            Path::new("Recipe.toml"),
        );
        assert!(matches!(result, Err(RecipeError::UnknownLayout { .. })));
    }

    #[test]
    fn test_duplicate_plain_requirement_rejected() {
        let result = Recipe::parse(
            r#"
[recipe]
name = "dup"

[[requirements]]
name = "boost"
version = "^1"

[[requirements]]
name = "boost"
version = "~1.83"
"#,
            Path::new("Recipe.toml"),
        );
        assert!(matches!(
            result,
            Err(RecipeError::DuplicateRequirement { .. })
        ));
    }

    #[test]
    fn test_override_alongside_plain_requirement_allowed() {
        let recipe = parse(
            r#"
[recipe]
name = "pin"

[[requirements]]
name = "folly"

[[requirements]]
ref = "boost/[~1.83]"
override = true

[[requirements]]
name = "boost"
version = "*"
"#,
        );
        assert_eq!(recipe.requirements().len(), 3);
    }

    #[test]
    fn test_invalid_default_rejected() {
        let result = Recipe::parse(
            r#"
[recipe]
name = "bad"

[options.shared]
choices = [true, false]
default = "maybe"
"#,
            Path::new("Recipe.toml"),
        );
        assert!(matches!(result, Err(RecipeError::InvalidDefault { .. })));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result = Recipe::parse(
            r#"
[recipe]
name = "bad"

[profiles.debug]
opt_level = "0"
"#,
            Path::new("Recipe.toml"),
        );
        assert!(matches!(result, Err(RecipeError::Parse(_))));
    }

    #[test]
    fn test_check_option_through_recipe() {
        let recipe = parse(UNO);
        assert!(recipe.check_option("shared", &false.into()).is_ok());
        assert!(recipe.check_option("shared", &"no".into()).is_err());
        assert!(recipe.check_option("static", &true.into()).is_err());
    }

    #[test]
    fn test_bind_layout_through_recipe() {
        let recipe = parse(UNO);
        let layout = recipe.bind_layout(Path::new("/work/uno"), BuildType::Release);
        assert_eq!(
            layout.generators,
            Path::new("/work/uno/build/Release/generators")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = Recipe::load(&tmp.path().join(RECIPE_FILE_NAME));
        assert!(result.is_err());
    }
}
