//! Layout binding - mapping logical build artifacts to directories.
//!
//! A layout policy is an opaque convention name carried by the recipe.
//! Binding a policy to a unit's root directory (supplied by the external
//! tool) yields concrete paths for the build tree and for generator
//! output. One policy ships today: `standard`, the cmake-style
//! per-configuration convention.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::errors::RecipeError;
use crate::core::settings::BuildType;
use crate::util::fs::ensure_dir;

/// The directory convention a recipe unit opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Source at the root, build tree under `build/<BuildType>`,
    /// generator output under `build/<BuildType>/generators`.
    #[default]
    Standard,
}

impl LayoutPolicy {
    /// Bind this policy to a unit root, producing concrete paths.
    ///
    /// The root is taken as given; it is the caller's responsibility
    /// that it exists or can be created.
    pub fn bind(&self, root: &Path, build_type: BuildType) -> Layout {
        match self {
            LayoutPolicy::Standard => {
                let build = root.join("build").join(build_type.as_str());
                let generators = build.join("generators");
                Layout {
                    source: root.to_path_buf(),
                    build,
                    generators,
                }
            }
        }
    }
}

impl FromStr for LayoutPolicy {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(LayoutPolicy::Standard),
            other => Err(RecipeError::UnknownLayout {
                name: other.to_string(),
            }),
        }
    }
}

/// Concrete paths produced by binding a layout policy to a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Where the unit's sources live.
    pub source: PathBuf,

    /// Where build output lands.
    pub build: PathBuf,

    /// Where generator output lands.
    pub generators: PathBuf,
}

impl Layout {
    /// Create the build and generators directories.
    ///
    /// Filesystem errors propagate unmodified apart from path context.
    pub fn ensure_dirs(&self) -> Result<()> {
        ensure_dir(&self.build)?;
        ensure_dir(&self.generators)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_standard_layout_paths() {
        let root = Path::new("/work/uno");
        let layout = LayoutPolicy::Standard.bind(root, BuildType::Release);

        assert_eq!(layout.source, root);
        assert_eq!(layout.build, root.join("build").join("Release"));
        assert_eq!(layout.generators, layout.build.join("generators"));
        assert_ne!(layout.build, layout.generators);
    }

    #[test]
    fn test_layout_varies_with_build_type() {
        let root = Path::new("/work/uno");
        let debug = LayoutPolicy::Standard.bind(root, BuildType::Debug);
        let release = LayoutPolicy::Standard.bind(root, BuildType::Release);
        assert_ne!(debug.build, release.build);
    }

    #[test]
    fn test_ensure_dirs_creates_tree() {
        let tmp = TempDir::new().unwrap();
        let layout = LayoutPolicy::Standard.bind(tmp.path(), BuildType::Debug);

        layout.ensure_dirs().unwrap();
        assert!(layout.build.is_dir());
        assert!(layout.generators.is_dir());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(matches!(
            "flat".parse::<LayoutPolicy>(),
            Err(RecipeError::UnknownLayout { .. })
        ));
    }

    #[test]
    fn test_policy_parse_round_trip() {
        let policy: LayoutPolicy = "standard".parse().unwrap();
        assert_eq!(policy, LayoutPolicy::Standard);
    }
}
