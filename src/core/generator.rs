//! Output-artifact generator selection.
//!
//! Generators are components of the external tool that emit build-system
//! input files once resolution has finished. A recipe only names which
//! ones to invoke; unknown names are a load error rather than a silent
//! no-op.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A generator the external tool must invoke for this recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Generator {
    /// Emits the toolchain definition file consumed by the build system.
    CMakeToolchain,

    /// Emits per-dependency resolution files (find-package manifests).
    CMakeDeps,
}

impl Generator {
    /// The descriptor spelling of this generator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Generator::CMakeToolchain => "CMakeToolchain",
            Generator::CMakeDeps => "CMakeDeps",
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
