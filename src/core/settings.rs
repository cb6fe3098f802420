//! Build setting axes.
//!
//! Settings are the environment-driven axes of a build (operating system,
//! compiler, build type, architecture). A recipe only names the axes it
//! consumes; the concrete values arrive from the invoking tool at
//! configuration time and are never stored in the descriptor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An axis whose value is supplied externally at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingAxis {
    Os,
    Compiler,
    BuildType,
    Arch,
}

impl SettingAxis {
    /// All recognized axes, in conventional declaration order.
    pub const ALL: [SettingAxis; 4] = [
        SettingAxis::Os,
        SettingAxis::Compiler,
        SettingAxis::BuildType,
        SettingAxis::Arch,
    ];

    /// The descriptor spelling of this axis.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingAxis::Os => "os",
            SettingAxis::Compiler => "compiler",
            SettingAxis::BuildType => "build_type",
            SettingAxis::Arch => "arch",
        }
    }
}

impl fmt::Display for SettingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "os" => Ok(SettingAxis::Os),
            "compiler" => Ok(SettingAxis::Compiler),
            "build_type" => Ok(SettingAxis::BuildType),
            "arch" => Ok(SettingAxis::Arch),
            other => Err(format!("unknown setting axis `{other}`")),
        }
    }
}

/// The externally supplied build type.
///
/// The layout binder uses this to compute per-configuration build
/// directories (`build/Release`, `build/Debug`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// The conventional directory/flag spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
