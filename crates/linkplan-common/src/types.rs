//! Domain primitive types used across the linkplan workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Target operating system family a plan is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    /// Linux distributions.
    Linux,
    /// FreeBSD.
    FreeBsd,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    Macos,
    /// Android.
    Android,
    /// Apple iOS.
    Ios,
}

impl PlatformFamily {
    /// Every known platform family, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Linux,
        Self::FreeBsd,
        Self::Windows,
        Self::Macos,
        Self::Android,
        Self::Ios,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::Windows => "windows",
            Self::Macos => "macos",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformFamily {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "freebsd" => Ok(Self::FreeBsd),
            "windows" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" => Ok(Self::Macos),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(PlanError::Config {
                message: format!("unknown platform family: \"{other}\""),
            }),
        }
    }
}

/// Whether libraries are linked statically or as shared objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Static archives.
    #[default]
    Static,
    /// Shared libraries / DLLs.
    Shared,
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Shared => write!(f, "shared"),
        }
    }
}

impl FromStr for Linkage {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "shared" | "dynamic" => Ok(Self::Shared),
            other => Err(PlanError::Config {
                message: format!("unknown linkage: \"{other}\""),
            }),
        }
    }
}

/// Build type of the produced binaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    /// Optimized build.
    #[default]
    Release,
    /// Unoptimized build with debug runtime.
    Debug,
    /// Optimized build with debug info.
    RelWithDebInfo,
    /// Size-optimized build.
    MinSizeRel,
}

impl BuildType {
    /// Returns `true` only for [`BuildType::Debug`].
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Release => write!(f, "Release"),
            Self::Debug => write!(f, "Debug"),
            Self::RelWithDebInfo => write!(f, "RelWithDebInfo"),
            Self::MinSizeRel => write!(f, "MinSizeRel"),
        }
    }
}

impl FromStr for BuildType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "debug" => Ok(Self::Debug),
            "relwithdebinfo" => Ok(Self::RelWithDebInfo),
            "minsizerel" => Ok(Self::MinSizeRel),
            other => Err(PlanError::Config {
                message: format!("unknown build type: \"{other}\""),
            }),
        }
    }
}
