//! Build variants and effective flag resolution.
//!
//! A variant plus the LTO toggle deterministically selects one compile flag
//! list and one link flag list. Resolution is pure; unrecognized values are
//! rejected at parse time, before any action runs.

use std::fmt;
use std::str::FromStr;

use crate::builder::error::BuildError;

/// Named build variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    Debug,
    Release,
}

impl BuildVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Release => "release",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildVariant {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildVariant::Debug),
            "release" => Ok(BuildVariant::Release),
            other => Err(BuildError::UnknownVariant(other.to_string())),
        }
    }
}

/// Parse the `--lto` toggle.
pub fn parse_lto(s: &str) -> Result<bool, BuildError> {
    match s {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(BuildError::UnknownLto(other.to_string())),
    }
}

/// Immutable compile and link flag lists for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    pub cflags: Vec<String>,
    pub ldflags: Vec<String>,
}

/// Resolve the effective flag set for a variant.
///
/// Composition: common base (warnings as errors, fp relaxation), then
/// variant-specific flags, then cross-cutting toggles appended to both
/// lists. The toolchain expects `-flto` symmetrically at compile and link.
pub fn resolve_flags(variant: BuildVariant, lto: bool) -> FlagSet {
    let mut cflags = vec![
        "-Wall".to_string(),
        "-Werror".to_string(),
        "-ffast-math".to_string(),
    ];
    let mut ldflags = Vec::new();

    match variant {
        BuildVariant::Debug => {
            cflags.push("-O0".to_string());
            cflags.push("-g".to_string());
        }
        BuildVariant::Release => {
            cflags.push("-O3".to_string());
            cflags.push("-DNDEBUG".to_string());
        }
    }

    if lto {
        cflags.push("-flto".to_string());
        ldflags.push("-flto".to_string());
    }

    FlagSet { cflags, ldflags }
}
