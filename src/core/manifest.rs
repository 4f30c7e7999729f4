//! Slipway.toml parsing and discovery.
//!
//! A manifest names the single executable target and the glob patterns for
//! its compilation units and tracked headers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "Slipway.toml";

/// Parsed project manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Target executable name
    name: String,

    /// Glob patterns for compilation units, relative to the project root
    sources: Vec<String>,

    /// Glob patterns for tracked headers (formatting only)
    headers: Vec<String>,

    /// Libraries passed to the linker as `-l<name>`
    ldlibs: Vec<String>,

    /// Project root (directory containing the manifest)
    root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    package: RawPackage,

    #[serde(default)]
    build: RawBuild,
}

#[derive(Debug, Deserialize)]
struct RawPackage {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawBuild {
    #[serde(default)]
    sources: Vec<String>,

    #[serde(default)]
    headers: Vec<String>,

    #[serde(default)]
    ldlibs: Vec<String>,
}

impl Manifest {
    /// Load a manifest from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        let raw: RawManifest = toml::from_str(&content)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))?;

        if raw.package.name.is_empty() {
            bail!("manifest {} has an empty package name", path.display());
        }

        let root = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let sources = if raw.build.sources.is_empty() {
            vec!["src/**/*.c".to_string()]
        } else {
            raw.build.sources
        };

        let headers = if raw.build.headers.is_empty() {
            vec!["src/**/*.h".to_string(), "include/**/*.h".to_string()]
        } else {
            raw.build.headers
        };

        Ok(Manifest {
            name: raw.package.name,
            sources,
            headers,
            ldlibs: raw.build.ldlibs,
            root,
        })
    }

    /// Find the manifest by walking up from `start`, then load it.
    pub fn discover(start: &Path) -> Result<Self> {
        let mut dir = Some(start);
        while let Some(d) = dir {
            let candidate = d.join(MANIFEST_NAME);
            if candidate.exists() {
                return Self::load(&candidate);
            }
            dir = d.parent();
        }

        bail!(
            "could not find {} in {} or any parent directory",
            MANIFEST_NAME,
            start.display()
        )
    }

    /// Target executable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source glob patterns.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Header glob patterns.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Linker libraries.
    pub fn ldlibs(&self) -> &[String] {
        &self.ldlibs
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Root of the generated artifact tree.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }
}
