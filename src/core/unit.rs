//! Compilation units and their derived artifact paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::hash::short_hash;

/// One source file and the artifact paths derived from it.
///
/// Units are created once at configuration time and never mutated. The
/// derived file names combine the source stem with a short hash of the full
/// source path, so `src/a/util.c` and `src/b/util.c` never collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Source file path
    pub source: PathBuf,

    /// Object artifact path
    pub object: PathBuf,

    /// Persisted dependency record path
    pub record: PathBuf,
}

impl CompilationUnit {
    /// Derive a unit from a source path and the variant's layout directories.
    pub fn new(source: &Path, obj_dir: &Path, deps_dir: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unit".to_string());
        let key = format!("{}-{}", stem, short_hash(&source.to_string_lossy()));

        CompilationUnit {
            source: source.to_path_buf(),
            object: obj_dir.join(format!("{}.o", key)),
            record: deps_dir.join(format!("{}.json", key)),
        }
    }

    /// Path of the transient depfile the compiler emits next to the object.
    pub fn depfile(&self) -> PathBuf {
        self.object.with_extension("d")
    }
}

/// Derive units for a fixed source set.
pub fn units_for_sources(
    sources: &[PathBuf],
    obj_dir: &Path,
    deps_dir: &Path,
) -> Vec<CompilationUnit> {
    sources
        .iter()
        .map(|s| CompilationUnit::new(s, obj_dir, deps_dir))
        .collect()
}
