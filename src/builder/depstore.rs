//! Persisted per-unit header dependency records.
//!
//! After every successful compile the executor overwrites the unit's record
//! with the header set the compiler reported. A record that is missing,
//! unreadable, or corrupt is treated as absent, which forces a recompile on
//! the next run rather than failing the build.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::CompilationUnit;
use crate::util::fs::ensure_dir;

/// Header set a unit transitively included during its last compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepRecord {
    /// Source file the record belongs to
    pub source: PathBuf,

    /// Headers observed by the last successful compile, in discovery order
    pub headers: Vec<PathBuf>,
}

/// Dependency record store, one JSON file per unit.
#[derive(Debug, Clone)]
pub struct DepStore {
    deps_dir: PathBuf,
}

impl DepStore {
    /// Create a store rooted at the variant's deps directory.
    pub fn new(deps_dir: impl Into<PathBuf>) -> Self {
        DepStore {
            deps_dir: deps_dir.into(),
        }
    }

    /// Load the record for a unit, or `None` if never compiled.
    ///
    /// Corruption is recovered locally: the unit will simply be rebuilt.
    pub fn load(&self, unit: &CompilationUnit) -> Option<DepRecord> {
        let content = std::fs::read_to_string(&unit.record).ok()?;

        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "discarding corrupt dependency record {}: {}",
                    unit.record.display(),
                    e
                );
                None
            }
        }
    }

    /// Durably persist the record for a unit, overwriting any prior one.
    pub fn save(&self, unit: &CompilationUnit, record: &DepRecord) -> Result<()> {
        ensure_dir(&self.deps_dir)?;
        let content = serde_json::to_string_pretty(record)?;
        std::fs::write(&unit.record, content)?;
        Ok(())
    }
}
