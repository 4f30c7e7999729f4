//! Action plan generation.
//!
//! An ActionPlan is the ordered work for one invocation: one compile action
//! per stale unit, then at most one link action. It is constructed fresh
//! every run and never persisted, but serializes to JSON for `--plan`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::CompilationUnit;

/// Compile one stale unit to its object artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileAction {
    pub unit: CompilationUnit,
}

/// Link the full object set into the target executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAction {
    /// Every unit's object, stale or not, in source order
    pub objects: Vec<PathBuf>,

    /// Target executable path
    pub output: PathBuf,
}

/// Ordered work for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub compiles: Vec<CompileAction>,
    pub link: Option<LinkAction>,
}

impl ActionPlan {
    /// Plan the invocation's actions.
    ///
    /// Compiles are mutually independent, so source order is as good as any.
    /// The link is appended only after all compiles are planned, references
    /// the full object set, and is present iff at least one object will be
    /// (re)produced or the target is missing.
    pub fn new(units: &[CompilationUnit], stale: &[&CompilationUnit], target: &Path) -> Self {
        let compiles: Vec<CompileAction> = stale
            .iter()
            .map(|unit| CompileAction {
                unit: (*unit).clone(),
            })
            .collect();

        let link = if !compiles.is_empty() || !target.exists() {
            Some(LinkAction {
                objects: units.iter().map(|u| u.object.clone()).collect(),
                output: target.to_path_buf(),
            })
        } else {
            None
        };

        ActionPlan { compiles, link }
    }

    /// True when there is nothing to do (no-op build).
    pub fn is_empty(&self) -> bool {
        self.compiles.is_empty() && self.link.is_none()
    }

    /// Number of planned compile actions.
    pub fn compile_count(&self) -> usize {
        self.compiles.len()
    }

    /// Total planned actions.
    pub fn action_count(&self) -> usize {
        self.compiles.len() + usize::from(self.link.is_some())
    }
}
