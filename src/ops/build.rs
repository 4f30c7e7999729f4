//! The full incremental build pipeline.
//!
//! Wires the components together: manifest → units → flag resolution →
//! staleness → plan → execution. Each invocation starts from the
//! filesystem alone; nothing is carried in memory between runs.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::executor::{BuildOutcome, Executor};
use crate::builder::flags::{resolve_flags, BuildVariant};
use crate::builder::plan::ActionPlan;
use crate::builder::stale::stale_units;
use crate::builder::{DepStore, Toolchain};
use crate::core::unit::units_for_sources;
use crate::core::Manifest;
use crate::util::fs::glob_files;

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Selected build variant
    pub variant: BuildVariant,

    /// Link-time optimization toggle
    pub lto: bool,

    /// Worker pool size (None = available parallelism)
    pub jobs: Option<usize>,

    /// Print the plan as JSON instead of executing it
    pub emit_plan: bool,

    /// Verbose output
    pub verbose: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            variant: BuildVariant::Debug,
            lto: false,
            jobs: None,
            emit_plan: false,
            verbose: false,
        }
    }
}

/// What a build invocation did.
#[derive(Debug)]
pub struct BuildReport {
    /// Execution outcome (zeroed when only the plan was emitted)
    pub outcome: BuildOutcome,

    /// Target executable path
    pub target: PathBuf,

    /// Number of units that were up to date
    pub fresh: usize,
}

/// Run the incremental pipeline for one invocation.
pub fn build(manifest: &Manifest, opts: &BuildOptions) -> Result<BuildReport> {
    let sources = glob_files(manifest.root(), manifest.sources())?;
    if sources.is_empty() {
        bail!(
            "no source files matched {:?} under {}",
            manifest.sources(),
            manifest.root().display()
        );
    }

    let variant_dir = manifest.build_dir().join(opts.variant.as_str());
    let obj_dir = variant_dir.join("obj");
    let deps_dir = variant_dir.join("deps");
    let target = variant_dir.join(manifest.name());

    let units = units_for_sources(&sources, &obj_dir, &deps_dir);
    let store = DepStore::new(&deps_dir);
    let flags = resolve_flags(opts.variant, opts.lto);

    let stale = stale_units(&units, &store);
    tracing::info!(
        "{} of {} unit(s) stale ({} variant)",
        stale.len(),
        units.len(),
        opts.variant
    );

    let plan = ActionPlan::new(&units, &stale, &target);

    if opts.emit_plan {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(BuildReport {
            outcome: BuildOutcome {
                compiled: 0,
                linked: false,
            },
            target,
            fresh: units.len() - stale.len(),
        });
    }

    let fresh = units.len() - stale.len();

    if plan.is_empty() {
        return Ok(BuildReport {
            outcome: BuildOutcome {
                compiled: 0,
                linked: false,
            },
            target,
            fresh,
        });
    }

    let toolchain = Toolchain::detect()?;
    let outcome = Executor::new(&toolchain, &flags, &store, manifest.ldlibs())
        .jobs(opts.jobs)
        .verbose(opts.verbose)
        .execute(&plan)?;

    Ok(BuildReport {
        outcome,
        target,
        fresh,
    })
}
