//! Plan execution.
//!
//! Compile actions are dispatched to a rayon worker pool; the link action
//! is a join barrier that only runs after every compile has succeeded. A
//! unit's dependency record is rewritten from the compiler-emitted depfile
//! before the unit counts as built, so a crash between compile and record
//! write leaves the unit stale on the next run, never the reverse.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::builder::depfile::parse_depfile;
use crate::builder::depstore::{DepRecord, DepStore};
use crate::builder::error::BuildError;
use crate::builder::flags::FlagSet;
use crate::builder::plan::{ActionPlan, CompileAction, LinkAction};
use crate::builder::toolchain::Toolchain;

/// What an execution produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Units actually recompiled
    pub compiled: usize,

    /// Whether the link action ran
    pub linked: bool,
}

/// Executes an ActionPlan against the external toolchain.
pub struct Executor<'a> {
    toolchain: &'a Toolchain,
    flags: &'a FlagSet,
    store: &'a DepStore,
    ldlibs: &'a [String],
    jobs: Option<usize>,
    verbose: bool,
}

impl<'a> Executor<'a> {
    pub fn new(
        toolchain: &'a Toolchain,
        flags: &'a FlagSet,
        store: &'a DepStore,
        ldlibs: &'a [String],
    ) -> Self {
        Executor {
            toolchain,
            flags,
            store,
            ldlibs,
            jobs: None,
            verbose: false,
        }
    }

    /// Size the worker pool explicitly instead of using available parallelism.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the plan to completion or first failure.
    pub fn execute(&self, plan: &ActionPlan) -> Result<BuildOutcome, BuildError> {
        if let Some(j) = self.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(j)
                .build_global()
                .ok(); // Ignore if already set
        }

        let total = plan.action_count();
        let pb = if !self.verbose && total > 1 {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        // Fail-fast: a failed compile lets in-flight siblings finish but
        // stops not-yet-started ones and cancels the link.
        let aborted = AtomicBool::new(false);

        let results: Vec<Result<bool, BuildError>> = plan
            .compiles
            .par_iter()
            .map(|action| {
                if aborted.load(Ordering::SeqCst) {
                    return Ok(false);
                }

                match self.compile(action) {
                    Ok(()) => {
                        if let Some(ref pb) = pb {
                            pb.inc(1);
                        }
                        Ok(true)
                    }
                    Err(e) => {
                        aborted.store(true, Ordering::SeqCst);
                        Err(e)
                    }
                }
            })
            .collect();

        let mut compiled = 0;
        for result in results {
            if result? {
                compiled += 1;
            }
        }

        let mut linked = false;
        if let Some(ref link) = plan.link {
            self.link(link)?;
            linked = true;
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        Ok(BuildOutcome { compiled, linked })
    }

    /// Compile one unit and regenerate its dependency record.
    fn compile(&self, action: &CompileAction) -> Result<(), BuildError> {
        let unit = &action.unit;

        if let Some(parent) = unit.object.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let cmd = self.toolchain.compile_command(unit, self.flags).into_process();
        tracing::debug!("running {}", cmd.display_command());

        let output = cmd.exec().map_err(|e| BuildError::Io {
            path: self.toolchain.compiler().to_path_buf(),
            source: std::io::Error::other(e),
        })?;

        if !output.status.success() {
            return Err(BuildError::Compile {
                unit: unit.source.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if self.verbose && !output.stderr.is_empty() {
            tracing::warn!(
                "{}: {}",
                unit.source.display(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        // Record the discovered header set before the unit counts as built.
        // If the depfile is unreadable the old record must go too: the
        // freshly written object would otherwise pass the staleness test
        // against a header set that no longer describes this compile.
        match std::fs::read_to_string(unit.depfile()) {
            Ok(content) => {
                let record = DepRecord {
                    source: unit.source.clone(),
                    headers: parse_depfile(&content, &unit.source),
                };
                self.store.save(unit, &record).map_err(|e| BuildError::Io {
                    path: unit.record.clone(),
                    source: std::io::Error::other(e),
                })?;
            }
            Err(e) => {
                tracing::warn!(
                    "no dependency listing for {} ({}); unit stays stale",
                    unit.source.display(),
                    e
                );
                if let Err(e) = std::fs::remove_file(&unit.record) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        return Err(BuildError::Io {
                            path: unit.record.clone(),
                            source: e,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Link the full object set into the target executable.
    fn link(&self, action: &LinkAction) -> Result<(), BuildError> {
        if let Some(parent) = action.output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BuildError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let cmd = self
            .toolchain
            .link_command(action, self.flags, self.ldlibs)
            .into_process();
        tracing::debug!("running {}", cmd.display_command());

        let output = cmd.exec().map_err(|e| BuildError::Io {
            path: self.toolchain.compiler().to_path_buf(),
            source: std::io::Error::other(e),
        })?;

        if !output.status.success() {
            return Err(BuildError::Link {
                output: action.output.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(())
    }
}
