//! External formatter pass.
//!
//! Runs the formatter over every tracked source and header. This has no
//! interaction with the dependency graph: it never marks anything stale or
//! clean, and the exit status mirrors the formatter's own.

use std::process::ExitStatus;

use anyhow::{bail, Result};

use crate::core::Manifest;
use crate::util::fs::glob_files;
use crate::util::process::{find_formatter, ProcessBuilder};

/// Format all tracked files. Returns the formatter's exit status.
pub fn format(manifest: &Manifest) -> Result<ExitStatus> {
    let mut patterns = manifest.sources().to_vec();
    patterns.extend(manifest.headers().iter().cloned());

    let files = glob_files(manifest.root(), &patterns)?;
    if files.is_empty() {
        bail!(
            "no tracked files matched {:?} under {}",
            patterns,
            manifest.root().display()
        );
    }

    let Some(formatter) = find_formatter() else {
        bail!("no formatter found (set SLIPWAY_FORMAT or install clang-format)");
    };

    tracing::info!("formatting {} file(s)", files.len());

    let mut cmd = ProcessBuilder::new(&formatter).arg("-i");
    for file in &files {
        cmd = cmd.arg(file);
    }

    let status = cmd.status()?;
    Ok(status)
}
