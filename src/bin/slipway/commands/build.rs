//! `slipway build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use slipway::builder::flags::parse_lto;
use slipway::ops::{build, BuildOptions};
use slipway::{BuildVariant, Manifest};

pub fn execute(args: BuildArgs, verbose: bool) -> Result<()> {
    // Config errors fail fast, before any action runs.
    let variant: BuildVariant = args.variant.parse()?;
    let lto = parse_lto(&args.lto)?;

    let cwd = std::env::current_dir()?;
    let manifest = Manifest::discover(&cwd)?;

    let opts = BuildOptions {
        variant,
        lto,
        jobs: args.jobs,
        emit_plan: args.plan,
        verbose,
    };

    let report = build(&manifest, &opts)?;

    if !args.plan {
        if report.outcome.compiled == 0 && !report.outcome.linked {
            eprintln!("    Up to date ({} unit(s))", report.fresh);
        } else {
            eprintln!(
                "    Finished {} ({} compiled, {} fresh) -> {}",
                variant,
                report.outcome.compiled,
                report.fresh,
                report.target.display()
            );
        }
    }

    Ok(())
}
