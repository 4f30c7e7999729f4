//! `slipway format` command

use anyhow::Result;

use crate::cli::FormatArgs;
use slipway::ops::format;
use slipway::Manifest;

pub fn execute(_args: FormatArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = Manifest::discover(&cwd)?;

    let status = format(&manifest)?;

    // Mirror the formatter's own exit status.
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
