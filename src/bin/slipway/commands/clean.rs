//! `slipway clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use slipway::ops::clean;
use slipway::Manifest;

pub fn execute(_args: CleanArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = Manifest::discover(&cwd)?;

    let removed = clean(&manifest)?;
    eprintln!("     Removed {}", removed.display());

    Ok(())
}
