//! Housekeeping reset.
//!
//! Deletes every generated artifact (objects, dependency records, the
//! target executable) regardless of staleness bookkeeping.

use std::path::PathBuf;

use crate::builder::BuildError;
use crate::core::Manifest;
use crate::util::fs::remove_dir_all_if_exists;

/// Remove the whole generated tree. Returns the removed directory.
pub fn clean(manifest: &Manifest) -> Result<PathBuf, BuildError> {
    let build_dir = manifest.build_dir();
    let existed = build_dir.exists();

    remove_dir_all_if_exists(&build_dir).map_err(|e| BuildError::Io {
        path: build_dir.clone(),
        source: std::io::Error::other(e),
    })?;

    if existed {
        tracing::info!("removed {}", build_dir.display());
    }

    Ok(build_dir)
}
