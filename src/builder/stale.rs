//! Staleness evaluation.
//!
//! A unit is stale when its object artifact cannot be proven newer than
//! every input that produced it. The test is conservative: it may rebuild a
//! unit whose header changed trivially, but it never misses a required
//! rebuild.

use crate::builder::depstore::{DepRecord, DepStore};
use crate::core::CompilationUnit;
use crate::util::fs::mtime;

/// Decide whether a single unit must be recompiled.
///
/// Stale when: the object is missing, no dependency record exists, the
/// source is newer than the object, or any recorded header is newer than
/// the object. A recorded header that no longer exists also counts as
/// stale.
pub fn is_stale(unit: &CompilationUnit, record: Option<&DepRecord>) -> bool {
    let Some(obj_time) = mtime(&unit.object) else {
        return true;
    };

    let Some(record) = record else {
        return true;
    };

    match mtime(&unit.source) {
        Some(src_time) if src_time <= obj_time => {}
        _ => return true,
    }

    for header in &record.headers {
        match mtime(header) {
            Some(h_time) if h_time <= obj_time => {}
            _ => return true,
        }
    }

    false
}

/// Partition the source set into the stale subset.
///
/// Each unit is evaluated independently; a shared header marks every
/// dependent unit stale on its own.
pub fn stale_units<'a>(units: &'a [CompilationUnit], store: &DepStore) -> Vec<&'a CompilationUnit> {
    units
        .iter()
        .filter(|unit| {
            let record = store.load(unit);
            let stale = is_stale(unit, record.as_ref());
            if stale {
                tracing::debug!("stale: {}", unit.source.display());
            }
            stale
        })
        .collect()
}
