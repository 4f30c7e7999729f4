//! Slipway - a minimal incremental build orchestrator for C
//!
//! This crate builds exactly one native executable from a fixed set of C
//! compilation units, recompiling only what is stale relative to its last
//! build: sources, discovered header dependencies, and the selected build
//! variant all feed the staleness decision.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::builder::{ActionPlan, BuildError, BuildVariant, DepStore, Executor, Toolchain};
pub use crate::core::{CompilationUnit, Manifest};
