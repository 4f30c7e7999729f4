//! The dependency-driven rebuild engine.
//!
//! Flag resolution, the dependency store, staleness evaluation, action
//! planning, and plan execution against the external toolchain.

pub mod depfile;
pub mod depstore;
pub mod error;
pub mod executor;
pub mod flags;
pub mod plan;
pub mod stale;
pub mod toolchain;

pub use depstore::{DepRecord, DepStore};
pub use error::BuildError;
pub use executor::{BuildOutcome, Executor};
pub use flags::{resolve_flags, BuildVariant, FlagSet};
pub use plan::ActionPlan;
pub use toolchain::Toolchain;
