//! High-level operations behind the CLI commands.

pub mod build;
pub mod clean;
pub mod format;

pub use build::{build, BuildOptions, BuildReport};
pub use clean::clean;
pub use format::format;
