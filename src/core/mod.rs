//! Core project model: manifest and compilation units.

pub mod manifest;
pub mod unit;

pub use manifest::Manifest;
pub use unit::CompilationUnit;
