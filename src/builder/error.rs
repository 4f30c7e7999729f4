//! Build error taxonomy.
//!
//! Each category maps to a distinct process exit code so callers can tell
//! a configuration problem from a failed compile or link.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Unrecognized build variant name.
    #[error("unknown build variant `{0}` (expected `debug` or `release`)")]
    UnknownVariant(String),

    /// Unrecognized LTO toggle value.
    #[error("unknown lto setting `{0}` (expected `on` or `off`)")]
    UnknownLto(String),

    /// No usable compiler on this system.
    #[error("no C compiler found (set CC or install cc/gcc/clang)")]
    CompilerNotFound,

    /// The external compiler exited non-zero. Captured stderr is surfaced
    /// verbatim.
    #[error("compilation failed for {unit}\n{stderr}")]
    Compile { unit: PathBuf, stderr: String },

    /// The external linker exited non-zero.
    #[error("linking failed for {output}\n{stderr}")]
    Link { output: PathBuf, stderr: String },

    /// Artifact creation or deletion failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Process exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::UnknownVariant(_)
            | BuildError::UnknownLto(_)
            | BuildError::CompilerNotFound => 2,
            BuildError::Compile { .. } => 3,
            BuildError::Link { .. } => 4,
            BuildError::Io { .. } => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let config = BuildError::UnknownVariant("fast".into());
        let compile = BuildError::Compile {
            unit: PathBuf::from("a.c"),
            stderr: String::new(),
        };
        let link = BuildError::Link {
            output: PathBuf::from("app"),
            stderr: String::new(),
        };
        let io = BuildError::Io {
            path: PathBuf::from("build"),
            source: std::io::Error::other("denied"),
        };

        let codes = [
            config.exit_code(),
            compile.exit_code(),
            link.exit_code(),
            io.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_compile_error_surfaces_stderr() {
        let err = BuildError::Compile {
            unit: PathBuf::from("src/main.c"),
            stderr: "main.c:3: error: expected ';'".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("src/main.c"));
        assert!(msg.contains("expected ';'"));
    }
}
