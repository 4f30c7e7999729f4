//! Compiler discovery and command synthesis.
//!
//! The toolchain turns planned actions into concrete argument vectors. The
//! same driver binary is used for compiling and linking, gcc-style.

use std::path::{Path, PathBuf};

use crate::builder::error::BuildError;
use crate::builder::flags::FlagSet;
use crate::builder::plan::LinkAction;
use crate::core::CompilationUnit;
use crate::util::process::{find_c_compiler, ProcessBuilder};

/// A program plus its arguments, ready to execute.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandSpec {
    fn new(program: impl AsRef<Path>) -> Self {
        CommandSpec {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Convert into a runnable process builder.
    pub fn into_process(self) -> ProcessBuilder {
        ProcessBuilder::new(&self.program).args(self.args)
    }
}

/// gcc/clang-style toolchain driver.
#[derive(Debug, Clone)]
pub struct Toolchain {
    cc: PathBuf,
}

impl Toolchain {
    /// Detect the compiler from `CC` or PATH.
    pub fn detect() -> Result<Self, BuildError> {
        let cc = find_c_compiler().ok_or(BuildError::CompilerNotFound)?;
        tracing::debug!("using compiler {}", cc.display());
        Ok(Toolchain { cc })
    }

    /// Build a toolchain around an explicit compiler path.
    pub fn new(cc: impl Into<PathBuf>) -> Self {
        Toolchain { cc: cc.into() }
    }

    /// Compiler driver path.
    pub fn compiler(&self) -> &Path {
        &self.cc
    }

    /// Command for one compile action.
    ///
    /// Asks the compiler to emit the object and a machine-readable depfile
    /// (`-MMD -MF`) in the same run, so the dependency record can be
    /// regenerated from what the compiler actually included.
    pub fn compile_command(&self, unit: &CompilationUnit, flags: &FlagSet) -> CommandSpec {
        CommandSpec::new(&self.cc)
            .arg("-c")
            .args(flags.cflags.iter().cloned())
            .arg("-MMD")
            .arg("-MF")
            .arg(unit.depfile().display().to_string())
            .arg(unit.source.display().to_string())
            .arg("-o")
            .arg(unit.object.display().to_string())
    }

    /// Command for the link action.
    pub fn link_command(
        &self,
        action: &LinkAction,
        flags: &FlagSet,
        ldlibs: &[String],
    ) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.cc);

        for obj in &action.objects {
            cmd = cmd.arg(obj.display().to_string());
        }

        cmd = cmd
            .arg("-o")
            .arg(action.output.display().to_string())
            .args(flags.ldflags.iter().cloned());

        for lib in ldlibs {
            cmd = cmd.arg(format!("-l{}", lib));
        }

        cmd
    }
}
