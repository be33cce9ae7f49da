//! 外部 C 工具链
//!
//! Builds and runs the native compiler command:
//!
//! ```text
//! cc -o <output> -I <dir> <sources...> -lm -DQD_STACK_DEPTH=n -DQD_MARK_STACK_DEPTH=n
//!    -D__qd_real_t=<type> -DQD_STRING_LENGTH=n [-L <path>]* [-l <lib>]*
//! ```

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::util::config::{Config, LinkConfig, RuntimeConfig};

/// 工具链错误
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("cannot run '{cc}': {source}")]
    Spawn {
        cc: String,
        #[source]
        source: io::Error,
    },

    /// Compiler output, verbatim
    #[error("{stderr}")]
    Failed { status: Option<i32>, stderr: String },
}

/// Native compiler invocation
#[derive(Debug, Clone)]
pub struct Toolchain {
    cc: String,
    runtime: RuntimeConfig,
    link: LinkConfig,
}

impl Toolchain {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cc: config.compiler.cc.clone(),
            runtime: config.runtime.clone(),
            link: config.link.clone(),
        }
    }

    pub fn cc(&self) -> &str {
        &self.cc
    }

    /// Arguments after the program name
    pub fn args(
        &self,
        include_dir: &Path,
        sources: &[PathBuf],
        output: &Path,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-o".into(),
            output.into(),
            "-I".into(),
            include_dir.into(),
        ];
        args.extend(sources.iter().map(OsString::from));
        args.push("-lm".into());

        args.push(format!("-DQD_STACK_DEPTH={}", self.runtime.stack_depth).into());
        args.push(format!("-DQD_MARK_STACK_DEPTH={}", self.runtime.mark_stack_depth).into());
        args.push(format!("-D__qd_real_t={}", self.runtime.real_type).into());
        args.push(format!("-DQD_STRING_LENGTH={}", self.runtime.string_length).into());

        for path in &self.link.library_paths {
            args.push("-L".into());
            args.push(path.into());
        }
        for library in &self.link.libraries {
            args.push("-l".into());
            args.push(library.into());
        }
        args
    }

    pub fn command(
        &self,
        include_dir: &Path,
        sources: &[PathBuf],
        output: &Path,
    ) -> Command {
        let mut command = Command::new(&self.cc);
        command.args(self.args(include_dir, sources, output));
        command
    }

    /// Compile and link `sources` into `output`
    pub fn link(
        &self,
        include_dir: &Path,
        sources: &[PathBuf],
        output: &Path,
    ) -> Result<(), ToolchainError> {
        let mut command = self.command(include_dir, sources, output);
        tracing::debug!("running {:?}", command);

        let result = command.output().map_err(|source| ToolchainError::Spawn {
            cc: self.cc.clone(),
            source,
        })?;

        if result.status.success() {
            Ok(())
        } else {
            Err(ToolchainError::Failed {
                status: result.status.code(),
                stderr: String::from_utf8_lossy(&result.stderr).trim_end().to_string(),
            })
        }
    }
}
