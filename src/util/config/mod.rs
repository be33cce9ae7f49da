//! Quadrate configuration system
//!
//! Project-level configuration with merge semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Project-level (quadrate.toml)
//! 3. Default values
//! ```
//!
//! Module search roots are not part of the file; they come from
//! `QUADRATE_ROOT` (see [`crate::frontend::module::Resolver::from_env`]).
//!
//! # Usage
//!
//! ```rust
//! use quadrate::util::config::Config;
//!
//! let config: Config = toml::from_str("[runtime]\nstack_depth = 4096\n").unwrap();
//! assert_eq!(config.runtime.stack_depth, 4096);
//! assert_eq!(config.compiler.cc, "cc");
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default project configuration file name
pub const CONFIG_FILE: &str = "quadrate.toml";

/// Complete compiler configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Compiler driver settings
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Generated runtime settings
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Link settings
    #[serde(default)]
    pub link: LinkConfig,
}

/// Compiler driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompilerConfig {
    /// Native C compiler/linker executable
    #[serde(default = "default_cc")]
    pub cc: String,
    /// Output executable path
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Directory receiving generated C sources
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Keep generated C sources after compilation
    #[serde(default)]
    pub save_temps: bool,
}

fn default_cc() -> String {
    "cc".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("a.out")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".qd_gen")
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            cc: default_cc(),
            output: default_output(),
            output_dir: default_output_dir(),
            save_temps: false,
        }
    }
}

/// Runtime configuration, passed to the toolchain as macros
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    /// Number of cells on the value stack (`QD_STACK_DEPTH`)
    #[serde(default = "default_stack_depth")]
    pub stack_depth: usize,
    /// Number of entries on the mark stack (`QD_MARK_STACK_DEPTH`)
    #[serde(default = "default_mark_stack_depth")]
    pub mark_stack_depth: usize,
    /// C type of a stack cell (`__qd_real_t`)
    #[serde(default = "default_real_type")]
    pub real_type: String,
    /// Maximum string length handled by string primitives (`QD_STRING_LENGTH`)
    #[serde(default = "default_string_length")]
    pub string_length: usize,
}

fn default_stack_depth() -> usize {
    1024
}

fn default_mark_stack_depth() -> usize {
    64
}

fn default_real_type() -> String {
    "double".to_string()
}

fn default_string_length() -> usize {
    1024
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_depth: default_stack_depth(),
            mark_stack_depth: default_mark_stack_depth(),
            real_type: default_real_type(),
            string_length: default_string_length(),
        }
    }
}

/// Link configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LinkConfig {
    /// Libraries passed as `-l<name>`
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Library search paths passed as `-L<path>`
    #[serde(default)]
    pub library_paths: Vec<PathBuf>,
}

impl Config {
    /// Load project configuration from `path`
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load `quadrate.toml` from the current directory, if present
    pub fn discover() -> Result<Config, ConfigError> {
        Self::load_or_default(Path::new(CONFIG_FILE))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
