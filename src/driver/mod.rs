//! 编译驱动
//!
//! Runs the whole pipeline:
//!
//! 1. lex and parse every seed file and, transitively, every module it
//!    imports (a FIFO worklist keyed by canonical path);
//! 2. analyze all units together;
//! 3. generate one header/source pair per unit into the output directory,
//!    next to the runtime pair;
//! 4. hand every generated `.c` file to the native toolchain.

pub mod toolchain;

pub use toolchain::{Toolchain, ToolchainError};

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use walkdir::WalkDir;

use crate::frontend::module::Resolver;
use crate::frontend::semantic::analyze;
use crate::frontend::{SemanticError, SyntaxError, TranslationUnit};
use crate::middle::codegen::{
    CGenerator, CodegenError, GeneratedUnit, RUNTIME_HEADER, RUNTIME_HEADER_NAME, RUNTIME_SOURCE,
    RUNTIME_SOURCE_NAME,
};
use crate::util::config::Config;
use crate::util::diagnostic::Diagnostic;

/// 编译错误
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error("{path}: {source}")]
    Codegen {
        path: String,
        #[source]
        source: CodegenError,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    fn io(
        path: &Path,
        source: io::Error,
    ) -> Self {
        CompileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Diagnostic for rendering; located for syntax and semantic errors
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Syntax(err) => Diagnostic::from(err),
            CompileError::Semantic(err) => Diagnostic::from(err),
            other => Diagnostic::bare(other.to_string()),
        }
    }
}

/// Pending worklist entry
#[derive(Debug)]
struct WorkItem {
    path: PathBuf,
    /// Import name; `None` for seeds
    module_name: Option<String>,
}

/// 编译器
pub struct Compiler {
    config: Config,
    resolver: Resolver,
}

impl Compiler {
    pub fn new(
        config: Config,
        resolver: Resolver,
    ) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lex and parse `seeds` and everything they import
    ///
    /// Units come back in discovery order: seeds first, then imports
    /// breadth-first. Each file is compiled once, however often imported.
    pub fn compile(
        &mut self,
        seeds: &[PathBuf],
    ) -> Result<Vec<TranslationUnit>, CompileError> {
        let started = Instant::now();
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();

        for seed in seeds {
            let path = fs::canonicalize(seed).map_err(|err| CompileError::io(seed, err))?;
            if seen.insert(path.clone()) {
                queue.push_back(WorkItem {
                    path,
                    module_name: None,
                });
            }
        }

        let mut units = Vec::new();
        while let Some(item) = queue.pop_front() {
            let source = fs::read(&item.path).map_err(|err| CompileError::io(&item.path, err))?;
            let mut unit = TranslationUnit::new(item.path, item.module_name);
            let submodules = unit.compile(&source, &mut self.resolver)?;
            tracing::debug!(
                "compiled {} ({} imports)",
                unit.path().display(),
                submodules.len()
            );

            let imports = unit.module.iter().flat_map(|m| m.imports.iter());
            for import in imports {
                if seen.insert(import.path.clone()) {
                    queue.push_back(WorkItem {
                        path: import.path.clone(),
                        module_name: Some(import.name.clone()),
                    });
                }
            }
            units.push(unit);
        }

        tracing::debug!(
            "front end: {} units in {:?}",
            units.len(),
            started.elapsed()
        );
        Ok(units)
    }

    /// Compile `seeds` into the configured executable and return its path
    pub fn build(
        &mut self,
        seeds: &[PathBuf],
    ) -> Result<PathBuf, CompileError> {
        let units = self.compile(seeds)?;

        let started = Instant::now();
        let symbols = analyze(&units)?;
        tracing::debug!("analysis: {:?}", started.elapsed());

        let started = Instant::now();
        let generator = CGenerator::new(&self.config);
        let generated = units
            .iter()
            .map(|unit| {
                generator
                    .generate(unit, &symbols)
                    .map_err(|source| CompileError::Codegen {
                        path: unit.path().display().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("code generation: {:?}", started.elapsed());

        let output_dir = self.config.compiler.output_dir.clone();
        let created = !output_dir.exists();
        let result = self.emit_and_link(&output_dir, &generated);

        if !self.config.compiler.save_temps {
            cleanup(&output_dir, created, &generated);
        }
        result
    }

    fn emit_and_link(
        &self,
        output_dir: &Path,
        generated: &[GeneratedUnit],
    ) -> Result<PathBuf, CompileError> {
        fs::create_dir_all(output_dir).map_err(|err| CompileError::io(output_dir, err))?;

        write_file(&output_dir.join(RUNTIME_HEADER_NAME), RUNTIME_HEADER)?;
        write_file(&output_dir.join(RUNTIME_SOURCE_NAME), RUNTIME_SOURCE)?;
        for unit in generated {
            write_file(&output_dir.join(&unit.header_name), &unit.header)?;
            write_file(&output_dir.join(&unit.source_name), &unit.source)?;
        }

        let sources = c_sources(output_dir, generated);
        for stale in stale_sources(output_dir, &sources)? {
            tracing::warn!("ignoring {} left over from another build", stale.display());
        }
        let output = self.config.compiler.output.clone();
        let started = Instant::now();
        Toolchain::from_config(&self.config).link(output_dir, &sources, &output)?;
        tracing::debug!(
            "linked {} from {} sources in {:?}",
            output.display(),
            sources.len(),
            started.elapsed()
        );
        Ok(output)
    }
}

fn write_file(
    path: &Path,
    content: &str,
) -> Result<(), CompileError> {
    tracing::trace!("writing {}", path.display());
    fs::write(path, content).map_err(|err| CompileError::io(path, err))
}

/// The runtime source followed by this build's generated sources
pub fn c_sources(
    output_dir: &Path,
    generated: &[GeneratedUnit],
) -> Vec<PathBuf> {
    std::iter::once(RUNTIME_SOURCE_NAME)
        .chain(generated.iter().map(|unit| unit.source_name.as_str()))
        .map(|name| output_dir.join(name))
        .collect()
}

/// `.c` files directly inside `dir` that are not in `sources`, sorted by name
pub fn stale_sources(
    dir: &Path,
    sources: &[PathBuf],
) -> Result<Vec<PathBuf>, CompileError> {
    let mut stale = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            CompileError::Io {
                path,
                source: err.into(),
            }
        })?;
        let is_c = entry.path().extension().map(|e| e == "c").unwrap_or(false);
        if entry.file_type().is_file() && is_c && !sources.iter().any(|s| s == entry.path()) {
            stale.push(entry.into_path());
        }
    }
    stale.sort();
    Ok(stale)
}

/// Drop generated files; a directory that existed before keeps everything else
fn cleanup(
    output_dir: &Path,
    created: bool,
    generated: &[GeneratedUnit],
) {
    let outcome = if created {
        fs::remove_dir_all(output_dir)
    } else {
        let names = [RUNTIME_HEADER_NAME, RUNTIME_SOURCE_NAME]
            .into_iter()
            .chain(generated.iter().flat_map(|u| [u.header_name.as_str(), u.source_name.as_str()]));
        names
            .map(|name| fs::remove_file(output_dir.join(name)))
            .filter(|r| !matches!(r, Err(err) if err.kind() == io::ErrorKind::NotFound))
            .collect::<Result<(), _>>()
    };
    if let Err(err) = outcome {
        tracing::warn!("cannot clean up {}: {}", output_dir.display(), err);
    }
}
