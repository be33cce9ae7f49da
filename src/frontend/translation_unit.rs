//! Translation units

use std::path::{Path, PathBuf};

use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::{self, Token};
use crate::frontend::module::{module_name_for, Resolver};
use crate::frontend::parser::{self, ProgramModule};

/// One source file moving through the pipeline
///
/// Created by the driver, filled by [`TranslationUnit::compile`], then read by
/// the analyzer and generator.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    /// Absolute path of the source file
    pub filepath: PathBuf,
    /// Name the unit was imported under; `None` for requested sources
    pub module_name: Option<String>,
    pub tokens: Vec<Token>,
    pub module: Option<ProgramModule>,
}

impl TranslationUnit {
    pub fn new(
        filepath: impl Into<PathBuf>,
        module_name: Option<String>,
    ) -> Self {
        Self {
            filepath: filepath.into(),
            module_name,
            tokens: Vec::new(),
            module: None,
        }
    }

    /// Lex and parse `source`, returning the imported module paths
    pub fn compile(
        &mut self,
        source: &[u8],
        resolver: &mut Resolver,
    ) -> Result<Vec<PathBuf>, SyntaxError> {
        let output = lexer::lex(&self.filepath, source, resolver)?;
        let module = parser::parse(&self.filepath, &output.tokens)?;
        self.tokens = output.tokens;
        self.module = Some(module);
        Ok(output.submodules)
    }

    pub fn path(&self) -> &Path {
        &self.filepath
    }

    /// Name used for C symbols and generated file names
    pub fn unit_name(&self) -> String {
        match (&self.module_name, &self.module) {
            (Some(name), _) => name.clone(),
            (None, Some(module)) => module.name.clone(),
            (None, None) => module_name_for(&self.filepath),
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.module.is_some()
    }
}
