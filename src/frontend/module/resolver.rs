//! 模块路径解析器
//!
//! 将 `use` 字面量（如 `"mathlib"`）解析为实际的 `.qd` 文件。
//!
//! # 搜索顺序
//!
//! 1. 导入文件所在目录的 `<name>.qd`
//! 2. 导入文件所在目录的 `<name>/module.qd`
//! 3. 每个搜索根（`$QUADRATE_ROOT`，默认 `$HOME/quadrate`）的 `<name>/module.qd`

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use super::{ModuleError, MODULE_ENTRY, SOURCE_EXTENSION};

/// Environment variable holding the module search roots
pub const ROOT_ENV: &str = "QUADRATE_ROOT";

/// 模块路径解析器
///
/// One resolver is threaded through every lex call of a compilation run.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    /// 全局搜索根
    search_paths: Vec<PathBuf>,
    /// (importer dir, literal) -> resolved path
    cache: HashMap<(PathBuf, String), PathBuf>,
}

impl Resolver {
    /// 创建新的解析器
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            cache: HashMap::new(),
        }
    }

    /// Search roots from `QUADRATE_ROOT`, falling back to `$HOME/quadrate`
    pub fn from_env() -> Self {
        let search_paths = match env::var_os(ROOT_ENV) {
            Some(value) if !value.is_empty() => env::split_paths(&value).collect(),
            _ => env::var_os("HOME")
                .map(|home| vec![PathBuf::from(home).join("quadrate")])
                .unwrap_or_default(),
        };
        tracing::debug!("module search roots: {:?}", search_paths);
        Self::new(search_paths)
    }

    /// 全局搜索根
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// 解析模块路径
    ///
    /// Returns the canonical path of the first existing candidate.
    pub fn resolve(
        &mut self,
        importer: &Path,
        literal: &str,
    ) -> Result<PathBuf, ModuleError> {
        let base = importer.parent().unwrap_or(Path::new("")).to_path_buf();
        let key = (base, literal.to_string());
        if let Some(path) = self.cache.get(&key) {
            return Ok(path.clone());
        }

        let candidates = self.candidates(&key.0, literal);
        let found = candidates.iter().find(|candidate| candidate.is_file());

        match found {
            Some(candidate) => {
                let path = candidate
                    .canonicalize()
                    .unwrap_or_else(|_| candidate.clone());
                self.cache.insert(key, path.clone());
                Ok(path)
            }
            None => Err(ModuleError::NotFound {
                name: literal.to_string(),
                searched: candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect(),
            }),
        }
    }

    /// 候选文件，按优先级排列
    fn candidates(
        &self,
        base: &Path,
        literal: &str,
    ) -> Vec<PathBuf> {
        let mut paths = vec![
            base.join(format!("{}.{}", literal, SOURCE_EXTENSION)),
            base.join(literal).join(MODULE_ENTRY),
        ];
        paths.extend(
            self.search_paths
                .iter()
                .map(|root| root.join(literal).join(MODULE_ENTRY)),
        );
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_resolve_sibling_file_first() {
        let dir = tempfile::tempdir().unwrap();
        let importer = dir.path().join("main.qd");
        touch(&dir.path().join("mathlib.qd"));
        touch(&dir.path().join("mathlib").join("module.qd"));

        let mut resolver = Resolver::new(vec![]);
        let path = resolver.resolve(&importer, "mathlib").unwrap();
        assert_eq!(path, dir.path().join("mathlib.qd").canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_directory_module() {
        let dir = tempfile::tempdir().unwrap();
        let importer = dir.path().join("main.qd");
        touch(&dir.path().join("mathlib").join("module.qd"));

        let mut resolver = Resolver::new(vec![]);
        let path = resolver.resolve(&importer, "mathlib").unwrap();
        assert!(path.ends_with("mathlib/module.qd"));
    }

    #[test]
    fn test_resolve_from_search_root() {
        let project = tempfile::tempdir().unwrap();
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("mathlib").join("module.qd"));

        let mut resolver = Resolver::new(vec![root.path().to_path_buf()]);
        let path = resolver
            .resolve(&project.path().join("main.qd"), "mathlib")
            .unwrap();
        assert_eq!(
            path,
            root.path().join("mathlib/module.qd").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_resolve_nonexistent_module() {
        let dir = tempfile::tempdir().unwrap();
        let mut resolver = Resolver::new(vec![]);

        let result = resolver.resolve(&dir.path().join("main.qd"), "nonexistent_module");
        match result {
            Err(err @ ModuleError::NotFound { .. }) => {
                assert_eq!(err.to_string(), "module not found: 'nonexistent_module'");
                let ModuleError::NotFound { searched, .. } = err;
                assert_eq!(searched.len(), 2);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let importer = dir.path().join("main.qd");
        let module = dir.path().join("cached.qd");
        touch(&module);

        let mut resolver = Resolver::new(vec![]);
        let first = resolver.resolve(&importer, "cached").unwrap();
        fs::remove_file(&module).unwrap();
        assert_eq!(resolver.resolve(&importer, "cached").unwrap(), first);
    }
}
