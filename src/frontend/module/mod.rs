//! 模块系统
//!
//! 将 `use` 字面量解析为磁盘上的 `.qd` 文件，并推导模块名。
//!
//! # 模块结构
//!
//! - [`resolver`] - 模块路径解析与缓存

pub mod resolver;

use std::path::Path;

pub use resolver::Resolver;

/// Package entry file inside a module directory
pub const MODULE_ENTRY: &str = "module.qd";

/// Source file extension
pub const SOURCE_EXTENSION: &str = "qd";

/// 模块系统错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    /// 模块未找到
    #[error("module not found: '{name}'")]
    NotFound {
        name: String,
        searched: Vec<String>,
    },
}

/// Module name a file is compiled and imported under
///
/// `<dir>/module.qd` takes the directory name, any other file its stem.
/// Characters that cannot appear in a C identifier become `_`.
pub fn module_name_for(path: &Path) -> String {
    let is_entry = path.file_name().map(|n| n == MODULE_ENTRY).unwrap_or(false);
    let raw = if is_entry {
        path.parent()
            .and_then(|dir| dir.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    } else {
        path.file_stem().map(|s| s.to_string_lossy().into_owned())
    };

    raw.unwrap_or_else(|| "main".to_string())
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_name_for_entry_file() {
        assert_eq!(module_name_for(Path::new("/lib/mathlib/module.qd")), "mathlib");
    }

    #[test]
    fn test_module_name_for_plain_file() {
        assert_eq!(module_name_for(Path::new("/src/utils.qd")), "utils");
    }

    #[test]
    fn test_module_name_sanitized() {
        assert_eq!(module_name_for(Path::new("/lib/my-lib.v2/module.qd")), "my_lib_v2");
    }
}
