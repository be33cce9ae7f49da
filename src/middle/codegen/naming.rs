//! C identifiers and generated file names

use std::path::Path;

/// Prefix of every generated C symbol
pub const PREFIX: &str = "__qd_";

/// Cell type macro used in generated code
pub const REAL_T: &str = "__qd_real_t";

/// `__qd_<unit>_<name>` for user functions and constants
pub fn user_symbol(
    unit: &str,
    name: &str,
) -> String {
    format!("{}{}_{}", PREFIX, unit, name)
}

/// `__qd_<name>` for primitives
pub fn primitive(name: &str) -> String {
    format!("{}{}", PREFIX, name)
}

/// `__qd_local_<name>` for locals and parameters
pub fn local(name: &str) -> String {
    format!("{}local_{}", PREFIX, name)
}

/// `__qd_iter_<depth>` for the iteration value of the loop at `depth`
pub fn iterator(depth: usize) -> String {
    format!("{}iter_{}", PREFIX, depth)
}

/// `<module>_<basename>` stem shared by a unit's header and source
pub fn file_stem(
    module: &str,
    path: &Path,
) -> String {
    let base = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}_{}", module, base)
}

pub fn header_file(
    module: &str,
    path: &Path,
) -> String {
    format!("{}.h", file_stem(module, path))
}

pub fn source_file(
    module: &str,
    path: &Path,
) -> String {
    format!("{}.c", file_stem(module, path))
}

/// `QD<PATH>_H` with every non-alphanumeric character as `_`
pub fn include_guard(path: &Path) -> String {
    let body: String = path
        .display()
        .to_string()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("QD{}_H", body)
}
