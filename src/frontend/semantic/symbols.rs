//! 符号表

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// 符号类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Constant,
    Label,
    Local,
    Parameter,
}

impl SymbolKind {
    /// Function-scoped kinds are stored under their function's name
    pub fn is_scoped(&self) -> bool {
        matches!(self, SymbolKind::Label | SymbolKind::Local | SymbolKind::Parameter)
    }

    /// Holds a value that can be pushed
    pub fn is_value(&self) -> bool {
        matches!(self, SymbolKind::Constant | SymbolKind::Local | SymbolKind::Parameter)
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            SymbolKind::Function => "function",
            SymbolKind::Constant => "constant",
            SymbolKind::Label => "label",
            SymbolKind::Local => "local",
            SymbolKind::Parameter => "parameter",
        };
        f.write_str(name)
    }
}

/// 符号
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Qualified name (`module::name` for globals of imported modules)
    pub name: String,
    pub kind: SymbolKind,
    pub filepath: String,
    pub line: usize,
    pub column: usize,
    /// Enclosing function for labels, locals and parameters
    pub scope: Option<String>,
    /// Name of the defining translation unit
    pub unit: String,
}

impl Symbol {
    /// Name without its module qualifier
    pub fn base_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

/// Qualify `name` with `module` when present
pub fn qualify(
    module: Option<&str>,
    name: &str,
) -> String {
    match module {
        Some(module) => format!("{}::{}", module, name),
        None => name.to_string(),
    }
}

type SymbolKey = (Option<String>, String);

/// 符号表
///
/// Built fresh by each analysis run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<SymbolKey, Symbol>,
    modules: IndexSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning the existing one on a name clash
    pub fn insert(
        &mut self,
        symbol: Symbol,
    ) -> Result<(), &Symbol> {
        let key = (symbol.scope.clone(), symbol.name.clone());
        match self.symbols.entry(key) {
            indexmap::map::Entry::Occupied(entry) => {
                let existing: &Symbol = entry.into_mut();
                Err(existing)
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(symbol);
                Ok(())
            }
        }
    }

    pub fn add_module(
        &mut self,
        name: impl Into<String>,
    ) {
        self.modules.insert(name.into());
    }

    pub fn is_module(
        &self,
        name: &str,
    ) -> bool {
        self.modules.contains(name)
    }

    /// Function, constant or module-qualified global
    pub fn global(
        &self,
        name: &str,
    ) -> Option<&Symbol> {
        self.symbols.get(&(None, name.to_string()))
    }

    /// Label, local or parameter of `function`
    pub fn scoped(
        &self,
        function: &str,
        name: &str,
    ) -> Option<&Symbol> {
        self.symbols.get(&(Some(function.to_string()), name.to_string()))
    }

    /// Resolve a reference made inside `unit_module`
    ///
    /// Qualified names are looked up as globals. Unqualified names try the
    /// enclosing function, then the unit's own qualified global, then the bare
    /// global.
    pub fn resolve(
        &self,
        unit_module: Option<&str>,
        function: Option<&str>,
        qualifier: Option<&str>,
        name: &str,
    ) -> Option<&Symbol> {
        if let Some(qualifier) = qualifier {
            return self.global(&qualify(Some(qualifier), name));
        }
        function
            .and_then(|f| self.scoped(f, name))
            .or_else(|| unit_module.and_then(|m| self.global(&qualify(Some(m), name))))
            .or_else(|| self.global(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Symbol> {
        self.iter().filter(|s| s.kind == SymbolKind::Function)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
