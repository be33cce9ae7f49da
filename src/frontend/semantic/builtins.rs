//! 内置原语指令集

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Primitive instructions provided by the runtime as `__qd_<name>`
pub const BUILTINS: &[&str] = &[
    // arithmetic
    "add", "sub", "mul", "div", "mod", "neg", "inc", "dec", "abs",
    // comparison and logic
    "eq", "neq", "gt", "gte", "lt", "lte", "within", "and", "or", "not", "xor",
    // stack
    "push", "pop", "drop", "drop2", "dup", "dup2", "dupd", "swap", "swap2", "swapd", "over",
    "over2", "nip", "tuck", "rot", "pick", "roll", "clear", "depth", "mark",
    // math
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "cbrt", "sq", "cb", "ceil", "floor",
    "round", "ln", "log10", "exp", "pow", "min", "max", "inv", "fac",
    // I/O
    "print", "printv", "prints", "printsv", "nl", "read",
    // control
    "error",
];

static BUILTIN_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| BUILTINS.iter().copied().collect());

/// 检查是否为内置原语
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SET.contains(name)
}
