//! Code generator tests
//!
//! - functions: signatures, parameters, locals, constants, header layout
//! - calls: argument coercion, string encoding, call resolution
//! - control_flow: jumps, loops, iteration values, reduce, return
//! - errors: lowering failures

mod control_flow;

use crate::frontend::module::Resolver;
use crate::frontend::semantic::analyze;
use crate::frontend::TranslationUnit;
use crate::middle::codegen::{CGenerator, GeneratedUnit};
use crate::util::config::Config;

pub(crate) fn compile_unit(
    path: &str,
    module_name: Option<&str>,
    source: &str,
) -> TranslationUnit {
    let mut unit = TranslationUnit::new(path, module_name.map(str::to_string));
    unit.compile(source.as_bytes(), &mut Resolver::new(vec![]))
        .unwrap();
    unit
}

/// Analyze and lower every unit
pub(crate) fn generate_all(units: &[TranslationUnit]) -> Vec<GeneratedUnit> {
    let symbols = analyze(units).unwrap();
    let generator = CGenerator::new(&Config::default());
    units
        .iter()
        .map(|unit| generator.generate(unit, &symbols).unwrap())
        .collect()
}

pub(crate) fn generate_main(source: &str) -> GeneratedUnit {
    generate_all(&[compile_unit("/src/main.qd", None, source)]).remove(0)
}

/// Lines of `text` without indentation
pub(crate) fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).collect()
}

/// Assert `expected` appears as consecutive lines of `text`
pub(crate) fn assert_block(
    text: &str,
    expected: &[&str],
) {
    let actual = lines(text);
    let found = actual
        .windows(expected.len())
        .any(|window| window == expected);
    assert!(found, "expected block {:#?}\nin:\n{}", expected, text);
}
