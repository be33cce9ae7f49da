//! Rendered diagnostics for each failing stage

use quadrate::frontend::module::Resolver;
use quadrate::util::config::Config;
use quadrate::util::diagnostic::{EmitterConfig, TextEmitter};
use quadrate::{CompileError, Compiler};

use crate::common::{project, source};

fn plain() -> TextEmitter {
    TextEmitter::with_config(EmitterConfig {
        use_colors: false,
        ..EmitterConfig::default()
    })
}

fn build_error(files: &[(&str, &str)]) -> (tempfile::TempDir, CompileError) {
    let dir = project(files);
    let mut config = Config::default();
    config.compiler.output_dir = dir.path().join("gen");
    let err = Compiler::new(config, Resolver::new(vec![]))
        .build(&[source(&dir, "main.qd")])
        .unwrap_err();
    (dir, err)
}

#[test]
fn test_syntax_error_rendering() {
    let (dir, err) = build_error(&[("main.qd", "fn main() {\n\tpush 1 ?\n}")]);
    assert!(matches!(err, CompileError::Syntax(_)));

    let rendered = plain().render_from_disk(&err.diagnostic());
    let path = source(&dir, "main.qd").canonicalize().unwrap();
    let first = rendered.lines().next().unwrap();
    assert!(first.starts_with(&format!("{}:2:9: error:", path.display())), "{}", first);
    assert!(rendered.contains("\tpush 1 ?"));
    assert!(rendered.lines().any(|l| l.trim_end().ends_with('^')));
}

#[test]
fn test_semantic_error_rendering() {
    let (_dir, err) = build_error(&[("main.qd", "fn main() {\n\tpush 1\n\tfrobnicate\n}")]);
    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.message, "undefined reference to 'frobnicate'");
    assert_eq!((diagnostic.line, diagnostic.column), (3, 2));
}

#[test]
fn test_missing_entry_point_has_no_location() {
    let (_dir, err) = build_error(&[("main.qd", "fn helper() {\n}")]);
    let rendered = plain().render_from_disk(&err.diagnostic());
    assert_eq!(rendered, "quadrate: error: undefined reference to 'main'\n");
}

#[test]
fn test_missing_module_is_reported_at_use() {
    let (_dir, err) = build_error(&[("main.qd", "use nowhere\nfn main() {\n}")]);
    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.message, "module not found: 'nowhere'");
    assert_eq!((diagnostic.line, diagnostic.column), (1, 5));
}

#[test]
fn test_failed_build_leaves_no_output_dir() {
    let (dir, _err) = build_error(&[("main.qd", "fn main() {\n\tnope\n}")]);
    assert!(!dir.path().join("gen").exists());
}
