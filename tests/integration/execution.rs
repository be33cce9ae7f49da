//! End-to-end builds through the system C compiler
//!
//! Skipped when no `cc` is available.

use std::process::Command;

use quadrate::frontend::module::Resolver;
use quadrate::util::config::Config;
use quadrate::Compiler;

use crate::common::{have_cc, project, source};

/// Build `main.qd` of `files` and return the program's (stdout, exit code)
fn build_and_run(files: &[(&str, &str)]) -> Option<(String, i32)> {
    if !have_cc() {
        eprintln!("skipping: no C compiler");
        return None;
    }

    let dir = project(files);
    let mut config = Config::default();
    config.compiler.output_dir = dir.path().join("gen");
    config.compiler.output = dir.path().join("program");

    let artifact = Compiler::new(config, Resolver::new(vec![]))
        .build(&[source(&dir, "main.qd")])
        .unwrap();
    assert!(!dir.path().join("gen").exists());

    let output = Command::new(&artifact).output().unwrap();
    Some((
        String::from_utf8_lossy(&output.stdout).into_owned(),
        output.status.code().unwrap_or(-1),
    ))
}

#[test]
fn test_arithmetic_and_functions() {
    let program = "fn square(x) {\n\tpush x x\n\tmul\n}\nfn main() {\n\tsquare 7\n\tprint\n\tpush 10 4\n\tsub\n\tprint\n}\n";
    if let Some((stdout, code)) = build_and_run(&[("main.qd", program)]) {
        assert_eq!(stdout, "49\n6\n");
        assert_eq!(code, 0);
    }
}

#[test]
fn test_loops_and_jumps() {
    let program = "fn main() {\n\tfor 0 1 3\n\t\tprint $\n\tend\n\tpush 3\ntop:\n\tdup\n\tprint\n\tdec\n\tdup\n\tjgz top\n\tdrop\n}\n";
    if let Some((stdout, _)) = build_and_run(&[("main.qd", program)]) {
        assert_eq!(stdout, "0\n1\n2\n3\n2\n1\n");
    }
}

#[test]
fn test_reduce_and_constants() {
    let program = "const TEN 10\nfn main() {\n\tmark\n\tpush 1 2 3 4\n\treduce add\n\tpush TEN\n\tmul\n\tprint\n}\n";
    if let Some((stdout, _)) = build_and_run(&[("main.qd", program)]) {
        assert_eq!(stdout, "100\n");
    }
}

#[test]
fn test_imported_module() {
    let files = [
        ("main.qd", "use math\nfn main() {\n\tmath::cube 2\n\tprint\n}\n"),
        ("math.qd", "fn cube(x) {\n\tpush x x x\n\tmul\n\tmul\n}\n"),
    ];
    if let Some((stdout, _)) = build_and_run(&files) {
        assert_eq!(stdout, "8\n");
    }
}

#[test]
fn test_inline_c() {
    let program = "__c {\n#include <stdio.h>\n}\nfn main() {\n\t__c { printf(\"inline\\n\"); }\n}\n";
    if let Some((stdout, _)) = build_and_run(&[("main.qd", program)]) {
        assert_eq!(stdout, "inline\n");
    }
}

#[test]
fn test_stack_underflow_panics() {
    let program = "fn main() {\n\tadd\n}\n";
    if let Some((_, code)) = build_and_run(&[("main.qd", program)]) {
        assert_eq!(code, 1);
    }
}

#[test]
fn test_second_program_in_kept_output_dir() {
    if !have_cc() {
        eprintln!("skipping: no C compiler");
        return;
    }
    let dir = project(&[
        ("a.qd", "fn main() {\n\tprint 1\n}\n"),
        ("b.qd", "fn main() {\n\tprint 2\n}\n"),
    ]);
    let mut config = Config::default();
    config.compiler.output_dir = dir.path().join("gen");
    config.compiler.output = dir.path().join("program");
    config.compiler.save_temps = true;

    let mut compiler = Compiler::new(config, Resolver::new(vec![]));
    compiler.build(&[source(&dir, "a.qd")]).unwrap();
    let artifact = compiler.build(&[source(&dir, "b.qd")]).unwrap();

    let output = Command::new(&artifact).output().unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2\n");
}
