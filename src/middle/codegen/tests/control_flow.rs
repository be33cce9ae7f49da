use super::{assert_block, generate_main, lines};

#[test]
fn test_unconditional_jump() {
    let unit = generate_main("fn main() {\nstart:\n\tjmp start\n}");
    assert_block(&unit.source, &["start:;", "goto start;"]);
}

#[test]
fn test_single_operand_jump() {
    let unit = generate_main("fn main() {\n\tpush 3\nagain:\n\tdec\n\tdup\n\tjnz again\n}");
    assert_block(
        &unit.source,
        &[
            "__qd_dup(0);",
            "if (__qd_stack_ptr < 1) {",
            "__qd_panic_stack_underflow();",
            "}",
            "__qd_stack_ptr -= 1;",
            "if (__qd_stack[__qd_stack_ptr] != 0) {",
            "goto again;",
            "}",
        ],
    );
}

#[test]
fn test_two_operand_jump_compares_second_against_top() {
    let unit = generate_main("fn main() {\n\tpush 2 1\n\tjg done\n\tpush 0\ndone:\n}");
    assert_block(
        &unit.source,
        &[
            "if (__qd_stack_ptr < 2) {",
            "__qd_panic_stack_underflow();",
            "}",
            "__qd_stack_ptr -= 2;",
            "if (__qd_stack[__qd_stack_ptr] > __qd_stack[__qd_stack_ptr + 1]) {",
            "goto done;",
            "}",
            "__qd_push(1, (__qd_real_t)0);",
            "done:;",
            "return 0;",
        ],
    );
}

#[test]
fn test_for_loop() {
    let unit = generate_main("fn main() {\n\tfor 0 1 10\n\t\tprint $\n\tend\n}");
    assert_block(
        &unit.source,
        &[
            "for (__qd_real_t __qd_iter_1 = (__qd_real_t)0; ((__qd_real_t)1) >= 0 ? __qd_iter_1 < ((__qd_real_t)10) : __qd_iter_1 > ((__qd_real_t)10); __qd_iter_1 += ((__qd_real_t)1)) {",
            "__qd_print(1, __qd_iter_1);",
            "}",
            "return 0;",
        ],
    );
}

#[test]
fn test_nested_loop_bounds_use_outer_iterator() {
    let unit = generate_main(
        "fn main() {\n\tfor 1 1 4\n\t\tfor 0 1 $\n\t\t\t$\n\t\tend\n\tend\n}",
    );
    let source = lines(&unit.source);
    assert!(source.contains(
        &"for (__qd_real_t __qd_iter_2 = (__qd_real_t)0; ((__qd_real_t)1) >= 0 ? __qd_iter_2 < (__qd_iter_1) : __qd_iter_2 > (__qd_iter_1); __qd_iter_2 += ((__qd_real_t)1)) {"
    ));
    assert!(source.contains(&"__qd_arg_push(__qd_iter_2);"));
}

#[test]
fn test_loop_break_continue() {
    let unit = generate_main(
        "fn main() {\n\tloop\n\t\tread\n\t\tdup\n\t\tjz out\n\t\tcontinue\nout:\n\t\tbreak\n\tend\n}",
    );
    assert!(lines(&unit.source)
        .contains(&"for (__qd_real_t __qd_iter_1 = 0; ; __qd_iter_1 += 1) {"));
    assert!(lines(&unit.source).contains(&"continue;"));
    assert!(lines(&unit.source).contains(&"break;"));
}

#[test]
fn test_loop_block_indentation() {
    let unit = generate_main("fn main() {\n\tloop\n\t\tbreak\n\tend\n}");
    assert!(unit.source.contains("\tfor (__qd_real_t __qd_iter_1 = 0; ; __qd_iter_1 += 1) {\n\t\tbreak;\n\t}\n"));
}

#[test]
fn test_reduce() {
    let unit = generate_main("fn main() {\n\tmark\n\tpush 1 2 3\n\treduce mul\n}");
    assert_block(
        &unit.source,
        &[
            "__qd_mark(0);",
            "__qd_push(3, (__qd_real_t)1, (__qd_real_t)2, (__qd_real_t)3);",
            "__qd_reduce(QD_REDUCE_MUL);",
        ],
    );
}

#[test]
fn test_return_in_function_and_entry_point() {
    let unit = generate_main("fn f() {\n\treturn\n}\nfn main() {\n\treturn\n}");
    let source = lines(&unit.source);
    assert!(source.contains(&"return;"));
    assert_block(&unit.source, &["return 0;", "return 0;", "}"]);
}

#[test]
fn test_defer_runs_before_return() {
    let unit = generate_main(
        "fn f() {\n\tdefer nl\n\tdup\n\tjz out\n\treturn\nout:\n}\nfn main() {\n\tf 1\n}",
    );
    assert_block(&unit.source, &["__qd_nl(0);", "return;", "out:;", "__qd_nl(0);", "}"]);
}
