//! Unit tests for three-address code generation.

use crate::ir::generator::generate;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

fn generate_lines(source: &str) -> Vec<String> {
    let tokens = tokenize(source.to_string(), None).unwrap();
    let (_parser, program) = parse(tokens);
    generate(&program.unwrap())
        .iter()
        .map(|instruction| instruction.to_string())
        .collect()
}

#[test]
fn test_binary_expression_lowers_to_two_instructions() {
    let lines = generate_lines("var x: number = 5 + 3");
    assert_eq!(lines, vec!["t0 = 5 + 3", "x = t0"]);
}

#[test]
fn test_uninitialized_declaration_emits_nothing() {
    let lines = generate_lines("var x: number");
    assert!(lines.is_empty());
}

#[test]
fn test_nested_expression_uses_fresh_temps() {
    let lines = generate_lines("var x: number = (1 + 2) * 3");
    assert_eq!(lines, vec!["t0 = 1 + 2", "t1 = t0 * 3", "x = t1"]);
}

#[test]
fn test_unary_rendering() {
    let lines = generate_lines("var y: number = 1\nvar x: number = -y");
    assert_eq!(lines, vec!["y = 1", "t0 = - y", "x = t0"]);
}

#[test]
fn test_not_rendering() {
    let lines = generate_lines("var b: bool = true\nvar c: bool = !b");
    assert_eq!(lines, vec!["b = true", "t0 = ! b", "c = t0"]);
}

#[test]
fn test_bool_literals_render_lowercase() {
    let lines = generate_lines("var b: bool = false");
    assert_eq!(lines, vec!["b = false"]);
}

#[test]
fn test_string_literals_render_quoted() {
    let lines = generate_lines("var s: string = \"hi\"");
    assert_eq!(lines, vec!["s = \"hi\""]);
}

#[test]
fn test_if_without_else() {
    let lines = generate_lines("var x: number = 1\nif x > 0 { x = 2 }");
    assert_eq!(
        lines,
        vec![
            "x = 1",
            "t0 = x > 0",
            "IF_FALSE t0 GOTO L0",
            "x = 2",
            "LABEL L0",
        ]
    );
}

#[test]
fn test_if_with_else() {
    let lines = generate_lines("var x: number = 1\nif x > 0 { x = 2 } else { x = 3 }");
    assert_eq!(
        lines,
        vec![
            "x = 1",
            "t0 = x > 0",
            "IF_FALSE t0 GOTO L0",
            "x = 2",
            "GOTO L1",
            "LABEL L0",
            "x = 3",
            "LABEL L1",
        ]
    );
}

#[test]
fn test_while_loop_shape() {
    let lines = generate_lines("var x: number = 3\nwhile x > 0 { x = x - 1 }");
    assert_eq!(
        lines,
        vec![
            "x = 3",
            "LABEL L0",
            "t0 = x > 0",
            "IF_FALSE t0 GOTO L1",
            "t1 = x - 1",
            "x = t1",
            "GOTO L0",
            "LABEL L1",
        ]
    );
}

#[test]
fn test_break_lowers_to_goto_end() {
    let lines = generate_lines("while true { break }");
    assert_eq!(
        lines,
        vec![
            "LABEL L0",
            "IF_FALSE true GOTO L1",
            "GOTO L1",
            "GOTO L0",
            "LABEL L1",
        ]
    );
}

#[test]
fn test_continue_lowers_to_goto_start() {
    let lines = generate_lines("while true { continue }");
    assert_eq!(
        lines,
        vec![
            "LABEL L0",
            "IF_FALSE true GOTO L1",
            "GOTO L0",
            "GOTO L0",
            "LABEL L1",
        ]
    );
}

#[test]
fn test_function_declaration() {
    let lines = generate_lines("func add(a: number, b: number) -> number { return a + b }");
    assert_eq!(
        lines,
        vec![
            "FUNC_BEGIN add",
            "PARAM a",
            "PARAM b",
            "t0 = a + b",
            "RETURN t0",
            "FUNC_END add",
        ]
    );
}

#[test]
fn test_call_pushes_params_then_calls() {
    let lines = generate_lines(
        "func add(a: number, b: number) -> number { return a + b }\n\
         var x: number = add(1, 2 + 3)",
    );
    assert_eq!(
        lines,
        vec![
            "FUNC_BEGIN add",
            "PARAM a",
            "PARAM b",
            "t0 = a + b",
            "RETURN t0",
            "FUNC_END add",
            "PARAM 1",
            "t1 = 2 + 3",
            "PARAM t1",
            "CALL add 2 t2",
            "x = t2",
        ]
    );
}

#[test]
fn test_return_without_value() {
    let lines = generate_lines("func f() -> void { return }");
    assert_eq!(lines, vec!["FUNC_BEGIN f", "RETURN", "FUNC_END f"]);
}

#[test]
fn test_index_expression() {
    let lines = generate_lines("var xs: list = []\nvar i: number = 0\nvar x: any = xs[i]");
    assert_eq!(
        lines,
        vec!["t0 = 0", "xs = t0", "i = 0", "t1 = xs INDEX i", "x = t1"]
    );
}

#[test]
fn test_for_loop_lowering() {
    let lines = generate_lines("var xs: list = [1]\nfor (var item in xs) { print(item) }");
    assert_eq!(
        lines,
        vec![
            "t0 = 0",
            "xs = t0",
            "__iter0 = xs",
            "__idx0 = 0",
            "LABEL L0",
            "PARAM __iter0",
            "CALL len 1 t1",
            "t2 = __idx0 < t1",
            "IF_FALSE t2 GOTO L2",
            "item = __iter0 INDEX __idx0",
            "PARAM item",
            "CALL print 1 t3",
            "LABEL L1",
            "t4 = __idx0 + 1",
            "__idx0 = t4",
            "GOTO L0",
            "LABEL L2",
        ]
    );
}

#[test]
fn test_channel_create_and_method_call() {
    let lines = generate_lines(
        "c_channel canal { \"localhost\", 8585 }\n\
         var response: string = canal.send(\"2 + 2\")\n\
         canal.close()",
    );
    assert_eq!(
        lines,
        vec![
            "CHANNEL_CREATE c_channel canal",
            "PARAM \"2 + 2\"",
            "METHOD_CALL canal send 1 t0",
            "response = t0",
            "METHOD_CALL canal close 0 t1",
        ]
    );
}

#[test]
fn test_server_channel_create() {
    let lines = generate_lines(
        "func calc(m: string) -> string { return m }\n\
         s_channel canal { calc, \"calculator\", \"localhost\", 8585 }",
    );
    assert_eq!(
        lines,
        vec![
            "FUNC_BEGIN calc",
            "PARAM m",
            "RETURN m",
            "FUNC_END calc",
            "CHANNEL_CREATE s_channel canal",
        ]
    );
}

#[test]
fn test_seq_block() {
    let lines = generate_lines("seq { print(1) }");
    assert_eq!(
        lines,
        vec!["SEQ_BEGIN", "PARAM 1", "CALL print 1 t0", "SEQ_END"]
    );
}

#[test]
fn test_par_block_wraps_each_statement_in_a_thread() {
    let lines = generate_lines("par { print(1)\nprint(2) }");
    assert_eq!(
        lines,
        vec![
            "PAR_BEGIN",
            "THREAD_START 0",
            "PARAM 1",
            "CALL print 1 t0",
            "THREAD_END 0",
            "THREAD_START 1",
            "PARAM 2",
            "CALL print 1 t1",
            "THREAD_END 1",
            "PAR_END",
        ]
    );
}

#[test]
fn test_assignment_chain() {
    let lines = generate_lines("var a: number = 0\nvar b: number = 0\na = b = 5");
    assert_eq!(lines, vec!["a = 0", "b = 0", "b = 5", "a = b"]);
}

#[test]
fn test_list_literal_lowers_to_zeroed_temp() {
    let lines = generate_lines("var xs: list = [1, 2, 3]");
    assert_eq!(lines, vec!["t0 = 0", "xs = t0"]);
}
