//! Integration tests for end-to-end compilation.
//!
//! These tests drive the complete pipeline from source text through
//! tokenization, parsing, semantic analysis, three-address code
//! generation, and both text backends.

use minipar::{
    backend::{arm, c},
    ir::{generator::generate, tac::render},
    lexer::lexer::tokenize,
    parser::parser::parse,
    semantic::analyze,
};

fn compile_to_tac(source: &str) -> Vec<minipar::ir::Instr> {
    let tokens = tokenize(source.to_string(), Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    let ast = ast.unwrap();
    let analysis = analyze(&ast);
    assert!(analysis.ok, "analysis failed: {:?}", analysis.diagnostics);
    generate(&ast)
}

#[test]
fn test_compile_simple_program() {
    let source = "var x: number = 42".to_string();
    let tokens = tokenize(source, Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    assert!(ast.is_ok());

    let ast = ast.unwrap();
    let analysis = analyze(&ast);
    assert!(analysis.ok, "Semantic analysis should succeed");

    let code = generate(&ast);
    assert_eq!(render(&code), "x = 42\n");
}

#[test]
fn test_compile_arithmetic_through_all_stages() {
    let code = compile_to_tac("var x: number = 5 + 3");
    let lines: Vec<String> = code.iter().map(|instr| instr.to_string()).collect();
    assert_eq!(lines, vec!["t0 = 5 + 3", "x = t0"]);

    let c_output = c::generate(&code);
    assert!(c_output.contains("    t0 = 5 + 3;"));
    assert!(c_output.contains("    x = t0;"));

    let arm_output = arm::generate(&code);
    assert!(arm_output.contains("    add r4, r0, r0"));
}

#[test]
fn test_compile_factorial_program() {
    let source = "func fatorial(n: number) -> number {\n\
                      if n == 0 || n == 1 { return 1 }\n\
                      return n * fatorial(n - 1)\n\
                  }\n\
                  var valor: number = 10\n\
                  print(\"Fatorial: \", fatorial(valor))";
    let code = compile_to_tac(source);

    let tac = render(&code);
    assert!(tac.contains("FUNC_BEGIN fatorial"));
    assert!(tac.contains("CALL fatorial 1 t4"));
    assert!(tac.contains("FUNC_END fatorial"));

    let c_output = c::generate(&code);
    assert!(c_output.contains("int fatorial(int n);"));
    assert!(c_output.contains("int valor;  // Global variable"));
    assert!(c_output.contains("    printf(\"%s %d\\n\", \"Fatorial: \", t6);"));

    let arm_output = arm::generate(&code);
    assert!(arm_output.contains("fatorial:"));
    assert!(arm_output.contains("    mov r4, r0  @ save param n"));
    assert!(arm_output.contains("valor:    .word 0"));
}

#[test]
fn test_compile_while_loop_with_division() {
    let source = "var n: number = 100\n\
                  while n > 1 { n = n / 2 }";
    let code = compile_to_tac(source);

    let tac = render(&code);
    assert!(tac.contains("LABEL L0"));
    assert!(tac.contains("IF_FALSE t0 GOTO L1"));
    assert!(tac.contains("GOTO L0"));

    let c_output = c::generate(&code);
    assert!(c_output.contains("\nL0:\n"));
    assert!(c_output.contains("    goto L0;"));

    let arm_output = arm::generate(&code);
    assert!(arm_output.contains("main_L0:"));
    assert!(arm_output.contains("    bl __aeabi_idiv"));
}

#[test]
fn test_compile_string_print() {
    let code = compile_to_tac("print(\"ola mundo\")");

    let c_output = c::generate(&code);
    assert!(c_output.contains("    printf(\"%s\\n\", \"ola mundo\");"));

    let arm_output = arm::generate(&code);
    assert!(arm_output.contains(".STR0:"));
    assert!(arm_output.contains("    .asciz \"ola mundo\""));
}

#[test]
fn test_compile_concurrency_constructs() {
    let source = "seq { print(1) }\n\
                  par { print(2)\nprint(3) }";
    let code = compile_to_tac(source);

    let tac = render(&code);
    assert!(tac.contains("SEQ_BEGIN"));
    assert!(tac.contains("PAR_BEGIN"));
    assert!(tac.contains("THREAD_START"));

    let c_output = c::generate(&code);
    assert!(c_output.contains("// Sequential block"));
    assert!(c_output.contains("// Parallel block (simplified - sequential execution)"));
}

#[test]
fn test_compile_channel_program() {
    let source = "func calc(msg: string) -> string { return msg }\n\
                  s_channel canal { calc, \"calculadora\", \"localhost\", 8585 }";
    let code = compile_to_tac(source);

    let tac = render(&code);
    assert!(tac.contains("CHANNEL_CREATE s_channel canal"));

    let c_output = c::generate(&code);
    assert!(c_output.contains("// Channel canal created (s_channel)"));
}

#[test]
fn test_redeclaration_is_reported() {
    let source = "var x: number = 1\nvar x: number = 2".to_string();
    let tokens = tokenize(source, Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    let analysis = analyze(&ast.unwrap());

    assert!(!analysis.ok);
    assert_eq!(analysis.diagnostics.len(), 1);
    assert!(analysis.diagnostics[0]
        .to_string()
        .contains("Variable 'x' already declared in current scope"));
}

#[test]
fn test_break_outside_loop_is_reported() {
    let source = "break".to_string();
    let tokens = tokenize(source, Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    let analysis = analyze(&ast.unwrap());

    assert!(!analysis.ok);
    assert!(analysis.diagnostics[0]
        .to_string()
        .contains("Break statement outside loop"));
}

#[test]
fn test_parse_error_carries_position() {
    let source = "var x: number = *".to_string();
    let tokens = tokenize(source, Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    assert!(ast.is_err());

    let error = ast.err().unwrap();
    assert_eq!(error.get_position().line, 1);
}

#[test]
fn test_diagnostics_do_not_stop_generation() {
    // Type errors are reported, but the program still lowers.
    let source = "var x: number = \"texto\"\nprint(x)".to_string();
    let tokens = tokenize(source, Some("test.mp".to_string())).unwrap();
    let (_, ast) = parse(tokens);
    let ast = ast.unwrap();

    let analysis = analyze(&ast);
    assert!(!analysis.ok);

    let code = generate(&ast);
    assert!(!code.is_empty());
}
