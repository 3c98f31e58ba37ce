//! Unit tests for the C and ARM backends.

use crate::backend::{arm, c};
use crate::ir::generator::generate as generate_tac;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

fn c_program(source: &str) -> String {
    let tokens = tokenize(source.to_string(), None).unwrap();
    let (_parser, program) = parse(tokens);
    c::generate(&generate_tac(&program.unwrap()))
}

fn arm_program(source: &str) -> String {
    let tokens = tokenize(source.to_string(), None).unwrap();
    let (_parser, program) = parse(tokens);
    arm::generate(&generate_tac(&program.unwrap()))
}

// ========== C backend ==========

#[test]
fn test_c_headers_and_input_helpers_always_present() {
    let output = c_program("print(1)");
    assert!(output.contains("#include <stdio.h>"));
    assert!(output.contains("#include <stdbool.h>"));
    assert!(output.contains("char* __read_string_input(const char* prompt)"));
    assert!(output.contains("int __read_number_input(const char* prompt)"));
}

#[test]
fn test_c_factorial_program_shape() {
    let output = c_program(
        "func fatorial(n: number) -> number {\n\
             if n == 0 || n == 1 { return 1 }\n\
             return n * fatorial(n - 1)\n\
         }\n\
         var valor: number = 10\n\
         print(\"Fatorial: \", fatorial(valor))",
    );
    assert!(output.contains("int fatorial(int n);"));
    assert!(output.contains("int valor;  // Global variable"));
    assert!(output.contains("int fatorial(int n) {"));
    assert!(output.contains("    t2 = t0 || t1;"));
    assert!(output.contains("    if (!t2) goto L0;"));
    assert!(output.contains("\nL0:\n"));
    assert!(output.contains("    t4 = fatorial(t3);"));
    assert!(output.contains("    return t5;"));
    assert!(output.contains("int main() {"));
    assert!(output.contains("    valor = 10;"));
    assert!(output.contains("    printf(\"%s %d\\n\", \"Fatorial: \", t6);"));
    assert!(output.contains("    return 0;"));
}

#[test]
fn test_c_call_at_function_head_keeps_single_formal() {
    let output = c_program("func greet(name: number) -> void { print(name) }");
    assert!(output.contains("int greet(int name);"));
    assert!(output.contains("int greet(int name) {"));
    assert!(!output.contains("int name, int name"));
    assert!(output.contains("    printf(\"%d\\n\", name);"));
}

#[test]
fn test_c_temps_are_declared_and_zeroed() {
    let output = c_program("var x: number = 1 + 2");
    assert!(output.contains("// Temporary variables"));
    assert!(output.contains("    int t0 = 0;"));
}

#[test]
fn test_c_label_closing_a_function_gets_an_empty_statement() {
    let output = c_program("func f(n: number) -> number { if n > 0 { return n } }");
    assert!(output.contains("    ;  // Empty statement after label"));
}

#[test]
fn test_c_labels_are_unindented() {
    let output = c_program("var x: number = 1\nwhile x > 0 { x = x - 1 }");
    assert!(output.contains("\nL0:\n"));
    assert!(output.contains("\nL1:\n"));
    assert!(output.contains("    goto L0;"));
}

#[test]
fn test_c_zero_argument_print() {
    let output = c_program("print()");
    assert!(output.contains("printf(\"\\n\");"));
}

#[test]
fn test_c_bool_literals_format_as_integers() {
    let output = c_program("var b: bool = true\nvar c: bool = false");
    assert!(output.contains("    b = 1;"));
    assert!(output.contains("    c = 0;"));
}

#[test]
fn test_c_input_promotes_text_only_global_to_char_pointer() {
    let output = c_program(
        "var nome: string = \"\"\n\
         nome = input(\"Digite: \")\n\
         print(nome)",
    );
    assert!(output.contains("char* nome;  // Global variable"));
    assert!(output.contains("char* t0 = NULL;"));
    assert!(output.contains("t0 = __read_string_input(\"Digite: \");"));
    assert!(output.contains("printf(\"%s\\n\", nome);"));
}

#[test]
fn test_c_input_stays_numeric_when_used_in_arithmetic() {
    let output = c_program(
        "var idade: number = 0\n\
         idade = input(\"Idade: \")\n\
         var dobro: number = idade * 2",
    );
    assert!(output.contains("int idade;  // Global variable"));
    assert!(output.contains("t0 = __read_number_input(\"Idade: \");"));
}

#[test]
fn test_c_seq_and_par_blocks_become_braced_regions() {
    let output = c_program("seq { print(1) }\npar { print(2) }");
    assert!(output.contains("// Sequential block"));
    assert!(output.contains("// Parallel block (simplified - sequential execution)"));
    assert!(output.contains("// Thread start"));
    assert!(output.contains("// Thread end"));
}

#[test]
fn test_c_channel_operations_degrade_to_comments() {
    let output = c_program(
        "c_channel canal { \"localhost\", 8585 }\n\
         var resposta: string = canal.send(\"oi\")",
    );
    assert!(output.contains("// Channel canal created (c_channel)"));
    assert!(output.contains("// Method call: canal.send()"));
    assert!(output.contains("t0 = 0;  // Method result"));
}

#[test]
fn test_c_string_escapes_survive_into_printf() {
    let output = c_program("print(\"a\\tb\\n\")");
    assert!(output.contains("printf(\"%s\\n\", \"a\\tb\\n\");"));
}

// ========== ARM backend ==========

#[test]
fn test_arm_data_section_lists_globals_sorted() {
    let output = arm_program("var b: number = 2\nvar a: number = 1");
    let data_start = output.find("    .data").unwrap();
    let a_slot = output.find("a:    .word 0").unwrap();
    let b_slot = output.find("b:    .word 0").unwrap();
    assert!(data_start < a_slot);
    assert!(a_slot < b_slot);
}

#[test]
fn test_arm_no_globals_comment() {
    let output = arm_program("func f() -> number { return 1 }");
    assert!(output.contains("    @ No global variables"));
    assert!(!output.contains("\nmain:"));
}

#[test]
fn test_arm_start_block_calls_main_and_exits() {
    let output = arm_program("var x: number = 1");
    assert!(output.contains("_start:"));
    assert!(output.contains("    bl main"));
    assert!(output.contains("    mov r7, #1      @ exit syscall"));
    assert!(output.contains("    svc #0          @ make syscall"));
}

#[test]
fn test_arm_global_assignment_stores_through_address() {
    let output = arm_program("var x: number = 1");
    assert!(output.contains("    mov r0, #1"));
    assert!(output.contains("    ldr r1, =x"));
    assert!(output.contains("    str r0, [r1]"));
}

#[test]
fn test_arm_string_literals_go_to_rodata_pool() {
    let output = arm_program("print(\"ola\")");
    assert!(output.contains("    .section .rodata"));
    assert!(output.contains(".STR0:"));
    assert!(output.contains("    .asciz \"ola\""));
    assert!(output.contains("    ldr r0, =.STR0"));
    assert!(output.contains("    bl print"));
}

#[test]
fn test_arm_rodata_escapes_newlines_and_tabs() {
    let output = arm_program("print(\"a\\tb\\n\")");
    assert!(output.contains("    .asciz \"a\\tb\\n\""));
}

#[test]
fn test_arm_division_calls_runtime_routine() {
    let output = arm_program("var x: number = 10 / 2");
    assert!(output.contains("    bl __aeabi_idiv"));
}

#[test]
fn test_arm_modulo_takes_remainder_from_r1() {
    let output = arm_program("var x: number = 10 % 3");
    assert!(output.contains("    bl __aeabi_idivmod"));
    assert!(output.contains("    mov r4, r1"));
}

#[test]
fn test_arm_comparison_materializes_flag_pair() {
    let output = arm_program("var x: number = 0\nvar b: bool = x < 1");
    assert!(output.contains("    movlt r4, #1"));
    assert!(output.contains("    movge r4, #0"));
}

#[test]
fn test_arm_logical_operators_compile_to_bitwise_forms() {
    let output = arm_program(
        "var a: bool = true\nvar b: bool = true\n\
         var c: bool = a && b\nvar d: bool = a || b",
    );
    assert!(output.contains("    and r"));
    assert!(output.contains("    orr r"));
}

#[test]
fn test_arm_function_labels_are_namespaced() {
    let output = arm_program(
        "func countdown(n: number) -> number {\n\
             while n > 0 { n = n - 1 }\n\
             return n\n\
         }",
    );
    assert!(output.contains("countdown_L0:"));
    assert!(output.contains("    b countdown_L0"));
    assert!(output.contains("    beq countdown_L1"));
}

#[test]
fn test_arm_main_labels_are_namespaced() {
    let output = arm_program("while true { break }");
    assert!(output.contains("main_L0:"));
    assert!(output.contains("    b main_L1"));
}

#[test]
fn test_arm_parameters_saved_into_callee_registers() {
    let output = arm_program("func add(a: number, b: number) -> number { return a + b }");
    assert!(output.contains("    mov r4, r0  @ save param a"));
    assert!(output.contains("    mov r5, r1  @ save param b"));
}

#[test]
fn test_arm_call_at_function_head_keeps_single_formal() {
    let output = arm_program("func greet(name: number) -> void { print(name) }");
    assert_eq!(output.matches("@ save param").count(), 1);
    assert!(output.contains("    mov r4, r0  @ save param name"));
    assert!(output.contains("    mov r0, r4"));
    assert!(output.contains("    bl print"));
}

#[test]
fn test_arm_return_places_value_in_r0() {
    let output = arm_program("func f() -> number { return 5 }");
    assert!(output.contains("    mov r0, #5"));
    assert!(output.contains("    pop {r4, r5, r6, r7, lr}"));
    assert!(output.contains("    bx lr"));
}

#[test]
fn test_arm_negation_uses_reverse_subtract() {
    let output = arm_program("var y: number = 3\nvar x: number = -y");
    assert!(output.contains("    rsb r4, r0, #0"));
}

#[test]
fn test_arm_index_loads_byte() {
    let output = arm_program("var s: string = \"abc\"\nvar c: any = s[0]");
    assert!(output.contains("    ldrb "));
}

#[test]
fn test_arm_concurrency_ops_become_comments() {
    let output = arm_program("par { print(1) }");
    assert!(output.contains("    @ PAR_BEGIN: not implemented in basic ARM"));
    assert!(output.contains("    @ THREAD_START: not implemented in basic ARM"));
}

#[test]
fn test_arm_builtin_stubs_and_end_directive() {
    let output = arm_program("var x: number = 1");
    assert!(output.contains("@ Built-in function stubs"));
    assert!(output.contains("print:"));
    assert!(output.contains("input:"));
    assert!(output.ends_with("    .end"));
}
