//! C source backend.
//!
//! Translation is two-pass: an analysis pass over the instruction
//! list classifies global variables, function parameters and the
//! string-ness of `input()` results, then an emission pass prints the
//! program. Every value is an `int` unless the analysis proves a
//! variable only ever carries text read from standard input, in which
//! case it is promoted to `char*`.

use std::collections::HashSet;

use crate::ir::{Instr, Operand};

/// Input helpers printed into every generated program. `input()`
/// calls lower to one of the two, depending on whether the result is
/// ever used arithmetically.
const INPUT_HELPERS: &str = r#"// Input handling
#define INPUT_BUFFER_SIZE 1024
char __input_buffer[INPUT_BUFFER_SIZE];

// Read string input (returns dynamically allocated string)
char* __read_string_input(const char* prompt) {
    if (prompt != NULL) {
        printf("%s", prompt);
    }
    if (fgets(__input_buffer, INPUT_BUFFER_SIZE, stdin) != NULL) {
        // Remove trailing newline if present
        size_t len = strlen(__input_buffer);
        if (len > 0 && __input_buffer[len-1] == '\n') {
            __input_buffer[len-1] = '\0';
        }
        // Return a copy of the input
        char* result = (char*)malloc(strlen(__input_buffer) + 1);
        strcpy(result, __input_buffer);
        return result;
    }
    return NULL;
}

// Read number input
int __read_number_input(const char* prompt) {
    char* str_input = __read_string_input(prompt);
    if (str_input != NULL) {
        int result = atoi(str_input);
        free(str_input);
        return result;
    }
    return 0;
}"#;

/// Generates a complete C program from an instruction sequence.
pub fn generate(code: &[Instr]) -> String {
    let mut generator = CGenerator::new();
    generator.analyze(code);
    generator.emit_headers();
    generator.emit_forward_declarations();
    generator.emit_globals();
    generator.emit_functions(code);
    generator.emit_main(code);
    generator.out.join("\n")
}

struct CGenerator {
    out: Vec<String>,
    indent: usize,
    pending_params: Vec<Operand>,
    /// Set when the previous emitted instruction was a label, so a
    /// label closing a scope gets an empty statement after it.
    last_label: bool,
    /// Function name and parameter names, in declaration order.
    function_params: Vec<(String, Vec<String>)>,
    /// Global variable names, in first-assignment order.
    globals: Vec<String>,
    /// Globals that only ever carry `input()` text.
    promoted: HashSet<String>,
    /// Temporaries holding a `char*` result of `__read_string_input`.
    string_temps: HashSet<String>,
}

impl CGenerator {
    fn new() -> CGenerator {
        CGenerator {
            out: vec![],
            indent: 0,
            pending_params: vec![],
            last_label: false,
            function_params: vec![],
            globals: vec![],
            promoted: HashSet::new(),
            string_temps: HashSet::new(),
        }
    }

    fn emit(&mut self, line: &str) {
        self.out.push(format!("{}{}", "    ".repeat(self.indent), line));
    }

    fn emit_blank(&mut self) {
        self.out.push(String::new());
    }

    // ========== Analysis ==========

    fn analyze(&mut self, code: &[Instr]) {
        let mut arithmetic_used: HashSet<String> = HashSet::new();
        let mark = |operand: &Operand, set: &mut HashSet<String>| {
            if matches!(operand, Operand::Temp(_) | Operand::Name(_)) {
                set.insert(operand.to_string());
            }
        };
        for instruction in code {
            match instruction {
                Instr::Binary { left, right, .. } => {
                    mark(left, &mut arithmetic_used);
                    mark(right, &mut arithmetic_used);
                }
                Instr::Unary { operand, .. } => mark(operand, &mut arithmetic_used),
                Instr::Index { index, .. } => mark(index, &mut arithmetic_used),
                _ => {}
            }
        }

        let mut input_temps: HashSet<String> = HashSet::new();
        for instruction in code {
            if let Instr::Call { name, target, .. } = instruction {
                if name == "input" {
                    input_temps.insert(target.to_string());
                }
            }
        }

        // Variables assigned from an input() result, keyed by the
        // temporary carrying it.
        let mut input_assignments: Vec<(String, String)> = vec![];
        let mut in_function = false;
        for (position, instruction) in code.iter().enumerate() {
            match instruction {
                Instr::FuncBegin(name) => {
                    in_function = true;
                    let end = code[position + 1..]
                        .iter()
                        .position(|following| matches!(following, Instr::FuncEnd(_)))
                        .map(|offset| position + 1 + offset)
                        .unwrap_or(code.len());
                    self.function_params
                        .push((name.clone(), super::formal_parameters(&code[position + 1..end])));
                }
                Instr::FuncEnd(_) => in_function = false,
                Instr::Assign { value, target } => {
                    if let Operand::Name(name) = target {
                        if !in_function && !self.globals.contains(name) {
                            self.globals.push(name.clone());
                        }
                        if let Operand::Temp(_) = value {
                            if input_temps.contains(&value.to_string()) {
                                input_assignments.push((value.to_string(), name.clone()));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        for (_, variable) in &input_assignments {
            if self.globals.contains(variable) && !arithmetic_used.contains(variable) {
                self.promoted.insert(variable.clone());
            }
        }

        for temp in &input_temps {
            if arithmetic_used.contains(temp) {
                continue;
            }
            let destinations: Vec<&String> = input_assignments
                .iter()
                .filter(|(source, _)| source == temp)
                .map(|(_, variable)| variable)
                .collect();
            if destinations
                .iter()
                .all(|variable| self.promoted.contains(*variable))
            {
                self.string_temps.insert(temp.clone());
            }
        }
    }

    // ========== Sections ==========

    fn emit_headers(&mut self) {
        self.emit("#include <stdio.h>");
        self.emit("#include <stdlib.h>");
        self.emit("#include <string.h>");
        self.emit("#include <stdbool.h>");
        self.emit_blank();
        for line in INPUT_HELPERS.lines() {
            self.out.push(line.to_string());
        }
        self.emit_blank();
    }

    fn emit_forward_declarations(&mut self) {
        if self.function_params.is_empty() {
            return;
        }
        self.emit("// Forward declarations");
        for (name, parameters) in self.function_params.clone() {
            let parameter_list = parameters
                .iter()
                .map(|parameter| format!("int {}", parameter))
                .collect::<Vec<String>>()
                .join(", ");
            self.emit(&format!("int {}({});", name, parameter_list));
        }
        self.emit_blank();
    }

    fn emit_globals(&mut self) {
        if self.globals.is_empty() {
            return;
        }
        self.emit("// Global variables");
        for name in self.globals.clone() {
            if self.promoted.contains(&name) {
                self.emit(&format!("char* {};  // Global variable", name));
            } else {
                self.emit(&format!("int {};  // Global variable", name));
            }
        }
        self.emit_blank();
    }

    fn emit_functions(&mut self, code: &[Instr]) {
        let mut position = 0;
        while position < code.len() {
            if let Instr::FuncBegin(name) = &code[position] {
                let end = code[position..]
                    .iter()
                    .position(|instruction| matches!(instruction, Instr::FuncEnd(_)))
                    .map(|offset| position + offset)
                    .unwrap_or(code.len());
                self.emit_function(name.clone(), &code[position + 1..end]);
                position = end + 1;
            } else {
                position += 1;
            }
        }
    }

    /// Emits one function from its body region (parameters included,
    /// boundary markers excluded).
    fn emit_function(&mut self, name: String, region: &[Instr]) {
        let parameters = super::formal_parameters(region);
        let body = &region[parameters.len()..];

        let parameter_list = parameters
            .iter()
            .map(|parameter| format!("int {}", parameter))
            .collect::<Vec<String>>()
            .join(", ");
        self.emit(&format!("int {}({}) {{", name, parameter_list));
        self.indent += 1;

        let declared = self.emit_local_declarations(body, &parameters);
        if declared {
            self.emit_blank();
        }

        self.pending_params.clear();
        self.last_label = false;
        for instruction in body {
            self.emit_instruction(instruction);
        }
        if self.last_label {
            self.emit(";  // Empty statement after label");
        }

        self.indent -= 1;
        self.emit("}");
        self.emit_blank();
    }

    /// Declares the temporaries and locals a region assigns to.
    /// Returns whether anything was declared.
    fn emit_local_declarations(&mut self, region: &[Instr], parameters: &[String]) -> bool {
        let mut temps: Vec<String> = vec![];
        let mut locals: Vec<String> = vec![];
        for instruction in region {
            let target = match instruction {
                Instr::Assign { target, .. }
                | Instr::Binary { target, .. }
                | Instr::Unary { target, .. }
                | Instr::Call { target, .. }
                | Instr::Index { target, .. }
                | Instr::MethodCall { target, .. } => target,
                _ => continue,
            };
            match target {
                Operand::Temp(_) => {
                    let key = target.to_string();
                    if !temps.contains(&key) {
                        temps.push(key);
                    }
                }
                Operand::Name(name) => {
                    if matches!(instruction, Instr::Assign { .. })
                        && !self.globals.contains(name)
                        && !parameters.contains(name)
                        && !locals.contains(name)
                    {
                        locals.push(name.clone());
                    }
                }
                _ => {}
            }
        }
        temps.sort();
        locals.sort();

        if !temps.is_empty() {
            self.emit("// Temporary variables");
            for temp in temps.clone() {
                if self.string_temps.contains(&temp) {
                    self.emit(&format!("char* {} = NULL;", temp));
                } else {
                    self.emit(&format!("int {} = 0;", temp));
                }
            }
        }
        if !locals.is_empty() {
            self.emit("// Local variables");
            for local in locals.clone() {
                self.emit(&format!("int {} = 0;", local));
            }
        }
        !temps.is_empty() || !locals.is_empty()
    }

    fn emit_main(&mut self, code: &[Instr]) {
        self.emit("int main() {");
        self.indent += 1;

        let top_level = top_level_region(code);
        let declared = self.emit_local_declarations(&top_level, &[]);
        if declared {
            self.emit_blank();
        }

        self.pending_params.clear();
        self.last_label = false;
        for instruction in &top_level {
            self.emit_instruction(instruction);
        }
        if self.last_label {
            self.emit(";  // Empty statement after label");
        }

        self.emit_blank();
        self.emit("return 0;");
        self.indent -= 1;
        self.emit("}");
    }

    // ========== Instructions ==========

    fn emit_instruction(&mut self, instruction: &Instr) {
        if let Instr::Param(operand) = instruction {
            self.pending_params.push(operand.clone());
            return;
        }
        if let Instr::Label(label) = instruction {
            self.indent -= 1;
            self.emit(&format!("{}:", label));
            self.indent += 1;
            self.last_label = true;
            return;
        }
        self.last_label = false;

        match instruction {
            Instr::Goto(label) => self.emit(&format!("goto {};", label)),
            Instr::IfFalse { condition, label } => {
                let line = format!("if (!{}) goto {};", format_value(condition), label);
                self.emit(&line);
            }
            Instr::IfTrue { condition, label } => {
                let line = format!("if ({}) goto {};", format_value(condition), label);
                self.emit(&line);
            }
            Instr::Assign { value, target } => {
                self.emit(&format!("{} = {};", target, format_value(value)));
            }
            Instr::Binary {
                op,
                left,
                right,
                target,
            } => {
                let line = format!(
                    "{} = {} {} {};",
                    target,
                    format_value(left),
                    op,
                    format_value(right)
                );
                self.emit(&line);
            }
            Instr::Unary {
                op,
                operand,
                target,
            } => {
                self.emit(&format!("{} = {}{};", target, op, format_value(operand)));
            }
            Instr::Call { name, argc, target } => self.emit_call(name, *argc, target),
            Instr::Return(Some(value)) => self.emit(&format!("return {};", format_value(value))),
            Instr::Return(None) => self.emit("return 0;"),
            Instr::SeqBegin => {
                self.emit("// Sequential block");
                self.emit("{");
                self.indent += 1;
            }
            Instr::SeqEnd => {
                self.indent -= 1;
                self.emit("}");
            }
            Instr::ParBegin => {
                self.emit("// Parallel block (simplified - sequential execution)");
                self.emit("{");
                self.indent += 1;
            }
            Instr::ParEnd => {
                self.indent -= 1;
                self.emit("}");
            }
            Instr::ThreadStart(_) => self.emit("// Thread start"),
            Instr::ThreadEnd(_) => self.emit("// Thread end"),
            Instr::ChannelCreate { kind, name } => {
                self.emit(&format!("// Channel {} created ({})", name, kind));
            }
            Instr::MethodCall {
                object,
                method,
                argc,
                target,
            } => {
                self.drop_params(*argc);
                self.emit(&format!("// Method call: {}.{}()", object, method));
                self.emit(&format!("{} = 0;  // Method result", target));
            }
            // No C rendering for the rest; keep the instruction
            // visible as a comment.
            other => self.emit(&format!("// TAC: {}", other)),
        }
    }

    fn emit_call(&mut self, name: &str, argc: usize, target: &Operand) {
        let arguments = self.take_params(argc);
        match name {
            "print" => {
                if arguments.is_empty() {
                    self.emit("printf(\"\\n\");");
                    return;
                }
                let format_string = arguments
                    .iter()
                    .map(|argument| {
                        if self.is_string_value(argument) {
                            "%s"
                        } else {
                            "%d"
                        }
                    })
                    .collect::<Vec<&str>>()
                    .join(" ");
                let argument_list = arguments
                    .iter()
                    .map(format_value)
                    .collect::<Vec<String>>()
                    .join(", ");
                self.emit(&format!(
                    "printf(\"{}\\n\", {});",
                    format_string, argument_list
                ));
            }
            "input" => {
                let prompt = match arguments.first() {
                    Some(operand) => format_value(operand),
                    None => String::from("NULL"),
                };
                let helper = if self.string_temps.contains(&target.to_string()) {
                    "__read_string_input"
                } else {
                    "__read_number_input"
                };
                self.emit(&format!("{} = {}({});", target, helper, prompt));
            }
            _ => {
                let argument_list = arguments
                    .iter()
                    .map(format_value)
                    .collect::<Vec<String>>()
                    .join(", ");
                self.emit(&format!("{} = {}({});", target, name, argument_list));
            }
        }
    }

    fn take_params(&mut self, argc: usize) -> Vec<Operand> {
        let start = self.pending_params.len().saturating_sub(argc);
        self.pending_params.split_off(start)
    }

    fn drop_params(&mut self, argc: usize) {
        self.take_params(argc);
    }

    fn is_string_value(&self, operand: &Operand) -> bool {
        match operand {
            Operand::Str(_) => true,
            Operand::Name(name) => self.promoted.contains(name),
            Operand::Temp(_) => self.string_temps.contains(&operand.to_string()),
            _ => false,
        }
    }
}

/// The instructions outside every function region, in order.
fn top_level_region(code: &[Instr]) -> Vec<Instr> {
    let mut region = vec![];
    let mut in_function = false;
    for instruction in code {
        match instruction {
            Instr::FuncBegin(_) => in_function = true,
            Instr::FuncEnd(_) => in_function = false,
            _ => {
                if !in_function {
                    region.push(instruction.clone());
                }
            }
        }
    }
    region
}

fn format_value(operand: &Operand) -> String {
    match operand {
        Operand::Str(value) => format!("\"{}\"", escape_c(value)),
        Operand::Bool(true) => String::from("1"),
        Operand::Bool(false) => String::from("0"),
        other => other.to_string(),
    }
}

fn escape_c(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}
