//! ARMv7 assembly backend.
//!
//! Emission follows the AAPCS calling convention: arguments travel in
//! `r0`-`r3`, results come back in `r0`, and `r4`-`r7` hold locals and
//! temporaries across calls. Register allocation is linear: names get
//! the next free callee-saved register and `r4` is reused once the
//! window is exhausted. Labels are namespaced with the owning
//! function's name so two functions can both jump to an `L0`.
//!
//! Division and modulo call the EABI runtime routines
//! (`__aeabi_idiv`, `__aeabi_idivmod`). `&&` and `||` compile to
//! bitwise `and`/`orr` over the 0/1 operand encoding, so they do not
//! short-circuit.

use std::collections::{BTreeSet, HashMap};

use crate::ast::expressions::{BinaryOp, UnaryOp};
use crate::ir::{Instr, Operand};

/// Generates a complete ARMv7 assembly program from an instruction
/// sequence.
pub fn generate(code: &[Instr]) -> String {
    let mut generator = ArmGenerator::new();
    generator.analyze(code);
    generator.emit_data_section();
    generator.emit_rodata_section();
    generator.emit_text_section(code);

    let mut sections = vec![];
    sections.extend(generator.data.clone());
    sections.push(String::new());
    if !generator.rodata.is_empty() {
        sections.extend(generator.rodata.clone());
        sections.push(String::new());
    }
    sections.extend(generator.text.clone());
    sections.push(String::new());
    sections.push(String::from("    .end"));
    sections.join("\n")
}

struct ArmGenerator {
    data: Vec<String>,
    rodata: Vec<String>,
    text: Vec<String>,
    globals: BTreeSet<String>,
    /// String literal values with their `.STRn` labels, in first-seen
    /// order.
    strings: Vec<(String, String)>,
    register_map: HashMap<String, String>,
    next_reg: u32,
    label_prefix: String,
    pending_params: Vec<String>,
}

impl ArmGenerator {
    fn new() -> ArmGenerator {
        ArmGenerator {
            data: vec![],
            rodata: vec![],
            text: vec![],
            globals: BTreeSet::new(),
            strings: vec![],
            register_map: HashMap::new(),
            next_reg: 4,
            label_prefix: String::new(),
            pending_params: vec![],
        }
    }

    // ========== Analysis ==========

    fn analyze(&mut self, code: &[Instr]) {
        let mut in_function = false;
        for instruction in code {
            match instruction {
                Instr::FuncBegin(_) => in_function = true,
                Instr::FuncEnd(_) => in_function = false,
                _ => {
                    if !in_function {
                        if let Some(Operand::Name(name)) = target_of(instruction) {
                            self.globals.insert(name.clone());
                        }
                    }
                }
            }
            for operand in operands_of(instruction) {
                if let Operand::Str(value) = operand {
                    self.intern_string(value);
                }
            }
        }
    }

    fn intern_string(&mut self, value: &str) {
        if self.strings.iter().any(|(existing, _)| existing == value) {
            return;
        }
        let label = format!(".STR{}", self.strings.len());
        self.strings.push((value.to_string(), label));
    }

    fn string_label(&self, value: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|(existing, _)| existing == value)
            .map(|(_, label)| label.as_str())
    }

    // ========== Sections ==========

    fn emit_data_section(&mut self) {
        self.data.push(String::from("    .data"));
        if self.globals.is_empty() {
            self.data.push(String::from("    @ No global variables"));
            return;
        }
        for name in &self.globals {
            self.data.push(format!("{}:    .word 0", name));
        }
    }

    fn emit_rodata_section(&mut self) {
        if self.strings.is_empty() {
            return;
        }
        self.rodata.push(String::from("    .section .rodata"));
        self.rodata.push(String::from("    .align 2"));
        for (value, label) in self.strings.clone() {
            self.rodata.push(format!("{}:", label));
            self.rodata
                .push(format!("    .asciz \"{}\"", escape_asm(&value)));
        }
    }

    fn emit_text_section(&mut self, code: &[Instr]) {
        self.text.push(String::from("    .text"));
        self.text.push(String::from("    .global main"));
        self.text.push(String::from("    .global _start"));
        self.text.push(String::from("    .align 2"));
        self.text.push(String::new());

        self.text.push(String::from("_start:"));
        self.text.push(String::from("    bl main"));
        self.text
            .push(String::from("    mov r7, #1      @ exit syscall"));
        self.text
            .push(String::from("    svc #0          @ make syscall"));
        self.text.push(String::new());

        if has_top_level_code(code) {
            self.emit_main(code);
        }
        self.emit_user_functions(code);
        self.emit_builtin_stubs();
    }

    fn emit_main(&mut self, code: &[Instr]) {
        self.text.push(String::from("main:"));
        self.text.push(String::from("    push {r4, r5, r6, r7, lr}"));
        self.text.push(String::new());

        self.label_prefix = String::from("main_");
        self.register_map.clear();
        self.next_reg = 4;
        self.pending_params.clear();

        let mut in_function = false;
        for instruction in code {
            match instruction {
                Instr::FuncBegin(_) => in_function = true,
                Instr::FuncEnd(_) => in_function = false,
                _ => {
                    if !in_function {
                        self.emit_instruction(instruction);
                    }
                }
            }
        }

        self.text.push(String::new());
        self.text.push(String::from("    mov r0, #0"));
        self.text.push(String::from("    pop {r4, r5, r6, r7, lr}"));
        self.text.push(String::from("    bx lr"));
        self.text.push(String::new());
        self.label_prefix.clear();
    }

    fn emit_user_functions(&mut self, code: &[Instr]) {
        let mut position = 0;
        while position < code.len() {
            let Instr::FuncBegin(name) = &code[position] else {
                position += 1;
                continue;
            };
            let end = code[position..]
                .iter()
                .position(|instruction| matches!(instruction, Instr::FuncEnd(_)))
                .map(|offset| position + offset)
                .unwrap_or(code.len());
            self.emit_function(name.clone(), &code[position + 1..end]);
            position = end + 1;
        }
    }

    fn emit_function(&mut self, name: String, region: &[Instr]) {
        self.label_prefix = format!("{}_", name);
        self.register_map.clear();
        self.next_reg = 4;
        self.pending_params.clear();

        self.text.push(format!("{}:", name));
        self.text.push(String::from("    push {r4, r5, r6, r7, lr}"));
        self.text.push(String::new());

        // Incoming arguments live in r0-r3; copy them into the
        // callee-saved window before the body clobbers the scratch
        // registers.
        let parameters = super::formal_parameters(region);
        for (slot, parameter) in parameters.iter().enumerate() {
            if slot < 4 && self.next_reg <= 7 {
                let register = format!("r{}", self.next_reg);
                self.text.push(format!(
                    "    mov {}, r{}  @ save param {}",
                    register, slot, parameter
                ));
                self.register_map.insert(parameter.clone(), register);
                self.next_reg += 1;
            }
        }
        if !parameters.is_empty() {
            self.text.push(String::new());
        }

        for instruction in &region[parameters.len()..] {
            self.emit_instruction(instruction);
        }

        let ends_with_return = self
            .text
            .last()
            .map(|line| line.contains("bx lr"))
            .unwrap_or(false);
        if !ends_with_return {
            self.text.push(String::new());
            self.text.push(String::from("    pop {r4, r5, r6, r7, lr}"));
            self.text.push(String::from("    bx lr"));
        }
        self.text.push(String::new());
        self.label_prefix.clear();
    }

    fn emit_builtin_stubs(&mut self) {
        self.text.push(String::from("@ Built-in function stubs"));
        self.text.push(String::new());

        self.text.push(String::from("print:"));
        self.text.push(String::from("    push {lr}"));
        self.text
            .push(String::from("    @ TODO: Implement print (value in r0)"));
        self.text
            .push(String::from("    @ Could use printf or write syscall"));
        self.text.push(String::from("    pop {lr}"));
        self.text.push(String::from("    bx lr"));
        self.text.push(String::new());

        self.text.push(String::from("input:"));
        self.text.push(String::from("    push {lr}"));
        self.text.push(String::from("    @ TODO: Implement input"));
        self.text.push(String::from("    mov r0, #0"));
        self.text.push(String::from("    pop {lr}"));
        self.text.push(String::from("    bx lr"));
        self.text.push(String::new());

        self.text.push(String::from("@ Software division helpers"));
        self.text.push(String::from(
            "@ These should be provided by compiler-rt or libc",
        ));
        self.text.push(String::from(
            "@ If not available, link with -lgcc or provide implementations",
        ));
    }

    // ========== Instructions ==========

    fn emit_instruction(&mut self, instruction: &Instr) {
        match instruction {
            Instr::FuncBegin(_) | Instr::FuncEnd(_) => {}
            Instr::Param(operand) => {
                let register = self.load_value(operand);
                self.pending_params.push(register);
            }
            Instr::Label(label) => {
                let unique = self.unique_label(label);
                self.text.push(format!("{}:", unique));
            }
            Instr::Goto(label) => {
                let unique = self.unique_label(label);
                self.text.push(format!("    b {}", unique));
            }
            Instr::IfFalse { condition, label } => {
                let register = self.load_value(condition);
                let unique = self.unique_label(label);
                self.text.push(format!("    cmp {}, #0", register));
                self.text.push(format!("    beq {}", unique));
            }
            Instr::IfTrue { condition, label } => {
                let register = self.load_value(condition);
                let unique = self.unique_label(label);
                self.text.push(format!("    cmp {}, #0", register));
                self.text.push(format!("    bne {}", unique));
            }
            Instr::Assign { value, target } => {
                let source = self.load_value(value);
                self.store(&source, target);
            }
            Instr::Binary {
                op,
                left,
                right,
                target,
            } => self.emit_binary(*op, left, right, target),
            Instr::Unary {
                op,
                operand,
                target,
            } => {
                let source = self.load_value(operand);
                let dest = self.allocate_register(&target.to_string());
                match op {
                    UnaryOp::Negate => self.text.push(format!("    rsb {}, {}, #0", dest, source)),
                    UnaryOp::Not => {
                        self.text.push(format!("    cmp {}, #0", source));
                        self.text.push(format!("    moveq {}, #1", dest));
                        self.text.push(format!("    movne {}, #0", dest));
                    }
                }
            }
            Instr::Call { name, target, .. } => {
                for (slot, register) in self.pending_params.clone().iter().take(4).enumerate() {
                    if register != &format!("r{}", slot) {
                        self.text.push(format!("    mov r{}, {}", slot, register));
                    }
                }
                self.pending_params.clear();
                self.text.push(format!("    bl {}", name));
                let dest = self.allocate_register(&target.to_string());
                if dest != "r0" {
                    self.text.push(format!("    mov {}, r0", dest));
                }
            }
            Instr::Return(value) => {
                if let Some(operand) = value {
                    let register = self.load_value(operand);
                    if register != "r0" {
                        self.text.push(format!("    mov r0, {}", register));
                    }
                }
                self.text.push(String::from("    pop {r4, r5, r6, r7, lr}"));
                self.text.push(String::from("    bx lr"));
            }
            Instr::Index {
                object,
                index,
                target,
            } => {
                let object_register = self.load_value(object);
                let index_register = self.load_value(index);
                let dest = self.allocate_register(&target.to_string());
                self.text.push(format!(
                    "    ldrb {}, [{}, {}]",
                    dest, object_register, index_register
                ));
            }
            Instr::ChannelCreate { .. } => self.emit_unsupported("CHANNEL_CREATE"),
            Instr::MethodCall { argc, .. } => {
                let keep = self.pending_params.len().saturating_sub(*argc);
                self.pending_params.truncate(keep);
                self.emit_unsupported("METHOD_CALL");
            }
            Instr::SeqBegin => self.emit_unsupported("SEQ_BEGIN"),
            Instr::SeqEnd => self.emit_unsupported("SEQ_END"),
            Instr::ParBegin => self.emit_unsupported("PAR_BEGIN"),
            Instr::ParEnd => self.emit_unsupported("PAR_END"),
            Instr::ThreadStart(_) => self.emit_unsupported("THREAD_START"),
            Instr::ThreadEnd(_) => self.emit_unsupported("THREAD_END"),
        }
    }

    fn emit_binary(&mut self, op: BinaryOp, left: &Operand, right: &Operand, target: &Operand) {
        let left_register = self.load_value(left);
        let right_register = self.load_value(right);
        let dest = self.allocate_register(&target.to_string());

        match op {
            BinaryOp::Add => self.text.push(format!(
                "    add {}, {}, {}",
                dest, left_register, right_register
            )),
            BinaryOp::Subtract => self.text.push(format!(
                "    sub {}, {}, {}",
                dest, left_register, right_register
            )),
            BinaryOp::Multiply => self.text.push(format!(
                "    mul {}, {}, {}",
                dest, left_register, right_register
            )),
            BinaryOp::Divide => {
                if left_register != "r0" {
                    self.text.push(format!("    mov r0, {}", left_register));
                }
                if right_register != "r1" {
                    self.text.push(format!("    mov r1, {}", right_register));
                }
                self.text.push(String::from("    bl __aeabi_idiv"));
                if dest != "r0" {
                    self.text.push(format!("    mov {}, r0", dest));
                }
            }
            BinaryOp::Modulo => {
                if left_register != "r0" {
                    self.text.push(format!("    mov r0, {}", left_register));
                }
                if right_register != "r1" {
                    self.text.push(format!("    mov r1, {}", right_register));
                }
                self.text.push(String::from("    bl __aeabi_idivmod"));
                // Remainder comes back in r1.
                if dest != "r1" {
                    self.text.push(format!("    mov {}, r1", dest));
                }
            }
            BinaryOp::Less
            | BinaryOp::LessEquals
            | BinaryOp::Greater
            | BinaryOp::GreaterEquals
            | BinaryOp::Equals
            | BinaryOp::NotEquals => {
                let (on_true, on_false) = match op {
                    BinaryOp::Less => ("movlt", "movge"),
                    BinaryOp::Greater => ("movgt", "movle"),
                    BinaryOp::LessEquals => ("movle", "movgt"),
                    BinaryOp::GreaterEquals => ("movge", "movlt"),
                    BinaryOp::Equals => ("moveq", "movne"),
                    _ => ("movne", "moveq"),
                };
                self.text
                    .push(format!("    cmp {}, {}", left_register, right_register));
                self.text.push(format!("    {} {}, #1", on_true, dest));
                self.text.push(format!("    {} {}, #0", on_false, dest));
            }
            BinaryOp::And => self.text.push(format!(
                "    and {}, {}, {}",
                dest, left_register, right_register
            )),
            BinaryOp::Or => self.text.push(format!(
                "    orr {}, {}, {}",
                dest, left_register, right_register
            )),
        }
    }

    fn emit_unsupported(&mut self, op: &str) {
        self.text
            .push(format!("    @ {}: not implemented in basic ARM", op));
    }

    // ========== Values and registers ==========

    fn unique_label(&self, label: &str) -> String {
        if !self.label_prefix.is_empty() && !label.starts_with('.') {
            return format!("{}{}", self.label_prefix, label);
        }
        label.to_string()
    }

    /// Materializes an operand into a register and returns its name.
    /// Mapped names come back as-is; everything else lands in `r0` or
    /// a freshly allocated register.
    fn load_value(&mut self, operand: &Operand) -> String {
        let key = operand.to_string();
        if let Some(register) = self.register_map.get(&key) {
            return register.clone();
        }

        match operand {
            Operand::Bool(value) => {
                let target = self.scratch_register();
                self.text
                    .push(format!("    mov {}, #{}", target, if *value { 1 } else { 0 }));
                target
            }
            Operand::Number(lexeme) => {
                let target = self.scratch_register();
                let number = lexeme.parse::<f64>().unwrap_or(0.0) as i64;
                self.text.push(format!("    mov {}, #{}", target, number));
                target
            }
            Operand::Str(value) => {
                let target = self.scratch_register();
                match self.string_label(value) {
                    Some(label) => {
                        let line = format!("    ldr {}, ={}", target, label);
                        self.text.push(line);
                    }
                    None => self.text.push(format!("    mov {}, #0", target)),
                }
                target
            }
            Operand::Name(name) => {
                if self.globals.contains(name) {
                    let target = self.scratch_register();
                    self.text.push(format!("    ldr {}, ={}", target, name));
                    self.text.push(format!("    ldr {}, [{}]", target, target));
                    return target;
                }
                let target = self.scratch_register();
                self.text.push(format!("    @ Unknown value: {}", name));
                self.text.push(format!("    mov {}, #0", target));
                target
            }
            Operand::Temp(_) => self.allocate_register(&key),
        }
    }

    fn store(&mut self, source: &str, target: &Operand) {
        match target {
            Operand::Name(name) if self.globals.contains(name) => {
                self.text.push(format!("    ldr r1, ={}", name));
                self.text.push(format!("    str {}, [r1]", source));
            }
            _ => {
                self.register_map
                    .insert(target.to_string(), source.to_string());
            }
        }
    }

    fn allocate_register(&mut self, key: &str) -> String {
        if let Some(register) = self.register_map.get(key) {
            return register.clone();
        }
        if self.next_reg <= 7 {
            let register = format!("r{}", self.next_reg);
            self.register_map.insert(key.to_string(), register.clone());
            self.next_reg += 1;
            return register;
        }
        // Out of callee-saved registers; fall back on r4.
        String::from("r4")
    }

    fn scratch_register(&self) -> String {
        String::from("r0")
    }
}

fn has_top_level_code(code: &[Instr]) -> bool {
    let mut in_function = false;
    for instruction in code {
        match instruction {
            Instr::FuncBegin(_) => in_function = true,
            Instr::FuncEnd(_) => in_function = false,
            _ => {
                if !in_function {
                    return true;
                }
            }
        }
    }
    false
}

fn target_of(instruction: &Instr) -> Option<&Operand> {
    match instruction {
        Instr::Assign { target, .. }
        | Instr::Binary { target, .. }
        | Instr::Unary { target, .. }
        | Instr::Call { target, .. }
        | Instr::Index { target, .. }
        | Instr::MethodCall { target, .. } => Some(target),
        _ => None,
    }
}

fn operands_of(instruction: &Instr) -> Vec<&Operand> {
    match instruction {
        Instr::Assign { value, target } => vec![value, target],
        Instr::Binary {
            left, right, target, ..
        } => vec![left, right, target],
        Instr::Unary {
            operand, target, ..
        } => vec![operand, target],
        Instr::IfTrue { condition, .. } | Instr::IfFalse { condition, .. } => vec![condition],
        Instr::Param(operand) => vec![operand],
        Instr::Call { target, .. } => vec![target],
        Instr::Return(Some(operand)) => vec![operand],
        Instr::Index {
            object,
            index,
            target,
        } => vec![object, index, target],
        Instr::MethodCall { object, target, .. } => vec![object, target],
        _ => vec![],
    }
}

fn escape_asm(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}
