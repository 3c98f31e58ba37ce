use std::fmt::Display;

use crate::ast::{
    expressions::{BinaryOp, UnaryOp},
    types::ChannelKind,
};

/// A value position in an instruction: a temporary, a source-level
/// name, or a literal carried through as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Temp(u32),
    Name(String),
    Number(String),
    Str(String),
    Bool(bool),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Temp(index) => write!(f, "t{}", index),
            Operand::Name(name) => write!(f, "{}", name),
            Operand::Number(lexeme) => write!(f, "{}", lexeme),
            Operand::Str(value) => write!(f, "\"{}\"", value),
            Operand::Bool(value) => write!(f, "{}", value),
        }
    }
}

/// One three-address instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    Assign {
        value: Operand,
        target: Operand,
    },
    Binary {
        op: BinaryOp,
        left: Operand,
        right: Operand,
        target: Operand,
    },
    Unary {
        op: UnaryOp,
        operand: Operand,
        target: Operand,
    },
    Label(String),
    Goto(String),
    IfTrue {
        condition: Operand,
        label: String,
    },
    IfFalse {
        condition: Operand,
        label: String,
    },
    Param(Operand),
    Call {
        name: String,
        argc: usize,
        target: Operand,
    },
    Return(Option<Operand>),
    FuncBegin(String),
    FuncEnd(String),
    Index {
        object: Operand,
        index: Operand,
        target: Operand,
    },
    ChannelCreate {
        kind: ChannelKind,
        name: String,
    },
    MethodCall {
        object: Operand,
        method: String,
        argc: usize,
        target: Operand,
    },
    SeqBegin,
    SeqEnd,
    ParBegin,
    ParEnd,
    /// Carries the zero-based position of the statement inside its
    /// `par` block.
    ThreadStart(usize),
    ThreadEnd(usize),
}

impl Display for Instr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instr::Assign { value, target } => write!(f, "{} = {}", target, value),
            Instr::Binary {
                op,
                left,
                right,
                target,
            } => write!(f, "{} = {} {} {}", target, left, op, right),
            Instr::Unary {
                op,
                operand,
                target,
            } => write!(f, "{} = {} {}", target, op, operand),
            Instr::Label(label) => write!(f, "LABEL {}", label),
            Instr::Goto(label) => write!(f, "GOTO {}", label),
            Instr::IfTrue { condition, label } => write!(f, "IF_TRUE {} GOTO {}", condition, label),
            Instr::IfFalse { condition, label } => {
                write!(f, "IF_FALSE {} GOTO {}", condition, label)
            }
            Instr::Param(operand) => write!(f, "PARAM {}", operand),
            Instr::Call { name, argc, target } => write!(f, "CALL {} {} {}", name, argc, target),
            Instr::Return(Some(operand)) => write!(f, "RETURN {}", operand),
            Instr::Return(None) => write!(f, "RETURN"),
            Instr::FuncBegin(name) => write!(f, "FUNC_BEGIN {}", name),
            Instr::FuncEnd(name) => write!(f, "FUNC_END {}", name),
            Instr::Index {
                object,
                index,
                target,
            } => write!(f, "{} = {} INDEX {}", target, object, index),
            Instr::ChannelCreate { kind, name } => write!(f, "CHANNEL_CREATE {} {}", kind, name),
            Instr::MethodCall {
                object,
                method,
                argc,
                target,
            } => write!(f, "METHOD_CALL {} {} {} {}", object, method, argc, target),
            Instr::SeqBegin => write!(f, "SEQ_BEGIN"),
            Instr::SeqEnd => write!(f, "SEQ_END"),
            Instr::ParBegin => write!(f, "PAR_BEGIN"),
            Instr::ParEnd => write!(f, "PAR_END"),
            Instr::ThreadStart(index) => write!(f, "THREAD_START {}", index),
            Instr::ThreadEnd(index) => write!(f, "THREAD_END {}", index),
        }
    }
}

/// Renders a whole instruction sequence as text, one instruction per
/// line.
pub fn render(code: &[Instr]) -> String {
    let mut out = String::new();
    for instruction in code {
        out.push_str(&instruction.to_string());
        out.push('\n');
    }
    out
}
