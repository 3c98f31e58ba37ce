//! Text backends over the three-address code.
//!
//! Each backend is a pure function of the instruction list: it runs
//! its own analysis pass over the IR and never consults the AST. An
//! opcode a backend cannot express is emitted as an inline comment so
//! generation always completes.

pub mod arm;
pub mod c;

#[cfg(test)]
mod tests;

use crate::ir::{Instr, Operand};

/// Formal parameter names at the head of a function region.
///
/// The PARAMs directly after FUNC_BEGIN name the formals, but a call
/// at the start of the body pushes its argument PARAMs right behind
/// them. Each CALL claims its last `argc` pending PARAMs, so a formal
/// is a leading PARAM no call claims.
fn formal_parameters(region: &[Instr]) -> Vec<String> {
    let mut claimed = vec![false; region.len()];
    let mut pending: Vec<usize> = vec![];
    for (position, instruction) in region.iter().enumerate() {
        match instruction {
            Instr::Param(_) => pending.push(position),
            Instr::Call { argc, .. } | Instr::MethodCall { argc, .. } => {
                let start = pending.len().saturating_sub(*argc);
                for index in pending.split_off(start) {
                    claimed[index] = true;
                }
            }
            _ => {}
        }
    }

    let mut formals = vec![];
    for (position, instruction) in region.iter().enumerate() {
        match instruction {
            Instr::Param(Operand::Name(name)) if !claimed[position] => formals.push(name.clone()),
            _ => break,
        }
    }
    formals
}
